use async_trait::async_trait;

use crate::{HistoricalYieldDataPoint, Platform, SubscriptionLevel, User, YieldOpportunity, YieldResult};

/// Source of reference data and user state consumed by the dashboard views.
///
/// Implementations may suspend before completing; callers must not assume
/// any ordering between concurrently issued calls.
#[async_trait]
pub trait YieldDataProvider: Send + Sync {
    async fn list_platforms(&self) -> YieldResult<Vec<Platform>>;

    /// Premium opportunities have their description replaced with the
    /// upsell message when `level` is free.
    async fn list_opportunities(&self, level: SubscriptionLevel) -> YieldResult<Vec<YieldOpportunity>>;

    async fn get_history(&self, opportunity_id: &str) -> YieldResult<Vec<HistoricalYieldDataPoint>>;

    async fn get_user(&self, user_id: &str) -> YieldResult<User>;

    async fn set_subscription(&self, user_id: &str, level: SubscriptionLevel) -> YieldResult<User>;

    async fn save_opportunity(&self, user_id: &str, opportunity_id: &str) -> YieldResult<User>;

    async fn unsave_opportunity(&self, user_id: &str, opportunity_id: &str) -> YieldResult<User>;
}
