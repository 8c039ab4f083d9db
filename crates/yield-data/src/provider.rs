use async_trait::async_trait;
use chrono::Utc;
use dashmap::DashMap;
use yield_core::{
    HistoricalYieldDataPoint, Platform, SubscriptionLevel, User, YieldDataProvider, YieldError,
    YieldOpportunity, YieldResult, UPGRADE_MESSAGE,
};

use crate::history::generate_history;
use crate::latency::{simulate, LatencyProfile};
use crate::seed::{seed_opportunities, seed_platforms, seed_users};

/// Provider backed by seeded in-memory collections.
///
/// Reference data is immutable after construction. User records live in a
/// session store keyed by user id; each mutation holds the entry lock only
/// for the duration of the update, never across the simulated delay.
pub struct InMemoryProvider {
    platforms: Vec<Platform>,
    opportunities: Vec<YieldOpportunity>,
    users: DashMap<String, User>,
    latency: LatencyProfile,
}

impl InMemoryProvider {
    /// Provider loaded with the demo platforms, opportunities and user.
    pub fn new(latency: LatencyProfile) -> Self {
        Self::with_data(seed_platforms(), seed_opportunities(Utc::now()), seed_users(), latency)
    }

    pub fn with_data(
        platforms: Vec<Platform>,
        opportunities: Vec<YieldOpportunity>,
        users: Vec<User>,
        latency: LatencyProfile,
    ) -> Self {
        tracing::info!(
            "In-memory provider: {} platforms, {} opportunities, {} users",
            platforms.len(),
            opportunities.len(),
            users.len()
        );

        Self {
            platforms,
            opportunities,
            users: users.into_iter().map(|u| (u.id.clone(), u)).collect(),
            latency,
        }
    }

    pub fn find_opportunity(&self, opportunity_id: &str) -> YieldResult<&YieldOpportunity> {
        self.opportunities
            .iter()
            .find(|o| o.id == opportunity_id)
            .ok_or_else(|| YieldError::opportunity_not_found(opportunity_id))
    }

    /// Apply `update` to the stored user and return the resulting record.
    fn update_user<F>(&self, user_id: &str, update: F) -> YieldResult<User>
    where
        F: FnOnce(&mut User),
    {
        let mut entry = self
            .users
            .get_mut(user_id)
            .ok_or_else(|| YieldError::user_not_found(user_id))?;
        update(entry.value_mut());
        Ok(entry.value().clone())
    }
}

/// Replace premium descriptions for free viewers. APY and the remaining
/// fields are left as they are.
fn mask_for_level(opportunity: &YieldOpportunity, level: SubscriptionLevel) -> YieldOpportunity {
    let mut masked = opportunity.clone();
    if opportunity.is_premium && !level.is_premium() {
        masked.description = UPGRADE_MESSAGE.to_string();
    }
    masked
}

#[async_trait]
impl YieldDataProvider for InMemoryProvider {
    async fn list_platforms(&self) -> YieldResult<Vec<Platform>> {
        simulate(self.latency.platforms).await;
        Ok(self.platforms.clone())
    }

    async fn list_opportunities(&self, level: SubscriptionLevel) -> YieldResult<Vec<YieldOpportunity>> {
        simulate(self.latency.opportunities).await;
        Ok(self
            .opportunities
            .iter()
            .map(|opp| mask_for_level(opp, level))
            .collect())
    }

    async fn get_history(&self, opportunity_id: &str) -> YieldResult<Vec<HistoricalYieldDataPoint>> {
        simulate(self.latency.history).await;
        let opportunity = self.find_opportunity(opportunity_id)?;
        let today = Utc::now().date_naive();
        let points = {
            let mut rng = rand::thread_rng();
            generate_history(opportunity, today, &mut rng)
        };
        Ok(points)
    }

    async fn get_user(&self, user_id: &str) -> YieldResult<User> {
        simulate(self.latency.user).await;
        self.users
            .get(user_id)
            .map(|entry| entry.value().clone())
            .ok_or_else(|| YieldError::user_not_found(user_id))
    }

    async fn set_subscription(&self, user_id: &str, level: SubscriptionLevel) -> YieldResult<User> {
        simulate(self.latency.subscription).await;
        let user = self.update_user(user_id, |user| user.set_subscription(level, Utc::now()))?;
        tracing::info!("User {} subscription set to {}", user_id, level);
        Ok(user)
    }

    async fn save_opportunity(&self, user_id: &str, opportunity_id: &str) -> YieldResult<User> {
        simulate(self.latency.saved).await;
        self.find_opportunity(opportunity_id)?;
        self.update_user(user_id, |user| {
            if user.save(opportunity_id) {
                tracing::info!("User {} saved {}", user.id, opportunity_id);
            }
        })
    }

    async fn unsave_opportunity(&self, user_id: &str, opportunity_id: &str) -> YieldResult<User> {
        simulate(self.latency.saved).await;
        self.update_user(user_id, |user| {
            if user.unsave(opportunity_id) {
                tracing::info!("User {} removed {}", user.id, opportunity_id);
            }
        })
    }
}
