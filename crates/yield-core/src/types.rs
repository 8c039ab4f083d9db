use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Duration, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// Shown in place of premium-only content for free users.
pub const UPGRADE_MESSAGE: &str = "Upgrade to premium to view complete details";

/// Length of a premium subscription started by an upgrade.
pub const SUBSCRIPTION_PERIOD_DAYS: i64 = 30;

/// Third-party platform exposing yield products
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct Platform {
    pub id: String,
    pub name: String,
    pub logo_url: String,
    pub homepage_url: String,
}

impl Platform {
    /// Placeholder used when an opportunity references a platform that is
    /// missing from the reference data.
    pub fn unknown() -> Self {
        Self {
            id: "unknown".to_string(),
            name: "Unknown".to_string(),
            logo_url: String::new(),
            homepage_url: "#".to_string(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "lowercase")]
pub enum RiskLevel {
    Low,
    Medium,
    High,
}

impl RiskLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            RiskLevel::Low => "low",
            RiskLevel::Medium => "medium",
            RiskLevel::High => "high",
        }
    }
}

impl fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RiskLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "low" => Ok(RiskLevel::Low),
            "medium" => Ok(RiskLevel::Medium),
            "high" => Ok(RiskLevel::High),
            other => Err(format!("unknown risk level '{}'", other)),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "lowercase")]
pub enum SubscriptionLevel {
    #[default]
    Free,
    Premium,
}

impl SubscriptionLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            SubscriptionLevel::Free => "free",
            SubscriptionLevel::Premium => "premium",
        }
    }

    pub fn is_premium(&self) -> bool {
        matches!(self, SubscriptionLevel::Premium)
    }
}

impl fmt::Display for SubscriptionLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SubscriptionLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "free" => Ok(SubscriptionLevel::Free),
            "premium" => Ok(SubscriptionLevel::Premium),
            other => Err(format!("unknown subscription level '{}'", other)),
        }
    }
}

/// A yield-bearing product offered by a platform
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct YieldOpportunity {
    pub id: String,
    pub platform_id: String,
    pub name: String,
    pub asset: String,
    /// Annual percentage yield, in percent (3.25 = 3.25%)
    pub apy: f64,
    /// Total value locked in USD
    pub tvl: f64,
    pub risk_level: RiskLevel,
    /// Details are reserved for premium subscribers
    pub is_premium: bool,
    pub tags: Vec<String>,
    pub description: String,
    pub last_updated: DateTime<Utc>,
}

impl YieldOpportunity {
    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.iter().any(|t| t == tag)
    }
}

/// One day of an opportunity's APY history
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct HistoricalYieldDataPoint {
    pub date: NaiveDate,
    pub apy: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: String,
    pub email: String,
    pub subscription_level: SubscriptionLevel,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subscription_end_date: Option<DateTime<Utc>>,
    #[serde(rename = "savedOpportunities", default)]
    pub saved_opportunity_ids: Vec<String>,
}

impl User {
    pub fn is_premium(&self) -> bool {
        self.subscription_level.is_premium()
    }

    pub fn has_saved(&self, opportunity_id: &str) -> bool {
        self.saved_opportunity_ids.iter().any(|id| id == opportunity_id)
    }

    /// Add to the saved set. Returns false if it was already saved.
    pub fn save(&mut self, opportunity_id: &str) -> bool {
        if self.has_saved(opportunity_id) {
            return false;
        }
        self.saved_opportunity_ids.push(opportunity_id.to_string());
        true
    }

    /// Remove from the saved set. Returns false if it was not saved.
    pub fn unsave(&mut self, opportunity_id: &str) -> bool {
        let before = self.saved_opportunity_ids.len();
        self.saved_opportunity_ids.retain(|id| id != opportunity_id);
        self.saved_opportunity_ids.len() != before
    }

    /// Flip saved membership, returning the new state.
    pub fn toggle_saved(&mut self, opportunity_id: &str) -> bool {
        if !self.unsave(opportunity_id) {
            self.save(opportunity_id);
            return true;
        }
        false
    }

    /// Start a premium period of `SUBSCRIPTION_PERIOD_DAYS` from `now`.
    pub fn upgrade(&mut self, now: DateTime<Utc>) {
        self.subscription_level = SubscriptionLevel::Premium;
        self.subscription_end_date = Some(now + Duration::days(SUBSCRIPTION_PERIOD_DAYS));
    }

    pub fn downgrade(&mut self) {
        self.subscription_level = SubscriptionLevel::Free;
        self.subscription_end_date = None;
    }

    pub fn set_subscription(&mut self, level: SubscriptionLevel, now: DateTime<Utc>) {
        match level {
            SubscriptionLevel::Premium => self.upgrade(now),
            SubscriptionLevel::Free => self.downgrade(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    fn test_user(saved: &[&str]) -> User {
        User {
            id: "u1".to_string(),
            email: "u1@example.com".to_string(),
            subscription_level: SubscriptionLevel::Free,
            subscription_end_date: None,
            saved_opportunity_ids: saved.iter().map(|s| s.to_string()).collect(),
        }
    }

    fn saved_set(user: &User) -> HashSet<String> {
        user.saved_opportunity_ids.iter().cloned().collect()
    }

    #[test]
    fn test_save_is_idempotent() {
        let mut user = test_user(&["a"]);
        assert!(!user.save("a"));
        assert!(user.save("b"));
        assert!(!user.save("b"));
        assert_eq!(user.saved_opportunity_ids, vec!["a", "b"]);
    }

    #[test]
    fn test_unsave_is_idempotent() {
        let mut user = test_user(&["a", "b"]);
        assert!(user.unsave("a"));
        assert!(!user.unsave("a"));
        assert!(!user.unsave("missing"));
        assert_eq!(user.saved_opportunity_ids, vec!["b"]);
    }

    #[test]
    fn test_save_then_unsave_restores_set() {
        let mut user = test_user(&["a", "c"]);
        let original = saved_set(&user);

        user.save("b");
        user.unsave("b");
        assert_eq!(saved_set(&user), original);

        user.unsave("a");
        user.save("a");
        assert_eq!(saved_set(&user), original);
    }

    #[test]
    fn test_toggle_saved() {
        let mut user = test_user(&[]);
        assert!(user.toggle_saved("x"));
        assert!(user.has_saved("x"));
        assert!(!user.toggle_saved("x"));
        assert!(!user.has_saved("x"));
    }

    #[test]
    fn test_upgrade_then_downgrade() {
        let mut user = test_user(&[]);
        let now = Utc::now();

        user.set_subscription(SubscriptionLevel::Premium, now);
        assert!(user.is_premium());
        assert_eq!(user.subscription_end_date, Some(now + Duration::days(30)));

        user.set_subscription(SubscriptionLevel::Free, now);
        assert_eq!(user.subscription_level, SubscriptionLevel::Free);
        assert!(user.subscription_end_date.is_none());
    }

    #[test]
    fn test_level_parsing() {
        assert_eq!("Premium".parse::<SubscriptionLevel>(), Ok(SubscriptionLevel::Premium));
        assert_eq!(" low ".parse::<RiskLevel>(), Ok(RiskLevel::Low));
        assert!("gold".parse::<SubscriptionLevel>().is_err());
    }

    #[test]
    fn test_user_json_shape() {
        let user = test_user(&["aave-usdc"]);
        let json = serde_json::to_value(&user).unwrap();
        assert_eq!(json["subscriptionLevel"], "free");
        assert_eq!(json["savedOpportunities"][0], "aave-usdc");
        assert!(json.get("subscriptionEndDate").is_none());
    }
}
