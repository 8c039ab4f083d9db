//! Premium Gate Module
//!
//! Decides whether a viewer sees an opportunity's full details or the
//! upsell prompt. Display-level only: it does not protect the data.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use yield_core::{HistoricalYieldDataPoint, RiskLevel, User, YieldOpportunity, UPGRADE_MESSAGE};

const RISK_REPORT_SUMMARY: &str = "This opportunity has been evaluated by our risk assessment team. \
The protocol has undergone security audits and has had a stable history of operation. \
Always conduct your own research before investing.";

const SIMILAR_COMING_SOON: &str = "Similar opportunities feature coming soon.";

/// Where the upsell prompt sends the viewer.
pub const UPGRADE_PATH: &str = "/premium";

/// True when the opportunity is premium and the viewer is not. A missing
/// viewer counts as free.
pub fn is_locked(opportunity: &YieldOpportunity, user: Option<&User>) -> bool {
    opportunity.is_premium && !user.map_or(false, User::is_premium)
}

/// Caption shown on premium cards in list views. `None` for regular cards.
pub fn premium_hint(opportunity: &YieldOpportunity, user: Option<&User>) -> Option<&'static str> {
    if !opportunity.is_premium {
        return None;
    }
    if user.map_or(false, User::is_premium) {
        Some("Premium opportunity - View details")
    } else {
        Some("Upgrade to premium to see full details")
    }
}

/// Risk report block of the detail view
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RiskAssessment {
    pub level: RiskLevel,
    pub audited: bool,
    pub summary: String,
}

impl RiskAssessment {
    pub fn for_opportunity(opportunity: &YieldOpportunity) -> Self {
        Self {
            level: opportunity.risk_level,
            audited: true,
            summary: RISK_REPORT_SUMMARY.to_string(),
        }
    }
}

/// Premium-sensitive part of the detail view after gating
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct GatedDetail {
    pub locked: bool,
    /// Full description, or the upsell message when locked
    pub description: String,
    /// Absent when locked
    pub history: Option<Vec<HistoricalYieldDataPoint>>,
    /// Absent when locked
    pub risk_assessment: Option<RiskAssessment>,
    pub similar_opportunities: String,
    /// Set when locked
    pub upgrade_url: Option<String>,
}

/// Build the gated detail payload. `history` is only consulted when the
/// opportunity is unlocked for this viewer; callers should skip fetching it
/// otherwise.
pub fn gate_detail(
    opportunity: &YieldOpportunity,
    user: Option<&User>,
    history: Option<Vec<HistoricalYieldDataPoint>>,
) -> GatedDetail {
    if is_locked(opportunity, user) {
        return GatedDetail {
            locked: true,
            description: UPGRADE_MESSAGE.to_string(),
            history: None,
            risk_assessment: None,
            similar_opportunities: UPGRADE_MESSAGE.to_string(),
            upgrade_url: Some(UPGRADE_PATH.to_string()),
        };
    }

    GatedDetail {
        locked: false,
        description: opportunity.description.clone(),
        history: history.filter(|points| !points.is_empty()),
        risk_assessment: Some(RiskAssessment::for_opportunity(opportunity)),
        similar_opportunities: SIMILAR_COMING_SOON.to_string(),
        upgrade_url: None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, Utc};
    use yield_core::SubscriptionLevel;

    fn opportunity(is_premium: bool) -> YieldOpportunity {
        YieldOpportunity {
            id: "yearn-eth".to_string(),
            platform_id: "yearn".to_string(),
            name: "ETH Vault".to_string(),
            asset: "ETH".to_string(),
            apy: 7.83,
            tvl: 475_000_000.0,
            risk_level: RiskLevel::Medium,
            is_premium,
            tags: vec!["volatile".to_string(), "vault".to_string()],
            description: "Deposit ETH to autocompounding Yearn vault.".to_string(),
            last_updated: Utc::now(),
        }
    }

    fn user(level: SubscriptionLevel) -> User {
        User {
            id: "u1".to_string(),
            email: "u1@example.com".to_string(),
            subscription_level: level,
            subscription_end_date: None,
            saved_opportunity_ids: vec![],
        }
    }

    fn history() -> Vec<HistoricalYieldDataPoint> {
        vec![HistoricalYieldDataPoint {
            date: NaiveDate::from_ymd_opt(2026, 1, 1).unwrap(),
            apy: 7.5,
        }]
    }

    #[test]
    fn test_is_locked_truth_table() {
        let free = user(SubscriptionLevel::Free);
        let premium = user(SubscriptionLevel::Premium);

        assert!(is_locked(&opportunity(true), Some(&free)));
        assert!(is_locked(&opportunity(true), None));
        assert!(!is_locked(&opportunity(true), Some(&premium)));
        assert!(!is_locked(&opportunity(false), Some(&free)));
        assert!(!is_locked(&opportunity(false), Some(&premium)));
        assert!(!is_locked(&opportunity(false), None));
    }

    #[test]
    fn test_locked_detail_masks_everything() {
        let free = user(SubscriptionLevel::Free);
        let detail = gate_detail(&opportunity(true), Some(&free), Some(history()));

        assert!(detail.locked);
        assert_eq!(detail.description, UPGRADE_MESSAGE);
        assert!(detail.history.is_none());
        assert!(detail.risk_assessment.is_none());
        assert_eq!(detail.upgrade_url.as_deref(), Some(UPGRADE_PATH));
    }

    #[test]
    fn test_unlocked_detail_shows_everything() {
        let premium = user(SubscriptionLevel::Premium);
        let opp = opportunity(true);
        let detail = gate_detail(&opp, Some(&premium), Some(history()));

        assert!(!detail.locked);
        assert_eq!(detail.description, opp.description);
        assert_eq!(detail.history.map(|h| h.len()), Some(1));
        assert_eq!(detail.risk_assessment.map(|r| r.level), Some(RiskLevel::Medium));
        assert!(detail.upgrade_url.is_none());
    }

    #[test]
    fn test_premium_hint() {
        let free = user(SubscriptionLevel::Free);
        let premium = user(SubscriptionLevel::Premium);

        assert_eq!(premium_hint(&opportunity(false), Some(&free)), None);
        assert_eq!(
            premium_hint(&opportunity(true), Some(&premium)),
            Some("Premium opportunity - View details")
        );
        assert_eq!(
            premium_hint(&opportunity(true), None),
            Some("Upgrade to premium to see full details")
        );
    }
}
