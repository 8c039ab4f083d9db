//! JSON view models for the dashboard pages

use chrono::{DateTime, Utc};
use serde::Serialize;
use utoipa::ToSchema;
use yield_core::{Platform, SubscriptionLevel, User, YieldOpportunity};
use yield_screener::{
    format_currency, format_percent, is_locked, premium_hint, ActiveFilter, ApyTier, FilterCriteria,
    GatedDetail, Tab,
};

/// Everything an opportunity card renders
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct OpportunityCard {
    #[serde(flatten)]
    pub opportunity: YieldOpportunity,
    pub platform: Platform,
    pub apy_display: String,
    pub tvl_display: String,
    pub apy_tier: ApyTier,
    pub is_saved: bool,
    pub is_locked: bool,
    pub premium_hint: Option<String>,
}

impl OpportunityCard {
    pub fn build(opportunity: &YieldOpportunity, platforms: &[Platform], user: Option<&User>) -> Self {
        let platform = platforms
            .iter()
            .find(|p| p.id == opportunity.platform_id)
            .cloned()
            .unwrap_or_else(Platform::unknown);

        Self {
            platform,
            apy_display: format_percent(opportunity.apy),
            tvl_display: format_currency(opportunity.tvl),
            apy_tier: ApyTier::of(opportunity),
            is_saved: user.map_or(false, |u| u.has_saved(&opportunity.id)),
            is_locked: is_locked(opportunity, user),
            premium_hint: premium_hint(opportunity, user).map(str::to_string),
            opportunity: opportunity.clone(),
        }
    }

    pub fn build_all(opportunities: &[YieldOpportunity], platforms: &[Platform], user: Option<&User>) -> Vec<Self> {
        opportunities
            .iter()
            .map(|opp| Self::build(opp, platforms, user))
            .collect()
    }
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct TabView {
    pub id: Tab,
    pub label: String,
    pub active: bool,
}

pub fn tab_views(tabs: &[Tab], active: Tab) -> Vec<TabView> {
    tabs.iter()
        .map(|&tab| TabView {
            id: tab,
            label: tab.label().to_string(),
            active: tab == active,
        })
        .collect()
}

/// Browse page: filter bar state plus the matching cards
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BrowseView {
    pub tabs: Vec<TabView>,
    pub criteria: FilterCriteria,
    pub active_filters: Vec<ActiveFilter>,
    pub platforms: Vec<Platform>,
    pub total: usize,
    pub opportunities: Vec<OpportunityCard>,
}

/// Home page: top APY strip and tabbed list
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DashboardView {
    pub top_opportunities: Vec<OpportunityCard>,
    pub tabs: Vec<TabView>,
    pub opportunities: Vec<OpportunityCard>,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SavedView {
    pub total: usize,
    pub opportunities: Vec<OpportunityCard>,
}

/// Detail page: the card plus the gated premium section
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DetailView {
    pub opportunity: OpportunityCard,
    pub premium: GatedDetail,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PlanFeature {
    pub label: String,
    pub included: bool,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PlanView {
    pub level: SubscriptionLevel,
    pub name: String,
    pub description: String,
    pub monthly_price: f64,
    pub price_display: String,
    pub recommended: bool,
    pub is_current: bool,
    pub features: Vec<PlanFeature>,
}

/// Premium page: both plans and where the user stands
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PremiumView {
    pub current_level: SubscriptionLevel,
    pub subscription_end_date: Option<DateTime<Utc>>,
    pub plans: Vec<PlanView>,
}

fn features(items: &[(&str, bool)]) -> Vec<PlanFeature> {
    items
        .iter()
        .map(|&(label, included)| PlanFeature {
            label: label.to_string(),
            included,
        })
        .collect()
}

impl PremiumView {
    pub fn for_user(user: &User) -> Self {
        let free = PlanView {
            level: SubscriptionLevel::Free,
            name: "Free Plan".to_string(),
            description: "Basic access to yield opportunities".to_string(),
            monthly_price: 0.0,
            price_display: "$0/month".to_string(),
            recommended: false,
            is_current: !user.is_premium(),
            features: features(&[
                ("View basic yield opportunities", true),
                ("Save your favorite opportunities", true),
                ("Basic APY information", true),
                ("Premium opportunities", false),
                ("Historical APY data", false),
                ("Risk assessment reports", false),
            ]),
        };
        let premium = PlanView {
            level: SubscriptionLevel::Premium,
            name: "Premium Plan".to_string(),
            description: "Full access to all features".to_string(),
            monthly_price: 19.99,
            price_display: "$19.99/month".to_string(),
            recommended: true,
            is_current: user.is_premium(),
            features: features(&[
                ("All free plan features", true),
                ("Access to premium opportunities", true),
                ("Detailed historical APY data", true),
                ("Risk assessment reports", true),
                ("Email notifications for APY changes", true),
                ("Priority customer support", true),
            ]),
        };

        Self {
            current_level: user.subscription_level,
            subscription_end_date: user.subscription_end_date,
            plans: vec![free, premium],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use yield_data::{seed_opportunities, seed_platforms, seed_users};

    #[test]
    fn test_card_for_premium_opportunity() {
        let platforms = seed_platforms();
        let opportunities = seed_opportunities(Utc::now());
        let user = seed_users().remove(0);
        let uniswap = opportunities.iter().find(|o| o.id == "uniswap-eth-usdc").unwrap();

        let card = OpportunityCard::build(uniswap, &platforms, Some(&user));
        assert_eq!(card.platform.name, "Uniswap");
        assert_eq!(card.apy_display, "11.25%");
        assert_eq!(card.tvl_display, "$325,000,000.00");
        assert_eq!(card.apy_tier, ApyTier::High);
        assert!(card.is_locked);
        assert!(!card.is_saved);
        assert_eq!(card.premium_hint.as_deref(), Some("Upgrade to premium to see full details"));
    }

    #[test]
    fn test_card_falls_back_to_unknown_platform() {
        let mut opportunity = seed_opportunities(Utc::now()).remove(0);
        opportunity.platform_id = "gone".to_string();

        let card = OpportunityCard::build(&opportunity, &seed_platforms(), None);
        assert_eq!(card.platform, Platform::unknown());
        assert_eq!(card.platform.homepage_url, "#");
    }

    #[test]
    fn test_card_json_is_flat() {
        let opportunity = seed_opportunities(Utc::now()).remove(0);
        let card = OpportunityCard::build(&opportunity, &seed_platforms(), None);
        let json = serde_json::to_value(&card).unwrap();

        assert_eq!(json["id"], "aave-usdc");
        assert_eq!(json["platformId"], "aave");
        assert_eq!(json["apyTier"], "low");
        assert_eq!(json["platform"]["name"], "Aave");
    }

    #[test]
    fn test_premium_view_marks_current_plan() {
        let mut user = seed_users().remove(0);
        let view = PremiumView::for_user(&user);
        assert!(view.plans[0].is_current);
        assert!(!view.plans[1].is_current);

        user.upgrade(Utc::now());
        let view = PremiumView::for_user(&user);
        assert_eq!(view.current_level, SubscriptionLevel::Premium);
        assert!(view.plans[1].is_current);
        assert!(view.subscription_end_date.is_some());
    }
}
