//! Opportunity Filter Module
//!
//! Applies tab, search, platform, risk and APY predicates to the opportunity
//! list and orders the survivors by APY.

use yield_core::{Platform, User, YieldOpportunity};

use crate::models::{ActiveFilter, FilterCriteria, Tab};

/// Size of the "top opportunities" strip on the home dashboard.
pub const TOP_OPPORTUNITIES: usize = 3;

/// Filters opportunities against criteria, resolving platform names and the
/// saved set from the supplied context.
pub struct OpportunityFilter<'a> {
    platforms: &'a [Platform],
    user: Option<&'a User>,
}

impl<'a> OpportunityFilter<'a> {
    pub fn new(platforms: &'a [Platform]) -> Self {
        Self { platforms, user: None }
    }

    /// Use this user's saved set for the `saved` tab.
    pub fn with_user(mut self, user: Option<&'a User>) -> Self {
        self.user = user;
        self
    }

    /// Name of the platform, or `Unknown` when it is not in the reference data.
    pub fn platform_name(&self, platform_id: &str) -> &str {
        self.platforms
            .iter()
            .find(|p| p.id == platform_id)
            .map(|p| p.name.as_str())
            .unwrap_or("Unknown")
    }

    /// Return the matching opportunities sorted by APY, highest first.
    /// Equal APYs keep their input order.
    pub fn apply(&self, opportunities: &[YieldOpportunity], criteria: &FilterCriteria) -> Vec<YieldOpportunity> {
        let mut matched: Vec<YieldOpportunity> = opportunities
            .iter()
            .filter(|opp| self.matches(opp, criteria))
            .cloned()
            .collect();

        sort_by_apy(&mut matched);

        tracing::debug!(
            "Filter tab={} matched {}/{} opportunities",
            criteria.tab,
            matched.len(),
            opportunities.len()
        );

        matched
    }

    /// Check a single opportunity against every active predicate.
    pub fn matches(&self, opp: &YieldOpportunity, criteria: &FilterCriteria) -> bool {
        self.matches_tab(opp, criteria.tab)
            && self.matches_search(opp, criteria.search_term())
            && criteria
                .platform_id
                .as_deref()
                .map_or(true, |platform_id| opp.platform_id == platform_id)
            && criteria.risk_level.map_or(true, |risk| opp.risk_level == risk)
            && criteria.min_apy.map_or(true, |min_apy| opp.apy >= min_apy)
    }

    fn matches_tab(&self, opp: &YieldOpportunity, tab: Tab) -> bool {
        match tab {
            Tab::All => true,
            Tab::Premium => opp.is_premium,
            Tab::Saved => self.user.map_or(false, |user| user.has_saved(&opp.id)),
            tagged => tagged.required_tag().map_or(true, |tag| opp.has_tag(tag)),
        }
    }

    fn matches_search(&self, opp: &YieldOpportunity, search: Option<&str>) -> bool {
        let Some(search) = search else {
            return true;
        };
        let needle = search.to_lowercase();

        opp.name.to_lowercase().contains(&needle)
            || opp.asset.to_lowercase().contains(&needle)
            || self.platform_name(&opp.platform_id).to_lowercase().contains(&needle)
    }

    /// Badges for every applied filter, in display order.
    pub fn active_filters(&self, criteria: &FilterCriteria) -> Vec<ActiveFilter> {
        let mut badges = Vec::new();

        if let Some(search) = criteria.search_term() {
            badges.push(ActiveFilter {
                field: "search".to_string(),
                label: format!("Search: {}", search),
            });
        }
        if let Some(platform_id) = &criteria.platform_id {
            badges.push(ActiveFilter {
                field: "platform".to_string(),
                label: format!("Platform: {}", self.platform_name(platform_id)),
            });
        }
        if let Some(risk) = criteria.risk_level {
            badges.push(ActiveFilter {
                field: "risk".to_string(),
                label: format!("Risk: {}", risk),
            });
        }
        if let Some(min_apy) = criteria.min_apy {
            badges.push(ActiveFilter {
                field: "minApy".to_string(),
                label: format!("Min APY: {}%", min_apy),
            });
        }

        badges
    }
}

/// Stable sort by APY descending.
pub fn sort_by_apy(opportunities: &mut [YieldOpportunity]) {
    opportunities.sort_by(|a, b| b.apy.partial_cmp(&a.apy).unwrap_or(std::cmp::Ordering::Equal));
}

/// First `n` entries of an already sorted list.
pub fn top_n(opportunities: &[YieldOpportunity], n: usize) -> Vec<YieldOpportunity> {
    opportunities.iter().take(n).cloned().collect()
}
