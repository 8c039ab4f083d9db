//! Screener Data Models

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use yield_core::{RiskLevel, YieldOpportunity};

/// Category tab on the opportunity views
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum Tab {
    #[default]
    All,
    Stablecoins,
    Volatile,
    Lending,
    Liquidity,
    Premium,
    Saved,
}

impl Tab {
    /// Tabs offered by the browse view.
    pub const BROWSE: [Tab; 7] = [
        Tab::All,
        Tab::Stablecoins,
        Tab::Volatile,
        Tab::Lending,
        Tab::Liquidity,
        Tab::Premium,
        Tab::Saved,
    ];

    /// Tabs offered by the home dashboard.
    pub const DASHBOARD: [Tab; 5] = [Tab::All, Tab::Stablecoins, Tab::Volatile, Tab::Premium, Tab::Saved];

    pub fn as_str(&self) -> &'static str {
        match self {
            Tab::All => "all",
            Tab::Stablecoins => "stablecoins",
            Tab::Volatile => "volatile",
            Tab::Lending => "lending",
            Tab::Liquidity => "liquidity",
            Tab::Premium => "premium",
            Tab::Saved => "saved",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Tab::All => "All",
            Tab::Stablecoins => "Stablecoins",
            Tab::Volatile => "Volatile",
            Tab::Lending => "Lending",
            Tab::Liquidity => "Liquidity",
            Tab::Premium => "Premium",
            Tab::Saved => "Saved",
        }
    }

    /// Tag an opportunity must carry to appear under this tab, if the tab is
    /// tag based.
    pub fn required_tag(&self) -> Option<&'static str> {
        match self {
            Tab::Stablecoins => Some("stablecoin"),
            Tab::Volatile => Some("volatile"),
            Tab::Lending => Some("lending"),
            Tab::Liquidity => Some("liquidity"),
            Tab::All | Tab::Premium | Tab::Saved => None,
        }
    }
}

impl fmt::Display for Tab {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Tab {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Tab::BROWSE
            .iter()
            .copied()
            .find(|tab| tab.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| format!("unknown tab '{}'", s))
    }
}

/// Predicates applied to the opportunity list. Every present field must
/// match (logical AND).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct FilterCriteria {
    #[serde(default)]
    pub tab: Tab,
    /// Case-insensitive substring of name, asset or platform name
    pub search: Option<String>,
    pub platform_id: Option<String>,
    pub risk_level: Option<RiskLevel>,
    pub min_apy: Option<f64>,
}

impl FilterCriteria {
    pub fn for_tab(tab: Tab) -> Self {
        Self {
            tab,
            ..Self::default()
        }
    }

    pub fn with_search(mut self, search: impl Into<String>) -> Self {
        self.search = Some(search.into());
        self
    }

    pub fn with_platform(mut self, platform_id: impl Into<String>) -> Self {
        self.platform_id = Some(platform_id.into());
        self
    }

    pub fn with_risk(mut self, risk_level: RiskLevel) -> Self {
        self.risk_level = Some(risk_level);
        self
    }

    pub fn with_min_apy(mut self, min_apy: f64) -> Self {
        self.min_apy = Some(min_apy);
        self
    }

    /// Search text with surrounding whitespace kept; `None` when blank.
    pub fn search_term(&self) -> Option<&str> {
        self.search.as_deref().filter(|s| !s.is_empty())
    }

    /// True when no filter besides the tab is active.
    pub fn is_empty(&self) -> bool {
        self.search_term().is_none()
            && self.platform_id.is_none()
            && self.risk_level.is_none()
            && self.min_apy.is_none()
    }

    /// Drop every filter but keep the selected tab.
    pub fn clear_filters(&mut self) {
        let tab = self.tab;
        *self = Self::for_tab(tab);
    }
}

/// A badge describing one applied filter
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ActiveFilter {
    /// Criteria field the badge clears
    pub field: String,
    pub label: String,
}

/// APY badge colouring
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum ApyTier {
    Low,
    Medium,
    High,
}

impl ApyTier {
    pub fn from_apy(apy: f64) -> Self {
        match apy {
            a if a >= 8.0 => ApyTier::High,
            a if a >= 5.0 => ApyTier::Medium,
            _ => ApyTier::Low,
        }
    }

    pub fn of(opportunity: &YieldOpportunity) -> Self {
        Self::from_apy(opportunity.apy)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tab_parsing() {
        assert_eq!("stablecoins".parse::<Tab>(), Ok(Tab::Stablecoins));
        assert_eq!("Saved".parse::<Tab>(), Ok(Tab::Saved));
        assert!("stablecoin".parse::<Tab>().is_err());
    }

    #[test]
    fn test_clear_filters_keeps_tab() {
        let mut criteria = FilterCriteria::for_tab(Tab::Lending)
            .with_search("usdc")
            .with_risk(RiskLevel::Low)
            .with_min_apy(3.0);
        assert!(!criteria.is_empty());

        criteria.clear_filters();
        assert!(criteria.is_empty());
        assert_eq!(criteria.tab, Tab::Lending);
    }

    #[test]
    fn test_blank_search_is_inactive() {
        let criteria = FilterCriteria::default().with_search("");
        assert!(criteria.search_term().is_none());
        assert!(criteria.is_empty());
    }

    #[test]
    fn test_apy_tier_thresholds() {
        assert_eq!(ApyTier::from_apy(8.0), ApyTier::High);
        assert_eq!(ApyTier::from_apy(7.99), ApyTier::Medium);
        assert_eq!(ApyTier::from_apy(5.0), ApyTier::Medium);
        assert_eq!(ApyTier::from_apy(4.12), ApyTier::Low);
    }
}
