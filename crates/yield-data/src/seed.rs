//! Reference data the in-memory provider starts with

use chrono::{DateTime, Utc};
use yield_core::{Platform, RiskLevel, SubscriptionLevel, User, YieldOpportunity};

/// The single account present in a fresh store.
pub const DEMO_USER_ID: &str = "user123";

/// (id, name, homepage)
const PLATFORMS: &[(&str, &str, &str)] = &[
    ("aave", "Aave", "https://aave.com"),
    ("compound", "Compound", "https://compound.finance"),
    ("curve", "Curve", "https://curve.fi"),
    ("yearn", "Yearn Finance", "https://yearn.finance"),
    ("uniswap", "Uniswap", "https://uniswap.org"),
];

struct SeedOpportunity {
    id: &'static str,
    platform_id: &'static str,
    name: &'static str,
    asset: &'static str,
    apy: f64,
    tvl: f64,
    risk_level: RiskLevel,
    is_premium: bool,
    tags: &'static [&'static str],
    description: &'static str,
}

const OPPORTUNITIES: &[SeedOpportunity] = &[
    SeedOpportunity {
        id: "aave-usdc",
        platform_id: "aave",
        name: "USDC Lending",
        asset: "USDC",
        apy: 3.25,
        tvl: 842_000_000.0,
        risk_level: RiskLevel::Low,
        is_premium: false,
        tags: &["stablecoin", "lending"],
        description: "Lend USDC on Aave and earn interest from borrowers.",
    },
    SeedOpportunity {
        id: "compound-usdt",
        platform_id: "compound",
        name: "USDT Lending",
        asset: "USDT",
        apy: 3.42,
        tvl: 723_000_000.0,
        risk_level: RiskLevel::Low,
        is_premium: false,
        tags: &["stablecoin", "lending"],
        description: "Lend USDT on Compound and earn interest from borrowers.",
    },
    SeedOpportunity {
        id: "curve-3pool",
        platform_id: "curve",
        name: "3Pool",
        asset: "DAI/USDC/USDT",
        apy: 4.12,
        tvl: 1_250_000_000.0,
        risk_level: RiskLevel::Medium,
        is_premium: false,
        tags: &["stablecoin", "liquidity"],
        description: "Provide liquidity to Curve 3Pool and earn trading fees.",
    },
    SeedOpportunity {
        id: "yearn-eth",
        platform_id: "yearn",
        name: "ETH Vault",
        asset: "ETH",
        apy: 7.83,
        tvl: 475_000_000.0,
        risk_level: RiskLevel::Medium,
        is_premium: true,
        tags: &["volatile", "vault"],
        description: "Deposit ETH to autocompounding Yearn vault for optimized yield strategies.",
    },
    SeedOpportunity {
        id: "uniswap-eth-usdc",
        platform_id: "uniswap",
        name: "ETH-USDC Pool",
        asset: "ETH/USDC",
        apy: 11.25,
        tvl: 325_000_000.0,
        risk_level: RiskLevel::High,
        is_premium: true,
        tags: &["volatile", "liquidity"],
        description: "Provide liquidity to ETH-USDC pool on Uniswap and earn trading fees.",
    },
    SeedOpportunity {
        id: "aave-eth",
        platform_id: "aave",
        name: "ETH Lending",
        asset: "ETH",
        apy: 2.85,
        tvl: 920_000_000.0,
        risk_level: RiskLevel::Medium,
        is_premium: false,
        tags: &["volatile", "lending"],
        description: "Lend ETH on Aave and earn interest from borrowers.",
    },
    SeedOpportunity {
        id: "curve-tricrypto",
        platform_id: "curve",
        name: "TriCrypto",
        asset: "USDT/WBTC/ETH",
        apy: 8.75,
        tvl: 535_000_000.0,
        risk_level: RiskLevel::High,
        is_premium: true,
        tags: &["volatile", "liquidity"],
        description: "Provide liquidity to TriCrypto pool on Curve and earn trading fees and CRV rewards.",
    },
];

pub fn seed_platforms() -> Vec<Platform> {
    PLATFORMS
        .iter()
        .map(|&(id, name, homepage)| Platform {
            id: id.to_string(),
            name: name.to_string(),
            logo_url: format!("/platforms/{}.png", id),
            homepage_url: homepage.to_string(),
        })
        .collect()
}

/// Seeded opportunities, all stamped with `as_of` as their update time.
pub fn seed_opportunities(as_of: DateTime<Utc>) -> Vec<YieldOpportunity> {
    OPPORTUNITIES
        .iter()
        .map(|seed| YieldOpportunity {
            id: seed.id.to_string(),
            platform_id: seed.platform_id.to_string(),
            name: seed.name.to_string(),
            asset: seed.asset.to_string(),
            apy: seed.apy,
            tvl: seed.tvl,
            risk_level: seed.risk_level,
            is_premium: seed.is_premium,
            tags: seed.tags.iter().map(|t| t.to_string()).collect(),
            description: seed.description.to_string(),
            last_updated: as_of,
        })
        .collect()
}

pub fn seed_users() -> Vec<User> {
    vec![User {
        id: DEMO_USER_ID.to_string(),
        email: "demo@example.com".to_string(),
        subscription_level: SubscriptionLevel::Free,
        subscription_end_date: None,
        saved_opportunity_ids: vec!["aave-usdc".to_string(), "curve-3pool".to_string()],
    }]
}
