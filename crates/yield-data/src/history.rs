//! Synthetic APY history
//!
//! There is no stored history: each request produces a fresh series that
//! wanders around the opportunity's current APY.

use chrono::{Duration, NaiveDate};
use rand::Rng;
use yield_core::{HistoricalYieldDataPoint, YieldOpportunity};

/// Days of history before today; the series has `HISTORY_DAYS + 1` points.
pub const HISTORY_DAYS: i64 = 30;

/// Maximum daily deviation from the current APY, in percentage points.
const MAX_VARIANCE: f64 = 0.75;

/// Generated APYs never drop below this floor.
const MIN_APY: f64 = 0.1;

/// One point per day from `today - HISTORY_DAYS` through `today`, oldest
/// first, each within `MAX_VARIANCE` of the current APY and rounded to two
/// decimals.
pub fn generate_history<R: Rng + ?Sized>(
    opportunity: &YieldOpportunity,
    today: NaiveDate,
    rng: &mut R,
) -> Vec<HistoricalYieldDataPoint> {
    (0..=HISTORY_DAYS)
        .rev()
        .map(|days_back| {
            let variance = rng.gen_range(-MAX_VARIANCE..MAX_VARIANCE);
            let apy = (opportunity.apy + variance).max(MIN_APY);
            HistoricalYieldDataPoint {
                date: today - Duration::days(days_back),
                apy: (apy * 100.0).round() / 100.0,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use yield_core::RiskLevel;

    fn opportunity(apy: f64) -> YieldOpportunity {
        YieldOpportunity {
            id: "aave-usdc".to_string(),
            platform_id: "aave".to_string(),
            name: "USDC Lending".to_string(),
            asset: "USDC".to_string(),
            apy,
            tvl: 842_000_000.0,
            risk_level: RiskLevel::Low,
            is_premium: false,
            tags: vec![],
            description: String::new(),
            last_updated: Utc::now(),
        }
    }

    #[test]
    fn test_history_shape() {
        let today = NaiveDate::from_ymd_opt(2026, 3, 15).unwrap();
        let mut rng = StdRng::seed_from_u64(7);
        let points = generate_history(&opportunity(3.25), today, &mut rng);

        assert_eq!(points.len(), 31);
        assert_eq!(points[0].date, NaiveDate::from_ymd_opt(2026, 2, 13).unwrap());
        assert_eq!(points[30].date, today);
        assert!(points.windows(2).all(|w| w[0].date < w[1].date));

        for point in &points {
            assert!(point.apy >= 3.25 - 0.75 - 0.005 && point.apy <= 3.25 + 0.75 + 0.005);
            assert_eq!((point.apy * 100.0).round() / 100.0, point.apy);
        }
    }

    #[test]
    fn test_history_floor() {
        let today = NaiveDate::from_ymd_opt(2026, 3, 15).unwrap();
        let mut rng = StdRng::seed_from_u64(42);
        let points = generate_history(&opportunity(0.2), today, &mut rng);

        assert!(points.iter().all(|p| p.apy >= MIN_APY));
    }
}
