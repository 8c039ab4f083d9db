use std::time::Duration;

/// Artificial delay applied to each provider call
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LatencyProfile {
    pub platforms: Duration,
    pub opportunities: Duration,
    pub history: Duration,
    pub user: Duration,
    pub subscription: Duration,
    pub saved: Duration,
}

impl Default for LatencyProfile {
    fn default() -> Self {
        Self {
            platforms: Duration::from_millis(300),
            opportunities: Duration::from_millis(500),
            history: Duration::from_millis(400),
            user: Duration::from_millis(200),
            subscription: Duration::from_millis(300),
            saved: Duration::from_millis(300),
        }
    }
}

impl LatencyProfile {
    /// No delay at all.
    pub fn zero() -> Self {
        Self {
            platforms: Duration::ZERO,
            opportunities: Duration::ZERO,
            history: Duration::ZERO,
            user: Duration::ZERO,
            subscription: Duration::ZERO,
            saved: Duration::ZERO,
        }
    }

    /// Default profile multiplied by `factor`. Non-positive or non-finite
    /// factors disable latency.
    pub fn scaled(factor: f64) -> Self {
        if !factor.is_finite() || factor <= 0.0 {
            return Self::zero();
        }
        let base = Self::default();
        Self {
            platforms: base.platforms.mul_f64(factor),
            opportunities: base.opportunities.mul_f64(factor),
            history: base.history.mul_f64(factor),
            user: base.user.mul_f64(factor),
            subscription: base.subscription.mul_f64(factor),
            saved: base.saved.mul_f64(factor),
        }
    }
}

/// Suspend for `delay`, skipping the timer entirely when it is zero.
pub(crate) async fn simulate(delay: Duration) {
    if !delay.is_zero() {
        tokio::time::sleep(delay).await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scaled_profile() {
        let half = LatencyProfile::scaled(0.5);
        assert_eq!(half.opportunities, Duration::from_millis(250));
        assert_eq!(half.user, Duration::from_millis(100));

        assert_eq!(LatencyProfile::scaled(0.0), LatencyProfile::zero());
        assert_eq!(LatencyProfile::scaled(f64::NAN), LatencyProfile::zero());
        assert_eq!(LatencyProfile::scaled(2.0).history, Duration::from_millis(800));
    }
}
