//! Trend-based hyperparameter adjustment

use tracing::debug;

use crate::params::PheromoneParams;

/// Direction of the latest average-reward trend
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Trend {
    /// Average reward rose since the last adjustment
    Improving,
    /// Average reward held steady or fell
    Declining,
}

/// Adjusts exploration and evaporation from reward trends
///
/// A rising average shrinks `epsilon` and `rho` (exploit the trails
/// that work, forget less); a flat or falling average grows them. The
/// very first adjustment has no previous average to beat and takes
/// the declining branch.
#[derive(Debug, Clone, Default)]
pub struct AdaptiveTuner {
    last_avg: Option<f64>,
}

impl AdaptiveTuner {
    /// Lowest epsilon the tuner will leave behind
    pub const MIN_EPSILON: f64 = 0.01;
    /// Highest epsilon the tuner will push to
    pub const MAX_EPSILON: f64 = 0.3;
    /// Lowest rho the tuner will leave behind
    pub const MIN_RHO: f64 = 0.01;
    /// Highest rho the tuner will push to
    pub const MAX_RHO: f64 = 0.2;

    /// Create a tuner with no trend history
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Fold one average reward into the trend and adjust `params`
    pub fn adjust(&mut self, params: &mut PheromoneParams, avg_reward: f64) -> Trend {
        let trend = avg_reward - self.last_avg.unwrap_or(avg_reward);
        self.last_avg = Some(avg_reward);

        let direction = if trend > 0.0 {
            params.epsilon = (params.epsilon * 0.9).max(Self::MIN_EPSILON);
            params.rho = (params.rho * 0.95).max(Self::MIN_RHO);
            Trend::Improving
        } else {
            params.epsilon = (params.epsilon * 1.1).min(Self::MAX_EPSILON);
            params.rho = (params.rho * 1.05).min(Self::MAX_RHO);
            Trend::Declining
        };
        debug!(
            avg_reward,
            trend,
            epsilon = params.epsilon,
            rho = params.rho,
            "adjusted exploration parameters"
        );
        direction
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn first_adjustment_grows_exploration() {
        let mut params = PheromoneParams::default();
        let mut tuner = AdaptiveTuner::new();
        // No previous average to beat, so the trend is flat.
        assert_eq!(tuner.adjust(&mut params, 1.0), Trend::Declining);
        assert_relative_eq!(params.epsilon, 0.05 * 1.1, epsilon = 1e-12);
        assert_relative_eq!(params.rho, 0.05 * 1.05, epsilon = 1e-12);
    }

    #[test]
    fn improving_trend_shrinks_epsilon_and_rho() {
        let mut params = PheromoneParams::default();
        let mut tuner = AdaptiveTuner::new();
        tuner.adjust(&mut params, 1.0);
        let (epsilon, rho) = (params.epsilon, params.rho);

        assert_eq!(tuner.adjust(&mut params, 2.0), Trend::Improving);
        assert_relative_eq!(params.epsilon, epsilon * 0.9, epsilon = 1e-12);
        assert_relative_eq!(params.rho, rho * 0.95, epsilon = 1e-12);
    }

    #[test]
    fn declining_trend_grows_epsilon_and_rho() {
        let mut params = PheromoneParams::default();
        let mut tuner = AdaptiveTuner::new();
        tuner.adjust(&mut params, 2.0);
        let (epsilon, rho) = (params.epsilon, params.rho);

        assert_eq!(tuner.adjust(&mut params, 1.0), Trend::Declining);
        assert_relative_eq!(params.epsilon, epsilon * 1.1, epsilon = 1e-12);
        assert_relative_eq!(params.rho, rho * 1.05, epsilon = 1e-12);
    }

    #[test]
    fn adjustments_respect_bounds() {
        let mut params = PheromoneParams::default();
        let mut tuner = AdaptiveTuner::new();

        // Drive epsilon and rho to their ceilings.
        let mut reward = 0.0;
        for _ in 0..100 {
            reward -= 1.0;
            tuner.adjust(&mut params, reward);
        }
        assert_relative_eq!(params.epsilon, AdaptiveTuner::MAX_EPSILON, epsilon = 1e-12);
        assert_relative_eq!(params.rho, AdaptiveTuner::MAX_RHO, epsilon = 1e-12);

        // Then down to their floors.
        for _ in 0..200 {
            reward += 1.0;
            tuner.adjust(&mut params, reward);
        }
        assert_relative_eq!(params.epsilon, AdaptiveTuner::MIN_EPSILON, epsilon = 1e-12);
        assert_relative_eq!(params.rho, AdaptiveTuner::MIN_RHO, epsilon = 1e-12);
    }
}
