//! Learning metrics for reinforcement cycles

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use statrs::statistics::Statistics;

/// Running record of completed cycles and their rewards
#[derive(Debug, Clone, Default)]
pub struct LearningMetrics {
    cycles: usize,
    rewards: Vec<f64>,
}

impl LearningMetrics {
    /// Create an empty metrics record
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one completed cycle and its reward
    pub fn record_cycle(&mut self, reward: f64) {
        self.cycles += 1;
        self.rewards.push(reward);
    }

    /// Number of recorded cycles
    #[must_use]
    pub fn cycles(&self) -> usize {
        self.cycles
    }

    /// Rewards in recording order
    #[must_use]
    pub fn rewards(&self) -> &[f64] {
        &self.rewards
    }

    /// Mean reward, `None` before the first cycle
    #[must_use]
    pub fn average(&self) -> Option<f64> {
        if self.rewards.is_empty() {
            None
        } else {
            Some(Statistics::mean(&self.rewards))
        }
    }

    /// Best reward so far
    #[must_use]
    pub fn best(&self) -> Option<f64> {
        if self.rewards.is_empty() {
            None
        } else {
            Some(Statistics::max(&self.rewards))
        }
    }

    /// Worst reward so far
    #[must_use]
    pub fn worst(&self) -> Option<f64> {
        if self.rewards.is_empty() {
            None
        } else {
            Some(Statistics::min(&self.rewards))
        }
    }

    /// Compact digest of the run so far
    #[must_use]
    pub fn summary(&self) -> MetricsSummary {
        MetricsSummary {
            cycles: self.cycles,
            average: self.average(),
            best: self.best(),
            worst: self.worst(),
        }
    }

    /// Serializable snapshot, timestamped now
    #[must_use]
    pub fn snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            cycles: self.cycles,
            avg_reward: self.average(),
            history: self.rewards.clone(),
            updated_at: Utc::now(),
        }
    }
}

/// Point-in-time digest of learning metrics
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MetricsSummary {
    /// Cycles recorded
    pub cycles: usize,
    /// Mean reward
    pub average: Option<f64>,
    /// Best reward
    pub best: Option<f64>,
    /// Worst reward
    pub worst: Option<f64>,
}

impl fmt::Display for MetricsSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.average, self.best, self.worst) {
            (Some(average), Some(best), Some(worst)) => write!(
                f,
                "cycles: {} | avg reward: {average:.3} | best: {best:.3} | worst: {worst:.3}",
                self.cycles
            ),
            _ => write!(f, "cycles: 0 | no rewards recorded"),
        }
    }
}

/// Persistable metrics record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetricsSnapshot {
    /// Cycles recorded
    pub cycles: usize,
    /// Mean reward at snapshot time
    pub avg_reward: Option<f64>,
    /// Full reward history
    pub history: Vec<f64>,
    /// When the snapshot was taken
    pub updated_at: DateTime<Utc>,
}
