//! Hyperparameters governing pheromone dynamics

use serde::{Deserialize, Serialize};

/// Hyperparameters for a pheromone store
///
/// Fields are public so an external tuner can adjust them between
/// cycles; every operation reads them live.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PheromoneParams {
    /// Level reported for pairs that were never written
    pub tau0: f64,
    /// Evaporation rate in [0, 1]
    pub rho: f64,
    /// Pheromone influence exponent
    pub alpha: f64,
    /// Heuristic influence exponent
    pub beta: f64,
    /// Exploration probability in [0, 1]
    pub epsilon: f64,
    /// Lower clamp bound for stored levels
    pub min_tau: f64,
    /// Upper clamp bound for stored levels
    pub max_tau: f64,
}

impl Default for PheromoneParams {
    fn default() -> Self {
        Self {
            tau0: 0.1,
            rho: 0.05,
            alpha: 1.0,
            beta: 1.0,
            epsilon: 0.05,
            min_tau: 1e-6,
            max_tau: 10.0,
        }
    }
}
