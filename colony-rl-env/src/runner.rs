//! Learning cycle runner wiring selection, execution, and reinforcement

use serde::{Deserialize, Serialize};
use tracing::info;

use colony_rl_core::{
    AdaptiveTuner, Heuristic, LearningMetrics, PheromoneStore, Result, Trajectory,
};

use crate::sandbox::SandboxEnv;

/// Policy knobs for the cycle loop
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunnerConfig {
    /// Evaporate the table once per cycle
    pub evaporate_each_cycle: bool,
    /// Let the tuner adjust hyperparameters after each cycle
    pub tune_each_cycle: bool,
}

impl Default for RunnerConfig {
    fn default() -> Self {
        Self {
            evaporate_each_cycle: true,
            tune_each_cycle: true,
        }
    }
}

/// What one cycle did
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CycleOutcome {
    /// Cycle number, starting at 1
    pub cycle: usize,
    /// State the decision was keyed under
    pub state: String,
    /// Chosen action
    pub action: String,
    /// Reward the sandbox paid
    pub reward: f64,
    /// Pheromone level for the pair as the cycle left it
    pub tau: f64,
}

/// Summary of a full run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunReport {
    /// Run ID
    pub id: String,
    /// Per-cycle outcomes, in order
    pub outcomes: Vec<CycleOutcome>,
    /// Total reward
    pub total_reward: f64,
    /// Start time
    pub start_time: chrono::DateTime<chrono::Utc>,
    /// End time
    pub end_time: chrono::DateTime<chrono::Utc>,
}

/// Drives the reinforcement cycle: choose, execute, deposit,
/// evaporate, record, tune
pub struct CycleRunner {
    store: PheromoneStore,
    env: SandboxEnv,
    metrics: LearningMetrics,
    tuner: AdaptiveTuner,
    heuristic: Option<Heuristic>,
    config: RunnerConfig,
}

impl CycleRunner {
    /// Create a runner with the default cycle policy
    #[must_use]
    pub fn new(store: PheromoneStore, env: SandboxEnv) -> Self {
        Self::with_config(store, env, RunnerConfig::default())
    }

    /// Create a runner with an explicit cycle policy
    #[must_use]
    pub fn with_config(store: PheromoneStore, env: SandboxEnv, config: RunnerConfig) -> Self {
        Self {
            store,
            env,
            metrics: LearningMetrics::new(),
            tuner: AdaptiveTuner::new(),
            heuristic: None,
            config,
        }
    }

    /// Bias selection with per-action weights
    pub fn set_heuristic(&mut self, heuristic: Heuristic) {
        self.heuristic = Some(heuristic);
    }

    /// The pheromone store the runner drives
    #[must_use]
    pub fn store(&self) -> &PheromoneStore {
        &self.store
    }

    /// Mutable store access, for explicit persistence or parameter
    /// changes between runs
    pub fn store_mut(&mut self) -> &mut PheromoneStore {
        &mut self.store
    }

    /// Metrics accumulated so far
    #[must_use]
    pub fn metrics(&self) -> &LearningMetrics {
        &self.metrics
    }

    /// Run the reinforcement cycle `cycles` times
    ///
    /// Each cycle chooses an action for the sandbox state, executes
    /// it, deposits the reward along a single-visit trajectory, then
    /// applies the configured evaporation and tuning steps.
    pub fn run(&mut self, cycles: usize) -> Result<RunReport> {
        let start_time = chrono::Utc::now();
        let mut outcomes = Vec::with_capacity(cycles);
        let mut total_reward = 0.0;
        info!(env = %self.env.config().name, cycles, "starting sandbox run");

        for cycle in 1..=cycles {
            let state = self.env.state().to_string();
            let actions = self.env.actions();
            let action = self
                .store
                .choose_action(&state, &actions, self.heuristic.as_ref())?;
            let reward = self.env.execute(&action);

            let trajectory: Trajectory = [(state.as_str(), action.as_str())].into_iter().collect();
            self.store.deposit(&trajectory, reward)?;
            if self.config.evaporate_each_cycle {
                self.store.evaporate()?;
            }

            self.metrics.record_cycle(reward);
            if self.config.tune_each_cycle {
                if let Some(average) = self.metrics.average() {
                    self.tuner.adjust(self.store.params_mut(), average);
                }
            }

            let tau = self.store.get(&state, &action);
            total_reward += reward;
            info!(cycle, action = %action, reward, tau, "cycle complete");
            outcomes.push(CycleOutcome {
                cycle,
                state,
                action,
                reward,
                tau,
            });
        }

        let report = RunReport {
            id: uuid::Uuid::new_v4().to_string(),
            outcomes,
            total_reward,
            start_time,
            end_time: chrono::Utc::now(),
        };
        info!(run = %report.id, total_reward, "sandbox run complete");
        Ok(report)
    }
}
