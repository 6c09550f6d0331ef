//! Sandbox task environment for controlled learning runs

use rand::rngs::StdRng;
use rand::SeedableRng;
use rand_distr::{Distribution, Normal};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// A simulated task the colony can attempt
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaskProfile {
    /// Action identifier presented to the store
    pub name: String,
    /// Mean reward for completing the task
    pub base_reward: f64,
    /// Standard deviation of the reward jitter, none when `<= 0`
    pub noise: f64,
}

impl TaskProfile {
    /// Create a task profile
    pub fn new(name: impl Into<String>, base_reward: f64, noise: f64) -> Self {
        Self {
            name: name.into(),
            base_reward,
            noise,
        }
    }
}

/// Sandbox configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SandboxConfig {
    /// Environment name, used in logs
    pub name: String,
    /// State label the environment presents each cycle
    pub state: String,
    /// Task catalog, in presentation order
    pub tasks: Vec<TaskProfile>,
    /// Reward paid for an action outside the catalog
    pub unknown_task_reward: f64,
    /// RNG seed for reproducible runs, entropy-seeded when `None`
    pub seed: Option<u64>,
}

impl Default for SandboxConfig {
    fn default() -> Self {
        Self {
            name: "sandbox-ant-colony".to_string(),
            state: "colony".to_string(),
            tasks: vec![
                TaskProfile::new("analyze_data", 1.5, 1.0),
                TaskProfile::new("optimize_energy", 3.0, 1.5),
                TaskProfile::new("repair_node", 0.5, 2.0),
                TaskProfile::new("backup_memory", 2.0, 1.0),
            ],
            unknown_task_reward: 0.2,
            seed: None,
        }
    }
}

/// An isolated environment where agents try decisions and collect
/// simulated rewards
pub struct SandboxEnv {
    config: SandboxConfig,
    rng: StdRng,
}

impl SandboxEnv {
    /// Create a sandbox from a configuration
    #[must_use]
    pub fn new(config: SandboxConfig) -> Self {
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self { config, rng }
    }

    /// The state label decisions are keyed under
    #[must_use]
    pub fn state(&self) -> &str {
        &self.config.state
    }

    /// Candidate action names, in catalog order
    #[must_use]
    pub fn actions(&self) -> Vec<String> {
        self.config.tasks.iter().map(|task| task.name.clone()).collect()
    }

    /// The active configuration
    #[must_use]
    pub fn config(&self) -> &SandboxConfig {
        &self.config
    }

    /// Attempt a task and return its reward
    ///
    /// Catalog tasks pay `base_reward` plus normal jitter; anything
    /// else pays the flat exploration constant.
    pub fn execute(&mut self, action: &str) -> f64 {
        let profile = self.config.tasks.iter().find(|task| task.name == action);
        match profile {
            Some(task) => {
                let jitter = if task.noise > 0.0 {
                    Normal::new(0.0, task.noise)
                        .map(|dist| dist.sample(&mut self.rng))
                        .unwrap_or(0.0)
                } else {
                    0.0
                };
                let reward = task.base_reward + jitter;
                debug!(action, reward, "sandbox task executed");
                reward
            }
            None => {
                debug!(action, "unknown sandbox task");
                self.config.unknown_task_reward
            }
        }
    }
}
