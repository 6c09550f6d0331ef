//! Pheromone store: selection and reinforcement over a pheromone table

use rand::Rng;
use tracing::{debug, info, warn};

use crate::error::{ColonyError, Result};
use crate::heuristic::{Heuristic, DEFAULT_WEIGHT};
use crate::params::PheromoneParams;
use crate::snapshot::SnapshotStore;
use crate::table::PheromoneTable;
use crate::trajectory::Trajectory;

/// Floor for selection scores so degenerate tables stay sampleable
const SCORE_FLOOR: f64 = 1e-12;

/// Divisor shaping rewards before the tanh squash
const REWARD_SCALE: f64 = 10.0;

/// When the store writes snapshots
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PersistMode {
    /// Save after every mutating operation
    Eager,
    /// Save only on an explicit `persist` call
    Manual,
}

impl Default for PersistMode {
    fn default() -> Self {
        Self::Eager
    }
}

/// Pheromone levels over (state, action) pairs plus the dynamics that
/// update them
///
/// Owns the table and its hyperparameters. Persistence is an injected
/// collaborator, so callers decide where snapshots live or disable
/// them entirely.
pub struct PheromoneStore {
    params: PheromoneParams,
    table: PheromoneTable,
    snapshots: Option<Box<dyn SnapshotStore>>,
    mode: PersistMode,
}

impl PheromoneStore {
    /// Create a store with no persistence
    #[must_use]
    pub fn new(params: PheromoneParams) -> Self {
        Self {
            params,
            table: PheromoneTable::default(),
            snapshots: None,
            mode: PersistMode::Eager,
        }
    }

    /// Create a store hydrated from a snapshot backend
    ///
    /// A failed load is recoverable: the store logs a warning and
    /// starts from an empty table rather than refusing to boot.
    /// Loaded levels pass through the clamp, so the table invariant
    /// holds even when the bounds changed since the snapshot was
    /// written.
    pub fn with_snapshots(params: PheromoneParams, mut snapshots: Box<dyn SnapshotStore>) -> Self {
        let mut table = match snapshots.load() {
            Ok(table) => table,
            Err(err) => {
                warn!(error = %err, "pheromone snapshot load failed; starting empty");
                PheromoneTable::default()
            }
        };
        let (min_tau, max_tau) = (params.min_tau, params.max_tau);
        table.update_all(|tau| clamp_tau(tau, min_tau, max_tau));
        if !table.is_empty() {
            info!(
                states = table.state_count(),
                pairs = table.len(),
                "hydrated pheromone table from snapshot"
            );
        }
        Self {
            params,
            table,
            snapshots: Some(snapshots),
            mode: PersistMode::Eager,
        }
    }

    /// Current hyperparameters
    #[must_use]
    pub fn params(&self) -> &PheromoneParams {
        &self.params
    }

    /// Mutable hyperparameters, the seam an external tuner uses
    pub fn params_mut(&mut self) -> &mut PheromoneParams {
        &mut self.params
    }

    /// Read-only view of the table
    #[must_use]
    pub fn table(&self) -> &PheromoneTable {
        &self.table
    }

    /// Switch between eager and manual snapshot writes
    pub fn set_persist_mode(&mut self, mode: PersistMode) {
        self.mode = mode;
    }

    /// Pheromone level for a pair, `tau0` if never written
    ///
    /// Pure read: never materializes an entry.
    #[must_use]
    pub fn get(&self, state: &str, action: &str) -> f64 {
        self.table.get(state, action).unwrap_or(self.params.tau0)
    }

    /// Write a pheromone level, clamped into `[min_tau, max_tau]`
    ///
    /// In-memory mutation only; snapshots are written by the batching
    /// operations (`evaporate`, `deposit`) or an explicit `persist`.
    pub fn set(&mut self, state: impl Into<String>, action: impl Into<String>, value: f64) {
        let clamped = self.clamp(value);
        self.table.insert(state, action, clamped);
    }

    /// Decay every stored level: `tau <- max(min_tau, (1 - rho) * tau)`
    ///
    /// Pairs never written stay unmaterialized and keep reporting
    /// `tau0`. Under eager persistence the decayed table is saved
    /// before returning.
    pub fn evaporate(&mut self) -> Result<()> {
        let keep = 1.0 - self.params.rho;
        let (min_tau, max_tau) = (self.params.min_tau, self.params.max_tau);
        self.table
            .update_all(|tau| clamp_tau(tau * keep, min_tau, max_tau));
        debug!(
            pairs = self.table.len(),
            rho = self.params.rho,
            "evaporated pheromone table"
        );
        self.autosave()
    }

    /// Reinforce every visit in a trajectory from a reward signal
    ///
    /// The reward is squashed to `tanh(reward / 10)` so one spike
    /// cannot blow up the table; duplicate visits reinforce once per
    /// occurrence, in order. An empty trajectory is a no-op and skips
    /// the snapshot write.
    pub fn deposit(&mut self, trajectory: &Trajectory, reward: f64) -> Result<()> {
        self.deposit_scaled(trajectory, reward, 1.0)
    }

    /// `deposit` with an explicit multiplier on the squashed delta
    pub fn deposit_scaled(&mut self, trajectory: &Trajectory, reward: f64, scale: f64) -> Result<()> {
        if trajectory.is_empty() {
            return Ok(());
        }
        let delta = scale * (reward / REWARD_SCALE).tanh();
        for visit in trajectory.visits() {
            let current = self.get(&visit.state, &visit.action);
            self.set(visit.state.clone(), visit.action.clone(), current + delta);
        }
        debug!(
            visits = trajectory.len(),
            reward, delta, "deposited pheromone along trajectory"
        );
        self.autosave()
    }

    /// Choose an action for `state` from `actions`
    ///
    /// With probability `epsilon` picks uniformly at random, ignoring
    /// the table; otherwise samples the roulette wheel over
    /// `tau^alpha * eta^beta` scores. An empty candidate list is an
    /// error, never a silent default.
    pub fn choose_action(
        &self,
        state: &str,
        actions: &[String],
        heuristic: Option<&Heuristic>,
    ) -> Result<String> {
        self.choose_action_with_rng(&mut rand::thread_rng(), state, actions, heuristic)
    }

    /// `choose_action` drawing randomness from a caller-supplied RNG
    ///
    /// Seeded callers (tests, reproducible runs) go through here.
    pub fn choose_action_with_rng<R: Rng>(
        &self,
        rng: &mut R,
        state: &str,
        actions: &[String],
        heuristic: Option<&Heuristic>,
    ) -> Result<String> {
        if actions.is_empty() {
            return Err(ColonyError::NoActionsAvailable(format!(
                "no candidate actions for state '{state}'"
            )));
        }

        // Exploration branch: uniform over the candidates.
        if rng.gen::<f64>() < self.params.epsilon {
            let index = rng.gen_range(0..actions.len());
            return Ok(actions[index].clone());
        }

        let scores: Vec<f64> = actions
            .iter()
            .map(|action| {
                let tau = self.get(state, action).max(self.params.min_tau);
                let eta = heuristic.map_or(DEFAULT_WEIGHT, |h| h.weight(action));
                (tau.powf(self.params.alpha) * eta.powf(self.params.beta)).max(SCORE_FLOOR)
            })
            .collect();
        let total: f64 = scores.iter().sum();
        let threshold = rng.gen::<f64>() * total;

        Ok(actions[roulette_index(&scores, threshold)].clone())
    }

    /// Write the current table through the persistence collaborator
    ///
    /// `Ok(())` when persistence is disabled. A failed save leaves
    /// the in-memory table untouched; callers may retry later.
    pub fn persist(&mut self) -> Result<()> {
        if let Some(snapshots) = self.snapshots.as_mut() {
            snapshots.save(&self.table)?;
        }
        Ok(())
    }

    fn autosave(&mut self) -> Result<()> {
        match self.mode {
            PersistMode::Eager => self.persist(),
            PersistMode::Manual => Ok(()),
        }
    }

    fn clamp(&self, value: f64) -> f64 {
        clamp_tau(value, self.params.min_tau, self.params.max_tau)
    }
}

/// Clamp a raw level into the legal band
///
/// `min`/`max` f64 semantics make this total: a NaN input collapses
/// to `max_tau` instead of poisoning the table.
fn clamp_tau(value: f64, min_tau: f64, max_tau: f64) -> f64 {
    value.min(max_tau).max(min_tau)
}

/// Walk the wheel: the first index whose cumulative score reaches the
/// threshold wins. If floating-point shortfall leaves no index
/// triggered, the last one is the deterministic fallback.
///
/// `scores` must be non-empty.
fn roulette_index(scores: &[f64], threshold: f64) -> usize {
    let mut cumulative = 0.0;
    for (index, score) in scores.iter().enumerate() {
        cumulative += score;
        if threshold <= cumulative {
            return index;
        }
    }
    scores.len() - 1
}
