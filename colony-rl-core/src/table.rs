//! Pheromone table storage

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Nested map of state to action to pheromone level
///
/// Serializes transparently as `{"state": {"action": tau}}`, the same
/// shape the JSON document store writes to disk. `BTreeMap` keeps
/// snapshots byte-stable across runs.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PheromoneTable {
    levels: BTreeMap<String, BTreeMap<String, f64>>,
}

impl PheromoneTable {
    /// Create an empty table
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Stored level for a pair, `None` if never written
    #[must_use]
    pub fn get(&self, state: &str, action: &str) -> Option<f64> {
        self.levels.get(state).and_then(|actions| actions.get(action)).copied()
    }

    /// Store a raw level, creating the state entry on first write
    pub fn insert(&mut self, state: impl Into<String>, action: impl Into<String>, level: f64) {
        self.levels
            .entry(state.into())
            .or_default()
            .insert(action.into(), level);
    }

    /// Total number of (state, action) pairs
    #[must_use]
    pub fn len(&self) -> usize {
        self.levels.values().map(BTreeMap::len).sum()
    }

    /// Whether the table holds no pairs
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.levels.values().all(BTreeMap::is_empty)
    }

    /// Number of distinct states
    #[must_use]
    pub fn state_count(&self) -> usize {
        self.levels.len()
    }

    /// Iterate all pairs as `(state, action, level)`
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str, f64)> + '_ {
        self.levels.iter().flat_map(|(state, actions)| {
            actions
                .iter()
                .map(move |(action, &level)| (state.as_str(), action.as_str(), level))
        })
    }

    /// Apply a transform to every stored level in place
    pub fn update_all<F: FnMut(f64) -> f64>(&mut self, mut f: F) {
        for actions in self.levels.values_mut() {
            for level in actions.values_mut() {
                *level = f(*level);
            }
        }
    }
}
