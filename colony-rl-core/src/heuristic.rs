//! Heuristic desirability weights for candidate actions

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Weight assumed for actions with no configured entry
pub const DEFAULT_WEIGHT: f64 = 1.0;

/// Floor applied to configured weights
pub const MIN_WEIGHT: f64 = 1e-6;

/// Per-action desirability weights (eta) consulted during selection
///
/// Absent actions weigh [`DEFAULT_WEIGHT`]; configured weights are
/// floored at [`MIN_WEIGHT`] so a zero or negative entry can never
/// null out a candidate's score.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Heuristic {
    weights: BTreeMap<String, f64>,
}

impl Heuristic {
    /// Create an empty heuristic where every action weighs 1.0
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the weight for an action
    pub fn set(&mut self, action: impl Into<String>, weight: f64) {
        self.weights.insert(action.into(), weight);
    }

    /// Effective weight for an action, default and floor applied
    #[must_use]
    pub fn weight(&self, action: &str) -> f64 {
        let raw = self.weights.get(action).copied().unwrap_or(DEFAULT_WEIGHT);
        raw.max(MIN_WEIGHT)
    }

    /// Number of configured weights
    #[must_use]
    pub fn len(&self) -> usize {
        self.weights.len()
    }

    /// Whether no weights are configured
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.weights.is_empty()
    }
}

impl<S: Into<String>> FromIterator<(S, f64)> for Heuristic {
    fn from_iter<I: IntoIterator<Item = (S, f64)>>(iter: I) -> Self {
        Self {
            weights: iter.into_iter().map(|(a, w)| (a.into(), w)).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn absent_action_gets_default_weight() {
        let heuristic = Heuristic::new();
        assert_eq!(heuristic.weight("anything"), DEFAULT_WEIGHT);
    }

    #[test]
    fn configured_weight_is_returned() {
        let mut heuristic = Heuristic::new();
        heuristic.set("scout", 1.4);
        assert_eq!(heuristic.weight("scout"), 1.4);
    }

    #[test]
    fn zero_and_negative_weights_are_floored() {
        let heuristic: Heuristic = [("a", 0.0), ("b", -3.0)].into_iter().collect();
        assert_eq!(heuristic.weight("a"), MIN_WEIGHT);
        assert_eq!(heuristic.weight("b"), MIN_WEIGHT);
    }
}
