//! Trajectories of visited state-action pairs

use serde::{Deserialize, Serialize};

/// Single state-action visit within a trajectory
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Visit {
    /// State identifier
    pub state: String,
    /// Action identifier
    pub action: String,
}

/// Ordered sequence of visits collected during one decision episode
///
/// Duplicates are allowed; a deposit reinforces once per occurrence.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Trajectory {
    visits: Vec<Visit>,
}

impl Trajectory {
    /// Create a new empty trajectory
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a visit
    pub fn push(&mut self, state: impl Into<String>, action: impl Into<String>) {
        self.visits.push(Visit {
            state: state.into(),
            action: action.into(),
        });
    }

    /// Number of visits
    #[must_use]
    pub fn len(&self) -> usize {
        self.visits.len()
    }

    /// Check if the trajectory is empty
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.visits.is_empty()
    }

    /// Visits in insertion order
    #[must_use]
    pub fn visits(&self) -> &[Visit] {
        &self.visits
    }
}

impl<S, A> FromIterator<(S, A)> for Trajectory
where
    S: Into<String>,
    A: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (S, A)>>(iter: I) -> Self {
        let mut trajectory = Self::new();
        for (state, action) in iter {
            trajectory.push(state, action);
        }
        trajectory
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn push_preserves_order_and_duplicates() {
        let mut trajectory = Trajectory::new();
        trajectory.push("nest", "forage");
        trajectory.push("trail", "follow");
        trajectory.push("nest", "forage");

        assert_eq!(trajectory.len(), 3);
        assert_eq!(trajectory.visits()[0].action, "forage");
        assert_eq!(trajectory.visits()[1].state, "trail");
        assert_eq!(trajectory.visits()[2], trajectory.visits()[0]);
    }

    #[test]
    fn new_trajectory_is_empty() {
        assert!(Trajectory::new().is_empty());
        assert_eq!(Trajectory::new().len(), 0);
    }

    #[test]
    fn collects_from_pair_iterators() {
        let trajectory: Trajectory = [("nest", "forage"), ("trail", "follow")]
            .into_iter()
            .collect();
        assert_eq!(trajectory.len(), 2);
        assert_eq!(trajectory.visits()[1].action, "follow");
    }
}
