//! Pheromone-based action selection and reinforcement
//!
//! This crate provides the ant-colony learning core: a table of
//! (state, action) pheromone levels that evaporates over time, grows
//! through reward deposits, and drives probabilistic action selection.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod error;
pub mod heuristic;
pub mod metrics;
pub mod params;
pub mod snapshot;
pub mod store;
pub mod table;
pub mod trajectory;
pub mod tuner;

// Re-export core types
pub use error::{ColonyError, Result};
pub use heuristic::Heuristic;
pub use metrics::{LearningMetrics, MetricsSnapshot, MetricsSummary};
pub use params::PheromoneParams;
pub use snapshot::{InMemoryStore, JsonDocumentStore, SnapshotStore};
pub use store::{PersistMode, PheromoneStore};
pub use table::PheromoneTable;
pub use trajectory::{Trajectory, Visit};
pub use tuner::{AdaptiveTuner, Trend};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::{
        Heuristic, PheromoneParams, PheromoneStore, PheromoneTable, Result, SnapshotStore,
        Trajectory,
    };
}
