//! Sandbox task environments and the learning cycle runner for colony-rl
//!
//! This crate provides the simulation side of the colony:
//! - A sandbox environment with a catalog of synthetic tasks
//! - A cycle runner wiring selection, execution, and reinforcement
//! - Run reports with per-cycle outcomes

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod runner;
pub mod sandbox;

// Re-export the runner surface
pub use runner::{CycleOutcome, CycleRunner, RunnerConfig, RunReport};
pub use sandbox::{SandboxConfig, SandboxEnv, TaskProfile};

// Re-export core types
pub use colony_rl_core::{
    ColonyError, Heuristic, LearningMetrics, PheromoneParams, PheromoneStore, Result, Trajectory,
};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::{CycleRunner, RunnerConfig, SandboxConfig, SandboxEnv};
    pub use colony_rl_core::prelude::*;
}
