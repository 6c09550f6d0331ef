//! Error types for the colony learning core

use thiserror::Error;

/// Core error type for pheromone operations
#[derive(Error, Debug)]
pub enum ColonyError {
    /// Selection was asked to choose from an empty action list
    #[error("No actions available: {0}")]
    NoActionsAvailable(String),

    /// Persistence backend could not serve a load or save
    #[error("Persistence unavailable: {0}")]
    PersistenceUnavailable(String),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Other errors
    #[error("{0}")]
    Other(#[from] anyhow::Error),
}

/// Result type alias for pheromone operations
pub type Result<T> = std::result::Result<T, ColonyError>;
