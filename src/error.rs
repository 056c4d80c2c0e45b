use thiserror::Error;

use crate::catalog::WorkoutId;

/// Errors surfaced by the timer manager
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TimerError {
    /// The identifier does not resolve to a catalog entry
    #[error("unknown workout identifier {0}")]
    InvalidIdentifier(WorkoutId),

    /// The manager task has shut down and no longer accepts commands
    #[error("timer manager is closed")]
    Closed,
}

/// Errors surfaced by the local store
#[derive(Debug, Error)]
pub enum StoreError {
    /// A required field was left empty
    #[error("required field '{0}' is empty")]
    MissingField(&'static str),

    #[error("store i/o failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("store contents are not valid JSON: {0}")]
    Encoding(#[from] serde_json::Error),
}
