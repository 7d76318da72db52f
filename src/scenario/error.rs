use thiserror::Error;

use crate::error::PkError;

/// Errors that can occur when loading or running a scenario
#[derive(Debug, Error)]
pub enum ScenarioError {
    /// Failed to parse JSON
    #[error("Failed to parse scenario JSON: {0}")]
    Parse(#[from] serde_json::Error),

    /// Failed to read the scenario file
    #[error("Failed to read scenario: {0}")]
    Io(#[from] std::io::Error),

    /// The scenario holds a value the engine rejects
    #[error(transparent)]
    Invalid(#[from] PkError),
}
