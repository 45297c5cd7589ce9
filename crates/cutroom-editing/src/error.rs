//! Error types for editing operations.

use std::path::PathBuf;
use thiserror::Error;

/// Result type for editing operations.
pub type EditResult<T> = Result<T, EditError>;

/// Errors that can occur at the editing engine boundary.
///
/// The authorities themselves never fail once their input has been
/// validated: heuristics fall back to defaults and structural guards
/// degrade to a partial edit.
#[derive(Debug, Error)]
pub enum EditError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Invalid config: {0}")]
    InvalidConfig(String),

    #[error("Failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl EditError {
    /// Create an invalid input error.
    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::InvalidInput(message.into())
    }

    /// Create a write failure error for a specific path.
    pub fn write_failed(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Write {
            path: path.into(),
            source,
        }
    }

    /// Whether the caller handed the engine something it cannot edit.
    pub fn is_input_error(&self) -> bool {
        matches!(self, Self::InvalidInput(_) | Self::InvalidConfig(_))
    }
}

impl From<validator::ValidationErrors> for EditError {
    fn from(errors: validator::ValidationErrors) -> Self {
        Self::InvalidConfig(errors.to_string())
    }
}
