//! Error types for the progress core

use thiserror::Error;

/// Result alias used across the progress core
pub type Result<T> = std::result::Result<T, TrackerError>;

/// Errors that can occur while reading or changing progress
#[derive(Debug, Error)]
pub enum TrackerError {
    /// A day, topic, question or problem does not exist
    #[error("Not found: {0}")]
    NotFound(String),

    /// A required field was missing or blank
    #[error("Invalid input: {0}")]
    Validation(String),

    /// Stored or imported text is not valid JSON for a progress document
    #[error("Failed to parse progress data: {0}")]
    Parse(#[from] serde_json::Error),

    /// Imported JSON does not look like a progress document
    #[error("Import rejected: {0}")]
    InvalidImport(String),

    /// A document parsed but breaks an identity invariant
    #[error("Invalid progress document: {0}")]
    InvalidDocument(String),

    /// Reading or writing the storage slot failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl TrackerError {
    /// Check if this error means the caller should ask the user again
    pub fn is_validation(&self) -> bool {
        matches!(self, TrackerError::Validation(_))
    }

    /// Check if this error came from reading malformed data
    pub fn is_data_error(&self) -> bool {
        matches!(
            self,
            TrackerError::Parse(_)
                | TrackerError::InvalidImport(_)
                | TrackerError::InvalidDocument(_)
        )
    }
}
