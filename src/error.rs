//! Error types for the media renamer.

use crate::models::entry::FileStatus;
use thiserror::Error;

/// Result type alias using our Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for the media renamer.
#[derive(Error, Debug)]
pub enum Error {
    // Configuration errors
    #[error("Invalid base name '{0}': must start with an uppercase letter and contain only letters, digits or '_'")]
    InvalidBaseName(String),

    #[error("Invalid maximum sequence width {0}: must be between 1 and 19")]
    InvalidMaxDigits(usize),

    #[error("Invalid configuration: {0}")]
    Config(String),

    // File system errors
    #[error("Path not found: {0}")]
    PathNotFound(String),

    #[error("Not a directory: {0}")]
    NotADirectory(String),

    #[error("File already exists: {0}")]
    FileAlreadyExists(String),

    // Sequencing errors
    #[error("{} file(s) do not follow the '{expected}' naming convention: {}", .offenders.len(), .offenders.join(", "))]
    ConventionMismatch {
        expected: String,
        offenders: Vec<String>,
    },

    #[error("No file follows a recognizable naming convention: {}", .0.join(", "))]
    NoConvention(Vec<String>),

    #[error("{} file(s) have no capture timestamp: {}", .0.len(), .0.join(", "))]
    MissingTimestamps(Vec<String>),

    #[error("Sequence number {ordinal} does not fit in {max_digits} digit(s)")]
    SequenceOverflow { ordinal: u64, max_digits: usize },

    // Plan errors
    #[error("Destination collision for {} file(s): {}", .0.len(), .0.join(", "))]
    DestinationCollision(Vec<String>),

    #[error("Illegal status change for {name}: {from} -> {to}")]
    InvalidTransition {
        name: String,
        from: FileStatus,
        to: FileStatus,
    },

    // Metadata errors
    #[error("Metadata read failed: {0}")]
    Metadata(String),

    // IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // JSON errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    // Generic errors
    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Create a generic error from a string.
    pub fn other<S: Into<String>>(msg: S) -> Self {
        Error::Other(msg.into())
    }

    /// Whether this error aborts a whole directory batch before any file is touched.
    pub fn is_planning_failure(&self) -> bool {
        matches!(
            self,
            Error::ConventionMismatch { .. }
                | Error::NoConvention(_)
                | Error::MissingTimestamps(_)
                | Error::SequenceOverflow { .. }
                | Error::DestinationCollision(_)
        )
    }
}
