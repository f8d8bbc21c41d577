//! Error handling module for MatchLedger
//!
//! Defines the crate-wide error type. Only structural failures surface
//! here: a bad dataset file, unreadable configuration, or a storage
//! failure. Record-level problems are handled inside the pipeline by
//! exclusion and never reach this type.

use thiserror::Error;

/// Result type alias for MatchLedger operations
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for MatchLedger
#[derive(Error, Debug)]
pub enum Error {
    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// Dataset-level errors: wrong extension, malformed line
    #[error("Dataset error: {0}")]
    Dataset(String),

    /// Database connection or query errors
    #[error("Database error: {0}")]
    Database(String),

    /// Serialization/deserialization errors
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic internal errors
    #[error("Internal error: {0}")]
    Internal(String),
}

impl Error {
    /// Create a configuration error
    pub fn config<S: Into<String>>(msg: S) -> Self {
        Error::Config(msg.into())
    }

    /// Create a dataset error
    pub fn dataset<S: Into<String>>(msg: S) -> Self {
        Error::Dataset(msg.into())
    }

    /// Create a database error
    pub fn database<S: Into<String>>(msg: S) -> Self {
        Error::Database(msg.into())
    }

    /// Create an internal error
    pub fn internal<S: Into<String>>(msg: S) -> Self {
        Error::Internal(msg.into())
    }

    /// Whether this error aborts the whole run before any output is written
    pub fn is_fatal_input(&self) -> bool {
        matches!(
            self,
            Error::Config(_) | Error::Dataset(_) | Error::Serialization(_) | Error::Io(_)
        )
    }
}

/// Convert from anyhow::Error to our Error type
impl From<anyhow::Error> for Error {
    fn from(err: anyhow::Error) -> Self {
        Error::Internal(err.to_string())
    }
}

/// Convert from envconfig::Error to our Error type
impl From<envconfig::Error> for Error {
    fn from(err: envconfig::Error) -> Self {
        Error::Config(err.to_string())
    }
}
