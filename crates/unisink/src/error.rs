//! Error types for the unisink library.

use std::path::PathBuf;
use thiserror::Error;

use crate::model::Origin;

/// Main error type for unisink operations.
#[derive(Debug, Error)]
pub enum UnisinkError {
    /// Error reading or writing a file.
    #[error("IO error for '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Error from the CSV library.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// A line matched the coarse shape of its format but could not be decomposed.
    #[error("Malformed {origin} entry at {location}: {message}")]
    Malformed {
        origin: Origin,
        location: String,
        message: String,
    },

    /// Invalid configuration or inputs.
    #[error("Configuration error: {0}")]
    Config(String),

    /// No input files were given.
    #[error("Empty input: {0}")]
    EmptyInput(String),
}

impl UnisinkError {
    /// Build a malformed-entry error. The location is filled in by the collector.
    pub fn malformed(origin: Origin, message: impl Into<String>) -> Self {
        UnisinkError::Malformed {
            origin,
            location: String::from("<unknown>"),
            message: message.into(),
        }
    }

    /// Attach a `file:line` location to a malformed-entry error.
    pub(crate) fn at(self, location: impl Into<String>) -> Self {
        match self {
            UnisinkError::Malformed {
                origin, message, ..
            } => UnisinkError::Malformed {
                origin,
                location: location.into(),
                message,
            },
            other => other,
        }
    }
}

/// Result type alias for unisink operations.
pub type Result<T> = std::result::Result<T, UnisinkError>;
