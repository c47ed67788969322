//! Custom error types for finsight
//!
//! This module defines the error hierarchy for the metrics engine and the
//! command-line shell using thiserror for ergonomic error definitions.

use thiserror::Error;

/// The main error type for finsight operations
#[derive(Error, Debug)]
pub enum FinsightError {
    /// A record failed numeric or structural sanity checks
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// A ratio whose denominator is zero and has no defined fallback
    #[error("Undefined ratio for {entity_type} '{identifier}': {reason}")]
    UndefinedRatio {
        entity_type: &'static str,
        identifier: String,
        reason: String,
    },

    /// Health scoring backend failures (malformed or out-of-range output)
    #[error("Scoring error: {0}")]
    Scoring(String),

    /// Entity not found errors
    #[error("{entity_type} not found: {identifier}")]
    NotFound {
        entity_type: &'static str,
        identifier: String,
    },

    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// File I/O errors
    #[error("I/O error: {0}")]
    Io(String),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(String),

    /// Snapshot storage errors
    #[error("Storage error: {0}")]
    Storage(String),

    /// Export errors
    #[error("Export error: {0}")]
    Export(String),
}

impl FinsightError {
    /// Create an "invalid input" error naming the offending record
    pub fn invalid(entity_type: &str, identifier: &str, reason: impl AsRef<str>) -> Self {
        Self::InvalidInput(format!(
            "{} '{}': {}",
            entity_type,
            identifier,
            reason.as_ref()
        ))
    }

    /// Create an error for a total too large to represent in cents
    pub fn amount_overflow(what: &str) -> Self {
        Self::InvalidInput(format!("{} exceeds the supported amount range", what))
    }

    /// Create a "not found" error for habits
    pub fn habit_not_found(identifier: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type: "Habit",
            identifier: identifier.into(),
        }
    }

    /// Check if this is a "not found" error
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// Check if this is an input validation error
    pub fn is_invalid_input(&self) -> bool {
        matches!(self, Self::InvalidInput(_))
    }

    /// Check if this is an undefined ratio error
    pub fn is_undefined_ratio(&self) -> bool {
        matches!(self, Self::UndefinedRatio { .. })
    }
}

impl From<std::io::Error> for FinsightError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

impl From<serde_json::Error> for FinsightError {
    fn from(err: serde_json::Error) -> Self {
        Self::Json(err.to_string())
    }
}

impl From<serde_yaml::Error> for FinsightError {
    fn from(err: serde_yaml::Error) -> Self {
        Self::Export(err.to_string())
    }
}

impl From<csv::Error> for FinsightError {
    fn from(err: csv::Error) -> Self {
        Self::Export(err.to_string())
    }
}

/// Result type alias for finsight operations
pub type FinsightResult<T> = Result<T, FinsightError>;
