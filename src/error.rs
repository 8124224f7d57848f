//! Custom error types for the village ledger
//!
//! This module defines the error hierarchy for the application using thiserror
//! for ergonomic error definitions. Fetch failures from a transaction source
//! have their own type in [`crate::ledger`] and are wrapped here.

use thiserror::Error;

use crate::ledger::FetchError;

/// The main error type for village ledger operations
#[derive(Error, Debug)]
pub enum VillageError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// File I/O errors
    #[error("I/O error: {0}")]
    Io(String),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(String),

    /// Validation errors for data models
    #[error("Validation error: {0}")]
    Validation(String),

    /// Entity not found errors
    #[error("{entity_type} not found: {identifier}")]
    NotFound {
        entity_type: &'static str,
        identifier: String,
    },

    /// Duplicate entity errors
    #[error("{entity_type} already exists: {identifier}")]
    Duplicate {
        entity_type: &'static str,
        identifier: String,
    },

    /// Member is still referenced by recorded favors
    #[error("Member '{member}' has {favor_count} recorded favor(s) and cannot be removed")]
    MemberInUse { member: String, favor_count: usize },

    /// Export errors
    #[error("Export error: {0}")]
    Export(String),

    /// Storage errors
    #[error("Storage error: {0}")]
    Storage(String),

    /// No member is signed in and none was given explicitly
    #[error("No member is signed in (use `village login <member>` or pass --as)")]
    NoSession,

    /// The transaction source could not deliver records
    #[error("Balance unavailable: {0}")]
    Fetch(#[from] FetchError),
}

impl VillageError {
    /// Create a "not found" error for members
    pub fn member_not_found(identifier: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type: "Member",
            identifier: identifier.into(),
        }
    }

    /// Create a "not found" error for favors
    pub fn favor_not_found(identifier: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type: "Favor",
            identifier: identifier.into(),
        }
    }

    /// Check if this is a "not found" error
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// Check if this is a validation error
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }

    /// Check if this error came from a failed fetch
    pub fn is_fetch(&self) -> bool {
        matches!(self, Self::Fetch(_))
    }
}

impl From<std::io::Error> for VillageError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

impl From<serde_json::Error> for VillageError {
    fn from(err: serde_json::Error) -> Self {
        Self::Json(err.to_string())
    }
}

impl From<csv::Error> for VillageError {
    fn from(err: csv::Error) -> Self {
        Self::Export(err.to_string())
    }
}

/// Result type alias for village ledger operations
pub type VillageResult<T> = Result<T, VillageError>;
