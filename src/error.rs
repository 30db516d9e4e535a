//! Error types for librarium
//!
//! Provides structured error types with context for better debugging
//! and user-friendly error messages.

use std::path::PathBuf;
use thiserror::Error;

/// The main error type for catalog operations
#[derive(Debug, Error)]
pub enum Error {
    // ==========================================================================
    // Collection Errors
    // ==========================================================================
    #[error("Collection '{name}' does not exist")]
    CollectionNotFound { name: String },

    // ==========================================================================
    // Document Errors
    // ==========================================================================
    #[error("Document '{id}' not found in collection '{collection}'")]
    DocumentNotFound { collection: String, id: String },

    #[error("Document '{id}' already exists in collection '{collection}'")]
    DocumentAlreadyExists { collection: String, id: String },

    #[error("Collection '{collection}' requires an explicit document ID")]
    MissingDocumentId { collection: String },

    // ==========================================================================
    // Schema Errors
    // ==========================================================================
    #[error("Schema validation failed for collection '{collection}': {source}")]
    SchemaValidation {
        collection: String,
        #[source]
        source: crate::schema::ValidationError,
    },

    // ==========================================================================
    // Identifier Errors
    // ==========================================================================
    #[error("Invalid {kind} '{value}': {reason}")]
    InvalidIdentifier {
        kind: &'static str,
        value: String,
        reason: &'static str,
    },

    #[error("Reserved name '{name}' cannot be used")]
    ReservedName { name: String },

    // ==========================================================================
    // IO Errors
    // ==========================================================================
    #[error("Failed to read file '{path}': {source}")]
    FileReadError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to write file '{path}': {source}")]
    FileWriteError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    // ==========================================================================
    // Serialization Errors
    // ==========================================================================
    #[error("Failed to parse YAML: {message}")]
    YamlParseError { message: String },

    #[error("Failed to parse JSON: {message}")]
    JsonParseError { message: String },

    // ==========================================================================
    // Catch-all
    // ==========================================================================
    #[error("{0}")]
    Other(String),
}

/// Result type alias for catalog operations
pub type Result<T> = std::result::Result<T, Error>;

// =============================================================================
// Conversions from external error types
// =============================================================================

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::Other(err.to_string())
    }
}

impl From<serde_yaml::Error> for Error {
    fn from(err: serde_yaml::Error) -> Self {
        Error::YamlParseError {
            message: err.to_string(),
        }
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::JsonParseError {
            message: err.to_string(),
        }
    }
}

impl From<crate::validation::ValidationError> for Error {
    fn from(err: crate::validation::ValidationError) -> Self {
        match err {
            crate::validation::ValidationError::InvalidIdentifier(value, reason) => {
                Error::InvalidIdentifier {
                    kind: "identifier",
                    value,
                    reason,
                }
            }
            crate::validation::ValidationError::TooLong(value, _max) => Error::InvalidIdentifier {
                kind: "identifier",
                value,
                reason: "exceeds maximum length",
            },
            crate::validation::ValidationError::Empty => Error::InvalidIdentifier {
                kind: "identifier",
                value: String::new(),
                reason: "cannot be empty",
            },
            crate::validation::ValidationError::Reserved(name) => Error::ReservedName { name },
        }
    }
}

// =============================================================================
// Error Display Helpers
// =============================================================================

impl Error {
    /// Returns a user-friendly suggestion for fixing the error
    pub fn suggestion(&self) -> Option<&'static str> {
        match self {
            Error::CollectionNotFound { .. } => {
                Some("Run 'librarium init' to create the catalog collections")
            }
            Error::DocumentNotFound { .. } => Some("Check the document ID and collection name"),
            Error::MissingDocumentId { .. } => {
                Some("Set an ID on the document before inserting it")
            }
            Error::InvalidIdentifier { .. } => {
                Some("Use only letters, numbers, underscores, and hyphens")
            }
            Error::SchemaValidation { .. } => {
                Some("Check the collection schema for required fields and types")
            }
            _ => None,
        }
    }

    /// Returns true if this error is recoverable
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            Error::CollectionNotFound { .. }
                | Error::DocumentNotFound { .. }
                | Error::InvalidIdentifier { .. }
                | Error::SchemaValidation { .. }
        )
    }
}
