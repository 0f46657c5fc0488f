//! # Error Handling Module
//!
//! ## Purpose
//! Centralized error handling for the exam paper search engine, covering
//! resource loading, configuration, persistence, and search failures.
//!
//! ## Input/Output Specification
//! - **Input**: Error conditions from system components
//! - **Output**: Structured error types with context
//! - **Error Categories**: Resources, Configuration, Storage, System
//!
//! ## Key Features
//! - A single `SearchError` enum with detailed variants
//! - Automatic conversion from library error types
//! - Category labels for structured logging
//!
//! Note: a corpus URL that fails to decompose is *not* an error anywhere in
//! this crate. Malformed entries are silently filtered out of results; only
//! resource-level failures (a file that cannot be loaded or parsed) surface
//! as `SearchError`.

use thiserror::Error;

/// Result type used throughout the application
pub type Result<T> = std::result::Result<T, SearchError>;

/// Error types for the exam paper search engine
#[derive(Debug, Error)]
pub enum SearchError {
    /// A required data resource (corpus, department mapping) could not be
    /// loaded. Search is disabled entirely when this occurs.
    #[error("Resource '{resource}' is unavailable: {details}")]
    ResourceUnavailable { resource: String, details: String },

    /// A resource loaded but its contents could not be interpreted
    #[error("Failed to parse data from {resource}: {details}")]
    DataParsing { resource: String, details: String },

    /// Configuration errors
    #[error("Configuration error: {message}")]
    Config { message: String },

    /// Validation errors
    #[error("Validation failed for field '{field}': {reason}")]
    ValidationFailed { field: String, reason: String },

    /// Generic I/O errors
    #[error("I/O error: {0}")]
    Io(std::io::Error),

    /// JSON parsing errors
    #[error("JSON error: {0}")]
    Json(serde_json::Error),

    /// TOML parsing errors
    #[error("TOML error: {0}")]
    Toml(toml::de::Error),

    /// Last-search database errors
    #[error("Database error: {0}")]
    Database(sled::Error),

    /// State serialization errors
    #[error("Serialization error: {0}")]
    Serialization(bincode::Error),

    /// Internal system errors
    #[error("Internal error: {message}")]
    Internal { message: String },
}

impl SearchError {
    /// Get error category for metrics and logging
    pub fn category(&self) -> &'static str {
        match self {
            SearchError::Config { .. }
            | SearchError::Toml(_)
            | SearchError::ValidationFailed { .. } => "configuration",
            SearchError::ResourceUnavailable { .. }
            | SearchError::DataParsing { .. }
            | SearchError::Json(_) => "resources",
            SearchError::Database(_) | SearchError::Serialization(_) => "storage",
            SearchError::Io(_) | SearchError::Internal { .. } => "system",
        }
    }
}

// Conversion from common error types
impl From<std::io::Error> for SearchError {
    fn from(err: std::io::Error) -> Self {
        SearchError::Io(err)
    }
}

impl From<serde_json::Error> for SearchError {
    fn from(err: serde_json::Error) -> Self {
        SearchError::Json(err)
    }
}

impl From<toml::de::Error> for SearchError {
    fn from(err: toml::de::Error) -> Self {
        SearchError::Toml(err)
    }
}

impl From<sled::Error> for SearchError {
    fn from(err: sled::Error) -> Self {
        SearchError::Database(err)
    }
}

impl From<bincode::Error> for SearchError {
    fn from(err: bincode::Error) -> Self {
        SearchError::Serialization(err)
    }
}
