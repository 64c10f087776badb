// src/error.rs

//! Unified error handling for the atlas crawler.

use std::fmt;
use std::path::PathBuf;

use thiserror::Error;

use crate::models::TissueMismatch;

/// Result type alias for crawler operations.
pub type Result<T> = std::result::Result<T, AppError>;

/// Unified application error type.
#[derive(Error, Debug)]
pub enum AppError {
    /// I/O operation failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Identifier input file could not be read
    #[error("Cannot read identifier file {}: {source}", path.display())]
    FileAccess {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// HTTP request failed (includes timeouts and non-2xx statuses)
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// JSON serialization failed
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// TOML parsing failed
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    /// URL parsing failed
    #[error("URL parse error: {0}")]
    Url(#[from] url::ParseError),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Data validation error
    #[error("Validation error: {0}")]
    Validation(String),

    /// Fetch failed for a reason other than the HTTP client itself
    #[error("Fetch error for {context}: {message}")]
    Fetch { context: String, message: String },

    /// Response text does not have the expected header/anchor layout
    #[error("Structural error: {0}")]
    Structural(String),

    /// Tissue rows differ from the fixed tissue set (strict mode only)
    #[error("Tissue set mismatch: {0}")]
    SchemaMismatch(TissueMismatch),

    /// A tissue row needed for a metric is absent
    #[error("No body row for tissue '{0}'")]
    MissingTissue(String),

    /// A tissue row is too short to hold the stage offset
    #[error("Row for tissue '{tissue}' has {len} fields, need index {offset} for {stage}")]
    ShortRow {
        tissue: String,
        stage: String,
        offset: usize,
        len: usize,
    },
}

impl AppError {
    /// Create a configuration error.
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Create a validation error.
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    /// Create a structural parse error.
    pub fn structural(message: impl Into<String>) -> Self {
        Self::Structural(message.into())
    }

    /// Create a fetch error with context.
    pub fn fetch(context: impl Into<String>, message: impl fmt::Display) -> Self {
        Self::Fetch {
            context: context.into(),
            message: message.to_string(),
        }
    }
}
