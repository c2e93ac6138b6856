//! src/error.rs
//! ============================================================================
//! # `AppError`: Unified Error Type
//!
//! Single error enum used across the application. Variants carry enough
//! context for diagnostics; fallible paths return `Result<T, AppError>`.
//! Nothing in the live-search subsystem is fatal to the app: failures are
//! surfaced as an empty result list plus a status-line note.

use std::{io, path::PathBuf};
use thiserror::Error;

/// Unified error type for all live-search client operations.
#[derive(Debug, Error)]
pub enum AppError {
    /// Standard IO error, auto-converted from `io::Error`.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// HTTP transport failure (connect, timeout, non-success status).
    #[error("Search request to {url} failed: {source}")]
    Http {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// Response body was not the expected result array. Parsed strictly,
    /// never evaluated; a bad payload fails closed.
    #[error("Malformed search response from {url}: {source}")]
    MalformedResponse {
        url: String,
        #[source]
        source: serde_json::Error,
    },

    /// TOML config parsing error.
    #[error("Config parse error: {0}")]
    Config(#[from] toml::de::Error),

    /// Config file I/O error with path.
    #[error("Failed to read config file {path:?}: {source}")]
    ConfigIo {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Serialization or deserialization error outside the response path.
    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),

    /// Input validation errors.
    #[error("Invalid input: {field} - {message}")]
    InvalidInput { field: String, message: String },

    /// Launching the system handler for a result link failed.
    #[error("Failed to open link {url}: {source}")]
    OpenLink {
        url: String,
        #[source]
        source: io::Error,
    },

    /// Terminal I/O or rendering error.
    #[error("Terminal error: {0}")]
    Terminal(String),

    /// Operation was superseded or cancelled.
    #[error("Operation was cancelled")]
    Cancelled,

    /// Any other error, with description.
    #[error("Unexpected error: {0}")]
    Other(String),
}

impl AppError {
    /// Create an HTTP transport error with the request URL attached.
    pub fn http<S: Into<String>>(url: S, source: reqwest::Error) -> Self {
        Self::Http {
            url: url.into(),
            source,
        }
    }

    /// Create a malformed-response error with the request URL attached.
    pub fn malformed_response<S: Into<String>>(url: S, source: serde_json::Error) -> Self {
        Self::MalformedResponse {
            url: url.into(),
            source,
        }
    }

    /// Create an input validation error.
    pub fn invalid_input<S1: Into<String>, S2: Into<String>>(field: S1, message: S2) -> Self {
        Self::InvalidInput {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Create a link activation error.
    pub fn open_link<S: Into<String>>(url: S, source: io::Error) -> Self {
        Self::OpenLink {
            url: url.into(),
            source,
        }
    }
}

// Allow conversion from `anyhow::Error` as fallback.
impl From<anyhow::Error> for AppError {
    fn from(e: anyhow::Error) -> Self {
        Self::Other(e.to_string())
    }
}
