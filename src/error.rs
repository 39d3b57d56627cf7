//! Error types for cwlogs
//!
//! This module defines the error hierarchy for the whole crate.
//! All public APIs return `Result<T, Error>` where Error is defined here.

use thiserror::Error;

/// The main error type for cwlogs
#[derive(Error, Debug)]
pub enum Error {
    // ============================================================================
    // Option / Configuration Errors
    // ============================================================================
    #[error("Invalid option '{field}': {message}")]
    InvalidOptions {
        field: &'static str,
        message: String,
    },

    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("Usage error: {message}")]
    Usage { message: String },

    #[error("Failed to parse YAML: {0}")]
    YamlParse(#[from] serde_yaml::Error),

    #[error("Failed to parse JSON: {0}")]
    JsonParse(#[from] serde_json::Error),

    // ============================================================================
    // Remote Errors
    // ============================================================================
    #[error("Remote query failed: {0}")]
    Remote(#[source] Box<Error>),

    // ============================================================================
    // HTTP Errors
    // ============================================================================
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("HTTP {status}: {body}")]
    HttpStatus { status: u16, body: String },

    #[error("Rate limited, retry after {retry_after_seconds}s")]
    RateLimited { retry_after_seconds: u64 },

    #[error("Request timeout after {timeout_ms}ms")]
    Timeout { timeout_ms: u64 },

    #[error("Max retries ({max_retries}) exceeded")]
    MaxRetriesExceeded { max_retries: u32 },

    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    // ============================================================================
    // Stream Errors
    // ============================================================================
    #[error("Stream state error: {message}")]
    State { message: String },

    // ============================================================================
    // I/O Errors
    // ============================================================================
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // ============================================================================
    // Generic Errors
    // ============================================================================
    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Create an invalid options error for a named field
    pub fn invalid_option(field: &'static str, message: impl Into<String>) -> Self {
        Self::InvalidOptions {
            field,
            message: message.into(),
        }
    }

    /// Create a config error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create a usage error
    pub fn usage(message: impl Into<String>) -> Self {
        Self::Usage {
            message: message.into(),
        }
    }

    /// Create an HTTP status error
    pub fn http_status(status: u16, body: impl Into<String>) -> Self {
        Self::HttpStatus {
            status,
            body: body.into(),
        }
    }

    /// Create a stream state error
    pub fn state(message: impl Into<String>) -> Self {
        Self::State {
            message: message.into(),
        }
    }

    /// Wrap an error as a remote failure. Already-remote errors are returned as is.
    pub fn remote(inner: impl Into<Error>) -> Self {
        match inner.into() {
            remote @ Error::Remote(_) => remote,
            other => Error::Remote(Box::new(other)),
        }
    }

    /// Name of the offending option, if this is an `InvalidOptions` error
    pub fn invalid_field(&self) -> Option<&'static str> {
        match self {
            Error::InvalidOptions { field, .. } => Some(field),
            _ => None,
        }
    }

    /// Check if this is a remote failure
    pub fn is_remote(&self) -> bool {
        matches!(self, Error::Remote(_))
    }
}

/// Result type alias for cwlogs
pub type Result<T> = std::result::Result<T, Error>;

/// Extension trait for adding context to errors
pub trait ResultExt<T> {
    /// Add context with a closure (lazy evaluation)
    fn with_context<F: FnOnce() -> String>(self, f: F) -> Result<T>;
}

impl<T, E: Into<Error>> ResultExt<T> for std::result::Result<T, E> {
    fn with_context<F: FnOnce() -> String>(self, f: F) -> Result<T> {
        self.map_err(|e| {
            let inner = e.into();
            Error::Other(format!("{}: {}", f(), inner))
        })
    }
}
