// src/error.rs

//! Unified error handling for the sync application.

use thiserror::Error;

/// Result type alias for sync operations.
pub type Result<T> = std::result::Result<T, AppError>;

/// Unified application error type.
#[derive(Error, Debug)]
pub enum AppError {
    /// Network/connectivity failure while talking to the CRM
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// Non-success response from the CRM API
    #[error("CRM error {status} for {path}")]
    Upstream { status: u16, path: String },

    /// Upsert or constraint failure in the relational sink
    #[error("sink error: {0}")]
    Sink(String),

    /// JSON serialization/deserialization failed
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// TOML parsing failed
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    /// I/O operation failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Data validation error
    #[error("Validation error: {0}")]
    Validation(String),
}

impl AppError {
    /// Create an upstream error for a failed CRM call.
    pub fn upstream(status: u16, path: impl Into<String>) -> Self {
        Self::Upstream {
            status,
            path: path.into(),
        }
    }

    /// Create a configuration error.
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Create a validation error.
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    /// Create a sink error.
    pub fn sink(message: impl Into<String>) -> Self {
        Self::Sink(message.into())
    }
}

impl From<sqlx::Error> for AppError {
    fn from(e: sqlx::Error) -> Self {
        Self::Sink(e.to_string())
    }
}
