//! Error types for http-bearer
//!
//! This module defines the error hierarchy for the crate. Authentication
//! failures are not errors: they travel as [`crate::Outcome::Fail`] with a
//! rendered challenge. The types here cover misconfiguration, processing
//! faults and the host-side plumbing (config files, request bodies, server).

use thiserror::Error;

/// Boxed cause reported by a verifier through `Verified::error`
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// The main error type for http-bearer
#[derive(Error, Debug)]
pub enum Error {
    // ============================================================================
    // Strategy Errors
    // ============================================================================
    #[error("bearer strategy requires a verify function")]
    MissingVerify,

    #[error("verify function finished without reporting an outcome")]
    NoOutcome,

    // ============================================================================
    // Configuration Errors
    // ============================================================================
    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("Failed to parse YAML: {0}")]
    YamlParse(#[from] serde_yaml::Error),

    #[error("Failed to parse JSON: {0}")]
    JsonParse(#[from] serde_json::Error),

    // ============================================================================
    // HTTP Errors
    // ============================================================================
    #[error("Failed to read request body: {message}")]
    Body { message: String },

    #[error("Server error: {message}")]
    Server { message: String },

    // ============================================================================
    // I/O Errors
    // ============================================================================
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("File not found: {path}")]
    FileNotFound { path: String },
}

impl Error {
    /// Create a config error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create a body error
    pub fn body(message: impl Into<String>) -> Self {
        Self::Body {
            message: message.into(),
        }
    }

    /// Create a server error
    pub fn server(message: impl Into<String>) -> Self {
        Self::Server {
            message: message.into(),
        }
    }
}

/// Result type alias for http-bearer
pub type Result<T> = std::result::Result<T, Error>;
