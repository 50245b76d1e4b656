//! Error types for the Pipeline Server
//!
//! This module contains the error types used throughout the server.

use thiserror::Error;

/// Server error types
#[derive(Error, Debug)]
pub enum ServerError {
    /// Invalid configuration value
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// Failure reading or decoding a configuration source
    #[error("Configuration source error: {0}")]
    ConfigSourceError(#[from] config::ConfigError),

    /// Socket or other I/O failure
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    /// Internal server error
    #[error("Internal server error: {0}")]
    InternalError(String),
}

/// Result type for server operations
pub type ServerResult<T> = Result<T, ServerError>;
