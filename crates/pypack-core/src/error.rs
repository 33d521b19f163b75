//! Error types for the core library

use thiserror::Error;

/// Core error type for pypack operations
#[derive(Error, Debug)]
pub enum Error {
    /// Configuration error
    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    /// Unknown output format selector
    #[error("Unknown output format: {value}")]
    UnknownFormat { value: String },
}

/// Result type alias for pypack operations
pub type Result<T> = std::result::Result<T, Error>;
