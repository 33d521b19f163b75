//! Error types for job execution

use thiserror::Error;

/// Build-specific error types
#[derive(Error, Debug)]
pub enum BuildError {
    /// The packaging tool could not be probed
    #[error("Packaging tool is not installed or not on PATH: {tool}")]
    ToolMissing { tool: String },

    /// The requested output format has no backend
    #[error("Output format is not supported: {format}")]
    UnsupportedFormat { format: String },

    /// The packaging tool exited with a nonzero code
    #[error("Packaging job failed with exit code {code}")]
    JobFailed { code: i32 },

    /// Child output could not be captured
    #[error("Failed to capture child output: {reason}")]
    Stream { reason: String },

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(#[from] pypack_core::Error),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for build operations
pub type Result<T> = std::result::Result<T, BuildError>;

impl BuildError {
    /// Create a stream capture error
    pub fn stream(reason: impl Into<String>) -> Self {
        Self::Stream { reason: reason.into() }
    }

    /// Check whether this error means the tool itself is missing
    pub fn is_tool_missing(&self) -> bool {
        matches!(self, Self::ToolMissing { .. })
    }
}
