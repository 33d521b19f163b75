//! Core types for pypack
//!
//! This crate provides the fundamental data structures and error types
//! shared by the pypack crates.

pub mod error;
pub mod event;
pub mod format;

pub use error::{Error, Result};
pub use event::{JobResult, LogEvent, ProgressEvent};
pub use format::OutputFormat;
