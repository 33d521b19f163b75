//! Job configuration for pypack
//!
//! This crate holds the three user-provided inputs of a packaging job and
//! validates them before anything is launched.

use std::path::{Path, PathBuf};

use pypack_core::error::{Error, Result};
use pypack_core::OutputFormat;
use serde::{Deserialize, Serialize};

/// Source file extension accepted by default
const SOURCE_EXTENSION: &str = "py";

/// Configuration for one packaging job
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JobConfig {
    /// Script to package
    pub source_file: PathBuf,

    /// Requested output format
    pub format: OutputFormat,

    /// Directory receiving the packaged executable
    pub output_dir: PathBuf,

    /// Skip the `.py` extension filter on the source file
    #[serde(default)]
    pub allow_any_extension: bool,
}

impl JobConfig {
    /// Create a new job configuration
    pub fn new(
        source_file: impl Into<PathBuf>,
        format: OutputFormat,
        output_dir: impl Into<PathBuf>,
    ) -> Self {
        Self {
            source_file: source_file.into(),
            format,
            output_dir: output_dir.into(),
            allow_any_extension: false,
        }
    }

    /// Validate the configured inputs
    pub fn validate(&self) -> Result<()> {
        if !self.source_file.is_file() {
            return Err(Error::ConfigError {
                message: format!("Source file does not exist: {0:?}", self.source_file),
            });
        }

        if !self.allow_any_extension {
            let extension = self.source_file.extension().and_then(|e| e.to_str());
            if extension != Some(SOURCE_EXTENSION) {
                return Err(Error::ConfigError {
                    message: format!(
                        "Source file is not a .{SOURCE_EXTENSION} script: {0:?}",
                        self.source_file
                    ),
                });
            }
        }

        if !self.output_dir.is_dir() {
            return Err(Error::ConfigError {
                message: format!("Output directory does not exist: {0:?}", self.output_dir),
            });
        }

        Ok(())
    }

    /// Directory receiving the finished executable (`--distpath`)
    pub fn dist_dir(&self) -> &Path {
        &self.output_dir
    }

    /// Intermediate build directory (`--workpath`)
    pub fn work_dir(&self) -> PathBuf {
        self.output_dir.join("build")
    }

    /// Spec file directory (`--specpath`)
    pub fn spec_dir(&self) -> PathBuf {
        self.output_dir.join("spec")
    }
}
