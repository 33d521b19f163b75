//! Output format selection

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::Error;

/// Target format for a packaging job
///
/// Only [`OutputFormat::Exe`] has a working backend; the other variants are
/// accepted as input and reported as unsupported without launching anything.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Single-file executable via the packaging tool
    Exe,
    /// Android package (no backend)
    Apk,
    /// Anything else (no backend)
    Other,
}

impl OutputFormat {
    /// Whether a backend exists for this format
    pub fn is_supported(&self) -> bool {
        matches!(self, Self::Exe)
    }
}

impl FromStr for OutputFormat {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "exe" => Ok(Self::Exe),
            "apk" => Ok(Self::Apk),
            "other" => Ok(Self::Other),
            _ => Err(Error::UnknownFormat { value: s.to_string() }),
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Exe => "exe",
            Self::Apk => "apk",
            Self::Other => "other",
        };
        write!(f, "{name}")
    }
}
