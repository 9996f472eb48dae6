//! Crate-level error types.

use std::fmt;

/// Errors produced by the evergreen crate.
///
/// The per-frame path is infallible; only preset I/O and option handling
/// can fail.
#[derive(Debug)]
pub enum EvergreenError {
    /// Generic I/O failure.
    Io(std::io::Error),
    /// TOML options parsing/serialization failure.
    OptionsParse(String),
    /// An option value the generators cannot use.
    InvalidOptions(String),
}

impl fmt::Display for EvergreenError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(e) => write!(f, "I/O error: {e}"),
            Self::OptionsParse(msg) => {
                write!(f, "options parse error: {msg}")
            }
            Self::InvalidOptions(msg) => {
                write!(f, "invalid option: {msg}")
            }
        }
    }
}

impl std::error::Error for EvergreenError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for EvergreenError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e)
    }
}
