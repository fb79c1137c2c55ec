//! Output detail levels.

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

/// How much of a search is printed.
///
/// Verbosity only affects output; the chosen move is the same at every level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Verbosity {
    /// Every simulation step, the column summary and the final move
    Verbose,
    /// Column summary and final move
    Brief,
    /// Final move only
    #[default]
    None,
}

impl Verbosity {
    pub fn shows_events(self) -> bool {
        self == Verbosity::Verbose
    }

    pub fn shows_summary(self) -> bool {
        matches!(self, Verbosity::Verbose | Verbosity::Brief)
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("Unknown verbosity '{0}', expected Verbose, Brief or None")]
pub struct UnknownVerbosity(pub String);

impl FromStr for Verbosity {
    type Err = UnknownVerbosity;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "verbose" => Ok(Verbosity::Verbose),
            "brief" => Ok(Verbosity::Brief),
            "none" => Ok(Verbosity::None),
            _ => Err(UnknownVerbosity(s.to_string())),
        }
    }
}

impl fmt::Display for Verbosity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Verbosity::Verbose => "Verbose",
            Verbosity::Brief => "Brief",
            Verbosity::None => "None",
        };
        f.write_str(name)
    }
}
