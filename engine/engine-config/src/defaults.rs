//! Default configuration values loaded from config.defaults.toml.
//!
//! The defaults file is embedded at compile time so the binary and the
//! checked-in file can never disagree.

use once_cell::sync::Lazy;
use serde::Deserialize;

/// The embedded defaults TOML file (loaded at compile time)
const DEFAULTS_TOML: &str = include_str!("../../../config.defaults.toml");

/// Parsed defaults structure (parsed once at first use)
static DEFAULTS: Lazy<DefaultsConfig> = Lazy::new(|| {
    toml::from_str(DEFAULTS_TOML).expect("config.defaults.toml should be valid TOML")
});

// ============================================================================
// Internal structs for parsing config.defaults.toml
// ============================================================================

#[derive(Debug, Deserialize)]
struct DefaultsConfig {
    common: CommonDefaults,
    board: BoardDefaults,
    search: SearchDefaults,
}

#[derive(Debug, Deserialize)]
struct CommonDefaults {
    log_level: String,
}

#[derive(Debug, Deserialize)]
struct BoardDefaults {
    cols: usize,
    rows: usize,
    connect: usize,
}

#[derive(Debug, Deserialize)]
struct SearchDefaults {
    num_simulations: u32,
    exploration_constant: f64,
    algorithm: String,
    verbosity: String,
}

// ============================================================================
// Public accessor functions
// ============================================================================

// Common
pub fn log_level() -> &'static str {
    &DEFAULTS.common.log_level
}

// Board
pub fn cols() -> usize {
    DEFAULTS.board.cols
}
pub fn rows() -> usize {
    DEFAULTS.board.rows
}
pub fn connect() -> usize {
    DEFAULTS.board.connect
}

// Search
pub fn num_simulations() -> u32 {
    DEFAULTS.search.num_simulations
}
pub fn exploration_constant() -> f64 {
    DEFAULTS.search.exploration_constant
}
pub fn algorithm() -> &'static str {
    &DEFAULTS.search.algorithm
}
pub fn verbosity() -> &'static str {
    &DEFAULTS.search.verbosity
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_parse() {
        // Just accessing these will verify the TOML parses correctly
        assert_eq!(log_level(), "info");
        assert_eq!(algorithm(), "UCT");
        assert_eq!(verbosity(), "None");
    }

    #[test]
    fn test_board_defaults() {
        assert_eq!(cols(), 7);
        assert_eq!(rows(), 6);
        assert_eq!(connect(), 4);
    }

    #[test]
    fn test_search_defaults() {
        assert_eq!(num_simulations(), 500);
        assert!((exploration_constant() - 1.41).abs() < f64::EPSILON);
    }
}
