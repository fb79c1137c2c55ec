//! Configuration struct definitions.
//!
//! All config structs with serde deserialization support and default values.

use crate::defaults;
use serde::Deserialize;

// ============================================================================
// Serde default functions (required for #[serde(default = "...")])
// These call the accessor functions from defaults module
// ============================================================================

fn d_log_level() -> String {
    defaults::log_level().into()
}
fn d_cols() -> usize {
    defaults::cols()
}
fn d_rows() -> usize {
    defaults::rows()
}
fn d_connect() -> usize {
    defaults::connect()
}
fn d_num_simulations() -> u32 {
    defaults::num_simulations()
}
fn d_exploration_constant() -> f64 {
    defaults::exploration_constant()
}
fn d_algorithm() -> String {
    defaults::algorithm().into()
}
fn d_verbosity() -> String {
    defaults::verbosity().into()
}

// ============================================================================
// Configuration Structs
// ============================================================================

/// Root configuration structure matching config.toml
#[derive(Debug, Deserialize, Default, Clone)]
pub struct CentralConfig {
    #[serde(default)]
    pub common: CommonConfig,
    #[serde(default)]
    pub board: BoardConfig,
    #[serde(default)]
    pub search: SearchConfig,
}

/// Settings shared by every component
#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct CommonConfig {
    #[serde(default = "d_log_level")]
    pub log_level: String,
}

impl Default for CommonConfig {
    fn default() -> Self {
        Self {
            log_level: d_log_level(),
        }
    }
}

/// Board geometry and win length
#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct BoardConfig {
    #[serde(default = "d_cols")]
    pub cols: usize,
    #[serde(default = "d_rows")]
    pub rows: usize,
    /// Pieces in a row needed to win
    #[serde(default = "d_connect")]
    pub connect: usize,
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self {
            cols: d_cols(),
            rows: d_rows(),
            connect: d_connect(),
        }
    }
}

/// Search configuration
#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct SearchConfig {
    #[serde(default = "d_num_simulations")]
    pub num_simulations: u32,
    #[serde(default = "d_exploration_constant")]
    pub exploration_constant: f64,
    /// UR, PMCGS or UCT; used when no position file is given
    #[serde(default = "d_algorithm")]
    pub algorithm: String,
    /// Verbose, Brief or None
    #[serde(default = "d_verbosity")]
    pub verbosity: String,
    /// Fixed RNG seed; a fresh seed is drawn per run when unset
    #[serde(default)]
    pub seed: Option<u64>,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            num_simulations: d_num_simulations(),
            exploration_constant: d_exploration_constant(),
            algorithm: d_algorithm(),
            verbosity: d_verbosity(),
            seed: None,
        }
    }
}
