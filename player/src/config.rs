//! Configuration for the connect4 player.
//!
//! Configuration is loaded from config.toml with environment variable overrides.
//! CLI arguments take highest priority, followed by env vars, then config.toml.

use std::path::PathBuf;

use anyhow::{anyhow, Result};
use clap::Parser;
use engine_config::{load_config, CentralConfig};
use mcts::{Algorithm, MctsConfig};
use once_cell::sync::Lazy;
use tracing::level_filters::LevelFilter;

use crate::verbosity::Verbosity;

// Load central config once at startup
static CENTRAL_CONFIG: Lazy<CentralConfig> = Lazy::new(load_config);

// Default value functions that read from central config
fn default_verbosity() -> &'static str {
    CENTRAL_CONFIG.search.verbosity.as_str()
}

fn default_simulations() -> u32 {
    CENTRAL_CONFIG.search.num_simulations
}

fn default_exploration_constant() -> f64 {
    CENTRAL_CONFIG.search.exploration_constant
}

fn default_log_level() -> String {
    CENTRAL_CONFIG.common.log_level.clone()
}

fn default_cols() -> usize {
    CENTRAL_CONFIG.board.cols
}

fn default_rows() -> usize {
    CENTRAL_CONFIG.board.rows
}

fn default_connect() -> usize {
    CENTRAL_CONFIG.board.connect
}

#[derive(Parser, Debug, Clone)]
#[command(name = "connect4")]
#[command(about = "Choose a Connect Four move with UR, PMCGS or UCT")]
#[command(
    long_about = "Reads a position file (algorithm line, player line, then the board rows
from top to bottom using O, R and Y) and prints the selected column.

Without a position file the empty board from config.toml is searched with
Red to move. Configuration is loaded from config.toml with environment
variable overrides. CLI arguments take highest priority."
)]
pub struct Config {
    /// Position file to choose a move for
    pub position: Option<PathBuf>,

    /// Output detail: Verbose, Brief or None
    #[arg(short, long, default_value = default_verbosity())]
    pub verbosity: Verbosity,

    /// Number of simulations per search
    #[arg(short = 'n', long, default_value_t = default_simulations())]
    pub simulations: u32,

    /// Exploration constant C for UCT
    #[arg(long, default_value_t = default_exploration_constant())]
    pub exploration_constant: f64,

    /// Override the algorithm named by the position file (UR, PMCGS, UCT)
    #[arg(short, long)]
    pub algorithm: Option<Algorithm>,

    /// RNG seed for reproducible runs
    #[arg(long)]
    pub seed: Option<u64>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value_t = default_log_level())]
    pub log_level: String,

    /// Columns of the empty board searched without a position file
    #[arg(long, default_value_t = default_cols())]
    pub cols: usize,

    /// Rows of the empty board searched without a position file
    #[arg(long, default_value_t = default_rows())]
    pub rows: usize,

    /// Pieces in a row needed to win
    #[arg(long, default_value_t = default_connect())]
    pub connect: usize,
}

impl Config {
    pub fn validate(&self) -> Result<()> {
        if self.simulations == 0 {
            return Err(anyhow!("simulations must be greater than 0"));
        }

        if !self.exploration_constant.is_finite() || self.exploration_constant < 0.0 {
            return Err(anyhow!(
                "exploration_constant must be a non-negative number, got {}",
                self.exploration_constant
            ));
        }

        if self.cols == 0 || self.rows == 0 || self.connect == 0 {
            return Err(anyhow!(
                "board dimensions must be positive, got {}x{} connect {}",
                self.cols,
                self.rows,
                self.connect
            ));
        }

        if self.log_level.parse::<LevelFilter>().is_err() {
            return Err(anyhow!(
                "invalid log level '{}', expected one of trace, debug, info, warn, error",
                self.log_level
            ));
        }

        Ok(())
    }

    /// Seed from the command line, then config.toml, then fresh entropy.
    pub fn seed(&self) -> u64 {
        self.seed
            .or(CENTRAL_CONFIG.search.seed)
            .unwrap_or_else(rand::random)
    }

    /// Algorithm from config.toml, used when no position file is given.
    pub fn fallback_algorithm(&self) -> Result<Algorithm> {
        let name = &CENTRAL_CONFIG.search.algorithm;
        name.parse()
            .map_err(|e| anyhow!("search.algorithm in config: {e}"))
    }

    /// Search settings for a searching algorithm.
    pub fn mcts_config(&self) -> MctsConfig {
        MctsConfig::default()
            .with_simulations(self.simulations)
            .with_exploration_constant(self.exploration_constant)
    }
}
