//! connect4 - Connect Four move chooser
//!
//! Reads a position and prints the column chosen by one of:
//! 1. UR: a uniformly random legal column
//! 2. PMCGS: pure Monte Carlo game search
//! 3. UCT: Monte Carlo tree search with UCB1 selection

use std::io::{self, Write};

use anyhow::Result;
use clap::Parser;
use rand::SeedableRng;
use rand_chacha::ChaCha20Rng;
use tracing::info;

mod config;
mod play;
mod report;
mod verbosity;

use crate::config::Config;
use crate::play::{choose_move, Game};

fn init_tracing(level: &str) -> Result<()> {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    // Logs go to stderr so stdout carries only the move report
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(io::stderr))
        .with(filter)
        .init();

    Ok(())
}

fn main() -> Result<()> {
    let config = Config::parse();
    config.validate()?;

    init_tracing(&config.log_level)?;

    let seed = config.seed();
    info!(
        seed,
        simulations = config.simulations,
        verbosity = %config.verbosity,
        "connect4 starting"
    );

    let mut game = Game::load(&config)?;
    let mut rng = ChaCha20Rng::seed_from_u64(seed);

    let stdout = io::stdout();
    let mut out = io::BufWriter::new(stdout.lock());
    choose_move(&mut game, &config, &mut rng, &mut out)?;
    out.flush()?;

    Ok(())
}
