//! Choosing a move for one position.

use std::io::Write;

use anyhow::{bail, Context, Result};
use games_connect4::{Board, Outcome, Player, Position};
use mcts::{random_move, run_mcts_observed, Algorithm, TracingObserver};
use rand::Rng;
use tracing::{debug, info};

use crate::config::Config;
use crate::report::{write_final_move, write_summary, EventPrinter};

/// Position to move from, with the algorithm that picks the move.
#[derive(Debug, Clone)]
pub struct Game {
    pub board: Board,
    pub to_move: Player,
    pub algorithm: Algorithm,
}

impl Game {
    /// Build the game from the position file, or from the configured empty
    /// board when no file is given. `--algorithm` overrides either source.
    pub fn load(config: &Config) -> Result<Self> {
        let Some(path) = &config.position else {
            let board = Board::with_dimensions(config.cols, config.rows, config.connect)?;
            let algorithm = match config.algorithm {
                Some(algorithm) => algorithm,
                None => config.fallback_algorithm()?,
            };
            return Ok(Self {
                board,
                to_move: Player::Red,
                algorithm,
            });
        };

        let position = Position::load(path, config.connect)
            .with_context(|| format!("failed to load position {}", path.display()))?;
        let algorithm = match config.algorithm {
            Some(algorithm) => algorithm,
            None => position
                .algorithm
                .parse()
                .with_context(|| format!("invalid algorithm line in {}", path.display()))?,
        };
        debug!(path = %path.display(), %algorithm, player = %position.to_move, "Loaded position");

        Ok(Self {
            board: position.board,
            to_move: position.to_move,
            algorithm,
        })
    }
}

/// Pick a column for `game` and write the report to `out`.
///
/// The board is left exactly as it was passed in.
pub fn choose_move<R, W>(game: &mut Game, config: &Config, rng: &mut R, out: &mut W) -> Result<usize>
where
    R: Rng + ?Sized,
    W: Write,
{
    match game.board.scan_outcome() {
        Some(Outcome::Win(player)) => bail!("{player} has already won this position"),
        Some(Outcome::Draw) => bail!("the board is full"),
        None => {}
    }

    let column = match game.algorithm.policy() {
        None => random_move(&game.board, rng).context("no legal moves")?,
        Some(policy) => {
            let mcts_config = config.mcts_config().with_policy(policy);
            let result = if config.verbosity.shows_events() {
                let mut printer = EventPrinter::new(&mut *out);
                let result = run_mcts_observed(
                    &mut game.board,
                    game.to_move,
                    mcts_config,
                    rng,
                    &mut printer,
                );
                printer.finish().context("failed to write search trace")?;
                result?
            } else {
                run_mcts_observed(
                    &mut game.board,
                    game.to_move,
                    mcts_config,
                    rng,
                    &mut TracingObserver,
                )?
            };

            if config.verbosity.shows_summary() {
                write_summary(out, &result)?;
            }
            result.column
        }
    };

    write_final_move(out, column)?;
    info!(algorithm = %game.algorithm, player = %game.to_move, column, "Move selected");

    Ok(column)
}
