//! Text position format.
//!
//! ```text
//! UCT        <- algorithm tag (UR, PMCGS or UCT), interpreted by the caller
//! R          <- player to move: R or Y
//! OOOOOOO    <- top row
//! OOOOOOO
//! OOOOOOO
//! OOOOOOO
//! OOYOOOO
//! ORRYOOO    <- bottom row
//! ```
//!
//! Empty cells are `O` (or `0`). Board dimensions come from the rows
//! themselves, so any `cols x rows` grid is accepted as long as every row has
//! the same width and pieces obey gravity.

use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::{Board, BoardError, Player, CONNECT};

/// Errors from reading a position.
#[derive(Debug, Error)]
pub enum PositionError {
    #[error("Failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Position is missing the {0} line")]
    MissingLine(&'static str),

    #[error("Unknown player '{0}', expected R or Y")]
    UnknownPlayer(String),

    #[error("Row {line} has {actual} cells, expected {expected}")]
    RowWidth {
        line: usize,
        expected: usize,
        actual: usize,
    },

    #[error("Unknown cell '{cell}' on line {line}")]
    UnknownCell { line: usize, cell: char },

    #[error(transparent)]
    Board(#[from] BoardError),
}

/// A parsed position file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Position {
    /// Algorithm tag from the first line, as written
    pub algorithm: String,
    pub to_move: Player,
    pub board: Board,
}

/// Parse a position with the standard line length of four.
pub fn parse_position(text: &str) -> Result<Position, PositionError> {
    Position::parse(text, CONNECT)
}

/// Read and parse a position file with the standard line length of four.
pub fn load_position(path: impl AsRef<Path>) -> Result<Position, PositionError> {
    Position::load(path, CONNECT)
}

impl Position {
    /// Read and parse a position file whose winning line length is `connect`.
    pub fn load(path: impl AsRef<Path>, connect: usize) -> Result<Self, PositionError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| PositionError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(&text, connect)
    }

    /// Parse a position whose winning line length is `connect`.
    pub fn parse(text: &str, connect: usize) -> Result<Self, PositionError> {
        let mut lines = text.lines().map(str::trim).enumerate();

        let (_, algorithm) = lines.next().ok_or(PositionError::MissingLine("algorithm"))?;
        if algorithm.is_empty() {
            return Err(PositionError::MissingLine("algorithm"));
        }

        let (_, player) = lines.next().ok_or(PositionError::MissingLine("player"))?;
        let to_move = match player.chars().collect::<Vec<_>>().as_slice() {
            [symbol] => Player::from_symbol(*symbol),
            _ => None,
        }
        .ok_or_else(|| PositionError::UnknownPlayer(player.to_string()))?;

        let rows: Vec<(usize, &str)> = lines.filter(|(_, line)| !line.is_empty()).collect();
        let Some(&(_, top)) = rows.first() else {
            return Err(PositionError::MissingLine("board"));
        };
        let cols = top.chars().count();

        // Lines run top to bottom; the grid is indexed [column][row from bottom].
        let mut grid = vec![vec![None; rows.len()]; cols];
        for (offset, &(index, line)) in rows.iter().enumerate() {
            let line_number = index + 1;
            let width = line.chars().count();
            if width != cols {
                return Err(PositionError::RowWidth {
                    line: line_number,
                    expected: cols,
                    actual: width,
                });
            }

            let row = rows.len() - 1 - offset;
            for (col, cell) in line.chars().enumerate() {
                grid[col][row] = match cell {
                    'O' | '0' => None,
                    other => Some(Player::from_symbol(other).ok_or(PositionError::UnknownCell {
                        line: line_number,
                        cell: other,
                    })?),
                };
            }
        }

        let board = Board::from_columns(&grid, connect)?;

        Ok(Self {
            algorithm: algorithm.to_string(),
            to_move,
            board,
        })
    }

    /// Render back into the text format.
    pub fn to_text(&self) -> String {
        format!("{}\n{}\n{}\n", self.algorithm, self.to_move.symbol(), self.board)
    }
}
