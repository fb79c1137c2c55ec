//! Connect-N board for Monte Carlo search.
//!
//! Connect 4 is a two-player connection game where players drop colored discs
//! into a 7-column, 6-row vertically suspended grid. The objective is to be
//! the first to form a horizontal, vertical, or diagonal line of four discs.
//! The board here generalizes to any `cols x rows` grid and any line length.
//!
//! Unlike a value-type game state, [`Board`] is mutated in place: search code
//! applies a move, explores, and undoes it again, so a single board serves
//! thousands of simulations without copying.
//!
//! # Board Layout
//!
//! Cells are stored in row-major order, with row 0 at the bottom. Columns are
//! numbered from 1 in the public API, rows from 0:
//! ```text
//! Row 5: [35][36][37][38][39][40][41]  <- Top
//! Row 4: [28][29][30][31][32][33][34]
//! Row 3: [21][22][23][24][25][26][27]
//! Row 2: [14][15][16][17][18][19][20]
//! Row 1: [ 7][ 8][ 9][10][11][12][13]
//! Row 0: [ 0][ 1][ 2][ 3][ 4][ 5][ 6]  <- Bottom
//!         Col 1  2  3  4  5  6  7
//! ```
//!
//! # Usage
//!
//! ```rust
//! use games_connect4::{Board, Outcome, Player};
//!
//! let mut board = Board::new();
//! for column in [1, 2, 3] {
//!     board.apply_move(column, Player::Red).unwrap();
//! }
//! let row = board.apply_move(4, Player::Red).unwrap();
//! assert_eq!(row, 0);
//! assert_eq!(board.winner(), Some(Outcome::Win(Player::Red)));
//!
//! board.undo_move(4);
//! assert!(!board.is_terminal());
//! ```

use std::fmt;
use thiserror::Error;

pub mod position;

pub use position::{load_position, parse_position, Position, PositionError};

/// Standard board dimensions
pub const COLS: usize = 7;
pub const ROWS: usize = 6;
/// Line length needed to win
pub const CONNECT: usize = 4;

/// Direction vectors: horizontal, vertical, diagonal /, diagonal \
const DIRECTIONS: [(isize, isize); 4] = [(1, 0), (0, 1), (1, 1), (1, -1)];

/// One of the two players.
///
/// The numeric values (Red = 1, Yellow = 2) are the conventional encoding:
/// the opponent of `p` is `3 - p`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Player {
    /// First player (PlayerA)
    Red = 1,
    /// Second player (PlayerB)
    Yellow = 2,
}

impl Player {
    /// Numeric encoding of the player (1 or 2).
    #[inline]
    pub fn value(self) -> u8 {
        self as u8
    }

    /// Decode a player from its numeric value.
    pub fn from_value(value: u8) -> Option<Self> {
        match value {
            1 => Some(Player::Red),
            2 => Some(Player::Yellow),
            _ => None,
        }
    }

    #[inline]
    pub fn opponent(self) -> Self {
        match self {
            Player::Red => Player::Yellow,
            Player::Yellow => Player::Red,
        }
    }

    /// Single-character symbol used by the position format and rendering.
    pub fn symbol(self) -> char {
        match self {
            Player::Red => 'R',
            Player::Yellow => 'Y',
        }
    }

    pub fn from_symbol(symbol: char) -> Option<Self> {
        match symbol {
            'R' => Some(Player::Red),
            'Y' => Some(Player::Yellow),
            _ => None,
        }
    }
}

impl fmt::Display for Player {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Player::Red => write!(f, "Red"),
            Player::Yellow => write!(f, "Yellow"),
        }
    }
}

/// Final result of a finished game.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Win(Player),
    Draw,
}

/// The most recently applied move.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LastMove {
    /// Column (1-based)
    pub column: usize,
    /// Row the piece landed on (0 = bottom)
    pub row: usize,
    pub player: Player,
}

/// Errors raised by board operations.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum BoardError {
    #[error("Illegal move: column {column} is full or outside 1..={cols}")]
    IllegalMove { column: usize, cols: usize },

    #[error("Invalid board dimensions: {cols}x{rows}, connect {connect}")]
    InvalidDimensions {
        cols: usize,
        rows: usize,
        connect: usize,
    },

    #[error("Floating piece in column {column} at row {row}")]
    FloatingPiece { column: usize, row: usize },
}

/// Mutable Connect-N board.
///
/// Invariants:
/// - `heights[c]` equals the number of pieces in column `c`, and every cell
///   at or above that height is empty (no floating pieces).
/// - `last_move` is set by [`Board::apply_move`] and cleared by
///   [`Board::undo_move`].
///
/// Equality compares the position (dimensions and pieces) only; the
/// `last_move` bookkeeping is history, not position.
#[derive(Debug, Clone)]
pub struct Board {
    cols: usize,
    rows: usize,
    connect: usize,
    /// Row-major cells with row 0 at the bottom
    cells: Vec<Option<Player>>,
    /// Number of pieces in each column (0-based column index)
    heights: Vec<usize>,
    last_move: Option<LastMove>,
}

impl Board {
    /// Create an empty standard 7x6 connect-four board.
    pub fn new() -> Self {
        Self::empty(COLS, ROWS, CONNECT)
    }

    /// Create an empty board with custom dimensions.
    pub fn with_dimensions(cols: usize, rows: usize, connect: usize) -> Result<Self, BoardError> {
        if cols == 0 || rows == 0 || connect == 0 {
            return Err(BoardError::InvalidDimensions {
                cols,
                rows,
                connect,
            });
        }
        Ok(Self::empty(cols, rows, connect))
    }

    fn empty(cols: usize, rows: usize, connect: usize) -> Self {
        Self {
            cols,
            rows,
            connect,
            cells: vec![None; cols * rows],
            heights: vec![0; cols],
            last_move: None,
        }
    }

    /// Build a board from an explicit grid.
    ///
    /// `grid[c][r]` is the cell in column `c + 1`, row `r` (row 0 at the
    /// bottom). Every column must have `rows` entries and obey gravity. The
    /// resulting board has no last move; use [`Board::scan_winner`] to find
    /// an existing line.
    pub fn from_columns(grid: &[Vec<Option<Player>>], connect: usize) -> Result<Self, BoardError> {
        let cols = grid.len();
        let rows = grid.first().map_or(0, Vec::len);
        let mut board = Self::with_dimensions(cols, rows, connect)?;

        for (col, cells) in grid.iter().enumerate() {
            if cells.len() != rows {
                return Err(BoardError::InvalidDimensions {
                    cols,
                    rows: cells.len(),
                    connect,
                });
            }

            let height = cells.iter().take_while(|cell| cell.is_some()).count();
            if let Some(row) = cells[height..].iter().position(Option::is_some) {
                return Err(BoardError::FloatingPiece {
                    column: col + 1,
                    row: height + row,
                });
            }

            for (row, cell) in cells.iter().enumerate().take(height) {
                board.cells[row * cols + col] = *cell;
            }
            board.heights[col] = height;
        }

        Ok(board)
    }

    #[inline]
    pub fn cols(&self) -> usize {
        self.cols
    }

    #[inline]
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Line length needed to win.
    #[inline]
    pub fn connect(&self) -> usize {
        self.connect
    }

    /// Convert a 0-based column index and row to a cell index
    #[inline]
    fn pos(&self, col: usize, row: usize) -> usize {
        row * self.cols + col
    }

    /// Piece at `column` (1-based) and `row` (0 = bottom), if any.
    pub fn cell(&self, column: usize, row: usize) -> Option<Player> {
        if column == 0 || column > self.cols || row >= self.rows {
            return None;
        }
        self.cells[self.pos(column - 1, row)]
    }

    /// Number of pieces in `column` (1-based). Out-of-range columns report 0.
    pub fn height(&self, column: usize) -> usize {
        column
            .checked_sub(1)
            .and_then(|col| self.heights.get(col))
            .copied()
            .unwrap_or(0)
    }

    /// Total number of pieces on the board.
    pub fn move_count(&self) -> usize {
        self.heights.iter().sum()
    }

    pub fn last_move(&self) -> Option<LastMove> {
        self.last_move
    }

    /// Put back a last move recorded before a sequence of undos.
    ///
    /// `undo_move` forgets the last move, so a caller that rewinds the board
    /// to an earlier position uses this to reinstate what that position had.
    pub fn restore_last_move(&mut self, last_move: Option<LastMove>) {
        self.last_move = last_move;
    }

    /// Whether a piece can be dropped into `column` (1-based).
    #[inline]
    pub fn is_column_open(&self, column: usize) -> bool {
        column >= 1 && column <= self.cols && self.heights[column - 1] < self.rows
    }

    /// Drop a piece for `player` into `column` (1-based).
    ///
    /// Returns the row the piece landed on.
    pub fn apply_move(&mut self, column: usize, player: Player) -> Result<usize, BoardError> {
        if !self.is_column_open(column) {
            return Err(BoardError::IllegalMove {
                column,
                cols: self.cols,
            });
        }

        let col = column - 1;
        let row = self.heights[col];
        let pos = self.pos(col, row);
        self.cells[pos] = Some(player);
        self.heights[col] += 1;
        self.last_move = Some(LastMove {
            column,
            row,
            player,
        });

        Ok(row)
    }

    /// Remove the top piece of `column` (1-based).
    ///
    /// Must only reverse the most recent `apply_move` into that column, in
    /// LIFO order with respect to all other moves. The board does not check
    /// the ordering. Undoing an empty column is a bookkeeping bug and trips a
    /// debug assertion; release builds leave the board untouched.
    pub fn undo_move(&mut self, column: usize) {
        debug_assert!(
            column >= 1 && column <= self.cols,
            "undo column {column} out of range"
        );
        let col = column - 1;
        debug_assert!(self.heights[col] > 0, "undo underflow in column {column}");

        let Some(row) = self.heights[col].checked_sub(1) else {
            return;
        };
        let pos = self.pos(col, row);
        self.cells[pos] = None;
        self.heights[col] = row;
        self.last_move = None;
    }

    /// Open columns, left to right (1-based).
    pub fn legal_moves(&self) -> Vec<usize> {
        (1..=self.cols)
            .filter(|&column| self.heights[column - 1] < self.rows)
            .collect()
    }

    /// Like [`Board::legal_moves`], but writes into `out` after clearing it.
    pub fn fill_legal_moves(&self, out: &mut Vec<usize>) {
        out.clear();
        out.extend((1..=self.cols).filter(|&column| self.heights[column - 1] < self.rows));
    }

    pub fn is_full(&self) -> bool {
        self.heights.iter().all(|&h| h >= self.rows)
    }

    /// Winner created by the last applied move, if any.
    ///
    /// Only the four lines through the last move are examined.
    pub fn winner_at_last_move(&self) -> Option<Player> {
        let last = self.last_move?;
        let col = last.column - 1;

        DIRECTIONS
            .iter()
            .any(|&(dc, dr)| {
                let count = 1
                    + self.run_length(col, last.row, dc, dr, last.player)
                    + self.run_length(col, last.row, -dc, -dr, last.player);
                count >= self.connect
            })
            .then_some(last.player)
    }

    /// Count contiguous `player` pieces starting one step away from
    /// (col, row) in direction (dc, dr).
    fn run_length(&self, col: usize, row: usize, dc: isize, dr: isize, player: Player) -> usize {
        let mut count = 0;
        let (mut c, mut r) = (col as isize + dc, row as isize + dr);
        while c >= 0 && c < self.cols as isize && r >= 0 && r < self.rows as isize {
            if self.cells[self.pos(c as usize, r as usize)] != Some(player) {
                break;
            }
            count += 1;
            c += dc;
            r += dr;
        }
        count
    }

    /// Game over by a line through the last move or a full board.
    pub fn is_terminal(&self) -> bool {
        self.winner_at_last_move().is_some() || self.is_full()
    }

    /// Result of the game, or `None` while it is still in progress.
    pub fn winner(&self) -> Option<Outcome> {
        if let Some(player) = self.winner_at_last_move() {
            Some(Outcome::Win(player))
        } else if self.is_full() {
            Some(Outcome::Draw)
        } else {
            None
        }
    }

    /// Scan the whole board for a winning line.
    ///
    /// For positions loaded from outside where the last move is unknown.
    /// Lines are checked row by row from the bottom-left; if both players
    /// somehow have a line, the first one found is returned.
    pub fn scan_winner(&self) -> Option<Player> {
        for row in 0..self.rows {
            for col in 0..self.cols {
                let Some(player) = self.cells[self.pos(col, row)] else {
                    continue;
                };
                let wins = DIRECTIONS
                    .iter()
                    .any(|&(dc, dr)| 1 + self.run_length(col, row, dc, dr, player) >= self.connect);
                if wins {
                    return Some(player);
                }
            }
        }
        None
    }

    /// Like [`Board::winner`], but finds lines with a full scan.
    pub fn scan_outcome(&self) -> Option<Outcome> {
        if let Some(player) = self.scan_winner() {
            Some(Outcome::Win(player))
        } else if self.is_full() {
            Some(Outcome::Draw)
        } else {
            None
        }
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

impl PartialEq for Board {
    fn eq(&self, other: &Self) -> bool {
        self.cols == other.cols
            && self.rows == other.rows
            && self.connect == other.connect
            && self.heights == other.heights
            && self.cells == other.cells
    }
}

impl Eq for Board {}

/// Renders rows top to bottom using `O` for empty, `R` and `Y` for pieces.
impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in (0..self.rows).rev() {
            for col in 0..self.cols {
                let symbol = self.cells[self.pos(col, row)].map_or('O', Player::symbol);
                write!(f, "{symbol}")?;
            }
            if row > 0 {
                writeln!(f)?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests;
