//! Move selection policies.

use std::fmt;
use std::str::FromStr;

use games_connect4::Board;
use rand::Rng;
use thiserror::Error;

/// In-tree selection rule used once every legal move at a node has a child.
///
/// Expansion order and rollouts are uniform random under both policies; the
/// policies differ only in how a fully expanded node picks a child.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchPolicy {
    /// Uniform random among existing children (PMCGS)
    PureRollout,
    /// Child with the best UCB1 score for the player to move (UCT)
    Ucb,
}

/// Move selection algorithm named in position files and on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Algorithm {
    /// Uniform random legal move, no search ("UR")
    UniformRandom,
    /// Pure Monte Carlo game search ("PMCGS")
    Pmcgs,
    /// Upper confidence bounds applied to trees ("UCT")
    Uct,
}

impl Algorithm {
    /// Tree policy for searching algorithms; `None` for uniform random play.
    pub fn policy(self) -> Option<SearchPolicy> {
        match self {
            Algorithm::UniformRandom => None,
            Algorithm::Pmcgs => Some(SearchPolicy::PureRollout),
            Algorithm::Uct => Some(SearchPolicy::Ucb),
        }
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("Unknown algorithm '{0}', expected UR, PMCGS or UCT")]
pub struct UnknownAlgorithm(pub String);

impl FromStr for Algorithm {
    type Err = UnknownAlgorithm;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "UR" => Ok(Algorithm::UniformRandom),
            "PMCGS" => Ok(Algorithm::Pmcgs),
            "UCT" => Ok(Algorithm::Uct),
            _ => Err(UnknownAlgorithm(s.to_string())),
        }
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let tag = match self {
            Algorithm::UniformRandom => "UR",
            Algorithm::Pmcgs => "PMCGS",
            Algorithm::Uct => "UCT",
        };
        f.write_str(tag)
    }
}

/// Pick a legal column uniformly at random.
///
/// Returns `None` when the board has no open column.
pub fn random_move<R: Rng + ?Sized>(board: &Board, rng: &mut R) -> Option<usize> {
    let legal = board.legal_moves();
    if legal.is_empty() {
        return None;
    }
    Some(legal[rng.gen_range(0..legal.len())])
}

#[cfg(test)]
mod tests {
    use super::*;
    use games_connect4::Player;
    use rand::SeedableRng;
    use rand_chacha::ChaCha20Rng;

    #[test]
    fn test_parse_algorithm() {
        assert_eq!("UR".parse::<Algorithm>(), Ok(Algorithm::UniformRandom));
        assert_eq!("PMCGS".parse::<Algorithm>(), Ok(Algorithm::Pmcgs));
        assert_eq!("uct".parse::<Algorithm>(), Ok(Algorithm::Uct));
        assert_eq!(
            "MINIMAX".parse::<Algorithm>(),
            Err(UnknownAlgorithm("MINIMAX".to_string()))
        );
    }

    #[test]
    fn test_algorithm_display_round_trip() {
        for algorithm in [Algorithm::UniformRandom, Algorithm::Pmcgs, Algorithm::Uct] {
            assert_eq!(algorithm.to_string().parse::<Algorithm>(), Ok(algorithm));
        }
    }

    #[test]
    fn test_algorithm_policy() {
        assert_eq!(Algorithm::UniformRandom.policy(), None);
        assert_eq!(Algorithm::Pmcgs.policy(), Some(SearchPolicy::PureRollout));
        assert_eq!(Algorithm::Uct.policy(), Some(SearchPolicy::Ucb));
    }

    #[test]
    fn test_random_move_is_legal_and_covers_columns() {
        let mut board = Board::new();
        for _ in 0..board.rows() {
            board.apply_move(2, Player::Red).unwrap();
        }

        let mut rng = ChaCha20Rng::seed_from_u64(7);
        let mut counts = [0u32; 8];
        for _ in 0..700 {
            let column = random_move(&board, &mut rng).unwrap();
            counts[column] += 1;
        }

        assert_eq!(counts[0], 0);
        assert_eq!(counts[2], 0);
        for column in [1, 3, 4, 5, 6, 7] {
            assert!(counts[column] > 50, "column {column} drawn {} times", counts[column]);
        }
    }

    #[test]
    fn test_random_move_full_board() {
        let mut board = Board::with_dimensions(1, 1, 1).unwrap();
        board.apply_move(1, Player::Red).unwrap();

        let mut rng = ChaCha20Rng::seed_from_u64(0);
        assert_eq!(random_move(&board, &mut rng), None);
    }
}
