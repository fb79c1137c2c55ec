//! Monte Carlo Tree Search (MCTS) for Connect-N.
//!
//! This crate searches a [`games_connect4::Board`] in place: every simulation
//! applies its moves to the caller's board and undoes them before the next
//! one starts, so the search never copies positions.
//!
//! # Overview
//!
//! Each simulation consists of four phases:
//!
//! 1. **Selection**: Descend through fully expanded nodes. Pure rollout
//!    search (PMCGS) picks a random child; UCT picks the best UCB1 score for
//!    the player to move
//! 2. **Expansion**: At the first node with an untried legal move, add one
//!    child for a uniformly chosen untried move
//! 3. **Rollout**: Play uniform random moves until the game ends
//! 4. **Backpropagation**: Add one visit and the terminal reward to every
//!    node on the path, then undo every move of the simulation
//!
//! # Usage
//!
//! ```rust
//! use games_connect4::{Board, Player};
//! use mcts::{run_mcts, MctsConfig};
//! use rand::SeedableRng;
//! use rand_chacha::ChaCha20Rng;
//!
//! let mut board = Board::new();
//! let config = MctsConfig::uct().with_simulations(200);
//! let mut rng = ChaCha20Rng::seed_from_u64(42);
//!
//! let result = run_mcts(&mut board, Player::Red, config, &mut rng).unwrap();
//! assert!((1..=7).contains(&result.column));
//! assert_eq!(board, Board::new());
//! ```
//!
//! # Configuration
//!
//! The [`MctsConfig`] struct controls search behavior:
//!
//! - `num_simulations`: Number of simulations per search (default: 500)
//! - `policy`: [`SearchPolicy::PureRollout`] or [`SearchPolicy::Ucb`]
//! - `exploration_constant`: C in the UCB1 formula (default: 1.41)
//! - `reward_perspective`: Which player a +1 reward stands for
//!
//! # Observers
//!
//! Every step of a simulation can be reported to a [`SearchObserver`] as a
//! [`SearchEvent`]. Observers never touch the board or the random source.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                         MctsSearch                          │
//! ├─────────────────────────────────────────────────────────────┤
//! │  ┌─────────────┐  ┌─────────────┐  ┌─────────────────────┐  │
//! │  │ SearchTree  │  │    Board    │  │   SearchObserver    │  │
//! │  │  (arena)    │  │ (do / undo) │  │  (event stream)     │  │
//! │  └──────┬──────┘  └──────┬──────┘  └──────────┬──────────┘  │
//! │         │                │                    │             │
//! │         ▼                ▼                    ▼             │
//! │  ┌───────────────────────────────────────────────────────┐  │
//! │  │        select → expand → rollout → backpropagate      │  │
//! │  │                     → restore board                   │  │
//! │  └───────────────────────────────────────────────────────┘  │
//! └─────────────────────────────────────────────────────────────┘
//! ```

pub mod config;
pub mod node;
pub mod observer;
pub mod policy;
pub mod search;
pub mod tree;
pub mod ucb;

// Re-export main types
pub use config::{MctsConfig, RewardPerspective, DEFAULT_EXPLORATION_CONSTANT, MAXIMIZING_PLAYER};
pub use node::{NodeId, SearchNode};
pub use observer::{NoopObserver, SearchEvent, SearchObserver, TracingObserver};
pub use policy::{random_move, Algorithm, SearchPolicy, UnknownAlgorithm};
pub use search::{
    run_mcts, run_mcts_observed, ColumnStat, MctsSearch, SearchError, SearchResult,
};
pub use tree::{SearchTree, TreeStats};
pub use ucb::ucb1;
