//! MCTS search implementation.
//!
//! Every simulation runs four phases against one shared board:
//! 1. Selection/Expansion: descend while every legal move has a child; the
//!    first node with an untried move gets exactly one new child
//! 2. Rollout: uniform random play to the end of the game
//! 3. Backpropagation: every node on the path gets one visit and the reward
//! 4. Restore: undo every move of the simulation in reverse order
//!
//! The board is never cloned. When `run` returns, successfully or not, the
//! board holds the same position it had on entry, last move included.

use games_connect4::{Board, BoardError, LastMove, Outcome, Player};
use rand::Rng;
use thiserror::Error;
use tracing::{debug, trace};

use crate::config::{MctsConfig, RewardPerspective};
use crate::node::NodeId;
use crate::observer::{NoopObserver, SearchEvent, SearchObserver};
use crate::policy::SearchPolicy;
use crate::tree::{SearchTree, TreeStats};

/// Errors that can occur during MCTS search.
#[derive(Debug, Error)]
pub enum SearchError {
    #[error("No legal moves available")]
    NoLegalMoves,

    #[error("No simulations were run")]
    NoSimulationsRun,

    #[error("Board error: {0}")]
    Board(#[from] BoardError),

    #[error("Invalid state: {0}")]
    InvalidState(String),
}

/// Root statistics for one column.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ColumnStat {
    /// The column was searched.
    Visited { mean: f64, visits: u32 },
    /// The column is legal but the search never tried it.
    NotVisited,
    /// The column is full.
    NotApplicable,
}

impl ColumnStat {
    /// Average reward, if the column was visited.
    pub fn mean(&self) -> Option<f64> {
        match *self {
            ColumnStat::Visited { mean, .. } => Some(mean),
            _ => None,
        }
    }

    pub fn visits(&self) -> u32 {
        match *self {
            ColumnStat::Visited { visits, .. } => visits,
            _ => 0,
        }
    }
}

/// Result of an MCTS search.
#[derive(Debug, Clone)]
pub struct SearchResult {
    /// Recommended column (1-based)
    pub column: usize,

    /// Statistics for every column, index 0 holding column 1
    pub stats: Vec<ColumnStat>,

    /// Number of simulations performed
    pub simulations: u32,

    pub tree_stats: TreeStats,
}

impl SearchResult {
    /// Statistics for `column` (1-based).
    pub fn stat(&self, column: usize) -> Option<ColumnStat> {
        column
            .checked_sub(1)
            .and_then(|index| self.stats.get(index))
            .copied()
    }
}

/// MCTS search state.
///
/// Holds the tree and exclusive access to the board for the duration of the
/// search.
pub struct MctsSearch<'a> {
    tree: SearchTree,
    board: &'a mut Board,
    config: MctsConfig,
    /// Player to move at the root, whose perspective rewards use
    player: Player,
    /// Last move of the root position, reinstated after every simulation
    root_last_move: Option<LastMove>,
    /// Candidate columns, reused by every expansion and rollout ply
    scratch: Vec<usize>,
}

impl<'a> MctsSearch<'a> {
    /// Create a new search rooted at the current position.
    ///
    /// Fails with [`SearchError::NoLegalMoves`] when the game is already
    /// over. The position is checked with a full-board scan since its last
    /// move is generally unknown.
    pub fn new(
        board: &'a mut Board,
        player: Player,
        config: MctsConfig,
    ) -> Result<Self, SearchError> {
        if board.scan_outcome().is_some() {
            return Err(SearchError::NoLegalMoves);
        }

        let root_last_move = board.last_move();
        let scratch = Vec::with_capacity(board.cols());

        Ok(Self {
            tree: SearchTree::new(),
            board,
            config,
            player,
            root_last_move,
            scratch,
        })
    }

    /// Run the configured number of simulations and pick a column.
    ///
    /// Calling `run` again continues growing the same tree.
    pub fn run<R, O>(&mut self, rng: &mut R, observer: &mut O) -> Result<SearchResult, SearchError>
    where
        R: Rng + ?Sized,
        O: SearchObserver + ?Sized,
    {
        if self.config.num_simulations == 0 {
            return Err(SearchError::NoSimulationsRun);
        }

        for _ in 0..self.config.num_simulations {
            self.simulate(rng, observer)?;
        }

        let stats = self.column_stats();
        let column = self
            .best_column(&stats)
            .ok_or(SearchError::NoSimulationsRun)?;
        let tree_stats = self.tree.stats();

        debug!(
            player = %self.player,
            policy = ?self.config.policy,
            simulations = tree_stats.root_visits,
            nodes = tree_stats.total_nodes,
            depth = tree_stats.max_depth,
            column,
            "MCTS search complete"
        );

        Ok(SearchResult {
            column,
            stats,
            simulations: tree_stats.root_visits,
            tree_stats,
        })
    }

    /// Run a single simulation (select -> expand -> rollout -> backpropagate).
    fn simulate<R, O>(&mut self, rng: &mut R, observer: &mut O) -> Result<(), SearchError>
    where
        R: Rng + ?Sized,
        O: SearchObserver + ?Sized,
    {
        let mut path = vec![self.tree.root()];
        let mut applied = Vec::new();

        let outcome = self.playout(rng, observer, &mut path, &mut applied);

        for &column in applied.iter().rev() {
            self.board.undo_move(column);
        }
        self.board.restore_last_move(self.root_last_move);

        let reward = self.reward(outcome?);
        observer.on_event(&SearchEvent::TerminalValue { reward });

        self.tree.backpropagate(&path, reward);
        for &id in path.iter().rev() {
            let node = self.tree.get(id);
            observer.on_event(&SearchEvent::Updated {
                total_reward: node.total_reward,
                visits: node.visits,
            });
        }

        trace!(
            path_len = path.len(),
            moves = applied.len(),
            reward,
            "MCTS simulation complete"
        );

        Ok(())
    }

    /// Descend the tree, expand at most one node, then roll out to the end
    /// of the game. Every applied column is recorded in `applied`.
    fn playout<R, O>(
        &mut self,
        rng: &mut R,
        observer: &mut O,
        path: &mut Vec<NodeId>,
        applied: &mut Vec<usize>,
    ) -> Result<Outcome, SearchError>
    where
        R: Rng + ?Sized,
        O: SearchObserver + ?Sized,
    {
        let mut current = self.tree.root();
        let mut mover = self.player;

        while !self.board.is_terminal() {
            let node = self.tree.get(current);
            observer.on_event(&SearchEvent::NodeStats {
                total_reward: node.total_reward,
                visits: node.visits,
            });

            self.board.fill_legal_moves(&mut self.scratch);
            self.scratch.retain(|&column| node.child(column).is_none());

            if !self.scratch.is_empty() {
                let column = self.scratch[rng.gen_range(0..self.scratch.len())];
                self.play(column, mover, applied, observer)?;
                let child = self.tree.add_child(current, column);
                observer.on_event(&SearchEvent::NodeAdded { column });
                path.push(child);
                mover = mover.opponent();
                break;
            }

            let (column, child) = self.select_in_tree(current, mover, rng, observer)?;
            self.play(column, mover, applied, observer)?;
            path.push(child);
            current = child;
            mover = mover.opponent();
        }

        while !self.board.is_terminal() {
            self.board.fill_legal_moves(&mut self.scratch);
            if self.scratch.is_empty() {
                return Err(SearchError::InvalidState(
                    "non-terminal board has no legal move".to_string(),
                ));
            }
            let column = self.scratch[rng.gen_range(0..self.scratch.len())];
            self.play(column, mover, applied, observer)?;
            mover = mover.opponent();
        }

        self.board
            .winner()
            .ok_or_else(|| SearchError::InvalidState("rollout ended before game over".to_string()))
    }

    fn play<O>(
        &mut self,
        column: usize,
        player: Player,
        applied: &mut Vec<usize>,
        observer: &mut O,
    ) -> Result<(), SearchError>
    where
        O: SearchObserver + ?Sized,
    {
        observer.on_event(&SearchEvent::MoveSelected { column });
        self.board.apply_move(column, player)?;
        applied.push(column);
        Ok(())
    }

    /// Pick a child of a fully expanded node according to the policy.
    fn select_in_tree<R, O>(
        &self,
        node_id: NodeId,
        mover: Player,
        rng: &mut R,
        observer: &mut O,
    ) -> Result<(usize, NodeId), SearchError>
    where
        R: Rng + ?Sized,
        O: SearchObserver + ?Sized,
    {
        let selected = match self.config.policy {
            SearchPolicy::PureRollout => {
                let children = &self.tree.get(node_id).children;
                (!children.is_empty()).then(|| children[rng.gen_range(0..children.len())])
            }
            SearchPolicy::Ucb => {
                let maximizing = self.config.is_maximizing(mover);
                self.tree.select_child(
                    node_id,
                    self.config.exploration_constant,
                    maximizing,
                    |column, score| observer.on_event(&SearchEvent::UcbScore { column, score }),
                )
            }
        };

        selected.ok_or_else(|| {
            SearchError::InvalidState("fully expanded node has no children".to_string())
        })
    }

    /// Convert a finished game into a reward in the configured frame.
    fn reward(&self, outcome: Outcome) -> f64 {
        let reference = match self.config.reward_perspective {
            RewardPerspective::Searcher => self.player,
            RewardPerspective::Maximizer => self.config.maximizing_player,
        };

        match outcome {
            Outcome::Draw => 0.0,
            Outcome::Win(winner) if winner == reference => 1.0,
            Outcome::Win(_) => -1.0,
        }
    }

    /// Root statistics for every column of the board.
    fn column_stats(&self) -> Vec<ColumnStat> {
        let root = self.tree.get(self.tree.root());

        (1..=self.board.cols())
            .map(|column| {
                if !self.board.is_column_open(column) {
                    return ColumnStat::NotApplicable;
                }
                root.child(column)
                    .map(|id| self.tree.get(id))
                    .and_then(|child| {
                        child.mean_value().map(|mean| ColumnStat::Visited {
                            mean,
                            visits: child.visits,
                        })
                    })
                    .unwrap_or(ColumnStat::NotVisited)
            })
            .collect()
    }

    /// Highest mean for the maximizing player, lowest otherwise. Ties go to
    /// the lowest column; unvisited columns are never chosen.
    fn best_column(&self, stats: &[ColumnStat]) -> Option<usize> {
        let maximizing = self.config.is_maximizing(self.player);
        let mut best: Option<(usize, f64)> = None;

        for (index, stat) in stats.iter().enumerate() {
            let Some(mean) = stat.mean() else {
                continue;
            };
            let better = match best {
                None => true,
                Some((_, best_mean)) if maximizing => mean > best_mean,
                Some((_, best_mean)) => mean < best_mean,
            };
            if better {
                best = Some((index + 1, mean));
            }
        }

        best.map(|(column, _)| column)
    }

    /// Get the search tree (for inspection/debugging).
    pub fn tree(&self) -> &SearchTree {
        &self.tree
    }

    /// Release the board and keep the tree.
    pub fn into_tree(self) -> SearchTree {
        self.tree
    }
}

/// Convenience function to run a single MCTS search.
pub fn run_mcts<R: Rng + ?Sized>(
    board: &mut Board,
    player: Player,
    config: MctsConfig,
    rng: &mut R,
) -> Result<SearchResult, SearchError> {
    run_mcts_observed(board, player, config, rng, &mut NoopObserver)
}

/// Run a single MCTS search, reporting every step to `observer`.
pub fn run_mcts_observed<R, O>(
    board: &mut Board,
    player: Player,
    config: MctsConfig,
    rng: &mut R,
    observer: &mut O,
) -> Result<SearchResult, SearchError>
where
    R: Rng + ?Sized,
    O: SearchObserver + ?Sized,
{
    let mut search = MctsSearch::new(board, player, config)?;
    search.run(rng, observer)
}
