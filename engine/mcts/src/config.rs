//! MCTS configuration parameters.

use games_connect4::Player;

use crate::policy::SearchPolicy;

/// Exploration constant for UCB1 (roughly sqrt(2)).
pub const DEFAULT_EXPLORATION_CONSTANT: f64 = 1.41;

/// Player whose objective is to maximize the accumulated reward.
///
/// UCB selection adds the exploration term for this player and subtracts it
/// for the other; root selection picks the highest mean for this player and
/// the lowest for the other.
pub const MAXIMIZING_PLAYER: Player = Player::Yellow;

/// Frame in which terminal results are converted into rewards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RewardPerspective {
    /// +1 when the player who started the search wins, -1 when the opponent
    /// wins. Fixed for the whole search, independent of whose turn it is at
    /// each node.
    #[default]
    Searcher,
    /// +1 when the maximizing player wins, -1 when the other player wins.
    Maximizer,
}

/// Configuration for Monte Carlo Tree Search.
#[derive(Debug, Clone)]
pub struct MctsConfig {
    /// Number of simulations to run per search.
    pub num_simulations: u32,

    /// In-tree selection rule once a node is fully expanded.
    pub policy: SearchPolicy,

    /// Exploration constant C in the UCB1 formula.
    pub exploration_constant: f64,

    /// Player treated as the reward maximizer.
    pub maximizing_player: Player,

    /// Reference frame for terminal rewards.
    pub reward_perspective: RewardPerspective,
}

impl Default for MctsConfig {
    fn default() -> Self {
        Self {
            num_simulations: 500,
            policy: SearchPolicy::Ucb,
            exploration_constant: DEFAULT_EXPLORATION_CONSTANT,
            maximizing_player: MAXIMIZING_PLAYER,
            reward_perspective: RewardPerspective::Searcher,
        }
    }
}

impl MctsConfig {
    /// Pure random rollouts with uniform in-tree selection (PMCGS).
    pub fn pure_rollout() -> Self {
        Self::default().with_policy(SearchPolicy::PureRollout)
    }

    /// UCB1-guided selection (UCT).
    pub fn uct() -> Self {
        Self::default().with_policy(SearchPolicy::Ucb)
    }

    /// Create a fast config for testing.
    pub fn for_testing() -> Self {
        Self::default().with_simulations(50)
    }

    /// Builder pattern: set number of simulations.
    pub fn with_simulations(mut self, n: u32) -> Self {
        self.num_simulations = n;
        self
    }

    /// Builder pattern: set the in-tree selection policy.
    pub fn with_policy(mut self, policy: SearchPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Builder pattern: set the UCB1 exploration constant.
    pub fn with_exploration_constant(mut self, c: f64) -> Self {
        self.exploration_constant = c;
        self
    }

    /// Builder pattern: set the reward frame.
    pub fn with_reward_perspective(mut self, perspective: RewardPerspective) -> Self {
        self.reward_perspective = perspective;
        self
    }

    /// Whether `player` maximizes the reward under this configuration.
    #[inline]
    pub fn is_maximizing(&self, player: Player) -> bool {
        player == self.maximizing_player
    }
}
