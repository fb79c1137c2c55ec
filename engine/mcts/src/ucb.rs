//! UCB1 scoring for in-tree selection.

/// UCB1 score of a child as seen by the player to move at its parent.
///
/// `score = mean ± c * sqrt(ln(parent_visits) / child_visits)`, adding the
/// exploration term when the player to move maximizes reward and subtracting
/// it when they minimize. An unvisited child scores `+inf` for a maximizer
/// and `-inf` for a minimizer so it is always tried first.
#[inline]
pub fn ucb1(
    child_total_reward: f64,
    child_visits: u32,
    parent_visits: u32,
    exploration_constant: f64,
    maximizing: bool,
) -> f64 {
    if child_visits == 0 {
        return if maximizing {
            f64::INFINITY
        } else {
            f64::NEG_INFINITY
        };
    }

    let visits = f64::from(child_visits);
    let mean = child_total_reward / visits;
    let exploration = exploration_constant * (f64::from(parent_visits).ln() / visits).sqrt();

    if maximizing {
        mean + exploration
    } else {
        mean - exploration
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unvisited_child() {
        assert_eq!(ucb1(0.0, 0, 10, 1.41, true), f64::INFINITY);
        assert_eq!(ucb1(0.0, 0, 10, 1.41, false), f64::NEG_INFINITY);
    }

    #[test]
    fn test_maximizing_adds_exploration() {
        // mean 0.5, exploration 1.41 * sqrt(ln(100) / 10)
        let expected = 0.5 + 1.41 * (100f64.ln() / 10.0).sqrt();
        let score = ucb1(5.0, 10, 100, 1.41, true);
        assert!((score - expected).abs() < 1e-12);
        assert!((score - 1.4568).abs() < 1e-3);
    }

    #[test]
    fn test_minimizing_subtracts_exploration() {
        let expected = 0.5 - 1.41 * (100f64.ln() / 10.0).sqrt();
        let score = ucb1(5.0, 10, 100, 1.41, false);
        assert!((score - expected).abs() < 1e-12);
    }

    #[test]
    fn test_single_parent_visit_has_no_exploration() {
        // ln(1) = 0
        assert!((ucb1(-1.0, 1, 1, 1.41, true) - (-1.0)).abs() < 1e-12);
        assert!((ucb1(-1.0, 1, 1, 1.41, false) - (-1.0)).abs() < 1e-12);
    }

    #[test]
    fn test_fewer_visits_explore_more() {
        let rare = ucb1(0.0, 2, 50, 1.41, true);
        let common = ucb1(0.0, 20, 50, 1.41, true);
        assert!(rare > common);
    }
}
