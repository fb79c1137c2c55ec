//! Diagnostic event stream for a running search.
//!
//! Observers only receive copies of search data. They never see the board or
//! the random source, so attaching one cannot change what the search does.

use std::fmt;

use tracing::debug;

/// One step of a simulation, in the order it happened.
#[derive(Debug, Clone, PartialEq)]
pub enum SearchEvent {
    /// Statistics of the node about to choose a move.
    NodeStats { total_reward: f64, visits: u32 },
    /// UCB1 score of one candidate child (UCT only).
    UcbScore { column: usize, score: f64 },
    /// A move was chosen and applied, in the tree or during the rollout.
    MoveSelected { column: usize },
    /// A new node was added for `column`.
    NodeAdded { column: usize },
    /// The playout ended with this reward.
    TerminalValue { reward: f64 },
    /// Statistics of one path node after backpropagation, leaf first.
    Updated { total_reward: f64, visits: u32 },
}

/// Renders events in the classic verbose trace format.
impl fmt::Display for SearchEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SearchEvent::NodeStats {
                total_reward,
                visits,
            } => write!(f, "wi: {total_reward}\nni: {visits}"),
            SearchEvent::UcbScore { column, score } => write!(f, "V{column}: {score:.2}"),
            SearchEvent::MoveSelected { column } => write!(f, "Move selected: {column}"),
            SearchEvent::NodeAdded { .. } => write!(f, "NODE ADDED"),
            SearchEvent::TerminalValue { reward } => write!(f, "TERMINAL NODE VALUE: {reward}"),
            SearchEvent::Updated {
                total_reward,
                visits,
            } => write!(f, "Updated values:\nwi: {total_reward}\nni: {visits}"),
        }
    }
}

/// Receiver of search events.
pub trait SearchObserver {
    fn on_event(&mut self, event: &SearchEvent);
}

/// Discards every event.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopObserver;

impl SearchObserver for NoopObserver {
    #[inline]
    fn on_event(&mut self, _event: &SearchEvent) {}
}

/// Forwards events to `tracing` at debug level.
///
/// The player attaches this below verbose output, so `RUST_LOG=mcts=debug`
/// shows the same stream on stderr.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingObserver;

impl SearchObserver for TracingObserver {
    fn on_event(&mut self, event: &SearchEvent) {
        debug!(?event, "search event");
    }
}

/// Collects events, mostly for tests.
impl SearchObserver for Vec<SearchEvent> {
    fn on_event(&mut self, event: &SearchEvent) {
        self.push(event.clone());
    }
}

impl<O: SearchObserver + ?Sized> SearchObserver for &mut O {
    fn on_event(&mut self, event: &SearchEvent) {
        (**self).on_event(event);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_text() {
        let stats = SearchEvent::NodeStats {
            total_reward: -3.0,
            visits: 7,
        };
        assert_eq!(stats.to_string(), "wi: -3\nni: 7");

        let score = SearchEvent::UcbScore {
            column: 4,
            score: 0.756,
        };
        assert_eq!(score.to_string(), "V4: 0.76");

        let selected = SearchEvent::MoveSelected { column: 2 };
        assert_eq!(selected.to_string(), "Move selected: 2");
        assert_eq!(SearchEvent::NodeAdded { column: 2 }.to_string(), "NODE ADDED");
        assert_eq!(
            SearchEvent::TerminalValue { reward: 1.0 }.to_string(),
            "TERMINAL NODE VALUE: 1"
        );
        assert_eq!(
            SearchEvent::Updated {
                total_reward: 1.0,
                visits: 1
            }
            .to_string(),
            "Updated values:\nwi: 1\nni: 1"
        );
    }

    #[test]
    fn test_vec_observer_collects() {
        fn feed<O: SearchObserver>(mut observer: O) {
            observer.on_event(&SearchEvent::TerminalValue { reward: 0.0 });
        }

        let mut events: Vec<SearchEvent> = Vec::new();
        events.on_event(&SearchEvent::NodeAdded { column: 1 });
        feed(&mut events);
        assert_eq!(
            events,
            vec![
                SearchEvent::NodeAdded { column: 1 },
                SearchEvent::TerminalValue { reward: 0.0 }
            ]
        );
    }
}
