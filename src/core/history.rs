//! State transition history tracking.
//!
//! Records every change of the current state during a run so that the
//! path taken through the diagram can be replayed or highlighted.

use serde::{Deserialize, Serialize};

/// Record of a single state change.
///
/// # Example
///
/// ```rust
/// use automata::core::StateTransition;
///
/// let transition = StateTransition {
///     from: "Closed".to_string(),
///     to: "Opening".to_string(),
///     tick: 12,
/// };
/// assert_eq!(transition.tick, 12);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct StateTransition {
    /// The state being left
    pub from: String,
    /// The state being entered
    pub to: String,
    /// The tick at which the change happened (1-based)
    pub tick: u64,
}

/// Ordered history of state changes.
///
/// Implicit self-loops (no transition matched) are not recorded.
///
/// # Example
///
/// ```rust
/// use automata::core::{StateHistory, StateTransition};
///
/// let mut history = StateHistory::new();
/// history.push(StateTransition { from: "A".into(), to: "B".into(), tick: 1 });
/// history.push(StateTransition { from: "B".into(), to: "C".into(), tick: 4 });
///
/// assert_eq!(history.get_path(), vec!["A", "B", "C"]);
/// assert_eq!(history.ticks_spanned(), Some(3));
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StateHistory {
    transitions: Vec<StateTransition>,
}

impl StateHistory {
    pub fn new() -> Self {
        Self {
            transitions: Vec::new(),
        }
    }

    pub fn push(&mut self, transition: StateTransition) {
        self.transitions.push(transition);
    }

    pub fn clear(&mut self) {
        self.transitions.clear();
    }

    /// Get the path of states traversed.
    ///
    /// Returns the first `from` state, then the `to` state of each
    /// transition. Empty when nothing was recorded.
    pub fn get_path(&self) -> Vec<&str> {
        let mut path = Vec::new();
        if let Some(first) = self.transitions.first() {
            path.push(first.from.as_str());
        }
        for transition in &self.transitions {
            path.push(transition.to.as_str());
        }
        path
    }

    /// Number of ticks between the first and the last recorded change.
    pub fn ticks_spanned(&self) -> Option<u64> {
        match (self.transitions.first(), self.transitions.last()) {
            (Some(first), Some(last)) => Some(last.tick.saturating_sub(first.tick)),
            _ => None,
        }
    }

    pub fn transitions(&self) -> &[StateTransition] {
        &self.transitions
    }

    pub fn len(&self) -> usize {
        self.transitions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.transitions.is_empty()
    }
}
