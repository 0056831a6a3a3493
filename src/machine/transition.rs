//! Guarded transitions between states.

use crate::core::{Guard, Signals};
use serde::{Deserialize, Serialize};

/// Index of a state inside its machine.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct StateId(pub(crate) usize);

impl StateId {
    pub fn index(self) -> usize {
        self.0
    }
}

/// An outgoing edge of a state.
///
/// The source is implicit: a transition lives in the ordered list of its
/// source state, and that order is the precedence between transitions.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Transition {
    pub guard: Guard,
    pub target: StateId,
}

impl Transition {
    /// Check if this transition can fire for the given sensors (pure)
    pub fn can_fire(&self, sensors: &Signals) -> bool {
        self.guard.matches(sensors)
    }
}
