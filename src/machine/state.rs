//! States of a Mealy machine.

use super::transition::{StateId, Transition};
use crate::core::{Output, Signals};

/// A state: its actuator output and its ordered outgoing transitions.
///
/// States are immutable once the machine is built.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct State {
    id: String,
    output: Output,
    transitions: Vec<Transition>,
}

impl State {
    pub(crate) fn new(id: String, output: Output, transitions: Vec<Transition>) -> Self {
        Self {
            id,
            output,
            transitions,
        }
    }

    /// Identifier unique within the machine
    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn output(&self) -> &Output {
        &self.output
    }

    /// Outgoing transitions in precedence order
    pub fn transitions(&self) -> &[Transition] {
        &self.transitions
    }

    /// First transition whose guard matches, if any (pure).
    pub fn select(&self, sensors: &Signals) -> Option<StateId> {
        self.transitions
            .iter()
            .find(|t| t.can_fire(sensors))
            .map(|t| t.target)
    }
}
