//! Builder for constructing state machines.

use crate::builder::diagram::{Diagram, StateNode};
use crate::builder::error::{BuildError, DiagramError};
use crate::builder::transition::TransitionBuilder;
use crate::machine::StateMachine;

/// Builder for constructing state machines with a fluent API.
///
/// Transitions leaving the same state keep the order in which they were
/// added; that order is their precedence.
///
/// # Example
///
/// ```rust
/// use automata::builder::{StateMachineBuilder, TransitionBuilder};
///
/// let machine = StateMachineBuilder::new()
///     .sensors(1)
///     .actuators(1)
///     .state("Off", "0")
///     .state("On", "1")
///     .initial("Off")
///     .transition(TransitionBuilder::new().from("Off").to("On").when("1"))
///     .transition(TransitionBuilder::new().from("On").to("Off").when("0"))
///     .build()
///     .unwrap();
///
/// assert_eq!(machine.states().len(), 2);
/// ```
#[derive(Clone, Debug, Default)]
pub struct StateMachineBuilder {
    sensor_count: usize,
    actuator_count: usize,
    initial: Option<String>,
    diagram: Diagram,
    errors: Vec<BuildError>,
}

impl StateMachineBuilder {
    /// Create a new builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of sensors every guard must cover.
    pub fn sensors(mut self, count: usize) -> Self {
        self.sensor_count = count;
        self
    }

    /// Number of actuators every output must cover.
    pub fn actuators(mut self, count: usize) -> Self {
        self.actuator_count = count;
        self
    }

    /// Add a state with its output pattern.
    pub fn state(mut self, id: impl Into<String>, output: impl Into<String>) -> Self {
        self.diagram.states.push(StateNode {
            id: id.into(),
            output: output.into(),
            initial: false,
        });
        self
    }

    /// Set the initial state (required).
    pub fn initial(mut self, id: impl Into<String>) -> Self {
        self.initial = Some(id.into());
        self
    }

    /// Add a transition using a builder.
    /// Builder errors are reported by `build()` along with the others.
    pub fn transition(mut self, builder: TransitionBuilder) -> Self {
        match builder.build() {
            Ok(mut edge) => {
                let order = u32::try_from(self.diagram.transitions.len()).unwrap_or(u32::MAX);
                edge.order = Some(order);
                self.diagram.transitions.push(edge);
            }
            Err(error) => self.errors.push(error),
        }
        self
    }

    /// Add multiple transitions at once.
    pub fn transitions(self, builders: impl IntoIterator<Item = TransitionBuilder>) -> Self {
        builders
            .into_iter()
            .fold(self, |builder, transition| builder.transition(transition))
    }

    /// The diagram assembled so far, with the initial state marked.
    pub fn diagram(&self) -> Diagram {
        let mut diagram = self.diagram.clone();
        if let Some(initial) = &self.initial {
            // Only the first state with this id is marked
            if let Some(node) = diagram.states.iter_mut().find(|s| &s.id == initial) {
                node.initial = true;
            }
        }
        diagram
    }

    /// Build the state machine.
    /// Returns every structural error found if the machine is invalid.
    pub fn build(self) -> Result<StateMachine, DiagramError> {
        let diagram = self.diagram();
        let unknown_initial = self
            .initial
            .clone()
            .filter(|id| !diagram.states.iter().any(|s| &s.id == id));

        let mut errors = self.errors;
        match diagram.validate(self.sensor_count, self.actuator_count) {
            Ok(machine) if errors.is_empty() => return Ok(machine),
            Ok(_) => {}
            Err(rejected) => errors.extend(rejected.errors),
        }

        if let Some(id) = unknown_initial {
            errors.retain(|e| *e != BuildError::MissingInitialState);
            errors.push(BuildError::UnknownInitialState { id });
        }
        Err(DiagramError { errors })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder_validates_initial_state() {
        let result = StateMachineBuilder::new()
            .actuators(1)
            .state("A", "0")
            .build();

        let error = result.unwrap_err();
        assert_eq!(error.errors, vec![BuildError::MissingInitialState]);
    }

    #[test]
    fn unknown_initial_state_is_reported() {
        let error = StateMachineBuilder::new()
            .actuators(1)
            .state("A", "0")
            .initial("Z")
            .build()
            .unwrap_err();

        assert_eq!(
            error.errors,
            vec![BuildError::UnknownInitialState {
                id: "Z".to_string()
            }]
        );
    }

    #[test]
    fn builder_errors_are_accumulated() {
        let error = StateMachineBuilder::new()
            .sensors(1)
            .actuators(1)
            .state("A", "0")
            .initial("A")
            .transition(TransitionBuilder::new().from("A").when("1"))
            .transition(TransitionBuilder::new().from("A").to("B").when("1"))
            .build()
            .unwrap_err();

        assert_eq!(error.errors.len(), 2);
        assert_eq!(error.errors[0], BuildError::MissingToState);
        assert!(matches!(error.errors[1], BuildError::UnknownTarget { .. }));
    }

    #[test]
    fn machine_without_transitions_is_valid() {
        let machine = StateMachineBuilder::new()
            .sensors(2)
            .actuators(1)
            .state("Only", "1")
            .initial("Only")
            .build();

        assert!(machine.is_ok());
    }

    #[test]
    fn transitions_get_increasing_order() {
        let diagram = StateMachineBuilder::new()
            .sensors(1)
            .actuators(1)
            .state("A", "0")
            .state("B", "1")
            .initial("A")
            .transitions(vec![
                TransitionBuilder::new().from("A").to("B").when("1"),
                TransitionBuilder::new().from("B").to("A").when("0"),
            ])
            .diagram();

        let orders: Vec<_> = diagram.transitions.iter().map(|t| t.order).collect();
        assert_eq!(orders, vec![Some(0), Some(1)]);
        assert!(diagram.states[0].initial);
        assert!(!diagram.states[1].initial);
    }
}
