//! Authoring and validation of state machines.
//!
//! Machines come either from the editor as a serialized [`Diagram`] or
//! from code through the fluent [`StateMachineBuilder`]. Both paths go
//! through the same validation, which reports every structural error at
//! once: dangling transitions, missing or duplicated initial states,
//! invalid symbols and pattern lengths that do not fit the world.

pub mod diagram;
pub mod error;
pub mod machine;
pub mod transition;

pub use diagram::{Diagram, StateNode, TransitionEdge};
pub use error::{BuildError, DiagramError, LoadError, PatternKind};
pub use machine::StateMachineBuilder;
pub use transition::TransitionBuilder;

/// Create a transition that fires on any sensor vector.
///
/// # Example
///
/// ```
/// use automata::builder::{always, StateMachineBuilder};
///
/// let machine = StateMachineBuilder::new()
///     .sensors(2)
///     .actuators(1)
///     .state("Tick", "1")
///     .state("Tock", "0")
///     .initial("Tick")
///     .transition(always("Tick", "Tock", 2))
///     .transition(always("Tock", "Tick", 2))
///     .build();
///
/// assert!(machine.is_ok());
/// ```
pub fn always(
    from: impl Into<String>,
    to: impl Into<String>,
    sensor_count: usize,
) -> TransitionBuilder {
    TransitionBuilder::new()
        .from(from)
        .to(to)
        .when("*".repeat(sensor_count))
}
