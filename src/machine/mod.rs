//! The state machine evaluator.
//!
//! A machine reads a sensor vector once per tick, takes the first
//! transition of its current state whose guard matches, and emits the
//! actuator vector of the state it ends up in. The emitted vector is
//! applied to the world in the same tick.

#[allow(clippy::module_inception)]
mod machine;
mod state;
mod transition;

pub use machine::{StateMachine, StepError};
pub use state::State;
pub use transition::{StateId, Transition};
