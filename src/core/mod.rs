//! Core value types of the simulation kernel.
//!
//! This module contains the pure building blocks of a machine:
//! - Sensor/actuator vectors and their declarations
//! - Guard patterns with wildcards
//! - Output patterns with unchanged positions
//! - History of state changes
//!
//! Nothing in this module performs I/O or holds simulation state.

mod guard;
mod history;
mod output;
mod signal;

pub use guard::Guard;
pub use history::{StateHistory, StateTransition};
pub use output::Output;
pub use signal::{Pattern, PatternError, SignalSpec, Signals, Trit};
