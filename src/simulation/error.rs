//! Error types for the simulation loop.

use super::events::Phase;
use crate::machine::StepError;

/// Errors that can occur while driving a simulation.
#[derive(Debug, Clone, thiserror::Error, PartialEq, Eq)]
pub enum SimulationError {
    /// The machine and the world disagree on a signal vector length.
    #[error("Machine has {machine} {kind}s but the world declares {world}")]
    SignalCount {
        kind: &'static str,
        machine: usize,
        world: usize,
    },

    /// A control request that the current phase does not allow.
    #[error("Cannot {action} while {phase}")]
    InvalidPhase { action: &'static str, phase: Phase },

    #[error("Machine step failed: {0}")]
    Step(#[from] StepError),

    /// The driver behind a handle has stopped.
    #[error("Simulation driver is no longer running")]
    DriverClosed,
}
