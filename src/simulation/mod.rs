//! Simulation loop and its real-time driver.
//!
//! [`SimulationLoop`] is the synchronous core: it owns a machine and a world
//! and advances them one atomic tick at a time through the phases `Idle`,
//! `Running`, `Paused` and `Finished`. [`drive`] runs a loop against a
//! `tokio` timer and accepts [`Command`]s between ticks.

pub mod driver;
pub mod error;
pub mod events;
pub mod runner;

pub use driver::{drive, Command, LoopHandle};
pub use error::SimulationError;
pub use events::{
    NoOpObserver, Phase, RunReport, Snapshot, TickEvent, TickObserver, TickOutcome, TickTicket,
};
pub use runner::{SimulationLoop, DEFAULT_TICK_INTERVAL};
