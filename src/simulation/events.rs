//! Values produced by the simulation loop.

use crate::core::Signals;
use crate::world::Outcome;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Lifecycle of a simulation run.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Phase {
    Idle,
    Running,
    Paused,
    /// Terminal until the next reset
    Finished,
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Phase::Idle => "idle",
            Phase::Running => "running",
            Phase::Paused => "paused",
            Phase::Finished => "finished",
        };
        f.write_str(name)
    }
}

/// What happened during one tick.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TickEvent {
    /// Tick number since the last reset, starting at 1
    pub tick: u64,
    /// State current after the machine step
    pub state: String,
    /// Sensors read at the start of the tick
    pub sensors: Signals,
    /// Actuators applied to the world during the tick
    pub actuators: Signals,
    /// Whether the world flagged the applied actuators
    pub problem: bool,
}

/// Summary of a finished run.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunReport {
    pub run_id: Uuid,
    pub outcome: Outcome,
    pub ticks: u64,
    /// Ticks on which the world flagged a problem
    pub problem_ticks: u64,
    pub final_state: String,
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
}

/// Result of asking the loop to tick.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TickOutcome {
    /// The loop was not running, or the ticket was stale
    Skipped,
    Continued(TickEvent),
    /// The world reported done on this tick
    Finished(RunReport),
}

/// Permission to run one tick, bound to a reset generation.
///
/// Timers that schedule ticks ahead of time take a ticket when they are
/// armed. A reset invalidates every ticket issued before it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct TickTicket {
    pub(crate) generation: u64,
}

/// Comparable view of the loop state.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Snapshot {
    pub phase: Phase,
    pub state: String,
    pub sensors: Signals,
    pub actuators: Signals,
    pub ticks: u64,
    pub problem_ticks: u64,
    pub world_tick: u64,
}

/// Subscriber notified as the run progresses.
pub trait TickObserver: Send {
    /// Called after every completed tick.
    fn on_tick(&mut self, event: &TickEvent);

    /// Called once when the world reports done.
    fn on_done(&mut self, report: &RunReport) {
        let _ = report;
    }
}

/// An observer that ignores everything.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoOpObserver;

impl TickObserver for NoOpObserver {
    fn on_tick(&mut self, _event: &TickEvent) {}
}
