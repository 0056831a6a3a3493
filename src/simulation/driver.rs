//! Real-time driver for a simulation loop.
//!
//! [`drive`] owns the loop for the duration of a run. It ticks on a
//! `tokio::time` interval and applies control commands received on a
//! channel. Commands and ticks are handled one at a time by the same task,
//! so a command never lands in the middle of a tick.

use super::error::SimulationError;
use super::events::{Phase, TickOutcome};
use super::runner::SimulationLoop;
use crate::world::World;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::time::{self, Interval, MissedTickBehavior};
use tracing::{debug, info, warn};

/// Shortest period the driver will tick at.
pub const MIN_TICK_INTERVAL: Duration = Duration::from_millis(1);

/// Control request for a driven simulation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Command {
    Start,
    Pause,
    Resume,
    Reset,
    SetInterval(Duration),
}

/// Sending side of a driver's command channel.
#[derive(Clone, Debug)]
pub struct LoopHandle {
    sender: mpsc::Sender<Command>,
}

impl LoopHandle {
    /// Create a handle and the receiver to pass to [`drive`].
    pub fn channel(buffer: usize) -> (Self, mpsc::Receiver<Command>) {
        let (sender, receiver) = mpsc::channel(buffer);
        (Self { sender }, receiver)
    }

    pub async fn send(&self, command: Command) -> Result<(), SimulationError> {
        self.sender
            .send(command)
            .await
            .map_err(|_| SimulationError::DriverClosed)
    }

    pub async fn start(&self) -> Result<(), SimulationError> {
        self.send(Command::Start).await
    }

    pub async fn pause(&self) -> Result<(), SimulationError> {
        self.send(Command::Pause).await
    }

    pub async fn resume(&self) -> Result<(), SimulationError> {
        self.send(Command::Resume).await
    }

    pub async fn reset(&self) -> Result<(), SimulationError> {
        self.send(Command::Reset).await
    }

    pub async fn set_interval(&self, interval: Duration) -> Result<(), SimulationError> {
        self.send(Command::SetInterval(interval)).await
    }
}

/// Drive the loop until the run finishes or the command channel closes.
///
/// Commands rejected by the loop (such as `Pause` while idle) are logged
/// and ignored. The loop is returned so that the caller can inspect the
/// report, reset, or drive it again.
///
/// # Errors
///
/// Returns [`SimulationError`] if a tick fails.
pub async fn drive<W: World>(
    mut sim: SimulationLoop<W>,
    mut commands: mpsc::Receiver<Command>,
) -> Result<SimulationLoop<W>, SimulationError> {
    let mut interval = ticker(sim.tick_interval());

    info!(tick_interval = ?sim.tick_interval(), "Simulation driver started");

    loop {
        tokio::select! {
            command = commands.recv() => {
                let Some(command) = command else {
                    debug!(phase = %sim.phase(), "Command channel closed");
                    return Ok(sim);
                };
                apply(&mut sim, command, &mut interval);
            }
            _ = interval.tick(), if sim.phase() == Phase::Running => {
                if let TickOutcome::Finished(_) = sim.tick()? {
                    return Ok(sim);
                }
            }
        }
    }
}

fn apply<W: World>(sim: &mut SimulationLoop<W>, command: Command, interval: &mut Interval) {
    debug!(?command, phase = %sim.phase(), "Applying command");
    let result = match command {
        Command::Start => sim.start(),
        Command::Pause => sim.pause(),
        Command::Resume => sim.resume(),
        Command::Reset => {
            sim.reset();
            // Drop a tick that was already due
            interval.reset();
            Ok(())
        }
        Command::SetInterval(period) => {
            sim.set_tick_interval(period);
            *interval = ticker(period);
            Ok(())
        }
    };

    if let Err(error) = result {
        warn!(%error, "Command ignored");
    }
}

fn ticker(period: Duration) -> Interval {
    let mut interval = time::interval(period.max(MIN_TICK_INTERVAL));
    interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
    interval
}
