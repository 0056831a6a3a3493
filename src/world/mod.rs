//! Worlds driven by state machines.
//!
//! A world owns the physics and the rules of a game. Once per tick it
//! receives the actuator vector emitted by the machine, advances by one
//! fixed time increment, and recomputes its sensors. The kernel only
//! depends on the [`World`] trait; each game is a distinct type.
//!
//! Two reference worlds are provided:
//! - [`GateWorld`]: a level crossing gate with a passing car
//! - [`RobotWorld`]: a differential-drive robot looking for a goal

pub mod config;
pub mod gate;
pub mod geometry;
pub mod robot;
mod status;

pub use config::{ConfigError, WorldConfig};
pub use gate::{GateConfig, GateWorld};
pub use robot::{RobotConfig, RobotWorld};
pub use status::{Outcome, Status, WorldStatus};

use crate::core::{SignalSpec, Signals};

/// Contract between the simulation loop and a game world.
///
/// Implementations must be deterministic: the same state and the same
/// actuators always produce the same next state.
pub trait World {
    /// Ordered sensor declarations. Their count is the sensor vector length.
    fn sensor_spec(&self) -> &[SignalSpec];

    /// Ordered actuator declarations. Their count is the actuator vector length.
    fn actuator_spec(&self) -> &[SignalSpec];

    /// Put the world back in its starting configuration.
    fn reset(&mut self);

    /// Advance by one time increment with the given actuators.
    fn step(&mut self, actuators: &Signals);

    /// Current sensor readings.
    fn sensors(&self) -> &Signals;

    /// Whether the last applied actuators broke a safety rule.
    ///
    /// Advisory only: a problem never stops the run by itself.
    fn problem(&self) -> bool;

    fn status(&self) -> WorldStatus;

    /// Number of steps since the last reset.
    fn tick(&self) -> u64;

    fn sensor_count(&self) -> usize {
        self.sensor_spec().len()
    }

    fn actuator_count(&self) -> usize {
        self.actuator_spec().len()
    }
}

impl<W: World + ?Sized> World for Box<W> {
    fn sensor_spec(&self) -> &[SignalSpec] {
        (**self).sensor_spec()
    }

    fn actuator_spec(&self) -> &[SignalSpec] {
        (**self).actuator_spec()
    }

    fn reset(&mut self) {
        (**self).reset()
    }

    fn step(&mut self, actuators: &Signals) {
        (**self).step(actuators)
    }

    fn sensors(&self) -> &Signals {
        (**self).sensors()
    }

    fn problem(&self) -> bool {
        (**self).problem()
    }

    fn status(&self) -> WorldStatus {
        (**self).status()
    }

    fn tick(&self) -> u64 {
        (**self).tick()
    }
}

/// Build the declaration list from `(name, description)` pairs.
pub(crate) fn specs(entries: &[(&str, &str)]) -> Vec<SignalSpec> {
    entries
        .iter()
        .map(|(name, description)| SignalSpec::new(*name, *description))
        .collect()
}
