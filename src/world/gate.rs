//! Level crossing gate.
//!
//! A car drives from the left towards a gate. It stops at a line in front
//! of the gate and presses a button; it can only pass while the gate is
//! raised high enough. The machine must open the gate, let the car
//! through and close it again, without ever lowering the gate onto the
//! car.
//!
//! The gate position is a vertical screen coordinate: it decreases while
//! the gate rises. `gate_y_max` is fully closed, `gate_y_min` fully open.

use super::config::{ordered, positive, ConfigError, WorldConfig};
use super::{specs, Outcome, World, WorldStatus};
use crate::core::{SignalSpec, Signals};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Sensor positions
pub const BUTTON: usize = 0;
pub const OPEN: usize = 1;
pub const CLOSED: usize = 2;
pub const VEHICLE: usize = 3;

/// Actuator positions
pub const UP: usize = 0;
pub const DOWN: usize = 1;

/// Parameters of the gate world.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GateConfig {
    pub gate_x: f64,
    pub gate_width: f64,
    pub gate_y_min: f64,
    pub gate_y_max: f64,
    /// Cars may pass while the gate is strictly above this coordinate
    pub gate_y_open: f64,
    pub gate_y_step: f64,

    pub car_width: f64,
    pub car_x_min: f64,
    /// The run ends once the first car reaches this position
    pub car_x_max: f64,
    pub car_x_stop: f64,
    pub car_x_step: f64,

    pub vehicle_sensor_x_min: f64,
    pub vehicle_sensor_x_max: f64,
}

impl Default for GateConfig {
    fn default() -> Self {
        Self {
            gate_x: 250.0,
            gate_width: 10.0,
            gate_y_min: 150.0,
            gate_y_max: 210.0,
            gate_y_open: 170.0,
            gate_y_step: 1.0,
            car_width: 80.0,
            car_x_min: -80.0,
            car_x_max: 421.0,
            car_x_stop: 160.0,
            car_x_step: 2.0,
            vehicle_sensor_x_min: 270.0,
            vehicle_sensor_x_max: 290.0,
        }
    }
}

impl WorldConfig for GateConfig {
    fn validate(&self) -> Result<(), ConfigError> {
        positive("gate_y_step", self.gate_y_step)?;
        positive("car_x_step", self.car_x_step)?;
        positive("car_width", self.car_width)?;
        ordered("gate_y_min", self.gate_y_min, self.gate_y_max)?;
        ordered("car_x_min", self.car_x_min, self.car_x_max)?;
        ordered(
            "vehicle_sensor_x_min",
            self.vehicle_sensor_x_min,
            self.vehicle_sensor_x_max,
        )?;
        if !(self.gate_y_min..=self.gate_y_max).contains(&self.gate_y_open) {
            return Err(ConfigError::invalid(
                "gate_y_open",
                "must lie between gate_y_min and gate_y_max",
            ));
        }
        Ok(())
    }
}

/// A car on the road.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Car {
    pub x: f64,
    pub moving: bool,
}

/// The gate world.
#[derive(Clone, Debug)]
pub struct GateWorld {
    config: GateConfig,
    sensor_spec: Vec<SignalSpec>,
    actuator_spec: Vec<SignalSpec>,
    sensors: Signals,
    actuators: Signals,
    gate_y: f64,
    cars: [Car; 2],
    up_and_down: bool,
    crush: bool,
    tick: u64,
}

impl Default for GateWorld {
    fn default() -> Self {
        Self::from_valid(GateConfig::default())
    }
}

impl GateWorld {
    /// Build a world after checking its parameters.
    pub fn new(config: GateConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self::from_valid(config))
    }

    /// Build a world from parameters known to pass `validate`.
    pub(crate) fn from_valid(config: GateConfig) -> Self {
        let sensor_spec = specs(&[
            ("B", "Button"),
            ("O", "Gate is fully Open"),
            ("C", "Gate is fully Closed"),
            ("V", "A Vehicle is passing through the gate"),
        ]);
        let actuator_spec = specs(&[("U", "Move gate Up"), ("D", "Move gate Down")]);

        let mut world = Self {
            sensors: Signals::zeros(sensor_spec.len()),
            actuators: Signals::zeros(actuator_spec.len()),
            sensor_spec,
            actuator_spec,
            gate_y: config.gate_y_max,
            cars: [Car {
                x: config.car_x_min,
                moving: false,
            }; 2],
            up_and_down: false,
            crush: false,
            tick: 0,
            config,
        };
        world.reset();
        world
    }

    pub fn config(&self) -> &GateConfig {
        &self.config
    }

    pub fn gate_y(&self) -> f64 {
        self.gate_y
    }

    pub fn cars(&self) -> &[Car] {
        &self.cars
    }

    /// Whether the gate has been lowered onto a car.
    pub fn crushed(&self) -> bool {
        self.crush
    }

    fn move_gate(&mut self, up: bool, down: bool) {
        let c = &self.config;
        if up && !down && self.gate_y > c.gate_y_min {
            self.gate_y -= c.gate_y_step;
        }
        if !up && down && self.gate_y < c.gate_y_max && !self.crush {
            self.gate_y += c.gate_y_step;
        }
        self.gate_y = self.gate_y.clamp(c.gate_y_min, c.gate_y_max);
    }

    fn move_cars(&mut self) {
        let c = &self.config;
        let gate_end = c.gate_x + c.gate_width;

        for car in self.cars.iter_mut().filter(|car| car.moving) {
            let x = car.x;
            let before_stop = x < c.car_x_stop;
            let under_open_gate = x >= c.car_x_stop && x < gate_end && self.gate_y < c.gate_y_open;
            let past_gate = x >= gate_end && x < c.car_x_max;
            if before_stop || under_open_gate || past_gate {
                car.x += c.car_x_step;
            }
            let x = car.x;

            // Waiting at the stop line in front of a closed gate
            if x >= c.car_x_stop && x <= c.car_x_stop + c.car_x_step && self.gate_y >= c.gate_y_max
            {
                self.sensors.set(BUTTON, true);
            }

            if x >= c.gate_x - c.car_width && x <= gate_end && self.gate_y > c.gate_y_open {
                if !self.crush {
                    debug!(tick = self.tick, car_x = x, gate_y = self.gate_y, "Car crushed");
                }
                self.crush = true;
            }

            if x + c.car_width >= c.vehicle_sensor_x_min && x <= c.vehicle_sensor_x_max {
                self.sensors.set(VEHICLE, true);
            }
        }
    }

    fn car_under_gate(&self) -> bool {
        let c = &self.config;
        let x = self.cars[0].x;
        x > c.gate_x - c.car_width && x < c.gate_x + c.gate_width
    }
}

impl World for GateWorld {
    fn sensor_spec(&self) -> &[SignalSpec] {
        &self.sensor_spec
    }

    fn actuator_spec(&self) -> &[SignalSpec] {
        &self.actuator_spec
    }

    fn reset(&mut self) {
        self.gate_y = self.config.gate_y_max;
        self.cars = [
            Car {
                x: self.config.car_x_min,
                moving: true,
            },
            Car {
                x: self.config.car_x_min,
                moving: false,
            },
        ];
        self.up_and_down = false;
        self.crush = false;
        self.sensors.clear();
        self.actuators.clear();
        self.tick = 0;
    }

    fn step(&mut self, actuators: &Signals) {
        debug_assert_eq!(actuators.len(), self.actuator_spec.len());
        self.actuators = actuators.clone();
        self.tick += 1;

        let up = actuators.get(UP);
        let down = actuators.get(DOWN);

        self.move_gate(up, down);

        // Sticky until the end of the run
        if up && down {
            self.up_and_down = true;
        }

        self.sensors
            .set(OPEN, self.gate_y <= self.config.gate_y_min);
        self.sensors
            .set(CLOSED, self.gate_y >= self.config.gate_y_max);
        self.sensors.set(BUTTON, false);
        self.sensors.set(VEHICLE, false);

        self.move_cars();
    }

    fn sensors(&self) -> &Signals {
        &self.sensors
    }

    fn problem(&self) -> bool {
        let up = self.actuators.get(UP);
        let down = self.actuators.get(DOWN);

        // Forcing up while fully open, or down while fully closed
        up && self.sensors.get(OPEN)
            || down && self.sensors.get(CLOSED)
            || up && down
            || down && self.car_under_gate()
    }

    fn status(&self) -> WorldStatus {
        if self.crush {
            return WorldStatus::Done(Outcome::error(
                "Do not close the gate when a car is passing through.",
            ));
        }

        if self.cars[0].x < self.config.car_x_max {
            return WorldStatus::Running;
        }

        let outcome = if self.up_and_down {
            Outcome::warning("Up and Down commands must not be active at the same time.")
        } else if self.actuators.get(UP) && self.sensors.get(OPEN) {
            Outcome::warning("Turn the Up command off when the gate is open.")
        } else if self.actuators.get(DOWN) && self.sensors.get(CLOSED) {
            Outcome::warning("Turn the Down command off when the gate is closed.")
        } else {
            Outcome::success()
        };
        WorldStatus::Done(outcome)
    }

    fn tick(&self) -> u64 {
        self.tick
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::world::Status;

    fn act(text: &str) -> Signals {
        text.parse().unwrap()
    }

    #[test]
    fn reset_state() {
        let world = GateWorld::default();

        assert_eq!(world.gate_y(), 210.0);
        assert_eq!(world.cars()[0], Car { x: -80.0, moving: true });
        assert!(!world.cars()[1].moving);
        assert_eq!(world.sensors(), &Signals::zeros(4));
        assert_eq!(world.status(), WorldStatus::Running);
        assert_eq!(world.tick(), 0);
    }

    #[test]
    fn gate_rises_and_reports_open() {
        let mut world = GateWorld::default();

        for _ in 0..59 {
            world.step(&act("10"));
        }
        assert_eq!(world.gate_y(), 151.0);
        assert!(!world.sensors().get(OPEN));

        world.step(&act("10"));
        assert_eq!(world.gate_y(), 150.0);
        assert!(world.sensors().get(OPEN));
        assert!(!world.sensors().get(CLOSED));
    }

    #[test]
    fn gate_stays_within_bounds() {
        let mut world = GateWorld::default();

        world.step(&act("01"));
        assert_eq!(world.gate_y(), 210.0);
        assert!(world.sensors().get(CLOSED));
        assert!(world.problem());

        for _ in 0..100 {
            world.step(&act("10"));
        }
        assert_eq!(world.gate_y(), 150.0);
        assert!(world.problem());
    }

    #[test]
    fn both_commands_hold_the_gate() {
        let mut world = GateWorld::default();
        world.step(&act("11"));

        assert_eq!(world.gate_y(), 210.0);
        assert!(world.problem());
    }

    #[test]
    fn car_presses_button_at_stop_line() {
        let mut world = GateWorld::default();

        // (160 - -80) / 2 steps to reach the stop line
        for _ in 0..119 {
            world.step(&act("00"));
        }
        assert!(!world.sensors().get(BUTTON));

        world.step(&act("00"));
        assert_eq!(world.cars()[0].x, 160.0);
        assert!(world.sensors().get(BUTTON));

        // The car waits and keeps pressing
        world.step(&act("00"));
        assert_eq!(world.cars()[0].x, 160.0);
        assert!(world.sensors().get(BUTTON));
    }

    #[test]
    fn vehicle_sensor_covers_crossing() {
        let mut world = GateWorld::default();
        world.gate_y = 150.0;

        let mut seen = Vec::new();
        for _ in 0..250 {
            world.step(&act("00"));
            if world.sensors().get(VEHICLE) {
                seen.push(world.cars()[0].x);
            }
        }

        assert_eq!(seen.first(), Some(&190.0));
        assert_eq!(seen.last(), Some(&290.0));
    }

    #[test]
    fn closing_on_a_car_crushes_it() {
        let mut world = GateWorld::default();
        world.gate_y = 150.0;
        world.cars[0].x = 200.0;

        world.step(&act("01"));
        assert!(world.problem());

        for _ in 0..20 {
            world.step(&act("01"));
        }
        assert_eq!(world.gate_y(), 171.0);
        assert!(world.crushed());

        // The gate cannot be lowered any further
        world.step(&act("01"));
        assert_eq!(world.gate_y(), 171.0);

        match world.status() {
            WorldStatus::Done(outcome) => assert_eq!(outcome.status, Status::Error),
            WorldStatus::Running => panic!("Expected a terminal status"),
        }
    }

    #[test]
    fn passing_car_ends_with_success() {
        let mut world = GateWorld::default();
        world.gate_y = 150.0;
        world.cars[0].x = 400.0;

        for _ in 0..11 {
            world.step(&act("00"));
        }
        assert_eq!(world.cars()[0].x, 422.0);
        assert_eq!(world.status(), WorldStatus::Done(Outcome::success()));
    }

    #[test]
    fn up_and_down_together_is_remembered() {
        let mut world = GateWorld::default();
        world.step(&act("11"));
        world.gate_y = 150.0;
        world.cars[0].x = 420.0;
        world.step(&act("00"));

        assert_eq!(
            world.status(),
            WorldStatus::Done(Outcome::warning(
                "Up and Down commands must not be active at the same time."
            ))
        );
    }

    #[test]
    fn finishing_with_up_on_open_gate_warns() {
        let mut world = GateWorld::default();
        world.gate_y = 150.0;
        world.cars[0].x = 420.0;
        world.step(&act("10"));

        let outcome = world.status().outcome().cloned().unwrap();
        assert_eq!(outcome.status, Status::Warning);
        assert_eq!(
            outcome.message.as_deref(),
            Some("Turn the Up command off when the gate is open.")
        );
    }

    #[test]
    fn config_defaults_and_overrides() {
        let config = GateConfig::from_json(r#"{ "gate_y_step": 2.0 }"#).unwrap();
        assert_eq!(config.gate_y_step, 2.0);
        assert_eq!(config.gate_x, 250.0);

        let error = GateConfig::from_json(r#"{ "gate_y_open": 300.0 }"#).unwrap_err();
        assert!(matches!(
            error,
            ConfigError::Invalid {
                field: "gate_y_open",
                ..
            }
        ));

        assert!(matches!(
            GateConfig::from_json("{ not json"),
            Err(ConfigError::Json { .. })
        ));
    }

    #[test]
    fn inverted_travel_is_rejected_at_construction() {
        let config = GateConfig {
            gate_y_min: 210.0,
            gate_y_max: 150.0,
            ..GateConfig::default()
        };

        let error = GateWorld::new(config).err().unwrap();
        assert!(matches!(error, ConfigError::Invalid { field: "gate_y_min", .. }));
        assert!(GateWorld::new(GateConfig::default()).is_ok());
    }
}
