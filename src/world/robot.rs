//! Differential-drive robot in a walled arena.
//!
//! The robot is a disc driven by two wheels, each commanded forward or
//! backward. Three point sensors detect nearby walls and a fourth signals
//! that a rotation has just reached an axis direction. The run succeeds
//! when the robot centre enters the goal circle.

use super::config::{ordered, positive, ConfigError, WorldConfig};
use super::geometry::{circle_crosses_rect, Affine, Rect};
use super::{specs, Outcome, World, WorldStatus};
use crate::core::{SignalSpec, Signals};
use serde::{Deserialize, Serialize};
use std::f64::consts::PI;
use tracing::debug;

/// Sensor positions
pub const WALL_LEFT: usize = 0;
pub const WALL_RIGHT: usize = 1;
pub const WALL_AHEAD: usize = 2;
pub const END_OF_ROTATION: usize = 3;

/// Actuator positions
pub const LEFT_FORWARD: usize = 0;
pub const LEFT_BACKWARD: usize = 1;
pub const RIGHT_FORWARD: usize = 2;
pub const RIGHT_BACKWARD: usize = 3;

/// Parameters of the robot world.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RobotConfig {
    pub width: f64,
    pub height: f64,
    pub walls: Vec<Rect>,

    pub robot_radius: f64,
    /// Distance of the sensor points from the centre, in robot radii
    pub sensor_factor: f64,
    /// Distance travelled by a wheel in one tick
    pub step_distance: f64,

    pub start_x: f64,
    pub start_y: f64,
    /// Initial heading in degrees
    pub start_angle: f64,

    pub goal_x: f64,
    pub goal_y: f64,
    pub goal_radius: f64,
}

impl Default for RobotConfig {
    fn default() -> Self {
        Self {
            width: 100.0,
            height: 100.0,
            walls: Vec::new(),
            robot_radius: 10.0,
            sensor_factor: 1.4,
            step_distance: 1.0,
            start_x: 0.0,
            start_y: 0.0,
            start_angle: 0.0,
            goal_x: 0.0,
            goal_y: 0.0,
            goal_radius: 10.0,
        }
    }
}

impl WorldConfig for RobotConfig {
    fn validate(&self) -> Result<(), ConfigError> {
        positive("width", self.width)?;
        positive("height", self.height)?;
        positive("robot_radius", self.robot_radius)?;
        positive("sensor_factor", self.sensor_factor)?;
        positive("step_distance", self.step_distance)?;
        positive("goal_radius", self.goal_radius)?;
        for wall in &self.walls {
            ordered("walls.x1", wall.x1, wall.x2)?;
            ordered("walls.y1", wall.y1, wall.y2)?;
        }
        Ok(())
    }
}

/// How a pair of wheel commands moves the robot.
#[derive(Clone, Copy, Debug, PartialEq)]
enum Drive {
    /// Both wheels turn the same way (or both are idle)
    Straight(f64),
    /// Wheels turn in opposite directions: spin about the centre
    Spin(f64),
    /// One wheel is idle: pivot about the sensor point on that side
    Pivot { degrees: f64, sensor: usize },
}

/// The robot world.
#[derive(Clone, Debug)]
pub struct RobotWorld {
    config: RobotConfig,
    sensor_spec: Vec<SignalSpec>,
    actuator_spec: Vec<SignalSpec>,
    sensor_points: [(f64, f64); 3],
    sensor_radius: f64,
    sensors: Signals,
    actuators: Signals,
    transform: Affine,
    conflicting_drive: bool,
    goal_reached: bool,
    tick: u64,
}

impl Default for RobotWorld {
    fn default() -> Self {
        Self::from_valid(RobotConfig::default())
    }
}

impl RobotWorld {
    /// Build a world after checking its parameters.
    pub fn new(config: RobotConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self::from_valid(config))
    }

    /// Build a world from parameters known to pass `validate`.
    pub(crate) fn from_valid(config: RobotConfig) -> Self {
        let sensor_spec = specs(&[
            ("WL", "Wall on the left"),
            ("WR", "Wall on the right"),
            ("WA", "Wall ahead"),
            ("EOR", "End of rotation"),
        ]);
        let actuator_spec = specs(&[
            ("LF", "Left wheel forward"),
            ("LB", "Left wheel backward"),
            ("RF", "Right wheel forward"),
            ("RB", "Right wheel backward"),
        ]);

        let r = config.robot_radius;
        let k = config.sensor_factor;
        let mut world = Self {
            sensors: Signals::zeros(sensor_spec.len()),
            actuators: Signals::zeros(actuator_spec.len()),
            sensor_spec,
            actuator_spec,
            sensor_points: [(-r, -r * k), (-r, r * k), (r * k, 0.0)],
            sensor_radius: r / 4.0,
            transform: Affine::identity(),
            conflicting_drive: false,
            goal_reached: false,
            tick: 0,
            config,
        };
        world.reset();
        world
    }

    pub fn config(&self) -> &RobotConfig {
        &self.config
    }

    pub fn transform(&self) -> &Affine {
        &self.transform
    }

    /// World coordinates of the robot centre.
    pub fn position(&self) -> (f64, f64) {
        self.transform.position()
    }

    /// World coordinates of a sensor point.
    pub fn sensor_position(&self, sensor: usize) -> Option<(f64, f64)> {
        self.sensor_points
            .get(sensor)
            .map(|(x, y)| self.transform.apply(*x, *y))
    }

    fn wheel(actuators: &Signals, forward: usize, backward: usize) -> i8 {
        i8::from(actuators.get(forward)) - i8::from(actuators.get(backward))
    }

    fn drive(&self, left: i8, right: i8) -> Drive {
        let step = self.config.step_distance;
        let r = self.config.robot_radius;
        let (left, right) = (f64::from(left), f64::from(right));

        if left == right {
            Drive::Straight(left * step)
        } else if left == -right {
            Drive::Spin(left * step * 180.0 / r / PI)
        } else if left == 0.0 {
            Drive::Pivot {
                degrees: -right * step * 90.0 / r / PI,
                sensor: WALL_LEFT,
            }
        } else {
            Drive::Pivot {
                degrees: left * step * 90.0 / r / PI,
                sensor: WALL_RIGHT,
            }
        }
    }

    fn collides(&self, transform: &Affine) -> bool {
        let (x, y) = transform.position();
        let r = self.config.robot_radius;
        let arena = Rect::new(0.0, 0.0, self.config.width, self.config.height);

        circle_crosses_rect(x, y, r, &arena)
            || self
                .config
                .walls
                .iter()
                .any(|wall| circle_crosses_rect(x, y, r, wall))
    }

    /// Snap the heading onto an axis when a rotation reaches or crosses it.
    ///
    /// Returns whether the heading was on or across an axis.
    fn end_rotation(previous: &Affine, next: &mut Affine) -> bool {
        let crossed = next.a == 0.0
            || next.a * previous.a < 0.0
            || next.b == 0.0
            || next.b * previous.b < 0.0;
        if !crossed {
            return false;
        }

        if next.a > 0.99 {
            (next.a, next.b) = (1.0, 0.0);
        }
        if next.a < -0.99 {
            (next.a, next.b) = (-1.0, 0.0);
        }
        if next.b > 0.99 {
            (next.a, next.b) = (0.0, 1.0);
        }
        if next.b < -0.99 {
            (next.a, next.b) = (0.0, -1.0);
        }
        // Keep the matrix a pure rotation
        next.c = -next.b;
        next.d = next.a;
        true
    }

    fn update_wall_sensors(&mut self) {
        for (index, (px, py)) in self.sensor_points.iter().enumerate() {
            let (sx, sy) = self.transform.apply(*px, *py);
            let near = self
                .config
                .walls
                .iter()
                .any(|wall| circle_crosses_rect(sx, sy, self.sensor_radius, wall));
            self.sensors.set(index, near);
        }
    }
}

impl World for RobotWorld {
    fn sensor_spec(&self) -> &[SignalSpec] {
        &self.sensor_spec
    }

    fn actuator_spec(&self) -> &[SignalSpec] {
        &self.actuator_spec
    }

    fn reset(&mut self) {
        let mut transform = Affine::identity();
        transform
            .translate(self.config.start_x, self.config.start_y)
            .rotate(self.config.start_angle);
        self.transform = transform;
        self.sensors.clear();
        self.actuators.clear();
        self.conflicting_drive = false;
        self.goal_reached = false;
        self.tick = 0;
    }

    fn step(&mut self, actuators: &Signals) {
        debug_assert_eq!(actuators.len(), self.actuator_spec.len());
        self.actuators = actuators.clone();
        self.tick += 1;
        self.sensors.clear();

        if self.problem() {
            self.conflicting_drive = true;
        }

        let left = Self::wheel(actuators, LEFT_FORWARD, LEFT_BACKWARD);
        let right = Self::wheel(actuators, RIGHT_FORWARD, RIGHT_BACKWARD);
        let drive = self.drive(left, right);

        let mut next = self.transform;
        match drive {
            Drive::Straight(distance) => {
                next.translate(distance, 0.0);
            }
            Drive::Spin(degrees) => {
                next.rotate(degrees);
            }
            Drive::Pivot { degrees, sensor } => {
                let (px, py) = self.sensor_points[sensor];
                next.rotate_about(degrees, px, py);
            }
        }

        if self.collides(&next) {
            debug!(tick = self.tick, ?drive, "Move rejected by collision");
        } else {
            let rotating = !matches!(drive, Drive::Straight(_));
            if rotating && Self::end_rotation(&self.transform, &mut next) {
                self.sensors.set(END_OF_ROTATION, true);
            }
            self.transform = next;
        }

        self.update_wall_sensors();

        let (x, y) = self.transform.position();
        let (dx, dy) = (self.config.goal_x - x, self.config.goal_y - y);
        if !self.goal_reached && dx * dx + dy * dy <= self.config.goal_radius.powi(2) {
            debug!(tick = self.tick, x, y, "Goal reached");
            self.goal_reached = true;
        }
    }

    fn sensors(&self) -> &Signals {
        &self.sensors
    }

    /// A wheel commanded forward and backward at once.
    fn problem(&self) -> bool {
        self.actuators.get(LEFT_FORWARD) && self.actuators.get(LEFT_BACKWARD)
            || self.actuators.get(RIGHT_FORWARD) && self.actuators.get(RIGHT_BACKWARD)
    }

    fn status(&self) -> WorldStatus {
        if !self.goal_reached {
            WorldStatus::Running
        } else if self.conflicting_drive {
            WorldStatus::Done(Outcome::warning(
                "Do not drive a wheel forward and backward at the same time.",
            ))
        } else {
            WorldStatus::Done(Outcome::success())
        }
    }

    fn tick(&self) -> u64 {
        self.tick
    }
}
