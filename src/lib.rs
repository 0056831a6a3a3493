//! Automata: a Mealy state machine kernel for puzzle games
//!
//! A learner draws a state diagram that reads boolean sensor signals and
//! emits boolean actuator signals. The kernel validates the diagram,
//! evaluates it one tick at a time, and lets it drive a small simulated
//! world toward a goal while the world watches for rule violations.
//!
//! # Core Concepts
//!
//! - **Signals**: fixed-length boolean vectors for sensors and actuators
//! - **Guards**: sensor patterns over `0`, `1` and `*` (don't care)
//! - **Outputs**: actuator patterns where `*` repeats the previous value
//! - **Machine**: validated states and ordered transitions with a cursor
//! - **World**: the physics and rules of a game, behind the [`World`] trait
//! - **Simulation**: the tick loop binding one machine to one world
//!
//! # Example
//!
//! ```rust
//! use automata::builder::{StateMachineBuilder, TransitionBuilder};
//! use automata::games;
//! use automata::simulation::SimulationLoop;
//! use automata::world::Status;
//!
//! // Open for the car, wait until it has passed, then close again
//! let machine = StateMachineBuilder::new()
//!     .sensors(4)
//!     .actuators(2)
//!     .state("Idle", "00")
//!     .state("Opening", "10")
//!     .state("Open", "00")
//!     .state("Passing", "00")
//!     .state("Closing", "01")
//!     .initial("Idle")
//!     .transitions([
//!         TransitionBuilder::new().from("Idle").to("Opening").when("1***"),
//!         TransitionBuilder::new().from("Opening").to("Open").when("*1**"),
//!         TransitionBuilder::new().from("Open").to("Passing").when("***1"),
//!         TransitionBuilder::new().from("Passing").to("Closing").when("***0"),
//!         TransitionBuilder::new().from("Closing").to("Idle").when("**1*"),
//!     ])
//!     .build()
//!     .unwrap();
//!
//! let mut sim = SimulationLoop::new(machine, games::open_the_gate()).unwrap();
//! let report = sim.run(1_000).unwrap().unwrap();
//! assert_eq!(report.outcome.status, Status::Success);
//! ```

pub mod builder;
pub mod core;
pub mod games;
pub mod machine;
pub mod simulation;
pub mod world;

// Re-export commonly used types
pub use builder::{Diagram, DiagramError, StateMachineBuilder, TransitionBuilder};
pub use crate::core::{Guard, Output, Pattern, Signals, StateHistory, StateTransition};
pub use machine::{StateMachine, StepError};
pub use simulation::{SimulationError, SimulationLoop};
pub use world::{World, WorldStatus};
