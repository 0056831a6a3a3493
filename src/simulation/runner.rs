//! The tick loop binding one machine to one world.

use super::error::SimulationError;
use super::events::{
    NoOpObserver, Phase, RunReport, Snapshot, TickEvent, TickObserver, TickOutcome, TickTicket,
};
use crate::machine::StateMachine;
use crate::world::{World, WorldStatus};
use chrono::{DateTime, Utc};
use std::time::Duration;
use tracing::{debug, info};
use uuid::Uuid;

/// Default pause between two driven ticks.
pub const DEFAULT_TICK_INTERVAL: Duration = Duration::from_millis(100);

/// Owns a machine and a world and steps them together.
///
/// Each tick reads the world sensors, steps the machine, applies the
/// resulting actuators to the world, and checks the world status. A tick
/// runs to completion inside one call, so pausing or resetting always
/// happens between ticks.
///
/// # Example
///
/// ```rust
/// use automata::builder::{StateMachineBuilder, TransitionBuilder};
/// use automata::games;
/// use automata::simulation::{SimulationLoop, TickOutcome};
///
/// let machine = StateMachineBuilder::new()
///     .sensors(4)
///     .actuators(2)
///     .state("Idle", "00")
///     .state("Opening", "10")
///     .initial("Idle")
///     .transition(TransitionBuilder::new().from("Idle").to("Opening").when("1***"))
///     .build()
///     .unwrap();
///
/// let mut sim = SimulationLoop::new(machine, games::open_the_gate()).unwrap();
/// sim.start().unwrap();
/// assert!(matches!(sim.tick().unwrap(), TickOutcome::Continued(_)));
/// ```
pub struct SimulationLoop<W: World> {
    machine: StateMachine,
    world: W,
    phase: Phase,
    tick_interval: Duration,
    generation: u64,
    ticks: u64,
    problem_ticks: u64,
    run_id: Uuid,
    started_at: Option<DateTime<Utc>>,
    report: Option<RunReport>,
    observer: Box<dyn TickObserver>,
}

impl<W: World> SimulationLoop<W> {
    /// Pair a machine with a world. Both are reset.
    pub fn new(mut machine: StateMachine, mut world: W) -> Result<Self, SimulationError> {
        check_count("sensor", machine.sensor_count(), world.sensor_count())?;
        check_count("actuator", machine.actuator_count(), world.actuator_count())?;

        machine.reset();
        world.reset();

        Ok(Self {
            machine,
            world,
            phase: Phase::Idle,
            tick_interval: DEFAULT_TICK_INTERVAL,
            generation: 0,
            ticks: 0,
            problem_ticks: 0,
            run_id: Uuid::new_v4(),
            started_at: None,
            report: None,
            observer: Box::new(NoOpObserver),
        })
    }

    /// Replace the tick observer.
    pub fn with_observer(mut self, observer: impl TickObserver + 'static) -> Self {
        self.observer = Box::new(observer);
        self
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn machine(&self) -> &StateMachine {
        &self.machine
    }

    pub fn world(&self) -> &W {
        &self.world
    }

    pub fn tick_interval(&self) -> Duration {
        self.tick_interval
    }

    pub fn set_tick_interval(&mut self, interval: Duration) {
        debug!(?interval, "Tick interval changed");
        self.tick_interval = interval;
    }

    /// Ticks completed since the last reset.
    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    pub fn problem_ticks(&self) -> u64 {
        self.problem_ticks
    }

    /// Report of the finished run, if any.
    pub fn report(&self) -> Option<&RunReport> {
        self.report.as_ref()
    }

    /// Give back the machine and the world.
    pub fn into_parts(self) -> (StateMachine, W) {
        (self.machine, self.world)
    }

    pub fn start(&mut self) -> Result<(), SimulationError> {
        self.transition("start", Phase::Idle, Phase::Running)?;
        self.run_id = Uuid::new_v4();
        self.started_at = Some(Utc::now());
        info!(run_id = %self.run_id, "Simulation started");
        Ok(())
    }

    pub fn pause(&mut self) -> Result<(), SimulationError> {
        self.transition("pause", Phase::Running, Phase::Paused)
    }

    pub fn resume(&mut self) -> Result<(), SimulationError> {
        self.transition("resume", Phase::Paused, Phase::Running)
    }

    /// Return to `Idle` from any phase, resetting machine and world.
    ///
    /// Tickets issued before the reset are invalidated.
    pub fn reset(&mut self) {
        self.machine.reset();
        self.world.reset();
        self.generation += 1;
        self.ticks = 0;
        self.problem_ticks = 0;
        self.started_at = None;
        self.report = None;
        debug!(from = %self.phase, generation = self.generation, "Simulation reset");
        self.phase = Phase::Idle;
    }

    /// A ticket for the next tick of the current generation.
    pub fn ticket(&self) -> TickTicket {
        TickTicket {
            generation: self.generation,
        }
    }

    /// Run one tick if the ticket is still valid.
    pub fn tick_for(&mut self, ticket: TickTicket) -> Result<TickOutcome, SimulationError> {
        if ticket.generation != self.generation {
            debug!(
                ticket = ticket.generation,
                current = self.generation,
                "Dropping stale tick"
            );
            return Ok(TickOutcome::Skipped);
        }
        self.tick()
    }

    /// Run one tick. Outside `Running` nothing happens.
    pub fn tick(&mut self) -> Result<TickOutcome, SimulationError> {
        if self.phase != Phase::Running {
            return Ok(TickOutcome::Skipped);
        }

        let sensors = self.world.sensors().clone();
        let actuators = self.machine.step(&sensors)?;
        self.world.step(&actuators);
        self.ticks += 1;

        let problem = self.world.problem();
        if problem {
            self.problem_ticks += 1;
            debug!(tick = self.ticks, actuators = %actuators, "World flagged a problem");
        }

        let event = TickEvent {
            tick: self.ticks,
            state: self.machine.current_state().id().to_string(),
            sensors,
            actuators,
            problem,
        };
        self.observer.on_tick(&event);

        match self.world.status() {
            WorldStatus::Running => Ok(TickOutcome::Continued(event)),
            WorldStatus::Done(outcome) => {
                let finished_at = Utc::now();
                let report = RunReport {
                    run_id: self.run_id,
                    outcome,
                    ticks: self.ticks,
                    problem_ticks: self.problem_ticks,
                    final_state: event.state,
                    started_at: self.started_at.unwrap_or(finished_at),
                    finished_at,
                };
                info!(
                    run_id = %report.run_id,
                    status = %report.outcome.status,
                    ticks = report.ticks,
                    problem_ticks = report.problem_ticks,
                    "Simulation finished"
                );
                self.phase = Phase::Finished;
                self.observer.on_done(&report);
                self.report = Some(report.clone());
                Ok(TickOutcome::Finished(report))
            }
        }
    }

    /// Start if idle, then tick until the run finishes or `max_ticks`
    /// more ticks have been made.
    pub fn run(&mut self, max_ticks: u64) -> Result<Option<RunReport>, SimulationError> {
        if self.phase == Phase::Idle {
            self.start()?;
        }
        for _ in 0..max_ticks {
            match self.tick()? {
                TickOutcome::Finished(report) => return Ok(Some(report)),
                TickOutcome::Continued(_) => {}
                TickOutcome::Skipped => break,
            }
        }
        Ok(self.report.clone())
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            phase: self.phase,
            state: self.machine.current_state().id().to_string(),
            sensors: self.world.sensors().clone(),
            actuators: self.machine.actuators().clone(),
            ticks: self.ticks,
            problem_ticks: self.problem_ticks,
            world_tick: self.world.tick(),
        }
    }

    fn transition(
        &mut self,
        action: &'static str,
        from: Phase,
        to: Phase,
    ) -> Result<(), SimulationError> {
        if self.phase != from {
            return Err(SimulationError::InvalidPhase {
                action,
                phase: self.phase,
            });
        }
        debug!(%from, %to, "Simulation phase changed");
        self.phase = to;
        Ok(())
    }
}

fn check_count(kind: &'static str, machine: usize, world: usize) -> Result<(), SimulationError> {
    if machine == world {
        Ok(())
    } else {
        Err(SimulationError::SignalCount {
            kind,
            machine,
            world,
        })
    }
}
