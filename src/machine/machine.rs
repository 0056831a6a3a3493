//! Mealy machine evaluator.

use super::state::State;
use super::transition::StateId;
use crate::core::{Signals, StateHistory, StateTransition};
use std::collections::HashMap;
use tracing::trace;

/// Errors that can occur while stepping a machine
#[derive(Debug, Clone, thiserror::Error, PartialEq, Eq)]
pub enum StepError {
    #[error("Sensor vector has {found} values, the machine expects {expected}")]
    SensorLength { expected: usize, found: usize },
}

/// A validated state machine with a simulation cursor.
///
/// Built through [`crate::builder::StateMachineBuilder`] or
/// [`crate::builder::Diagram`], which guarantee that every transition
/// target exists and every pattern has the right length.
#[derive(Clone, Debug)]
pub struct StateMachine {
    states: Vec<State>,
    index: HashMap<String, StateId>,
    initial: StateId,
    current: StateId,
    sensor_count: usize,
    actuators: Signals,
    history: StateHistory,
    ticks: u64,
}

impl StateMachine {
    pub(crate) fn from_parts(
        states: Vec<State>,
        initial: StateId,
        sensor_count: usize,
        actuator_count: usize,
    ) -> Self {
        let index = states
            .iter()
            .enumerate()
            .map(|(i, s)| (s.id().to_string(), StateId(i)))
            .collect();

        Self {
            states,
            index,
            initial,
            current: initial,
            sensor_count,
            actuators: Signals::zeros(actuator_count),
            history: StateHistory::new(),
            ticks: 0,
        }
    }

    /// Move the cursor back to the initial state and zero the output memory.
    pub fn reset(&mut self) {
        self.current = self.initial;
        self.actuators.clear();
        self.history.clear();
        self.ticks = 0;
    }

    /// Evaluate one tick.
    ///
    /// Takes the first transition of the current state whose guard matches
    /// the sensors (staying put if none does), then emits the output of the
    /// state now current. Unchanged output positions repeat the value
    /// emitted on the previous tick.
    pub fn step(&mut self, sensors: &Signals) -> Result<Signals, StepError> {
        if sensors.len() != self.sensor_count {
            return Err(StepError::SensorLength {
                expected: self.sensor_count,
                found: sensors.len(),
            });
        }

        self.ticks += 1;

        if let Some(next) = self.current_state().select(sensors) {
            if next != self.current {
                let from = self.current_state().id().to_string();
                let to = self.states[next.0].id().to_string();
                trace!(tick = self.ticks, %sensors, %from, %to, "State transition");
                self.history.push(StateTransition {
                    from,
                    to,
                    tick: self.ticks,
                });
            }
            self.current = next;
        }

        self.actuators = self.current_state().output().apply(&self.actuators);
        Ok(self.actuators.clone())
    }

    /// Get current state (pure)
    pub fn current_state(&self) -> &State {
        &self.states[self.current.0]
    }

    pub fn current_id(&self) -> StateId {
        self.current
    }

    pub fn initial_state(&self) -> &State {
        &self.states[self.initial.0]
    }

    /// Look up a state by its identifier
    pub fn state(&self, id: &str) -> Option<&State> {
        self.index.get(id).map(|sid| &self.states[sid.0])
    }

    pub fn states(&self) -> &[State] {
        &self.states
    }

    /// Actuator vector emitted on the last tick (all zero after reset)
    pub fn actuators(&self) -> &Signals {
        &self.actuators
    }

    pub fn history(&self) -> &StateHistory {
        &self.history
    }

    pub fn sensor_count(&self) -> usize {
        self.sensor_count
    }

    pub fn actuator_count(&self) -> usize {
        self.actuators.len()
    }
}
