//! Serializable diagram description and its validation.
//!
//! A diagram is what the editor produces: a flat list of states and a flat
//! list of transitions referring to them by id. Validation accumulates
//! every structural error instead of stopping at the first one, so the
//! editor can highlight all of them in a single pass.

use crate::builder::error::{BuildError, DiagramError, LoadError, PatternKind};
use crate::core::{Guard, Output, Pattern};
use crate::machine::{State, StateId, StateMachine, Transition};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;
use stillwater::validation::Validation;
use stillwater::NonEmptyVec;
use tracing::debug;

type Checked<T> = Validation<T, NonEmptyVec<BuildError>>;

/// A state as drawn in the editor.
///
/// Display fields (position, size, labels) are ignored when reading.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct StateNode {
    pub id: String,
    /// Actuator pattern, e.g. `"10"` or `"*1"`
    pub output: String,
    #[serde(default)]
    pub initial: bool,
}

/// A transition as drawn in the editor.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransitionEdge {
    pub source: String,
    pub target: String,
    /// Sensor pattern, e.g. `"1**0"`
    pub guard: String,
    /// Precedence among the transitions leaving `source`, lowest first.
    /// Without one, the position in the transition list is used.
    #[serde(default)]
    pub order: Option<u32>,
}

/// Editor-side description of a machine.
///
/// # Example
///
/// ```rust
/// use automata::builder::Diagram;
///
/// let diagram = Diagram::from_json(r#"{
///     "states": [
///         { "id": "Off", "output": "0", "initial": true, "x": 40, "y": 80 },
///         { "id": "On",  "output": "1" }
///     ],
///     "transitions": [
///         { "source": "Off", "target": "On",  "guard": "1" },
///         { "source": "On",  "target": "Off", "guard": "0" }
///     ]
/// }"#).unwrap();
///
/// let machine = diagram.validate(1, 1).unwrap();
/// assert_eq!(machine.current_state().id(), "Off");
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Diagram {
    #[serde(default)]
    pub states: Vec<StateNode>,
    #[serde(default)]
    pub transitions: Vec<TransitionEdge>,
}

impl Diagram {
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Read a diagram from a JSON file.
    pub fn from_file(path: &Path) -> Result<Self, LoadError> {
        let contents = std::fs::read_to_string(path)?;
        Ok(Self::from_json(&contents)?)
    }

    /// Check the diagram against a world's sensor and actuator counts and
    /// build the machine.
    ///
    /// Returns every structural error at once on failure.
    pub fn validate(
        &self,
        sensor_count: usize,
        actuator_count: usize,
    ) -> Result<StateMachine, DiagramError> {
        let mut errors = Vec::new();

        let index = self.index();
        let unique = collect(self.check_unique(), &mut errors);
        let initial = collect(self.check_initial(&index), &mut errors);
        let outputs = collect(
            Validation::all_vec(
                self.states
                    .iter()
                    .map(|node| check_output(node, actuator_count))
                    .collect(),
            ),
            &mut errors,
        );
        let edges: Vec<_> = self
            .transitions
            .iter()
            .enumerate()
            .filter_map(|(position, edge)| {
                check_edge(edge, position, &index, sensor_count, &mut errors)
            })
            .collect();

        let (Some(()), Some(initial), Some(outputs), true) =
            (unique, initial, outputs, errors.is_empty())
        else {
            debug!(errors = errors.len(), "Diagram rejected");
            return Err(DiagramError { errors });
        };

        let mut outgoing: Vec<Vec<(u32, Transition)>> = vec![Vec::new(); self.states.len()];
        for (source, order, transition) in edges {
            outgoing[source.index()].push((order, transition));
        }

        let states = self
            .states
            .iter()
            .zip(outputs)
            .zip(outgoing)
            .map(|((node, output), mut transitions)| {
                // Stable: equal orders keep their position in the list
                transitions.sort_by_key(|(order, _)| *order);
                State::new(
                    node.id.clone(),
                    output,
                    transitions.into_iter().map(|(_, t)| t).collect(),
                )
            })
            .collect();

        Ok(StateMachine::from_parts(
            states,
            initial,
            sensor_count,
            actuator_count,
        ))
    }

    fn index(&self) -> HashMap<&str, StateId> {
        let mut index = HashMap::new();
        for (i, node) in self.states.iter().enumerate() {
            index.entry(node.id.as_str()).or_insert(StateId(i));
        }
        index
    }

    fn check_unique(&self) -> Checked<()> {
        let mut seen = HashMap::new();
        let checks = self
            .states
            .iter()
            .map(|node| {
                let count = seen.entry(node.id.as_str()).or_insert(0usize);
                *count += 1;
                if *count == 2 {
                    Validation::fail(BuildError::DuplicateState {
                        id: node.id.clone(),
                    })
                } else {
                    Validation::success(())
                }
            })
            .collect();
        Validation::all_vec(checks).map(|_| ())
    }

    fn check_initial(&self, index: &HashMap<&str, StateId>) -> Checked<StateId> {
        let marked: Vec<&StateNode> = self.states.iter().filter(|s| s.initial).collect();
        match marked.as_slice() {
            [] => Validation::fail(BuildError::MissingInitialState),
            [node] => match index.get(node.id.as_str()) {
                Some(id) => Validation::success(*id),
                None => Validation::fail(BuildError::MissingInitialState),
            },
            many => Validation::fail(BuildError::MultipleInitialStates {
                ids: many.iter().map(|s| s.id.clone()).collect(),
            }),
        }
    }
}

/// Keep the value of a successful check, or record its errors.
fn collect<T>(checked: Checked<T>, errors: &mut Vec<BuildError>) -> Option<T> {
    match checked {
        Validation::Success(value) => Some(value),
        Validation::Failure(failures) => {
            errors.extend(failures.iter().cloned());
            None
        }
    }
}

fn check_pattern(
    text: &str,
    owner: String,
    kind: PatternKind,
    expected: usize,
) -> Checked<Pattern> {
    match text.parse::<Pattern>() {
        Err(error) => Validation::fail(BuildError::InvalidPattern { owner, kind, error }),
        Ok(pattern) if pattern.len() != expected => Validation::fail(BuildError::PatternLength {
            owner,
            kind,
            expected,
            found: pattern.len(),
        }),
        Ok(pattern) => Validation::success(pattern),
    }
}

fn check_output(node: &StateNode, actuator_count: usize) -> Checked<Output> {
    check_pattern(
        &node.output,
        format!("state '{}'", node.id),
        PatternKind::Output,
        actuator_count,
    )
    .map(Output::new)
}

fn lookup(index: &HashMap<&str, StateId>, id: &str, missing: BuildError) -> Checked<StateId> {
    match index.get(id) {
        Some(state) => Validation::success(*state),
        None => Validation::fail(missing),
    }
}

fn check_edge(
    edge: &TransitionEdge,
    position: usize,
    index: &HashMap<&str, StateId>,
    sensor_count: usize,
    errors: &mut Vec<BuildError>,
) -> Option<(StateId, u32, Transition)> {
    let unknown_source = BuildError::UnknownSource {
        source_id: edge.source.clone(),
        target: edge.target.clone(),
    };
    let unknown_target = BuildError::UnknownTarget {
        source_id: edge.source.clone(),
        target: edge.target.clone(),
    };
    let owner = format!("transition '{}' -> '{}'", edge.source, edge.target);

    let source = collect(lookup(index, &edge.source, unknown_source), errors);
    let target = collect(lookup(index, &edge.target, unknown_target), errors);
    let guard = collect(
        check_pattern(&edge.guard, owner, PatternKind::Guard, sensor_count),
        errors,
    );

    Some((
        source?,
        edge.order
            .unwrap_or_else(|| u32::try_from(position).unwrap_or(u32::MAX)),
        Transition {
            guard: Guard::new(guard?),
            target: target?,
        },
    ))
}
