//! Structural errors for machines and diagrams.

use crate::core::PatternError;
use std::fmt;
use thiserror::Error;

/// Which kind of pattern a length or symbol error refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PatternKind {
    Guard,
    Output,
}

impl fmt::Display for PatternKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Guard => f.write_str("guard"),
            Self::Output => f.write_str("output"),
        }
    }
}

/// A single structural problem found while building a machine.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum BuildError {
    #[error("Initial state not specified. Mark exactly one state as initial")]
    MissingInitialState,

    #[error("Initial state '{id}' is not defined")]
    UnknownInitialState { id: String },

    #[error("Several states are marked initial: {}", .ids.join(", "))]
    MultipleInitialStates { ids: Vec<String> },

    #[error("State '{id}' is defined more than once")]
    DuplicateState { id: String },

    #[error("Transition '{source_id}' -> '{target}' starts from an unknown state")]
    UnknownSource { source_id: String, target: String },

    #[error("Transition '{source_id}' -> '{target}' leads to an unknown state")]
    UnknownTarget { source_id: String, target: String },

    #[error("Invalid {kind} pattern for {owner}: {error}")]
    InvalidPattern {
        owner: String,
        kind: PatternKind,
        error: PatternError,
    },

    #[error("The {kind} pattern for {owner} has {found} positions, expected {expected}")]
    PatternLength {
        owner: String,
        kind: PatternKind,
        expected: usize,
        found: usize,
    },

    #[error("Transition source state not specified. Call .from(state)")]
    MissingFromState,

    #[error("Transition target state not specified. Call .to(state)")]
    MissingToState,

    #[error("Transition guard not specified. Call .when(pattern)")]
    MissingGuard,
}

/// Rejection of a whole diagram, listing every structural error found.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("Diagram rejected with {} structural error(s): {}", .errors.len(), render(.errors))]
pub struct DiagramError {
    pub errors: Vec<BuildError>,
}

impl DiagramError {
    pub fn contains(&self, predicate: impl Fn(&BuildError) -> bool) -> bool {
        self.errors.iter().any(predicate)
    }
}

/// Failure to load a diagram file.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to read diagram file: {source}")]
    Io {
        #[from]
        source: std::io::Error,
    },

    #[error("failed to parse diagram JSON: {source}")]
    Json {
        #[from]
        source: serde_json::Error,
    },
}

fn render(errors: &[BuildError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}
