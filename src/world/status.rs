//! Run status reported by worlds.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Classification of a finished run.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    /// Goal reached without recorded violations
    Success,
    /// Goal reached, but rules were broken along the way
    Warning,
    /// Irrecoverable outcome
    Error,
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Success => f.write_str("success"),
            Self::Warning => f.write_str("warning"),
            Self::Error => f.write_str("error"),
        }
    }
}

/// Terminal status with an optional explanation for the player.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Outcome {
    pub status: Status,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl Outcome {
    pub fn success() -> Self {
        Self {
            status: Status::Success,
            message: None,
        }
    }

    pub fn warning(message: impl Into<String>) -> Self {
        Self {
            status: Status::Warning,
            message: Some(message.into()),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            status: Status::Error,
            message: Some(message.into()),
        }
    }
}

/// What a world reports after each step.
///
/// Serializes as `{"done": false}` or `{"done": true, "status": ..., "message": ...}`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(into = "StatusReport")]
pub enum WorldStatus {
    Running,
    Done(Outcome),
}

#[derive(Serialize)]
struct StatusReport {
    done: bool,
    #[serde(flatten)]
    outcome: Option<Outcome>,
}

impl From<WorldStatus> for StatusReport {
    fn from(status: WorldStatus) -> Self {
        match status {
            WorldStatus::Running => Self {
                done: false,
                outcome: None,
            },
            WorldStatus::Done(outcome) => Self {
                done: true,
                outcome: Some(outcome),
            },
        }
    }
}

impl WorldStatus {
    pub fn is_done(&self) -> bool {
        matches!(self, Self::Done(_))
    }

    pub fn outcome(&self) -> Option<&Outcome> {
        match self {
            Self::Running => None,
            Self::Done(outcome) => Some(outcome),
        }
    }
}
