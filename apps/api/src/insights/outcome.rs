//! Per-call outcome shared by all four task adapters.
//!
//! An adapter call moves `Idle → Requesting → {Succeeded, Failed}` and never
//! leaves a terminal state on its own. `Failed` still carries a value of the
//! adapter's output type (the empty shape) so callers never null-check.

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::insights::models::TaskKind;
use crate::llm_client::{CompletionResult, ErrorKind};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum TaskState {
    Idle,
    Requesting,
    Succeeded,
    Failed,
}

impl TaskState {
    pub fn is_terminal(&self) -> bool {
        matches!(self, TaskState::Succeeded | TaskState::Failed)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum TaskOutcome<T> {
    Succeeded(T),
    Failed { value: T, kind: ErrorKind },
}

impl<T> TaskOutcome<T> {
    pub fn state(&self) -> TaskState {
        match self {
            TaskOutcome::Succeeded(_) => TaskState::Succeeded,
            TaskOutcome::Failed { .. } => TaskState::Failed,
        }
    }

    pub fn error_kind(&self) -> Option<ErrorKind> {
        match self {
            TaskOutcome::Succeeded(_) => None,
            TaskOutcome::Failed { kind, .. } => Some(*kind),
        }
    }

    pub fn value(&self) -> &T {
        match self {
            TaskOutcome::Succeeded(value) | TaskOutcome::Failed { value, .. } => value,
        }
    }

    pub fn into_value(self) -> T {
        match self {
            TaskOutcome::Succeeded(value) | TaskOutcome::Failed { value, .. } => value,
        }
    }

    /// Transforms the carried value, keeping the state and error kind.
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> TaskOutcome<U> {
        match self {
            TaskOutcome::Succeeded(value) => TaskOutcome::Succeeded(f(value)),
            TaskOutcome::Failed { value, kind } => TaskOutcome::Failed {
                value: f(value),
                kind,
            },
        }
    }
}

impl<T: Default> TaskOutcome<T> {
    /// Settles a completion result: reshapes a payload, or falls back to the
    /// empty shape and logs the failure.
    pub fn settle<P>(
        task: TaskKind,
        result: CompletionResult<P>,
        reshape: impl FnOnce(P) -> T,
    ) -> Self {
        match result {
            Ok(payload) => TaskOutcome::Succeeded(reshape(payload)),
            Err(e) => {
                warn!(task = %task, kind = ?e.kind, "AI request failed: {}", e.message);
                TaskOutcome::Failed {
                    value: T::default(),
                    kind: e.kind,
                }
            }
        }
    }
}
