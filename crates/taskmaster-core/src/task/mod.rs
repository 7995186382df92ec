//! Task types for the priority board.
//!
//! A task lives in exactly one of three priority columns. Records are
//! immutable from the outside: the [`TaskStore`] replaces a task with an
//! updated copy rather than handing out mutable references.

pub mod store;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

pub use store::{PendingUndo, Progress, TaskStore, PENDING_UNDO_KEY, TASKS_KEY};

/// Priority tier (board column).
#[derive(
    Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord,
)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    High,
    #[default]
    Medium,
    Low,
}

impl Priority {
    /// All tiers in board order. Suggestion tie-breaks follow this order too.
    pub const ALL: [Priority; 3] = [Priority::High, Priority::Medium, Priority::Low];

    pub fn as_str(&self) -> &'static str {
        match self {
            Priority::High => "high",
            Priority::Medium => "medium",
            Priority::Low => "low",
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when parsing an unknown tier name.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown priority '{0}' (expected high, medium or low)")]
pub struct ParsePriorityError(pub String);

impl FromStr for Priority {
    type Err = ParsePriorityError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "high" => Ok(Priority::High),
            "medium" => Ok(Priority::Medium),
            "low" => Ok(Priority::Low),
            other => Err(ParsePriorityError(other.to_string())),
        }
    }
}

/// Task identifier: creation time in milliseconds, bumped on collision.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(transparent)]
pub struct TaskId(pub i64);

impl fmt::Display for TaskId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for TaskId {
    type Err = std::num::ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim().parse::<i64>().map(TaskId)
    }
}

/// A single board entry.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Task {
    pub id: TaskId,
    /// Older stores wrote this field as `task`.
    #[serde(alias = "task")]
    pub text: String,
    #[serde(default)]
    pub done: bool,
    /// Plain-list records predate priorities and land in the medium column.
    #[serde(default)]
    pub priority: Priority,
}

impl Task {
    /// Copy of this task with `done` flipped.
    pub fn toggled(&self) -> Self {
        Self {
            done: !self.done,
            ..self.clone()
        }
    }

    /// Copy of this task moved to another tier.
    pub fn with_priority(&self, priority: Priority) -> Self {
        Self {
            priority,
            ..self.clone()
        }
    }
}

/// Hands out unique, increasing task ids.
///
/// Ids are millisecond timestamps; two tasks created within the same
/// millisecond get consecutive ids instead of colliding.
#[derive(Debug, Clone, Default)]
pub struct IdGenerator {
    last: i64,
}

impl IdGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make sure future ids sort after `id`.
    pub fn observe(&mut self, id: TaskId) {
        self.last = self.last.max(id.0);
    }

    pub fn next_at(&mut self, now: DateTime<Utc>) -> TaskId {
        // Saturates at i64::MAX; the store resolves collisions from there.
        let id = now.timestamp_millis().max(self.last.saturating_add(1));
        self.last = id;
        TaskId(id)
    }

    pub fn next(&mut self) -> TaskId {
        self.next_at(Utc::now())
    }
}
