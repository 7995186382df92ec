use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::notify::Delivery;
use crate::task::{Priority, TaskId};

/// Every board state change produces an Event.
/// The presentation layer drains them to decide what to re-render.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "type")]
pub enum Event {
    TaskAdded {
        id: TaskId,
        priority: Priority,
        /// Whether the tier came from a suggestion rather than a manual pick.
        suggested: bool,
        at: DateTime<Utc>,
    },
    TaskToggled {
        id: TaskId,
        done: bool,
        at: DateTime<Utc>,
    },
    /// Task moved into the undo slot.
    TaskRemoved {
        id: TaskId,
        at: DateTime<Utc>,
    },
    TaskRestored {
        id: TaskId,
        at: DateTime<Utc>,
    },
    ColumnReordered {
        priority: Priority,
        at: DateTime<Utc>,
    },
    PriorityChanged {
        id: TaskId,
        from: Priority,
        to: Priority,
        at: DateTime<Utc>,
    },
    /// Draft priority overwritten by the suggestion engine.
    PrioritySuggested {
        priority: Priority,
        keyword: Option<String>,
        at: DateTime<Utc>,
    },
    /// User picked a priority; suggestions are off until the next submit.
    DraftLocked {
        priority: Priority,
        at: DateTime<Utc>,
    },
    Notified {
        id: TaskId,
        delivery: Delivery,
        at: DateTime<Utc>,
    },
}
