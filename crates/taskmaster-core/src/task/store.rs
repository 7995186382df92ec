//! Ordered task collection with persistence and single-slot undo.
//!
//! Every mutation writes the whole collection back to storage before
//! returning. Operations on unknown ids are no-ops that return `None`.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};

use super::{IdGenerator, Priority, Task, TaskId};
use crate::error::Result;
use crate::storage::{read_json, write_json, KeyValueStore};

/// Storage key holding the task collection.
pub const TASKS_KEY: &str = "todos";
/// Storage key holding the most recently removed task.
pub const PENDING_UNDO_KEY: &str = "pending_undo";

/// A removed task that can still be restored.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PendingUndo {
    pub task: Task,
    pub removed_at: DateTime<Utc>,
}

/// Completed vs. total task counts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Progress {
    pub done: usize,
    pub total: usize,
}

/// The board's task collection, newest first.
pub struct TaskStore<S: KeyValueStore> {
    storage: S,
    tasks: Vec<Task>,
    pending_undo: Option<PendingUndo>,
    undo_window: Option<Duration>,
    ids: IdGenerator,
}

impl<S: KeyValueStore> TaskStore<S> {
    /// Load the collection from `storage`.
    ///
    /// Absent or malformed data yields an empty board; duplicated ids keep
    /// their first occurrence.
    pub fn open(storage: S) -> Self {
        let stored: Vec<Task> = read_json(&storage, TASKS_KEY).unwrap_or_default();
        let mut seen = HashSet::new();
        let mut ids = IdGenerator::new();
        let mut tasks = Vec::with_capacity(stored.len());
        for task in stored {
            if seen.insert(task.id) {
                ids.observe(task.id);
                tasks.push(task);
            } else {
                tracing::warn!(id = %task.id, "dropping task with duplicated id");
            }
        }

        let pending_undo: Option<PendingUndo> = read_json(&storage, PENDING_UNDO_KEY);
        if let Some(pending) = &pending_undo {
            ids.observe(pending.task.id);
        }

        tracing::debug!(count = tasks.len(), "task store opened");
        Self {
            storage,
            tasks,
            pending_undo,
            undo_window: None,
            ids,
        }
    }

    /// Limit how long a removed task stays restorable.
    pub fn with_undo_window(mut self, window: Option<Duration>) -> Self {
        self.undo_window = window;
        self
    }

    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    pub fn get(&self, id: TaskId) -> Option<&Task> {
        self.tasks.iter().find(|t| t.id == id)
    }

    /// Tasks of one tier, in board order.
    pub fn column(&self, priority: Priority) -> Vec<&Task> {
        self.tasks.iter().filter(|t| t.priority == priority).collect()
    }

    pub fn progress(&self) -> Progress {
        Progress {
            done: self.tasks.iter().filter(|t| t.done).count(),
            total: self.tasks.len(),
        }
    }

    /// The restorable task, if its window has not elapsed.
    pub fn pending_undo(&self) -> Option<&Task> {
        self.pending_undo_at(Utc::now())
    }

    pub fn pending_undo_at(&self, now: DateTime<Utc>) -> Option<&Task> {
        self.pending_undo
            .as_ref()
            .filter(|pending| !self.is_expired(pending, now))
            .map(|pending| &pending.task)
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    pub fn storage_mut(&mut self) -> &mut S {
        &mut self.storage
    }

    pub fn into_storage(self) -> S {
        self.storage
    }

    /// Create a task at the head of the board.
    ///
    /// Returns `None` without touching anything when `text` is blank.
    pub fn add(&mut self, text: &str, priority: Priority) -> Result<Option<Task>> {
        let text = text.trim();
        if text.is_empty() {
            return Ok(None);
        }

        let task = Task {
            id: self.fresh_id(),
            text: text.to_string(),
            done: false,
            priority,
        };
        self.tasks.insert(0, task.clone());
        self.persist()?;

        tracing::info!(id = %task.id, %priority, "task added");
        Ok(Some(task))
    }

    /// Flip the done flag. Returns the updated task.
    pub fn toggle_done(&mut self, id: TaskId) -> Result<Option<Task>> {
        let Some(pos) = self.position(id) else {
            return Ok(None);
        };

        let updated = self.tasks[pos].toggled();
        self.tasks[pos] = updated.clone();
        self.persist()?;

        tracing::info!(%id, done = updated.done, "task toggled");
        Ok(Some(updated))
    }

    /// Remove a task and park it in the undo slot, replacing whatever was
    /// parked before.
    pub fn remove(&mut self, id: TaskId) -> Result<Option<Task>> {
        self.remove_at(id, Utc::now())
    }

    pub fn remove_at(&mut self, id: TaskId, now: DateTime<Utc>) -> Result<Option<Task>> {
        let Some(pos) = self.position(id) else {
            return Ok(None);
        };

        let removed = self.tasks.remove(pos);
        let previous = self.pending_undo.replace(PendingUndo {
            task: removed.clone(),
            removed_at: now,
        });

        // The slot is written first: a failed write must never leave the
        // task in neither place.
        if let Err(e) = self.persist_pending_undo() {
            self.pending_undo = previous;
            self.tasks.insert(pos, removed);
            return Err(e);
        }
        if let Err(e) = self.persist() {
            self.tasks.insert(pos, removed);
            return Err(e);
        }
        if let Some(previous) = previous {
            tracing::debug!(id = %previous.task.id, "undo slot superseded");
        }

        tracing::info!(%id, "task removed");
        Ok(Some(removed))
    }

    /// Put the most recently removed task back at the head of the board.
    pub fn undo_remove(&mut self) -> Result<Option<Task>> {
        self.undo_remove_at(Utc::now())
    }

    pub fn undo_remove_at(&mut self, now: DateTime<Utc>) -> Result<Option<Task>> {
        let Some(pending) = self.pending_undo.take() else {
            return Ok(None);
        };

        if self.is_expired(&pending, now) {
            tracing::debug!(id = %pending.task.id, "undo window elapsed");
            self.persist_pending_undo()?;
            return Ok(None);
        }

        let task = pending.task;
        if self.position(task.id).is_none() {
            self.tasks.insert(0, task.clone());
        }
        self.persist()?;
        self.persist_pending_undo()?;

        tracing::info!(id = %task.id, "task restored");
        Ok(Some(task))
    }

    /// True when `order` lists exactly the ids of the `priority` column.
    pub fn is_tier_permutation(&self, priority: Priority, order: &[TaskId]) -> bool {
        let current: HashSet<TaskId> = self
            .tasks
            .iter()
            .filter(|t| t.priority == priority)
            .map(|t| t.id)
            .collect();
        let requested: HashSet<TaskId> = order.iter().copied().collect();
        requested.len() == order.len() && requested == current
    }

    /// Reorder one column. Tasks of other tiers keep their positions.
    ///
    /// # Panics
    ///
    /// Panics if `order` is not a permutation of the column's ids; check
    /// untrusted input with [`TaskStore::is_tier_permutation`] first.
    pub fn reorder_within_priority(&mut self, priority: Priority, order: &[TaskId]) -> Result<()> {
        assert!(
            self.is_tier_permutation(priority, order),
            "reorder of the {priority} column must list each of its tasks exactly once"
        );

        let slots: Vec<usize> = self
            .tasks
            .iter()
            .enumerate()
            .filter(|(_, t)| t.priority == priority)
            .map(|(i, _)| i)
            .collect();
        let mut by_id: HashMap<TaskId, Task> = slots
            .iter()
            .map(|&i| (self.tasks[i].id, self.tasks[i].clone()))
            .collect();

        for (slot, id) in slots.into_iter().zip(order) {
            if let Some(task) = by_id.remove(id) {
                self.tasks[slot] = task;
            }
        }
        self.persist()?;

        tracing::info!(%priority, count = order.len(), "column reordered");
        Ok(())
    }

    /// Move a task to another tier; it lands at the end of the board.
    ///
    /// Returns `None` when the id is unknown or the task is already there.
    pub fn change_priority(&mut self, id: TaskId, priority: Priority) -> Result<Option<Task>> {
        let Some(pos) = self.position(id) else {
            return Ok(None);
        };
        if self.tasks[pos].priority == priority {
            return Ok(None);
        }

        let moved = self.tasks.remove(pos).with_priority(priority);
        self.tasks.push(moved.clone());
        self.persist()?;

        tracing::info!(%id, %priority, "task priority changed");
        Ok(Some(moved))
    }

    /// Next generated id, stepping down past taken ones once the generator
    /// has saturated at `i64::MAX`.
    fn fresh_id(&mut self) -> TaskId {
        let mut id = self.ids.next();
        while self.is_taken(id) {
            id = TaskId(id.0.saturating_sub(1));
        }
        id
    }

    fn is_taken(&self, id: TaskId) -> bool {
        self.position(id).is_some()
            || self.pending_undo.as_ref().is_some_and(|p| p.task.id == id)
    }

    fn position(&self, id: TaskId) -> Option<usize> {
        self.tasks.iter().position(|t| t.id == id)
    }

    fn is_expired(&self, pending: &PendingUndo, now: DateTime<Utc>) -> bool {
        self.undo_window
            .is_some_and(|window| now - pending.removed_at > window)
    }

    fn persist(&mut self) -> Result<()> {
        write_json(&mut self.storage, TASKS_KEY, &self.tasks)
    }

    fn persist_pending_undo(&mut self) -> Result<()> {
        match &self.pending_undo {
            Some(pending) => write_json(&mut self.storage, PENDING_UNDO_KEY, pending),
            None => {
                self.storage.remove(PENDING_UNDO_KEY)?;
                Ok(())
            }
        }
    }
}
