//! Board controller.
//!
//! Owns the task store and wires the new-task draft to the suggestion
//! engine. The draft is a small state machine:
//!
//! ```text
//!   UNLOCKED ── select_priority ──> LOCKED
//!      ^                              |
//!      +──────── submit (ok) ─────────+
//! ```
//!
//! While unlocked, every draft text update re-runs the engine and a hit
//! overwrites the draft priority. A manual pick locks the draft until the
//! next successful submission.

use chrono::Utc;

use crate::error::Result;
use crate::events::Event;
use crate::notify::{deliver, ClickAction, Notification, Notifier, Permission};
use crate::storage::{Config, KeyValueStore, NotificationsConfig};
use crate::suggest::{SuggestionEngine, SuggestionLog};
use crate::task::{Priority, Progress, Task, TaskId, TaskStore};

/// Whether the draft priority still follows suggestions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DraftState {
    Unlocked,
    Locked,
}

/// The in-progress new task.
#[derive(Debug, Clone)]
pub struct Draft {
    text: String,
    priority: Priority,
    state: DraftState,
    /// Priority was last set by the engine, not by the user.
    suggested: bool,
}

impl Draft {
    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn priority(&self) -> Priority {
        self.priority
    }

    pub fn state(&self) -> DraftState {
        self.state
    }

    pub fn is_locked(&self) -> bool {
        self.state == DraftState::Locked
    }
}

impl Default for Draft {
    fn default() -> Self {
        Self {
            text: String::new(),
            priority: Priority::Medium,
            state: DraftState::Unlocked,
            suggested: false,
        }
    }
}

pub struct BoardController<S: KeyValueStore, N: Notifier> {
    store: TaskStore<S>,
    engine: SuggestionEngine,
    history: SuggestionLog,
    notifier: N,
    notifications: NotificationsConfig,
    suggestions_enabled: bool,
    draft: Draft,
    events: Vec<Event>,
}

impl<S: KeyValueStore, N: Notifier> BoardController<S, N> {
    /// Build a controller and ask for notification permission once.
    pub fn new(store: TaskStore<S>, engine: SuggestionEngine, mut notifier: N) -> Self {
        if notifier.permission() == Permission::Default {
            let permission = notifier.request_permission();
            tracing::debug!(?permission, "notification permission requested");
        }

        Self {
            store,
            engine,
            history: SuggestionLog::new(0),
            notifier,
            notifications: NotificationsConfig::default(),
            suggestions_enabled: true,
            draft: Draft::default(),
            events: Vec::new(),
        }
    }

    /// Open the board from `storage` using the settings in `config`.
    pub fn from_config(storage: S, config: &Config, notifier: N) -> Result<Self> {
        let engine = config.suggestion_engine()?;
        let store = TaskStore::open(storage).with_undo_window(config.undo_window());
        let history = SuggestionLog::load(store.storage(), config.suggestions.history_capacity);

        Ok(Self::new(store, engine, notifier)
            .with_history(history)
            .with_notifications(config.notifications.clone())
            .with_suggestions_enabled(config.suggestions.enabled))
    }

    pub fn with_history(mut self, history: SuggestionLog) -> Self {
        self.history = history;
        self
    }

    pub fn with_notifications(mut self, notifications: NotificationsConfig) -> Self {
        self.notifications = notifications;
        self
    }

    pub fn with_suggestions_enabled(mut self, enabled: bool) -> Self {
        self.suggestions_enabled = enabled;
        self
    }

    // ── Draft ───────────────────────────────────────────────────────────

    pub fn draft(&self) -> &Draft {
        &self.draft
    }

    /// Replace the draft text. Returns the suggestion that was applied, if
    /// any; an unlocked draft without a keyword hit keeps its priority.
    pub fn set_draft_text(&mut self, text: &str) -> Option<Priority> {
        self.draft.text = text.to_string();
        if self.draft.is_locked() || !self.suggestions_enabled {
            return None;
        }

        let suggestion = self.engine.suggest(text)?;
        self.draft.priority = suggestion;
        self.draft.suggested = true;
        self.events.push(Event::PrioritySuggested {
            priority: suggestion,
            keyword: self.engine.detect_keyword(text).map(str::to_string),
            at: Utc::now(),
        });
        Some(suggestion)
    }

    /// Manual priority pick. Locks the draft against suggestions.
    pub fn select_priority(&mut self, priority: Priority) {
        self.draft.priority = priority;
        self.draft.state = DraftState::Locked;
        self.draft.suggested = false;
        self.events.push(Event::DraftLocked {
            priority,
            at: Utc::now(),
        });
    }

    /// Turn the draft into a task.
    ///
    /// A blank draft is ignored and left as it is. On success the draft text
    /// is cleared and the draft unlocked; the priority carries over.
    pub fn submit(&mut self) -> Result<Option<Task>> {
        let Some(task) = self.store.add(&self.draft.text, self.draft.priority)? else {
            return Ok(None);
        };

        let suggested = self.draft.suggested;
        if suggested {
            self.history.record(&task.text, task.priority);
            if let Err(e) = self.history.save(self.store.storage_mut()) {
                tracing::warn!(error = %e, "failed to persist suggestion history");
            }
        }
        self.events.push(Event::TaskAdded {
            id: task.id,
            priority: task.priority,
            suggested,
            at: Utc::now(),
        });

        self.draft.text.clear();
        self.draft.state = DraftState::Unlocked;
        self.draft.suggested = false;

        if task.priority == Priority::High {
            self.notify_added(&task);
        }
        Ok(Some(task))
    }

    /// Type `text`, optionally pick a priority, and submit.
    pub fn add_task(&mut self, text: &str, priority: Option<Priority>) -> Result<Option<Task>> {
        if let Some(priority) = priority {
            self.select_priority(priority);
        }
        self.set_draft_text(text);
        self.submit()
    }

    fn notify_added(&mut self, task: &Task) {
        let notification = Notification {
            title: self.notifications.title.clone(),
            body: format!("Nova tarefa: {}", task.text),
            icon: self.notifications.icon.clone(),
            on_click: Some(ClickAction::FocusTask { id: task.id }),
        };
        let delivery = deliver(&mut self.notifier, &notification);
        self.events.push(Event::Notified {
            id: task.id,
            delivery,
            at: Utc::now(),
        });
    }

    // ── Task actions ────────────────────────────────────────────────────

    pub fn toggle_done(&mut self, id: TaskId) -> Result<Option<Task>> {
        let updated = self.store.toggle_done(id)?;
        if let Some(task) = &updated {
            self.events.push(Event::TaskToggled {
                id,
                done: task.done,
                at: Utc::now(),
            });
        }
        Ok(updated)
    }

    pub fn remove(&mut self, id: TaskId) -> Result<Option<Task>> {
        let removed = self.store.remove(id)?;
        if removed.is_some() {
            self.events.push(Event::TaskRemoved { id, at: Utc::now() });
        }
        Ok(removed)
    }

    pub fn undo_remove(&mut self) -> Result<Option<Task>> {
        let restored = self.store.undo_remove()?;
        if let Some(task) = &restored {
            self.events.push(Event::TaskRestored {
                id: task.id,
                at: Utc::now(),
            });
        }
        Ok(restored)
    }

    /// See [`TaskStore::reorder_within_priority`].
    pub fn reorder_within_priority(&mut self, priority: Priority, order: &[TaskId]) -> Result<()> {
        self.store.reorder_within_priority(priority, order)?;
        self.events.push(Event::ColumnReordered {
            priority,
            at: Utc::now(),
        });
        Ok(())
    }

    pub fn change_priority(&mut self, id: TaskId, priority: Priority) -> Result<Option<Task>> {
        let from = self.store.get(id).map(|t| t.priority);
        let moved = self.store.change_priority(id, priority)?;
        if let (Some(task), Some(from)) = (&moved, from) {
            self.events.push(Event::PriorityChanged {
                id: task.id,
                from,
                to: priority,
                at: Utc::now(),
            });
        }
        Ok(moved)
    }

    // ── Queries ─────────────────────────────────────────────────────────

    pub fn tasks(&self) -> &[Task] {
        self.store.tasks()
    }

    pub fn column(&self, priority: Priority) -> Vec<&Task> {
        self.store.column(priority)
    }

    pub fn progress(&self) -> Progress {
        self.store.progress()
    }

    pub fn pending_undo(&self) -> Option<&Task> {
        self.store.pending_undo()
    }

    pub fn history(&self) -> &SuggestionLog {
        &self.history
    }

    pub fn engine(&self) -> &SuggestionEngine {
        &self.engine
    }

    pub fn store(&self) -> &TaskStore<S> {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut TaskStore<S> {
        &mut self.store
    }

    pub fn notifier(&self) -> &N {
        &self.notifier
    }

    /// Drain the events produced since the last call.
    pub fn take_events(&mut self) -> Vec<Event> {
        std::mem::take(&mut self.events)
    }
}
