//! # TaskMaster Core Library
//!
//! This library provides the core logic for the TaskMaster priority board.
//! It follows a CLI-first philosophy: every operation is available through
//! the standalone `taskmaster` binary, and any graphical front end is a thin
//! layer over the same library.
//!
//! ## Architecture
//!
//! - **Suggestion Engine**: pure keyword/weight scoring of free text into a
//!   priority tier, accent- and case-insensitive
//! - **Task Store**: ordered task collection with single-slot undo, written
//!   to a key-value store after every mutation
//! - **Board Controller**: new-task draft state machine (suggested vs.
//!   manually locked priority) and routing of user actions
//! - **Storage**: JSON documents in a local key-value store and TOML-based
//!   configuration
//!
//! ## Key Components
//!
//! - [`SuggestionEngine`]: keyword scoring
//! - [`TaskStore`]: task reducer and persistence
//! - [`BoardController`]: orchestration
//! - [`Config`]: application configuration management
//! - [`Notifier`]: trait for the platform notification channel

pub mod board;
pub mod error;
pub mod events;
pub mod notify;
pub mod storage;
pub mod suggest;
pub mod task;
pub mod theme;

pub use board::{BoardController, Draft, DraftState};
pub use error::{ConfigError, CoreError, RuleError, StorageError};
pub use events::Event;
pub use notify::{deliver, ClickAction, Delivery, Notification, Notifier, NotifyError, Permission};
pub use storage::{Config, FileStore, KeyValueStore, MemoryStore};
pub use suggest::{Keyword, PriorityRule, SuggestionEngine, SuggestionLog, SuggestionRecord, TierScores};
pub use task::{Priority, Progress, Task, TaskId, TaskStore};
pub use theme::{ParseThemeError, Theme};
