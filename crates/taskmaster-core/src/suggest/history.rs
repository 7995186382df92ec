//! Bounded log of applied suggestions.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

use crate::error::Result;
use crate::storage::{read_json, write_json, KeyValueStore};
use crate::task::Priority;

/// Storage key for the persisted log.
pub const HISTORY_KEY: &str = "suggestion_history";

/// One applied suggestion.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SuggestionRecord {
    pub text: String,
    pub suggested: Priority,
    pub at: DateTime<Utc>,
}

/// Suggestion history, oldest first.
///
/// Holds at most `capacity` records; pushing beyond that evicts the oldest.
/// A capacity of zero disables recording.
#[derive(Debug, Clone)]
pub struct SuggestionLog {
    records: VecDeque<SuggestionRecord>,
    capacity: usize,
}

impl SuggestionLog {
    pub fn new(capacity: usize) -> Self {
        Self {
            records: VecDeque::with_capacity(capacity.min(1024)),
            capacity,
        }
    }

    /// Load the persisted log. Missing or malformed history starts empty.
    pub fn load<S: KeyValueStore + ?Sized>(store: &S, capacity: usize) -> Self {
        let mut log = Self::new(capacity);
        let stored: Vec<SuggestionRecord> = read_json(store, HISTORY_KEY).unwrap_or_default();
        for record in stored {
            log.push_record(record);
        }
        log
    }

    pub fn save<S: KeyValueStore + ?Sized>(&self, store: &mut S) -> Result<()> {
        write_json(store, HISTORY_KEY, &self.records)
    }

    pub fn record(&mut self, text: &str, suggested: Priority) {
        self.push_record(SuggestionRecord {
            text: text.to_string(),
            suggested,
            at: Utc::now(),
        });
    }

    fn push_record(&mut self, record: SuggestionRecord) {
        if self.capacity == 0 {
            return;
        }
        while self.records.len() >= self.capacity {
            self.records.pop_front();
        }
        self.records.push_back(record);
    }

    pub fn iter(&self) -> impl DoubleEndedIterator<Item = &SuggestionRecord> {
        self.records.iter()
    }

    /// The `n` most recent records, newest first.
    pub fn recent(&self, n: usize) -> Vec<&SuggestionRecord> {
        self.records.iter().rev().take(n).collect()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn clear(&mut self) {
        self.records.clear();
    }
}
