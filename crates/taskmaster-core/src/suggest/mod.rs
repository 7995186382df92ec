//! Keyword-based priority suggestions.
//!
//! Free text is scored against a static table of weighted keywords per
//! tier. Matching is whole-word and insensitive to case and diacritics, so
//! "AMANHA" hits the keyword "amanhã".
//!
//! - [`PriorityRule`] / [`Keyword`]: the table, as configured
//! - [`SuggestionEngine`]: the compiled table; pure `suggest`/`score`
//! - [`SuggestionLog`]: bounded record of suggestions that were applied

mod engine;
mod history;
mod rules;

pub use engine::{SuggestionEngine, TierScores};
pub use history::{SuggestionLog, SuggestionRecord, HISTORY_KEY};
pub use rules::{default_rules, Keyword, PriorityRule};

use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

/// Lowercase `text` and strip diacritics.
pub fn normalize(text: &str) -> String {
    text.to_lowercase()
        .nfd()
        .filter(|c| !is_combining_mark(*c))
        .collect()
}
