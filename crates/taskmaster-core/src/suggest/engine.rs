//! Compiled keyword scoring.

use regex::Regex;
use serde::Serialize;
use std::collections::HashSet;

use super::normalize;
use super::rules::{self, PriorityRule};
use crate::error::RuleError;
use crate::task::Priority;

/// Accumulated `occurrences × weight` per tier.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct TierScores {
    pub high: u64,
    pub medium: u64,
    pub low: u64,
}

impl TierScores {
    pub fn get(&self, priority: Priority) -> u64 {
        match priority {
            Priority::High => self.high,
            Priority::Medium => self.medium,
            Priority::Low => self.low,
        }
    }

    fn add(&mut self, priority: Priority, amount: u64) {
        let slot = match priority {
            Priority::High => &mut self.high,
            Priority::Medium => &mut self.medium,
            Priority::Low => &mut self.low,
        };
        *slot = slot.saturating_add(amount);
    }

    /// Tier with the strictly highest non-zero score. Ties go to the tier
    /// that comes first in board order.
    pub fn best(&self) -> Option<Priority> {
        let mut best = None;
        let mut best_score = 0;
        for priority in Priority::ALL {
            let score = self.get(priority);
            if score > best_score {
                best = Some(priority);
                best_score = score;
            }
        }
        best
    }

    pub fn is_empty(&self) -> bool {
        self.high == 0 && self.medium == 0 && self.low == 0
    }
}

#[derive(Debug, Clone)]
struct CompiledKeyword {
    word: String,
    weight: u32,
    pattern: Regex,
}

#[derive(Debug, Clone)]
struct CompiledRule {
    priority: Priority,
    keywords: Vec<CompiledKeyword>,
}

/// Priority suggestion engine over an immutable rule table.
///
/// Rules are kept in board order (high, medium, low) regardless of the order
/// they were configured in; `suggest` and `detect_keyword` both walk them in
/// that order.
#[derive(Debug, Clone)]
pub struct SuggestionEngine {
    rules: Vec<PriorityRule>,
    compiled: Vec<CompiledRule>,
}

impl SuggestionEngine {
    /// Validate and compile a rule table.
    pub fn new(mut rules: Vec<PriorityRule>) -> Result<Self, RuleError> {
        let mut seen = HashSet::new();
        for rule in &rules {
            if !seen.insert(rule.priority) {
                return Err(RuleError::DuplicateTier(rule.priority.to_string()));
            }
        }
        rules.sort_by_key(|rule| rule.priority);

        let compiled = rules
            .iter()
            .map(compile_rule)
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self { rules, compiled })
    }

    /// Engine over the built-in Portuguese keyword table.
    pub fn default_rules() -> Self {
        Self::new(rules::default_rules()).expect("built-in priority rules are valid")
    }

    /// The rule table, in board order.
    pub fn rules(&self) -> &[PriorityRule] {
        &self.rules
    }

    /// Per-tier scores for `text`.
    pub fn score(&self, text: &str) -> TierScores {
        let normalized = normalize(text);
        let mut scores = TierScores::default();
        for rule in &self.compiled {
            for keyword in &rule.keywords {
                let occurrences = keyword.pattern.find_iter(&normalized).count() as u64;
                scores.add(rule.priority, occurrences.saturating_mul(keyword.weight as u64));
            }
        }
        scores
    }

    /// Suggested tier for `text`, or `None` when no keyword matches.
    pub fn suggest(&self, text: &str) -> Option<Priority> {
        if text.trim().is_empty() {
            return None;
        }
        let scores = self.score(text);
        let suggestion = scores.best();
        tracing::debug!(?scores, ?suggestion, "scored draft text");
        suggestion
    }

    /// First keyword (as configured, accents included) found in `text`.
    pub fn detect_keyword(&self, text: &str) -> Option<&str> {
        if text.trim().is_empty() {
            return None;
        }
        let normalized = normalize(text);
        self.compiled
            .iter()
            .flat_map(|rule| rule.keywords.iter())
            .find(|keyword| keyword.pattern.is_match(&normalized))
            .map(|keyword| keyword.word.as_str())
    }

    /// First keyword of the `priority` tier found in `text`. Use this to
    /// explain a suggestion; `detect_keyword` may name another tier.
    pub fn keyword_for(&self, text: &str, priority: Priority) -> Option<&str> {
        if text.trim().is_empty() {
            return None;
        }
        let normalized = normalize(text);
        self.compiled
            .iter()
            .filter(|rule| rule.priority == priority)
            .flat_map(|rule| rule.keywords.iter())
            .find(|keyword| keyword.pattern.is_match(&normalized))
            .map(|keyword| keyword.word.as_str())
    }
}

impl Default for SuggestionEngine {
    fn default() -> Self {
        Self::default_rules()
    }
}

fn compile_rule(rule: &PriorityRule) -> Result<CompiledRule, RuleError> {
    let keywords = rule
        .keywords
        .iter()
        .map(|keyword| {
            let normalized = normalize(keyword.word.trim());
            if normalized.trim().is_empty() {
                return Err(RuleError::EmptyKeyword {
                    tier: rule.priority.to_string(),
                });
            }
            if keyword.weight == 0 {
                return Err(RuleError::ZeroWeight {
                    word: keyword.word.clone(),
                });
            }
            let pattern =
                Regex::new(&keyword_pattern(normalized.trim())).map_err(|e| {
                    RuleError::InvalidPattern {
                        word: keyword.word.clone(),
                        message: e.to_string(),
                    }
                })?;
            Ok(CompiledKeyword {
                word: keyword.word.trim().to_string(),
                weight: keyword.weight,
                pattern,
            })
        })
        .collect::<Result<Vec<_>, _>>()?;

    Ok(CompiledRule {
        priority: rule.priority,
        keywords,
    })
}

/// Whole-word pattern for an already normalized keyword. Inner whitespace
/// matches any run of whitespace; word boundaries are only asserted on edges
/// that are word characters.
fn keyword_pattern(normalized: &str) -> String {
    let body = normalized
        .split_whitespace()
        .map(regex::escape)
        .collect::<Vec<_>>()
        .join(r"\s+");

    let is_word = |c: char| c.is_alphanumeric() || c == '_';
    let lead = if normalized.chars().next().is_some_and(is_word) {
        r"\b"
    } else {
        ""
    };
    let trail = if normalized.chars().last().is_some_and(is_word) {
        r"\b"
    } else {
        ""
    };
    format!("{lead}{body}{trail}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::suggest::Keyword;
    use proptest::prelude::*;

    fn engine() -> SuggestionEngine {
        SuggestionEngine::default_rules()
    }

    #[test]
    fn no_keyword_means_no_suggestion() {
        let engine = engine();
        assert_eq!(engine.suggest("pagar conta de luz"), None);
        assert_eq!(engine.suggest(""), None);
        assert_eq!(engine.suggest("   "), None);
        assert_eq!(engine.detect_keyword("   "), None);
    }

    #[test]
    fn single_keyword_selects_its_tier() {
        let engine = engine();
        assert_eq!(engine.suggest("urgente: pagar conta"), Some(Priority::High));
        assert_eq!(engine.suggest("ligar amanhã"), Some(Priority::Medium));
        assert_eq!(engine.suggest("ler livro quando der"), Some(Priority::Low));
    }

    #[test]
    fn matching_ignores_case_and_accents() {
        let engine = engine();
        assert_eq!(engine.suggest("URGENTE"), Some(Priority::High));
        assert_eq!(engine.suggest("urgente"), Some(Priority::High));
        assert_eq!(engine.suggest("urgénte"), Some(Priority::High));
        assert_eq!(engine.suggest("revisar amanha"), Some(Priority::Medium));
        assert_eq!(engine.suggest("AMANHÃ cedo"), Some(Priority::Medium));
    }

    #[test]
    fn only_whole_words_match() {
        let engine = engine();
        assert_eq!(engine.suggest("agorafobia"), None);
        assert_eq!(engine.suggest("prazos longos"), None);
        assert_eq!(engine.suggest("quando derrubar"), None);
        assert_eq!(engine.suggest("fazer (hoje)"), Some(Priority::High));
    }

    #[test]
    fn phrase_keywords_span_any_whitespace() {
        let engine = engine();
        assert_eq!(engine.suggest("qualquer   dia desses"), Some(Priority::Low));
        assert_eq!(engine.detect_keyword("Quando\tder"), Some("quando der"));
    }

    #[test]
    fn occurrences_multiply_weight() {
        let engine = engine();
        let scores = engine.score("importante importante hoje");
        assert_eq!(scores.medium, 4);
        assert_eq!(scores.high, 2);
        assert_eq!(scores.best(), Some(Priority::Medium));
    }

    #[test]
    fn ties_go_to_earlier_tier() {
        let engine = SuggestionEngine::new(vec![
            PriorityRule::new(Priority::Medium, vec![Keyword::new("beta", 2)]),
            PriorityRule::new(Priority::High, vec![Keyword::new("alpha", 2)]),
        ])
        .unwrap();
        assert_eq!(engine.suggest("alpha beta"), Some(Priority::High));
        assert_eq!(engine.suggest("beta alpha"), Some(Priority::High));
    }

    #[test]
    fn low_and_medium_tie_prefers_medium() {
        let engine = SuggestionEngine::new(vec![
            PriorityRule::new(Priority::Low, vec![Keyword::new("later", 1)]),
            PriorityRule::new(Priority::Medium, vec![Keyword::new("soon", 1)]),
        ])
        .unwrap();
        assert_eq!(engine.suggest("later soon"), Some(Priority::Medium));
    }

    #[test]
    fn detect_keyword_returns_configured_spelling_in_tier_order() {
        let engine = engine();
        assert_eq!(engine.detect_keyword("fazer AMANHA"), Some("amanhã"));
        assert_eq!(engine.detect_keyword("depois, hoje"), Some("hoje"));
        assert_eq!(engine.detect_keyword("nada aqui"), None);
    }

    #[test]
    fn keyword_for_explains_the_winning_tier() {
        let engine = engine();
        let text = "hoje importante importante";
        assert_eq!(engine.suggest(text), Some(Priority::Medium));
        assert_eq!(engine.detect_keyword(text), Some("hoje"));
        assert_eq!(engine.keyword_for(text, Priority::Medium), Some("importante"));
        assert_eq!(engine.keyword_for(text, Priority::Low), None);
    }

    #[test]
    fn rules_are_kept_in_board_order() {
        let engine = SuggestionEngine::new(vec![
            PriorityRule::new(Priority::Low, vec![Keyword::new("x", 1)]),
            PriorityRule::new(Priority::High, vec![Keyword::new("y", 1)]),
        ])
        .unwrap();
        let tiers: Vec<_> = engine.rules().iter().map(|r| r.priority).collect();
        assert_eq!(tiers, vec![Priority::High, Priority::Low]);
    }

    #[test]
    fn invalid_rules_are_rejected() {
        let empty = SuggestionEngine::new(vec![PriorityRule::new(
            Priority::High,
            vec![Keyword::new("  ", 1)],
        )]);
        assert!(matches!(empty, Err(RuleError::EmptyKeyword { .. })));

        let zero = SuggestionEngine::new(vec![PriorityRule::new(
            Priority::High,
            vec![Keyword::new("now", 0)],
        )]);
        assert!(matches!(zero, Err(RuleError::ZeroWeight { .. })));

        let duplicate = SuggestionEngine::new(vec![
            PriorityRule::new(Priority::Low, vec![]),
            PriorityRule::new(Priority::Low, vec![]),
        ]);
        assert_eq!(duplicate.unwrap_err(), RuleError::DuplicateTier("low".into()));
    }

    #[test]
    fn punctuation_keywords_still_match() {
        let engine = SuggestionEngine::new(vec![PriorityRule::new(
            Priority::High,
            vec![Keyword::new("!!", 1)],
        )])
        .unwrap();
        assert_eq!(engine.suggest("ligar!!"), Some(Priority::High));
    }

    fn accented(text: &str) -> String {
        text.chars()
            .map(|c| match c {
                'a' => 'á',
                'e' => 'ê',
                'o' => 'õ',
                'c' => 'ç',
                'u' => 'ü',
                other => other,
            })
            .collect()
    }

    proptest! {
        #[test]
        fn suggestion_ignores_case(text in "[a-zA-Z ]{0,40}") {
            let engine = engine();
            let expected = engine.suggest(&text);
            prop_assert_eq!(engine.suggest(&text.to_uppercase()), expected);
            prop_assert_eq!(engine.suggest(&text.to_lowercase()), expected);
        }

        #[test]
        fn suggestion_ignores_accents(text in "[a-z ]{0,40}") {
            let engine = engine();
            prop_assert_eq!(engine.suggest(&accented(&text)), engine.suggest(&text));
        }

        #[test]
        fn keywordless_text_has_no_suggestion(text in "[0-9 .,;-]{0,40}") {
            prop_assert_eq!(engine().suggest(&text), None);
        }
    }
}
