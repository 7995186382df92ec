//! Priority rule table.

use serde::{Deserialize, Serialize};

use crate::task::Priority;

/// A keyword and its relative importance within a tier.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Keyword {
    pub word: String,
    pub weight: u32,
}

impl Keyword {
    pub fn new(word: impl Into<String>, weight: u32) -> Self {
        Self {
            word: word.into(),
            weight,
        }
    }
}

/// Keywords that point at one tier.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PriorityRule {
    pub priority: Priority,
    pub keywords: Vec<Keyword>,
}

impl PriorityRule {
    pub fn new(priority: Priority, keywords: Vec<Keyword>) -> Self {
        Self { priority, keywords }
    }
}

/// The built-in table.
pub fn default_rules() -> Vec<PriorityRule> {
    vec![
        PriorityRule::new(
            Priority::High,
            vec![
                Keyword::new("urgente", 3),
                Keyword::new("hoje", 2),
                Keyword::new("agora", 2),
                Keyword::new("prazo", 2),
            ],
        ),
        PriorityRule::new(
            Priority::Medium,
            vec![Keyword::new("importante", 2), Keyword::new("amanhã", 1)],
        ),
        PriorityRule::new(
            Priority::Low,
            vec![
                Keyword::new("depois", 1),
                Keyword::new("qualquer dia", 2),
                Keyword::new("quando der", 2),
            ],
        ),
    ]
}
