//! Priority suggestion command.

use serde::Serialize;
use taskmaster_core::{Config, FileStore, Priority, SuggestionLog, TierScores};

use super::CommandResult;

#[derive(Serialize)]
struct SuggestOutput<'a> {
    text: &'a str,
    suggestion: Option<Priority>,
    keyword: Option<&'a str>,
    scores: TierScores,
}

pub fn run(text: &str, explain: bool, json: bool) -> CommandResult {
    let config = Config::load_or_default();
    let engine = config.suggestion_engine()?;

    let suggestion = engine.suggest(text);
    let output = SuggestOutput {
        text,
        suggestion,
        keyword: suggestion.and_then(|priority| engine.keyword_for(text, priority)),
        scores: engine.score(text),
    };

    if let Some(priority) = output.suggestion {
        let mut storage = FileStore::open()?;
        let mut history = SuggestionLog::load(&storage, config.suggestions.history_capacity);
        history.record(text, priority);
        history.save(&mut storage)?;
    }

    if json {
        println!("{}", serde_json::to_string_pretty(&output)?);
        return Ok(());
    }

    match (output.suggestion, output.keyword) {
        (Some(priority), Some(keyword)) => println!("{priority} (keyword: {keyword})"),
        (Some(priority), None) => println!("{priority}"),
        (None, _) => println!("none"),
    }
    if explain {
        for priority in Priority::ALL {
            println!("  {:<6} {}", priority.as_str(), output.scores.get(priority));
        }
    }
    Ok(())
}
