use clap::Subcommand;
use taskmaster_core::{Config, FileStore, SuggestionLog};

use super::CommandResult;

#[derive(Subcommand)]
pub enum HistoryAction {
    /// Show recent suggestions, newest first
    Show {
        /// Maximum number of entries
        #[arg(long, default_value = "20")]
        limit: usize,
        /// Print JSON
        #[arg(long)]
        json: bool,
    },
    /// Forget all recorded suggestions
    Clear,
}

pub fn run(action: HistoryAction) -> CommandResult {
    let config = Config::load_or_default();
    let mut storage = FileStore::open()?;
    let mut history = SuggestionLog::load(&storage, config.suggestions.history_capacity);

    match action {
        HistoryAction::Show { limit, json } => {
            let recent = history.recent(limit);
            if json {
                println!("{}", serde_json::to_string_pretty(&recent)?);
            } else if recent.is_empty() {
                println!("no suggestions recorded");
            } else {
                for record in recent {
                    println!(
                        "{}  {:<6}  {}",
                        record.at.format("%Y-%m-%d %H:%M"),
                        record.suggested.as_str(),
                        record.text
                    );
                }
            }
        }
        HistoryAction::Clear => {
            history.clear();
            history.save(&mut storage)?;
            println!("history cleared");
        }
    }
    Ok(())
}
