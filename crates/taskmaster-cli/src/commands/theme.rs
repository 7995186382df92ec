use clap::Subcommand;
use taskmaster_core::{FileStore, Theme};

use super::CommandResult;

#[derive(Subcommand)]
pub enum ThemeAction {
    /// Print the selected theme
    Get,
    /// Select a theme (light or dark)
    Set {
        theme: Theme,
    },
    /// Switch between light and dark
    Toggle,
}

pub fn run(action: ThemeAction) -> CommandResult {
    let mut storage = FileStore::open()?;
    match action {
        ThemeAction::Get => println!("{}", Theme::load(&storage)),
        ThemeAction::Set { theme } => {
            theme.save(&mut storage)?;
            println!("{theme}");
        }
        ThemeAction::Toggle => println!("{}", Theme::toggle(&mut storage)?),
    }
    Ok(())
}
