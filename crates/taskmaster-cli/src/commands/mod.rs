pub mod config;
pub mod history;
pub mod suggest;
pub mod task;
pub mod theme;

use taskmaster_core::{BoardController, Config, FileStore};

use crate::notifier::TerminalNotifier;

pub type CommandResult = Result<(), Box<dyn std::error::Error>>;

pub type Board = BoardController<FileStore, TerminalNotifier>;

/// Open the board in the data directory with the current configuration.
pub fn open_board() -> Result<Board, Box<dyn std::error::Error>> {
    let config = Config::load_or_default();
    let storage = FileStore::open()?;
    let notifier = TerminalNotifier::new(config.notifications.enabled);
    Ok(BoardController::from_config(storage, &config, notifier)?)
}

/// Log and discard the events produced by a command.
pub fn flush_events(board: &mut Board) {
    for event in board.take_events() {
        tracing::debug!(?event, "board event");
    }
}
