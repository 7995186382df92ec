//! Task board commands for CLI.

use clap::Subcommand;
use taskmaster_core::{Priority, Task, TaskId};

use super::{flush_events, open_board, Board, CommandResult};

#[derive(Subcommand)]
pub enum TaskAction {
    /// Add a task; the priority is suggested from the text unless given
    Add {
        /// Task text
        #[arg(required = true, num_args = 1..)]
        text: Vec<String>,
        /// Pick the priority manually (high, medium, low)
        #[arg(long, short)]
        priority: Option<Priority>,
        /// Print the created task as JSON
        #[arg(long)]
        json: bool,
    },
    /// Show the board
    List {
        /// Only show one column
        #[arg(long, short)]
        priority: Option<Priority>,
        /// Print JSON
        #[arg(long)]
        json: bool,
    },
    /// Mark a task done, or not done
    Toggle {
        /// Task ID
        id: TaskId,
    },
    /// Remove a task (can be undone)
    Remove {
        /// Task ID
        id: TaskId,
    },
    /// Restore the most recently removed task
    Undo,
    /// Move a task to another column
    Move {
        /// Task ID
        id: TaskId,
        /// Destination priority
        priority: Priority,
    },
    /// Reorder a column; list every task ID of the column in the new order
    Reorder {
        /// Column to reorder
        priority: Priority,
        /// Task IDs in the new order
        #[arg(required = true, num_args = 1..)]
        ids: Vec<TaskId>,
    },
}

pub fn run(action: TaskAction) -> CommandResult {
    let mut board = open_board()?;
    let result = apply(&mut board, action);
    flush_events(&mut board);
    result
}

fn apply(board: &mut Board, action: TaskAction) -> CommandResult {
    match action {
        TaskAction::Add {
            text,
            priority,
            json,
        } => match board.add_task(&text.join(" "), priority)? {
            Some(task) if json => println!("{}", serde_json::to_string_pretty(&task)?),
            Some(task) => println!("Task added: {} [{}] {}", task.id, task.priority, task.text),
            None => println!("nothing to add"),
        },
        TaskAction::List { priority, json } => {
            let tiers: Vec<Priority> = match priority {
                Some(p) => vec![p],
                None => Priority::ALL.to_vec(),
            };
            if json {
                let tasks: Vec<&Task> = board
                    .tasks()
                    .iter()
                    .filter(|t| tiers.contains(&t.priority))
                    .collect();
                println!("{}", serde_json::to_string_pretty(&tasks)?);
            } else {
                print_board(board, &tiers);
            }
        }
        TaskAction::Toggle { id } => match board.toggle_done(id)? {
            Some(task) if task.done => println!("Task done: {id}"),
            Some(_) => println!("Task reopened: {id}"),
            None => println!("Task not found: {id}"),
        },
        TaskAction::Remove { id } => match board.remove(id)? {
            Some(_) => println!("Task removed: {id} (run `taskmaster task undo` to restore)"),
            None => println!("Task not found: {id}"),
        },
        TaskAction::Undo => match board.undo_remove()? {
            Some(task) => println!("Task restored: {} {}", task.id, task.text),
            None => println!("nothing to undo"),
        },
        TaskAction::Move { id, priority } => match board.change_priority(id, priority)? {
            Some(task) => println!("Task moved: {} -> {}", task.id, task.priority),
            None if board.store().get(id).is_some() => println!("Task already in {priority}: {id}"),
            None => println!("Task not found: {id}"),
        },
        TaskAction::Reorder { priority, ids } => {
            if !board.store().is_tier_permutation(priority, &ids) {
                let expected: Vec<String> = board
                    .column(priority)
                    .iter()
                    .map(|t| t.id.to_string())
                    .collect();
                return Err(format!(
                    "reorder must list each {priority} task exactly once (expected: {})",
                    expected.join(" ")
                )
                .into());
            }
            board.reorder_within_priority(priority, &ids)?;
            println!("Column reordered: {priority}");
        }
    }
    Ok(())
}

fn print_board(board: &Board, tiers: &[Priority]) {
    for tier in tiers {
        let column = board.column(*tier);
        println!("{} ({})", tier.as_str().to_uppercase(), column.len());
        for task in column {
            let mark = if task.done { "x" } else { " " };
            println!("  [{mark}] {}  {}", task.id, task.text);
        }
    }
    let progress = board.progress();
    println!("Completed: {} / {}", progress.done, progress.total);
}
