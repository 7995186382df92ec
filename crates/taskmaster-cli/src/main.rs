use clap::{CommandFactory, Parser, Subcommand};

mod commands;
mod notifier;

#[derive(Parser)]
#[command(name = "taskmaster", version, about = "TaskMaster CLI")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Task board management
    Task {
        #[command(subcommand)]
        action: commands::task::TaskAction,
    },
    /// Suggest a priority for some text
    Suggest {
        /// Text to score
        #[arg(required = true, num_args = 1..)]
        text: Vec<String>,
        /// Show per-tier scores
        #[arg(long)]
        explain: bool,
        /// Print JSON
        #[arg(long)]
        json: bool,
    },
    /// Suggestion history
    History {
        #[command(subcommand)]
        action: commands::history::HistoryAction,
    },
    /// Theme selection
    Theme {
        #[command(subcommand)]
        action: commands::theme::ThemeAction,
    },
    /// Configuration management
    Config {
        #[command(subcommand)]
        action: commands::config::ConfigAction,
    },
    /// Generate shell completions
    Completions {
        shell: clap_complete::Shell,
    },
}

fn init_tracing() {
    // Quiet by default; TASKMASTER_LOG=info or =debug for more.
    let filter = tracing_subscriber::EnvFilter::try_from_env("TASKMASTER_LOG")
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() {
    init_tracing();

    let cli = Cli::parse();
    let result = match cli.command {
        Commands::Task { action } => commands::task::run(action),
        Commands::Suggest {
            text,
            explain,
            json,
        } => commands::suggest::run(&text.join(" "), explain, json),
        Commands::History { action } => commands::history::run(action),
        Commands::Theme { action } => commands::theme::run(action),
        Commands::Config { action } => commands::config::run(action),
        Commands::Completions { shell } => {
            clap_complete::generate(shell, &mut Cli::command(), "taskmaster", &mut std::io::stdout());
            Ok(())
        }
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
