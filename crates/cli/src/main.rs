//! Parley CLI — the main entry point.
//!
//! Commands:
//! - `chat`    — Interactive conversation on stdin/stdout
//! - `ask`     — Send a single message
//! - `queue`   — Inspect and drain the deferred queue
//! - `tools`   — List the built-in tools
//! - `config`  — Show or initialize configuration

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(
    name = "parley",
    about = "Parley — intent-routing assistant with a durable deferred queue",
    version,
    author
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Use a named session with its own queue file
    #[arg(short, long, global = true, env = "PARLEY_SESSION")]
    session: Option<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// Chat interactively
    Chat,

    /// Send a single message and print the reply
    Ask {
        /// The message to send
        #[arg(short, long)]
        message: String,
    },

    /// Manage the deferred queue
    Queue {
        #[command(subcommand)]
        action: QueueAction,
    },

    /// List the built-in tools
    Tools,

    /// Show or initialize configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand)]
enum QueueAction {
    /// List deferred items (pending only unless --all)
    List {
        /// Include completed items
        #[arg(short, long)]
        all: bool,

        /// Print items as JSON
        #[arg(long)]
        json: bool,
    },

    /// Mark a deferred item as completed
    Complete {
        /// The item id
        id: String,
    },

    /// Answer every pending item and mark it completed
    Reprocess {
        /// Print the report as JSON
        #[arg(long)]
        json: bool,
    },
}

#[derive(Subcommand)]
enum ConfigAction {
    /// Print the effective configuration
    Show,

    /// Write a default config file if none exists
    Init,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // Initialize tracing
    let filter = if cli.verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(filter)),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let session = cli.session.as_deref();
    match cli.command {
        Commands::Chat => commands::chat::run(session).await?,
        Commands::Ask { message } => commands::chat::ask(session, &message).await?,
        Commands::Queue { action } => match action {
            QueueAction::List { all, json } => commands::queue::list(session, all, json).await?,
            QueueAction::Complete { id } => commands::queue::complete(session, &id).await?,
            QueueAction::Reprocess { json } => commands::queue::reprocess(session, json).await?,
        },
        Commands::Tools => commands::tools::run(),
        Commands::Config { action } => match action {
            ConfigAction::Show => commands::config_cmd::show()?,
            ConfigAction::Init => commands::config_cmd::init()?,
        },
    }

    Ok(())
}
