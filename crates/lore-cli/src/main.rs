use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "lore")]
#[command(about = "Lore - client for a document-grounded QA assistant", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Ask the assistant one question
    Chat {
        /// The question to ask
        query: String,
    },
    /// Upload documents for indexing (admin only)
    Upload {
        /// Files to upload, one ingestion call each
        files: Vec<PathBuf>,
    },
    /// Inspect or clear the persisted conversation log
    History {
        #[command(subcommand)]
        action: HistoryAction,
    },
}

#[derive(Subcommand)]
enum HistoryAction {
    /// Print the conversation log
    Show,
    /// Delete the entire conversation log
    Clear,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Chat { query } => commands::chat::run(&query).await?,
        Commands::Upload { files } => commands::upload::run(&files).await?,
        Commands::History { action } => match action {
            HistoryAction::Show => commands::history::show().await?,
            HistoryAction::Clear => commands::history::clear().await?,
        },
    }

    Ok(())
}
