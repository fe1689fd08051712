//! Orrery CLI - Command-line interface for Orrery
//!
//! This is the main entry point for users interacting with Orrery.
//! It provides commands for importing route data and querying routes.

use clap::{Args, Parser, Subcommand};
use colored::Colorize;
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod commands;
mod config;

#[derive(Parser)]
#[command(name = "orrery")]
#[command(author = "Orrery Contributors")]
#[command(version)]
#[command(about = "Shortest routes between named nodes", long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

/// Where route data is read from.
#[derive(Args, Debug, Default)]
pub struct DataArgs {
    /// Route store directory (defaults to the configured store)
    #[arg(long, conflicts_with = "data")]
    pub store: Option<PathBuf>,

    /// Read route data from a dataset file instead of the store
    #[arg(long)]
    pub data: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Initialize Orrery in a directory
    Init {
        /// Path to initialize (defaults to current directory)
        #[arg(default_value = ".")]
        path: PathBuf,
    },

    /// Import a dataset file into the route store
    Import {
        /// Dataset JSON file
        file: PathBuf,

        /// Route store directory (defaults to the configured store)
        #[arg(long)]
        store: Option<PathBuf>,
    },

    /// Find the shortest route between two nodes
    Route {
        /// Source node name
        from: String,

        /// Destination node name
        to: String,

        #[command(flatten)]
        source: DataArgs,

        /// Output as JSON instead of formatted text
        #[arg(long)]
        json: bool,
    },

    /// List known nodes
    Nodes {
        #[command(flatten)]
        source: DataArgs,
    },

    /// Show configuration and store statistics
    Status {
        /// Path to check (defaults to current directory)
        #[arg(default_value = ".")]
        path: PathBuf,
    },
}

fn main() {
    let cli = Cli::parse();

    // Set up logging
    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false),
        )
        .with(tracing_subscriber::EnvFilter::new(filter))
        .init();

    let result = match cli.command {
        Commands::Init { path } => commands::init(&path),
        Commands::Import { file, store } => commands::import(&file, store.as_deref()),
        Commands::Route {
            from,
            to,
            source,
            json,
        } => commands::route(&from, &to, &source, json),
        Commands::Nodes { source } => commands::nodes(&source),
        Commands::Status { path } => commands::status(&path),
    };

    if let Err(e) = result {
        eprintln!("{} {}", "error:".red().bold(), e);
        std::process::exit(1);
    }
}
