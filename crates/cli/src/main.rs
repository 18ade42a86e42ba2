//! Roadmap CLI - Data migrations for the flat-file store.
//!
//! # Usage
//!
//! ```bash
//! # Report whether the owner migration has work to do
//! roadmap-cli migrate check
//!
//! # Run the owner migration and print its report
//! roadmap-cli migrate owners
//!
//! # Point at a specific data directory
//! roadmap-cli --data-dir ./data migrate owners
//! ```
//!
//! # Commands
//!
//! - `migrate check` - Report pending migration work
//! - `migrate owners` - Backfill project owners and the default owner

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use roadmap_server::config::data_dir_from_env;
use roadmap_server::store::FileStore;

mod commands;

#[derive(Parser)]
#[command(name = "roadmap-cli")]
#[command(author, version, about = "Roadmap planner CLI tools")]
struct Cli {
    /// Data directory (defaults to `ROADMAP_DATA_DIR`, then `data`)
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run data migrations
    Migrate {
        #[command(subcommand)]
        target: MigrateTarget,
    },
}

#[derive(Subcommand)]
enum MigrateTarget {
    /// Report whether the owner migration has work to do
    Check,
    /// Assign every project without an owner to the default owner
    Owners,
}

#[tokio::main]
async fn main() {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    if let Err(e) = run(cli).await {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), commands::CommandError> {
    let data_dir = cli.data_dir.unwrap_or_else(data_dir_from_env);
    let store = FileStore::new(data_dir);

    match cli.command {
        Commands::Migrate { target } => match target {
            MigrateTarget::Check => commands::migrate::check(&store).await,
            MigrateTarget::Owners => {
                commands::migrate::owners(&store).await?;
            }
        },
    }
    Ok(())
}
