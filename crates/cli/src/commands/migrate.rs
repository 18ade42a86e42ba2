//! Data migration commands.
//!
//! # Usage
//!
//! ```bash
//! # Report pending work
//! roadmap-cli migrate check
//!
//! # Run the owner migration
//! roadmap-cli migrate owners
//! ```
//!
//! # Environment Variables
//!
//! - `ROADMAP_DATA_DIR` - Data directory used when `--data-dir` is absent
//!
//! The server runs the same migration on startup. These commands exist to
//! inspect or apply it without starting the server.

use roadmap_server::services::{MigrationReport, Migrator};
use roadmap_server::store::FileStore;

use super::CommandError;

/// Print whether the owner migration has work to do.
pub async fn check(store: &FileStore) {
    let needed = Migrator::new(store).check_migration_needed().await;
    tracing::info!(data_dir = %store.data_dir().display(), needed, "Checked owner migration");

    #[allow(clippy::print_stdout)]
    {
        if needed {
            println!("Owner migration needed in {}", store.data_dir().display());
        } else {
            println!("Data in {} is up to date", store.data_dir().display());
        }
    }
}

/// Run the owner migration and print its report as JSON.
///
/// # Errors
///
/// Returns `CommandError::MigrationFailed` with the report's errors if the
/// migration did not complete.
pub async fn owners(store: &FileStore) -> Result<MigrationReport, CommandError> {
    tracing::info!(data_dir = %store.data_dir().display(), "Running owner migration...");
    let report = Migrator::new(store).migrate_owners().await;

    #[allow(clippy::print_stdout)]
    {
        println!("{}", serde_json::to_string_pretty(&report)?);
    }

    if report.success {
        tracing::info!("Owner migration complete!");
        Ok(report)
    } else {
        Err(CommandError::MigrationFailed(report.errors))
    }
}
