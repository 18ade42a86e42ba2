//! CLI subcommands.

pub mod migrate;

use thiserror::Error;

/// Errors returned by CLI commands.
#[derive(Debug, Error)]
pub enum CommandError {
    #[error("Migration failed: {}", .0.join("; "))]
    MigrationFailed(Vec<String>),

    #[error("Could not encode report: {0}")]
    Report(#[from] serde_json::Error),
}
