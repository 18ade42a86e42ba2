//! One-time data migrations.
//!
//! # Owner migration
//!
//! Projects created before owners existed have no `ownerId`. The migration:
//!
//! 1. creates `owners.json` if it is missing,
//! 2. inserts the reserved default owner at the front if it is missing,
//! 3. assigns every project without a non-empty `ownerId` to that owner.
//!
//! Entries of `projects` that are not objects are logged and left in place.
//!
//! Projects are patched as raw JSON because legacy records do not decode as
//! [`roadmap_core::Project`]. Every step checks before it writes, so running
//! the migration again is a no-op. Nothing is ever deleted.

use serde::Serialize;
use serde_json::{Map, Value};

use roadmap_core::{Owner, OwnerId};

use crate::store::{
    FileStore, OwnersDocument, ProductLinesDocument, ProjectsDocument, StoreError, StoreKey,
};

const OWNER_FIELD: &str = "ownerId";

/// Outcome of one owner migration run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MigrationReport {
    pub success: bool,
    pub owners_file_created: bool,
    pub default_owner_created: bool,
    pub projects_migrated: usize,
    pub total_projects: usize,
    pub errors: Vec<String>,
}

/// Runs migrations against a data directory.
pub struct Migrator<'a> {
    store: &'a FileStore,
}

impl<'a> Migrator<'a> {
    /// Create a migrator for the given store.
    #[must_use]
    pub const fn new(store: &'a FileStore) -> Self {
        Self { store }
    }

    /// Whether the owner migration has anything to do.
    ///
    /// True if `owners.json` is missing or any project lacks an owner. A
    /// missing projects file needs nothing; an unreadable one is reported as
    /// needing migration.
    pub async fn check_migration_needed(&self) -> bool {
        match self.pending_work().await {
            Ok(needed) => needed,
            Err(e) => {
                tracing::warn!(error = %e, "Could not inspect data files, assuming migration needed");
                true
            }
        }
    }

    /// Run the owner migration.
    ///
    /// Failures are recorded in the report rather than returned, so a caller
    /// at startup can log them and keep booting with whatever was migrated.
    pub async fn migrate_owners(&self) -> MigrationReport {
        let mut report = MigrationReport::default();
        match self.run(&mut report).await {
            Ok(()) => report.success = true,
            Err(e) => {
                tracing::error!(error = %e, "Owner migration failed");
                report.errors.push(e.to_string());
            }
        }

        tracing::info!(
            success = report.success,
            owners_file_created = report.owners_file_created,
            default_owner_created = report.default_owner_created,
            projects_migrated = report.projects_migrated,
            total_projects = report.total_projects,
            "Owner migration finished"
        );
        report
    }

    /// Create empty product-line and project files where none exist.
    ///
    /// Returns the files that were created.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Io` if a file cannot be checked or written.
    pub async fn bootstrap_collections(&self) -> Result<Vec<StoreKey>, StoreError> {
        let mut created = Vec::new();

        let file = self.store.lock(StoreKey::ProductLines).await;
        if !file.exists().await? {
            file.write(&ProductLinesDocument::default()).await?;
            created.push(StoreKey::ProductLines);
        }
        drop(file);

        let file = self.store.lock(StoreKey::Projects).await;
        if !file.exists().await? {
            file.write(&ProjectsDocument::default()).await?;
            created.push(StoreKey::Projects);
        }

        for key in &created {
            tracing::info!(file = %key, "Created empty data file");
        }
        Ok(created)
    }

    async fn pending_work(&self) -> Result<bool, StoreError> {
        if !self.store.exists(StoreKey::Owners).await? {
            return Ok(true);
        }

        let file = self.store.lock(StoreKey::Projects).await;
        if !file.exists().await? {
            return Ok(false);
        }
        let doc: Value = file.read().await?;
        Ok(project_entries(&doc)?.iter().any(lacks_owner))
    }

    async fn run(&self, report: &mut MigrationReport) -> Result<(), StoreError> {
        let owners = self.store.lock(StoreKey::Owners).await;
        let mut doc: OwnersDocument = if owners.exists().await? {
            owners.read().await?
        } else {
            let empty = OwnersDocument::default();
            owners.write(&empty).await?;
            report.owners_file_created = true;
            tracing::info!("Created owners file");
            empty
        };

        if !doc.owners.iter().any(|owner| owner.id.is_default_owner()) {
            doc.owners.insert(0, Owner::default_owner());
            owners.write(&doc).await?;
            report.default_owner_created = true;
            tracing::info!(owner_id = OwnerId::DEFAULT, "Created default owner");
        }
        drop(owners);

        let projects = self.store.lock(StoreKey::Projects).await;
        if !projects.exists().await? {
            tracing::info!("No projects file, skipping project migration");
            return Ok(());
        }

        let mut doc: Value = projects.read().await?;
        let entries = project_entries_mut(&mut doc)?;
        report.total_projects = entries.len();

        let mut migrated = 0;
        for (index, entry) in entries.iter_mut().enumerate() {
            let Some(record) = entry.as_object_mut() else {
                tracing::warn!(index, "Skipping project entry that is not an object");
                continue;
            };
            if !record_lacks_owner(record) {
                continue;
            }
            record.insert(
                OWNER_FIELD.to_owned(),
                Value::String(OwnerId::DEFAULT.to_owned()),
            );
            migrated += 1;
            tracing::debug!(project_id = ?record.get("id"), "Assigned default owner");
        }

        if migrated > 0 {
            projects.write(&doc).await?;
        }
        report.projects_migrated = migrated;
        Ok(())
    }
}

fn project_entries(doc: &Value) -> Result<&[Value], StoreError> {
    match doc.get("projects") {
        None => Ok(&[]),
        Some(Value::Array(entries)) => Ok(entries),
        Some(_) => Err(not_an_array()),
    }
}

fn project_entries_mut(doc: &mut Value) -> Result<&mut [Value], StoreError> {
    match doc.get_mut("projects") {
        None => Ok(&mut []),
        Some(Value::Array(entries)) => Ok(entries),
        Some(_) => Err(not_an_array()),
    }
}

fn not_an_array() -> StoreError {
    StoreError::DataCorruption("\"projects\" is not an array".to_owned())
}

fn lacks_owner(entry: &Value) -> bool {
    entry.as_object().is_some_and(record_lacks_owner)
}

fn record_lacks_owner(record: &Map<String, Value>) -> bool {
    match record.get(OWNER_FIELD) {
        None | Some(Value::Null) => true,
        Some(Value::String(id)) => id.trim().is_empty(),
        Some(_) => false,
    }
}
