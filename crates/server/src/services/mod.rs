//! Business services over the flat-file store.
//!
//! Each service borrows the [`FileStore`](crate::store::FileStore) and runs
//! its whole read-validate-write sequence for one collection under that
//! collection's lock.
//!
//! # Lock order
//!
//! When two files are involved, the product-line or owner file is locked
//! first and the projects file second. Project writes resolve their foreign
//! keys before locking the projects file, so no path ever holds the projects
//! lock while waiting for another one.

pub mod migration;
pub mod owners;
pub mod product_lines;
pub mod projects;
pub mod settings;

use std::fmt;

use thiserror::Error;

use roadmap_core::ValidationError;

use crate::store::StoreError;

pub use migration::{MigrationReport, Migrator};
pub use owners::{OwnerService, OwnerWithCount};
pub use product_lines::ProductLineService;
pub use projects::ProjectService;
pub use settings::SettingsService;

/// Entity kinds named in service errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntityKind {
    ProductLine,
    Project,
    Owner,
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::ProductLine => "product line",
            Self::Project => "project",
            Self::Owner => "owner",
        })
    }
}

/// Errors returned by services.
#[derive(Debug, Error)]
pub enum ServiceError {
    /// A record failed field-level validation.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// No record with the given id.
    #[error("{entity} not found: {id}")]
    NotFound { entity: EntityKind, id: String },

    /// Another record already uses the name.
    #[error("{entity} name already exists: {name}")]
    DuplicateName { entity: EntityKind, name: String },

    /// Deletion refused because projects still reference the record.
    #[error("{entity} has {count} related projects and cannot be deleted")]
    Referenced { entity: EntityKind, count: usize },

    /// Storage failed.
    #[error(transparent)]
    Store(#[from] StoreError),
}

impl ServiceError {
    pub(crate) fn not_found(entity: EntityKind, id: impl fmt::Display) -> Self {
        Self::NotFound {
            entity,
            id: id.to_string(),
        }
    }
}
