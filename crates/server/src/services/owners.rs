//! Owner operations: CRUD, color assignment, and project counts.

use serde::Serialize;

use roadmap_core::{Owner, OwnerId, OwnerPatch, assign_color};

use super::{EntityKind, ServiceError};
use crate::store::{FileStore, OwnersDocument, ProjectsDocument, StoreError, StoreKey};

/// Owner together with the number of projects assigned to it.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OwnerWithCount {
    #[serde(flatten)]
    pub owner: Owner,
    pub project_count: usize,
}

/// Owner service.
pub struct OwnerService<'a> {
    store: &'a FileStore,
}

impl<'a> OwnerService<'a> {
    /// Create a new owner service.
    #[must_use]
    pub const fn new(store: &'a FileStore) -> Self {
        Self { store }
    }

    /// List every owner in stored order.
    ///
    /// # Errors
    ///
    /// Returns `ServiceError::Store` if the file cannot be read.
    pub async fn list_all(&self) -> Result<Vec<Owner>, ServiceError> {
        let doc: OwnersDocument = self
            .store
            .lock(StoreKey::Owners)
            .await
            .read_or_default()
            .await?;
        Ok(doc.owners)
    }

    /// List every owner with its project count.
    ///
    /// Counts fall back to zero if the projects file cannot be read.
    ///
    /// # Errors
    ///
    /// Returns `ServiceError::Store` if the owners file cannot be read.
    pub async fn list_with_counts(&self) -> Result<Vec<OwnerWithCount>, ServiceError> {
        let owners = self.list_all().await?;
        let projects = match self.read_projects().await {
            Ok(doc) => doc.projects,
            Err(e) => {
                tracing::warn!(error = %e, "Could not read projects for owner counts");
                Vec::new()
            }
        };

        Ok(owners
            .into_iter()
            .map(|owner| {
                let project_count = projects
                    .iter()
                    .filter(|project| project.owner_id == owner.id)
                    .count();
                OwnerWithCount {
                    owner,
                    project_count,
                }
            })
            .collect())
    }

    /// Get an owner by id.
    ///
    /// # Errors
    ///
    /// Returns `ServiceError::NotFound` if no owner has this id.
    pub async fn get(&self, id: &OwnerId) -> Result<Owner, ServiceError> {
        self.list_all()
            .await?
            .into_iter()
            .find(|owner| &owner.id == id)
            .ok_or_else(|| ServiceError::not_found(EntityKind::Owner, id))
    }

    /// Whether an owner with this id exists.
    ///
    /// # Errors
    ///
    /// Returns `ServiceError::Store` if the file cannot be read.
    pub async fn exists(&self, id: &OwnerId) -> Result<bool, ServiceError> {
        Ok(self.list_all().await?.iter().any(|owner| &owner.id == id))
    }

    /// Create a visible owner with the next color in the rotation.
    ///
    /// # Errors
    ///
    /// Returns `ServiceError::Validation` for an invalid name and
    /// `ServiceError::DuplicateName` if the name is taken.
    pub async fn create(&self, name: &str) -> Result<Owner, ServiceError> {
        let name = name.trim();
        let file = self.store.lock(StoreKey::Owners).await;
        let mut doc: OwnersDocument = file.read_or_default().await?;

        ensure_unique(&doc.owners, name, None)?;
        let owner = Owner::new(name, assign_color(doc.owners.len()))?;

        doc.owners.push(owner.clone());
        file.write(&doc).await?;

        tracing::info!(owner_id = %owner.id, color = %owner.color, "Created owner");
        Ok(owner)
    }

    /// Merge a partial update into an owner.
    ///
    /// # Errors
    ///
    /// Returns `ServiceError::NotFound`, `ServiceError::Validation`, or
    /// `ServiceError::DuplicateName` if another owner has the new name.
    pub async fn update(&self, id: &OwnerId, mut patch: OwnerPatch) -> Result<Owner, ServiceError> {
        if let Some(name) = patch.name.as_mut() {
            *name = name.trim().to_owned();
        }

        let file = self.store.lock(StoreKey::Owners).await;
        let mut doc: OwnersDocument = file.read_or_default().await?;

        if !doc.owners.iter().any(|owner| &owner.id == id) {
            return Err(ServiceError::not_found(EntityKind::Owner, id));
        }
        if let Some(name) = &patch.name {
            ensure_unique(&doc.owners, name, Some(id))?;
        }
        let owner = doc
            .owners
            .iter_mut()
            .find(|owner| &owner.id == id)
            .ok_or_else(|| ServiceError::not_found(EntityKind::Owner, id))?;
        owner.apply(patch)?;
        let updated = owner.clone();
        file.write(&doc).await?;

        tracing::info!(owner_id = %id, "Updated owner");
        Ok(updated)
    }

    /// Delete an owner that no project references.
    ///
    /// # Errors
    ///
    /// Returns `ServiceError::NotFound` if the id is unknown and
    /// `ServiceError::Referenced` with the number of assigned projects.
    pub async fn delete(&self, id: &OwnerId) -> Result<(), ServiceError> {
        let file = self.store.lock(StoreKey::Owners).await;
        let mut doc: OwnersDocument = file.read_or_default().await?;

        if !doc.owners.iter().any(|owner| &owner.id == id) {
            return Err(ServiceError::not_found(EntityKind::Owner, id));
        }

        let count = self
            .read_projects()
            .await?
            .projects
            .iter()
            .filter(|project| &project.owner_id == id)
            .count();
        if count > 0 {
            tracing::info!(owner_id = %id, count, "Owner delete blocked");
            return Err(ServiceError::Referenced {
                entity: EntityKind::Owner,
                count,
            });
        }

        doc.owners.retain(|owner| &owner.id != id);
        file.write(&doc).await?;

        tracing::info!(owner_id = %id, "Deleted owner");
        Ok(())
    }

    /// Number of projects assigned to an owner.
    ///
    /// Returns zero if the projects file cannot be read, so that a count
    /// display never fails the page around it.
    pub async fn project_count(&self, id: &OwnerId) -> usize {
        match self.read_projects().await {
            Ok(doc) => doc
                .projects
                .iter()
                .filter(|project| &project.owner_id == id)
                .count(),
            Err(e) => {
                tracing::warn!(owner_id = %id, error = %e, "Could not count owner projects");
                0
            }
        }
    }

    async fn read_projects(&self) -> Result<ProjectsDocument, StoreError> {
        self.store
            .lock(StoreKey::Projects)
            .await
            .read_or_default()
            .await
    }
}

fn ensure_unique(owners: &[Owner], name: &str, except: Option<&OwnerId>) -> Result<(), ServiceError> {
    let taken = owners
        .iter()
        .any(|owner| owner.name == name && Some(&owner.id) != except);
    if taken {
        return Err(ServiceError::DuplicateName {
            entity: EntityKind::Owner,
            name: name.to_owned(),
        });
    }
    Ok(())
}
