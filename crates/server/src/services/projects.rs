//! Project operations with foreign-key checks.

use roadmap_core::{
    NewProject, OwnerId, ProductLineId, Project, ProjectId, ProjectPatch, ValidationError,
};

use super::{EntityKind, OwnerService, ProductLineService, ServiceError};
use crate::store::{FileStore, ProjectsDocument, StoreKey};

/// Project service.
pub struct ProjectService<'a> {
    store: &'a FileStore,
}

impl<'a> ProjectService<'a> {
    /// Create a new project service.
    #[must_use]
    pub const fn new(store: &'a FileStore) -> Self {
        Self { store }
    }

    /// List every project in stored order.
    ///
    /// # Errors
    ///
    /// Returns `ServiceError::Store` if the file cannot be read.
    pub async fn list_all(&self) -> Result<Vec<Project>, ServiceError> {
        let doc: ProjectsDocument = self
            .store
            .lock(StoreKey::Projects)
            .await
            .read_or_default()
            .await?;
        Ok(doc.projects)
    }

    /// Get a project by id.
    ///
    /// # Errors
    ///
    /// Returns `ServiceError::NotFound` if no project has this id.
    pub async fn get(&self, id: &ProjectId) -> Result<Project, ServiceError> {
        self.list_all()
            .await?
            .into_iter()
            .find(|project| &project.id == id)
            .ok_or_else(|| ServiceError::not_found(EntityKind::Project, id))
    }

    /// Validate and append a project.
    ///
    /// Both the product line and the owner must exist.
    ///
    /// # Errors
    ///
    /// Returns `ServiceError::Validation` for malformed fields or a dangling
    /// reference.
    pub async fn create(&self, input: NewProject) -> Result<Project, ServiceError> {
        let project = Project::create(input)?;
        self.ensure_product_line(&project.product_line_id).await?;
        self.ensure_owner(&project.owner_id).await?;

        let file = self.store.lock(StoreKey::Projects).await;
        let mut doc: ProjectsDocument = file.read_or_default().await?;
        doc.projects.push(project.clone());
        file.write(&doc).await?;

        tracing::info!(
            project_id = %project.id,
            product_line_id = %project.product_line_id,
            owner_id = %project.owner_id,
            "Created project"
        );
        Ok(project)
    }

    /// Merge a partial update into a project.
    ///
    /// A changed product line or owner must exist.
    ///
    /// # Errors
    ///
    /// Returns `ServiceError::NotFound` if the id is unknown and
    /// `ServiceError::Validation` if the merged project is invalid.
    pub async fn update(&self, id: &ProjectId, patch: ProjectPatch) -> Result<Project, ServiceError> {
        if let Some(product_line_id) = &patch.product_line_id {
            self.ensure_product_line(product_line_id).await?;
        }
        if let Some(owner_id) = &patch.owner_id {
            self.ensure_owner(owner_id).await?;
        }

        let file = self.store.lock(StoreKey::Projects).await;
        let mut doc: ProjectsDocument = file.read_or_default().await?;
        let project = doc
            .projects
            .iter_mut()
            .find(|project| &project.id == id)
            .ok_or_else(|| ServiceError::not_found(EntityKind::Project, id))?;
        project.apply(patch)?;
        let updated = project.clone();
        file.write(&doc).await?;

        tracing::info!(project_id = %id, "Updated project");
        Ok(updated)
    }

    /// Delete a project.
    ///
    /// # Errors
    ///
    /// Returns `ServiceError::NotFound` if no project has this id.
    pub async fn delete(&self, id: &ProjectId) -> Result<(), ServiceError> {
        let file = self.store.lock(StoreKey::Projects).await;
        let mut doc: ProjectsDocument = file.read_or_default().await?;
        let before = doc.projects.len();
        doc.projects.retain(|project| &project.id != id);
        if doc.projects.len() == before {
            return Err(ServiceError::not_found(EntityKind::Project, id));
        }
        file.write(&doc).await?;

        tracing::info!(project_id = %id, "Deleted project");
        Ok(())
    }

    async fn ensure_product_line(&self, id: &ProductLineId) -> Result<(), ServiceError> {
        if id.is_blank() || ProductLineService::new(self.store).exists(id).await? {
            return Ok(());
        }
        Err(ValidationError::DanglingReference {
            field: "productLineId",
            id: id.to_string(),
        }
        .into())
    }

    async fn ensure_owner(&self, id: &OwnerId) -> Result<(), ServiceError> {
        if id.is_blank() || OwnerService::new(self.store).exists(id).await? {
            return Ok(());
        }
        Err(ValidationError::DanglingReference {
            field: "ownerId",
            id: id.to_string(),
        }
        .into())
    }
}
