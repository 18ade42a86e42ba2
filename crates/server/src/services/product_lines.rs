//! Product line operations: CRUD, display order, and delete protection.

use std::collections::HashMap;

use roadmap_core::ordering::{apply_reorder, backfill_missing, next_order, sort_by_order};
use roadmap_core::{ProductLine, ProductLineId};

use super::{EntityKind, ServiceError};
use crate::store::{
    FileStore, LockedFile, ProductLinesDocument, ProjectsDocument, StoreKey, StoredProductLine,
};

/// Product line service.
pub struct ProductLineService<'a> {
    store: &'a FileStore,
}

impl<'a> ProductLineService<'a> {
    /// Create a new product line service.
    #[must_use]
    pub const fn new(store: &'a FileStore) -> Self {
        Self { store }
    }

    /// List every product line, ascending by `order`.
    ///
    /// Records without an `order` are given their file position, and the
    /// file is rewritten once so later reads see the backfilled values.
    ///
    /// # Errors
    ///
    /// Returns `ServiceError::Store` if the file cannot be read or written.
    pub async fn list_all(&self) -> Result<Vec<ProductLine>, ServiceError> {
        let file = self.store.lock(StoreKey::ProductLines).await;
        let (mut lines, backfilled) = load(&file).await?;
        if backfilled > 0 {
            save(&file, &lines).await?;
            tracing::info!(backfilled, "Backfilled product line order");
        }
        sort_by_order(&mut lines);
        Ok(lines)
    }

    /// Get a product line by id.
    ///
    /// # Errors
    ///
    /// Returns `ServiceError::NotFound` if no product line has this id.
    pub async fn get(&self, id: &ProductLineId) -> Result<ProductLine, ServiceError> {
        self.list_all()
            .await?
            .into_iter()
            .find(|line| &line.id == id)
            .ok_or_else(|| ServiceError::not_found(EntityKind::ProductLine, id))
    }

    /// Whether a product line with this id exists.
    ///
    /// # Errors
    ///
    /// Returns `ServiceError::Store` if the file cannot be read.
    pub async fn exists(&self, id: &ProductLineId) -> Result<bool, ServiceError> {
        let file = self.store.lock(StoreKey::ProductLines).await;
        let doc: ProductLinesDocument = file.read_or_default().await?;
        Ok(doc.productlines.iter().any(|line| &line.id == id))
    }

    /// Create a product line at the end of the display order.
    ///
    /// # Errors
    ///
    /// Returns `ServiceError::Validation` for an invalid name and
    /// `ServiceError::DuplicateName` if the name is taken.
    pub async fn create(&self, name: &str) -> Result<ProductLine, ServiceError> {
        let name = name.trim();
        let file = self.store.lock(StoreKey::ProductLines).await;
        let (mut lines, _) = load(&file).await?;

        ensure_unique(&lines, name, None)?;
        let order = next_order(lines.iter().map(|line| line.order));
        let line = ProductLine::new(name, order)?;

        lines.push(line.clone());
        save(&file, &lines).await?;

        tracing::info!(product_line_id = %line.id, order, "Created product line");
        Ok(line)
    }

    /// Rename a product line.
    ///
    /// # Errors
    ///
    /// Returns `ServiceError::NotFound`, `ServiceError::Validation`, or
    /// `ServiceError::DuplicateName` if another product line has the name.
    pub async fn rename(&self, id: &ProductLineId, name: &str) -> Result<ProductLine, ServiceError> {
        let name = name.trim();
        let file = self.store.lock(StoreKey::ProductLines).await;
        let (mut lines, _) = load(&file).await?;

        let index = lines
            .iter()
            .position(|line| &line.id == id)
            .ok_or_else(|| ServiceError::not_found(EntityKind::ProductLine, id))?;
        ensure_unique(&lines, name, Some(id))?;
        let line = lines
            .get_mut(index)
            .ok_or_else(|| ServiceError::not_found(EntityKind::ProductLine, id))?;
        line.rename(name)?;
        let updated = line.clone();

        save(&file, &lines).await?;

        tracing::info!(product_line_id = %id, "Renamed product line");
        Ok(updated)
    }

    /// Delete a product line that no project references.
    ///
    /// # Errors
    ///
    /// Returns `ServiceError::NotFound` if the id is unknown and
    /// `ServiceError::Referenced` with the number of referencing projects.
    pub async fn delete(&self, id: &ProductLineId) -> Result<(), ServiceError> {
        let file = self.store.lock(StoreKey::ProductLines).await;
        let (mut lines, _) = load(&file).await?;

        let index = lines
            .iter()
            .position(|line| &line.id == id)
            .ok_or_else(|| ServiceError::not_found(EntityKind::ProductLine, id))?;

        let count = {
            let projects = self.store.lock(StoreKey::Projects).await;
            let doc: ProjectsDocument = projects.read_or_default().await?;
            doc.projects
                .iter()
                .filter(|project| &project.product_line_id == id)
                .count()
        };
        if count > 0 {
            tracing::info!(product_line_id = %id, count, "Product line delete blocked");
            return Err(ServiceError::Referenced {
                entity: EntityKind::ProductLine,
                count,
            });
        }

        lines.remove(index);
        save(&file, &lines).await?;

        tracing::info!(product_line_id = %id, "Deleted product line");
        Ok(())
    }

    /// Set `order` for every listed product line and return the new display
    /// order. Unknown ids are ignored and unlisted product lines keep their
    /// position.
    ///
    /// # Errors
    ///
    /// Returns `ServiceError::Store` if the file cannot be read or written.
    pub async fn reorder(
        &self,
        order_map: &HashMap<ProductLineId, u32>,
    ) -> Result<Vec<ProductLine>, ServiceError> {
        let file = self.store.lock(StoreKey::ProductLines).await;
        let (mut lines, backfilled) = load(&file).await?;

        let changed = apply_reorder(&mut lines, order_map);
        if changed > 0 || backfilled > 0 {
            save(&file, &lines).await?;
        }

        tracing::info!(
            requested = order_map.len(),
            changed,
            "Reordered product lines"
        );
        sort_by_order(&mut lines);
        Ok(lines)
    }
}

/// Read the collection in file order, filling any missing `order` in memory.
async fn load(file: &LockedFile<'_>) -> Result<(Vec<ProductLine>, usize), ServiceError> {
    let mut doc: ProductLinesDocument = file.read_or_default().await?;
    let backfilled = backfill_missing(doc.productlines.iter_mut().map(|line| &mut line.order));
    let lines = doc
        .productlines
        .into_iter()
        .map(ProductLine::try_from)
        .collect::<Result<Vec<_>, _>>()?;
    Ok((lines, backfilled))
}

async fn save(file: &LockedFile<'_>, lines: &[ProductLine]) -> Result<(), ServiceError> {
    let doc = ProductLinesDocument {
        productlines: lines.iter().cloned().map(StoredProductLine::from).collect(),
    };
    file.write(&doc).await?;
    Ok(())
}

fn ensure_unique(
    lines: &[ProductLine],
    name: &str,
    except: Option<&ProductLineId>,
) -> Result<(), ServiceError> {
    let taken = lines
        .iter()
        .any(|line| line.name == name && Some(&line.id) != except);
    if taken {
        return Err(ServiceError::DuplicateName {
            entity: EntityKind::ProductLine,
            name: name.to_owned(),
        });
    }
    Ok(())
}
