//! Display settings.

use roadmap_core::{ProductLineId, Settings};

use super::ServiceError;
use crate::store::{FileStore, StoreError, StoreKey};

/// Settings service.
pub struct SettingsService<'a> {
    store: &'a FileStore,
}

impl<'a> SettingsService<'a> {
    /// Create a new settings service.
    #[must_use]
    pub const fn new(store: &'a FileStore) -> Self {
        Self { store }
    }

    /// Current settings. A missing or unreadable file yields the defaults.
    pub async fn get(&self) -> Settings {
        match self.store.read::<Settings>(StoreKey::Settings).await {
            Ok(settings) => settings,
            Err(StoreError::NotFound(_)) => Settings::default(),
            Err(e) => {
                tracing::warn!(error = %e, "Settings file unreadable, using defaults");
                Settings::default()
            }
        }
    }

    /// Replace the list of visible product lines.
    ///
    /// # Errors
    ///
    /// Returns `ServiceError::Validation` for a blank id and
    /// `ServiceError::Store` if the file cannot be written.
    pub async fn set_visible_product_lines(
        &self,
        ids: Vec<ProductLineId>,
    ) -> Result<Settings, ServiceError> {
        let settings = Settings::with_visible(ids)?;
        self.store.write(StoreKey::Settings, &settings).await?;
        tracing::info!(
            visible = settings.visible_product_lines.len(),
            "Saved visible product lines"
        );
        Ok(settings)
    }

    /// Restore the defaults.
    ///
    /// # Errors
    ///
    /// Returns `ServiceError::Store` if the file cannot be written.
    pub async fn reset(&self) -> Result<Settings, ServiceError> {
        let settings = Settings::default();
        self.store.write(StoreKey::Settings, &settings).await?;
        tracing::info!("Reset settings");
        Ok(settings)
    }
}
