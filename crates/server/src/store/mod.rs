//! Flat-file JSON store.
//!
//! # Data directory
//!
//! ```text
//! <data_dir>/
//!   productlines.json   {"productlines": [...]}
//!   projects.json       {"projects": [...]}
//!   owners.json         {"owners": [...]}
//!   settings.json       {"visibleProductLines": [...]}
//! ```
//!
//! Every file has its own async mutex, created on first use and cached in a
//! lock table owned by the [`FileStore`]. A caller that needs to read, modify,
//! and write one file as a unit takes a [`LockedFile`] with
//! [`FileStore::lock`] and keeps it for the whole sequence.
//!
//! Writes go to a sibling temp file that is then renamed over the target, so
//! a concurrent reader never sees a half-written document.

pub mod documents;

use std::collections::HashMap;
use std::fmt;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, PoisonError};

use serde::Serialize;
use serde::de::DeserializeOwned;
use thiserror::Error;
use tokio::sync::{Mutex as AsyncMutex, OwnedMutexGuard};

pub use documents::{OwnersDocument, ProductLinesDocument, ProjectsDocument, StoredProductLine};

/// Errors that can occur during store operations.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The file does not exist yet.
    #[error("data file not found: {0}")]
    NotFound(StoreKey),

    /// Filesystem error while reading or writing.
    #[error("I/O error on {key}: {source}")]
    Io {
        key: StoreKey,
        #[source]
        source: std::io::Error,
    },

    /// The file is not valid JSON for the expected document shape.
    #[error("invalid JSON in {key}: {source}")]
    Serialization {
        key: StoreKey,
        #[source]
        source: serde_json::Error,
    },

    /// The document parsed but holds values that break a record invariant.
    #[error("data corruption: {0}")]
    DataCorruption(String),
}

/// One of the files in the data directory.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StoreKey {
    ProductLines,
    Projects,
    Owners,
    Settings,
}

impl StoreKey {
    /// Every file the store manages.
    pub const ALL: [Self; 4] = [
        Self::ProductLines,
        Self::Projects,
        Self::Owners,
        Self::Settings,
    ];

    /// File name inside the data directory.
    #[must_use]
    pub const fn file_name(self) -> &'static str {
        match self {
            Self::ProductLines => "productlines.json",
            Self::Projects => "projects.json",
            Self::Owners => "owners.json",
            Self::Settings => "settings.json",
        }
    }
}

impl fmt::Display for StoreKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.file_name())
    }
}

/// JSON documents on local disk, one file per [`StoreKey`].
#[derive(Debug)]
pub struct FileStore {
    data_dir: PathBuf,
    locks: Mutex<HashMap<StoreKey, Arc<AsyncMutex<()>>>>,
}

impl FileStore {
    /// Create a store rooted at `data_dir`. The directory is created on the
    /// first write.
    #[must_use]
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
            locks: Mutex::new(HashMap::new()),
        }
    }

    /// Directory holding the data files.
    #[must_use]
    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    /// Full path of the file behind `key`.
    #[must_use]
    pub fn path(&self, key: StoreKey) -> PathBuf {
        self.data_dir.join(key.file_name())
    }

    /// Acquire exclusive access to one file until the returned guard drops.
    pub async fn lock(&self, key: StoreKey) -> LockedFile<'_> {
        let guard = self.file_lock(key).lock_owned().await;
        LockedFile {
            store: self,
            key,
            _guard: guard,
        }
    }

    /// Read and decode a whole document.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::NotFound` if the file does not exist,
    /// `StoreError::Io` if it cannot be read, and
    /// `StoreError::Serialization` if it does not decode as `T`.
    pub async fn read<T: DeserializeOwned>(&self, key: StoreKey) -> Result<T, StoreError> {
        self.lock(key).await.read().await
    }

    /// Encode and replace a whole document.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Io` if the file cannot be written and
    /// `StoreError::Serialization` if `T` cannot be encoded.
    pub async fn write<T: Serialize + Sync>(&self, key: StoreKey, value: &T) -> Result<(), StoreError> {
        self.lock(key).await.write(value).await
    }

    /// Whether the file behind `key` exists.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Io` if the filesystem cannot be queried.
    pub async fn exists(&self, key: StoreKey) -> Result<bool, StoreError> {
        self.lock(key).await.exists().await
    }

    fn file_lock(&self, key: StoreKey) -> Arc<AsyncMutex<()>> {
        // The table only ever gains entries, so a poisoned guard is still usable.
        let mut locks = self.locks.lock().unwrap_or_else(PoisonError::into_inner);
        Arc::clone(locks.entry(key).or_default())
    }
}

/// Exclusive handle on one data file.
///
/// Every read and write issued through the handle happens under the same
/// lock, so a read-modify-write sequence cannot interleave with another
/// writer of the same file.
pub struct LockedFile<'a> {
    store: &'a FileStore,
    key: StoreKey,
    _guard: OwnedMutexGuard<()>,
}

impl LockedFile<'_> {
    /// The file this handle guards.
    #[must_use]
    pub const fn key(&self) -> StoreKey {
        self.key
    }

    /// Whether the file exists.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Io` if the filesystem cannot be queried.
    pub async fn exists(&self) -> Result<bool, StoreError> {
        tokio::fs::try_exists(self.store.path(self.key))
            .await
            .map_err(|source| StoreError::Io {
                key: self.key,
                source,
            })
    }

    /// Read and decode the document.
    ///
    /// # Errors
    ///
    /// See [`FileStore::read`].
    pub async fn read<T: DeserializeOwned>(&self) -> Result<T, StoreError> {
        let bytes = match tokio::fs::read(self.store.path(self.key)).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == ErrorKind::NotFound => return Err(StoreError::NotFound(self.key)),
            Err(source) => {
                return Err(StoreError::Io {
                    key: self.key,
                    source,
                });
            }
        };
        serde_json::from_slice(&bytes).map_err(|source| StoreError::Serialization {
            key: self.key,
            source,
        })
    }

    /// Read the document, treating a missing file as an empty one.
    ///
    /// # Errors
    ///
    /// Same as [`Self::read`], minus `StoreError::NotFound`.
    pub async fn read_or_default<T: DeserializeOwned + Default>(&self) -> Result<T, StoreError> {
        match self.read().await {
            Err(StoreError::NotFound(_)) => Ok(T::default()),
            other => other,
        }
    }

    /// Encode the document as indented JSON and atomically replace the file.
    ///
    /// # Errors
    ///
    /// See [`FileStore::write`].
    pub async fn write<T: Serialize + Sync>(&self, value: &T) -> Result<(), StoreError> {
        let io_err = |source: std::io::Error| StoreError::Io {
            key: self.key,
            source,
        };

        let bytes = serde_json::to_vec_pretty(value).map_err(|source| StoreError::Serialization {
            key: self.key,
            source,
        })?;

        tokio::fs::create_dir_all(self.store.data_dir())
            .await
            .map_err(io_err)?;

        let path = self.store.path(self.key);
        let tmp = path.with_extension("json.tmp");
        tokio::fs::write(&tmp, &bytes).await.map_err(io_err)?;
        tokio::fs::rename(&tmp, &path).await.map_err(io_err)?;

        tracing::debug!(file = %self.key, bytes = bytes.len(), "Wrote data file");
        Ok(())
    }
}
