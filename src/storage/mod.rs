//! Document storage for fetched PDFs
//! Uses Apache Arrow object_store crate

use bytes::Bytes;
use object_store::local::LocalFileSystem;
use object_store::{ObjectStore, path::Path as StoragePath};
use std::path::Path;
use std::sync::Arc;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Invalid storage root {root}: {source}")]
    InvalidRoot {
        root: String,
        source: object_store::Error,
    },

    #[error("Object store error: {0}")]
    ObjectStoreError(#[from] object_store::Error),
}

/// Storage result type
pub type Result<T> = std::result::Result<T, StorageError>;

/// Metadata returned after a write
#[derive(Debug, Clone)]
pub struct StoredDocument {
    pub key: String,
    pub location: String,
    pub size: usize,
}

/// Storage client wrapping object_store
///
/// Local writes stage into a temporary file and rename over the target, so
/// concurrent writers of one key never interleave bytes; the last rename wins.
#[derive(Clone)]
pub struct StorageClient {
    store: Arc<dyn ObjectStore>,
    pub root: String,
}

impl StorageClient {
    /// Create new storage client with any object_store backend
    pub fn new(store: Arc<dyn ObjectStore>, root: String) -> Self {
        Self { store, root }
    }

    /// Store files under an existing local directory
    pub fn local(dir: &Path) -> Result<Self> {
        let root = dir.display().to_string();
        let store = LocalFileSystem::new_with_prefix(dir).map_err(|source| {
            StorageError::InvalidRoot {
                root: root.clone(),
                source,
            }
        })?;

        Ok(Self::new(Arc::new(store), root))
    }

    /// Create in-memory storage for testing
    pub fn in_memory() -> Self {
        Self {
            store: Arc::new(object_store::memory::InMemory::new()),
            root: "memory".to_string(),
        }
    }

    /// Write bytes under `key`, replacing any previous content
    pub async fn put(&self, key: &str, data: Bytes) -> Result<StoredDocument> {
        let path = StoragePath::from(key);
        let size = data.len();

        self.store.put(&path, data.into()).await?;

        tracing::debug!(key, size, "Stored document");

        Ok(StoredDocument {
            key: key.to_string(),
            location: format!("{}/{}", self.root, key),
            size,
        })
    }

    /// Read a stored document back
    pub async fn get(&self, key: &str) -> Result<Bytes> {
        let path = StoragePath::from(key);

        let result = self.store.get(&path).await?;

        Ok(result.bytes().await?)
    }

    /// Check if key exists
    pub async fn exists(&self, key: &str) -> Result<bool> {
        let path = StoragePath::from(key);

        match self.store.head(&path).await {
            Ok(_) => Ok(true),
            Err(object_store::Error::NotFound { .. }) => Ok(false),
            Err(e) => Err(e.into()),
        }
    }
}
