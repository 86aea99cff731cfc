//! File-backed byte store for the `/files/` routes.

use std::path::{Path, PathBuf};

use thiserror::Error;
use tokio::fs;

/// Errors that can occur accessing the byte store.
#[derive(Debug, Error)]
pub enum StoreError {
    /// No file with the given name exists.
    #[error("File not found: {0}")]
    NotFound(String),

    /// The underlying filesystem operation failed.
    #[error("Store I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// A byte store mapping names to file contents under a base directory.
///
/// Concurrent writes to the same name have no ordering guarantee; the last
/// writer wins. No locking is performed.
#[derive(Debug, Clone)]
pub struct FileStore {
    root: PathBuf,
}

impl FileStore {
    /// Create a store rooted at the given directory. The directory is created
    /// lazily on first write.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// The base directory of the store.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Read the contents of a named file.
    pub async fn read(&self, name: &str) -> Result<Vec<u8>, StoreError> {
        match fs::read(self.root.join(name)).await {
            Ok(bytes) => Ok(bytes),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                Err(StoreError::NotFound(name.to_string()))
            }
            Err(e) => Err(StoreError::Io(e)),
        }
    }

    /// Write bytes to a named file, creating the base directory if absent.
    pub async fn write(&self, name: &str, bytes: &[u8]) -> Result<(), StoreError> {
        fs::create_dir_all(&self.root).await?;
        fs::write(self.root.join(name), bytes).await?;
        Ok(())
    }
}
