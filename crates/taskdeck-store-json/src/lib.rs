//! Flat-file JSON storage for taskdeck task collections.
//!
//! The whole collection is (de)serialized in one piece: every load reads the
//! full file and every save rewrites it. An absent file is an empty
//! collection, not an error. There is no partial-write or incremental-update
//! path, and concurrent writers race with last-writer-wins semantics.

mod error;

pub use error::StoreError;

use std::fs;
use std::path::{Path, PathBuf};

use taskdeck_core::Task;
use tracing::debug;

/// File name used when no explicit store path is configured.
pub const DEFAULT_FILE_NAME: &str = "tasks.json";

/// Storage backed by a single JSON file holding the full task collection.
#[derive(Debug, Clone)]
pub struct JsonStore {
    path: PathBuf,
}

impl JsonStore {
    /// Create a store over the given backing file path.
    ///
    /// The file is not touched until the first load or save.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Path of the backing file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the full task collection.
    ///
    /// An absent backing file yields an empty collection.
    ///
    /// # Errors
    /// Returns [`StoreError::Io`] when the file cannot be read and
    /// [`StoreError::Parse`] when its contents are not a valid collection.
    pub fn load(&self) -> Result<Vec<Task>, StoreError> {
        if !self.path.exists() {
            debug!(path = %self.path.display(), "backing file absent, starting empty");
            return Ok(Vec::new());
        }

        let contents = fs::read_to_string(&self.path).map_err(|source| StoreError::Io {
            path: self.path.clone(),
            source,
        })?;
        let tasks: Vec<Task> = serde_json::from_str(&contents).map_err(|source| StoreError::Parse {
            path: self.path.clone(),
            source,
        })?;
        debug!(count = tasks.len(), "loaded task collection");
        Ok(tasks)
    }

    /// Overwrite the backing file with the full collection.
    ///
    /// # Errors
    /// Returns [`StoreError::Serialize`] when encoding fails and
    /// [`StoreError::Io`] when the file cannot be written.
    pub fn save(&self, tasks: &[Task]) -> Result<(), StoreError> {
        let body = serde_json::to_vec_pretty(tasks).map_err(StoreError::Serialize)?;
        fs::write(&self.path, body).map_err(|source| StoreError::Io {
            path: self.path.clone(),
            source,
        })?;
        debug!(count = tasks.len(), path = %self.path.display(), "saved task collection");
        Ok(())
    }
}
