//! Error types for taskdeck store operations.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur during `JsonStore` operations.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The backing file exists but does not hold a valid task collection.
    #[error("invalid task data in {}: {source}", path.display())]
    Parse {
        /// Path of the offending file.
        path: PathBuf,
        /// Underlying JSON error.
        #[source]
        source: serde_json::Error,
    },

    /// The collection could not be serialized.
    #[error("failed to serialize tasks: {0}")]
    Serialize(#[source] serde_json::Error),

    /// Reading or writing the backing file failed.
    #[error("i/o error on {}: {source}", path.display())]
    Io {
        /// Path of the backing file.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },
}
