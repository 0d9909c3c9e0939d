//! Storage abstraction consumed by [`crate::service::TaskService`].

use anyhow::Error;
use taskdeck_core::Task;
use taskdeck_store_json::JsonStore;

/// Minimal storage abstraction required by the task service.
///
/// The service performs one full load and at most one full save per
/// operation; implementations own the serialized representation and never
/// cache between calls.
pub trait TaskStore {
    /// Error type bubbled up from the backing store.
    type Error: Into<Error>;

    /// Materialize the full task collection.
    ///
    /// # Errors
    /// Returns a store-specific error when the collection cannot be read.
    fn load_tasks(&self) -> Result<Vec<Task>, Self::Error>;

    /// Replace the persisted collection with `tasks`.
    ///
    /// # Errors
    /// Returns a store-specific error when persisting fails.
    fn save_tasks(&self, tasks: &[Task]) -> Result<(), Self::Error>;
}

impl TaskStore for JsonStore {
    type Error = taskdeck_store_json::StoreError;

    fn load_tasks(&self) -> Result<Vec<Task>, Self::Error> {
        self.load()
    }

    fn save_tasks(&self, tasks: &[Task]) -> Result<(), Self::Error> {
        self.save(tasks)
    }
}
