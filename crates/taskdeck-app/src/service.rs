//! Load–operate–save task service shared by user interfaces.

use taskdeck_core::{Stamp, StatusAction, Task, TaskId, TaskQuery};
use thiserror::Error;
use tracing::warn;

use crate::store::TaskStore;

/// Errors surfaced to callers of [`TaskService`].
#[derive(Debug, Error)]
pub enum ServiceError {
    /// The requested task does not exist.
    #[error("no task found with id {0}")]
    NotFound(TaskId),
}

/// Fields for a new task.
#[derive(Debug, Clone)]
pub struct CreateTaskInput {
    /// Title, expected non-empty.
    pub title: String,
    /// Description, may be empty.
    pub desc: String,
    /// Tags in the order given.
    pub tags: Vec<String>,
}

/// Partial update applied to an existing task.
///
/// Only provided non-empty fields are written; everything else is left
/// untouched.
#[derive(Debug, Clone, Default)]
pub struct TaskUpdate {
    /// Replacement title.
    pub title: Option<String>,
    /// Replacement description.
    pub desc: Option<String>,
}

/// Service facade owning every operation over the task collection.
///
/// Each call loads the persisted collection, operates on it in memory, and
/// writes it back when something changed. No state is cached between calls:
/// the backing store is the sole source of truth.
///
/// Store failures are recovered locally with a diagnostic: a collection that
/// cannot be read is treated as empty, and a failed save leaves the file
/// unwritten while the operation still reports its in-memory outcome. A
/// corrupt store never aborts the tool.
pub struct TaskService<S> {
    store: S,
}

impl<S> TaskService<S> {
    /// Wrap a backing store.
    pub const fn new(store: S) -> Self {
        Self { store }
    }
}

impl<S: TaskStore> TaskService<S> {
    /// Create a task with a freshly allocated id and return a detached copy.
    ///
    /// The id is the current maximum plus one (1 for an empty collection);
    /// duplicate titles are not guarded against.
    #[must_use]
    pub fn create(&self, input: CreateTaskInput) -> Task {
        let CreateTaskInput { title, desc, tags } = input;
        let mut tasks = self.load_collection();
        let task = Task::new(Task::next_id(&tasks), title, desc, tags, Stamp::now());
        tasks.push(task.clone());
        self.persist(&tasks);
        task
    }

    /// Look up a task by id.
    #[must_use]
    pub fn get(&self, id: TaskId) -> Option<Task> {
        self.load_collection().into_iter().find(|task| task.id == id)
    }

    /// Delete a task; reports whether anything was removed.
    ///
    /// Nothing is rewritten when the id is absent.
    #[must_use]
    pub fn delete(&self, id: TaskId) -> bool {
        let mut tasks = self.load_collection();
        let before = tasks.len();
        tasks.retain(|task| task.id != id);
        if tasks.len() == before {
            return false;
        }
        self.persist(&tasks);
        true
    }

    /// Apply a status transition; reports whether the task was found.
    #[must_use]
    pub fn set_status(&self, id: TaskId, action: StatusAction) -> bool {
        let mut tasks = self.load_collection();
        let Some(task) = tasks.iter_mut().find(|task| task.id == id) else {
            return false;
        };
        task.apply(action, Stamp::now());
        self.persist(&tasks);
        true
    }

    /// Update title and/or description of an existing task.
    ///
    /// # Errors
    /// Returns [`ServiceError::NotFound`] when the id names no task.
    pub fn update(&self, id: TaskId, update: TaskUpdate) -> Result<(), ServiceError> {
        let mut tasks = self.load_collection();
        let Some(task) = tasks.iter_mut().find(|task| task.id == id) else {
            return Err(ServiceError::NotFound(id));
        };
        if let Some(title) = update.title.filter(|value| !value.is_empty()) {
            task.title = title;
        }
        if let Some(desc) = update.desc.filter(|value| !value.is_empty()) {
            task.desc = desc;
        }
        self.persist(&tasks);
        Ok(())
    }

    /// Run a filter/search/sort query and return detached task records.
    #[must_use]
    pub fn list(&self, query: &TaskQuery) -> Vec<Task> {
        query.apply(self.load_collection())
    }

    fn load_collection(&self) -> Vec<Task> {
        self.store.load_tasks().unwrap_or_else(|err| {
            let err: anyhow::Error = err.into();
            // Availability over correctness: a corrupt or unreadable store
            // surfaces as an empty view, not a crash.
            warn!(error = %err, "failed to load tasks, treating store as empty");
            Vec::new()
        })
    }

    fn persist(&self, tasks: &[Task]) {
        if let Err(err) = self.store.save_tasks(tasks) {
            let err: anyhow::Error = err.into();
            warn!(error = %err, "failed to save tasks, collection left unwritten");
        }
    }
}
