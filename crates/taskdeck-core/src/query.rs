use serde::{Deserialize, Serialize};
use std::str::FromStr;
use thiserror::Error;

use crate::stamp::Stamp;
use crate::task::{Status, Task};

/// Timestamp field a listing can be ordered by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortKey {
    /// Order by creation time.
    CreatedAt,
    /// Order by the time work started.
    StartedAt,
    /// Order by completion time.
    FinishedAt,
}

impl SortKey {
    /// String representation used in CLI arguments.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::CreatedAt => "created_at",
            Self::StartedAt => "started_at",
            Self::FinishedAt => "finished_at",
        }
    }
}

/// Error returned when a string does not name a sortable field.
#[derive(Debug, Error)]
#[error("invalid sort key: {0} (expected created_at, started_at, or finished_at)")]
pub struct ParseSortKeyError(String);

impl FromStr for SortKey {
    type Err = ParseSortKeyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "created_at" => Ok(Self::CreatedAt),
            "started_at" => Ok(Self::StartedAt),
            "finished_at" => Ok(Self::FinishedAt),
            other => Err(ParseSortKeyError(other.to_owned())),
        }
    }
}

/// Filter/search/sort request over a task collection.
///
/// Every stage is optional and independently composable; stages run in a
/// fixed order: status, tag, text, sort.
#[derive(Debug, Clone, Default)]
pub struct TaskQuery {
    /// Keep only tasks with exactly this status.
    pub status: Option<Status>,
    /// Keep only tasks whose tag list contains this label.
    pub tag: Option<String>,
    /// Keep only tasks whose title or description contains this text
    /// (case-sensitive, literal substring).
    pub text: Option<String>,
    /// Ascending sort; tasks without the chosen stamp come first.
    pub sort: Option<SortKey>,
}

impl TaskQuery {
    /// True when no stage is configured.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.status.is_none() && self.tag.is_none() && self.text.is_none() && self.sort.is_none()
    }

    /// Run the pipeline over an owned collection.
    ///
    /// Filtering preserves the original relative order; sorting is stable,
    /// so equal stamps also keep their relative order.
    #[must_use]
    pub fn apply(&self, mut tasks: Vec<Task>) -> Vec<Task> {
        if let Some(status) = self.status {
            tasks.retain(|task| task.status == status);
        }
        if let Some(tag) = &self.tag {
            tasks.retain(|task| task.tags.iter().any(|candidate| candidate == tag));
        }
        if let Some(text) = &self.text {
            tasks.retain(|task| task.title.contains(text.as_str()) || task.desc.contains(text.as_str()));
        }
        if let Some(key) = self.sort {
            tasks.sort_by(|a, b| sort_value(a, key).cmp(&sort_value(b, key)));
        }
        tasks
    }
}

// `None` orders before every `Some`, which puts tasks lacking the chosen
// stamp first.
fn sort_value(task: &Task, key: SortKey) -> Option<&Stamp> {
    match key {
        SortKey::CreatedAt => Some(&task.created_at),
        SortKey::StartedAt => task.started_at.as_ref(),
        SortKey::FinishedAt => task.finished_at.as_ref(),
    }
}
