use serde::{Deserialize, Serialize};
use std::str::FromStr;
use thiserror::Error;

use crate::id::TaskId;
use crate::stamp::Stamp;

/// Lifecycle state of a task.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Status {
    /// Not started yet.
    #[default]
    Todo,
    /// Actively being worked on.
    InProgress,
    /// Completed.
    Done,
}

impl Status {
    /// String representation used on the wire and in CLI arguments.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Todo => "todo",
            Self::InProgress => "in_progress",
            Self::Done => "done",
        }
    }
}

/// Error returned when a string does not name a lifecycle state.
#[derive(Debug, Error)]
#[error("invalid status: {0} (expected todo, in_progress, or done)")]
pub struct ParseStatusError(String);

impl FromStr for Status {
    type Err = ParseStatusError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "todo" => Ok(Self::Todo),
            "in_progress" => Ok(Self::InProgress),
            "done" => Ok(Self::Done),
            other => Err(ParseStatusError(other.to_owned())),
        }
    }
}

/// Status transition requested against a task.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusAction {
    /// Begin working on the task.
    Start,
    /// Complete the task.
    Finish,
}

impl StatusAction {
    /// Status a task ends up in after this transition.
    #[must_use]
    pub const fn target(self) -> Status {
        match self {
            Self::Start => Status::InProgress,
            Self::Finish => Status::Done,
        }
    }
}

/// Error returned when a string does not name a status transition.
#[derive(Debug, Error)]
#[error("invalid action: {0} (expected start or finish)")]
pub struct ParseStatusActionError(String);

impl FromStr for StatusAction {
    type Err = ParseStatusActionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "start" => Ok(Self::Start),
            "finish" => Ok(Self::Finish),
            other => Err(ParseStatusActionError(other.to_owned())),
        }
    }
}

/// A single trackable unit of work.
///
/// Serde field names double as the keys of the backing file format; records
/// missing `status` or the optional stamps deserialize with their defaults.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    /// Unique identifier, assigned once at creation.
    pub id: TaskId,
    /// Human-readable title.
    pub title: String,
    /// Free-form description, may be empty.
    pub desc: String,
    /// Lifecycle state.
    #[serde(default)]
    pub status: Status,
    /// Labels in insertion order; duplicates are permitted.
    #[serde(default)]
    pub tags: Vec<String>,
    /// Creation time, never mutated.
    pub created_at: Stamp,
    /// Set on the first transition to `in_progress`, never cleared.
    #[serde(default)]
    pub started_at: Option<Stamp>,
    /// Set on the first transition to `done`, never cleared.
    #[serde(default)]
    pub finished_at: Option<Stamp>,
}

impl Task {
    /// Construct a fresh `todo` task.
    #[must_use]
    pub const fn new(
        id: TaskId,
        title: String,
        desc: String,
        tags: Vec<String>,
        created_at: Stamp,
    ) -> Self {
        Self {
            id,
            title,
            desc,
            status: Status::Todo,
            tags,
            created_at,
            started_at: None,
            finished_at: None,
        }
    }

    /// Apply a status transition, stamping the matching timestamp on first
    /// use only.
    ///
    /// Transitions are deliberately permissive: `start` on a `done` task
    /// moves it back to `in_progress` and leaves `finished_at` as is.
    pub fn apply(&mut self, action: StatusAction, now: Stamp) {
        self.status = action.target();
        let slot = match action {
            StatusAction::Start => &mut self.started_at,
            StatusAction::Finish => &mut self.finished_at,
        };
        if slot.is_none() {
            *slot = Some(now);
        }
    }

    /// Identifier a task created after `tasks` would receive: the current
    /// maximum plus one, or 1 for an empty collection.
    #[must_use]
    pub fn next_id(tasks: &[Self]) -> TaskId {
        tasks
            .iter()
            .map(|task| task.id)
            .max()
            .map_or(TaskId::FIRST, TaskId::successor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn id(raw: u64) -> TaskId {
        TaskId::new(raw).unwrap_or_else(|| panic!("id must be positive"))
    }

    fn task(raw_id: u64) -> Task {
        Task::new(
            id(raw_id),
            format!("task {raw_id}"),
            String::new(),
            Vec::new(),
            Stamp::new("2024-01-01 09:00"),
        )
    }

    #[test]
    fn status_round_trips_snake_case() {
        for status in [Status::Todo, Status::InProgress, Status::Done] {
            let parsed: Status = status
                .as_str()
                .parse()
                .unwrap_or_else(|err| panic!("must parse: {err}"));
            assert_eq!(parsed, status);
        }
        assert!("started".parse::<Status>().is_err());
    }

    #[test]
    fn action_parses_and_targets() {
        let start: StatusAction = "start".parse().unwrap_or_else(|err| panic!("must parse: {err}"));
        assert_eq!(start.target(), Status::InProgress);
        let finish: StatusAction = "finish".parse().unwrap_or_else(|err| panic!("must parse: {err}"));
        assert_eq!(finish.target(), Status::Done);
        assert!("view".parse::<StatusAction>().is_err());
    }

    #[test]
    fn new_task_starts_as_todo() {
        let task = task(1);
        assert_eq!(task.status, Status::Todo);
        assert!(task.started_at.is_none());
        assert!(task.finished_at.is_none());
    }

    #[test]
    fn start_then_finish_stamps_both_timestamps() {
        let mut task = task(1);
        task.apply(StatusAction::Start, Stamp::new("2024-01-02 10:00"));
        assert_eq!(task.status, Status::InProgress);
        assert_eq!(task.started_at, Some(Stamp::new("2024-01-02 10:00")));

        task.apply(StatusAction::Finish, Stamp::new("2024-01-03 18:30"));
        assert_eq!(task.status, Status::Done);
        assert_eq!(task.finished_at, Some(Stamp::new("2024-01-03 18:30")));
        assert_eq!(task.started_at, Some(Stamp::new("2024-01-02 10:00")));
    }

    #[test]
    fn restart_keeps_first_started_at() {
        let mut task = task(1);
        task.apply(StatusAction::Start, Stamp::new("2024-01-02 10:00"));
        task.apply(StatusAction::Start, Stamp::new("2024-01-05 08:00"));
        assert_eq!(task.started_at, Some(Stamp::new("2024-01-02 10:00")));
    }

    #[test]
    fn start_after_finish_reverts_without_clearing() {
        let mut task = task(1);
        task.apply(StatusAction::Finish, Stamp::new("2024-01-03 18:30"));
        task.apply(StatusAction::Start, Stamp::new("2024-01-04 09:00"));
        assert_eq!(task.status, Status::InProgress);
        assert_eq!(task.finished_at, Some(Stamp::new("2024-01-03 18:30")));
        assert_eq!(task.started_at, Some(Stamp::new("2024-01-04 09:00")));
    }

    #[test]
    fn next_id_starts_at_one_and_follows_the_maximum() {
        assert_eq!(Task::next_id(&[]), id(1));
        let tasks = vec![task(2), task(7), task(3)];
        assert_eq!(Task::next_id(&tasks), id(8));
    }

    #[test]
    fn missing_optional_fields_use_defaults() {
        let raw = r#"{"id": 3, "title": "bare", "desc": "", "created_at": "2024-01-01 09:00"}"#;
        let task: Task = serde_json::from_str(raw).unwrap_or_else(|err| panic!("deserialize: {err}"));
        assert_eq!(task.status, Status::Todo);
        assert!(task.tags.is_empty());
        assert!(task.started_at.is_none());
        assert!(task.finished_at.is_none());
    }

    #[test]
    fn serialized_record_carries_every_key() {
        let task = task(1);
        let json = serde_json::to_string(&task).unwrap_or_else(|err| panic!("serialize: {err}"));
        for key in ["id", "title", "desc", "status", "tags", "created_at", "started_at", "finished_at"] {
            assert!(json.contains(&format!("\"{key}\"")), "missing key {key} in {json}");
        }
        assert!(json.contains("\"todo\""));
    }
}
