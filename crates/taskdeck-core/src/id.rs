use serde::{Deserialize, Serialize};
use std::num::NonZeroU64;
use std::{fmt, str::FromStr};
use thiserror::Error;

/// Identifier of a task: a positive integer, unique within a collection.
///
/// Identifiers are allocated by scanning the loaded collection for the
/// current maximum, so they stay valid even when the backing file is edited
/// externally.
#[derive(Clone, Copy, Eq, PartialEq, Ord, PartialOrd, Hash, Debug, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TaskId(NonZeroU64);

/// Error returned when a string does not name a valid task id.
#[derive(Debug, Error)]
#[error("invalid task id: {input} (expected a positive integer)")]
pub struct ParseTaskIdError {
    input: String,
}

impl TaskId {
    /// Identifier assigned to the first task of an empty collection.
    pub const FIRST: Self = Self(NonZeroU64::MIN);

    /// Wrap a raw value, rejecting zero.
    #[must_use]
    pub const fn new(raw: u64) -> Option<Self> {
        match NonZeroU64::new(raw) {
            Some(value) => Some(Self(value)),
            None => None,
        }
    }

    /// Raw integer value.
    #[must_use]
    pub const fn get(self) -> u64 {
        self.0.get()
    }

    /// Identifier directly following this one.
    #[must_use]
    pub const fn successor(self) -> Self {
        Self(self.0.saturating_add(1))
    }
}

impl fmt::Display for TaskId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl FromStr for TaskId {
    type Err = ParseTaskIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim()
            .parse::<u64>()
            .ok()
            .and_then(Self::new)
            .ok_or_else(|| ParseTaskIdError { input: s.to_owned() })
    }
}
