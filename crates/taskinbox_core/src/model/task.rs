//! Task domain model.
//!
//! # Responsibility
//! - Define the task record and its wire shape (`id`, `title`, `completed`,
//!   `createdAt`).
//! - Provide strict identifier parsing and title validation.
//!
//! # Invariants
//! - `TaskId` values are allocated from a monotonically increasing counter and
//!   are never reused within a process lifetime.
//! - `title` is trimmed and non-empty for every constructed `Task`.
//! - `created_at` is captured once and never changes.

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt::{Display, Formatter};
use std::str::FromStr;
use thiserror::Error;

/// Message returned to callers when a create request carries no usable title.
pub const TITLE_REQUIRED_MESSAGE: &str = "Title is required";

/// Stable identifier for one task.
///
/// Serialized as a decimal string (`"1"`, `"2"`, ...) to keep the identifier
/// opaque on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TaskId(u64);

impl TaskId {
    /// First identifier handed out by a fresh repository.
    pub const FIRST: TaskId = TaskId(1);

    pub fn new(value: u64) -> Self {
        Self(value)
    }

    pub fn value(self) -> u64 {
        self.0
    }

    /// Returns the identifier allocated right after this one.
    pub fn next(self) -> Self {
        Self(self.0 + 1)
    }
}

impl Display for TaskId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Error for identifier text that is not the canonical form of any `TaskId`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid task id `{0}`")]
pub struct ParseTaskIdError(pub String);

impl FromStr for TaskId {
    type Err = ParseTaskIdError;

    /// Accepts only the canonical decimal rendering of an identifier.
    ///
    /// `"01"`, `"+1"` and `" 1"` are rejected so that lookups behave like exact
    /// string comparison against issued identifiers.
    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let invalid = || ParseTaskIdError(value.to_string());
        if value.is_empty() || !value.bytes().all(|b| b.is_ascii_digit()) {
            return Err(invalid());
        }
        if value.len() > 1 && value.starts_with('0') {
            return Err(invalid());
        }
        value.parse::<u64>().map(TaskId).map_err(|_| invalid())
    }
}

impl Serialize for TaskId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for TaskId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let text = String::deserialize(deserializer)?;
        text.parse().map_err(serde::de::Error::custom)
    }
}

/// Validation failures for task construction.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TaskValidationError {
    /// Title is missing, not text, or blank after trimming.
    #[error("Title is required")]
    TitleRequired,
}

/// Canonical task record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: TaskId,
    pub title: String,
    pub completed: bool,
    /// Serialized as ISO-8601 UTC with millisecond precision.
    #[serde(with = "iso_millis")]
    pub created_at: DateTime<Utc>,
}

impl Task {
    /// Creates an active task from a candidate title.
    ///
    /// # Errors
    /// - Returns `TaskValidationError::TitleRequired` when the title is blank.
    pub fn new(
        id: TaskId,
        title: &str,
        created_at: DateTime<Utc>,
    ) -> Result<Self, TaskValidationError> {
        let title = normalize_title(Some(title))?;
        Ok(Self {
            id,
            title,
            completed: false,
            created_at,
        })
    }
}

/// Strips leading and trailing title whitespace.
///
/// Uses the ECMAScript whitespace and line-terminator set: Unicode White_Space
/// plus U+FEFF, minus U+0085. Titles arriving from web clients trim the same
/// way on both ends.
pub fn trim_title(title: &str) -> &str {
    title.trim_matches(is_title_space)
}

fn is_title_space(c: char) -> bool {
    c == '\u{feff}' || (c.is_whitespace() && c != '\u{85}')
}

/// Trims a candidate title and rejects it when nothing usable remains.
///
/// `None` stands for an absent or non-text candidate.
pub fn normalize_title(candidate: Option<&str>) -> Result<String, TaskValidationError> {
    match candidate.map(trim_title) {
        Some(title) if !title.is_empty() => Ok(title.to_string()),
        _ => Err(TaskValidationError::TitleRequired),
    }
}

/// Formats a timestamp the way `createdAt` appears on the wire.
pub fn format_timestamp(value: &DateTime<Utc>) -> String {
    value.to_rfc3339_opts(SecondsFormat::Millis, true)
}

mod iso_millis {
    use super::format_timestamp;
    use chrono::{DateTime, Utc};
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(value: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&format_timestamp(value))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<DateTime<Utc>, D::Error> {
        let text = String::deserialize(deserializer)?;
        DateTime::parse_from_rfc3339(&text)
            .map(|value| value.with_timezone(&Utc))
            .map_err(serde::de::Error::custom)
    }
}
