//! Task status literals and field rules shared by create, update and list.

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::validation::ValidationError;

/// Date format accepted for `due_date` and the list date bounds.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Task workflow state. Stored as its literal in `tasks.status`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TaskStatus {
    /// Not started.
    #[default]
    Backlog,
    #[serde(rename = "In_Progress")]
    InProgress,
    Done,
}

impl TaskStatus {
    pub const ALL: [TaskStatus; 3] = [TaskStatus::Backlog, TaskStatus::InProgress, TaskStatus::Done];

    /// The literal persisted in the database and sent over the wire.
    pub fn as_str(self) -> &'static str {
        match self {
            TaskStatus::Backlog => "Backlog",
            TaskStatus::InProgress => "In_Progress",
            TaskStatus::Done => "Done",
        }
    }
}

impl fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TaskStatus {
    type Err = ValidationError;

    /// Exact, case-sensitive match on the literal.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        TaskStatus::ALL
            .into_iter()
            .find(|status| status.as_str() == s)
            .ok_or_else(|| ValidationError::InvalidStatus(s.to_string()))
    }
}

impl TryFrom<String> for TaskStatus {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

/// Resolve the status of a new task.
///
/// Absent or blank input falls back to [`TaskStatus::Backlog`]; anything else
/// must be one of the literals.
pub fn resolve_create_status(input: Option<&str>) -> Result<TaskStatus, ValidationError> {
    match input.map(str::trim) {
        None | Some("") => Ok(TaskStatus::default()),
        Some(literal) => literal.parse(),
    }
}

/// Resolve a status change on update. Absent or blank means "leave as is".
pub fn resolve_update_status(input: Option<&str>) -> Result<Option<TaskStatus>, ValidationError> {
    match input.map(str::trim) {
        None | Some("") => Ok(None),
        Some(literal) => literal.parse().map(Some),
    }
}

/// Parse a `YYYY-MM-DD` calendar date for the named field.
pub fn parse_date(field: &'static str, value: &str) -> Result<NaiveDate, ValidationError> {
    let trimmed = value.trim();
    NaiveDate::parse_from_str(trimmed, DATE_FORMAT).map_err(|_| ValidationError::BadDate {
        field,
        value: value.to_string(),
    })
}

/// Parse an optional date; `None` and blank both mean "no date".
pub fn parse_optional_date(
    field: &'static str,
    value: Option<&str>,
) -> Result<Option<NaiveDate>, ValidationError> {
    match value {
        Some(v) if !v.trim().is_empty() => parse_date(field, v).map(Some),
        _ => Ok(None),
    }
}

/// What an update does to `due_date`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum DueDateChange {
    /// Field absent from the payload.
    #[default]
    Keep,
    /// Field present and empty.
    Clear,
    Set(NaiveDate),
}

impl DueDateChange {
    /// Interpret the raw `due_date` value of an update payload.
    pub fn from_input(value: Option<&str>) -> Result<Self, ValidationError> {
        match value {
            None => Ok(DueDateChange::Keep),
            Some(v) if v.trim().is_empty() => Ok(DueDateChange::Clear),
            Some(v) => parse_date("due_date", v).map(DueDateChange::Set),
        }
    }
}

/// Build an `ILIKE` pattern matching `term` as a literal substring.
///
/// `%`, `_` and the escape character itself are escaped with a backslash
/// (the Postgres default `LIKE` escape). Returns `None` for a blank term.
pub fn search_pattern(term: &str) -> Option<String> {
    let term = term.trim();
    if term.is_empty() {
        return None;
    }
    let mut pattern = String::with_capacity(term.len() + 2);
    pattern.push('%');
    for ch in term.chars() {
        if matches!(ch, '\\' | '%' | '_') {
            pattern.push('\\');
        }
        pattern.push(ch);
    }
    pattern.push('%');
    Some(pattern)
}
