//! Task records and the payloads that create or replace them.
//!
//! `Task` is the wire shape shared by the server and the client
//! (`{"id":1,"title":"...","description":"...","dueDate":"2026-10-16","completed":false}`).
//! `TaskPayload` is what clients send; `TaskFields` is a payload that passed
//! boundary validation and can be written to the store.

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::error::{Error, FieldError, Result};

const DUE_DATE_FORMAT: &str = "%Y-%m-%d";

/// Store-assigned task identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TaskId(u64);

impl TaskId {
    pub const fn new(value: u64) -> Self {
        Self(value)
    }

    pub const fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for TaskId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for TaskId {
    type Err = Error;

    fn from_str(value: &str) -> Result<Self> {
        let trimmed = value.trim().trim_start_matches('#');
        trimmed
            .parse::<u64>()
            .map(TaskId)
            .map_err(|_| Error::InvalidArgument(format!("invalid task id '{value}'")))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: TaskId,
    #[serde(default)]
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub due_date: Option<String>,
    #[serde(default)]
    pub completed: bool,
}

impl Task {
    pub fn from_fields(id: TaskId, fields: TaskFields) -> Self {
        Self {
            id,
            title: fields.title,
            description: fields.description,
            due_date: fields.due_date.map(format_due_date),
            completed: fields.completed,
        }
    }

    /// Parsed due date; `None` when absent or unparsable.
    pub fn due(&self) -> Option<NaiveDate> {
        self.due_date.as_deref().and_then(parse_due_date)
    }

    /// Payload that replaces this record with every field unchanged.
    pub fn to_payload(&self) -> TaskPayload {
        TaskPayload {
            title: Some(self.title.clone()),
            description: self.description.clone(),
            due_date: self.due_date.clone(),
            completed: Some(self.completed),
        }
    }
}

/// Client-supplied task fields. Unknown fields (including `id`) are ignored.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TaskPayload {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub due_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub completed: Option<bool>,
}

impl TaskPayload {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: Some(title.into()),
            ..Self::default()
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_due_date(mut self, due_date: impl Into<String>) -> Self {
        self.due_date = Some(due_date.into());
        self
    }

    pub fn with_completed(mut self, completed: bool) -> Self {
        self.completed = Some(completed);
        self
    }

    /// Validate a create request; `completed` is always forced to `false`.
    pub fn into_new_fields(self) -> Result<TaskFields> {
        let mut fields = self.validate()?;
        fields.completed = false;
        Ok(fields)
    }

    /// Validate a full-record replacement; a missing `completed` means `false`.
    pub fn into_replacement_fields(self) -> Result<TaskFields> {
        self.validate()
    }

    fn validate(self) -> Result<TaskFields> {
        let mut errors = Vec::new();

        let title = self
            .title
            .as_deref()
            .map(str::trim)
            .unwrap_or_default()
            .to_string();
        if title.is_empty() {
            errors.push(FieldError::new("title", "title is required"));
        }

        let description = self
            .description
            .map(|value| value.trim().to_string())
            .filter(|value| !value.is_empty());

        let due_date = match self.due_date.as_deref().map(str::trim) {
            None | Some("") => None,
            Some(raw) => match parse_due_date(raw) {
                Some(date) => Some(date),
                None => {
                    errors.push(FieldError::new(
                        "dueDate",
                        format!("'{raw}' is not a calendar date (expected YYYY-MM-DD)"),
                    ));
                    None
                }
            },
        };

        if !errors.is_empty() {
            return Err(Error::Validation(errors));
        }

        Ok(TaskFields {
            title,
            description,
            due_date,
            completed: self.completed.unwrap_or(false),
        })
    }
}

/// Task fields that passed boundary validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskFields {
    pub title: String,
    pub description: Option<String>,
    pub due_date: Option<NaiveDate>,
    pub completed: bool,
}

/// Parse a due date as sent by date inputs (`YYYY-MM-DD`), also accepting
/// RFC 3339 timestamps by taking their calendar day.
pub fn parse_due_date(value: &str) -> Option<NaiveDate> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return None;
    }
    NaiveDate::parse_from_str(trimmed, DUE_DATE_FORMAT)
        .ok()
        .or_else(|| {
            DateTime::parse_from_rfc3339(trimmed)
                .map(|dt| dt.date_naive())
                .ok()
        })
}

pub fn format_due_date(date: NaiveDate) -> String {
    date.format(DUE_DATE_FORMAT).to_string()
}

/// Display order: open before completed, dated before undated, earlier
/// dates first, undated tasks by title. `sort_by` keeps equal tasks in
/// their incoming order.
pub fn sort_tasks(tasks: &mut [Task]) {
    tasks.sort_by(compare_tasks);
}

pub fn compare_tasks(left: &Task, right: &Task) -> Ordering {
    left.completed
        .cmp(&right.completed)
        .then_with(|| match (left.due(), right.due()) {
            (Some(a), Some(b)) => a.cmp(&b),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => compare_titles(&left.title, &right.title),
        })
}

fn compare_titles(left: &str, right: &str) -> Ordering {
    let left = left.trim();
    let right = right.trim();
    match (left.is_empty(), right.is_empty()) {
        (true, true) => Ordering::Equal,
        (true, false) => Ordering::Greater,
        (false, true) => Ordering::Less,
        (false, false) => left
            .to_lowercase()
            .cmp(&right.to_lowercase())
            .then_with(|| left.cmp(right)),
    }
}
