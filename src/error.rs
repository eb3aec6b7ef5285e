//! Error types for study-organizer
//!
//! Exit codes:
//! - 0: Success
//! - 2: User error (bad args, bad config, rejected task fields, unknown task)
//! - 4: Operation failed (I/O, HTTP transport, server error)

use std::path::PathBuf;
use thiserror::Error;

use crate::task::TaskId;

/// Exit codes for the study-organizer CLI
pub mod exit_codes {
    pub const SUCCESS: i32 = 0;
    pub const USER_ERROR: i32 = 2;
    pub const OPERATION_FAILED: i32 = 4;
}

/// A single rejected field in a task payload.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

impl FieldError {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

/// Main error type for study-organizer operations
#[derive(Error, Debug)]
pub enum Error {
    // User errors (exit code 2)
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Config file not found: {0}")]
    ConfigNotFound(PathBuf),

    #[error("Task not found: {0}")]
    TaskNotFound(TaskId),

    #[error("Invalid task: {}", summarize_fields(.0))]
    Validation(Vec<FieldError>),

    // Operation failures (exit code 4)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Server responded {status}: {message}")]
    Api { status: u16, message: String },

    #[error("Operation failed: {0}")]
    OperationFailed(String),
}

fn summarize_fields(fields: &[FieldError]) -> String {
    fields
        .iter()
        .map(|field| format!("{}: {}", field.field, field.message))
        .collect::<Vec<_>>()
        .join("; ")
}

impl Error {
    /// Get the exit code for this error
    pub fn exit_code(&self) -> i32 {
        match self {
            Error::InvalidConfig(_)
            | Error::InvalidArgument(_)
            | Error::ConfigNotFound(_)
            | Error::TaskNotFound(_)
            | Error::Validation(_) => exit_codes::USER_ERROR,

            Error::Io(_)
            | Error::Json(_)
            | Error::TomlParse(_)
            | Error::Http(_)
            | Error::Api { .. }
            | Error::OperationFailed(_) => exit_codes::OPERATION_FAILED,
        }
    }

    /// Structured context for JSON output
    pub fn details(&self) -> Option<serde_json::Value> {
        match self {
            Error::InvalidConfig(message) | Error::InvalidArgument(message) => {
                Some(serde_json::json!({ "message": message }))
            }
            Error::ConfigNotFound(path) => {
                Some(serde_json::json!({ "path": path.to_string_lossy() }))
            }
            Error::TaskNotFound(id) => Some(serde_json::json!({ "id": id.get() })),
            Error::Validation(fields) => Some(serde_json::json!({ "fields": fields })),
            Error::Api { status, message } => {
                Some(serde_json::json!({ "status": status, "message": message }))
            }
            _ => None,
        }
    }
}

/// Result type alias for study-organizer operations
pub type Result<T> = std::result::Result<T, Error>;

/// Wrapper for displaying errors in JSON format
#[derive(serde::Serialize)]
pub struct JsonError {
    pub error: String,
    pub code: i32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

impl From<&Error> for JsonError {
    fn from(err: &Error) -> Self {
        JsonError {
            error: err.to_string(),
            code: err.exit_code(),
            details: err.details(),
        }
    }
}
