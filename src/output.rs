//! Human and JSON output for CLI commands.

use serde::Serialize;

use crate::error::{exit_codes, Error, Result};

pub const SCHEMA_VERSION: &str = "study-organizer.v1";

const DEFAULT_COMMAND: &str = "study-organizer";

#[derive(Debug, Clone, Copy, Default)]
pub struct OutputOptions {
    pub json: bool,
    pub quiet: bool,
}

/// Text report: a header line, `key: value` summary, then titled sections.
#[derive(Debug, Clone)]
pub struct HumanOutput {
    header: String,
    summary: Vec<(String, String)>,
    details: Vec<String>,
    sections: Vec<(String, Vec<String>)>,
    warnings: Vec<String>,
    next_steps: Vec<String>,
}

impl HumanOutput {
    pub fn new(header: impl Into<String>) -> Self {
        Self {
            header: header.into(),
            summary: Vec::new(),
            details: Vec::new(),
            sections: Vec::new(),
            warnings: Vec::new(),
            next_steps: Vec::new(),
        }
    }

    pub fn push_summary(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.summary.push((key.into(), value.into()));
    }

    pub fn push_detail(&mut self, value: impl Into<String>) {
        self.details.push(value.into());
    }

    /// Append `value` to the titled section, creating it on first use.
    pub fn push_item(&mut self, section: &str, value: impl Into<String>) {
        match self.sections.iter_mut().find(|(title, _)| title == section) {
            Some((_, items)) => items.push(value.into()),
            None => self.sections.push((section.to_string(), vec![value.into()])),
        }
    }

    pub fn push_warning(&mut self, value: impl Into<String>) {
        self.warnings.push(value.into());
    }

    pub fn push_next_step(&mut self, value: impl Into<String>) {
        self.next_steps.push(value.into());
    }
}

#[derive(Serialize)]
struct SuccessEnvelope<'a, T: Serialize> {
    schema_version: &'static str,
    command: &'a str,
    status: &'static str,
    data: &'a T,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    warnings: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    next_steps: Vec<String>,
}

#[derive(Serialize)]
struct ErrorBody {
    message: String,
    code: i32,
    kind: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    details: Option<serde_json::Value>,
}

#[derive(Serialize)]
struct ErrorEnvelope<'a> {
    schema_version: &'static str,
    command: &'a str,
    status: &'static str,
    error: ErrorBody,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    next_steps: Vec<String>,
}

/// JSON envelope for a successful command.
pub fn success_envelope<T: Serialize>(
    command: &str,
    data: &T,
    human: Option<&HumanOutput>,
) -> Result<serde_json::Value> {
    let envelope = SuccessEnvelope {
        schema_version: SCHEMA_VERSION,
        command,
        status: "success",
        data,
        warnings: human.map(|h| h.warnings.clone()).unwrap_or_default(),
        next_steps: human.map(|h| h.next_steps.clone()).unwrap_or_default(),
    };
    Ok(serde_json::to_value(envelope)?)
}

/// JSON envelope for a failed command.
pub fn error_envelope(command: &str, err: &Error) -> Result<serde_json::Value> {
    let envelope = ErrorEnvelope {
        schema_version: SCHEMA_VERSION,
        command,
        status: "error",
        error: ErrorBody {
            message: err.to_string(),
            code: err.exit_code(),
            kind: error_kind(err),
            details: err.details(),
        },
        next_steps: error_next_steps(err),
    };
    Ok(serde_json::to_value(envelope)?)
}

pub fn emit_success<T: Serialize>(
    options: OutputOptions,
    command: &str,
    data: &T,
    human: Option<&HumanOutput>,
) -> Result<()> {
    if options.json {
        let payload = success_envelope(command, data, human)?;
        println!("{}", serde_json::to_string_pretty(&payload)?);
        return Ok(());
    }

    if options.quiet {
        return Ok(());
    }

    if let Some(human) = human {
        println!("{}", format_human(human));
    }
    Ok(())
}

pub fn emit_error(command: &str, err: &Error, json: bool) -> Result<()> {
    if json {
        let payload = error_envelope(command, err)?;
        println!("{}", serde_json::to_string_pretty(&payload)?);
        return Ok(());
    }

    eprintln!("error: {err}");
    if let Some(hint) = error_next_steps(err).first() {
        eprintln!("hint: {hint}");
    }
    Ok(())
}

pub fn format_human(output: &HumanOutput) -> String {
    let mut lines = vec![output.header.clone()];

    push_summary(&mut lines, &output.summary);
    push_section(&mut lines, "Details", &output.details);
    for (title, items) in &output.sections {
        push_section(&mut lines, title, items);
    }
    push_section(&mut lines, "Warnings", &output.warnings);
    push_section(&mut lines, "Next steps", &output.next_steps);

    lines.join("\n")
}

/// First positional argument, used to label errors raised before clap has
/// produced a command.
pub fn infer_command_name_from_args() -> String {
    command_name(std::env::args().skip(1))
}

fn command_name(args: impl IntoIterator<Item = String>) -> String {
    let mut args = args.into_iter();
    while let Some(arg) = args.next() {
        // Global options that take a value
        if matches!(arg.as_str(), "--config" | "--api-url") {
            args.next();
            continue;
        }
        if arg.starts_with('-') {
            continue;
        }
        return arg;
    }
    DEFAULT_COMMAND.to_string()
}

fn error_kind(err: &Error) -> &'static str {
    match err.exit_code() {
        exit_codes::USER_ERROR => "user_error",
        _ => "operation_failed",
    }
}

fn error_next_steps(err: &Error) -> Vec<String> {
    match err {
        Error::TaskNotFound(_) => vec!["study-organizer list".to_string()],
        Error::Validation(_) => {
            vec!["study-organizer add \"<title>\" --due YYYY-MM-DD".to_string()]
        }
        Error::Http(_) => vec![
            "study-organizer serve".to_string(),
            "check --api-url or STUDY_ORGANIZER_API".to_string(),
        ],
        Error::InvalidConfig(_) | Error::TomlParse(_) => {
            vec!["fix study-organizer.toml then retry".to_string()]
        }
        Error::ConfigNotFound(_) => vec!["check --config or STUDY_ORGANIZER_CONFIG".to_string()],
        _ => Vec::new(),
    }
}

fn push_summary(lines: &mut Vec<String>, summary: &[(String, String)]) {
    if summary.is_empty() {
        return;
    }

    lines.push(String::new());
    lines.push("Summary:".to_string());
    for (key, value) in summary {
        if value.is_empty() {
            lines.push(format!("- {key}"));
        } else {
            lines.push(format!("- {key}: {value}"));
        }
    }
}

fn push_section(lines: &mut Vec<String>, title: &str, items: &[String]) {
    if items.is_empty() {
        return;
    }

    lines.push(String::new());
    lines.push(format!("{title}:"));
    for item in items {
        lines.push(format!("- {item}"));
    }
}
