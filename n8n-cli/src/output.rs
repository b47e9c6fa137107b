//! Rendering of command results.
//!
//! Commands return an [`Output`]; `main` renders it once in the format the
//! user picked. JSON output is the result as received, table output is a
//! fixed projection of selected fields.

use chrono::{DateTime, Utc};
use clap::ValueEnum;
use serde_json::Value;

/// Output format selected with `--format`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// Pretty-printed JSON.
    #[default]
    Json,
    /// Human-readable table or record view.
    Table,
}

/// A projected field: JSON key and display label.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Column {
    /// Key in the JSON object.
    pub key: &'static str,
    /// Header or label shown to the user.
    pub label: &'static str,
}

const fn col(key: &'static str, label: &'static str) -> Column {
    Column { key, label }
}

pub const WORKFLOW_COLUMNS: &[Column] = &[
    col("id", "ID"),
    col("name", "Name"),
    col("active", "Active"),
    col("tags", "Tags"),
    col("updatedAt", "Updated"),
];

pub const WORKFLOW_FIELDS: &[Column] = &[
    col("id", "ID"),
    col("name", "Name"),
    col("active", "Active"),
    col("tags", "Tags"),
    col("createdAt", "Created"),
    col("updatedAt", "Updated"),
];

pub const EXECUTION_COLUMNS: &[Column] = &[
    col("id", "ID"),
    col("workflowId", "Workflow"),
    col("status", "Status"),
    col("mode", "Mode"),
    col("startedAt", "Started"),
    col("stoppedAt", "Stopped"),
];

pub const EXECUTION_FIELDS: &[Column] = &[
    col("id", "ID"),
    col("workflowId", "Workflow"),
    col("status", "Status"),
    col("mode", "Mode"),
    col("finished", "Finished"),
    col("startedAt", "Started"),
    col("stoppedAt", "Stopped"),
    col("data", "Data"),
];

pub const CREDENTIAL_COLUMNS: &[Column] = &[
    col("id", "ID"),
    col("name", "Name"),
    col("type", "Type"),
    col("createdAt", "Created"),
    col("updatedAt", "Updated"),
];

pub const CREDENTIAL_FIELDS: &[Column] = &[
    col("id", "ID"),
    col("name", "Name"),
    col("type", "Type"),
    col("data", "Data"),
    col("createdAt", "Created"),
    col("updatedAt", "Updated"),
];

pub const SCHEMA_COLUMNS: &[Column] = &[
    col("name", "Field"),
    col("type", "Type"),
    col("required", "Required"),
];

pub const CONFIG_FIELDS: &[Column] = &[
    col("path", "Config file"),
    col("api_url", "API URL"),
    col("api_key", "API key"),
    col("timeout_secs", "Timeout (s)"),
    col("sensitive_fields", "Extra sensitive fields"),
];

/// Result of a command, ready to be rendered.
#[derive(Debug, Clone, PartialEq)]
pub enum Output {
    /// Always rendered as JSON.
    Json(Value),
    /// A single object; a label/value record in table format.
    Record {
        value: Value,
        fields: &'static [Column],
    },
    /// A list of objects; a table in table format.
    Table {
        rows: Vec<Value>,
        columns: &'static [Column],
    },
    /// A JSON document shown as-is in JSON format and as a table of
    /// derived rows in table format.
    Projection {
        json: Value,
        rows: Vec<Value>,
        columns: &'static [Column],
    },
    /// Plain text.
    Message(String),
}

impl Output {
    /// Render in the given format.
    pub fn render(&self, format: OutputFormat) -> String {
        match (self, format) {
            (Output::Message(text), _) => text.clone(),
            (Output::Json(value), _)
            | (Output::Record { value, .. }, OutputFormat::Json)
            | (Output::Projection { json: value, .. }, OutputFormat::Json) => {
                format!("{:#}", value)
            }
            (Output::Table { rows, .. }, OutputFormat::Json) => {
                format!("{:#}", Value::Array(rows.clone()))
            }
            (Output::Record { value, fields }, OutputFormat::Table) => render_record(value, fields),
            (Output::Table { rows, columns }, OutputFormat::Table)
            | (Output::Projection { rows, columns, .. }, OutputFormat::Table) => {
                render_table(rows, columns)
            }
        }
    }
}

fn render_record(value: &Value, fields: &[Column]) -> String {
    let width = fields.iter().map(|f| f.label.len() + 1).max().unwrap_or(0);
    fields
        .iter()
        .map(|f| {
            let label = format!("{}:", f.label);
            format!("{:<width$}  {}", label, cell_text(f.key, value.get(f.key)))
        })
        .collect::<Vec<_>>()
        .join("\n")
}

fn render_table(rows: &[Value], columns: &[Column]) -> String {
    if rows.is_empty() {
        return "No results".to_string();
    }

    let cells: Vec<Vec<String>> = rows
        .iter()
        .map(|row| {
            columns
                .iter()
                .map(|c| cell_text(c.key, row.get(c.key)))
                .collect()
        })
        .collect();

    let widths: Vec<usize> = columns
        .iter()
        .enumerate()
        .map(|(i, c)| {
            cells
                .iter()
                .map(|r| r[i].chars().count())
                .chain(std::iter::once(c.label.len()))
                .max()
                .unwrap_or(0)
        })
        .collect();

    let line = |values: Vec<String>| -> String {
        values
            .iter()
            .zip(&widths)
            .map(|(v, w)| format!("{:<w$}", v, w = *w))
            .collect::<Vec<_>>()
            .join("  ")
            .trim_end()
            .to_string()
    };

    let mut lines = Vec::with_capacity(rows.len() + 2);
    lines.push(line(columns.iter().map(|c| c.label.to_string()).collect()));
    lines.push(line(widths.iter().map(|w| "-".repeat(*w)).collect()));
    lines.extend(cells.into_iter().map(line));
    lines.join("\n")
}

/// Display text for one field.
fn cell_text(key: &str, value: Option<&Value>) -> String {
    match value {
        None | Some(Value::Null) => "-".to_string(),
        Some(Value::Bool(true)) => "Yes".to_string(),
        Some(Value::Bool(false)) => "No".to_string(),
        Some(Value::String(s)) if key.ends_with("At") => format_datetime(s),
        Some(Value::String(s)) => s.clone(),
        Some(Value::Array(items)) if items.is_empty() => "-".to_string(),
        Some(Value::Array(items)) => items
            .iter()
            .map(|item| match item {
                Value::Object(map) => map
                    .get("name")
                    .and_then(Value::as_str)
                    .map(str::to_string)
                    .unwrap_or_else(|| item.to_string()),
                Value::String(s) => s.clone(),
                other => other.to_string(),
            })
            .collect::<Vec<_>>()
            .join(", "),
        Some(other) => other.to_string(),
    }
}

/// Render an ISO 8601 timestamp as `YYYY-MM-DD HH:MM:SS` in UTC.
///
/// Unparseable input is returned unchanged.
pub fn format_datetime(timestamp: &str) -> String {
    DateTime::parse_from_rfc3339(timestamp)
        .map(|dt| dt.with_timezone(&Utc).format("%Y-%m-%d %H:%M:%S").to_string())
        .unwrap_or_else(|_| timestamp.to_string())
}
