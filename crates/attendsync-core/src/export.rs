//! Attendance export helpers shared by clients.

use std::fmt::Write as _;

use serde::{Deserialize, Serialize};

use crate::models::{AttendanceRecord, User};

/// Export output format shared by all clients.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ExportFormat {
    Json,
    Markdown,
}

impl ExportFormat {
    #[must_use]
    pub const fn extension(self) -> &'static str {
        match self {
            Self::Json => "json",
            Self::Markdown => "md",
        }
    }
}

/// Flattened record with the user's display name resolved.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportRecord {
    pub id: String,
    pub user_id: String,
    pub user_name: Option<String>,
    #[serde(rename = "type")]
    pub kind: String,
    pub timestamp: String,
    pub location: Option<String>,
}

/// Convert a record into an export row, looking the user up in `users`.
#[must_use]
pub fn record_to_export_item(record: &AttendanceRecord, users: &[User]) -> ExportRecord {
    ExportRecord {
        id: record.id.clone(),
        user_id: record.user_id.clone(),
        user_name: users
            .iter()
            .find(|user| user.id == record.user_id)
            .map(|user| user.name.clone()),
        kind: record.kind.to_string(),
        timestamp: record.timestamp.to_string(),
        location: record.location.clone(),
    }
}

/// Render records as pretty-printed JSON.
pub fn render_json_export(
    records: &[AttendanceRecord],
    users: &[User],
) -> serde_json::Result<String> {
    let items = records
        .iter()
        .map(|record| record_to_export_item(record, users))
        .collect::<Vec<ExportRecord>>();
    serde_json::to_string_pretty(&items)
}

/// Render records as a Markdown table.
#[must_use]
pub fn render_markdown_export(records: &[AttendanceRecord], users: &[User]) -> String {
    let mut output = String::new();
    let _ = writeln!(output, "| Timestamp | User | Name | Event | Location |");
    let _ = writeln!(output, "|---|---|---|---|---|");

    for record in records {
        let item = record_to_export_item(record, users);
        let _ = writeln!(
            output,
            "| {} | {} | {} | {} | {} |",
            item.timestamp,
            escape_cell(&item.user_id),
            escape_cell(item.user_name.as_deref().unwrap_or("")),
            record.kind.label(),
            escape_cell(item.location.as_deref().unwrap_or(""))
        );
    }

    output
}

/// Render records based on selected export format.
pub fn render_attendance_export(
    records: &[AttendanceRecord],
    users: &[User],
    format: ExportFormat,
) -> serde_json::Result<String> {
    match format {
        ExportFormat::Json => render_json_export(records, users),
        ExportFormat::Markdown => Ok(render_markdown_export(records, users)),
    }
}

/// Build a deterministic default file name for export flows.
#[must_use]
pub fn suggested_export_file_name(format: ExportFormat, timestamp_ms: i64) -> String {
    format!("attendance-export-{timestamp_ms}.{}", format.extension())
}

fn escape_cell(value: &str) -> String {
    value.replace('|', "\\|").replace('\n', " ")
}
