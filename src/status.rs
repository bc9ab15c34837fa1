//! Start-time and duration projection from raw workflow status documents.

use chrono::{DateTime, FixedOffset};
use serde_json::Value;

use crate::error::{LensError, Result};

/// Duration shown while the workflow has no end timestamp yet.
pub const IN_PROGRESS: &str = "In Progress";

/// Start time shown when the document carries no start timestamp.
pub const NOT_AVAILABLE: &str = "N/A";

/// Derived timing fields of one workflow.
#[derive(Debug, Clone, PartialEq)]
pub struct WorkflowTiming {
    pub start_time: String,
    pub duration: String,
}

/// Derive `startTime` and `duration` from a workflow `status` document.
///
/// A present but unparseable timestamp is an error, never silently
/// defaulted: reporting a wrong duration would be worse than failing the
/// request.
pub fn project_timing(status: &Value) -> Result<WorkflowTiming> {
    let start_time = status
        .get("startedAt")
        .and_then(Value::as_str)
        .unwrap_or(NOT_AVAILABLE)
        .to_string();

    let duration = match status.get("finishedAt").and_then(Value::as_str) {
        None => IN_PROGRESS.to_string(),
        Some(finished) => format_elapsed(&start_time, finished)?,
    };

    Ok(WorkflowTiming {
        start_time,
        duration,
    })
}

/// Elapsed wall-clock interval between two RFC-3339 timestamps, formatted
/// `H:MM:SS` with unpadded hours.
fn format_elapsed(start: &str, end: &str) -> Result<String> {
    let start = parse_timestamp(start)?;
    let end = parse_timestamp(end)?;

    let total_seconds = (end - start).num_seconds();
    let (sign, total_seconds) = if total_seconds < 0 {
        ("-", -total_seconds)
    } else {
        ("", total_seconds)
    };

    Ok(format!(
        "{sign}{}:{:02}:{:02}",
        total_seconds / 3600,
        (total_seconds % 3600) / 60,
        total_seconds % 60
    ))
}

/// Parse an RFC-3339 timestamp; a trailing `Z` is accepted as UTC offset.
fn parse_timestamp(value: &str) -> Result<DateTime<FixedOffset>> {
    DateTime::parse_from_rfc3339(value)
        .map_err(|e| LensError::TimeParse(format!("'{value}': {e}")))
}
