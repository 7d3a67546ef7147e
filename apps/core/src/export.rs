//! History export formats and file output.

use chrono::SecondsFormat;
use std::path::{Path, PathBuf};
use tracing::info;

use crate::error::AppError;
use crate::fs_manager::PortablePathManager;
use crate::models::HistoryRecord;

pub const TEXT_FILENAME: &str = "chathelper_history.txt";
pub const JSON_FILENAME: &str = "chathelper_history.json";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Text,
    Json,
}

impl ExportFormat {
    pub fn filename(&self) -> &'static str {
        match self {
            ExportFormat::Text => TEXT_FILENAME,
            ExportFormat::Json => JSON_FILENAME,
        }
    }

    /// Notice shown instead of writing a file when there is nothing to export.
    pub fn empty_notice(&self) -> &'static str {
        match self {
            ExportFormat::Text => "No history to download",
            ExportFormat::Json => "No history to export",
        }
    }

    /// Serializes `records` (stored newest first) in this format.
    pub fn render(&self, records: &[HistoryRecord]) -> Result<String, AppError> {
        match self {
            ExportFormat::Text => Ok(to_text(records)),
            ExportFormat::Json => to_json(records),
        }
    }
}

impl std::str::FromStr for ExportFormat {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "txt" | "text" => Ok(ExportFormat::Text),
            "json" => Ok(ExportFormat::Json),
            other => Err(AppError::Validation(format!(
                "Unknown export format '{}': expected txt or json",
                other
            ))),
        }
    }
}

/// Plain-text transcript, oldest first. Blocks are separated by an extra blank line.
pub fn to_text(records: &[HistoryRecord]) -> String {
    records
        .iter()
        .rev()
        .map(|record| {
            format!(
                "Q: {}\nA: {}\nTag: {}\nTime: {}\n\n",
                record.question,
                record.answer,
                record.tag,
                record
                    .created_at
                    .to_rfc3339_opts(SecondsFormat::Millis, true)
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Pretty JSON array in storage order (newest first).
pub fn to_json(records: &[HistoryRecord]) -> Result<String, AppError> {
    Ok(serde_json::to_string_pretty(records)?)
}

/// Parses a structured export back into records.
pub fn parse_structured(json: &str) -> Result<Vec<HistoryRecord>, AppError> {
    Ok(serde_json::from_str(json)?)
}

/// Writes `contents` to `dir/filename`, creating `dir` if needed.
pub async fn write_file(dir: &Path, filename: &str, contents: &str) -> Result<PathBuf, AppError> {
    PortablePathManager::ensure_dir(dir)?;
    let path = dir.join(filename);
    tokio::fs::write(&path, contents).await?;
    info!("Wrote {} bytes to {:?}", contents.len(), path);
    Ok(path)
}
