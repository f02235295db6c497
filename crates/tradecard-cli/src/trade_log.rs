//! Append-only CSV record of generated trades.

use std::fs::OpenOptions;
use std::path::Path;

use anyhow::{Context, Result};
use csv::WriterBuilder;
use serde::Serialize;
use tradecard_core::TradeRow;

pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

#[derive(Debug, Serialize)]
struct TradeRecord<'a> {
    timestamp: &'a str,
    want: String,
    offer: String,
    row_count: usize,
}

/// Append one record per row, all stamped with the current local time.
pub fn append_now(path: &Path, rows: &[TradeRow]) -> Result<usize> {
    let timestamp = chrono::Local::now().format(TIMESTAMP_FORMAT).to_string();
    append(path, rows, &timestamp)
}

/// Append one record per row. The header is only written when the file does
/// not exist yet. Returns the number of records written.
pub fn append(path: &Path, rows: &[TradeRow], timestamp: &str) -> Result<usize> {
    if rows.is_empty() {
        return Ok(0);
    }

    let file_exists = path.is_file();
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("failed to create log directory: {}", parent.display()))?;
        }
    }
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("failed to open trade log: {}", path.display()))?;

    let mut writer = WriterBuilder::new()
        .has_headers(!file_exists)
        .from_writer(file);
    for row in rows {
        writer.serialize(TradeRecord {
            timestamp,
            want: row.want_joined(),
            offer: row.offer_joined(),
            row_count: rows.len(),
        })?;
    }
    writer
        .flush()
        .with_context(|| format!("failed to write trade log: {}", path.display()))?;

    tracing::debug!("Logged {} trade rows to {}", rows.len(), path.display());
    Ok(rows.len())
}
