//! Trade rows from the command line and from JSON files.

use std::path::Path;

use anyhow::{Context, Result};
use tradecard_core::TradeRow;

/// Parse a `--row` value: `want1,want2|offer1,offer2`.
///
/// Identifiers are trimmed and blanks dropped, so `"|Frog"` is a row that
/// wants nothing and offers a Frog.
pub fn parse_row(arg: &str) -> Result<TradeRow> {
    let Some((want, offer)) = arg.split_once('|') else {
        anyhow::bail!("row '{}' must look like WANT,...|OFFER,...", arg);
    };
    if offer.contains('|') {
        anyhow::bail!("row '{}' has more than one '|'", arg);
    }
    Ok(TradeRow::new(split_items(want), split_items(offer)))
}

fn split_items(side: &str) -> Vec<String> {
    side.split(',')
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .map(str::to_string)
        .collect()
}

/// Read `[{"want": [...], "offer": [...]}, ...]`.
pub fn load_rows_file(path: &Path) -> Result<Vec<TradeRow>> {
    let contents = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read rows file: {}", path.display()))?;
    serde_json::from_str(&contents)
        .with_context(|| format!("failed to parse rows file: {}", path.display()))
}

/// Rows from the file first, then each `--row`, in order. Rows with nothing
/// on either side are rejected.
pub fn collect_rows(row_args: &[String], rows_file: Option<&Path>) -> Result<Vec<TradeRow>> {
    let mut rows = match rows_file {
        Some(path) => load_rows_file(path)?,
        None => Vec::new(),
    };
    for arg in row_args {
        rows.push(parse_row(arg)?);
    }

    if let Some(index) = rows.iter().position(TradeRow::is_empty) {
        anyhow::bail!("row {} has no items on either side", index + 1);
    }
    Ok(rows)
}
