//! Dataset snapshot loader.
//!
//! The paper dataset is consumed as a JSONL snapshot with one
//! `{"title": .., "content": ..}` object per line. Fetching the snapshot is
//! the dataset service's problem; this module only reads it.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

/// One row of the source dataset, read-only after load.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatasetRow {
    pub title: String,
    pub content: String,
}

/// Read every row of a JSONL snapshot. Blank lines are skipped; a malformed
/// line is a corpus error naming the line number.
pub fn load_rows(path: &Path) -> Result<Vec<DatasetRow>> {
    let file = File::open(path).map_err(|e| {
        Error::Config(format!("cannot open dataset snapshot {}: {e}", path.display()))
    })?;
    let reader = BufReader::new(file);

    let mut rows = Vec::new();
    for (lineno, line) in reader.lines().enumerate() {
        let line = line.map_err(|e| {
            Error::Corpus(format!("read failed at {}:{}: {e}", path.display(), lineno + 1))
        })?;
        if line.trim().is_empty() {
            continue;
        }
        let row: DatasetRow = serde_json::from_str(&line).map_err(|e| {
            Error::Corpus(format!("bad dataset row at {}:{}: {e}", path.display(), lineno + 1))
        })?;
        rows.push(row);
    }
    tracing::debug!(rows = rows.len(), path = %path.display(), "dataset snapshot loaded");
    Ok(rows)
}
