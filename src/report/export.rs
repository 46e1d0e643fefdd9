//! JSON export of a full analysis run

use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

use anyhow::{Context, Result};
use chrono::Utc;
use serde::Serialize;

use crate::pipeline::{ColumnSummary, LogisticFit};

/// Metadata about the analysis run
#[derive(Serialize)]
pub struct RunMetadata {
    /// Timestamp of the analysis (ISO 8601 format)
    pub timestamp: String,
    /// scfa version
    pub scfa_version: String,
    /// Where the extract came from (URL or local path)
    pub source: String,
    /// Rows in the parsed extract
    pub rows: usize,
    /// Columns in the parsed extract
    pub columns: usize,
    /// Rows remaining in the model subset after dropping incomplete rows
    pub model_rows: usize,
}

/// Everything a run produces, in one exportable document
#[derive(Serialize)]
pub struct AnalysisReport<'a> {
    pub metadata: RunMetadata,
    /// Descriptive statistics over the full sample
    pub full_sample: &'a [ColumnSummary],
    /// Descriptive statistics over the Black non-Latino subsample
    pub black_nonlatino: &'a [ColumnSummary],
    /// The fitted rejection regression
    pub fit: &'a LogisticFit,
}

/// Write the report as pretty-printed JSON.
pub fn export_report(path: &Path, report: &AnalysisReport<'_>) -> Result<()> {
    let file = File::create(path)
        .with_context(|| format!("Failed to create export file: {}", path.display()))?;
    serde_json::to_writer_pretty(BufWriter::new(file), report)
        .with_context(|| format!("Failed to write JSON report: {}", path.display()))?;
    Ok(())
}

impl RunMetadata {
    pub fn new(source: String, rows: usize, columns: usize, model_rows: usize) -> Self {
        Self {
            timestamp: Utc::now().to_rfc3339(),
            scfa_version: env!("CARGO_PKG_VERSION").to_string(),
            source,
            rows,
            columns,
            model_rows,
        }
    }
}
