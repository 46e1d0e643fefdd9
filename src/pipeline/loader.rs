//! Survey extract parsing and schema validation.

use std::collections::HashSet;
use std::io::Cursor;
use std::path::Path;

use polars::prelude::*;

use crate::pipeline::error::AnalysisError;
use crate::pipeline::schema;
use crate::pipeline::fetch;

/// Parse the decompressed CSV payload into a `DataFrame`.
///
/// Schema inference runs over the first `infer_schema_length` rows
/// (`None` scans the whole payload). Survey codes are numeric throughout,
/// so inference settles on integer/float dtypes per column.
pub fn parse_dataset(
    bytes: &[u8],
    infer_schema_length: Option<usize>,
) -> Result<DataFrame, AnalysisError> {
    CsvReadOptions::default()
        .with_has_header(true)
        .with_infer_schema_length(infer_schema_length)
        .into_reader_with_file_handle(Cursor::new(bytes))
        .finish()
        .map_err(|err| AnalysisError::Format {
            message: format!("failed to parse the survey CSV: {err}"),
        })
}

/// Check that every column the pipeline reads is present in the extract.
pub fn validate_schema(df: &DataFrame) -> Result<(), AnalysisError> {
    let present: HashSet<&str> = df.get_column_names().iter().map(|s| s.as_str()).collect();
    let missing: Vec<&str> = schema::required_columns()
        .into_iter()
        .filter(|name| !present.contains(name))
        .collect();

    if missing.is_empty() {
        return Ok(());
    }

    // List a handful of names so the failure is diagnosable without flooding
    // the terminal when a whole block of codes is absent.
    let shown: Vec<&str> = missing.iter().copied().take(8).collect();
    let suffix = if missing.len() > shown.len() {
        format!(" (and {} more)", missing.len() - shown.len())
    } else {
        String::new()
    };
    Err(AnalysisError::Format {
        message: format!(
            "survey extract is missing {} expected columns: {}{}",
            missing.len(),
            shown.join(", "),
            suffix
        ),
    })
}

/// Load a local extract instead of fetching over the network.
///
/// Accepts either the raw CSV or the distributed zip archive.
pub fn load_local(
    path: &Path,
    infer_schema_length: Option<usize>,
) -> Result<DataFrame, AnalysisError> {
    let bytes = std::fs::read(path).map_err(|err| AnalysisError::Io {
        stage: "read",
        message: format!("failed to read {}: {err}", path.display()),
    })?;

    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    match extension.as_str() {
        "csv" => parse_dataset(&bytes, infer_schema_length),
        "zip" => {
            let payload = fetch::extract_data_file(&bytes)?;
            parse_dataset(&payload, infer_schema_length)
        }
        other => Err(AnalysisError::Format {
            message: format!("unsupported input format '{other}': expected csv or zip"),
        }),
    }
}
