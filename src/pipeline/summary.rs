//! Grouped descriptive statistics.
//!
//! Each summary is computed from scratch on the frame it is handed: running
//! the full sample and a filtered subsample, in either order, never shares an
//! accumulator, so one result cannot perturb the other.

use polars::prelude::*;
use rayon::prelude::*;
use serde::Serialize;

use crate::pipeline::error::AnalysisError;

/// Descriptive statistics for one column over one (possibly filtered) frame.
///
/// `rows` counts the frame's rows, `non_missing` the non-null values. Mean
/// and median are taken over finite values only; nulls and the non-finite
/// log sentinels are excluded, never coerced to zero. Both are `None` when
/// no finite value remains.
#[derive(Debug, Clone, Serialize)]
pub struct ColumnSummary {
    pub column: String,
    pub rows: usize,
    pub non_missing: usize,
    pub mean: Option<f64>,
    pub median: Option<f64>,
}

/// Summarize a single column.
pub fn summarize_column(df: &DataFrame, name: &str) -> Result<ColumnSummary, AnalysisError> {
    let column = df.column(name).map_err(|_| AnalysisError::Value {
        column: name.to_string(),
        stage: "summarize",
    })?;
    let casted = column.cast(&DataType::Float64)?;
    let values = casted.f64()?;

    let non_missing = values.len() - values.null_count();
    let mut finite: Vec<f64> = values.iter().flatten().filter(|v| v.is_finite()).collect();

    let mean = if finite.is_empty() {
        None
    } else {
        Some(finite.iter().sum::<f64>() / finite.len() as f64)
    };

    Ok(ColumnSummary {
        column: name.to_string(),
        rows: df.height(),
        non_missing,
        mean,
        median: median_in_place(&mut finite),
    })
}

/// Summarize several columns, scanning them in parallel.
pub fn summarize_columns(
    df: &DataFrame,
    names: &[&str],
) -> Result<Vec<ColumnSummary>, AnalysisError> {
    names
        .par_iter()
        .map(|name| summarize_column(df, name))
        .collect()
}

/// Build the subsample frame where `column == value`. Null codes never match.
pub fn filter_equals(
    df: &DataFrame,
    column: &str,
    value: i64,
) -> Result<DataFrame, AnalysisError> {
    let selected = df.column(column).map_err(|_| AnalysisError::Value {
        column: column.to_string(),
        stage: "summarize",
    })?;
    let casted = selected.cast(&DataType::Int64)?;
    let codes = casted.i64()?;

    let matches: Vec<bool> = codes.iter().map(|code| code == Some(value)).collect();
    let mask = BooleanChunked::from_slice("subsample_mask".into(), &matches);
    Ok(df.filter(&mask)?)
}

fn median_in_place(values: &mut [f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    values.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));
    let mid = values.len() / 2;
    if values.len() % 2 == 1 {
        Some(values[mid])
    } else {
        Some((values[mid - 1] + values[mid]) / 2.0)
    }
}
