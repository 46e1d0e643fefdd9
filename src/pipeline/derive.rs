//! Derived-variable construction.
//!
//! Every derived column is a pure function of raw columns, computed per row
//! with no cross-row dependency. The input frame is never mutated; callers
//! get a new frame with the derived columns appended. Logs of non-positive
//! arguments yield non-finite values (never a panic) so the model stage can
//! detect and drop them uniformly.

use polars::prelude::*;

use crate::pipeline::error::AnalysisError;
use crate::pipeline::schema;

/// 0/1 indicator: 1 iff the raw code equals `code`. Missing codes map to 0.
pub fn indicator_eq(column: &str, code: i64, name: &str) -> Expr {
    col(column)
        .eq(lit(code))
        .cast(DataType::Int32)
        .fill_null(lit(0))
        .alias(name)
}

/// 0/1 indicator: 1 iff the raw code is any of `codes`. Missing codes map to 0.
pub fn indicator_any(column: &str, codes: &[i64], name: &str) -> Expr {
    codes
        .iter()
        .map(|&code| col(column).eq(lit(code)))
        .reduce(|acc, expr| acc.or(expr))
        .unwrap_or_else(|| lit(false))
        .cast(DataType::Int32)
        .fill_null(lit(0))
        .alias(name)
}

/// Row-wise sum of the named columns. A null in any source propagates to a
/// null sum, matching the wholesale row-drop policy of the model stage.
pub fn horizontal_sum(columns: &[&str], name: &str) -> Expr {
    columns
        .iter()
        .map(|&column| col(column).cast(DataType::Float64))
        .reduce(|acc, expr| acc + expr)
        .unwrap_or_else(|| lit(0.0f64))
        .alias(name)
}

/// Natural log of a column. Zero maps to -inf, negatives to NaN, null to null.
pub fn natural_log(column: &str, name: &str) -> Expr {
    col(column)
        .cast(DataType::Float64)
        .log(std::f64::consts::E)
        .alias(name)
}

/// Compute all derived columns and return a new frame with them appended.
///
/// Dependency order: the aggregate sums land first, `roughNW` is derived from
/// them, and its log comes last.
pub fn derive_all(df: &DataFrame) -> Result<DataFrame, AnalysisError> {
    require_columns(df, &schema::required_columns(), "derive")?;

    let derived = df
        .clone()
        .lazy()
        .with_columns([
            col(schema::RACE)
                .eq(lit(schema::RACE_BLACK))
                .and(col(schema::ETHNICITY).eq(lit(schema::ETHNICITY_NON_LATINO)))
                .cast(DataType::Int32)
                .fill_null(lit(0))
                .alias(schema::BLACK_NONLATINO),
            indicator_eq(schema::BANKRUPTCY, schema::CODE_YES, schema::BANKRUPTCY_FLAG),
            indicator_eq(schema::FORECLOSURE, schema::CODE_YES, schema::FORECLOSURE_FLAG),
            indicator_eq(schema::ONTIME_PAYMENTS, schema::CODE_YES, schema::ONTIME_FLAG),
            indicator_any(
                schema::LOAN_DECISION,
                &schema::DECISION_REJECTED,
                schema::REJECTED,
            ),
            horizontal_sum(&schema::INCOME_SOURCES, schema::TOTAL_INCOME),
            horizontal_sum(&schema::ASSET_SOURCES, schema::ROUGH_ASSETS),
            horizontal_sum(&schema::DEBT_SOURCES, schema::ROUGH_DEBTS),
            natural_log(schema::INCOME, schema::LN_INCOME),
        ])
        .with_columns([
            (col(schema::ROUGH_ASSETS) - col(schema::ROUGH_DEBTS)).alias(schema::ROUGH_NW),
            natural_log(schema::TOTAL_INCOME, schema::LN_TOTAL_INCOME),
        ])
        .with_columns([natural_log(schema::ROUGH_NW, schema::LN_ROUGH_NW)])
        .collect()?;

    Ok(derived)
}

fn require_columns(
    df: &DataFrame,
    columns: &[&str],
    stage: &'static str,
) -> Result<(), AnalysisError> {
    for &column in columns {
        if df.column(column).is_err() {
            return Err(AnalysisError::Value {
                column: column.to_string(),
                stage,
            });
        }
    }
    Ok(())
}
