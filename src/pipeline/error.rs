//! Error types for the analysis pipeline.
//!
//! This module defines the `AnalysisError` enum covering the failure modes of
//! the four pipeline stages: fetching and unpacking the archive, parsing the
//! extract against the expected schema, deriving columns, and fitting the
//! regression. All errors abort the run; there is no retry or partial-success
//! mode for a one-shot batch analysis.

use std::fmt;

/// Errors that can occur while running the analysis pipeline.
#[derive(Debug)]
pub enum AnalysisError {
    /// Network fetch or archive decompression failed.
    ///
    /// `stage` names the operation that failed ("fetch", "unzip", "read").
    Io {
        /// Operation that failed
        stage: &'static str,
        /// Underlying failure description
        message: String,
    },

    /// The payload could not be parsed against the expected survey schema.
    ///
    /// Raised when the archive layout is wrong, the CSV cannot be parsed, or
    /// required schema columns are absent from the parsed extract.
    Format {
        /// Description of the schema or format mismatch
        message: String,
    },

    /// A column expected by a stage is missing from the dataset.
    ///
    /// Distinct from `Format`: the extract parsed fine, but a later stage
    /// asked for a raw or derived column that is not there.
    Value {
        /// Name of the missing column
        column: String,
        /// Stage that required the column ("derive", "summarize", "model")
        stage: &'static str,
    },

    /// The regression solver failed to produce a usable fit.
    ///
    /// Covers non-convergence, perfect or quasi-perfect separation, and a
    /// singular weighted design matrix. Surfaced rather than suppressed so a
    /// silently wrong coefficient table is never reported.
    Fit {
        /// Description of the data condition that broke the fit
        message: String,
    },
}

impl fmt::Display for AnalysisError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io { stage, message } => {
                write!(f, "I/O failure during {stage}: {message}")
            }
            Self::Format { message } => {
                write!(f, "format error: {message}")
            }
            Self::Value { column, stage } => {
                write!(f, "column '{column}' required by the {stage} stage is missing")
            }
            Self::Fit { message } => {
                write!(f, "regression fit failed: {message}")
            }
        }
    }
}

impl std::error::Error for AnalysisError {}

impl From<polars::error::PolarsError> for AnalysisError {
    fn from(err: polars::error::PolarsError) -> Self {
        Self::Format {
            message: err.to_string(),
        }
    }
}

impl From<reqwest::Error> for AnalysisError {
    fn from(err: reqwest::Error) -> Self {
        Self::Io {
            stage: "fetch",
            message: err.to_string(),
        }
    }
}

impl From<zip::result::ZipError> for AnalysisError {
    fn from(err: zip::result::ZipError) -> Self {
        Self::Io {
            stage: "unzip",
            message: err.to_string(),
        }
    }
}

impl From<std::io::Error> for AnalysisError {
    fn from(err: std::io::Error) -> Self {
        Self::Io {
            stage: "read",
            message: err.to_string(),
        }
    }
}
