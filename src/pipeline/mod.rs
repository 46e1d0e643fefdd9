//! Pipeline module - the four sequential analysis stages

pub mod derive;
pub mod error;
pub mod fetch;
pub mod loader;
pub mod model;
pub mod schema;
pub mod summary;

pub use derive::derive_all;
pub use error::AnalysisError;
pub use fetch::{download_archive, extract_data_file, DEFAULT_ARCHIVE_URL};
pub use loader::{load_local, parse_dataset, validate_schema};
pub use model::{fit_logistic, model_frame, CoefficientReport, LogisticFit};
pub use summary::{filter_equals, summarize_column, summarize_columns, ColumnSummary};
