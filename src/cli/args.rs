//! Command-line argument definitions using clap

use clap::Parser;
use std::path::PathBuf;

use crate::pipeline::fetch::DEFAULT_ARCHIVE_URL;

/// scfa - credit-rejection analysis over the Survey of Consumer Finances
#[derive(Parser, Debug)]
#[command(name = "scfa")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Local survey extract (CSV or the distributed zip archive).
    /// When provided, the network fetch is skipped entirely.
    #[arg(short, long)]
    pub input: Option<PathBuf>,

    /// URL of the survey archive to download
    #[arg(short, long, default_value = DEFAULT_ARCHIVE_URL)]
    pub url: String,

    /// Write the summaries and coefficient table to this path as JSON
    #[arg(short, long)]
    pub export: Option<PathBuf>,

    /// Number of rows used to infer the CSV schema (0 = scan the whole file)
    #[arg(long, default_value = "1024")]
    pub infer_schema_length: usize,
}

impl Cli {
    /// Schema-inference length in the form polars expects.
    pub fn schema_length(&self) -> Option<usize> {
        if self.infer_schema_length == 0 {
            None
        } else {
            Some(self.infer_schema_length)
        }
    }
}
