//! scfa: credit-rejection analysis over the Survey of Consumer Finances
//!
//! Runs the four-stage batch pipeline: load the survey extract, derive the
//! aggregate financial variables, report grouped descriptive statistics, and
//! fit the rejection regression.

mod cli;
mod pipeline;
mod report;
mod utils;

use std::time::Instant;

use anyhow::{Context, Result};
use clap::Parser;
use console::style;
use polars::prelude::DataFrame;

use cli::Cli;
use pipeline::{
    derive_all, download_archive, extract_data_file, filter_equals, fit_logistic, load_local,
    model_frame, parse_dataset, schema, summarize_columns, validate_schema,
};
use report::{
    export_report, print_coefficient_table, print_summary_table, AnalysisReport, RunMetadata,
};
use utils::{
    create_spinner, finish_with_success, print_banner, print_completion, print_info,
    print_step_header, print_step_time, print_success,
};

fn main() -> Result<()> {
    let cli = Cli::parse();

    print_banner(env!("CARGO_PKG_VERSION"));

    // Step 1: Load the survey extract
    print_step_header(1, "Load survey extract");
    let step_start = Instant::now();
    let (df, source) = load_stage(&cli).context("Stage 1 (load) failed")?;
    let (rows, cols) = df.shape();
    print_success("Extract loaded and validated");
    println!("\n    {} Dataset Statistics:", style("✧").cyan());
    println!("      Rows: {}", rows);
    println!("      Columns: {}", cols);
    println!(
        "      Estimated memory: {:.2} MB",
        df.estimated_size() as f64 / (1024.0 * 1024.0)
    );
    print_step_time(step_start.elapsed());

    // Step 2: Derive the aggregate variables
    print_step_header(2, "Derive financial variables");
    let step_start = Instant::now();
    let derived = derive_all(&df).context("Stage 2 (derive) failed")?;
    print_success(&format!(
        "Added {} derived columns",
        derived.width() - df.width()
    ));
    print_step_time(step_start.elapsed());

    // Step 3: Descriptive statistics, full sample and subsample
    print_step_header(3, "Descriptive statistics");
    let step_start = Instant::now();
    let full_sample = summarize_columns(&derived, &schema::SUMMARY_COLUMNS)
        .context("Stage 3 (summarize) failed on the full sample")?;
    let subsample = filter_equals(&derived, schema::BLACK_NONLATINO, 1)
        .context("Stage 3 (summarize) failed building the subsample")?;
    let subsample_stats = summarize_columns(&subsample, &schema::SUMMARY_COLUMNS)
        .context("Stage 3 (summarize) failed on the subsample")?;
    print_summary_table("FULL SAMPLE", &full_sample);
    print_summary_table(
        &format!("BLACK NON-LATINO SUBSAMPLE (n = {})", subsample.height()),
        &subsample_stats,
    );
    print_step_time(step_start.elapsed());

    // Step 4: Rejection regression
    print_step_header(4, "Logistic regression");
    let step_start = Instant::now();
    let subset = model_frame(&derived).context("Stage 4 (model) failed building the subset")?;
    print_info(&format!(
        "{} of {} rows usable after dropping missing or non-finite values",
        subset.height(),
        derived.height()
    ));
    let predictors: Vec<&str> = schema::MODEL_COLUMNS[1..].to_vec();
    let fit = fit_logistic(&subset, schema::REJECTED, &predictors)
        .context("Stage 4 (model) failed")?;
    print_coefficient_table(&fit);
    print_step_time(step_start.elapsed());

    // Optional JSON export
    if let Some(path) = &cli.export {
        let metadata = RunMetadata::new(source, rows, cols, subset.height());
        let report = AnalysisReport {
            metadata,
            full_sample: &full_sample,
            black_nonlatino: &subsample_stats,
            fit: &fit,
        };
        export_report(path, &report).context("Failed to export the JSON report")?;
        print_success(&format!("Report exported to {}", path.display()));
    }

    print_completion();
    Ok(())
}

/// Fetch or read the extract, parse it, and validate the schema.
fn load_stage(cli: &Cli) -> Result<(DataFrame, String)> {
    let (df, source) = match &cli.input {
        Some(path) => {
            let spinner = create_spinner(&format!("Reading {}...", path.display()));
            let df = load_local(path, cli.schema_length())?;
            finish_with_success(&spinner, "Local extract read");
            (df, path.display().to_string())
        }
        None => {
            let spinner = create_spinner(&format!("Downloading {}...", cli.url));
            let archive = download_archive(&cli.url)?;
            finish_with_success(
                &spinner,
                &format!("Downloaded {:.1} MB", archive.len() as f64 / (1024.0 * 1024.0)),
            );

            let spinner = create_spinner("Extracting and parsing...");
            let payload = extract_data_file(&archive)?;
            let df = parse_dataset(&payload, cli.schema_length())?;
            finish_with_success(&spinner, "Archive extracted and parsed");
            (df, cli.url.clone())
        }
    };
    validate_schema(&df)?;
    Ok((df, source))
}
