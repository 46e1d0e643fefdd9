//! Table rendering for descriptive statistics and the coefficient report

use comfy_table::{presets::UTF8_FULL_CONDENSED, Attribute, Cell, CellAlignment, Color, Table};
use console::style;

use crate::pipeline::{ColumnSummary, LogisticFit};

/// Print one block of descriptive statistics under a styled heading.
pub fn print_summary_table(title: &str, summaries: &[ColumnSummary]) {
    println!();
    println!(
        "    {} {}",
        style("📊").cyan(),
        style(title).white().bold()
    );
    println!("    {}", style("─".repeat(50)).dim());

    let mut table = Table::new();
    table.load_preset(UTF8_FULL_CONDENSED);
    table.set_header(vec![
        Cell::new("Column").add_attribute(Attribute::Bold),
        Cell::new("Rows").add_attribute(Attribute::Bold),
        Cell::new("Non-missing").add_attribute(Attribute::Bold),
        Cell::new("Mean").add_attribute(Attribute::Bold),
        Cell::new("Median").add_attribute(Attribute::Bold),
    ]);

    for summary in summaries {
        table.add_row(vec![
            Cell::new(&summary.column),
            Cell::new(summary.rows).set_alignment(CellAlignment::Right),
            Cell::new(summary.non_missing).set_alignment(CellAlignment::Right),
            Cell::new(format_stat(summary.mean)).set_alignment(CellAlignment::Right),
            Cell::new(format_stat(summary.median)).set_alignment(CellAlignment::Right),
        ]);
    }

    println!("{table}");
}

/// Print the regression coefficient table.
pub fn print_coefficient_table(fit: &LogisticFit) {
    println!();
    println!(
        "    {} {}",
        style("📈").cyan(),
        style("LOGISTIC REGRESSION: rejected ~ creditworthiness proxies")
            .white()
            .bold()
    );
    println!("    {}", style("─".repeat(50)).dim());
    println!(
        "    {}",
        style(format!(
            "n = {}, converged in {} iterations, deviance = {:.3}, log-likelihood = {:.3}",
            fit.n_obs, fit.iterations, fit.deviance, fit.log_likelihood
        ))
        .dim()
    );

    let mut table = Table::new();
    table.load_preset(UTF8_FULL_CONDENSED);
    table.set_header(vec![
        Cell::new("Term").add_attribute(Attribute::Bold),
        Cell::new("Estimate").add_attribute(Attribute::Bold),
        Cell::new("Std. error").add_attribute(Attribute::Bold),
        Cell::new("z").add_attribute(Attribute::Bold),
        Cell::new("p-value").add_attribute(Attribute::Bold),
    ]);

    for term in &fit.terms {
        let significant = term.p_value < 0.05;
        table.add_row(vec![
            Cell::new(&term.term),
            Cell::new(format!("{:+.6}", term.estimate)).set_alignment(CellAlignment::Right),
            Cell::new(format!("{:.6}", term.std_error)).set_alignment(CellAlignment::Right),
            Cell::new(format!("{:+.3}", term.z_value)).set_alignment(CellAlignment::Right),
            Cell::new(format_p_value(term.p_value))
                .set_alignment(CellAlignment::Right)
                .fg(if significant { Color::Green } else { Color::White }),
        ]);
    }

    println!("{table}");
}

fn format_stat(value: Option<f64>) -> String {
    match value {
        Some(v) if v.abs() >= 1e6 => format!("{v:.3e}"),
        Some(v) => format!("{v:.3}"),
        None => "—".to_string(),
    }
}

fn format_p_value(p: f64) -> String {
    if p < 1e-4 {
        "<0.0001".to_string()
    } else {
        format!("{p:.4}")
    }
}
