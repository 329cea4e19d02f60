// src/report.rs
use anyhow::Result;
use std::io::Write;
use tracing::{error, info};

use crate::aggregate::filter_by_instrument;
use crate::chart::{group_market_value, render_bar_chart};
use crate::config::Config;
use crate::error::ProcessError;
use crate::export::{write_chart_json, write_combined_csv};
use crate::pipeline::{run_batch, BatchReport};
use crate::view::render_table;

/// Printed instead of a report when no files or no dates were given.
pub const NO_INPUT_MESSAGE: &str =
    "Please supply portfolio files (--file) and one date per file (--date) to proceed.";

/// Printed above the tables when nothing survived processing.
pub const NO_DATA_MESSAGE: &str = "No data to process. Please check the uploaded files.";

/// One line per file: name, date and either its row count or its error.
pub fn print_outcomes<W: Write>(report: &BatchReport, out: &mut W) -> Result<()> {
    writeln!(out, "{: <30} {: <12} {}", "File", "Date", "Result")?;
    writeln!(out, "{:-<60}", "")?;
    for o in &report.outcomes {
        let status = match &o.result {
            Ok(rows) => format!("ok, {} row(s)", rows),
            Err(e) => format!("{}: {}", e.kind(), e),
        };
        writeln!(out, "{: <30} {: <12} {}", o.file, o.date, status)?;
    }
    writeln!(out)?;
    Ok(())
}

/// Everything after the batch: outcomes, tables, CSV export and chart.
/// Only the CSV export can fail the run; chart errors are logged.
pub fn write_report<W: Write>(report: &BatchReport, config: &Config, out: &mut W) -> Result<()> {
    print_outcomes(report, out)?;

    let combined = &report.combined;
    if combined.is_empty() {
        writeln!(out, "{}\n", NO_DATA_MESSAGE)?;
    }

    if !config.no_table {
        writeln!(out, "Combined Data")?;
        render_table(combined, out)?;
        writeln!(out)?;
    }
    if let Some(fund) = config.fund_filter() {
        let filtered = filter_by_instrument(combined, fund);
        info!(fund, rows = filtered.len(), "filtered holdings");
        writeln!(out, "Filtered Data for {}", fund)?;
        render_table(&filtered, out)?;
        writeln!(out)?;
    }

    let csv_path = write_combined_csv(combined, &config.out_dir)?;
    writeln!(out, "Combined data written to {}\n", csv_path.display())?;

    let series = group_market_value(combined);
    if let Err(e) = render_bar_chart(&series, out, config.chart_width) {
        error!("Error creating bar chart: {:#}", e);
    }
    if let Some(path) = &config.chart_json {
        if let Err(e) = write_chart_json(&series, path) {
            error!("Error writing chart json: {:#}", e);
        }
    }
    Ok(())
}

/// Run the whole tool for `config`, writing the user-facing report to `out`.
pub fn run<W: Write>(config: &Config, out: &mut W) -> Result<()> {
    let files = config.expand_files()?;
    let dates = config.date_labels();
    info!(files = files.len(), dates = dates.len(), "startup");

    let report = match run_batch(&files, &dates, config.pairing_policy()) {
        Ok(report) => report,
        Err(ProcessError::NoInput) => {
            writeln!(out, "{}", NO_INPUT_MESSAGE)?;
            return Ok(());
        }
        Err(e) => {
            error!("{}", e);
            return Err(e.into());
        }
    };
    write_report(&report, config, out)
}
