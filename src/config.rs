// src/config.rs
use anyhow::{Context, Result};
use chrono::NaiveDate;
use clap::Parser;
use glob::glob;
use std::{env, path::PathBuf};
use tracing::warn;

use crate::pipeline::PairingPolicy;

/// Date labels are always written in this format, so sorting them as strings
/// sorts them by calendar date.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Environment fallback for `--file`, a path-separator list.
pub const FILES_ENV: &str = "MFT_FILES";

fn parse_date(s: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(s.trim(), DATE_FORMAT)
        .map_err(|e| format!("expected YYYY-MM-DD, got {:?}: {}", s, e))
}

/// Combine monthly mutual fund portfolio sheets into one holdings table,
/// a CSV export and a market-value bar chart.
#[derive(Debug, Clone, Parser)]
#[command(name = "mftracker", version, about)]
pub struct Config {
    /// Portfolio file (xlsx, xls, ods or csv). Repeat per month; glob
    /// patterns are expanded in sorted order. `MFT_FILES` takes a list split
    /// on the platform path separator (`:` on Unix, `;` on Windows).
    #[arg(short = 'f', long = "file", value_name = "PATH")]
    pub files: Vec<String>,

    /// Date label for the file in the same position.
    #[arg(
        short = 'd',
        long = "date",
        value_name = "YYYY-MM-DD",
        env = "MFT_DATES",
        value_delimiter = ',',
        value_parser = parse_date
    )]
    pub dates: Vec<NaiveDate>,

    /// Only list holdings whose instrument name contains this text.
    #[arg(long, env = "MFT_FUND")]
    pub fund: Option<String>,

    /// Directory for combined_data.csv.
    #[arg(long, env = "MFT_OUT_DIR", default_value = ".")]
    pub out_dir: PathBuf,

    /// Also write the bar chart as JSON to this path.
    #[arg(long, env = "MFT_CHART_JSON")]
    pub chart_json: Option<PathBuf>,

    /// Pair files and dates up to the shorter list instead of refusing.
    #[arg(long, env = "MFT_TRUNCATE")]
    pub truncate: bool,

    /// Skip printing the combined table.
    #[arg(long)]
    pub no_table: bool,

    /// Width of the longest chart bar, in characters.
    #[arg(long, default_value_t = 40)]
    pub chart_width: usize,
}

impl Config {
    /// File arguments, or the `MFT_FILES` list when no `--file` was given.
    pub fn file_args(&self) -> Vec<String> {
        if !self.files.is_empty() {
            return self.files.clone();
        }
        env::var_os(FILES_ENV)
            .map(|list| {
                env::split_paths(&list)
                    .filter(|p| !p.as_os_str().is_empty())
                    .map(|p| p.to_string_lossy().to_string())
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Input paths with glob patterns expanded. Plain paths are kept as given
    /// so a missing file surfaces as a read failure.
    pub fn expand_files(&self) -> Result<Vec<PathBuf>> {
        let files = self.file_args();
        let mut out = Vec::with_capacity(files.len());
        for pattern in &files {
            if !pattern.contains(['*', '?', '[']) {
                out.push(PathBuf::from(pattern));
                continue;
            }
            let before = out.len();
            out.extend(
                glob(pattern)
                    .with_context(|| format!("Failed to read glob pattern '{}'", pattern))?
                    .filter_map(|entry| entry.ok()),
            );
            if out.len() == before {
                warn!(pattern = %pattern, "glob matched no files");
            }
        }
        Ok(out)
    }

    pub fn date_labels(&self) -> Vec<String> {
        self.dates
            .iter()
            .map(|d| d.format(DATE_FORMAT).to_string())
            .collect()
    }

    pub fn pairing_policy(&self) -> PairingPolicy {
        if self.truncate {
            PairingPolicy::Truncate
        } else {
            PairingPolicy::Strict
        }
    }

    /// The instrument filter, if a non-empty one was given.
    pub fn fund_filter(&self) -> Option<&str> {
        self.fund.as_deref().filter(|f| !f.is_empty())
    }
}
