// src/pipeline.rs
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing::{error, info, instrument, warn};

use crate::aggregate::concat_tables;
use crate::error::ProcessError;
use crate::load::read_raw_sheet;
use crate::process::{clean_sheet, standardize, HoldingsTable, RawSheet};

/// What to do when the number of files and dates differ.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PairingPolicy {
    /// Refuse the batch with `LengthMismatch`.
    #[default]
    Strict,
    /// Pair up to the shorter list and ignore the rest.
    Truncate,
}

/// One file and the date label its rows get stamped with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Upload {
    pub path: PathBuf,
    pub date: String,
}

impl Upload {
    pub fn new(path: impl Into<PathBuf>, date: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            date: date.into(),
        }
    }

    /// File name for messages; falls back to the full path.
    pub fn name(&self) -> String {
        self.path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_else(|| self.path.display().to_string())
    }
}

/// How one file fared. A failed file contributed no rows.
#[derive(Debug, Clone, PartialEq)]
pub struct FileOutcome {
    pub file: String,
    pub date: String,
    pub result: Result<usize, ProcessError>,
}

impl FileOutcome {
    pub fn is_ok(&self) -> bool {
        self.result.is_ok()
    }
}

/// Per-file outcomes, in input order, plus the combined holdings.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BatchReport {
    pub outcomes: Vec<FileOutcome>,
    pub combined: HoldingsTable,
}

impl BatchReport {
    pub fn failures(&self) -> impl Iterator<Item = &FileOutcome> {
        self.outcomes.iter().filter(|o| !o.is_ok())
    }

    pub fn succeeded(&self) -> usize {
        self.outcomes.iter().filter(|o| o.is_ok()).count()
    }
}

/// Pair files with dates positionally.
pub fn pair_uploads<P: AsRef<Path>, D: AsRef<str>>(
    files: &[P],
    dates: &[D],
    policy: PairingPolicy,
) -> Result<Vec<Upload>, ProcessError> {
    if files.is_empty() || dates.is_empty() {
        return Err(ProcessError::NoInput);
    }
    if files.len() != dates.len() {
        match policy {
            PairingPolicy::Strict => {
                return Err(ProcessError::LengthMismatch {
                    files: files.len(),
                    dates: dates.len(),
                })
            }
            PairingPolicy::Truncate => warn!(
                files = files.len(),
                dates = dates.len(),
                ignored = files.len().abs_diff(dates.len()),
                "file and date counts differ; extra items ignored"
            ),
        }
    }
    Ok(files
        .iter()
        .zip(dates)
        .map(|(f, d)| Upload::new(f.as_ref(), d.as_ref()))
        .collect())
}

/// Clean and standardize one in-memory sheet.
pub fn process_sheet(sheet: &RawSheet, date: &str) -> Result<HoldingsTable, ProcessError> {
    let cleaned = clean_sheet(sheet, date)?;
    standardize(&cleaned)
}

/// Load, clean and standardize one uploaded file.
#[instrument(level = "info", skip(upload), fields(file = %upload.name(), date = %upload.date))]
pub fn process_file(upload: &Upload) -> Result<HoldingsTable, ProcessError> {
    let sheet = read_raw_sheet(&upload.path)?;
    process_sheet(&sheet, &upload.date)
}

/// Process uploads strictly in order. A failing file is logged, recorded in
/// its outcome and contributes an empty table; the rest carry on.
pub fn process_uploads(uploads: &[Upload]) -> BatchReport {
    let start = Instant::now();
    let total = uploads.len();
    let mut outcomes = Vec::with_capacity(total);
    let mut tables = Vec::with_capacity(total);

    for (i, upload) in uploads.iter().enumerate() {
        let name = upload.name();
        info!("processing file {}/{}: {}", i + 1, total, name);
        let result = match process_file(upload) {
            Ok(table) => {
                info!(file = %name, rows = table.len(), "processed");
                let rows = table.len();
                tables.push(table);
                Ok(rows)
            }
            Err(e) => {
                error!(file = %name, kind = e.kind(), "{}", e);
                tables.push(HoldingsTable::default());
                Err(e)
            }
        };
        outcomes.push(FileOutcome {
            file: name,
            date: upload.date.clone(),
            result,
        });
    }

    let combined = concat_tables(tables);
    info!(
        files = total,
        rows = combined.len(),
        elapsed = ?start.elapsed(),
        "batch complete"
    );
    BatchReport { outcomes, combined }
}

/// Pair, then process. Fails only on `NoInput` or `LengthMismatch`.
pub fn run_batch<P: AsRef<Path>, D: AsRef<str>>(
    files: &[P],
    dates: &[D],
    policy: PairingPolicy,
) -> Result<BatchReport, ProcessError> {
    let uploads = pair_uploads(files, dates, policy)?;
    Ok(process_uploads(&uploads))
}
