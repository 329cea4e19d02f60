// src/load/mod.rs
use anyhow::{anyhow, Context, Result};
use calamine::{open_workbook_auto, Data, ExcelDateTime, Reader};
use chrono::NaiveTime;
use csv::ReaderBuilder;
use std::path::Path;
use tracing::{debug, instrument};

use crate::error::ProcessError;
use crate::process::{Cell, RawSheet};

/// Date cells become `YYYY-MM-DD` text, with the time appended when it is not
/// midnight. Durations and out-of-range serials keep the serial number.
fn datetime_text(dt: &ExcelDateTime) -> String {
    if dt.is_duration() {
        return dt.to_string();
    }
    match dt.as_datetime() {
        Some(ndt) if ndt.time() == NaiveTime::MIN => ndt.format("%Y-%m-%d").to_string(),
        Some(ndt) => ndt.format("%Y-%m-%d %H:%M:%S").to_string(),
        None => dt.to_string(),
    }
}

/// Convert a workbook cell into a [`Cell`].
fn cell_from_data(data: &Data) -> Cell {
    match data {
        Data::Empty => Cell::Empty,
        Data::String(s) => Cell::text(s.as_str()),
        Data::Int(i) => Cell::Number(*i as f64),
        Data::Float(f) => Cell::Number(*f),
        Data::Bool(b) => Cell::Bool(*b),
        Data::DateTime(dt) => Cell::Text(datetime_text(dt)),
        Data::DateTimeIso(s) => Cell::text(s.as_str()),
        Data::DurationIso(s) => Cell::text(s.as_str()),
        Data::Error(_) => Cell::Empty,
    }
}

fn is_csv(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("csv"))
}

/// Read the first worksheet of a workbook. The grid is padded so that it
/// starts at `A1` even when the used range does not.
fn read_workbook(path: &Path) -> Result<RawSheet> {
    let mut workbook = open_workbook_auto(path)
        .with_context(|| format!("Failed to open workbook: {}", path.display()))?;
    let range = workbook
        .worksheet_range_at(0)
        .ok_or_else(|| anyhow!("workbook has no worksheets"))?
        .context("Failed to read first worksheet")?;

    let (row0, col0) = range.start().unwrap_or((0, 0));
    let mut rows: Vec<Vec<Cell>> = vec![Vec::new(); row0 as usize];
    for r in range.rows() {
        let mut row = vec![Cell::Empty; col0 as usize];
        row.extend(r.iter().map(cell_from_data));
        rows.push(row);
    }
    Ok(RawSheet::new(rows))
}

/// Read a headerless CSV; every non-empty field becomes text.
fn read_csv(path: &Path) -> Result<RawSheet> {
    let mut rdr = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_path(path)
        .with_context(|| format!("Failed to open CSV: {}", path.display()))?;

    let mut rows = Vec::new();
    for (idx, result) in rdr.records().enumerate() {
        let record = result.with_context(|| format!("CSV parse error at record {}", idx))?;
        rows.push(record.iter().map(Cell::text).collect());
    }
    Ok(RawSheet::new(rows))
}

/// Load one uploaded file as a [`RawSheet`]: CSV by extension, anything
/// else through calamine (xlsx, xlsm, xls, ods).
#[instrument(level = "debug", skip(path), fields(path = %path.display()))]
pub fn read_raw_sheet(path: &Path) -> Result<RawSheet, ProcessError> {
    let loaded = if is_csv(path) {
        read_csv(path)
    } else {
        read_workbook(path)
    };
    match loaded {
        Ok(sheet) => {
            debug!(rows = sheet.len(), cols = sheet.width(), "loaded sheet");
            Ok(sheet)
        }
        Err(e) => Err(ProcessError::FileRead {
            path: path.display().to_string(),
            reason: format!("{:#}", e),
        }),
    }
}
