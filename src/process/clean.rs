// src/process/clean.rs
use tracing::debug;

use crate::error::ProcessError;
use crate::process::{Cell, RawSheet, DATE_COLUMN};

/// Literal text that identifies the header line of a portfolio sheet.
pub const HEADER_MARKER: &str = "Name of the Instrument";
/// Zero-based column scanned for [`HEADER_MARKER`] (spreadsheet column `C`).
pub const HEADER_SCAN_COLUMN: usize = 2;

/// Rows found below a sheet's header line, labelled by that header.
#[derive(Debug, Clone, PartialEq)]
pub struct CleanedTable {
    /// Header cell values, with `Date` appended (or reused if present).
    pub columns: Vec<String>,
    /// One entry per non-blank data row, each exactly `columns.len()` wide.
    pub rows: Vec<Vec<Cell>>,
}

impl CleanedTable {
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Position of the first column labelled `name`.
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == name)
    }
}

/// Index of the first row whose column-`C` cell contains the header marker.
pub fn find_header_row(sheet: &RawSheet) -> Option<usize> {
    (0..sheet.len()).find(|&row| {
        sheet
            .cell(row, HEADER_SCAN_COLUMN)
            .as_text()
            .is_some_and(|t| t.contains(HEADER_MARKER))
    })
}

/// Locate the header line, keep the non-blank rows below it and stamp every
/// row with `date`.
pub fn clean_sheet(sheet: &RawSheet, date: &str) -> Result<CleanedTable, ProcessError> {
    let header_row = find_header_row(sheet).ok_or(ProcessError::HeaderNotFound {
        marker: HEADER_MARKER,
        column: HEADER_SCAN_COLUMN,
    })?;

    let width = sheet.width();
    let mut columns: Vec<String> = (0..width)
        .map(|col| sheet.cell(header_row, col).to_string())
        .collect();
    let date_col = match columns.iter().position(|c| c == DATE_COLUMN) {
        Some(idx) => idx,
        None => {
            columns.push(DATE_COLUMN.to_string());
            columns.len() - 1
        }
    };

    let mut rows = Vec::new();
    let mut blank = 0usize;
    for raw in &sheet.rows()[header_row + 1..] {
        if raw.iter().all(Cell::is_empty) {
            blank += 1;
            continue;
        }
        let mut row = raw.clone();
        row.resize(columns.len(), Cell::Empty);
        row[date_col] = Cell::text(date);
        rows.push(row);
    }

    debug!(
        header_row,
        kept = rows.len(),
        blank,
        date,
        "cleaned sheet"
    );
    Ok(CleanedTable { columns, rows })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sheet(rows: Vec<Vec<&str>>) -> RawSheet {
        rows.into_iter().collect()
    }

    fn portfolio() -> RawSheet {
        sheet(vec![
            vec!["", "", "XYZ Mutual Fund"],
            vec!["", "", "Monthly Portfolio Statement as on 31 Jan 2024"],
            vec![
                "Sr",
                "",
                "Name of the Instrument",
                "ISIN",
                "Quantity",
                "Market value\n(Rs. in Lakhs)",
                "% to NAV",
            ],
            vec!["1", "", "Alpha Ltd", "INE000A01011", "10", "100", "1.5"],
            vec!["", "", "", "", "", "", ""],
            vec!["2", "", "Beta Ltd", "INE000B01012", "20", "200", "3.0"],
            vec![],
        ])
    }

    #[test]
    fn keeps_non_blank_rows_below_header() {
        let raw = portfolio();
        let cleaned = clean_sheet(&raw, "2024-01-31").unwrap();

        // 7 rows, header at 2, two blank rows below it
        assert_eq!(cleaned.len(), raw.len() - 2 - 1 - 2);
        assert_eq!(cleaned.columns.last().map(String::as_str), Some("Date"));
        assert_eq!(cleaned.columns[2], HEADER_MARKER);

        let date = cleaned.column_index("Date").unwrap();
        for row in &cleaned.rows {
            assert_eq!(row.len(), cleaned.columns.len());
            assert_eq!(row[date], Cell::from("2024-01-31"));
        }
        assert_eq!(cleaned.rows[0][2], Cell::from("Alpha Ltd"));
        assert_eq!(cleaned.rows[1][2], Cell::from("Beta Ltd"));
    }

    #[test]
    fn marker_is_a_case_sensitive_substring() {
        let raw = sheet(vec![
            vec!["", "", "name of the instrument"],
            vec!["", "", "  Name of the Instrument / Issuer"],
            vec!["", "", "Alpha"],
        ]);
        assert_eq!(find_header_row(&raw), Some(1));
    }

    #[test]
    fn marker_outside_column_c_is_ignored() {
        let raw = sheet(vec![
            vec!["Name of the Instrument", "ISIN"],
            vec!["Alpha", "INE1"],
        ]);
        assert_eq!(
            clean_sheet(&raw, "2024-01-01"),
            Err(ProcessError::HeaderNotFound {
                marker: HEADER_MARKER,
                column: HEADER_SCAN_COLUMN
            })
        );
    }

    #[test]
    fn numeric_cells_never_match_marker() {
        let raw = RawSheet::new(vec![vec![Cell::Empty, Cell::Empty, Cell::Number(1.0)]]);
        assert!(find_header_row(&raw).is_none());
    }

    #[test]
    fn existing_date_column_is_overwritten() {
        let raw = sheet(vec![
            vec!["", "", "Name of the Instrument", "Date"],
            vec!["", "", "Alpha", "old"],
        ]);
        let cleaned = clean_sheet(&raw, "2024-03-31").unwrap();
        assert_eq!(cleaned.columns.len(), 4);
        assert_eq!(cleaned.rows[0][3], Cell::from("2024-03-31"));
    }

    #[test]
    fn header_on_last_row_yields_no_rows() {
        let raw = sheet(vec![vec!["", "", "Name of the Instrument"]]);
        let cleaned = clean_sheet(&raw, "2024-01-01").unwrap();
        assert!(cleaned.is_empty());
    }
}
