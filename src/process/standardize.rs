use serde::Serialize;

use crate::error::ProcessError;
use crate::process::{Cell, CleanedTable, DATE_COLUMN};

/// Source header labels mapped onto canonical column names.
/// Labels not present in a sheet are skipped.
pub const COLUMN_RENAMES: [(&str, &str); 5] = [
    ("Name of the Instrument", "Instrument"),
    ("Market value\n(Rs. in Lakhs)", "Market Value"),
    ("Quantity", "Quantity"),
    ("% to NAV", "Percent to NAV"),
    ("ISIN", "ISIN"),
];

/// Canonical column order of every standardized and combined table.
pub const CANONICAL_COLUMNS: [&str; 6] = [
    "Instrument",
    "ISIN",
    "Quantity",
    "Market Value",
    "Percent to NAV",
    DATE_COLUMN,
];

/// One holding line. Values are passed through exactly as read.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Holding {
    #[serde(rename = "Instrument")]
    pub instrument: Cell,
    #[serde(rename = "ISIN")]
    pub isin: Cell,
    #[serde(rename = "Quantity")]
    pub quantity: Cell,
    #[serde(rename = "Market Value")]
    pub market_value: Cell,
    #[serde(rename = "Percent to NAV")]
    pub percent_to_nav: Cell,
    #[serde(rename = "Date")]
    pub date: String,
}

impl Holding {
    /// Cells in [`CANONICAL_COLUMNS`] order, for display.
    pub fn cells(&self) -> [String; 6] {
        [
            self.instrument.to_string(),
            self.isin.to_string(),
            self.quantity.to_string(),
            self.market_value.to_string(),
            self.percent_to_nav.to_string(),
            self.date.clone(),
        ]
    }
}

/// A table with the six canonical columns. Row order is insertion order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct HoldingsTable {
    rows: Vec<Holding>,
}

impl HoldingsTable {
    pub fn new(rows: Vec<Holding>) -> Self {
        Self { rows }
    }

    pub fn columns(&self) -> &'static [&'static str] {
        &CANONICAL_COLUMNS
    }

    pub fn rows(&self) -> &[Holding] {
        &self.rows
    }

    pub fn into_rows(self) -> Vec<Holding> {
        self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Holding> {
        self.rows.iter()
    }
}

impl FromIterator<Holding> for HoldingsTable {
    fn from_iter<I: IntoIterator<Item = Holding>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

impl<'a> IntoIterator for &'a HoldingsTable {
    type Item = &'a Holding;
    type IntoIter = std::slice::Iter<'a, Holding>;

    fn into_iter(self) -> Self::IntoIter {
        self.rows.iter()
    }
}

fn canonical_name(label: &str) -> &str {
    COLUMN_RENAMES
        .iter()
        .find(|(from, _)| *from == label)
        .map(|(_, to)| *to)
        .unwrap_or(label)
}

/// Rename known source columns and project onto [`CANONICAL_COLUMNS`].
///
/// Fails with `MissingColumn` naming the first canonical column that cannot be
/// found once renaming is done.
pub fn standardize(table: &CleanedTable) -> Result<HoldingsTable, ProcessError> {
    let renamed: Vec<&str> = table.columns.iter().map(|c| canonical_name(c)).collect();

    let mut idx = [0usize; 6];
    for (slot, name) in idx.iter_mut().zip(CANONICAL_COLUMNS) {
        *slot = renamed
            .iter()
            .position(|c| *c == name)
            .ok_or_else(|| ProcessError::MissingColumn {
                column: name.to_string(),
            })?;
    }

    let pick = |row: &[Cell], i: usize| row.get(idx[i]).cloned().unwrap_or_default();
    let rows = table
        .rows
        .iter()
        .map(|row| Holding {
            instrument: pick(row, 0),
            isin: pick(row, 1),
            quantity: pick(row, 2),
            market_value: pick(row, 3),
            percent_to_nav: pick(row, 4),
            date: pick(row, 5).to_string(),
        })
        .collect();

    Ok(HoldingsTable::new(rows))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cleaned(columns: &[&str], rows: Vec<Vec<&str>>) -> CleanedTable {
        CleanedTable {
            columns: columns.iter().map(|c| c.to_string()).collect(),
            rows: rows
                .into_iter()
                .map(|r| r.into_iter().map(Cell::from).collect())
                .collect(),
        }
    }

    const SOURCE: [&str; 8] = [
        "Sr",
        "Rating",
        "Name of the Instrument",
        "ISIN",
        "Quantity",
        "Market value\n(Rs. in Lakhs)",
        "% to NAV",
        "Date",
    ];

    #[test]
    fn renames_and_reorders() {
        let table = cleaned(
            &SOURCE,
            vec![vec![
                "1", "AAA", "Alpha Ltd", "INE1", "10", "100.5", "1.2", "2024-01-31",
            ]],
        );
        let out = standardize(&table).unwrap();
        assert_eq!(out.len(), 1);
        assert_eq!(
            out.rows()[0],
            Holding {
                instrument: Cell::from("Alpha Ltd"),
                isin: Cell::from("INE1"),
                quantity: Cell::from("10"),
                market_value: Cell::from("100.5"),
                percent_to_nav: Cell::from("1.2"),
                date: "2024-01-31".into(),
            }
        );
    }

    #[test]
    fn missing_isin_names_canonical_column() {
        let columns: Vec<&str> = SOURCE.iter().copied().filter(|c| *c != "ISIN").collect();
        let table = cleaned(&columns, vec![]);
        assert_eq!(
            standardize(&table),
            Err(ProcessError::MissingColumn {
                column: "ISIN".into()
            })
        );
    }

    #[test]
    fn drifted_source_label_reports_canonical_name() {
        let columns: Vec<&str> = SOURCE
            .iter()
            .map(|c| if c.starts_with("Market value") { "Market Value (Rs. Lakhs)" } else { *c })
            .collect();
        let err = standardize(&cleaned(&columns, vec![])).unwrap_err();
        assert_eq!(
            err,
            ProcessError::MissingColumn {
                column: "Market Value".into()
            }
        );
    }

    #[test]
    fn values_pass_through_untouched() {
        let mut table = cleaned(&SOURCE, vec![]);
        table.rows.push(vec![
            Cell::Empty,
            Cell::Empty,
            Cell::from("  Padded  "),
            Cell::Empty,
            Cell::Number(10.0),
            Cell::from("n/a"),
            Cell::Bool(false),
            Cell::from("2024-01-31"),
        ]);
        let out = standardize(&table).unwrap();
        let h = &out.rows()[0];
        assert_eq!(h.instrument, Cell::from("  Padded  "));
        assert_eq!(h.isin, Cell::Empty);
        assert_eq!(h.quantity, Cell::Number(10.0));
        assert_eq!(h.market_value, Cell::from("n/a"));
        assert_eq!(h.percent_to_nav, Cell::Bool(false));
    }

    #[test]
    fn first_duplicate_label_wins() {
        let mut columns = SOURCE.to_vec();
        columns.push("ISIN");
        let table = cleaned(
            &columns,
            vec![vec!["1", "", "A", "FIRST", "1", "1", "1", "d", "SECOND"]],
        );
        let out = standardize(&table).unwrap();
        assert_eq!(out.rows()[0].isin, Cell::from("FIRST"));
    }
}
