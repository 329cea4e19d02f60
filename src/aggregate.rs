// src/aggregate.rs
use tracing::debug;

use crate::process::HoldingsTable;

/// Concatenate standardized tables in order. Empty tables add nothing and an
/// empty input yields an empty table with the canonical columns.
pub fn concat_tables<I>(tables: I) -> HoldingsTable
where
    I: IntoIterator<Item = HoldingsTable>,
{
    let mut rows = Vec::new();
    let mut parts = 0usize;
    for table in tables {
        parts += 1;
        rows.extend(table.into_rows());
    }
    debug!(parts, rows = rows.len(), "concatenated tables");
    HoldingsTable::new(rows)
}

/// Rows whose Instrument text contains `fund_name` (case-sensitive).
/// Blank or non-text instruments never match.
pub fn filter_by_instrument(table: &HoldingsTable, fund_name: &str) -> HoldingsTable {
    table
        .iter()
        .filter(|h| {
            h.instrument
                .as_text()
                .is_some_and(|name| name.contains(fund_name))
        })
        .cloned()
        .collect()
}
