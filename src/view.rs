use anyhow::Result;
use std::io::Write;

use crate::process::{utils::truncate_chars, HoldingsTable};

/// Widest a single cell may print before it gets cut.
pub const MAX_CELL_WIDTH: usize = 40;

/// Write `table` as a fixed-width text table: header, rule, one line per row.
pub fn render_table<W: Write>(table: &HoldingsTable, out: &mut W) -> Result<()> {
    let header = table.columns();
    let rows: Vec<[String; 6]> = table
        .iter()
        .map(|h| h.cells().map(|c| truncate_chars(&c.replace('\n', " "), MAX_CELL_WIDTH)))
        .collect();

    let mut widths: Vec<usize> = header.iter().map(|h| h.chars().count()).collect();
    for row in &rows {
        for (w, cell) in widths.iter_mut().zip(row.iter()) {
            *w = (*w).max(cell.chars().count());
        }
    }

    writeln!(out, "{}", pad_line(header.iter().copied(), &widths))?;
    writeln!(
        out,
        "{}",
        widths.iter().map(|w| "-".repeat(*w)).collect::<Vec<_>>().join("  ")
    )?;
    for row in &rows {
        writeln!(out, "{}", pad_line(row.iter().map(String::as_str), &widths))?;
    }
    writeln!(out, "({} row(s))", rows.len())?;
    Ok(())
}

fn pad_line<'a>(cells: impl Iterator<Item = &'a str>, widths: &[usize]) -> String {
    cells
        .zip(widths)
        .map(|(c, w)| format!("{}{}", c, " ".repeat(w.saturating_sub(c.chars().count()))))
        .collect::<Vec<_>>()
        .join("  ")
        .trim_end()
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::process::{Cell, Holding};

    #[test]
    fn aligns_columns() -> Result<()> {
        let table = HoldingsTable::new(vec![Holding {
            instrument: Cell::from("Alpha Fund"),
            isin: Cell::from("INE1"),
            quantity: Cell::Number(10.0),
            market_value: Cell::from("100"),
            percent_to_nav: Cell::from("1.5"),
            date: "2024-01-01".into(),
        }]);
        let mut buf = Vec::new();
        render_table(&table, &mut buf)?;
        let text = String::from_utf8(buf)?;
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(
            lines[0],
            "Instrument  ISIN  Quantity  Market Value  Percent to NAV  Date"
        );
        assert_eq!(
            lines[2],
            "Alpha Fund  INE1  10        100           1.5             2024-01-01"
        );
        assert_eq!(lines[3], "(1 row(s))");
        Ok(())
    }

    #[test]
    fn empty_table_still_has_header() -> Result<()> {
        let mut buf = Vec::new();
        render_table(&HoldingsTable::default(), &mut buf)?;
        let text = String::from_utf8(buf)?;
        assert!(text.starts_with("Instrument  ISIN"));
        assert!(text.ends_with("(0 row(s))\n"));
        Ok(())
    }
}
