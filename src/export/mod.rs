// src/export/mod.rs
use anyhow::{Context, Result};
use csv::WriterBuilder;
use serde::Serialize;
use std::{
    fs::{self, File},
    io::{BufWriter, Write},
    path::{Path, PathBuf},
};
use tracing::info;

use crate::chart::{MarketValueSeries, CHART_TITLE};
use crate::process::{HoldingsTable, CANONICAL_COLUMNS};

/// File name of the combined CSV download.
pub const COMBINED_CSV_NAME: &str = "combined_data.csv";
/// MIME type of the combined CSV download.
pub const CSV_MIME_TYPE: &str = "text/csv";

/// Write `table` as CSV: canonical header, one line per row, no index column.
/// The header is written even when the table has no rows.
pub fn write_csv<W: Write>(table: &HoldingsTable, writer: W) -> Result<()> {
    let mut wtr = WriterBuilder::new().has_headers(false).from_writer(writer);
    wtr.write_record(CANONICAL_COLUMNS)
        .context("Failed to write CSV header")?;
    for (idx, holding) in table.iter().enumerate() {
        wtr.serialize(holding)
            .with_context(|| format!("Failed to write CSV row {}", idx))?;
    }
    wtr.flush().context("Failed to flush CSV writer")?;
    Ok(())
}

/// CSV download payload, held in memory.
pub fn to_csv_bytes(table: &HoldingsTable) -> Result<Vec<u8>> {
    let mut buf = Vec::new();
    write_csv(table, &mut buf)?;
    Ok(buf)
}

/// Write `<out_dir>/combined_data.csv`, creating `out_dir` if needed.
pub fn write_combined_csv(table: &HoldingsTable, out_dir: &Path) -> Result<PathBuf> {
    fs::create_dir_all(out_dir)
        .with_context(|| format!("creating output directory {:?}", out_dir))?;
    let path = out_dir.join(COMBINED_CSV_NAME);
    let file = File::create(&path).with_context(|| format!("creating {:?}", path))?;
    write_csv(table, BufWriter::new(file))?;
    info!(path = %path.display(), rows = table.len(), mime = CSV_MIME_TYPE, "wrote combined CSV");
    Ok(path)
}

#[derive(Serialize)]
struct ChartDoc<'a> {
    title: &'a str,
    x: &'a str,
    y: &'a str,
    #[serde(flatten)]
    series: &'a MarketValueSeries,
}

/// Bar chart description for external renderers.
pub fn chart_json(series: &MarketValueSeries) -> Result<String> {
    let doc = ChartDoc {
        title: CHART_TITLE,
        x: "Date",
        y: "Market Value",
        series,
    };
    serde_json::to_string_pretty(&doc).context("serializing chart")
}

pub fn write_chart_json(series: &MarketValueSeries, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("creating directory {:?}", parent))?;
    }
    fs::write(path, chart_json(series)?).with_context(|| format!("writing {:?}", path))?;
    info!(path = %path.display(), bars = series.bars.len(), "wrote chart json");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chart::Bar;
    use crate::process::{Cell, Holding};
    use tempfile::tempdir;

    fn holding(name: &str, value: Cell, date: &str) -> Holding {
        Holding {
            instrument: Cell::from(name),
            isin: Cell::from("INE0"),
            quantity: Cell::Number(5.0),
            market_value: value,
            percent_to_nav: Cell::Empty,
            date: date.into(),
        }
    }

    #[test]
    fn csv_has_header_and_no_index() -> Result<()> {
        let table = HoldingsTable::new(vec![
            holding("Alpha, Ltd", Cell::Number(100.0), "2024-01-01"),
            holding("Beta", Cell::from("200.5"), "2024-02-01"),
        ]);
        let text = String::from_utf8(to_csv_bytes(&table)?)?;
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(
            lines,
            vec![
                "Instrument,ISIN,Quantity,Market Value,Percent to NAV,Date",
                "\"Alpha, Ltd\",INE0,5,100,,2024-01-01",
                "Beta,INE0,5,200.5,,2024-02-01",
            ]
        );
        Ok(())
    }

    #[test]
    fn empty_table_writes_header_only() -> Result<()> {
        let text = String::from_utf8(to_csv_bytes(&HoldingsTable::default())?)?;
        assert_eq!(
            text,
            "Instrument,ISIN,Quantity,Market Value,Percent to NAV,Date\n"
        );
        Ok(())
    }

    #[test]
    fn writes_named_file() -> Result<()> {
        let dir = tempdir()?;
        let out = dir.path().join("nested");
        let path = write_combined_csv(&HoldingsTable::default(), &out)?;
        assert_eq!(path, out.join(COMBINED_CSV_NAME));
        assert!(path.exists());
        Ok(())
    }

    #[test]
    fn chart_json_lists_bars() -> Result<()> {
        let series = MarketValueSeries {
            bars: vec![Bar {
                date: "2024-01-01".into(),
                market_value: 150.0,
            }],
            dropped_rows: 1,
        };
        let value: serde_json::Value = serde_json::from_str(&chart_json(&series)?)?;
        assert_eq!(value["title"], CHART_TITLE);
        assert_eq!(value["bars"][0]["date"], "2024-01-01");
        assert_eq!(value["bars"][0]["market_value"], 150.0);
        assert!(value.get("dropped_rows").is_none());
        Ok(())
    }
}
