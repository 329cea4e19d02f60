// src/chart/mod.rs
use anyhow::{Context, Result};
use serde::Serialize;
use std::{collections::BTreeMap, io::Write};
use tracing::{debug, warn};

use crate::error::ProcessError;
use crate::process::{Cell, HoldingsTable};

pub const CHART_TITLE: &str = "Market Value Over Time";

/// One bar: a date label and the summed market value for it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Bar {
    pub date: String,
    pub market_value: f64,
}

/// Market value summed per date label, ordered by label.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct MarketValueSeries {
    pub bars: Vec<Bar>,
    /// Rows left out because their market value was not numeric.
    #[serde(skip)]
    pub dropped_rows: usize,
}

impl MarketValueSeries {
    pub fn is_empty(&self) -> bool {
        self.bars.is_empty()
    }

    /// `(date, sum)` pairs in bar order.
    pub fn points(&self) -> impl Iterator<Item = (&str, f64)> {
        self.bars.iter().map(|b| (b.date.as_str(), b.market_value))
    }
}

/// Read a Market Value cell as a number.
pub fn coerce_market_value(cell: &Cell) -> Result<f64, ProcessError> {
    cell.as_f64().ok_or_else(|| ProcessError::NumericCoercion {
        value: cell.to_string(),
    })
}

/// Sum market values per date label. Unparsable values are dropped, not
/// fatal. Labels are ordered as strings, which matches calendar order only
/// for `YYYY-MM-DD` labels.
pub fn group_market_value(table: &HoldingsTable) -> MarketValueSeries {
    let mut sums: BTreeMap<&str, f64> = BTreeMap::new();
    let mut dropped_rows = 0usize;

    for holding in table {
        match coerce_market_value(&holding.market_value) {
            Ok(v) => *sums.entry(holding.date.as_str()).or_insert(0.0) += v,
            Err(e) => {
                debug!(date = %holding.date, "{}", e);
                dropped_rows += 1;
            }
        }
    }
    if dropped_rows > 0 {
        warn!(dropped_rows, "skipped rows with non-numeric market value");
    }

    MarketValueSeries {
        bars: sums
            .into_iter()
            .map(|(date, market_value)| Bar {
                date: date.to_string(),
                market_value,
            })
            .collect(),
        dropped_rows,
    }
}

/// Draw `series` as a horizontal text bar chart, `width` cells at the longest
/// bar.
pub fn render_bar_chart<W: Write>(series: &MarketValueSeries, out: &mut W, width: usize) -> Result<()> {
    writeln!(out, "{}", CHART_TITLE).context("writing chart title")?;
    writeln!(out, "{:-<1$}", "", CHART_TITLE.len())?;

    if series.is_empty() {
        writeln!(out, "(no numeric market values to plot)")?;
        return Ok(());
    }

    let label_width = series.bars.iter().map(|b| b.date.chars().count()).max().unwrap_or(0);
    let max = series
        .bars
        .iter()
        .map(|b| b.market_value)
        .fold(0.0_f64, f64::max);

    for bar in &series.bars {
        let len = if max > 0.0 && bar.market_value > 0.0 {
            ((bar.market_value / max) * width as f64).round() as usize
        } else {
            0
        };
        writeln!(
            out,
            "{:<lw$} | {:<w$} {:.2}",
            bar.date,
            "#".repeat(len),
            bar.market_value,
            lw = label_width,
            w = width
        )
        .with_context(|| format!("writing bar for {}", bar.date))?;
    }
    if series.dropped_rows > 0 {
        writeln!(
            out,
            "({} row(s) without a numeric market value were left out)",
            series.dropped_rows
        )?;
    }
    Ok(())
}
