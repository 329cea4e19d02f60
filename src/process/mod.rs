// src/process/mod.rs
pub mod cell;
pub mod clean;
pub mod raw_sheet;
pub mod standardize;
pub mod utils;

pub use cell::Cell;
pub use clean::{clean_sheet, find_header_row, CleanedTable};
pub use raw_sheet::RawSheet;
pub use standardize::{standardize, Holding, HoldingsTable, CANONICAL_COLUMNS};

/// Label of the column that carries the caller-supplied date.
pub const DATE_COLUMN: &str = "Date";
