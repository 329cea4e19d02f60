pub mod aggregate;
pub mod chart;
pub mod config;
pub mod error;
pub mod export;
pub mod load;
pub mod pipeline;
pub mod process;
pub mod report;
pub mod view;

pub use error::ProcessError;
pub use process::{Cell, CleanedTable, Holding, HoldingsTable, RawSheet};
