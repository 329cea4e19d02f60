// src/error.rs
use thiserror::Error;

/// Everything that can go wrong while turning uploaded sheets into holdings.
///
/// Per-file variants are caught by the pipeline and turned into an empty
/// contribution; only `NoInput` and `LengthMismatch` stop a batch.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ProcessError {
    #[error("could not find a cell containing {marker:?} in column {column}")]
    HeaderNotFound { marker: &'static str, column: usize },

    #[error("required column {column:?} is missing after renaming")]
    MissingColumn { column: String },

    #[error("market value {value:?} is not numeric")]
    NumericCoercion { value: String },

    #[error("failed to read {path}: {reason}")]
    FileRead { path: String, reason: String },

    #[error("please supply at least one portfolio file and one date")]
    NoInput,

    #[error("got {files} file(s) but {dates} date(s); supply one date per file")]
    LengthMismatch { files: usize, dates: usize },
}

impl ProcessError {
    /// Short machine-friendly tag, used in the batch summary.
    pub fn kind(&self) -> &'static str {
        match self {
            ProcessError::HeaderNotFound { .. } => "HeaderNotFound",
            ProcessError::MissingColumn { .. } => "MissingColumn",
            ProcessError::NumericCoercion { .. } => "NumericCoercionFailure",
            ProcessError::FileRead { .. } => "FileReadFailure",
            ProcessError::NoInput => "NoInput",
            ProcessError::LengthMismatch { .. } => "LengthMismatch",
        }
    }
}
