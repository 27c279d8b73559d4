//! Error types for jg-output.

use thiserror::Error;

/// Errors that can occur when writing or loading run output.
#[derive(Debug, Error)]
pub enum OutputError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("{file} row {row}: cannot parse `{value}` in column `{column}`")]
    Parse {
        file:   &'static str,
        row:    u64,
        column: &'static str,
        value:  String,
    },

    #[error("{file}: no data rows")]
    Empty { file: &'static str },
}

/// Alias for `Result<T, OutputError>`.
pub type OutputResult<T> = Result<T, OutputError>;
