use thiserror::Error;

#[derive(Error, Debug)]
pub enum ReportError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Invalid amount in row {row}: {value:?}")]
    InvalidAmount { row: usize, value: String },

    #[error("Invalid date in row {row}: {value:?}")]
    InvalidDate { row: usize, value: String },

    #[error("Row {row} has no column {column}")]
    MissingField { row: usize, column: usize },

    #[error("Total overflows while adding {0}")]
    Overflow(String),

    #[error("Invalid balance: {0:?}")]
    InvalidBalance(String),

    #[error("Settings error: {0}")]
    Settings(String),

    #[error("{0}")]
    Other(String),
}

pub type Result<T> = std::result::Result<T, ReportError>;
