use thiserror::Error;

#[derive(Error, Debug)]
pub enum TrendError {
    #[error("No trigger row found: column '{column}' never equals 1")]
    NoTriggerFound { column: String },

    #[error("Missing column: {0}")]
    MissingColumn(String),

    #[error("Aligned candidate too short: expected {expected} rows, got {actual}")]
    AlignmentTooShort { expected: usize, actual: usize },

    #[error("Invalid selection: {0}")]
    InvalidSelection(String),

    #[error("Config error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Polars error: {0}")]
    Polars(String),
}

impl From<polars::error::PolarsError> for TrendError {
    fn from(err: polars::error::PolarsError) -> Self {
        TrendError::Polars(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, TrendError>;
