#[derive(Debug, thiserror::Error)]
pub enum ReportError {
    #[error("DuckDB error: {0}")]
    DuckDb(#[from] duckdb::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// No participants in the requested period, so no percentage exists.
    #[error("No result: {0}")]
    NoResult(String),

    #[error("Unexpected value: {0}")]
    UnexpectedValue(String),

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
}

impl ReportError {
    /// True when the error signals "insufficient data" rather than a failure.
    pub fn is_no_result(&self) -> bool {
        matches!(self, ReportError::NoResult(_))
    }
}

pub type Result<T> = std::result::Result<T, ReportError>;
