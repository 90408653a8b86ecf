//! Error types for report generation.

use thiserror::Error;

/// Errors surfaced to whoever asked for a report.
///
/// All of them are recoverable by the caller: fix the input and ask again.
/// The engine keeps no state between runs.
#[derive(Debug, Error)]
pub enum ReportError {
    #[error("invalid date range: {0}")]
    InvalidRange(String),

    #[error("no data found for the selected date range")]
    EmptyResult,

    #[error("data load error: {0}")]
    Sheet(#[from] nutrition_sheet_client::SheetError),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl ReportError {
    /// Short label used for metrics and log fields.
    pub fn kind(&self) -> &'static str {
        match self {
            ReportError::InvalidRange(_) => "invalid_range",
            ReportError::EmptyResult => "empty_result",
            ReportError::Sheet(_) => "data_load",
            ReportError::Serialization(_) => "serialization",
        }
    }
}

/// Result type alias for report operations.
pub type ReportResult<T> = Result<T, ReportError>;
