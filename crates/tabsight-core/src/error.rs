//! Error types for analysis and ingestion

use thiserror::Error;

/// Result type for analysis operations
pub type Result<T> = std::result::Result<T, AnalysisError>;

/// Errors raised while executing an intent against a dataset.
///
/// These never leave the executor: every one of them is turned into a
/// text-only [`AnalysisResult`](crate::analysis::AnalysisResult).
#[derive(Debug, Error, Clone, PartialEq)]
pub enum AnalysisError {
    /// The intent names a column the dataset does not have
    #[error("column '{0}' does not exist in the dataset")]
    ColumnNotFound(String),

    /// An aggregation needed at least one numeric value
    #[error("column '{column}' has no numeric values")]
    NoNumericValues { column: String },

    /// Any other failure while computing a result
    #[error("computation failed: {0}")]
    Computation(String),
}

/// Errors raised while turning a file into a [`Dataset`](crate::dataset::Dataset)
#[derive(Debug, Error)]
pub enum IngestError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("input has no header row")]
    Empty,

    #[error("unsupported file format: {0}")]
    UnsupportedFormat(String),

    #[error("invalid dataset: {0}")]
    Shape(String),
}
