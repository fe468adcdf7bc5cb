//! Error types for loading, filtering and summarising trip data.

use std::path::PathBuf;

use polars::prelude::PolarsError;

/// Result type for bikeshare operations
pub type BikeshareResult<T> = Result<T, BikeshareError>;

/// Error type for bikeshare operations
#[derive(Debug, thiserror::Error)]
pub enum BikeshareError {
    #[error("No data source named '{0}'. Choose Chicago, New York City or Washington")]
    DataSourceNotFound(String),

    #[error("Data file for {city} is not available at {}", path.display())]
    SourceUnavailable { city: String, path: PathBuf },

    #[error("Data file is missing the required column '{0}'")]
    MissingColumn(String),

    #[error("Row {row} could not be read: {reason}")]
    MalformedRecord { row: usize, reason: String },

    #[error("No trips match the selected filters")]
    EmptyDataset,

    #[error("Page size must be at least 1")]
    InvalidPageSize,

    #[error("Unrecognised filter value: {0}")]
    InvalidFilter(String),

    #[error("Unknown column: {0}")]
    UnknownColumn(String),

    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Failed to read data: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Csv(#[from] PolarsError),
}

impl BikeshareError {
    /// Whether the session can recover by asking the user again.
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            BikeshareError::DataSourceNotFound(_)
                | BikeshareError::SourceUnavailable { .. }
                | BikeshareError::EmptyDataset
                | BikeshareError::InvalidFilter(_)
        )
    }

    pub(crate) fn malformed(row: usize, reason: impl Into<String>) -> Self {
        BikeshareError::MalformedRecord {
            row,
            reason: reason.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages_are_plain() {
        let err = BikeshareError::DataSourceNotFound("atlantis".to_string());
        assert_eq!(
            err.to_string(),
            "No data source named 'atlantis'. Choose Chicago, New York City or Washington"
        );

        let err = BikeshareError::malformed(3, "Start Time is blank");
        assert_eq!(err.to_string(), "Row 3 could not be read: Start Time is blank");
    }

    #[test]
    fn test_recoverable_classification() {
        assert!(BikeshareError::EmptyDataset.is_recoverable());
        assert!(BikeshareError::DataSourceNotFound("x".into()).is_recoverable());
        assert!(!BikeshareError::InvalidPageSize.is_recoverable());
        assert!(!BikeshareError::malformed(1, "bad").is_recoverable());
    }
}
