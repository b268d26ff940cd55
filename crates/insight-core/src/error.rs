//! Error types for dataset handling and analysis
//!
//! Provides a unified error type for all insight crates that operate on a
//! [`Dataset`](crate::Dataset).

use thiserror::Error;

/// Core error type for loading and analysing datasets
#[derive(Error, Debug)]
pub enum Error {
    /// IO error (for file operations)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Delimited text could not be parsed
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// Input is structurally invalid
    #[error("Malformed input: {0}")]
    Malformed(String),

    /// Input contained no usable rows or columns
    #[error("Empty dataset: {0}")]
    EmptyDataset(String),

    /// A referenced column does not exist
    #[error("Column not found: {0}")]
    ColumnNotFound(String),

    /// Insufficient data for the requested operation
    #[error("Insufficient data: expected at least {expected} observations, got {actual}")]
    InsufficientData { expected: usize, actual: usize },

    /// Invalid input data or arguments
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Numerical computation error
    #[error("Computation error: {0}")]
    Computation(String),
}

/// Result type alias using our Error type
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Create an error for a minimum sample size that was not met
    pub fn insufficient(expected: usize, actual: usize) -> Self {
        Self::InsufficientData { expected, actual }
    }

    /// Create an error for a missing column
    pub fn column_not_found(name: &str) -> Self {
        Self::ColumnNotFound(name.to_string())
    }

    /// Create an error for size mismatch
    pub fn size_mismatch(expected: usize, actual: usize, context: &str) -> Self {
        Self::InvalidInput(format!(
            "Size mismatch in {context}: expected {expected}, got {actual}"
        ))
    }

    /// Create an error for a column without variation
    pub fn zero_variance(context: &str) -> Self {
        Self::Computation(format!("{context} has zero variance"))
    }

    /// Whether this error means the operation had too few observations
    pub fn is_insufficient_data(&self) -> bool {
        matches!(self, Self::InsufficientData { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::Malformed("line 3 has 4 fields".to_string());
        assert_eq!(err.to_string(), "Malformed input: line 3 has 4 fields");

        let err = Error::EmptyDataset("data.csv".to_string());
        assert_eq!(err.to_string(), "Empty dataset: data.csv");

        let err = Error::column_not_found("income");
        assert_eq!(err.to_string(), "Column not found: income");

        let err = Error::insufficient(2, 1);
        assert_eq!(
            err.to_string(),
            "Insufficient data: expected at least 2 observations, got 1"
        );

        let err = Error::zero_variance("column age");
        assert_eq!(err.to_string(), "Computation error: column age has zero variance");
    }

    #[test]
    fn test_size_mismatch() {
        let err = Error::size_mismatch(10, 7, "paired columns");
        assert_eq!(
            err.to_string(),
            "Invalid input: Size mismatch in paired columns: expected 10, got 7"
        );
    }

    #[test]
    fn test_insufficient_data_classification() {
        assert!(Error::insufficient(3, 0).is_insufficient_data());
        assert!(!Error::Computation("nan".to_string()).is_insufficient_data());
        assert!(!Error::column_not_found("x").is_insufficient_data());
    }

    #[test]
    fn test_error_from_io_error() {
        use std::io;

        let io_err = io::Error::new(io::ErrorKind::NotFound, "file not found");
        let err: Error = io_err.into();

        match err {
            Error::Io(_) => assert!(err.to_string().contains("file not found")),
            _ => panic!("Wrong error type"),
        }
    }
}
