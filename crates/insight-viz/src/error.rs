//! Error types for chart rendering

use plotters::drawing::DrawingAreaErrorKind;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    /// The drawing backend failed
    #[error("Render error: {0}")]
    Render(String),

    /// IO error while writing the chart
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Nothing drawable was supplied
    #[error("Invalid chart input: {0}")]
    InvalidInput(String),
}

pub type Result<T> = std::result::Result<T, Error>;

impl From<DrawingAreaErrorKind<std::io::Error>> for Error {
    fn from(e: DrawingAreaErrorKind<std::io::Error>) -> Self {
        Self::Render(e.to_string())
    }
}
