//! Core types for insight
//!
//! This crate holds the pieces every other insight crate shares:
//!
//! - [`Dataset`] and [`Column`]: the immutable in-memory table
//! - [`loader`]: encoding/delimiter detection and CSV parsing
//! - [`AnalysisRequest`] / [`AnalysisResult`]: the closed catalog of analyses
//!   and their outputs
//! - [`Error`]: the unified error type
//!
//! # Example
//!
//! ```rust,no_run
//! use std::path::Path;
//! use insight_core::loader;
//!
//! let dataset = loader::load(Path::new("people.csv"))?;
//! println!("{} rows x {} columns", dataset.n_rows(), dataset.n_columns());
//! # Ok::<(), insight_core::Error>(())
//! ```

pub mod analysis;
pub mod dataset;
pub mod error;
pub mod loader;

pub use analysis::{
    AnalysisKind, AnalysisOutput, AnalysisRequest, AnalysisResult, ChartArtifact, Significance,
    SIGNIFICANCE_LEVEL,
};
pub use dataset::{Cell, Column, ColumnKind, ColumnValues, Dataset};
pub use error::{Error, Result};

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
