//! Analysis pipeline for insight
//!
//! Ties the other crates together into one run:
//!
//! 1. load the dataset and summarize it
//! 2. ask the model for a plan of follow-up analyses
//! 3. run the baseline correlation matrix and the plan through the
//!    [`Catalog`], skipping what cannot run
//! 4. ask the model for a narrative and write `README.md`
//!
//! # Example
//!
//! ```rust,no_run
//! use insight_pipeline::{run, Config};
//!
//! let config = Config::new("people.csv", std::env::var("AIPROXY_TOKEN").unwrap_or_default());
//! let summary = run(&config)?;
//! println!("report at {}", summary.report_path.display());
//! # Ok::<(), insight_pipeline::PipelineError>(())
//! ```

pub mod catalog;
pub mod config;
pub mod error;
pub mod executor;
pub mod pipeline;
pub mod report;

pub use catalog::{Catalog, CatalogError};
pub use config::{Config, DEFAULT_API_URL, DEFAULT_MODEL, REPORT_FILE_NAME, TOKEN_ENV};
pub use error::{PipelineError, Result};
pub use executor::{execute, run_request, AnalysisOutcome, ExecutionReport, SkipReason, SkippedAnalysis};
pub use pipeline::{run, NarrativeStatus, Pipeline, RunSummary};
