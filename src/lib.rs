//! insight: automated exploratory analysis of tabular data
//!
//! Loads a delimited file, summarizes it, lets a language model choose
//! follow-up analyses, renders charts for them and writes a narrated
//! Markdown report.
//!
//! This crate re-exports the workspace crates:
//!
//! - [`stats`]: descriptive statistics, correlation, outlier fences, k-means
//! - [`viz`]: SVG charts
//! - [`llm`]: chat-completions client, plan and narrative requests
//! - [`pipeline`]: configuration, analysis catalog, executor and report
//!
//! # Example
//!
//! ```rust,no_run
//! use insight::pipeline::{run, Config};
//!
//! let config = Config::new("people.csv", "token").with_output_dir("out/people");
//! let summary = run(&config)?;
//! println!("{} analyses, report at {}", summary.completed, summary.report_path.display());
//! # Ok::<(), insight::pipeline::PipelineError>(())
//! ```

pub use insight_core::{
    loader, AnalysisKind, AnalysisOutput, AnalysisRequest, AnalysisResult, ChartArtifact, Column,
    ColumnKind, Dataset, Error, Result, Significance,
};
pub use insight_llm as llm;
pub use insight_pipeline as pipeline;
pub use insight_stats as stats;
pub use insight_viz as viz;

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
