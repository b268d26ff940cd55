//! Statistics for insight
//!
//! Everything the analysis catalog and the summarizer compute lives here:
//!
//! - [`descriptive`]: counts, quantiles and frequency tables per column
//! - [`correlation`]: Pearson coefficients, p-values and correlation matrices
//! - [`outliers`]: Tukey fences
//! - [`clustering`]: seeded k-means
//! - [`summary`]: the dataset overview sent to the language model
//!
//! # Example
//!
//! ```rust
//! use insight_stats::pearson_test;
//!
//! let test = pearson_test(&[1.0, 2.0, 3.0, 4.0], &[2.0, 4.1, 5.9, 8.0])?;
//! assert!(test.coefficient > 0.99);
//! # Ok::<(), insight_core::Error>(())
//! ```

pub mod clustering;
pub mod correlation;
pub mod descriptive;
pub mod outliers;
pub mod summary;

pub use clustering::{KMeans, KMeansFit, DEFAULT_SEED};
pub use correlation::{
    paired_observations, pearson, pearson_test, two_sided_p_value, CorrelationMatrix, PearsonTest,
};
pub use descriptive::{FrequencyDescription, NumericDescription};
pub use outliers::{TukeyFences, FENCE_MULTIPLIER};
pub use summary::{summarize, ColumnStats, ColumnSummary, Summary, HEAD_ROWS};
