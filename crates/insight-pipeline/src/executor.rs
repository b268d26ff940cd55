//! Analysis executor
//!
//! Runs the baseline correlation matrix and then every planned request, in
//! order. A request that cannot run is recorded as skipped with a reason;
//! nothing here aborts the batch.

use std::fmt;

use insight_core::{AnalysisRequest, AnalysisResult, ChartArtifact, Dataset, Error};
use tracing::{info, instrument, warn};

use crate::catalog::{Catalog, CatalogError};

/// Why a request produced no result
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SkipReason {
    /// Referenced columns absent from the dataset
    MissingColumn(Vec<String>),
    /// Too few usable observations after cleaning
    InsufficientData { expected: usize, actual: usize },
    /// Any other computation or rendering failure
    Failed(String),
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingColumn(columns) => write!(f, "missing column(s): {}", columns.join(", ")),
            Self::InsufficientData { expected, actual } => write!(
                f,
                "insufficient data: expected at least {expected} observations, got {actual}"
            ),
            Self::Failed(message) => write!(f, "{message}"),
        }
    }
}

impl From<CatalogError> for SkipReason {
    fn from(e: CatalogError) -> Self {
        match e {
            CatalogError::Data(Error::InsufficientData { expected, actual }) => {
                Self::InsufficientData { expected, actual }
            }
            CatalogError::Data(Error::ColumnNotFound(column)) => Self::MissingColumn(vec![column]),
            other => Self::Failed(other.to_string()),
        }
    }
}

/// Result of attempting one request
#[derive(Debug, Clone, PartialEq)]
pub enum AnalysisOutcome {
    Completed(AnalysisResult),
    Skipped {
        request: AnalysisRequest,
        reason: SkipReason,
    },
}

/// A request that was not completed
#[derive(Debug, Clone, PartialEq)]
pub struct SkippedAnalysis {
    pub request: AnalysisRequest,
    pub reason: SkipReason,
}

/// Everything the executor produced, in execution order
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ExecutionReport {
    results: Vec<AnalysisResult>,
    skipped: Vec<SkippedAnalysis>,
}

impl ExecutionReport {
    pub fn record(&mut self, outcome: AnalysisOutcome) {
        match outcome {
            AnalysisOutcome::Completed(result) => {
                info!(analysis = %result.request, "analysis completed");
                self.results.push(result);
            }
            AnalysisOutcome::Skipped { request, reason } => {
                warn!(analysis = %request, %reason, "analysis skipped");
                self.skipped.push(SkippedAnalysis { request, reason });
            }
        }
    }

    /// Completed analyses, baseline first
    pub fn results(&self) -> &[AnalysisResult] {
        &self.results
    }

    pub fn skipped(&self) -> &[SkippedAnalysis] {
        &self.skipped
    }

    /// Charts of every completed analysis, in execution order
    pub fn artifacts(&self) -> Vec<&ChartArtifact> {
        self.results.iter().flat_map(|r| r.artifacts.iter()).collect()
    }
}

/// Attempt a single request
pub fn run_request(catalog: &Catalog, dataset: &Dataset, request: &AnalysisRequest) -> AnalysisOutcome {
    let missing = request.missing_columns(dataset);
    if !missing.is_empty() {
        return AnalysisOutcome::Skipped {
            request: request.clone(),
            reason: SkipReason::MissingColumn(missing),
        };
    }

    match catalog.run(dataset, request) {
        Ok(result) => AnalysisOutcome::Completed(result),
        Err(e) => AnalysisOutcome::Skipped {
            request: request.clone(),
            reason: e.into(),
        },
    }
}

/// Run the baseline correlation matrix followed by `plan`
#[instrument(skip_all, fields(dataset = dataset.name(), planned = plan.len()))]
pub fn execute(catalog: &Catalog, dataset: &Dataset, plan: &[AnalysisRequest]) -> ExecutionReport {
    let baseline = AnalysisRequest::CorrelationMatrix;
    let mut report = ExecutionReport::default();

    for request in std::iter::once(&baseline).chain(plan) {
        report.record(run_request(catalog, dataset, request));
    }

    info!(
        completed = report.results.len(),
        skipped = report.skipped.len(),
        "execution finished"
    );
    report
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_skip_reason_from_catalog_error() {
        let reason: SkipReason = CatalogError::Data(Error::insufficient(2, 1)).into();
        assert_eq!(reason, SkipReason::InsufficientData { expected: 2, actual: 1 });

        let reason: SkipReason = CatalogError::Data(Error::column_not_found("x")).into();
        assert_eq!(reason, SkipReason::MissingColumn(vec!["x".to_string()]));

        let reason: SkipReason = CatalogError::Data(Error::zero_variance("y")).into();
        assert!(matches!(reason, SkipReason::Failed(m) if m.contains("zero variance")));
    }

    #[test]
    fn test_skip_reason_display() {
        let reason = SkipReason::MissingColumn(vec!["a".into(), "b".into()]);
        assert_eq!(reason.to_string(), "missing column(s): a, b");
    }
}
