//! Analysis requests, results and chart artifacts
//!
//! [`AnalysisRequest`] is the closed set of operations the catalog can run.
//! A planning model selects requests; the executor validates and runs them,
//! producing one [`AnalysisResult`] per completed request.

use std::fmt;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::Dataset;

/// p-value threshold for calling a correlation significant
pub const SIGNIFICANCE_LEVEL: f64 = 0.05;

/// Operation kinds in the analysis catalog
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AnalysisKind {
    Correlation,
    CorrelationMatrix,
    OutlierDetection,
    Clustering,
}

impl AnalysisKind {
    /// Stable identifier, used in artifact names and logs
    pub fn name(&self) -> &'static str {
        match self {
            Self::Correlation => "correlation",
            Self::CorrelationMatrix => "correlation_matrix",
            Self::OutlierDetection => "outlier_detection",
            Self::Clustering => "clustering",
        }
    }
}

impl fmt::Display for AnalysisKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A request to run one catalog operation with its arguments
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum AnalysisRequest {
    /// Pearson correlation between two columns
    Correlation { column1: String, column2: String },
    /// Pairwise correlation of all numeric columns
    CorrelationMatrix,
    /// Box plot and Tukey fences for one column
    OutlierDetection { column: String },
    /// k-means partition over the listed columns
    Clustering { columns: Vec<String> },
}

impl AnalysisRequest {
    pub fn correlation(column1: impl Into<String>, column2: impl Into<String>) -> Self {
        Self::Correlation {
            column1: column1.into(),
            column2: column2.into(),
        }
    }

    pub fn outliers(column: impl Into<String>) -> Self {
        Self::OutlierDetection {
            column: column.into(),
        }
    }

    pub fn clustering<S: Into<String>>(columns: impl IntoIterator<Item = S>) -> Self {
        Self::Clustering {
            columns: columns.into_iter().map(Into::into).collect(),
        }
    }

    pub fn kind(&self) -> AnalysisKind {
        match self {
            Self::Correlation { .. } => AnalysisKind::Correlation,
            Self::CorrelationMatrix => AnalysisKind::CorrelationMatrix,
            Self::OutlierDetection { .. } => AnalysisKind::OutlierDetection,
            Self::Clustering { .. } => AnalysisKind::Clustering,
        }
    }

    /// Column arguments, in the order given
    pub fn columns(&self) -> Vec<&str> {
        match self {
            Self::Correlation { column1, column2 } => vec![column1.as_str(), column2.as_str()],
            Self::CorrelationMatrix => Vec::new(),
            Self::OutlierDetection { column } => vec![column.as_str()],
            Self::Clustering { columns } => columns.iter().map(String::as_str).collect(),
        }
    }

    /// Referenced columns that are absent from `dataset`
    pub fn missing_columns(&self, dataset: &Dataset) -> Vec<String> {
        self.columns()
            .into_iter()
            .filter(|name| !dataset.has_column(name))
            .map(str::to_string)
            .collect()
    }
}

impl fmt::Display for AnalysisRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Correlation { column1, column2 } => {
                write!(f, "correlation({column1}, {column2})")
            }
            Self::CorrelationMatrix => f.write_str("correlation_matrix()"),
            Self::OutlierDetection { column } => write!(f, "outlier_detection({column})"),
            Self::Clustering { columns } => write!(f, "clustering({})", columns.join(", ")),
        }
    }
}

/// Significance verdict for a correlation test
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Significance {
    Significant,
    NotSignificant,
}

impl Significance {
    /// Classify a p-value at [`SIGNIFICANCE_LEVEL`]
    pub fn from_p_value(p_value: f64) -> Self {
        if p_value < SIGNIFICANCE_LEVEL {
            Self::Significant
        } else {
            Self::NotSignificant
        }
    }

    pub fn is_significant(&self) -> bool {
        matches!(self, Self::Significant)
    }
}

impl fmt::Display for Significance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Significant => f.write_str("statistically significant"),
            Self::NotSignificant => f.write_str("not statistically significant"),
        }
    }
}

/// Numeric outputs of a completed analysis
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum AnalysisOutput {
    Correlation {
        coefficient: f64,
        p_value: f64,
        significance: Significance,
        observations: usize,
    },
    CorrelationMatrix {
        columns: Vec<String>,
        matrix: Vec<Vec<f64>>,
    },
    OutlierDetection {
        observations: usize,
        q1: f64,
        median: f64,
        q3: f64,
        lower_fence: f64,
        upper_fence: f64,
        outliers: usize,
    },
    Clustering {
        observations: usize,
        #[serde(skip_serializing)]
        labels: Vec<usize>,
        centroids: Vec<Vec<f64>>,
        cluster_sizes: Vec<usize>,
        inertia: f64,
        iterations: usize,
    },
}

/// A rendered chart file
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChartArtifact {
    pub path: PathBuf,
    pub title: String,
}

impl ChartArtifact {
    pub fn new(path: impl Into<PathBuf>, title: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            title: title.into(),
        }
    }
}

/// Outcome of one executed analysis request
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnalysisResult {
    pub request: AnalysisRequest,
    pub output: AnalysisOutput,
    pub artifacts: Vec<ChartArtifact>,
}

impl AnalysisResult {
    pub fn new(request: AnalysisRequest, output: AnalysisOutput, artifacts: Vec<ChartArtifact>) -> Self {
        Self {
            request,
            output,
            artifacts,
        }
    }

    pub fn kind(&self) -> AnalysisKind {
        self.request.kind()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Column;

    #[test]
    fn test_request_serde_tags() {
        let request = AnalysisRequest::correlation("age", "income");
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["kind"], "correlation");
        assert_eq!(json["column1"], "age");

        let parsed: AnalysisRequest =
            serde_json::from_str(r#"{"kind":"correlation_matrix"}"#).unwrap();
        assert_eq!(parsed, AnalysisRequest::CorrelationMatrix);
    }

    #[test]
    fn test_request_columns_and_display() {
        let request = AnalysisRequest::clustering(["income", "age"]);
        assert_eq!(request.columns(), vec!["income", "age"]);
        assert_eq!(request.kind(), AnalysisKind::Clustering);
        assert_eq!(request.to_string(), "clustering(income, age)");
        assert!(AnalysisRequest::CorrelationMatrix.columns().is_empty());
    }

    #[test]
    fn test_missing_columns() {
        let dataset = Dataset::new("t", vec![Column::float("age", vec![Some(1.0)])]).unwrap();
        let request = AnalysisRequest::correlation("age", "height");
        assert_eq!(request.missing_columns(&dataset), vec!["height".to_string()]);
    }

    #[test]
    fn test_significance_threshold() {
        assert_eq!(Significance::from_p_value(0.01), Significance::Significant);
        assert_eq!(Significance::from_p_value(0.05), Significance::NotSignificant);
        assert!(Significance::from_p_value(0.049).is_significant());
        assert!(!Significance::from_p_value(0.2).is_significant());
        assert_eq!(
            Significance::NotSignificant.to_string(),
            "not statistically significant"
        );
    }

    #[test]
    fn test_cluster_labels_not_serialized() {
        let output = AnalysisOutput::Clustering {
            observations: 3,
            labels: vec![0, 1, 2],
            centroids: vec![vec![0.0, 0.0]],
            cluster_sizes: vec![1, 1, 1],
            inertia: 0.0,
            iterations: 1,
        };
        let json = serde_json::to_value(&output).unwrap();
        assert!(json.get("labels").is_none());
        assert_eq!(json["kind"], "clustering");
    }
}
