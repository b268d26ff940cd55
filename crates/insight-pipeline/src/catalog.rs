//! The closed set of analyses and their handlers
//!
//! Every [`AnalysisRequest`] variant maps to exactly one handler. Handlers
//! work on coerced copies of the dataset's columns and write one SVG chart
//! each into the output directory.

use std::path::{Path, PathBuf};

use insight_core::{
    AnalysisKind, AnalysisOutput, AnalysisRequest, AnalysisResult, ChartArtifact, Dataset, Error,
};
use insight_stats::descriptive::present;
use insight_stats::{paired_observations, pearson_test, CorrelationMatrix, KMeans, TukeyFences};
use insight_viz::{artifact_file_name, boxplot, heatmap, scatter, Axes};
use thiserror::Error;
use tracing::debug;

use crate::config::{Config, DEFAULT_CLUSTERS};

/// Why a single analysis failed
#[derive(Error, Debug)]
pub enum CatalogError {
    #[error(transparent)]
    Data(#[from] Error),

    #[error(transparent)]
    Render(#[from] insight_viz::Error),
}

pub type Result<T> = std::result::Result<T, CatalogError>;

/// Analysis handlers bound to an output directory and clustering settings
#[derive(Debug, Clone)]
pub struct Catalog {
    output_dir: PathBuf,
    seed: u64,
    clusters: usize,
}

impl Catalog {
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        Self {
            output_dir: output_dir.into(),
            seed: insight_stats::DEFAULT_SEED,
            clusters: DEFAULT_CLUSTERS,
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(&config.output_dir)
            .with_seed(config.cluster_seed)
            .with_clusters(config.clusters)
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    pub fn with_clusters(mut self, clusters: usize) -> Self {
        self.clusters = clusters;
        self
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// Run one analysis against `dataset`
    pub fn run(&self, dataset: &Dataset, request: &AnalysisRequest) -> Result<AnalysisResult> {
        match request {
            AnalysisRequest::Correlation { column1, column2 } => {
                self.correlation(dataset, request, column1, column2)
            }
            AnalysisRequest::CorrelationMatrix => self.correlation_matrix(dataset, request),
            AnalysisRequest::OutlierDetection { column } => self.outliers(dataset, request, column),
            AnalysisRequest::Clustering { columns } => self.clustering(dataset, request, columns),
        }
    }

    fn artifact_path(&self, kind: AnalysisKind, args: &[&str]) -> PathBuf {
        self.output_dir.join(artifact_file_name(kind.name(), args))
    }

    fn correlation(
        &self,
        dataset: &Dataset,
        request: &AnalysisRequest,
        column1: &str,
        column2: &str,
    ) -> Result<AnalysisResult> {
        let x = dataset.require(column1)?.to_numeric();
        let y = dataset.require(column2)?.to_numeric();
        let (x, y) = paired_observations(&x, &y)?;
        let test = pearson_test(&x, &y)?;

        let path = self.artifact_path(AnalysisKind::Correlation, &[column1, column2]);
        let title = format!("{column1} vs {column2} (r = {:.2})", test.coefficient);
        let points: Vec<(f64, f64)> = x.into_iter().zip(y).collect();
        scatter::render(&path, &title, Axes { x: column1, y: column2 }, &points)?;

        debug!(column1, column2, r = test.coefficient, p = test.p_value, "correlation computed");
        Ok(AnalysisResult::new(
            request.clone(),
            AnalysisOutput::Correlation {
                coefficient: test.coefficient,
                p_value: test.p_value,
                significance: test.significance(),
                observations: test.observations,
            },
            vec![ChartArtifact::new(path, title)],
        ))
    }

    fn correlation_matrix(&self, dataset: &Dataset, request: &AnalysisRequest) -> Result<AnalysisResult> {
        let numeric: Vec<(&str, Vec<Option<f64>>)> = dataset
            .numeric_columns()
            .map(|c| (c.name(), c.to_numeric()))
            .collect();
        if numeric.is_empty() {
            return Err(Error::InvalidInput(format!("{} has no numeric columns", dataset.name())).into());
        }

        let matrix = CorrelationMatrix::compute(&numeric);
        let path = self.artifact_path(AnalysisKind::CorrelationMatrix, &[]);
        let title = "Correlation matrix".to_string();
        heatmap::render(&path, &title, matrix.columns(), matrix.values())?;

        let (columns, matrix) = matrix.into_parts();
        Ok(AnalysisResult::new(
            request.clone(),
            AnalysisOutput::CorrelationMatrix { columns, matrix },
            vec![ChartArtifact::new(path, title)],
        ))
    }

    fn outliers(&self, dataset: &Dataset, request: &AnalysisRequest, column: &str) -> Result<AnalysisResult> {
        let values = present(&dataset.require(column)?.to_numeric());
        let fences = TukeyFences::compute(&values)?;

        let path = self.artifact_path(AnalysisKind::OutlierDetection, &[column]);
        let title = format!("Outliers in {column}");
        boxplot::render(&path, &title, column, &fences)?;

        Ok(AnalysisResult::new(
            request.clone(),
            AnalysisOutput::OutlierDetection {
                observations: fences.observations,
                q1: fences.q1,
                median: fences.median,
                q3: fences.q3,
                lower_fence: fences.lower_fence,
                upper_fence: fences.upper_fence,
                outliers: fences.outlier_count(),
            },
            vec![ChartArtifact::new(path, title)],
        ))
    }

    fn clustering(
        &self,
        dataset: &Dataset,
        request: &AnalysisRequest,
        columns: &[String],
    ) -> Result<AnalysisResult> {
        let [first, second, ..] = columns else {
            return Err(Error::InvalidInput(format!(
                "clustering needs at least two columns, got {}",
                columns.len()
            ))
            .into());
        };

        let coerced = columns
            .iter()
            .map(|name| dataset.require(name).map(|column| column.to_numeric()))
            .collect::<std::result::Result<Vec<_>, Error>>()?;

        // Rows with a missing or non-numeric value in any column are dropped
        let points: Vec<Vec<f64>> = (0..dataset.n_rows())
            .filter_map(|row| {
                coerced
                    .iter()
                    .map(|column| column[row].filter(|v| v.is_finite()))
                    .collect::<Option<Vec<f64>>>()
            })
            .collect();

        let fit = KMeans::new(self.clusters).with_seed(self.seed).fit(&points)?;

        let args: Vec<&str> = columns.iter().map(String::as_str).collect();
        let path = self.artifact_path(AnalysisKind::Clustering, &args);
        let title = format!("Clusters over {}", columns.join(", "));
        let plotted: Vec<(f64, f64)> = points.iter().map(|p| (p[0], p[1])).collect();
        scatter::render_clusters(&path, &title, Axes { x: first, y: second }, &plotted, &fit.labels)?;

        debug!(rows = points.len(), inertia = fit.inertia, "clustering computed");
        Ok(AnalysisResult::new(
            request.clone(),
            AnalysisOutput::Clustering {
                observations: points.len(),
                labels: fit.labels,
                centroids: fit.centroids,
                cluster_sizes: fit.cluster_sizes,
                inertia: fit.inertia,
                iterations: fit.iterations,
            },
            vec![ChartArtifact::new(path, title)],
        ))
    }
}
