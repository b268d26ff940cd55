//! Dataset summary: shape, sample rows and per-column statistics

use insight_core::{Cell, Column, ColumnValues, Dataset};
use serde::Serialize;
use tracing::instrument;

use crate::descriptive::{FrequencyDescription, NumericDescription};

/// Number of leading rows included as a sample
pub const HEAD_ROWS: usize = 5;

/// Statistics for one column, by storage kind
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ColumnStats {
    Numeric(NumericDescription),
    Frequency(FrequencyDescription),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ColumnSummary {
    pub name: String,
    pub dtype: String,
    pub stats: ColumnStats,
}

impl ColumnSummary {
    pub fn describe(column: &Column) -> Self {
        let stats = match column.values() {
            ColumnValues::Numeric(values) => ColumnStats::Numeric(NumericDescription::describe(values)),
            ColumnValues::Text(values) => ColumnStats::Frequency(FrequencyDescription::describe(values)),
        };
        Self {
            name: column.name().to_string(),
            dtype: column.kind().dtype().to_string(),
            stats,
        }
    }
}

/// Immutable overview of a dataset, handed to both model requests
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Summary {
    pub name: String,
    /// (rows, columns)
    pub shape: (usize, usize),
    pub columns: Vec<String>,
    /// Leading rows, cells in column order
    pub sample: Vec<Vec<Cell>>,
    pub statistics: Vec<ColumnSummary>,
}

impl Summary {
    /// Summarize `dataset`, sampling its first `head_rows` rows
    pub fn from_dataset(dataset: &Dataset, head_rows: usize) -> Self {
        Self {
            name: dataset.name().to_string(),
            shape: dataset.shape(),
            columns: dataset.column_names().into_iter().map(str::to_string).collect(),
            sample: (0..head_rows.min(dataset.n_rows())).map(|i| dataset.row(i)).collect(),
            statistics: dataset.columns().iter().map(ColumnSummary::describe).collect(),
        }
    }

    pub fn column(&self, name: &str) -> Option<&ColumnSummary> {
        self.statistics.iter().find(|c| c.name == name)
    }

    /// (column, dtype) pairs in column order
    pub fn dtypes(&self) -> Vec<(&str, &str)> {
        self.statistics
            .iter()
            .map(|c| (c.name.as_str(), c.dtype.as_str()))
            .collect()
    }
}

/// Summarize with the default head sample size
#[instrument(skip_all, fields(dataset = dataset.name()))]
pub fn summarize(dataset: &Dataset) -> Summary {
    Summary::from_dataset(dataset, HEAD_ROWS)
}
