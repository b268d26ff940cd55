//! In-memory tabular dataset
//!
//! A [`Dataset`] is an ordered list of named [`Column`]s of equal length.
//! Each column holds values of a single inferred [`ColumnKind`]. Datasets are
//! built once by the loader and never mutated afterwards; analyses that need
//! cleaned or coerced values work on copies (see [`Column::to_numeric`]).

use std::collections::HashSet;

use serde::Serialize;

use crate::{Error, Result};

/// Text columns with at most this many distinct values may be categorical
pub const CATEGORICAL_MAX_DISTINCT: usize = 50;

/// Inferred type of a column
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ColumnKind {
    /// Every present value is an integer
    Integer,
    /// Every present value is a real number
    Float,
    /// Text with a small set of repeated values
    Categorical,
    /// Free text
    Text,
}

impl ColumnKind {
    /// Name of the storage type, as reported to the planning model
    pub fn dtype(&self) -> &'static str {
        match self {
            Self::Integer => "int64",
            Self::Float => "float64",
            Self::Categorical => "category",
            Self::Text => "object",
        }
    }

    /// Whether values of this kind are stored as numbers
    pub fn is_numeric(&self) -> bool {
        matches!(self, Self::Integer | Self::Float)
    }
}

/// Storage for a column's values; `None` marks a missing cell
#[derive(Debug, Clone, PartialEq)]
pub enum ColumnValues {
    Numeric(Vec<Option<f64>>),
    Text(Vec<Option<String>>),
}

/// A single cell, shaped for JSON output
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Cell {
    Number(f64),
    Text(String),
    Missing,
}

/// A named, typed column
#[derive(Debug, Clone, PartialEq)]
pub struct Column {
    name: String,
    kind: ColumnKind,
    values: ColumnValues,
}

impl Column {
    /// Create a floating point column
    pub fn float(name: impl Into<String>, values: Vec<Option<f64>>) -> Self {
        Self {
            name: name.into(),
            kind: ColumnKind::Float,
            values: ColumnValues::Numeric(values),
        }
    }

    /// Create an integer column
    pub fn integer(name: impl Into<String>, values: Vec<Option<i64>>) -> Self {
        Self {
            name: name.into(),
            kind: ColumnKind::Integer,
            values: ColumnValues::Numeric(values.into_iter().map(|v| v.map(|v| v as f64)).collect()),
        }
    }

    /// Create a text column, classifying it as categorical or free text
    pub fn text(name: impl Into<String>, values: Vec<Option<String>>) -> Self {
        let kind = classify_text(&values);
        Self {
            name: name.into(),
            kind,
            values: ColumnValues::Text(values),
        }
    }

    /// Create a column from raw cells, inferring its kind
    ///
    /// Integers win over floats, floats over text. A column with no present
    /// values is treated as floating point.
    pub fn infer(name: impl Into<String>, raw: Vec<Option<String>>) -> Self {
        let present = || raw.iter().flatten().map(|s| s.trim());

        if present().all(|s| s.parse::<i64>().is_ok()) && present().next().is_some() {
            let values = raw
                .iter()
                .map(|v| v.as_deref().and_then(|s| s.trim().parse::<i64>().ok()))
                .collect();
            return Self::integer(name, values);
        }

        if present().all(|s| s.parse::<f64>().is_ok()) {
            let values = raw
                .iter()
                .map(|v| v.as_deref().and_then(|s| s.trim().parse::<f64>().ok()))
                .collect();
            return Self::float(name, values);
        }

        Self::text(name, raw)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> ColumnKind {
        self.kind
    }

    pub fn values(&self) -> &ColumnValues {
        &self.values
    }

    /// Number of rows
    pub fn len(&self) -> usize {
        match &self.values {
            ColumnValues::Numeric(v) => v.len(),
            ColumnValues::Text(v) => v.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Number of missing cells
    pub fn null_count(&self) -> usize {
        match &self.values {
            ColumnValues::Numeric(v) => v.iter().filter(|x| x.is_none()).count(),
            ColumnValues::Text(v) => v.iter().filter(|x| x.is_none()).count(),
        }
    }

    pub fn is_numeric(&self) -> bool {
        self.kind.is_numeric()
    }

    /// Borrow the numeric values, if this is a numeric column
    pub fn as_numeric(&self) -> Option<&[Option<f64>]> {
        match &self.values {
            ColumnValues::Numeric(v) => Some(v),
            ColumnValues::Text(_) => None,
        }
    }

    /// Borrow the text values, if this is a text column
    pub fn as_text(&self) -> Option<&[Option<String>]> {
        match &self.values {
            ColumnValues::Text(v) => Some(v),
            ColumnValues::Numeric(_) => None,
        }
    }

    /// Coerced numeric copy of the column
    ///
    /// Text cells that do not parse as numbers become missing.
    pub fn to_numeric(&self) -> Vec<Option<f64>> {
        match &self.values {
            ColumnValues::Numeric(v) => v.clone(),
            ColumnValues::Text(v) => v
                .iter()
                .map(|cell| cell.as_deref().and_then(|s| s.trim().parse::<f64>().ok()))
                .collect(),
        }
    }

    /// The cell at `row`
    pub fn cell(&self, row: usize) -> Cell {
        match &self.values {
            ColumnValues::Numeric(v) => match v.get(row).copied().flatten() {
                Some(x) => Cell::Number(x),
                None => Cell::Missing,
            },
            ColumnValues::Text(v) => match v.get(row).cloned().flatten() {
                Some(s) => Cell::Text(s),
                None => Cell::Missing,
            },
        }
    }
}

fn classify_text(values: &[Option<String>]) -> ColumnKind {
    let mut distinct = HashSet::new();
    let mut present = 0usize;
    for value in values.iter().flatten() {
        present += 1;
        distinct.insert(value.as_str());
        if distinct.len() > CATEGORICAL_MAX_DISTINCT {
            return ColumnKind::Text;
        }
    }

    if present > 0 && distinct.len() * 2 <= present {
        ColumnKind::Categorical
    } else {
        ColumnKind::Text
    }
}

/// An ordered collection of equal-length columns
#[derive(Debug, Clone, PartialEq)]
pub struct Dataset {
    name: String,
    columns: Vec<Column>,
}

impl Dataset {
    /// Create a dataset, checking that every column has the same length
    pub fn new(name: impl Into<String>, columns: Vec<Column>) -> Result<Self> {
        let name = name.into();
        let Some(first) = columns.first() else {
            return Err(Error::EmptyDataset(format!("{name} has no columns")));
        };

        let rows = first.len();
        for column in &columns[1..] {
            if column.len() != rows {
                return Err(Error::size_mismatch(
                    rows,
                    column.len(),
                    &format!("column {}", column.name()),
                ));
            }
        }

        Ok(Self { name, columns })
    }

    /// Dataset name (the input file stem)
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn n_rows(&self) -> usize {
        self.columns.first().map_or(0, Column::len)
    }

    pub fn n_columns(&self) -> usize {
        self.columns.len()
    }

    /// (rows, columns)
    pub fn shape(&self) -> (usize, usize) {
        (self.n_rows(), self.n_columns())
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    pub fn column(&self, name: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.name() == name)
    }

    /// Look up a column, failing with [`Error::ColumnNotFound`]
    pub fn require(&self, name: &str) -> Result<&Column> {
        self.column(name).ok_or_else(|| Error::column_not_found(name))
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.column(name).is_some()
    }

    pub fn column_names(&self) -> Vec<&str> {
        self.columns.iter().map(Column::name).collect()
    }

    /// Columns stored as numbers, in dataset order
    pub fn numeric_columns(&self) -> impl Iterator<Item = &Column> {
        self.columns.iter().filter(|c| c.is_numeric())
    }

    /// (column name, dtype) pairs in dataset order
    pub fn dtypes(&self) -> Vec<(String, String)> {
        self.columns
            .iter()
            .map(|c| (c.name().to_string(), c.kind().dtype().to_string()))
            .collect()
    }

    /// All cells of one row, in column order
    pub fn row(&self, index: usize) -> Vec<Cell> {
        self.columns.iter().map(|c| c.cell(index)).collect()
    }
}
