//! Pearson correlation, its significance test and correlation matrices

use insight_core::{Error, Result, Significance};
use serde::Serialize;
use statrs::distribution::{ContinuousCDF, StudentsT};

use crate::descriptive::{is_constant, present};

/// Rows where both values are present and finite
///
/// Mirrors dropping incomplete rows after numeric coercion.
pub fn paired_observations(x: &[Option<f64>], y: &[Option<f64>]) -> Result<(Vec<f64>, Vec<f64>)> {
    if x.len() != y.len() {
        return Err(Error::size_mismatch(x.len(), y.len(), "paired columns"));
    }

    Ok(x.iter()
        .zip(y)
        .filter_map(|pair| match pair {
            (Some(a), Some(b)) if a.is_finite() && b.is_finite() => Some((*a, *b)),
            _ => None,
        })
        .unzip())
}

/// Calculate Pearson correlation coefficient
pub fn pearson(x: &[f64], y: &[f64]) -> Result<f64> {
    if x.len() != y.len() {
        return Err(Error::size_mismatch(x.len(), y.len(), "pearson correlation"));
    }

    if x.len() < 2 {
        return Err(Error::insufficient(2, x.len()));
    }

    if is_constant(x) || is_constant(y) {
        return Err(Error::zero_variance("correlation input"));
    }

    let n = x.len() as f64;
    let mean_x = x.iter().sum::<f64>() / n;
    let mean_y = y.iter().sum::<f64>() / n;

    let mut numerator = 0.0;
    let mut sum_sq_x = 0.0;
    let mut sum_sq_y = 0.0;

    for (&xi, &yi) in x.iter().zip(y) {
        let dx = xi - mean_x;
        let dy = yi - mean_y;

        numerator += dx * dy;
        sum_sq_x += dx * dx;
        sum_sq_y += dy * dy;
    }

    let denominator = (sum_sq_x * sum_sq_y).sqrt();

    if denominator == 0.0 {
        return Err(Error::zero_variance("correlation input"));
    }

    Ok((numerator / denominator).clamp(-1.0, 1.0))
}

/// Two-sided p-value for a correlation of `r` over `n` observations
///
/// Uses the Student-t distribution with `n - 2` degrees of freedom.
pub fn two_sided_p_value(r: f64, n: usize) -> Result<f64> {
    if n < 2 {
        return Err(Error::insufficient(2, n));
    }
    if n == 2 {
        // Two points always lie on a line
        return Ok(1.0);
    }
    if r.abs() >= 1.0 {
        return Ok(0.0);
    }

    let df = (n - 2) as f64;
    let t = r * (df / (1.0 - r * r)).sqrt();
    let dist = StudentsT::new(0.0, 1.0, df).map_err(|e| Error::Computation(e.to_string()))?;

    Ok((2.0 * dist.cdf(-t.abs())).clamp(0.0, 1.0))
}

/// Result of a Pearson correlation test
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PearsonTest {
    pub coefficient: f64,
    pub p_value: f64,
    pub observations: usize,
}

impl PearsonTest {
    pub fn significance(&self) -> Significance {
        Significance::from_p_value(self.p_value)
    }
}

/// Correlation coefficient and two-sided p-value for paired data
pub fn pearson_test(x: &[f64], y: &[f64]) -> Result<PearsonTest> {
    let coefficient = pearson(x, y)?;
    let p_value = two_sided_p_value(coefficient, x.len())?;
    Ok(PearsonTest {
        coefficient,
        p_value,
        observations: x.len(),
    })
}

/// Square matrix of pairwise Pearson coefficients
///
/// Each pair uses the rows where both columns are present. The diagonal is
/// 1.0, or NaN for columns with fewer than two values or no variance; pairs
/// whose coefficient is undefined are NaN.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CorrelationMatrix {
    columns: Vec<String>,
    values: Vec<Vec<f64>>,
}

impl CorrelationMatrix {
    pub fn compute<S: AsRef<str>>(columns: &[(S, Vec<Option<f64>>)]) -> Self {
        let k = columns.len();
        let mut values = vec![vec![f64::NAN; k]; k];

        for i in 0..k {
            let own = present(&columns[i].1);
            let varies = own.len() >= 2 && !is_constant(&own);
            values[i][i] = if varies { 1.0 } else { f64::NAN };

            for j in (i + 1)..k {
                let r = paired_observations(&columns[i].1, &columns[j].1)
                    .and_then(|(x, y)| pearson(&x, &y))
                    .unwrap_or(f64::NAN);
                values[i][j] = r;
                values[j][i] = r;
            }
        }

        Self {
            columns: columns.iter().map(|(name, _)| name.as_ref().to_string()).collect(),
            values,
        }
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn values(&self) -> &[Vec<f64>] {
        &self.values
    }

    pub fn size(&self) -> usize {
        self.columns.len()
    }

    pub fn get(&self, i: usize, j: usize) -> Option<f64> {
        self.values.get(i).and_then(|row| row.get(j)).copied()
    }

    /// Coefficient between two named columns
    pub fn between(&self, a: &str, b: &str) -> Option<f64> {
        let i = self.columns.iter().position(|c| c == a)?;
        let j = self.columns.iter().position(|c| c == b)?;
        self.get(i, j)
    }

    pub fn into_parts(self) -> (Vec<String>, Vec<Vec<f64>>) {
        (self.columns, self.values)
    }
}
