//! Descriptive statistics for single columns

use std::collections::HashMap;

use ordered_float::OrderedFloat;
use serde::Serialize;

/// Finite present values, in original order
pub fn present(values: &[Option<f64>]) -> Vec<f64> {
    values
        .iter()
        .flatten()
        .copied()
        .filter(|v| v.is_finite())
        .collect()
}

/// Arithmetic mean; `None` for empty input
pub fn mean(data: &[f64]) -> Option<f64> {
    if data.is_empty() {
        return None;
    }
    Some(data.iter().sum::<f64>() / data.len() as f64)
}

/// Sample standard deviation (n - 1 denominator); `None` below two values
pub fn sample_std(data: &[f64]) -> Option<f64> {
    if data.len() < 2 {
        return None;
    }
    let m = mean(data)?;
    let ss: f64 = data.iter().map(|&x| (x - m) * (x - m)).sum();
    Some((ss / (data.len() - 1) as f64).sqrt())
}

/// Whether `data` has no spread beyond floating-point rounding
///
/// A mean that is not exactly representable leaves residuals of order
/// `EPSILON * |x|` even for identical values, so the sum of squares is
/// compared against that scale rather than zero.
pub fn is_constant(data: &[f64]) -> bool {
    let Some(m) = mean(data) else {
        return true;
    };
    if data.iter().all(|&v| v == data[0]) {
        return true;
    }
    let scale = data.iter().fold(0.0f64, |acc, v| acc.max(v.abs()));
    let tolerance = 16.0 * f64::EPSILON * scale;
    let ss: f64 = data.iter().map(|&x| (x - m) * (x - m)).sum();
    ss <= data.len() as f64 * tolerance * tolerance
}

/// Ascending copy of `data`
pub fn sorted(data: &[f64]) -> Vec<f64> {
    let mut out = data.to_vec();
    out.sort_unstable_by_key(|&v| OrderedFloat(v));
    out
}

/// Quantile of sorted data with linear interpolation between order statistics
pub fn quantile_sorted(sorted: &[f64], p: f64) -> Option<f64> {
    if sorted.is_empty() || !(0.0..=1.0).contains(&p) {
        return None;
    }
    let h = (sorted.len() - 1) as f64 * p;
    let lo = h.floor() as usize;
    let hi = h.ceil() as usize;
    Some(sorted[lo] + (h - lo as f64) * (sorted[hi] - sorted[lo]))
}

/// Count, location and spread of a numeric column
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NumericDescription {
    pub count: usize,
    pub missing: usize,
    pub mean: Option<f64>,
    pub std: Option<f64>,
    pub min: Option<f64>,
    pub q25: Option<f64>,
    pub median: Option<f64>,
    pub q75: Option<f64>,
    pub max: Option<f64>,
}

impl NumericDescription {
    /// Describe a column; all-missing input yields a zero count and no statistics
    pub fn describe(values: &[Option<f64>]) -> Self {
        let data = present(values);
        let ordered = sorted(&data);

        Self {
            count: data.len(),
            missing: values.len() - data.len(),
            mean: mean(&data),
            std: sample_std(&data),
            min: ordered.first().copied(),
            q25: quantile_sorted(&ordered, 0.25),
            median: quantile_sorted(&ordered, 0.5),
            q75: quantile_sorted(&ordered, 0.75),
            max: ordered.last().copied(),
        }
    }
}

/// Frequency summary of a text or categorical column
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FrequencyDescription {
    pub count: usize,
    pub missing: usize,
    pub unique: usize,
    /// Most frequent value; ties go to the value seen first
    pub top: Option<String>,
    pub freq: usize,
}

impl FrequencyDescription {
    pub fn describe(values: &[Option<String>]) -> Self {
        let mut counts: HashMap<&str, (usize, usize)> = HashMap::new();
        let mut count = 0;
        for (position, value) in values.iter().flatten().enumerate() {
            count += 1;
            counts.entry(value.as_str()).or_insert((0, position)).0 += 1;
        }

        let top = counts
            .iter()
            .max_by(|a, b| a.1 .0.cmp(&b.1 .0).then(b.1 .1.cmp(&a.1 .1)))
            .map(|(value, &(freq, _))| (value.to_string(), freq));

        Self {
            count,
            missing: values.len() - count,
            unique: counts.len(),
            freq: top.as_ref().map_or(0, |t| t.1),
            top: top.map(|t| t.0),
        }
    }
}
