//! Tukey fences for box-plot style outlier detection

use insight_core::{Error, Result};
use serde::Serialize;

use crate::descriptive::{quantile_sorted, sorted};

/// Fence distance from the quartiles, in interquartile ranges
pub const FENCE_MULTIPLIER: f64 = 1.5;

/// Quartiles, fences and the values falling outside them
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TukeyFences {
    pub observations: usize,
    pub q1: f64,
    pub median: f64,
    pub q3: f64,
    pub lower_fence: f64,
    pub upper_fence: f64,
    /// Smallest value inside the fences
    pub lower_whisker: f64,
    /// Largest value inside the fences
    pub upper_whisker: f64,
    pub outliers: Vec<f64>,
}

impl TukeyFences {
    pub fn compute(data: &[f64]) -> Result<Self> {
        if data.iter().any(|v| !v.is_finite()) {
            return Err(Error::InvalidInput("outlier input contains NaN or infinite values".to_string()));
        }

        let ordered = sorted(data);
        let (Some(q1), Some(median), Some(q3)) = (
            quantile_sorted(&ordered, 0.25),
            quantile_sorted(&ordered, 0.5),
            quantile_sorted(&ordered, 0.75),
        ) else {
            return Err(Error::insufficient(1, 0));
        };

        let iqr = q3 - q1;
        let lower_fence = q1 - FENCE_MULTIPLIER * iqr;
        let upper_fence = q3 + FENCE_MULTIPLIER * iqr;

        let inside = || ordered.iter().copied().filter(|&v| v >= lower_fence && v <= upper_fence);
        // The quartiles always lie inside the fences, so `inside` is never empty.
        let lower_whisker = inside().next().unwrap_or(q1);
        let upper_whisker = inside().last().unwrap_or(q3);

        let outliers = ordered
            .iter()
            .copied()
            .filter(|&v| v < lower_fence || v > upper_fence)
            .collect();

        Ok(Self {
            observations: ordered.len(),
            q1,
            median,
            q3,
            lower_fence,
            upper_fence,
            lower_whisker,
            upper_whisker,
            outliers,
        })
    }

    pub fn iqr(&self) -> f64 {
        self.q3 - self.q1
    }

    pub fn outlier_count(&self) -> usize {
        self.outliers.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_fences_flag_extreme_value() {
        let data = [1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0, 100.0];
        let fences = TukeyFences::compute(&data).unwrap();

        assert_abs_diff_eq!(fences.q1, 3.0, epsilon = 1e-12);
        assert_abs_diff_eq!(fences.median, 5.0, epsilon = 1e-12);
        assert_abs_diff_eq!(fences.q3, 7.0, epsilon = 1e-12);
        assert_abs_diff_eq!(fences.upper_fence, 13.0, epsilon = 1e-12);
        assert_abs_diff_eq!(fences.iqr(), 4.0, epsilon = 1e-12);
        assert_eq!(fences.outliers, vec![100.0]);
        assert_eq!(fences.upper_whisker, 8.0);
        assert_eq!(fences.lower_whisker, 1.0);
    }

    #[test]
    fn test_fences_without_outliers() {
        let fences = TukeyFences::compute(&[4.0, 1.0, 3.0, 2.0]).unwrap();
        assert_eq!(fences.outlier_count(), 0);
        assert_eq!(fences.observations, 4);
    }

    #[test]
    fn test_fences_empty_input() {
        let err = TukeyFences::compute(&[]).unwrap_err();
        assert!(err.is_insufficient_data());
    }

    #[test]
    fn test_fences_reject_non_finite() {
        assert!(TukeyFences::compute(&[1.0, f64::NAN]).is_err());
    }
}
