//! Seeded k-means clustering
//!
//! k-means++ seeding followed by Lloyd iterations. The random source is a
//! `ChaCha8Rng` seeded from the configured seed, so identical input always
//! yields identical labels.

use insight_core::{Error, Result};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::Serialize;
use tracing::debug;

/// Seed used when none is given
pub const DEFAULT_SEED: u64 = 42;

/// k-means configuration
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct KMeans {
    k: usize,
    max_iterations: usize,
    tolerance: f64,
    seed: u64,
}

/// Fitted partition
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct KMeansFit {
    /// Cluster index in `0..k` for each input point
    pub labels: Vec<usize>,
    pub centroids: Vec<Vec<f64>>,
    pub cluster_sizes: Vec<usize>,
    /// Sum of squared distances to the assigned centroid
    pub inertia: f64,
    pub iterations: usize,
}

impl KMeans {
    pub fn new(k: usize) -> Self {
        Self {
            k,
            max_iterations: 300,
            tolerance: 1e-4,
            seed: DEFAULT_SEED,
        }
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    pub fn with_max_iterations(mut self, max_iterations: usize) -> Self {
        self.max_iterations = max_iterations.max(1);
        self
    }

    pub fn with_tolerance(mut self, tolerance: f64) -> Self {
        self.tolerance = tolerance;
        self
    }

    pub fn k(&self) -> usize {
        self.k
    }

    /// Partition `points` (one row per observation) into `k` clusters
    pub fn fit(&self, points: &[Vec<f64>]) -> Result<KMeansFit> {
        if self.k == 0 {
            return Err(Error::InvalidInput("k must be at least 1".to_string()));
        }
        if points.len() < self.k {
            return Err(Error::insufficient(self.k, points.len()));
        }

        let dim = points[0].len();
        if dim == 0 {
            return Err(Error::InvalidInput("points must have at least one dimension".to_string()));
        }
        if let Some(bad) = points.iter().find(|p| p.len() != dim) {
            return Err(Error::size_mismatch(dim, bad.len(), "point dimensions"));
        }
        if points.iter().flatten().any(|v| !v.is_finite()) {
            return Err(Error::InvalidInput("points contain NaN or infinite values".to_string()));
        }

        let mut rng = ChaCha8Rng::seed_from_u64(self.seed);
        let mut centroids = self.seed_centroids(points, &mut rng);
        let mut labels = vec![0usize; points.len()];
        let mut iterations = 0;

        for iteration in 1..=self.max_iterations {
            iterations = iteration;
            assign(points, &centroids, &mut labels);

            let updated = update_centroids(points, &labels, &centroids);
            let shift = centroids
                .iter()
                .zip(&updated)
                .map(|(old, new)| squared_distance(old, new).sqrt())
                .fold(0.0, f64::max);
            centroids = updated;

            if shift <= self.tolerance {
                break;
            }
        }

        // Labels must agree with the final centroids
        assign(points, &centroids, &mut labels);

        let mut cluster_sizes = vec![0usize; self.k];
        let mut inertia = 0.0;
        for (point, &label) in points.iter().zip(&labels) {
            cluster_sizes[label] += 1;
            inertia += squared_distance(point, &centroids[label]);
        }

        debug!(k = self.k, iterations, inertia, "k-means converged");

        Ok(KMeansFit {
            labels,
            centroids,
            cluster_sizes,
            inertia,
            iterations,
        })
    }

    /// k-means++: each new centroid is drawn with probability proportional to
    /// its squared distance from the nearest centroid already chosen.
    fn seed_centroids(&self, points: &[Vec<f64>], rng: &mut ChaCha8Rng) -> Vec<Vec<f64>> {
        let n = points.len();
        let first = rng.gen_range(0..n);
        let mut chosen = vec![first];
        let mut centroids = vec![points[first].clone()];
        let mut nearest: Vec<f64> = points
            .iter()
            .map(|p| squared_distance(p, &centroids[0]))
            .collect();

        while centroids.len() < self.k {
            let total: f64 = nearest.iter().sum();
            let next = if total > 0.0 {
                let mut target = rng.gen::<f64>() * total;
                let mut pick = nearest.iter().rposition(|&d| d > 0.0).unwrap_or(0);
                for (index, &d) in nearest.iter().enumerate() {
                    if d <= 0.0 {
                        continue;
                    }
                    if target < d {
                        pick = index;
                        break;
                    }
                    target -= d;
                }
                pick
            } else {
                // Every remaining point coincides with a chosen centroid
                let candidates: Vec<usize> = (0..n).filter(|i| !chosen.contains(i)).collect();
                candidates[rng.gen_range(0..candidates.len())]
            };

            chosen.push(next);
            centroids.push(points[next].clone());
            for (d, p) in nearest.iter_mut().zip(points) {
                *d = d.min(squared_distance(p, &points[next]));
            }
        }

        centroids
    }
}

fn squared_distance(a: &[f64], b: &[f64]) -> f64 {
    a.iter().zip(b).map(|(x, y)| (x - y) * (x - y)).sum()
}

fn nearest_centroid(point: &[f64], centroids: &[Vec<f64>]) -> usize {
    let mut best = 0;
    let mut best_distance = f64::INFINITY;
    for (index, centroid) in centroids.iter().enumerate() {
        let d = squared_distance(point, centroid);
        if d < best_distance {
            best = index;
            best_distance = d;
        }
    }
    best
}

fn assign(points: &[Vec<f64>], centroids: &[Vec<f64>], labels: &mut [usize]) {
    for (label, point) in labels.iter_mut().zip(points) {
        *label = nearest_centroid(point, centroids);
    }
}

/// Mean of each cluster; an empty cluster keeps its previous centroid
fn update_centroids(points: &[Vec<f64>], labels: &[usize], previous: &[Vec<f64>]) -> Vec<Vec<f64>> {
    let dim = previous[0].len();
    let mut sums = vec![vec![0.0; dim]; previous.len()];
    let mut counts = vec![0usize; previous.len()];

    for (point, &label) in points.iter().zip(labels) {
        counts[label] += 1;
        for (s, v) in sums[label].iter_mut().zip(point) {
            *s += v;
        }
    }

    sums.into_iter()
        .zip(counts)
        .zip(previous)
        .map(|((sum, count), old)| {
            if count == 0 {
                old.clone()
            } else {
                sum.into_iter().map(|s| s / count as f64).collect()
            }
        })
        .collect()
}
