//! # Cluster Engine
//! Seeded k-means over one-dimensional mood features.
//!
//! ## Algorithm
//! 1. k-means++ seeding drawn from a `ChaCha8Rng` built from the configured seed
//! 2. Lloyd iterations: assign to nearest centroid, recompute means
//! 3. Stop when no centroid moves more than `tolerance`, or at `max_iterations`
//! 4. Repeat `n_init` times, keep the run with the lowest inertia
//!
//! The whole fit is a pure function of `(points, config)`: one RNG stream per
//! fit, seeded fresh each call, so identical inputs give identical labels.
//! ChaCha8 is used instead of `StdRng` because its output stream is fixed
//! across rand releases and platforms; `StdRng` makes no such promise.
//!
//! ## Degenerate input
//! With fewer distinct points than `k`, surplus centroids duplicate existing
//! points and ties resolve to the lowest centroid index. A single observation
//! therefore always lands in cluster 0. The raw index is *not* remapped onto
//! the Negative/Neutral/Positive ordering; callers get the algorithm's index.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::decision::{ClusterLabel, Reason, ReasonKind};
use crate::features::FeatureSummary;

pub const DEFAULT_SEED: u64 = 42;
pub const DEFAULT_N_INIT: usize = 10;
pub const DEFAULT_MAX_ITERATIONS: usize = 300;
pub const DEFAULT_TOLERANCE: f64 = 1e-4;

/// Tunables for the clustering path. `k` is pinned to the label domain and is
/// not part of this struct.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClusterSettings {
    pub seed: u64,
    pub n_init: usize,
    pub max_iterations: usize,
    pub tolerance: f64,
}

impl Default for ClusterSettings {
    fn default() -> Self {
        Self {
            seed: DEFAULT_SEED,
            n_init: DEFAULT_N_INIT,
            max_iterations: DEFAULT_MAX_ITERATIONS,
            tolerance: DEFAULT_TOLERANCE,
        }
    }
}

/// Result of one k-means fit.
#[derive(Debug, Clone, PartialEq)]
pub struct KMeansFit {
    /// Cluster index per input point.
    pub labels: Vec<usize>,
    pub centroids: Vec<f64>,
    /// Sum of squared distances to the assigned centroid.
    pub inertia: f64,
    /// Lloyd iterations of the winning run.
    pub iterations: usize,
}

impl KMeansFit {
    fn empty() -> Self {
        Self {
            labels: Vec::new(),
            centroids: Vec::new(),
            inertia: 0.0,
            iterations: 0,
        }
    }

    /// Nearest centroid for a new observation (lowest index on ties).
    pub fn predict(&self, x: f64) -> usize {
        nearest(x, &self.centroids).0
    }
}

#[derive(Debug, Clone, Copy)]
pub struct KMeans {
    k: usize,
    settings: ClusterSettings,
}

impl KMeans {
    pub fn new(k: usize, settings: ClusterSettings) -> Self {
        Self {
            k: k.max(1),
            settings,
        }
    }

    pub fn k(&self) -> usize {
        self.k
    }

    pub fn fit(&self, points: &[f64]) -> KMeansFit {
        if points.is_empty() {
            return KMeansFit::empty();
        }

        let mut rng = ChaCha8Rng::seed_from_u64(self.settings.seed);
        let mut best: Option<KMeansFit> = None;

        for run in 0..self.settings.n_init.max(1) {
            let seeds = kmeans_plus_plus(points, self.k, &mut rng);
            let fit = self.lloyd(points, seeds);
            trace!(run, inertia = fit.inertia, iterations = fit.iterations, "kmeans run");

            // strict `<`: ties keep the earliest run
            if best.as_ref().map_or(true, |b| fit.inertia < b.inertia) {
                best = Some(fit);
            }
        }

        best.unwrap_or_else(KMeansFit::empty)
    }

    fn lloyd(&self, points: &[f64], mut centroids: Vec<f64>) -> KMeansFit {
        let mut labels = vec![0usize; points.len()];
        let mut iterations = 0;

        for iter in 0..self.settings.max_iterations.max(1) {
            iterations = iter + 1;

            for (label, &x) in labels.iter_mut().zip(points) {
                *label = nearest(x, &centroids).0;
            }

            let updated = recompute_centroids(points, &labels, &centroids);
            let shift = centroids
                .iter()
                .zip(&updated)
                .map(|(old, new)| (old - new).abs())
                .fold(0.0f64, f64::max);
            centroids = updated;

            if shift <= self.settings.tolerance {
                break;
            }
        }

        // final assignment against the settled centroids
        let mut inertia = 0.0;
        for (label, &x) in labels.iter_mut().zip(points) {
            let (idx, d2) = nearest(x, &centroids);
            *label = idx;
            inertia += d2;
        }

        KMeansFit {
            labels,
            centroids,
            inertia,
            iterations,
        }
    }
}

/// k-means++ seeding: first centroid uniform, then proportional to D².
/// When every point already coincides with a centroid, draws uniformly.
fn kmeans_plus_plus(points: &[f64], k: usize, rng: &mut ChaCha8Rng) -> Vec<f64> {
    let n = points.len();
    let mut centroids = Vec::with_capacity(k);
    centroids.push(points[rng.random_range(0..n)]);

    let mut min_d2: Vec<f64> = points.iter().map(|&x| sq(x - centroids[0])).collect();

    while centroids.len() < k {
        let total: f64 = min_d2.iter().sum();
        let next = if total > 0.0 && total.is_finite() {
            let target = rng.random::<f64>() * total;
            let mut acc = 0.0;
            let mut pick = n - 1;
            for (i, &d) in min_d2.iter().enumerate() {
                acc += d;
                if acc > target {
                    pick = i;
                    break;
                }
            }
            points[pick]
        } else {
            points[rng.random_range(0..n)]
        };

        centroids.push(next);
        for (d, &x) in min_d2.iter_mut().zip(points) {
            *d = d.min(sq(x - next));
        }
    }

    centroids
}

/// Mean of each cluster's members; empty clusters keep their previous centroid.
fn recompute_centroids(points: &[f64], labels: &[usize], previous: &[f64]) -> Vec<f64> {
    let k = previous.len();
    let mut sums = vec![0.0f64; k];
    let mut counts = vec![0usize; k];

    for (&x, &l) in points.iter().zip(labels) {
        sums[l] += x;
        counts[l] += 1;
    }

    sums.into_iter()
        .zip(counts)
        .zip(previous)
        .map(|((sum, count), &prev)| if count > 0 { sum / count as f64 } else { prev })
        .collect()
}

/// `(index, squared distance)` of the closest centroid; lowest index wins ties.
fn nearest(x: f64, centroids: &[f64]) -> (usize, f64) {
    let mut best = (0usize, f64::INFINITY);
    for (j, &c) in centroids.iter().enumerate() {
        let d2 = sq(x - c);
        if d2 < best.1 {
            best = (j, d2);
        }
    }
    if best.1.is_infinite() {
        best.1 = 0.0;
    }
    best
}

#[inline]
fn sq(x: f64) -> f64 {
    x * x
}

/// Clustering classifier used once the size gate lets a batch through.
#[derive(Debug, Clone, Copy)]
pub struct ClusterEngine {
    kmeans: KMeans,
}

impl Default for ClusterEngine {
    fn default() -> Self {
        Self::new(ClusterSettings::default())
    }
}

impl ClusterEngine {
    pub fn new(settings: ClusterSettings) -> Self {
        Self {
            kmeans: KMeans::new(ClusterLabel::COUNT, settings),
        }
    }

    pub fn classify(&self, features: &FeatureSummary) -> ClusterLabel {
        self.classify_explained(features).0
    }

    pub fn classify_explained(&self, features: &FeatureSummary) -> (ClusterLabel, Reason) {
        let fit = self.kmeans.fit(&features.as_vector());
        let idx = fit.labels.first().copied().unwrap_or(0);
        // k equals the label count, so any index the fit produces is in range
        let label = ClusterLabel::from_index(idx).unwrap_or(ClusterLabel::Neutral);

        let reason = Reason::new(format!(
            "k-means (k={}) assigned average mood {:.2} to cluster {} after {} iteration(s)",
            self.kmeans.k(),
            features.average_mood,
            idx,
            fit.iterations
        ))
        .kind(ReasonKind::Cluster);

        (label, reason)
    }
}
