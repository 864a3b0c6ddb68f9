//! K-Means clustering over an abstract sample collection.
//!
//! The engine is Lloyd-style: random distinct-valued centroid seeding, then
//! alternating nearest-centroid assignment and componentwise-mean updates
//! until neither the assignments nor the centroids have changed for more
//! than 2 consecutive iterations (exact floating-point comparison, no
//! epsilon), or the optional iteration cap is exceeded. Only the initial
//! centroid draw is randomized; everything after it is deterministic.

use crate::errors::Error;
use log::debug;
use rand::{Rng, SeedableRng};
use rand_xoshiro::Xoroshiro128PlusPlus;
use serde::Deserialize;

/// Upper bound on consecutive rejected centroid draws before initialization
/// reports starvation instead of spinning forever.
const MAX_REJECTED_DRAWS: usize = 10_000;

/// Anything K-Means can cluster: a fixed-length collection of fixed-dimension
/// numeric samples with indexed scalar access.
pub trait Samples {
    /// Number of samples.
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Dimensionality of every sample.
    fn dimensions(&self) -> usize;

    /// Value of sample `sample` in dimension `dimension`.
    fn value(&self, sample: usize, dimension: usize) -> f32;
}

#[derive(Clone, Copy, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct KMeansOptions {
    /// Number of clusters (>= 1).
    pub clusters: usize,
    /// Iteration cap; 0 leaves the run bounded only by the change-based
    /// stopping conditions.
    pub max_iterations: usize,
    /// Seed for the initial centroid draw; `None` seeds from entropy.
    pub seed: Option<u64>,
}

impl Default for KMeansOptions {
    fn default() -> Self {
        Self {
            clusters: 2,
            max_iterations: 0,
            seed: None,
        }
    }
}

/// Final clustering: one cluster index per sample plus the centroid of every
/// cluster. Never published mid-iteration.
#[derive(Clone, Debug)]
pub struct Clustering {
    /// Cluster index in `0..clusters` for each sample.
    pub assignments: Vec<usize>,
    /// Componentwise centroid coordinates, one row per cluster.
    pub centroids: Vec<Vec<f32>>,
    /// Number of iterations actually executed.
    pub iterations: usize,
}

/// K-Means engine with validated, immutable options.
#[derive(Clone, Debug)]
pub struct KMeans {
    opts: KMeansOptions,
}

impl KMeans {
    pub fn new(opts: KMeansOptions) -> Result<Self, Error> {
        if opts.clusters == 0 {
            return Err(Error::InvalidClusterCount { clusters: 0 });
        }
        Ok(Self { opts })
    }

    pub fn options(&self) -> &KMeansOptions {
        &self.opts
    }

    /// Cluster `samples` into the configured number of groups.
    pub fn run<S: Samples + ?Sized>(&self, samples: &S) -> Result<Clustering, Error> {
        let k = self.opts.clusters;
        let dims = samples.dimensions();
        if samples.len() < k {
            return Err(Error::CentroidInit {
                clusters: k,
                rejected_draws: 0,
            });
        }

        let mut centroids = self.initial_centroids(samples)?;
        let mut assignments = vec![0usize; samples.len()];
        let mut sums = vec![vec![0.0f32; dims]; k];
        let mut counts = vec![0usize; k];

        let mut iterations = 0usize;
        let mut centroids_static_for = 0usize;
        let mut clusters_static_for = 0usize;

        loop {
            // Assignment: nearest centroid by Euclidean distance; the scan
            // keeps the first strictly smaller distance, so ties resolve to
            // the lowest centroid index.
            let mut cluster_changed = false;
            for s in 0..samples.len() {
                let mut closest = 0usize;
                let mut closest_distance = f32::INFINITY;
                for (c, centroid) in centroids.iter().enumerate() {
                    let mut distance = 0.0f32;
                    for (d, &coord) in centroid.iter().enumerate() {
                        let diff = coord - samples.value(s, d);
                        distance += diff * diff;
                    }
                    let distance = distance.sqrt();
                    if distance < closest_distance {
                        closest_distance = distance;
                        closest = c;
                    }
                }
                if assignments[s] != closest {
                    cluster_changed = true;
                    assignments[s] = closest;
                }
            }
            if cluster_changed {
                clusters_static_for = 0;
            } else {
                clusters_static_for += 1;
            }

            // Update: componentwise mean of each cluster's members.
            for row in &mut sums {
                row.iter_mut().for_each(|v| *v = 0.0);
            }
            counts.iter_mut().for_each(|v| *v = 0);
            for s in 0..samples.len() {
                let c = assignments[s];
                counts[c] += 1;
                for d in 0..dims {
                    sums[c][d] += samples.value(s, d);
                }
            }

            let mut centroids_changed = false;
            for c in 0..k {
                if counts[c] == 0 {
                    return Err(Error::EmptyCluster { cluster: c });
                }
                for d in 0..dims {
                    let mean = sums[c][d] / counts[c] as f32;
                    if centroids[c][d] != mean {
                        centroids[c][d] = mean;
                        centroids_changed = true;
                    }
                }
            }
            if centroids_changed {
                centroids_static_for = 0;
            } else {
                centroids_static_for += 1;
            }

            iterations += 1;
            if centroids_static_for > 2
                || clusters_static_for > 2
                || (self.opts.max_iterations != 0 && iterations > self.opts.max_iterations)
            {
                break;
            }
        }

        debug!(
            "KMeans::run done k={} samples={} iterations={}",
            k,
            samples.len(),
            iterations
        );
        Ok(Clustering {
            assignments,
            centroids,
            iterations,
        })
    }

    /// Draw uniformly random sample indices until `clusters` distinct-valued
    /// centroids are collected. Distinctness is exact value equality across
    /// all dimensions; a duplicate draw is rejected and retried.
    fn initial_centroids<S: Samples + ?Sized>(&self, samples: &S) -> Result<Vec<Vec<f32>>, Error> {
        let k = self.opts.clusters;
        let dims = samples.dimensions();
        let seed = self.opts.seed.unwrap_or_else(rand::random);
        let mut rng = Xoroshiro128PlusPlus::seed_from_u64(seed);

        let mut centroids: Vec<Vec<f32>> = Vec::with_capacity(k);
        let mut rejected = 0usize;
        while centroids.len() < k {
            let idx = rng.gen_range(0..samples.len());
            let candidate: Vec<f32> = (0..dims).map(|d| samples.value(idx, d)).collect();
            if centroids.iter().any(|c| *c == candidate) {
                rejected += 1;
                if rejected >= MAX_REJECTED_DRAWS {
                    return Err(Error::CentroidInit {
                        clusters: k,
                        rejected_draws: rejected,
                    });
                }
            } else {
                centroids.push(candidate);
                rejected = 0;
            }
        }
        Ok(centroids)
    }
}
