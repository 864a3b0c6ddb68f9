//! K-Means segmentation of raster pixels.
//!
//! Exposes a raster's pixel buffer as clustering samples (one sample per
//! pixel, one dimension per channel) and repaints each pixel from the
//! resulting clustering: either with its cluster's centroid color
//! (quantization) or with a fixed caller palette indexed by cluster id
//! (posterization). Intensity-mode runs collapse to grayscale first and
//! expand the result back to 3 channels so a visible color image comes out.

use crate::errors::Error;
use crate::kmeans::{KMeans, KMeansOptions, Samples};
use crate::raster::Raster;
use log::debug;
use serde::Deserialize;

/// Iteration cap used for segmentation runs.
const SEGMENTATION_MAX_ITERATIONS: usize = 50;

/// Adapter presenting a raster's pixels as K-Means samples.
pub struct RasterSamples<'a> {
    raster: &'a Raster,
}

impl<'a> RasterSamples<'a> {
    pub fn new(raster: &'a Raster) -> Self {
        Self { raster }
    }
}

impl Samples for RasterSamples<'_> {
    fn len(&self) -> usize {
        self.raster.width() * self.raster.height()
    }

    fn dimensions(&self) -> usize {
        self.raster.channels()
    }

    fn value(&self, sample: usize, dimension: usize) -> f32 {
        self.raster.samples()[sample * self.raster.channels() + dimension]
    }
}

/// How clusters map to output colors.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum ClusterColors {
    /// Cluster count; output colors are the cluster centroids (quantization).
    Derived(usize),
    /// Explicit RGB triple per cluster; the palette length sets the cluster
    /// count (posterization).
    Fixed(Vec<[f32; 3]>),
}

impl ClusterColors {
    fn cluster_count(&self) -> usize {
        match self {
            ClusterColors::Derived(count) => *count,
            ClusterColors::Fixed(palette) => palette.len(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct SegmentationOptions {
    /// Cluster count or explicit output palette.
    pub colors: ClusterColors,
    /// Cluster on intensity (grayscale) instead of per-channel color values.
    pub by_intensity: bool,
    /// Seed for the clustering's initial centroid draw.
    pub seed: Option<u64>,
}

impl Default for SegmentationOptions {
    fn default() -> Self {
        Self {
            colors: ClusterColors::Derived(3),
            by_intensity: false,
            seed: None,
        }
    }
}

/// Color segmentation / quantization built on the K-Means engine.
#[derive(Clone, Debug)]
pub struct KMeansSegmentation {
    opts: SegmentationOptions,
    kmeans: KMeans,
}

impl KMeansSegmentation {
    /// Validate the options and prepare the clustering engine.
    pub fn new(opts: SegmentationOptions) -> Result<Self, Error> {
        let clusters = opts.colors.cluster_count();
        let kmeans = KMeans::new(KMeansOptions {
            clusters,
            max_iterations: SEGMENTATION_MAX_ITERATIONS,
            seed: opts.seed,
        })?;
        Ok(Self { opts, kmeans })
    }

    pub fn options(&self) -> &SegmentationOptions {
        &self.opts
    }

    /// Segment the source, returning a freshly painted raster.
    ///
    /// The source is not mutated. Intensity-mode output always has 3
    /// channels; color-mode output keeps the source channel count.
    pub fn run(&self, source: &Raster) -> Result<Raster, Error> {
        let working = if self.opts.by_intensity {
            source.to_grayscale()
        } else {
            source.clone()
        };
        let dims = working.channels();

        let clustering = self.kmeans.run(&RasterSamples::new(&working))?;
        debug!(
            "KMeansSegmentation::run clusters={} iterations={}",
            clustering.centroids.len(),
            clustering.iterations
        );

        let mut result = if self.opts.by_intensity {
            working.to_multi_channel(3)?
        } else {
            working
        };

        let channels = result.channels();
        let pixels = result.width() * result.height();
        let data = result.samples_mut();
        match &self.opts.colors {
            ClusterColors::Derived(_) => {
                for i in 0..pixels {
                    let centroid = &clustering.centroids[clustering.assignments[i]];
                    for c in 0..channels {
                        let d = if self.opts.by_intensity { 0 } else { c.min(dims - 1) };
                        data[i * channels + c] = centroid[d];
                    }
                }
            }
            ClusterColors::Fixed(palette) => {
                for i in 0..pixels {
                    let color = &palette[clustering.assignments[i]];
                    for c in 0..channels {
                        data[i * channels + c] = color[c.min(2)];
                    }
                }
            }
        }
        Ok(result)
    }
}
