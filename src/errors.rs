//! Typed errors for the toolkit.
//!
//! Two families: configuration errors (bad kernel geometry, invalid filter
//! options, mismatched pixel buffers) are raised at construction time before
//! any pixel is touched, and computation errors (centroid starvation, empty
//! clusters) surface mid-run without publishing partial results.

use std::error::Error as StdError;
use std::fmt;

/// Errors raised by raster construction, filter configuration and clustering.
#[derive(Clone, Debug, PartialEq)]
pub enum Error {
    /// Kernel constructed with zero rows or zero columns.
    EmptyKernel,
    /// Kernel rows have inconsistent lengths.
    RaggedKernel { row: usize, expected: usize, actual: usize },
    /// Convolution requires odd kernel dimensions for center alignment.
    EvenKernel { rows: usize, cols: usize },
    /// Flat sample buffer does not match `width * height * channels`.
    SampleCountMismatch { expected: usize, actual: usize },
    /// Rasters carry at least one channel.
    ZeroChannels,
    /// Channel expansion is only defined for single-channel rasters.
    AlreadyMultiChannel { channels: usize },
    /// Convolution repeat count must be at least 1.
    ZeroRepeat,
    /// Gaussian kernel size must be odd and at least 3.
    InvalidGaussianSize { n: usize },
    /// Gaussian sigma must be strictly positive.
    InvalidGaussianSigma { sigma: f32 },
    /// Canny threshold ratios must satisfy `0 < low < high < 1`.
    InvalidThresholdRatios { low: f32, high: f32 },
    /// Cluster count must be at least 1.
    InvalidClusterCount { clusters: usize },
    /// Could not collect enough distinct-valued centroids from the samples.
    CentroidInit { clusters: usize, rejected_draws: usize },
    /// A cluster finished an iteration with no assigned samples.
    EmptyCluster { cluster: usize },
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Error::EmptyKernel => write!(f, "kernel must have at least one row and one column"),
            Error::RaggedKernel { row, expected, actual } => write!(
                f,
                "kernel row {row} has {actual} weights, expected {expected}"
            ),
            Error::EvenKernel { rows, cols } => write!(
                f,
                "convolution requires odd kernel dimensions, got {rows}x{cols}"
            ),
            Error::SampleCountMismatch { expected, actual } => write!(
                f,
                "sample buffer holds {actual} values, expected {expected} for the declared shape"
            ),
            Error::ZeroChannels => write!(f, "raster channel count must be at least 1"),
            Error::AlreadyMultiChannel { channels } => write!(
                f,
                "cannot expand channels of a raster that already has {channels} channels"
            ),
            Error::ZeroRepeat => write!(f, "convolution repeat count must be at least 1"),
            Error::InvalidGaussianSize { n } => {
                write!(f, "gaussian kernel size must be odd and >= 3, got {n}")
            }
            Error::InvalidGaussianSigma { sigma } => {
                write!(f, "gaussian sigma must be > 0, got {sigma}")
            }
            Error::InvalidThresholdRatios { low, high } => write!(
                f,
                "threshold ratios must satisfy 0 < low < high < 1, got low={low} high={high}"
            ),
            Error::InvalidClusterCount { clusters } => {
                write!(f, "cluster count must be at least 1, got {clusters}")
            }
            Error::CentroidInit { clusters, rejected_draws } => write!(
                f,
                "could not draw {clusters} distinct centroids ({rejected_draws} consecutive draws rejected)"
            ),
            Error::EmptyCluster { cluster } => {
                write!(f, "cluster {cluster} has no assigned samples")
            }
        }
    }
}

impl StdError for Error {}
