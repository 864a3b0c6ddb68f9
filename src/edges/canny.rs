//! Canny detector driving the smooth -> gradient -> suppression -> linking
//! pipeline end-to-end.
//!
//! Typical usage:
//! ```no_run
//! use pixelkit::edges::{Canny, CannyOptions};
//! use pixelkit::raster::Raster;
//!
//! # fn example(image: Raster) -> Result<(), pixelkit::Error> {
//! let canny = Canny::new(CannyOptions::default())?;
//! let edges = canny.run(&image)?;
//! # Ok(())
//! # }
//! ```

use super::nms::suppress_non_maxima;
use super::threshold::{apply_double_threshold, hysteresis};
use crate::errors::Error;
use crate::filters::{GaussianBlur, GaussianOptions, Sobel};
use crate::raster::Raster;
use log::debug;
use serde::{Deserialize, Serialize};
use std::time::Instant;

/// Canny configuration: threshold ratios plus the smoothing parameters.
#[derive(Clone, Copy, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct CannyOptions {
    /// Fraction of the high threshold marking the weak/non-edge boundary.
    pub low_threshold_ratio: f32,
    /// Fraction of the peak suppressed magnitude marking definite edges.
    pub high_threshold_ratio: f32,
    /// Smoothing stage parameters.
    pub gaussian: GaussianOptions,
}

impl Default for CannyOptions {
    fn default() -> Self {
        Self {
            low_threshold_ratio: 0.05,
            high_threshold_ratio: 0.09,
            gaussian: GaussianOptions::default(),
        }
    }
}

impl CannyOptions {
    fn validate(&self) -> Result<(), Error> {
        let low = self.low_threshold_ratio;
        let high = self.high_threshold_ratio;
        if !(low > 0.0 && low < 1.0 && high > 0.0 && high < 1.0 && low < high) {
            return Err(Error::InvalidThresholdRatios { low, high });
        }
        Ok(())
    }
}

/// Per-stage diagnostics of a single detector run.
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CannyTrace {
    pub width: usize,
    pub height: usize,
    pub smooth_ms: f64,
    pub gradient_ms: f64,
    pub suppression_ms: f64,
    pub threshold_ms: f64,
    pub total_ms: f64,
    /// Absolute thresholds derived from the configured ratios.
    pub low_threshold: f32,
    pub high_threshold: f32,
    pub edge_pixels: usize,
}

/// Canny edge detector with validated, immutable configuration.
#[derive(Clone, Debug)]
pub struct Canny {
    opts: CannyOptions,
    blur: GaussianBlur,
    sobel: Sobel,
}

impl Canny {
    /// Validate the options and prepare the stage filters.
    pub fn new(opts: CannyOptions) -> Result<Self, Error> {
        opts.validate()?;
        let blur = GaussianBlur::new(opts.gaussian)?;
        Ok(Self {
            opts,
            blur,
            sobel: Sobel::new(),
        })
    }

    pub fn options(&self) -> &CannyOptions {
        &self.opts
    }

    /// Detect edges, returning a single-channel raster with values in
    /// {0, 255}.
    pub fn run(&self, source: &Raster) -> Result<Raster, Error> {
        self.run_with_trace(source).map(|(edges, _)| edges)
    }

    /// Detect edges and report per-stage diagnostics.
    pub fn run_with_trace(&self, source: &Raster) -> Result<(Raster, CannyTrace), Error> {
        let total_start = Instant::now();
        debug!(
            "Canny::run start w={} h={} channels={}",
            source.width(),
            source.height(),
            source.channels()
        );

        let gray = if source.channels() > 1 {
            source.to_grayscale()
        } else {
            source.clone()
        };

        let smooth_start = Instant::now();
        let smoothed = self.blur.run(&gray)?;
        let smooth_ms = smooth_start.elapsed().as_secs_f64() * 1000.0;

        let gradient_start = Instant::now();
        let gradient = self.sobel.run(&smoothed)?;
        let gradient_ms = gradient_start.elapsed().as_secs_f64() * 1000.0;

        let nms_start = Instant::now();
        let suppressed = suppress_non_maxima(&gradient);
        let suppression_ms = nms_start.elapsed().as_secs_f64() * 1000.0;

        let threshold_start = Instant::now();
        let outcome = apply_double_threshold(
            &suppressed,
            self.opts.low_threshold_ratio,
            self.opts.high_threshold_ratio,
        );
        let edges = hysteresis(&outcome.classified);
        let threshold_ms = threshold_start.elapsed().as_secs_f64() * 1000.0;

        let edge_pixels = edges.samples().iter().filter(|&&v| v > 0.0).count();
        let trace = CannyTrace {
            width: source.width(),
            height: source.height(),
            smooth_ms,
            gradient_ms,
            suppression_ms,
            threshold_ms,
            total_ms: total_start.elapsed().as_secs_f64() * 1000.0,
            low_threshold: outcome.low,
            high_threshold: outcome.high,
            edge_pixels,
        };
        debug!(
            "Canny::run done edge_pixels={} low={:.3} high={:.3} total_ms={:.3}",
            trace.edge_pixels, trace.low_threshold, trace.high_threshold, trace.total_ms
        );
        Ok((edges, trace))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn threshold_ratio_order_is_enforced() {
        let err = Canny::new(CannyOptions {
            low_threshold_ratio: 0.5,
            high_threshold_ratio: 0.2,
            gaussian: GaussianOptions::default(),
        })
        .unwrap_err();
        assert_eq!(
            err,
            Error::InvalidThresholdRatios {
                low: 0.5,
                high: 0.2
            }
        );

        assert!(Canny::new(CannyOptions {
            low_threshold_ratio: 0.0,
            high_threshold_ratio: 0.5,
            gaussian: GaussianOptions::default(),
        })
        .is_err());
        assert!(Canny::new(CannyOptions {
            low_threshold_ratio: 0.2,
            high_threshold_ratio: 1.0,
            gaussian: GaussianOptions::default(),
        })
        .is_err());
    }

    #[test]
    fn invalid_gaussian_options_fail_at_construction() {
        let err = Canny::new(CannyOptions {
            gaussian: GaussianOptions { n: 4, sigma: 1.0 },
            ..CannyOptions::default()
        })
        .unwrap_err();
        assert_eq!(err, Error::InvalidGaussianSize { n: 4 });
    }

    #[test]
    fn output_values_are_binary() {
        let mut source = Raster::with_shape(16, 16, 1);
        for i in 0..16 {
            for j in 8..16 {
                source.set(i, j, 0, 255.0);
            }
        }
        let canny = Canny::new(CannyOptions {
            low_threshold_ratio: 0.2,
            high_threshold_ratio: 0.5,
            ..CannyOptions::default()
        })
        .unwrap();
        let (edges, trace) = canny.run_with_trace(&source).unwrap();

        assert!(edges.samples().iter().all(|&v| v == 0.0 || v == 255.0));
        assert!(trace.edge_pixels > 0);
        assert_eq!(trace.width, 16);
    }
}
