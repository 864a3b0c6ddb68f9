//! Gaussian blur kernel generation and application.
//!
//! The 2-D kernel is the outer product of a 1-D profile obtained by sampling
//! the zero-mean Gaussian pdf at `n` evenly spaced points across
//! `[-2 sigma, 2 sigma]` and normalizing the taps to sum 1. The kernel is
//! derived once per option set and cached; updating the options re-derives it
//! atomically (an invalid update leaves the previous state untouched).

use crate::convolve::{convolve, ConvolveOptions};
use crate::errors::Error;
use crate::kernel::Kernel;
use crate::raster::{Raster, RasterView};
use serde::Deserialize;

/// Gaussian blur parameters: kernel size `n` (odd, >= 3) and `sigma` (> 0).
#[derive(Clone, Copy, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct GaussianOptions {
    pub n: usize,
    pub sigma: f32,
}

impl Default for GaussianOptions {
    fn default() -> Self {
        Self { n: 5, sigma: 1.0 }
    }
}

impl GaussianOptions {
    fn validate(&self) -> Result<(), Error> {
        if self.n < 3 || self.n % 2 == 0 {
            return Err(Error::InvalidGaussianSize { n: self.n });
        }
        if !(self.sigma > 0.0) {
            return Err(Error::InvalidGaussianSigma { sigma: self.sigma });
        }
        Ok(())
    }
}

/// Zero-mean Gaussian pdf.
#[inline]
fn gaussian_pdf(x: f32, sigma: f32) -> f32 {
    let norm = 1.0 / (sigma * (2.0 * std::f32::consts::PI).sqrt());
    norm * (-0.5 * (x / sigma) * (x / sigma)).exp()
}

fn derive_kernel(opts: &GaussianOptions) -> Result<Kernel, Error> {
    let n = opts.n;
    let sigma = opts.sigma;

    let step = 4.0 * sigma / (n - 1) as f32;
    let mut taps: Vec<f32> = (0..n)
        .map(|i| gaussian_pdf(-2.0 * sigma + step * i as f32, sigma))
        .collect();
    let sum: f32 = taps.iter().sum();
    for t in &mut taps {
        *t /= sum;
    }

    let mut weights = Vec::with_capacity(n * n);
    for r in 0..n {
        for c in 0..n {
            weights.push(taps[r] * taps[c]);
        }
    }
    Kernel::from_flat(n, n, weights)
}

/// Gaussian blur filter with a cached, pre-normalized kernel.
#[derive(Clone, Debug)]
pub struct GaussianBlur {
    opts: GaussianOptions,
    kernel: Kernel,
}

impl GaussianBlur {
    /// Validate the options and derive the kernel.
    pub fn new(opts: GaussianOptions) -> Result<Self, Error> {
        opts.validate()?;
        let kernel = derive_kernel(&opts)?;
        Ok(Self { opts, kernel })
    }

    /// Replace the options, re-deriving the kernel. On error the previous
    /// options and kernel remain in effect.
    pub fn set_options(&mut self, opts: GaussianOptions) -> Result<(), Error> {
        opts.validate()?;
        self.kernel = derive_kernel(&opts)?;
        self.opts = opts;
        Ok(())
    }

    pub fn options(&self) -> &GaussianOptions {
        &self.opts
    }

    pub fn kernel(&self) -> &Kernel {
        &self.kernel
    }

    /// Blur the source into a fresh raster (zero-padded boundary, no extra
    /// normalization: the kernel weights already sum to 1).
    pub fn run<S: RasterView>(&self, source: &S) -> Result<Raster, Error> {
        convolve(source, &self.kernel, &ConvolveOptions::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kernel_weights_sum_to_one() {
        for (n, sigma) in [(3, 0.5), (5, 1.0), (7, 2.3), (9, 0.8)] {
            let blur = GaussianBlur::new(GaussianOptions { n, sigma }).unwrap();
            let sum = blur.kernel().weight_sum();
            assert!(
                (sum - 1.0).abs() < 1e-6,
                "kernel sum for n={n} sigma={sigma} was {sum}"
            );
        }
    }

    #[test]
    fn kernel_is_symmetric_and_peaks_at_center() {
        let blur = GaussianBlur::new(GaussianOptions { n: 5, sigma: 1.0 }).unwrap();
        let k = blur.kernel();
        let center = k.get(2, 2);
        for r in 0..5 {
            for c in 0..5 {
                assert!(k.get(r, c) <= center);
                assert!((k.get(r, c) - k.get(4 - r, 4 - c)).abs() < 1e-7);
            }
        }
    }

    #[test]
    fn invalid_options_fail_before_any_work() {
        assert_eq!(
            GaussianBlur::new(GaussianOptions { n: 4, sigma: 1.0 }).unwrap_err(),
            Error::InvalidGaussianSize { n: 4 }
        );
        assert_eq!(
            GaussianBlur::new(GaussianOptions { n: 1, sigma: 1.0 }).unwrap_err(),
            Error::InvalidGaussianSize { n: 1 }
        );
        assert_eq!(
            GaussianBlur::new(GaussianOptions { n: 5, sigma: 0.0 }).unwrap_err(),
            Error::InvalidGaussianSigma { sigma: 0.0 }
        );
    }

    #[test]
    fn rejected_update_keeps_previous_kernel() {
        let mut blur = GaussianBlur::new(GaussianOptions { n: 5, sigma: 1.0 }).unwrap();
        let before = blur.kernel().clone();
        assert!(blur
            .set_options(GaussianOptions { n: 6, sigma: 1.0 })
            .is_err());
        assert_eq!(blur.kernel(), &before);
        assert_eq!(blur.options().n, 5);
    }

    #[test]
    fn blur_preserves_a_uniform_image() {
        let source = Raster::filled(8, 8, 1, 50.0).unwrap();
        let blur = GaussianBlur::new(GaussianOptions::default()).unwrap();
        let out = blur.run(&source).unwrap();
        // Interior pixels see the full kernel footprint and stay unchanged.
        for i in 2..6 {
            for j in 2..6 {
                assert!((out.get(i, j, 0) - 50.0).abs() < 1e-3);
            }
        }
    }
}
