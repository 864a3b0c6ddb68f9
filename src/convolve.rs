//! Generic 2-D convolution over multi-channel rasters.
//!
//! For every output pixel `(i, j)` and channel `c` the engine accumulates
//! `source[i - (kRows-1)/2 + m, j - (kCols-1)/2 + n, c] * kernel[m, n]` over
//! all kernel offsets `(m, n)`. The output raster always matches the source
//! shape. This is the hottest loop in the crate
//! (O(width * height * kRows * kCols * channels)); it performs no per-pixel
//! allocation.
//!
//! Boundary handling is configurable: the default zero-padding policy reads
//! out-of-range samples as 0, while the pass-through policy copies source
//! pixels unchanged wherever the kernel footprint would leave the image.

use crate::errors::Error;
use crate::kernel::Kernel;
use crate::raster::{Raster, RasterView};

/// Policy for samples outside the source extents.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Boundary {
    /// Out-of-range samples contribute 0 (default).
    #[default]
    Zero,
    /// Border pixels whose kernel footprint leaves the image are copied from
    /// the source unchanged instead of being convolved.
    Passthrough,
}

/// Post-accumulation normalization of the weighted sum.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Normalization {
    /// Divisor for the raw sum; `None` uses the kernel weight sum. Kernels
    /// with a zero weight sum need an explicit divisor.
    pub divisor: Option<f32>,
    /// Additional scale applied after division.
    pub factor: f32,
}

impl Default for Normalization {
    fn default() -> Self {
        Self {
            divisor: None,
            factor: 1.0,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ConvolveOptions {
    pub boundary: Boundary,
    /// `None` leaves raw weighted sums untouched.
    pub normalization: Option<Normalization>,
    /// Number of passes; each pass consumes the previous pass's output.
    /// 0 is rejected; `default()` uses 1.
    pub repeat: usize,
}

impl Default for ConvolveOptions {
    fn default() -> Self {
        Self::new()
    }
}

impl ConvolveOptions {
    pub fn new() -> Self {
        Self {
            boundary: Boundary::Zero,
            normalization: None,
            repeat: 1,
        }
    }

    pub fn with_boundary(mut self, boundary: Boundary) -> Self {
        self.boundary = boundary;
        self
    }

    pub fn with_normalization(mut self, normalization: Normalization) -> Self {
        self.normalization = Some(normalization);
        self
    }

    pub fn with_repeat(mut self, repeat: usize) -> Self {
        self.repeat = repeat;
        self
    }
}

/// Convolve `source` with `kernel`, producing a same-shape raster.
///
/// The kernel must have odd dimensions (center alignment); even kernels and a
/// zero repeat count are configuration errors raised before any pixel work.
pub fn convolve<S: RasterView>(
    source: &S,
    kernel: &Kernel,
    opts: &ConvolveOptions,
) -> Result<Raster, Error> {
    if !kernel.is_odd() {
        return Err(Error::EvenKernel {
            rows: kernel.rows(),
            cols: kernel.cols(),
        });
    }
    if opts.repeat == 0 {
        return Err(Error::ZeroRepeat);
    }

    let mut out = convolve_pass(source, kernel, opts);
    for _ in 1..opts.repeat {
        let prev = out;
        out = convolve_pass(&prev, kernel, opts);
    }
    Ok(out)
}

fn convolve_pass<S: RasterView>(source: &S, kernel: &Kernel, opts: &ConvolveOptions) -> Raster {
    let (width, height, channels) = source.shape();
    let mut out = Raster::with_shape(width, height, channels);
    if width == 0 || height == 0 {
        return out;
    }

    let half_r = (kernel.rows() - 1) / 2;
    let half_c = (kernel.cols() - 1) / 2;
    let scale = opts.normalization.map(|n| {
        let divisor = n.divisor.unwrap_or_else(|| kernel.weight_sum());
        (divisor, n.factor)
    });

    for i in 0..height {
        for j in 0..width {
            let clipped = i < half_r || j < half_c || i + half_r >= height || j + half_c >= width;
            if clipped && opts.boundary == Boundary::Passthrough {
                for c in 0..channels {
                    out.set(i, j, c, source.get(i, j, c));
                }
                continue;
            }

            for c in 0..channels {
                let mut acc = 0.0f32;
                for m in 0..kernel.rows() {
                    let si = i as isize + m as isize - half_r as isize;
                    if si < 0 || si >= height as isize {
                        continue;
                    }
                    for n in 0..kernel.cols() {
                        let sj = j as isize + n as isize - half_c as isize;
                        if sj < 0 || sj >= width as isize {
                            continue;
                        }
                        acc += source.get(si as usize, sj as usize, c) * kernel.get(m, n);
                    }
                }
                if let Some((divisor, factor)) = scale {
                    acc = acc / divisor * factor;
                }
                out.set(i, j, c, acc);
            }
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raster_3x3() -> Raster {
        Raster::from_samples(
            3,
            3,
            1,
            vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0, 9.0],
        )
        .unwrap()
    }

    #[test]
    fn identity_kernel_preserves_pixels() {
        let source = raster_3x3();
        let identity = Kernel::from([[1.0]]);
        let out = convolve(&source, &identity, &ConvolveOptions::default()).unwrap();
        assert_eq!(out, source);
    }

    #[test]
    fn even_kernels_are_rejected() {
        let source = raster_3x3();
        let kernel = Kernel::from([[1.0, 1.0], [1.0, 1.0]]);
        let err = convolve(&source, &kernel, &ConvolveOptions::default()).unwrap_err();
        assert_eq!(err, Error::EvenKernel { rows: 2, cols: 2 });
    }

    #[test]
    fn zero_padding_shrinks_border_sums() {
        let source = Raster::filled(3, 3, 1, 1.0).unwrap();
        let kernel = Kernel::from([[1.0, 1.0, 1.0], [1.0, 1.0, 1.0], [1.0, 1.0, 1.0]]);
        let out = convolve(&source, &kernel, &ConvolveOptions::default()).unwrap();
        // Center sees the full 3x3 footprint, corners only 2x2.
        assert_eq!(out.get(1, 1, 0), 9.0);
        assert_eq!(out.get(0, 0, 0), 4.0);
        assert_eq!(out.get(0, 1, 0), 6.0);
    }

    #[test]
    fn passthrough_copies_clipped_pixels() {
        let source = raster_3x3();
        let kernel = Kernel::from([[1.0, 1.0, 1.0], [1.0, 1.0, 1.0], [1.0, 1.0, 1.0]]);
        let opts = ConvolveOptions::new().with_boundary(Boundary::Passthrough);
        let out = convolve(&source, &kernel, &opts).unwrap();
        // Only the center pixel has a full footprint.
        assert_eq!(out.get(1, 1, 0), 45.0);
        assert_eq!(out.get(0, 0, 0), 1.0);
        assert_eq!(out.get(2, 1, 0), 8.0);
    }

    #[test]
    fn normalization_divides_by_weight_sum_and_scales() {
        let source = Raster::filled(3, 3, 1, 6.0).unwrap();
        let kernel = Kernel::from([[1.0, 1.0, 1.0], [1.0, 1.0, 1.0], [1.0, 1.0, 1.0]]);
        let opts = ConvolveOptions::new().with_normalization(Normalization {
            divisor: None,
            factor: 2.0,
        });
        let out = convolve(&source, &kernel, &opts).unwrap();
        assert!((out.get(1, 1, 0) - 12.0).abs() < 1e-5);
    }

    #[test]
    fn repeat_feeds_each_pass_the_previous_output() {
        let source = raster_3x3();
        let identity = Kernel::from([[2.0]]);
        let opts = ConvolveOptions::new().with_repeat(3);
        let out = convolve(&source, &identity, &opts).unwrap();
        assert_eq!(out.get(0, 0, 0), 8.0);
        assert_eq!(out.get(2, 2, 0), 72.0);
    }

    #[test]
    fn zero_repeat_is_rejected() {
        let source = raster_3x3();
        let identity = Kernel::from([[1.0]]);
        let opts = ConvolveOptions::new().with_repeat(0);
        let err = convolve(&source, &identity, &opts).unwrap_err();
        assert_eq!(err, Error::ZeroRepeat);
    }

    #[test]
    fn channels_are_convolved_independently() {
        let source = Raster::from_samples(2, 1, 2, vec![1.0, 10.0, 2.0, 20.0]).unwrap();
        let kernel = Kernel::from([[1.0, 1.0, 1.0]]);
        let out = convolve(&source, &kernel, &ConvolveOptions::default()).unwrap();
        assert_eq!(out.get(0, 0, 0), 3.0);
        assert_eq!(out.get(0, 0, 1), 30.0);
        assert_eq!(out.get(0, 1, 0), 3.0);
        assert_eq!(out.get(0, 1, 1), 30.0);
    }
}
