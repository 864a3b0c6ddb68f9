//! Sobel gradient operator.
//!
//! Convolves the fixed 3x3 horizontal-derivative kernel and its transpose
//! (the vertical kernel) against a single intensity channel, then combines
//! the two half-gradients into per-pixel magnitude and direction.

use crate::convolve::{convolve, ConvolveOptions};
use crate::errors::Error;
use crate::kernel::Kernel;
use crate::raster::Raster;

const SOBEL_HORIZONTAL: [[f32; 3]; 3] = [[1.0, 0.0, -1.0], [2.0, 0.0, -2.0], [1.0, 0.0, -1.0]];

/// Paired same-shape rasters produced by a gradient operator.
#[derive(Clone, Debug)]
pub struct GradientField {
    /// Euclidean gradient magnitude per pixel, `sqrt(gx^2 + gy^2)`.
    pub magnitude: Raster,
    /// Gradient direction per pixel in radians, range (-pi, pi].
    pub direction: Raster,
}

/// Sobel operator holding the horizontal kernel and its transpose.
#[derive(Clone, Debug)]
pub struct Sobel {
    horizontal: Kernel,
    vertical: Kernel,
}

impl Sobel {
    pub fn new() -> Self {
        let horizontal = Kernel::from(SOBEL_HORIZONTAL);
        let vertical = horizontal.transposed();
        Self {
            horizontal,
            vertical,
        }
    }

    pub fn horizontal_kernel(&self) -> &Kernel {
        &self.horizontal
    }

    pub fn vertical_kernel(&self) -> &Kernel {
        &self.vertical
    }

    /// Compute the gradient field of `source`.
    ///
    /// Multi-channel sources are collapsed to one intensity channel first
    /// (unweighted channel average).
    pub fn run(&self, source: &Raster) -> Result<GradientField, Error> {
        let gray = if source.channels() > 1 {
            source.to_grayscale()
        } else {
            source.clone()
        };

        let opts = ConvolveOptions::default();
        let gx = convolve(&gray, &self.horizontal, &opts)?;
        let gy = convolve(&gray, &self.vertical, &opts)?;

        let mut magnitude = Raster::with_shape(gray.width(), gray.height(), 1);
        let mut direction = Raster::with_shape(gray.width(), gray.height(), 1);
        for i in 0..gray.height() {
            for j in 0..gray.width() {
                let dx = gx.get(i, j, 0);
                let dy = gy.get(i, j, 0);
                magnitude.set(i, j, 0, (dx * dx + dy * dy).sqrt());
                direction.set(i, j, 0, dy.atan2(dx));
            }
        }
        Ok(GradientField {
            magnitude,
            direction,
        })
    }
}

impl Default for Sobel {
    fn default() -> Self {
        Self::new()
    }
}
