//! Owned multi-channel f32 raster in row-major, channel-interleaved layout.
//!
//! The single canonical pixel container for every algorithm in the crate.
//! Invariant: `data.len() == width * height * channels` with `channels >= 1`,
//! enforced at construction. Filters never write into their input; each stage
//! allocates a fresh output raster.

use crate::errors::Error;
use crate::raster::traits::{RasterView, RasterViewMut};

#[derive(Clone, Debug, PartialEq)]
pub struct Raster {
    width: usize,
    height: usize,
    channels: usize,
    data: Vec<f32>,
}

impl Raster {
    /// Construct a zero-filled raster.
    pub fn new(width: usize, height: usize, channels: usize) -> Result<Self, Error> {
        Self::filled(width, height, channels, 0.0)
    }

    /// Construct a raster with every sample set to `fill`.
    pub fn filled(width: usize, height: usize, channels: usize, fill: f32) -> Result<Self, Error> {
        if channels == 0 {
            return Err(Error::ZeroChannels);
        }
        Ok(Self {
            width,
            height,
            channels,
            data: vec![fill; width * height * channels],
        })
    }

    /// Construct a raster from an explicit flat sample buffer.
    ///
    /// Fails fast when the buffer length does not match the declared shape.
    pub fn from_samples(
        width: usize,
        height: usize,
        channels: usize,
        data: Vec<f32>,
    ) -> Result<Self, Error> {
        if channels == 0 {
            return Err(Error::ZeroChannels);
        }
        let expected = width * height * channels;
        if data.len() != expected {
            return Err(Error::SampleCountMismatch {
                expected,
                actual: data.len(),
            });
        }
        Ok(Self {
            width,
            height,
            channels,
            data,
        })
    }

    /// Internal constructor for outputs shaped like an already-validated input.
    pub(crate) fn with_shape(width: usize, height: usize, channels: usize) -> Self {
        debug_assert!(channels >= 1);
        Self {
            width,
            height,
            channels,
            data: vec![0.0; width * height * channels],
        }
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    #[inline]
    pub fn channels(&self) -> usize {
        self.channels
    }

    /// Flat sample buffer in row-major, channel-interleaved order.
    #[inline]
    pub fn samples(&self) -> &[f32] {
        &self.data
    }

    #[inline]
    pub(crate) fn samples_mut(&mut self) -> &mut [f32] {
        &mut self.data
    }

    #[inline]
    fn idx(&self, row: usize, col: usize, channel: usize) -> usize {
        (row * self.width + col) * self.channels + channel
    }

    /// Channel value of the pixel at `(row, col)`.
    #[inline]
    pub fn get(&self, row: usize, col: usize, channel: usize) -> f32 {
        self.data[self.idx(row, col, channel)]
    }

    /// Overwrite one channel value of the pixel at `(row, col)`.
    #[inline]
    pub fn set(&mut self, row: usize, col: usize, channel: usize, value: f32) {
        let i = self.idx(row, col, channel);
        self.data[i] = value;
    }

    /// Global maximum sample value; 0 for an empty raster.
    pub fn max_sample(&self) -> f32 {
        if self.data.is_empty() {
            return 0.0;
        }
        self.data.iter().copied().fold(f32::NEG_INFINITY, f32::max)
    }

    /// Collapse to a single intensity channel via the unweighted channel mean.
    ///
    /// Single-channel rasters are returned as a plain copy.
    pub fn to_grayscale(&self) -> Raster {
        if self.channels == 1 {
            return self.clone();
        }
        let mut out = Raster::with_shape(self.width, self.height, 1);
        let pixels = self.width * self.height;
        for i in 0..pixels {
            let mut acc = 0.0;
            for c in 0..self.channels {
                acc += self.data[i * self.channels + c];
            }
            out.data[i] = acc / self.channels as f32;
        }
        out
    }

    /// Replicate a single channel into `channels` interleaved channels.
    ///
    /// Only defined for single-channel rasters; a multi-channel source cannot
    /// be expanded without ambiguity.
    pub fn to_multi_channel(&self, channels: usize) -> Result<Raster, Error> {
        if self.channels > 1 {
            return Err(Error::AlreadyMultiChannel {
                channels: self.channels,
            });
        }
        if channels == 0 {
            return Err(Error::ZeroChannels);
        }
        let mut out = Raster::with_shape(self.width, self.height, channels);
        for i in 0..self.width * self.height {
            for c in 0..channels {
                out.data[i * channels + c] = self.data[i];
            }
        }
        Ok(out)
    }

    /// Add another raster sample-wise over the overlapping region.
    ///
    /// Overlap is the intersection of the two extents and channel counts;
    /// samples outside it are left untouched.
    pub fn add(&mut self, other: &Raster) {
        let rows = self.height.min(other.height);
        let cols = self.width.min(other.width);
        let chans = self.channels.min(other.channels);
        for i in 0..rows {
            for j in 0..cols {
                for c in 0..chans {
                    let v = self.get(i, j, c) + other.get(i, j, c);
                    self.set(i, j, c, v);
                }
            }
        }
    }
}

impl RasterView for Raster {
    #[inline]
    fn width(&self) -> usize {
        self.width
    }
    #[inline]
    fn height(&self) -> usize {
        self.height
    }
    #[inline]
    fn channels(&self) -> usize {
        self.channels
    }
    #[inline]
    fn get(&self, row: usize, col: usize, channel: usize) -> f32 {
        Raster::get(self, row, col, channel)
    }
}

impl RasterViewMut for Raster {
    #[inline]
    fn set(&mut self, row: usize, col: usize, channel: usize, value: f32) {
        Raster::set(self, row, col, channel, value);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_samples_rejects_mismatched_length() {
        let err = Raster::from_samples(2, 2, 1, vec![0.0; 3]).unwrap_err();
        assert_eq!(
            err,
            Error::SampleCountMismatch {
                expected: 4,
                actual: 3
            }
        );
    }

    #[test]
    fn zero_channels_is_a_construction_error() {
        assert_eq!(Raster::new(4, 4, 0).unwrap_err(), Error::ZeroChannels);
    }

    #[test]
    fn grayscale_averages_channels() {
        let r = Raster::from_samples(1, 1, 3, vec![30.0, 60.0, 90.0]).unwrap();
        let gray = r.to_grayscale();
        assert_eq!(gray.channels(), 1);
        assert!((gray.get(0, 0, 0) - 60.0).abs() < 1e-6);
    }

    #[test]
    fn multi_channel_expansion_replicates_and_guards() {
        let r = Raster::from_samples(2, 1, 1, vec![5.0, 7.0]).unwrap();
        let rgb = r.to_multi_channel(3).unwrap();
        assert_eq!(rgb.samples(), &[5.0, 5.0, 5.0, 7.0, 7.0, 7.0]);

        let err = rgb.to_multi_channel(3).unwrap_err();
        assert_eq!(err, Error::AlreadyMultiChannel { channels: 3 });
    }

    #[test]
    fn max_sample_scans_all_channels() {
        let r = Raster::from_samples(2, 1, 2, vec![1.0, -3.0, 0.5, 9.0]).unwrap();
        assert_eq!(r.max_sample(), 9.0);
    }

    #[test]
    fn add_clips_to_overlap() {
        let mut a = Raster::filled(3, 3, 1, 1.0).unwrap();
        let b = Raster::filled(2, 2, 1, 2.0).unwrap();
        a.add(&b);
        assert_eq!(a.get(0, 0, 0), 3.0);
        assert_eq!(a.get(1, 1, 0), 3.0);
        assert_eq!(a.get(2, 2, 0), 1.0);
    }
}
