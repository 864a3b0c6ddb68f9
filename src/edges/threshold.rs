//! Double thresholding and single-pass hysteresis edge linking.

use crate::raster::Raster;

/// Marker value for ambiguous edge pixels between the two thresholds.
pub const WEAK: f32 = 100.0;
/// Marker value for definite edge pixels.
pub const STRONG: f32 = 255.0;

/// Classification produced by [`apply_double_threshold`].
#[derive(Clone, Debug)]
pub struct ThresholdOutcome {
    /// Per-pixel class: 0, [`WEAK`] or [`STRONG`].
    pub classified: Raster,
    /// Absolute low threshold actually used.
    pub low: f32,
    /// Absolute high threshold actually used.
    pub high: f32,
}

/// Classify suppressed magnitudes against ratio-derived thresholds.
///
/// `high = max(suppressed) * high_ratio` and `low = high * low_ratio`; the
/// ratios are assumed already validated (`0 < low < high < 1`). Pixels below
/// `low` drop to 0, pixels in `[low, high)` become [`WEAK`], pixels at or
/// above `high` become [`STRONG`]. Zero-magnitude pixels are never edges, so
/// a uniform image maps to an all-zero classification even though both
/// derived thresholds degenerate to 0.
pub fn apply_double_threshold(suppressed: &Raster, low_ratio: f32, high_ratio: f32) -> ThresholdOutcome {
    let high = suppressed.max_sample() * high_ratio;
    let low = high * low_ratio;

    let mut classified = Raster::with_shape(suppressed.width(), suppressed.height(), 1);
    for (out, &v) in classified
        .samples_mut()
        .iter_mut()
        .zip(suppressed.samples())
    {
        if v <= 0.0 {
            continue;
        }
        if v >= high {
            *out = STRONG;
        } else if v >= low {
            *out = WEAK;
        }
    }
    ThresholdOutcome {
        classified,
        low,
        high,
    }
}

/// Promote or drop weak pixels based on their 8-neighborhood.
///
/// A [`WEAK`] pixel becomes [`STRONG`] when at least one of its 8 neighbors
/// in the *input* classification is [`STRONG`]; otherwise it drops to 0.
/// This is a single pass over the input, not an iterative flood fill: a
/// weak pixel connected to a strong one only through other weak pixels is
/// dropped.
pub fn hysteresis(classified: &Raster) -> Raster {
    let width = classified.width();
    let height = classified.height();
    let mut linked = Raster::with_shape(width, height, 1);

    for i in 0..height {
        for j in 0..width {
            let v = classified.get(i, j, 0);
            if v >= STRONG {
                linked.set(i, j, 0, STRONG);
            } else if v >= WEAK && has_strong_neighbor(classified, i, j) {
                linked.set(i, j, 0, STRONG);
            }
        }
    }
    linked
}

fn has_strong_neighbor(classified: &Raster, i: usize, j: usize) -> bool {
    let height = classified.height() as isize;
    let width = classified.width() as isize;
    for di in -1..=1_isize {
        for dj in -1..=1_isize {
            if di == 0 && dj == 0 {
                continue;
            }
            let ni = i as isize + di;
            let nj = j as isize + dj;
            if ni < 0 || nj < 0 || ni >= height || nj >= width {
                continue;
            }
            if classified.get(ni as usize, nj as usize, 0) >= STRONG {
                return true;
            }
        }
    }
    false
}
