//! Canny edge detection: a strictly ordered four-stage pipeline.
//!
//! 1. Gaussian smoothing (configurable kernel size and sigma).
//! 2. Sobel gradients (magnitude + direction).
//! 3. Non-maximum suppression along the quantized gradient direction.
//! 4. Double thresholding followed by single-pass hysteresis linking.
//!
//! Each stage consumes the complete output raster of the previous stage; no
//! stage begins before its predecessor has fully materialized. Configuration
//! problems are rejected when the detector is constructed, never mid-pipeline.

pub mod canny;
pub mod nms;
pub mod threshold;

pub use canny::{Canny, CannyOptions, CannyTrace};
pub use nms::suppress_non_maxima;
pub use threshold::{apply_double_threshold, hysteresis, ThresholdOutcome, STRONG, WEAK};
