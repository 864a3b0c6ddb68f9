#![doc = include_str!("../README.md")]

// Public modules (stable-ish surface)
pub mod convolve;
pub mod edges;
pub mod errors;
pub mod filters;
pub mod kernel;
pub mod kmeans;
pub mod raster;
pub mod segmentation;

// Config structs for the bundled command-line tools.
pub mod config;

// --- High-level re-exports -------------------------------------------------

pub use crate::convolve::{convolve, Boundary, ConvolveOptions, Normalization};
pub use crate::edges::{Canny, CannyOptions, CannyTrace};
pub use crate::errors::Error;
pub use crate::filters::{GaussianBlur, GaussianOptions, GradientField, Sobel};
pub use crate::kernel::Kernel;
pub use crate::kmeans::{Clustering, KMeans, KMeansOptions, Samples};
pub use crate::raster::{Raster, RasterView, RasterViewMut};
pub use crate::segmentation::{ClusterColors, KMeansSegmentation, SegmentationOptions};

// --- Prelude ---------------------------------------------------------------

/// Small prelude for quick experiments.
///
/// ```no_run
/// use pixelkit::prelude::*;
///
/// # fn main() -> Result<(), pixelkit::Error> {
/// let image = Raster::filled(64, 64, 3, 128.0)?;
/// let segmented = KMeansSegmentation::new(SegmentationOptions::default())?.run(&image)?;
/// println!("{}x{}", segmented.width(), segmented.height());
/// # Ok(())
/// # }
/// ```
pub mod prelude {
    pub use crate::edges::{Canny, CannyOptions};
    pub use crate::errors::Error;
    pub use crate::filters::{GaussianBlur, GaussianOptions, Sobel};
    pub use crate::raster::Raster;
    pub use crate::segmentation::{ClusterColors, KMeansSegmentation, SegmentationOptions};
    pub use crate::{convolve, ConvolveOptions, Kernel};
}
