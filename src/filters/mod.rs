//! Concrete filters derived from the convolution engine.
//!
//! - Gaussian blur with a parameterized, cached kernel.
//! - Sobel gradient pair producing a [`GradientField`].

pub mod gaussian;
pub mod sobel;

pub use gaussian::{GaussianBlur, GaussianOptions};
pub use sobel::{GradientField, Sobel};
