//! JSON config structs for the bundled command-line tools.

pub mod canny;
pub mod segment;
