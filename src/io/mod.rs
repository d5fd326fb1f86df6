//! Input layer: decoding image files into the pixel buffers sessions consume.
pub mod image;
pub use image::{ImageError, RasterImage};
