//! Text recognition capability.
//!
//! The engine performs everything around recognition (session lifecycle,
//! image registry, type masking, template matching); reading raw text off an
//! image is delegated to this trait so backends can be swapped or injected.

use crate::engine::EngineError;
use crate::io::RasterImage;

/// A backend that extracts raw text from a decoded image.
pub trait TextRecognizer: Send + Sync {
    /// Backend identifier (e.g. "ocrs").
    fn name(&self) -> &'static str;

    /// Extract all text visible on the image, in reading order.
    fn recognize(&self, image: &RasterImage) -> Result<String, EngineError>;
}
