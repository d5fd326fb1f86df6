//! `ocrs`-backed text recognizer (feature `ocr`).
//!
//! Loads the detection and recognition models declared by the bundle and
//! runs the ocrs pipeline on registered images.

use std::path::Path;

use ocrs::{ImageSource, OcrEngine, OcrEngineParams};
use rten::Model;
use tracing::info;

use crate::engine::EngineError;
use crate::engine::recognizer::TextRecognizer;
use crate::io::RasterImage;

pub struct OcrsRecognizer {
    engine: OcrEngine,
}

impl OcrsRecognizer {
    /// Load detection and recognition models from disk.
    pub fn load(detection: &Path, recognition: &Path) -> Result<Self, EngineError> {
        let detection_model =
            Model::load_file(detection).map_err(|e| EngineError::Backend(e.to_string()))?;
        let recognition_model =
            Model::load_file(recognition).map_err(|e| EngineError::Backend(e.to_string()))?;

        let engine = OcrEngine::new(OcrEngineParams {
            detection_model: Some(detection_model),
            recognition_model: Some(recognition_model),
            ..Default::default()
        })
        .map_err(|e| EngineError::Backend(e.to_string()))?;

        info!("Initialized ocrs recognizer");
        Ok(OcrsRecognizer { engine })
    }
}

impl TextRecognizer for OcrsRecognizer {
    fn name(&self) -> &'static str {
        "ocrs"
    }

    fn recognize(&self, image: &RasterImage) -> Result<String, EngineError> {
        let source = ImageSource::from_bytes(image.as_raw(), (image.width(), image.height()))
            .map_err(|e| EngineError::Backend(e.to_string()))?;
        let input = self
            .engine
            .prepare_input(source)
            .map_err(|e| EngineError::Backend(e.to_string()))?;
        self.engine
            .get_text(&input)
            .map_err(|e| EngineError::Backend(e.to_string()))
    }
}
