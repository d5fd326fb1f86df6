//! Recognition engine boundary.
//!
//! The CLI and the high-level API drive recognition exclusively through the
//! `Engine` and `Session` traits defined here; the engine is an injected
//! capability, not something callers construct pieces of by hand. The crate
//! ships one implementation, [`BundleEngine`], configured from a bundle
//! (`bundle` module) with a pluggable text backend (`recognizer` module).
//!
//! Handle lifetimes follow the original driver's model: settings are
//! consumed to spawn a session, processing settings belong to the session
//! that created them, and results are owned by the session.

pub mod bundle;
pub mod builtin;
#[cfg(feature = "ocr")]
pub mod ocrs;
pub mod recognizer;
pub mod result;

pub use builtin::BundleEngine;
pub use bundle::{Bundle, BundleError, DocumentTemplate, FieldTemplate, Manifest, ModeConfig};
pub use recognizer::TextRecognizer;
pub use result::{DocResult, Document, OcrString, TextField};

use thiserror::Error;

use crate::io::RasterImage;
use crate::types::{ImageId, TypeMask};

/// Errors signaled by the engine during configuration, session creation,
/// registration, or processing
#[derive(Debug, Error)]
pub enum EngineError {
    #[error("Bundle error: {0}")]
    Bundle(#[from] BundleError),
    #[error("Unknown mode: {mode}")]
    UnknownMode { mode: String },
    #[error("No document types enabled")]
    NoEnabledTypes,
    #[error("Document type mask `{mask}` matches no types of mode `{mode}`")]
    NoMatchingTypes { mask: String, mode: String },
    #[error("Empty document type mask: {mask:?}")]
    EmptyMask { mask: String },
    #[error("Session signature mismatch")]
    SignatureMismatch,
    #[error("Invalid field pattern for {doc_type}.{key}: {source}")]
    InvalidPattern {
        doc_type: String,
        key: String,
        #[source]
        source: regex::Error,
    },
    #[error("Processing settings belong to another session")]
    ForeignSettings,
    #[error("No source image selected in processing settings")]
    NoSourceSelected,
    #[error("Unknown source image id: {0}")]
    UnknownSourceId(ImageId),
    #[error("Recognition backend unavailable: {0}")]
    BackendUnavailable(&'static str),
    #[error("Recognition backend error: {0}")]
    Backend(String),
}

/// A configured recognition engine.
pub trait Engine {
    /// Engine version string (from the loaded configuration).
    fn version(&self) -> &str;

    /// Obtain a default session settings object. Settings are engine-scoped
    /// and cannot be constructed independently.
    fn create_session_settings(&self) -> Result<SessionSettings, EngineError>;

    /// Spawn a recognition session, consuming the settings. The signature is
    /// checked against the engine configuration when one is demanded.
    fn spawn_session(
        &self,
        settings: SessionSettings,
        signature: Option<&str>,
    ) -> Result<Box<dyn Session + '_>, EngineError>;
}

/// A stateful recognition session: owns registered images and the most
/// recent processing result.
pub trait Session {
    /// Create default processing settings bound to this session.
    fn create_processing_settings(&self) -> Result<ProcessingSettings, EngineError>;

    /// Register an input image, copying its pixels into the session.
    /// Returns the identifier to select the image as a processing source.
    fn register_image(&mut self, image: &RasterImage) -> Result<ImageId, EngineError>;

    /// Run recognition on the source selected in the settings. The only call
    /// that performs actual recognition work.
    fn process(&mut self, settings: &ProcessingSettings) -> Result<(), EngineError>;

    /// The most recent result. Empty until `process` succeeds.
    fn current_result(&self) -> &DocResult;
}

/// Mutable pre-session request: operating mode plus enabled document types.
/// Obtained from [`Engine::create_session_settings`] and consumed by
/// [`Engine::spawn_session`].
#[derive(Debug, Clone)]
pub struct SessionSettings {
    mode: String,
    enabled_types: Option<TypeMask>,
}

impl SessionSettings {
    pub(crate) fn new(default_mode: impl Into<String>) -> Self {
        SessionSettings {
            mode: default_mode.into(),
            enabled_types: None,
        }
    }

    /// Select a named operating mode (e.g. "universal").
    pub fn set_current_mode(&mut self, name: &str) {
        self.mode = name.to_string();
    }

    pub fn current_mode(&self) -> &str {
        &self.mode
    }

    /// Enable document types matching the mask. Repeated calls accumulate.
    pub fn add_enabled_document_types(&mut self, mask: &str) -> Result<(), EngineError> {
        let parsed = TypeMask::parse(mask).ok_or_else(|| EngineError::EmptyMask {
            mask: mask.to_string(),
        })?;
        match &mut self.enabled_types {
            Some(existing) => existing.extend(parsed),
            None => self.enabled_types = Some(parsed),
        }
        Ok(())
    }

    pub fn enabled_types(&self) -> Option<&TypeMask> {
        self.enabled_types.as_ref()
    }
}

/// Per-invocation request selecting the active image source. Valid only for
/// the session that created it.
#[derive(Debug, Clone)]
pub struct ProcessingSettings {
    session_id: u64,
    source_id: Option<ImageId>,
}

impl ProcessingSettings {
    pub(crate) fn new(session_id: u64) -> Self {
        ProcessingSettings {
            session_id,
            source_id: None,
        }
    }

    pub(crate) fn session_id(&self) -> u64 {
        self.session_id
    }

    /// Select which registered image the next `process` call consumes.
    pub fn set_current_source_id(&mut self, id: ImageId) {
        self.source_id = Some(id);
    }

    pub fn current_source_id(&self) -> Option<ImageId> {
        self.source_id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn settings_accumulate_masks() {
        let mut settings = SessionSettings::new("universal");
        assert!(settings.enabled_types().is_none());
        settings.add_enabled_document_types("passport").unwrap();
        settings.add_enabled_document_types("idcard").unwrap();
        let mask = settings.enabled_types().unwrap();
        assert!(mask.matches("passport"));
        assert!(mask.matches("idcard"));
    }

    #[test]
    fn empty_mask_is_rejected() {
        let mut settings = SessionSettings::new("universal");
        assert!(matches!(
            settings.add_enabled_document_types("  "),
            Err(EngineError::EmptyMask { .. })
        ));
    }

    #[test]
    fn mode_override() {
        let mut settings = SessionSettings::new("universal");
        settings.set_current_mode("mobile");
        assert_eq!(settings.current_mode(), "mobile");
    }
}
