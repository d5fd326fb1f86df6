//! Built-in engine implementation configured from a bundle.
//!
//! `BundleEngine` owns the parsed bundle and a lazily initialized text
//! recognizer. Sessions compile the document templates of their mode at
//! spawn time and match them against recognized text on `process`.

use std::cmp::Reverse;
use std::path::Path;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use once_cell::sync::OnceCell;
use regex::Regex;
use tracing::{debug, info};

use crate::engine::bundle::{Bundle, DocumentTemplate};
use crate::engine::recognizer::TextRecognizer;
use crate::engine::result::{DocResult, Document, OcrString, TextField};
use crate::engine::{Engine, EngineError, ProcessingSettings, Session, SessionSettings};
use crate::io::RasterImage;
use crate::types::ImageId;

// Session ids are process-global so processing settings cannot leak
// between sessions of different engine instances.
static SESSION_IDS: AtomicU64 = AtomicU64::new(1);

/// Recognition engine backed by an opened configuration bundle.
pub struct BundleEngine {
    bundle: Bundle,
    recognizer: OnceCell<Arc<dyn TextRecognizer>>,
}

impl BundleEngine {
    /// Open a bundle and configure an engine from it.
    ///
    /// With `lazy_init` the recognizer (and its model files) is initialized
    /// on the first `spawn_session` instead of here.
    pub fn create<P: AsRef<Path>>(bundle_path: P, lazy_init: bool) -> Result<Self, EngineError> {
        let bundle = Bundle::open(bundle_path)?;
        let engine = BundleEngine {
            bundle,
            recognizer: OnceCell::new(),
        };
        if !lazy_init {
            engine.recognizer()?;
        }
        Ok(engine)
    }

    /// Configure an engine with an injected recognizer instead of the
    /// bundle-declared backend.
    pub fn with_recognizer<P: AsRef<Path>>(
        bundle_path: P,
        recognizer: Arc<dyn TextRecognizer>,
    ) -> Result<Self, EngineError> {
        let bundle = Bundle::open(bundle_path)?;
        let cell = OnceCell::new();
        let _ = cell.set(recognizer);
        Ok(BundleEngine {
            bundle,
            recognizer: cell,
        })
    }

    pub fn bundle(&self) -> &Bundle {
        &self.bundle
    }

    fn recognizer(&self) -> Result<Arc<dyn TextRecognizer>, EngineError> {
        self.recognizer
            .get_or_try_init(|| default_recognizer(&self.bundle))
            .cloned()
    }
}

#[cfg(feature = "ocr")]
fn default_recognizer(bundle: &Bundle) -> Result<Arc<dyn TextRecognizer>, EngineError> {
    let (detection, recognition) = bundle.model_paths()?;
    let recognizer = crate::engine::ocrs::OcrsRecognizer::load(&detection, &recognition)?;
    Ok(Arc::new(recognizer))
}

#[cfg(not(feature = "ocr"))]
fn default_recognizer(_bundle: &Bundle) -> Result<Arc<dyn TextRecognizer>, EngineError> {
    Err(EngineError::BackendUnavailable(
        "built without the `ocr` feature; inject a recognizer",
    ))
}

impl Engine for BundleEngine {
    fn version(&self) -> &str {
        &self.bundle.manifest().version
    }

    fn create_session_settings(&self) -> Result<SessionSettings, EngineError> {
        Ok(SessionSettings::new(self.bundle.default_mode()))
    }

    fn spawn_session(
        &self,
        settings: SessionSettings,
        signature: Option<&str>,
    ) -> Result<Box<dyn Session + '_>, EngineError> {
        if let Some(expected) = self.bundle.manifest().signature.as_deref() {
            if signature != Some(expected) {
                return Err(EngineError::SignatureMismatch);
            }
        }

        let mode_name = settings.current_mode();
        let mode = self
            .bundle
            .mode(mode_name)
            .ok_or_else(|| EngineError::UnknownMode {
                mode: mode_name.to_string(),
            })?;

        let mask = settings.enabled_types().ok_or(EngineError::NoEnabledTypes)?;
        let selected: Vec<&DocumentTemplate> = mode
            .document_types
            .iter()
            .filter(|t| mask.matches(&t.name))
            .collect();
        if selected.is_empty() {
            return Err(EngineError::NoMatchingTypes {
                mask: mask.to_string(),
                mode: mode_name.to_string(),
            });
        }

        let templates = selected
            .into_iter()
            .map(CompiledTemplate::compile)
            .collect::<Result<Vec<_>, _>>()?;

        let recognizer = self.recognizer()?;
        let id = SESSION_IDS.fetch_add(1, Ordering::Relaxed);
        info!(
            "Spawned session {} (mode `{}`, {} type(s), backend `{}`)",
            id,
            mode_name,
            templates.len(),
            recognizer.name()
        );

        Ok(Box::new(BundleSession {
            id,
            recognizer,
            templates,
            images: Vec::new(),
            next_image_id: 1,
            result: DocResult::default(),
        }))
    }
}

struct CompiledField {
    key: String,
    patterns: Vec<Regex>,
    required: bool,
}

struct CompiledTemplate {
    name: String,
    anchors: Vec<String>,
    attributes: Vec<(String, String)>,
    fields: Vec<CompiledField>,
}

impl CompiledTemplate {
    fn compile(template: &DocumentTemplate) -> Result<Self, EngineError> {
        let mut fields = Vec::with_capacity(template.fields.len());
        for field in &template.fields {
            let mut patterns = Vec::with_capacity(field.patterns.len());
            for pattern in &field.patterns {
                let regex = Regex::new(pattern).map_err(|e| EngineError::InvalidPattern {
                    doc_type: template.name.clone(),
                    key: field.key.clone(),
                    source: e,
                })?;
                patterns.push(regex);
            }
            fields.push(CompiledField {
                key: field.key.clone(),
                patterns,
                required: field.required,
            });
        }
        Ok(CompiledTemplate {
            name: template.name.clone(),
            anchors: template.anchors.iter().map(|a| a.to_lowercase()).collect(),
            attributes: template
                .attributes
                .iter()
                .map(|(k, v)| (k.clone(), v.clone()))
                .collect(),
            fields,
        })
    }

    /// Match this template against recognized text. `lower` is the
    /// lowercased text, shared across templates.
    fn match_text(&self, text: &str, lower: &str) -> Option<Document> {
        if self.anchors.iter().any(|a| !lower.contains(a.as_str())) {
            return None;
        }

        let mut fields = Vec::new();
        for field in &self.fields {
            let mut candidates = Vec::new();
            for regex in &field.patterns {
                if let Some(caps) = regex.captures(text) {
                    if let Some(m) = caps.get(1).or_else(|| caps.get(0)) {
                        candidates.push(m.as_str().to_string());
                    }
                }
            }
            if candidates.is_empty() {
                if field.required {
                    return None;
                }
            } else {
                fields.push(TextField::new(&field.key, OcrString::new(candidates)));
            }
        }

        // A template with neither anchors nor any matched field would match
        // every image; treat it as no match.
        if self.anchors.is_empty() && fields.is_empty() {
            return None;
        }

        let mut doc = Document::new(&self.name);
        for (key, value) in &self.attributes {
            doc.set_attribute(key, value);
        }
        for field in fields {
            doc.push_field(field);
        }
        Some(doc)
    }
}

/// Session spawned by [`BundleEngine`].
pub struct BundleSession {
    id: u64,
    recognizer: Arc<dyn TextRecognizer>,
    templates: Vec<CompiledTemplate>,
    images: Vec<(ImageId, RasterImage)>,
    next_image_id: ImageId,
    result: DocResult,
}

impl Session for BundleSession {
    fn create_processing_settings(&self) -> Result<ProcessingSettings, EngineError> {
        Ok(ProcessingSettings::new(self.id))
    }

    fn register_image(&mut self, image: &RasterImage) -> Result<ImageId, EngineError> {
        let id = self.next_image_id;
        self.next_image_id += 1;
        self.images.push((id, image.clone()));
        debug!(
            "Session {}: registered {}x{} image as source {}",
            self.id,
            image.width(),
            image.height(),
            id
        );
        Ok(id)
    }

    fn process(&mut self, settings: &ProcessingSettings) -> Result<(), EngineError> {
        if settings.session_id() != self.id {
            return Err(EngineError::ForeignSettings);
        }
        let source_id = settings
            .current_source_id()
            .ok_or(EngineError::NoSourceSelected)?;
        let image = self
            .images
            .iter()
            .find(|(id, _)| *id == source_id)
            .map(|(_, image)| image)
            .ok_or(EngineError::UnknownSourceId(source_id))?;

        let text = self.recognizer.recognize(image)?;
        debug!(
            "Session {}: recognized {} characters from source {}",
            self.id,
            text.len(),
            source_id
        );

        let lower = text.to_lowercase();
        let mut documents: Vec<Document> = self
            .templates
            .iter()
            .filter_map(|t| t.match_text(&text, &lower))
            .collect();
        documents.sort_by_key(|d| Reverse(d.fields().len()));

        info!(
            "Session {}: {} document(s) recognized",
            self.id,
            documents.len()
        );
        self.result = DocResult::new(documents);
        Ok(())
    }

    fn current_result(&self) -> &DocResult {
        &self.result
    }
}
