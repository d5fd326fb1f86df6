//! High-level, ergonomic library API: run the full recognition sequence
//! against any engine and obtain a result or its JSON rendering. Prefer
//! these entrypoints over driving the session protocol by hand when
//! embedding DOCREC.
use std::path::Path;

use tracing::info;

use crate::core::params::RecognitionParams;
use crate::core::serialize::result_to_json;
use crate::engine::result::DocResult;
use crate::engine::Engine;
use crate::error::Result;
use crate::io::RasterImage;

/// Run one single-shot recognition pass: settings, session, one image,
/// one `process` call. Returns an owned copy of the session's result.
pub fn recognize_file(
    engine: &dyn Engine,
    image_path: &Path,
    params: &RecognitionParams,
) -> Result<DocResult> {
    let mut settings = engine.create_session_settings()?;
    settings.set_current_mode(&params.mode);
    settings.add_enabled_document_types(&params.document_types)?;

    let mut session = engine.spawn_session(settings, params.signature.as_deref())?;
    let mut proc_settings = session.create_processing_settings()?;

    let image = RasterImage::from_file(image_path)?;
    let image_id = session.register_image(&image)?;
    proc_settings.set_current_source_id(image_id);
    session.process(&proc_settings)?;

    let result = session.current_result().clone();
    info!(
        "Recognized {:?}: {} document(s)",
        image_path,
        result.documents_count()
    );
    Ok(result)
}

/// [`recognize_file`] rendered to the JSON output line (no trailing newline).
pub fn recognize_to_json(
    engine: &dyn Engine,
    image_path: &Path,
    params: &RecognitionParams,
) -> Result<String> {
    let result = recognize_file(engine, image_path, params)?;
    Ok(result_to_json(&result))
}
