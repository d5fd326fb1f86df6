//! End-to-end recognition flow against the built-in engine with an
//! injected text backend: bundle on disk, real image decode, session
//! protocol, JSON output.

use std::fs;
use std::path::PathBuf;
use std::sync::Arc;

use docrec::{
    api, BundleEngine, EngineError, RasterImage, RecognitionParams, TextRecognizer,
};

struct FakeRecognizer {
    text: String,
}

impl TextRecognizer for FakeRecognizer {
    fn name(&self) -> &'static str {
        "fake"
    }

    fn recognize(&self, _image: &RasterImage) -> Result<String, EngineError> {
        Ok(self.text.clone())
    }
}

const MANIFEST: &str = r#"{
    "name": "itest",
    "version": "1.0.0",
    "modes": {
        "universal": {
            "document_types": [
                { "name": "passport",
                  "anchors": ["passport"],
                  "fields": [
                    { "key": "name", "patterns": ["Name[:\\s]+([A-Z\"]+)"], "required": true },
                    { "key": "number", "patterns": ["No[.\\s]+(\\d+)"] }
                  ] },
                { "name": "invoice",
                  "anchors": ["invoice"],
                  "fields": [
                    { "key": "total", "patterns": ["Total[:\\s]+([0-9.]+)"] }
                  ] }
            ]
        }
    }
}"#;

struct Fixture {
    _dir: tempfile::TempDir,
    bundle: PathBuf,
    image: PathBuf,
}

fn fixture() -> Fixture {
    let dir = tempfile::tempdir().unwrap();
    let bundle = dir.path().join("bundle");
    fs::create_dir(&bundle).unwrap();
    fs::write(bundle.join("manifest.json"), MANIFEST).unwrap();

    let image = dir.path().join("scan.png");
    image::RgbImage::from_pixel(16, 16, image::Rgb([200, 200, 200]))
        .save(&image)
        .unwrap();

    Fixture {
        _dir: dir,
        bundle,
        image,
    }
}

fn engine_with_text(fx: &Fixture, text: &str) -> BundleEngine {
    BundleEngine::with_recognizer(
        &fx.bundle,
        Arc::new(FakeRecognizer {
            text: text.to_string(),
        }),
    )
    .unwrap()
}

#[test]
fn recognizes_passport_to_json() {
    let fx = fixture();
    let engine = engine_with_text(&fx, "REPUBLIC PASSPORT\nName: JOHN\nNo. 1234567");
    let json = api::recognize_to_json(&engine, &fx.image, &RecognitionParams::default()).unwrap();
    assert_eq!(
        json,
        r#"{"DOCTYPE": "passport","name": "JOHN","number": "1234567"}"#
    );
}

#[test]
fn quote_in_value_is_escaped() {
    let fx = fixture();
    let engine = engine_with_text(&fx, "PASSPORT Name: J\"OHN");
    let json = api::recognize_to_json(&engine, &fx.image, &RecognitionParams::default()).unwrap();
    assert_eq!(json, "{\"DOCTYPE\": \"passport\",\"name\": \"J\\\"OHN\"}");
}

#[test]
fn no_documents_yields_empty_object() {
    let fx = fixture();
    let engine = engine_with_text(&fx, "nothing recognizable here");
    let json = api::recognize_to_json(&engine, &fx.image, &RecognitionParams::default()).unwrap();
    assert_eq!(json, "{}");
}

#[test]
fn mask_narrows_recognition() {
    let fx = fixture();
    let engine = engine_with_text(&fx, "INVOICE Total: 12.50 PASSPORT Name: JOHN");
    let params = RecognitionParams {
        document_types: "invoice".to_string(),
        ..Default::default()
    };
    let json = api::recognize_to_json(&engine, &fx.image, &params).unwrap();
    assert_eq!(json, r#"{"DOCTYPE": "invoice","total": "12.50"}"#);
}

#[test]
fn unknown_mode_surfaces_as_engine_error() {
    let fx = fixture();
    let engine = engine_with_text(&fx, "");
    let params = RecognitionParams {
        mode: "mobile".to_string(),
        ..Default::default()
    };
    let err = api::recognize_file(&engine, &fx.image, &params).unwrap_err();
    assert!(matches!(
        err,
        docrec::Error::Engine(EngineError::UnknownMode { .. })
    ));
}

#[test]
fn missing_image_surfaces_as_image_error() {
    let fx = fixture();
    let engine = engine_with_text(&fx, "PASSPORT Name: JOHN");
    let err = api::recognize_file(
        &engine,
        &fx.bundle.join("no-such.png"),
        &RecognitionParams::default(),
    )
    .unwrap_err();
    assert!(matches!(err, docrec::Error::Image(_)));
}
