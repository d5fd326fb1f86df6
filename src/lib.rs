#![doc = r#"
DOCREC — a document recognition driver.

This crate provides a typed session protocol for document recognition: load a
configuration bundle, spawn a session, register an image, process it, and
serialize the recognized fields to a stable JSON line. It powers the `docrec`
CLI and can be embedded in your own Rust applications.

The recognition backend is a capability behind the [`engine::TextRecognizer`]
trait. With the default `ocr` feature the built-in engine reads text via the
pure-Rust `ocrs` pipeline, loading its models from the bundle; any other
backend can be injected through [`BundleEngine::with_recognizer`].

Quick start: recognize one image
--------------------------------
```rust,no_run
use std::path::Path;
use docrec::{api, BundleEngine, RecognitionParams};

fn main() -> docrec::Result<()> {
    let engine = BundleEngine::create(Path::new("/data/bundle"), true)?;
    let params = RecognitionParams {
        mode: "universal".to_string(),
        document_types: "passport".to_string(),
        signature: None,
    };
    let json = api::recognize_to_json(&engine, Path::new("/data/scan.png"), &params)?;
    println!("{json}");
    Ok(())
}
```

Driving the session protocol directly
-------------------------------------
```rust,no_run
use std::path::Path;
use docrec::{BundleEngine, Engine, RasterImage};

fn main() -> docrec::Result<()> {
    let engine = BundleEngine::create(Path::new("/data/bundle"), true)?;
    let mut settings = engine.create_session_settings()?;
    settings.set_current_mode("universal");
    settings.add_enabled_document_types("*")?;

    let mut session = engine.spawn_session(settings, None)?;
    let mut proc = session.create_processing_settings()?;
    let image = RasterImage::from_file("/data/scan.png")?;
    let id = session.register_image(&image)?;
    proc.set_current_source_id(id);
    session.process(&proc)?;

    for doc in session.current_result().documents() {
        println!("{}", doc.doc_type());
    }
    Ok(())
}
```

Error handling
--------------
All public functions return `docrec::Result<T>`; match on `docrec::Error` to
handle specific cases, e.g. bundle or engine errors.

Feature flags
-------------
- `ocr`: builds the `ocrs`-backed text recognizer (default).
- `full`: enables a complete feature set for end-to-end workflows.

Useful modules
--------------
- [`api`] — high-level, ergonomic entry points.
- [`engine`] — the engine/session trait boundary, bundle reader, and result model.
- [`io`] — image decoding.
- [`error`] — crate-level `Error` and `Result`.
"#]

// Core modules (public)
pub mod api;
pub mod core;
pub mod engine;
pub mod error;
pub mod io;
pub mod types;

/// Version string reported in the CLI usage line.
pub const ENGINE_VERSION: &str = env!("CARGO_PKG_VERSION");

// Curated public API surface
// Types
pub use core::params::RecognitionParams;
pub use error::{Error, Result};
pub use types::{ImageId, TypeMask};

// Engine boundary
pub use engine::{
    Bundle, BundleEngine, BundleError, DocResult, Document, Engine, EngineError, OcrString,
    ProcessingSettings, Session, SessionSettings, TextField, TextRecognizer,
};

// Input
pub use io::image::{ImageError, RasterImage};

// High-level API re-exports
pub use api::{recognize_file, recognize_to_json};
pub use core::serialize::result_to_json;
