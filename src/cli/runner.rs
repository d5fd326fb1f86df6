use tracing::info;
use tracing_subscriber::EnvFilter;

use docrec::api;
use docrec::{BundleEngine, Engine, RecognitionParams, TypeMask};

use super::args::CliArgs;
use super::errors::AppError;

// Mode selected by the CLI; bundles aimed at this driver declare it.
const SESSION_MODE: &str = "universal";

pub fn run(args: CliArgs) -> Result<(), Box<dyn std::error::Error>> {
    // stdout carries only the JSON contract; diagnostics go to stderr.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    if TypeMask::parse(&args.document_types).is_none() {
        return Err(AppError::InvalidTypeMask {
            mask: args.document_types.clone(),
        }
        .into());
    }

    info!(
        "Recognizing {:?} with bundle {:?} (types: {})",
        args.image_path, args.bundle_path, args.document_types
    );

    // Lazy initialization: engine internals are deferred until the session
    // needs them.
    let engine = BundleEngine::create(&args.bundle_path, true)?;
    info!("Engine configured (bundle v{})", engine.version());

    let params = RecognitionParams {
        mode: SESSION_MODE.to_string(),
        document_types: args.document_types.clone(),
        signature: None,
    };

    let json = api::recognize_to_json(&engine, &args.image_path, &params)?;
    println!("{json}");

    Ok(())
}
