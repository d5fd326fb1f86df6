use clap::Parser;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "docrec", version, about = "DOCREC CLI")]
pub struct CliArgs {
    /// Path to the image to be recognized
    pub image_path: PathBuf,

    /// Path to the configuration bundle
    pub bundle_path: PathBuf,

    /// Document types mask, "*" by default
    #[arg(default_value = "*")]
    pub document_types: String,
}
