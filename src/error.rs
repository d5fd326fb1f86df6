//! Crate-level error type and `Result` alias for stable, structured error
//! handling. Converts underlying I/O, bundle, engine, and image errors.
use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Bundle error: {0}")]
    Bundle(#[from] crate::engine::BundleError),

    #[error("Engine error: {0}")]
    Engine(#[from] crate::engine::EngineError),

    #[error("Image error: {0}")]
    Image(#[from] crate::io::ImageError),
}
