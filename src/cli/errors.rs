use thiserror::Error;

/// Application-specific errors for the CLI
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Invalid document types mask: {mask:?}. Must contain at least one pattern")]
    InvalidTypeMask { mask: String },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Engine error: {0}")]
    Engine(#[from] docrec::EngineError),
}
