use serde::{Deserialize, Serialize};

/// Recognition parameters suitable for config files and presets
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecognitionParams {
    /// Operating mode to select on the session settings
    pub mode: String,
    /// Document type mask; `*` enables every type of the mode
    pub document_types: String,
    /// Session signature, required only by bundles that declare one
    pub signature: Option<String>,
}

impl Default for RecognitionParams {
    fn default() -> Self {
        Self {
            mode: "universal".to_string(),
            document_types: "*".to_string(),
            signature: None,
        }
    }
}
