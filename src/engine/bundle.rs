//! Configuration bundle reader.
//!
//! A bundle is a directory containing `manifest.json` (or a path directly to
//! a manifest file). The manifest declares the bundle version, the operating
//! modes with their document templates, optional recognizer model files, and
//! an optional session signature the engine will demand at spawn time.

use std::collections::{BTreeMap, HashMap};
use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;
use tracing::info;

/// Errors encountered when reading configuration bundles
#[derive(Debug, Error)]
pub enum BundleError {
    #[error("Bundle not found: {0}")]
    NotFound(PathBuf),
    #[error("Bundle has no manifest: {0}")]
    MissingManifest(PathBuf),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Manifest parse error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Bundle declares no modes")]
    NoModes,
    #[error("Bundle declares no recognizer models")]
    NoModels,
    #[error("Model file missing: {0}")]
    ModelMissing(PathBuf),
}

/// A field template: the field key plus the regex patterns that extract its
/// candidates from recognized text.
#[derive(Debug, Clone, Deserialize)]
pub struct FieldTemplate {
    pub key: String,
    pub patterns: Vec<String>,
    #[serde(default)]
    pub required: bool,
}

/// Template for one document type within a mode.
#[derive(Debug, Clone, Deserialize)]
pub struct DocumentTemplate {
    pub name: String,
    /// Substrings that must all appear in the recognized text (case
    /// insensitive) for the type to match.
    #[serde(default)]
    pub anchors: Vec<String>,
    /// Extra attributes attached to recognized documents of this type.
    #[serde(default)]
    pub attributes: HashMap<String, String>,
    #[serde(default)]
    pub fields: Vec<FieldTemplate>,
}

/// One operating mode: an ordered list of document templates.
#[derive(Debug, Clone, Deserialize)]
pub struct ModeConfig {
    #[serde(default)]
    pub document_types: Vec<DocumentTemplate>,
}

/// Recognizer model files, relative to the bundle root.
#[derive(Debug, Clone, Deserialize)]
pub struct ModelPaths {
    pub detection: PathBuf,
    pub recognition: PathBuf,
}

/// Parsed bundle manifest
#[derive(Debug, Clone, Deserialize)]
pub struct Manifest {
    pub name: String,
    pub version: String,
    #[serde(default)]
    pub signature: Option<String>,
    #[serde(default)]
    pub default_mode: Option<String>,
    #[serde(default)]
    pub models: Option<ModelPaths>,
    pub modes: BTreeMap<String, ModeConfig>,
}

/// An opened configuration bundle
#[derive(Debug, Clone)]
pub struct Bundle {
    root: PathBuf,
    manifest: Manifest,
}

impl Bundle {
    /// Open a bundle directory (containing `manifest.json`) or a manifest
    /// file directly.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, BundleError> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(BundleError::NotFound(path.to_path_buf()));
        }

        let (root, manifest_path) = if path.is_dir() {
            let manifest_path = path.join("manifest.json");
            if !manifest_path.is_file() {
                return Err(BundleError::MissingManifest(path.to_path_buf()));
            }
            (path.to_path_buf(), manifest_path)
        } else {
            let root = path
                .parent()
                .map(Path::to_path_buf)
                .unwrap_or_else(|| PathBuf::from("."));
            (root, path.to_path_buf())
        };

        let raw = fs::read_to_string(&manifest_path)?;
        let manifest: Manifest = serde_json::from_str(&raw)?;
        if manifest.modes.is_empty() {
            return Err(BundleError::NoModes);
        }

        info!(
            "Loaded bundle `{}` v{} ({} mode(s))",
            manifest.name,
            manifest.version,
            manifest.modes.len()
        );

        Ok(Bundle { root, manifest })
    }

    pub fn manifest(&self) -> &Manifest {
        &self.manifest
    }

    /// Bundle root directory; model paths resolve against it.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// The mode used when settings do not override it: the declared
    /// `default_mode`, else the first mode in manifest order.
    pub fn default_mode(&self) -> &str {
        self.manifest
            .default_mode
            .as_deref()
            .unwrap_or_else(|| {
                self.manifest
                    .modes
                    .keys()
                    .next()
                    .map(String::as_str)
                    .expect("bundle has at least one mode")
            })
    }

    pub fn mode(&self, name: &str) -> Option<&ModeConfig> {
        self.manifest.modes.get(name)
    }

    /// Absolute detection/recognition model paths, verified to exist.
    pub fn model_paths(&self) -> Result<(PathBuf, PathBuf), BundleError> {
        let models = self.manifest.models.as_ref().ok_or(BundleError::NoModels)?;
        let detection = self.root.join(&models.detection);
        let recognition = self.root.join(&models.recognition);
        for path in [&detection, &recognition] {
            if !path.is_file() {
                return Err(BundleError::ModelMissing(path.clone()));
            }
        }
        Ok((detection, recognition))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_bundle(dir: &Path, manifest: &str) -> PathBuf {
        let path = dir.join("manifest.json");
        let mut f = fs::File::create(&path).unwrap();
        f.write_all(manifest.as_bytes()).unwrap();
        path
    }

    const MINIMAL: &str = r#"{
        "name": "test-bundle",
        "version": "1.0.0",
        "modes": {
            "universal": {
                "document_types": [
                    { "name": "passport",
                      "anchors": ["PASSPORT"],
                      "fields": [ { "key": "name", "patterns": ["Name[:\\s]+([A-Z]+)"], "required": true } ] }
                ]
            }
        }
    }"#;

    #[test]
    fn opens_directory_and_manifest_file() {
        let dir = tempfile::tempdir().unwrap();
        let manifest_path = write_bundle(dir.path(), MINIMAL);

        let from_dir = Bundle::open(dir.path()).unwrap();
        assert_eq!(from_dir.manifest().name, "test-bundle");
        assert_eq!(from_dir.default_mode(), "universal");

        let from_file = Bundle::open(&manifest_path).unwrap();
        assert_eq!(from_file.root(), dir.path());
        assert_eq!(from_file.mode("universal").unwrap().document_types.len(), 1);
    }

    #[test]
    fn missing_bundle_and_manifest() {
        let dir = tempfile::tempdir().unwrap();
        assert!(matches!(
            Bundle::open(dir.path().join("nope")),
            Err(BundleError::NotFound(_))
        ));
        assert!(matches!(
            Bundle::open(dir.path()),
            Err(BundleError::MissingManifest(_))
        ));
    }

    #[test]
    fn invalid_json_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        write_bundle(dir.path(), "{ not json");
        assert!(matches!(Bundle::open(dir.path()), Err(BundleError::Json(_))));
    }

    #[test]
    fn zero_modes_rejected() {
        let dir = tempfile::tempdir().unwrap();
        write_bundle(
            dir.path(),
            r#"{ "name": "empty", "version": "1.0.0", "modes": {} }"#,
        );
        assert!(matches!(Bundle::open(dir.path()), Err(BundleError::NoModes)));
    }

    #[test]
    fn model_paths_require_existing_files() {
        let dir = tempfile::tempdir().unwrap();
        write_bundle(
            dir.path(),
            r#"{
                "name": "m", "version": "1.0.0",
                "models": { "detection": "det.rten", "recognition": "rec.rten" },
                "modes": { "universal": {} }
            }"#,
        );
        let bundle = Bundle::open(dir.path()).unwrap();
        assert!(matches!(
            bundle.model_paths(),
            Err(BundleError::ModelMissing(_))
        ));

        fs::write(dir.path().join("det.rten"), b"x").unwrap();
        fs::write(dir.path().join("rec.rten"), b"x").unwrap();
        let (det, rec) = bundle.model_paths().unwrap();
        assert!(det.ends_with("det.rten"));
        assert!(rec.ends_with("rec.rten"));
    }

    #[test]
    fn bundle_without_models_reports_no_models() {
        let dir = tempfile::tempdir().unwrap();
        write_bundle(dir.path(), MINIMAL);
        let bundle = Bundle::open(dir.path()).unwrap();
        assert!(matches!(bundle.model_paths(), Err(BundleError::NoModels)));
    }
}
