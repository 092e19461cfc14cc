//! Artifact Loading - classifier, label decoder, feature names
//!
//! Everything is read once from a single directory. Any artifact that is
//! missing, unreadable, unparsable or fails its manifest checksum is
//! `ArtifactUnavailable`; callers should abort startup on it.

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::collections::BTreeMap;
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use super::inference::ModelContext;
use super::label_encoder::LabelEncoder;
use super::linear::LinearClassifier;
use super::schema::FeatureSchema;
use crate::constants::{
    get_artifacts_dir, FEATURE_NAMES_FILE, LABEL_ENCODER_FILE, LINEAR_PIPELINE_FILE,
    MANIFEST_FILE, ONNX_PIPELINE_FILE, SHAP_IMAGE_FILE,
};
use crate::logic::error::{AssessmentError, CoreResult};

// ============================================================================
// BACKEND SELECTION
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ModelBackend {
    /// ONNX when the export is present (and supported), linear otherwise
    Auto,
    Onnx,
    Linear,
}

impl ModelBackend {
    pub fn as_str(&self) -> &'static str {
        match self {
            ModelBackend::Auto => "auto",
            ModelBackend::Onnx => "onnx",
            ModelBackend::Linear => "linear",
        }
    }
}

impl fmt::Display for ModelBackend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ModelBackend {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "auto" | "" => Ok(ModelBackend::Auto),
            "onnx" => Ok(ModelBackend::Onnx),
            "linear" => Ok(ModelBackend::Linear),
            other => Err(format!("unknown model backend '{}'", other)),
        }
    }
}

// ============================================================================
// PATHS
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArtifactPaths {
    dir: PathBuf,
}

impl ArtifactPaths {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// `ARTIFACTS_DIR` or `./artifacts`
    pub fn from_env() -> Self {
        Self::new(get_artifacts_dir())
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn file(&self, name: &str) -> PathBuf {
        self.dir.join(name)
    }

    pub fn onnx_pipeline(&self) -> PathBuf {
        self.file(ONNX_PIPELINE_FILE)
    }

    pub fn linear_pipeline(&self) -> PathBuf {
        self.file(LINEAR_PIPELINE_FILE)
    }

    pub fn shap_image(&self) -> PathBuf {
        self.file(SHAP_IMAGE_FILE)
    }

    /// Concrete backend for `Auto`
    pub fn resolve_backend(&self, requested: ModelBackend) -> ModelBackend {
        match requested {
            ModelBackend::Auto if cfg!(feature = "onnx") && self.onnx_pipeline().exists() => {
                ModelBackend::Onnx
            }
            ModelBackend::Auto => ModelBackend::Linear,
            explicit => explicit,
        }
    }
}

// ============================================================================
// MANIFEST
// ============================================================================

/// Optional `manifest.json`: `{"sha256": {"file name": "hex digest"}}`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Manifest {
    #[serde(default)]
    pub sha256: BTreeMap<String, String>,
}

impl Manifest {
    /// Missing manifest means "no checksums"; a corrupt one is an error
    pub fn load(paths: &ArtifactPaths) -> CoreResult<Self> {
        let path = paths.file(MANIFEST_FILE);
        if !path.exists() {
            log::debug!("No manifest at {}, skipping checksum verification", path.display());
            return Ok(Self::default());
        }

        let bytes = std::fs::read(&path).map_err(|e| AssessmentError::artifact(MANIFEST_FILE, e))?;
        serde_json::from_slice(&bytes).map_err(|e| AssessmentError::artifact(MANIFEST_FILE, e))
    }

    /// Compare `bytes` to the recorded digest, if there is one
    pub fn verify(&self, name: &str, bytes: &[u8]) -> CoreResult<()> {
        let Some(expected) = self.sha256.get(name) else {
            return Ok(());
        };

        let actual = sha256_hex(bytes);
        if !actual.eq_ignore_ascii_case(expected.trim()) {
            return Err(AssessmentError::artifact(
                name,
                format!("checksum mismatch (expected {}, got {})", expected, actual),
            ));
        }

        log::debug!("Checksum ok: {}", name);
        Ok(())
    }
}

pub fn sha256_hex(bytes: &[u8]) -> String {
    hex::encode(Sha256::digest(bytes))
}

// ============================================================================
// LOADING
// ============================================================================

/// Read one artifact and check it against the manifest
pub fn read_artifact(paths: &ArtifactPaths, manifest: &Manifest, name: &str) -> CoreResult<Vec<u8>> {
    let path = paths.file(name);
    let bytes = std::fs::read(&path)
        .map_err(|e| AssessmentError::artifact(name, format!("{}: {}", path.display(), e)))?;
    manifest.verify(name, &bytes)?;
    Ok(bytes)
}

pub fn load_label_encoder(paths: &ArtifactPaths, manifest: &Manifest) -> CoreResult<LabelEncoder> {
    let bytes = read_artifact(paths, manifest, LABEL_ENCODER_FILE)?;
    LabelEncoder::from_json(&bytes, LABEL_ENCODER_FILE)
}

pub fn load_feature_schema(paths: &ArtifactPaths, manifest: &Manifest) -> CoreResult<FeatureSchema> {
    let bytes = read_artifact(paths, manifest, FEATURE_NAMES_FILE)?;
    FeatureSchema::from_json(&bytes, FEATURE_NAMES_FILE)
}

pub fn load_linear(paths: &ArtifactPaths, manifest: &Manifest) -> CoreResult<LinearClassifier> {
    let bytes = read_artifact(paths, manifest, LINEAR_PIPELINE_FILE)?;
    LinearClassifier::from_json(&bytes, LINEAR_PIPELINE_FILE)
}

#[cfg(feature = "onnx")]
pub fn load_onnx(paths: &ArtifactPaths, manifest: &Manifest) -> CoreResult<super::onnx::OnnxClassifier> {
    let bytes = read_artifact(paths, manifest, ONNX_PIPELINE_FILE)?;
    super::onnx::OnnxClassifier::from_bytes(&bytes, ONNX_PIPELINE_FILE)
}

/// Load all three artifacts and build the shared context
pub fn load_context(paths: &ArtifactPaths, requested: ModelBackend) -> CoreResult<ModelContext> {
    let backend = paths.resolve_backend(requested);
    log::info!(
        "Loading artifacts from {} (backend: {} → {})",
        paths.dir().display(),
        requested,
        backend
    );

    let manifest = Manifest::load(paths)?;
    let decoder = load_label_encoder(paths, &manifest)?;
    let schema = load_feature_schema(paths, &manifest)?;

    match backend {
        ModelBackend::Onnx => onnx_context(paths, &manifest, decoder, schema),
        ModelBackend::Linear | ModelBackend::Auto => {
            let classifier = load_linear(paths, &manifest)?;
            classifier.check_schema(&schema)?;
            ModelContext::new(classifier, decoder, schema, LINEAR_PIPELINE_FILE)
        }
    }
}

#[cfg(feature = "onnx")]
fn onnx_context(
    paths: &ArtifactPaths,
    manifest: &Manifest,
    decoder: LabelEncoder,
    schema: FeatureSchema,
) -> CoreResult<ModelContext> {
    let classifier = load_onnx(paths, manifest)?;
    ModelContext::new(classifier, decoder, schema, ONNX_PIPELINE_FILE)
}

#[cfg(not(feature = "onnx"))]
fn onnx_context(
    _paths: &ArtifactPaths,
    _manifest: &Manifest,
    _decoder: LabelEncoder,
    _schema: FeatureSchema,
) -> CoreResult<ModelContext> {
    Err(AssessmentError::artifact(
        ONNX_PIPELINE_FILE,
        "built without the `onnx` feature",
    ))
}
