//! Central Configuration Constants
//!
//! Single source of truth for artifact names and presentation text.
//! Callers can override artifact locations through the environment.

use std::path::PathBuf;

/// App name
pub const APP_NAME: &str = "InnerSight";

/// Title shown above every result
pub const APP_TITLE: &str = "InnerSight — Mental Health Risk Intelligence";

/// Must accompany every rendered result
pub const DISCLAIMER: &str =
    "This tool provides an AI-powered screening estimate. It is not a clinical diagnosis.";

/// App version
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

// ============================================
// Artifact file names
// ============================================

/// Default artifacts directory (relative to the working directory)
pub const DEFAULT_ARTIFACTS_DIR: &str = "./artifacts";

/// ONNX export of the trained pipeline
pub const ONNX_PIPELINE_FILE: &str = "innersight_pipeline.onnx";

/// JSON export of the linear pipeline
pub const LINEAR_PIPELINE_FILE: &str = "innersight_linear.json";

/// Label encoder classes (index = class code)
pub const LABEL_ENCODER_FILE: &str = "label_encoder.json";

/// Feature names the model was trained on
pub const FEATURE_NAMES_FILE: &str = "feature_names.json";

/// Optional SHA-256 digests of the files above
pub const MANIFEST_FILE: &str = "manifest.json";

/// Global feature importance image
pub const SHAP_IMAGE_FILE: &str = "shap_summary.png";

// ============================================
// ONNX graph names
// ============================================

/// Predicted class output (skl2onnx, zipmap disabled)
pub const ONNX_LABEL_OUTPUT: &str = "label";

/// Class probability output (skl2onnx, zipmap disabled)
pub const ONNX_PROBABILITY_OUTPUT: &str = "probabilities";

/// Tolerance for the probability sum check
pub const PROBABILITY_SUM_TOLERANCE: f64 = 1e-6;

// ============================================
// Helper functions to read from env with fallback
// ============================================

/// Get artifacts directory from environment or use default
pub fn get_artifacts_dir() -> PathBuf {
    std::env::var("ARTIFACTS_DIR")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from(DEFAULT_ARTIFACTS_DIR))
}

/// Get model backend name from environment ("auto" when unset)
pub fn get_model_backend() -> String {
    std::env::var("MODEL_BACKEND").unwrap_or_else(|_| "auto".to_string())
}
