//! Configuration module

use anyhow::anyhow;
use std::env;
use std::path::PathBuf;

use innersight_core::constants::{get_artifacts_dir, get_model_backend, SHAP_IMAGE_FILE};
use innersight_core::ModelBackend;

/// Application configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Server port
    pub port: u16,

    /// Directory holding the model artifacts
    pub artifacts_dir: PathBuf,

    /// Requested classifier backend
    pub model_backend: ModelBackend,

    /// Feature importance image served by `/api/v1/explanation`
    pub explanation_image: PathBuf,

    /// Environment (development, production)
    pub environment: String,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// An unrecognised `MODEL_BACKEND` is an error rather than a silent
    /// fallback to auto-selection.
    pub fn from_env() -> anyhow::Result<Self> {
        let artifacts_dir = get_artifacts_dir();

        Ok(Self {
            port: env::var("PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(8080),

            model_backend: parse_backend(&get_model_backend())?,

            explanation_image: env::var("EXPLANATION_IMAGE")
                .map(PathBuf::from)
                .unwrap_or_else(|_| artifacts_dir.join(SHAP_IMAGE_FILE)),

            artifacts_dir,

            environment: env::var("ENVIRONMENT")
                .unwrap_or_else(|_| "development".to_string()),
        })
    }

    /// Check if running in production
    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }
}

fn parse_backend(raw: &str) -> anyhow::Result<ModelBackend> {
    raw.parse()
        .map_err(|e| anyhow!("MODEL_BACKEND: {} (expected auto, onnx or linear)", e))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_backend() {
        assert_eq!(parse_backend("auto").unwrap(), ModelBackend::Auto);
        assert_eq!(parse_backend("Linear").unwrap(), ModelBackend::Linear);
        assert_eq!(parse_backend("").unwrap(), ModelBackend::Auto);
    }

    #[test]
    fn test_unknown_backend_is_rejected() {
        let err = parse_backend("onxx").unwrap_err().to_string();
        assert!(err.contains("MODEL_BACKEND"));
        assert!(err.contains("onxx"));
    }
}
