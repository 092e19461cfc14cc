//! Error taxonomy for the assessment core
//!
//! Every failure is terminal for the invocation that produced it; nothing
//! here is retried.

use thiserror::Error;

pub type CoreResult<T> = Result<T, AssessmentError>;

#[derive(Debug, Error)]
pub enum AssessmentError {
    /// Model, decoder or feature-name artifact missing, unreadable or corrupt.
    /// Fatal for the process.
    #[error("artifact unavailable: {artifact}: {reason}")]
    ArtifactUnavailable { artifact: String, reason: String },

    /// Feature record does not match what the model was trained on.
    #[error("schema mismatch: {0}")]
    SchemaMismatch(String),

    /// Raw answer outside its declared bounds.
    #[error("{field} = {value} is outside [{min}, {max}]")]
    InvalidInputRange {
        field: &'static str,
        value: f64,
        min: f64,
        max: f64,
    },

    /// `min == max` or non-finite bounds
    #[error("invalid scale bounds [{min}, {max}]")]
    InvalidScaleBounds { min: f64, max: f64 },

    /// Backend runtime error or malformed model output.
    #[error("model failure: {0}")]
    ModelFailure(String),
}

impl AssessmentError {
    pub fn artifact(artifact: impl Into<String>, reason: impl std::fmt::Display) -> Self {
        AssessmentError::ArtifactUnavailable {
            artifact: artifact.into(),
            reason: reason.to_string(),
        }
    }

    pub fn out_of_range(field: &'static str, value: f64, min: f64, max: f64) -> Self {
        AssessmentError::InvalidInputRange {
            field,
            value,
            min,
            max,
        }
    }
}
