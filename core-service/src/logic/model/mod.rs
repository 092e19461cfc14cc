//! Model Module - Inference Invoker
//!
//! Loads the trained artifacts once and runs feature records through them.
//! Classifier and label decoder are traits so any backend (ONNX export,
//! JSON linear model, test stub) can be swapped in.

pub mod artifacts;
pub mod classifier;
pub mod inference;
pub mod label_encoder;
pub mod linear;
#[cfg(feature = "onnx")]
pub mod onnx;
pub mod result;
pub mod schema;

#[cfg(test)]
mod tests;

// Re-export common types
pub use artifacts::{load_context, ArtifactPaths, Manifest, ModelBackend};
pub use classifier::{ClassCode, Classifier, RawPrediction};
pub use inference::{EngineStatus, ModelContext, ModelMetadata};
pub use label_encoder::{LabelDecoder, LabelEncoder};
pub use linear::LinearClassifier;
#[cfg(feature = "onnx")]
pub use onnx::OnnxClassifier;
pub use result::{AssessmentResult, ClassProbability, RiskLevel};
pub use schema::FeatureSchema;
