//! ONNX Pipeline - ONNX Runtime integration
//!
//! Runs an ONNX export of the trained pipeline. The export is expected to
//! take one named input per feature (`[1, 1]` float tensors for numerics,
//! `[1, 1]` string tensors for categoricals) and to produce an int64 label
//! output plus a `[1, n_classes]` float probability output (skl2onnx with
//! zipmap disabled).

use parking_lot::Mutex;
use ort::session::{builder::GraphOptimizationLevel, Session, SessionInputValue};
use ort::value::Tensor;

use super::classifier::{ClassCode, Classifier, RawPrediction};
use crate::constants::{ONNX_LABEL_OUTPUT, ONNX_PROBABILITY_OUTPUT};
use crate::logic::error::{AssessmentError, CoreResult};
use crate::logic::features::{FeatureRecord, FeatureValue};

pub struct OnnxClassifier {
    /// A run needs exclusive access to the session
    session: Mutex<Session>,
    label_output: String,
    probability_output: String,
}

impl OnnxClassifier {
    /// Load from bytes already read (and checksum-verified) by the caller
    pub fn from_bytes(model_bytes: &[u8], source: &str) -> CoreResult<Self> {
        log::info!("Loading ONNX pipeline {} ({} bytes)", source, model_bytes.len());

        let session = Session::builder()
            .map_err(|e| AssessmentError::artifact(source, format!("session builder: {}", e)))?
            .with_optimization_level(GraphOptimizationLevel::Level3)
            .map_err(|e| AssessmentError::artifact(source, format!("optimization: {}", e)))?
            .commit_from_memory(model_bytes)
            .map_err(|e| AssessmentError::artifact(source, format!("load: {}", e)))?;

        log::info!("ONNX pipeline loaded");

        Ok(Self {
            session: Mutex::new(session),
            label_output: ONNX_LABEL_OUTPUT.to_string(),
            probability_output: ONNX_PROBABILITY_OUTPUT.to_string(),
        })
    }

    fn inputs(record: &FeatureRecord) -> CoreResult<Vec<(String, SessionInputValue<'static>)>> {
        record
            .values()
            .into_iter()
            .map(|(name, value)| {
                let tensor: SessionInputValue<'static> = match value {
                    FeatureValue::Number(n) => Tensor::from_array(([1usize, 1], vec![n as f32]))
                        .map(SessionInputValue::from),
                    FeatureValue::Category(c) => {
                        Tensor::from_string_array(([1usize, 1], &[c][..])).map(SessionInputValue::from)
                    }
                }
                .map_err(|e| AssessmentError::ModelFailure(format!("tensor '{}': {}", name, e)))?;

                Ok((name.to_string(), tensor))
            })
            .collect()
    }
}

impl Classifier for OnnxClassifier {
    fn name(&self) -> &str {
        "onnx"
    }

    fn predict(&self, record: &FeatureRecord) -> CoreResult<ClassCode> {
        Ok(self.classify(record)?.class_code)
    }

    fn predict_proba(&self, record: &FeatureRecord) -> CoreResult<Vec<f64>> {
        Ok(self.classify(record)?.probabilities)
    }

    fn classify(&self, record: &FeatureRecord) -> CoreResult<RawPrediction> {
        let inputs = Self::inputs(record)?;

        let mut session = self.session.lock();
        let outputs = session
            .run(inputs)
            .map_err(|e| AssessmentError::ModelFailure(format!("inference failed: {}", e)))?;

        let label = outputs.get(self.label_output.as_str()).ok_or_else(|| {
            AssessmentError::SchemaMismatch(format!("no '{}' output", self.label_output))
        })?;
        let (_, codes) = label
            .try_extract_tensor::<i64>()
            .map_err(|e| AssessmentError::ModelFailure(format!("label output: {}", e)))?;
        let class_code = *codes
            .first()
            .ok_or_else(|| AssessmentError::ModelFailure("empty label output".to_string()))?;

        let probs = outputs.get(self.probability_output.as_str()).ok_or_else(|| {
            AssessmentError::SchemaMismatch(format!("no '{}' output", self.probability_output))
        })?;
        let (_, data) = probs
            .try_extract_tensor::<f32>()
            .map_err(|e| AssessmentError::ModelFailure(format!("probability output: {}", e)))?;

        Ok(RawPrediction {
            class_code,
            probabilities: data.iter().map(|&p| p as f64).collect(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_garbage_bytes_are_unavailable() {
        let err = OnnxClassifier::from_bytes(b"not a model", "broken.onnx")
            .err()
            .expect("garbage bytes must not load");

        match err {
            AssessmentError::ArtifactUnavailable { artifact, .. } => {
                assert_eq!(artifact, "broken.onnx");
            }
            other => panic!("expected ArtifactUnavailable, got {:?}", other),
        }
    }

    #[test]
    fn test_empty_model_is_unavailable() {
        assert!(matches!(
            OnnxClassifier::from_bytes(&[], "empty.onnx"),
            Err(AssessmentError::ArtifactUnavailable { .. })
        ));
    }
}
