//! Classifier capability
//!
//! Any backend that can map a feature record to a class code and a
//! probability distribution can sit behind the invoker: an ONNX export,
//! the JSON linear model, or a stub in tests.

use serde::{Deserialize, Serialize};

use crate::logic::error::CoreResult;
use crate::logic::features::FeatureRecord;

/// Model-internal class identifier (label encoder index)
pub type ClassCode = i64;

/// Undecoded model output for one record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawPrediction {
    pub class_code: ClassCode,
    /// In the model's internal class order
    pub probabilities: Vec<f64>,
}

/// Trait for classifier backends (ONNX, linear, stubs)
pub trait Classifier: Send + Sync {
    /// Backend name for status/logging ("onnx", "linear", ...)
    fn name(&self) -> &str;

    fn predict(&self, record: &FeatureRecord) -> CoreResult<ClassCode>;

    fn predict_proba(&self, record: &FeatureRecord) -> CoreResult<Vec<f64>>;

    /// Class count when the backend knows it without running
    fn class_count(&self) -> Option<usize> {
        None
    }

    /// Both outputs at once. Backends that produce them in one pass
    /// should override this.
    fn classify(&self, record: &FeatureRecord) -> CoreResult<RawPrediction> {
        Ok(RawPrediction {
            class_code: self.predict(record)?,
            probabilities: self.predict_proba(record)?,
        })
    }
}

impl<T: Classifier + ?Sized> Classifier for Box<T> {
    fn name(&self) -> &str {
        (**self).name()
    }

    fn predict(&self, record: &FeatureRecord) -> CoreResult<ClassCode> {
        (**self).predict(record)
    }

    fn predict_proba(&self, record: &FeatureRecord) -> CoreResult<Vec<f64>> {
        (**self).predict_proba(record)
    }

    fn class_count(&self) -> Option<usize> {
        (**self).class_count()
    }

    fn classify(&self, record: &FeatureRecord) -> CoreResult<RawPrediction> {
        (**self).classify(record)
    }
}

/// Index of the largest probability (first wins on ties)
pub fn argmax(probabilities: &[f64]) -> Option<usize> {
    probabilities
        .iter()
        .enumerate()
        .fold(None, |best: Option<(usize, f64)>, (i, &p)| match best {
            Some((_, bp)) if bp >= p => best,
            _ => Some((i, p)),
        })
        .map(|(i, _)| i)
}
