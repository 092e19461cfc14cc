//! Linear Pipeline - multinomial logistic regression from JSON
//!
//! Mirrors a standard-scaler + one-hot + logistic-regression pipeline:
//!
//! ```text
//! x = [ (num - mean) / scale ... | one-hot(cat) ... ]
//! p = softmax(W·x + b)
//! ```
//!
//! Deterministic and free of native dependencies, so it can serve when no
//! ONNX runtime is available.

use ndarray::{Array1, Array2};
use serde::{Deserialize, Serialize};

use super::classifier::{argmax, ClassCode, Classifier, RawPrediction};
use super::schema::FeatureSchema;
use crate::logic::error::{AssessmentError, CoreResult};
use crate::logic::features::{FeatureRecord, FeatureValue};

// ============================================================================
// SERIALIZED FORM
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NumericInput {
    pub name: String,
    pub mean: f64,
    pub scale: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategoricalInput {
    pub name: String,
    pub categories: Vec<String>,
}

/// On-disk layout of `innersight_linear.json`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LinearModelFile {
    pub numeric_features: Vec<NumericInput>,
    pub categorical_features: Vec<CategoricalInput>,
    /// One per class, in class-code order
    pub intercepts: Vec<f64>,
    /// `[n_classes][n_inputs]`, numeric inputs first then one-hot blocks
    pub coefficients: Vec<Vec<f64>>,
}

// ============================================================================
// CLASSIFIER
// ============================================================================

#[derive(Debug, Clone)]
pub struct LinearClassifier {
    numeric: Vec<NumericInput>,
    categorical: Vec<CategoricalInput>,
    weights: Array2<f64>,
    intercepts: Array1<f64>,
}

impl LinearClassifier {
    /// Validate shapes and build the weight matrix
    pub fn from_file(file: LinearModelFile) -> Result<Self, String> {
        let n_classes = file.intercepts.len();
        if n_classes < 2 {
            return Err(format!("need at least 2 classes, got {}", n_classes));
        }
        if file.coefficients.len() != n_classes {
            return Err(format!(
                "{} coefficient rows for {} intercepts",
                file.coefficients.len(),
                n_classes
            ));
        }

        for input in &file.numeric_features {
            if !input.mean.is_finite() || !input.scale.is_finite() || input.scale == 0.0 {
                return Err(format!("invalid scaler for '{}'", input.name));
            }
        }
        if let Some(empty) = file.categorical_features.iter().find(|c| c.categories.is_empty()) {
            return Err(format!("no categories for '{}'", empty.name));
        }

        let width = file.numeric_features.len()
            + file
                .categorical_features
                .iter()
                .map(|c| c.categories.len())
                .sum::<usize>();

        let mut flat = Vec::with_capacity(n_classes * width);
        for (class, row) in file.coefficients.iter().enumerate() {
            if row.len() != width {
                return Err(format!(
                    "coefficient row {} has {} values, expected {}",
                    class,
                    row.len(),
                    width
                ));
            }
            flat.extend_from_slice(row);
        }

        let weights = Array2::from_shape_vec((n_classes, width), flat).map_err(|e| e.to_string())?;

        Ok(Self {
            numeric: file.numeric_features,
            categorical: file.categorical_features,
            weights,
            intercepts: Array1::from(file.intercepts),
        })
    }

    pub fn from_json(bytes: &[u8], source: &str) -> CoreResult<Self> {
        let file: LinearModelFile =
            serde_json::from_slice(bytes).map_err(|e| AssessmentError::artifact(source, e))?;
        Self::from_file(file).map_err(|e| AssessmentError::artifact(source, e))
    }

    /// Names of every feature this model reads
    pub fn input_names(&self) -> Vec<&str> {
        self.numeric
            .iter()
            .map(|n| n.name.as_str())
            .chain(self.categorical.iter().map(|c| c.name.as_str()))
            .collect()
    }

    /// Fail unless this model reads exactly the schema's features and knows
    /// every category the schema accepts.
    pub fn check_schema(&self, schema: &FeatureSchema) -> CoreResult<()> {
        schema.check_names(&self.input_names())?;

        for input in &self.categorical {
            let Some(vocabulary) = schema.categories().get(&input.name) else {
                continue;
            };

            let unknown: Vec<&str> = vocabulary
                .iter()
                .filter(|v| !input.categories.contains(*v))
                .map(String::as_str)
                .collect();
            if !unknown.is_empty() {
                return Err(AssessmentError::SchemaMismatch(format!(
                    "linear model has no weights for {} {:?}",
                    input.name, unknown
                )));
            }
        }

        Ok(())
    }

    /// Scale numerics and one-hot categoricals
    fn encode(&self, record: &FeatureRecord) -> CoreResult<Array1<f64>> {
        let mut x = Array1::zeros(self.weights.ncols());

        for (i, input) in self.numeric.iter().enumerate() {
            let value = record
                .get(&input.name)
                .and_then(|v| v.as_number())
                .ok_or_else(|| {
                    AssessmentError::SchemaMismatch(format!(
                        "model expects numeric feature '{}'",
                        input.name
                    ))
                })?;
            x[i] = (value - input.mean) / input.scale;
        }

        let mut offset = self.numeric.len();
        for input in &self.categorical {
            let value = match record.get(&input.name) {
                Some(FeatureValue::Category(v)) => v,
                _ => {
                    return Err(AssessmentError::SchemaMismatch(format!(
                        "model expects categorical feature '{}'",
                        input.name
                    )))
                }
            };

            let slot = input
                .categories
                .iter()
                .position(|c| *c == value)
                .ok_or_else(|| {
                    AssessmentError::SchemaMismatch(format!(
                        "{} '{}' was not seen during training",
                        input.name, value
                    ))
                })?;

            x[offset + slot] = 1.0;
            offset += input.categories.len();
        }

        Ok(x)
    }

    fn probabilities(&self, record: &FeatureRecord) -> CoreResult<Vec<f64>> {
        let x = self.encode(record)?;
        let logits = self.weights.dot(&x) + &self.intercepts;
        Ok(softmax(logits.as_slice().unwrap_or(&[])))
    }
}

impl Classifier for LinearClassifier {
    fn name(&self) -> &str {
        "linear"
    }

    fn predict(&self, record: &FeatureRecord) -> CoreResult<ClassCode> {
        Ok(self.classify(record)?.class_code)
    }

    fn predict_proba(&self, record: &FeatureRecord) -> CoreResult<Vec<f64>> {
        self.probabilities(record)
    }

    fn class_count(&self) -> Option<usize> {
        Some(self.intercepts.len())
    }

    fn classify(&self, record: &FeatureRecord) -> CoreResult<RawPrediction> {
        let probabilities = self.probabilities(record)?;
        let class_code = argmax(&probabilities)
            .ok_or_else(|| AssessmentError::ModelFailure("empty probability vector".to_string()))?
            as ClassCode;

        Ok(RawPrediction {
            class_code,
            probabilities,
        })
    }
}

/// Numerically stable softmax
pub fn softmax(logits: &[f64]) -> Vec<f64> {
    let max = logits.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let exps: Vec<f64> = logits.iter().map(|l| (l - max).exp()).collect();
    let total: f64 = exps.iter().sum();
    exps.into_iter().map(|e| e / total).collect()
}
