//! Inference Invoker - one feature record in, one labelled result out
//!
//! `ModelContext` holds the loaded artifacts. Build it once, share it
//! read-only (e.g. behind an `Arc`) and call `invoke` per request.

use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Instant;

use super::classifier::Classifier;
use super::label_encoder::LabelDecoder;
use super::result::{AssessmentResult, ClassProbability};
use super::schema::FeatureSchema;
use crate::constants::PROBABILITY_SUM_TOLERANCE;
use crate::logic::error::{AssessmentError, CoreResult};
use crate::logic::features::{FeatureRecord, LayoutInfo, FEATURE_LAYOUT};

// ============================================================================
// DATA STRUCTURES
// ============================================================================

/// Describes the loaded artifacts
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelMetadata {
    pub backend: String,
    pub source: String,
    pub labels: Vec<String>,
    pub feature_names: Vec<String>,
    pub layout: LayoutInfo,
    pub loaded_at: chrono::DateTime<chrono::Utc>,
}

/// Engine status for status endpoints
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EngineStatus {
    pub backend: String,
    pub labels: Vec<String>,
    pub avg_latency_ms: f64,
    pub inference_count: u64,
    pub failure_count: u64,
}

// ============================================================================
// CONTEXT
// ============================================================================

pub struct ModelContext {
    classifier: Box<dyn Classifier>,
    decoder: Box<dyn LabelDecoder>,
    schema: FeatureSchema,
    metadata: ModelMetadata,
    latency_sum_us: AtomicU64,
    inference_count: AtomicU64,
    failure_count: AtomicU64,
}

impl ModelContext {
    /// Assemble a context from already-loaded artifacts.
    ///
    /// Fails with `SchemaMismatch` when the expected feature names diverge
    /// from the layout this build derives, or when the classifier and the
    /// decoder disagree on the number of classes.
    pub fn new(
        classifier: impl Classifier + 'static,
        decoder: impl LabelDecoder + 'static,
        schema: FeatureSchema,
        source: impl Into<String>,
    ) -> CoreResult<Self> {
        schema.check_names(FEATURE_LAYOUT)?;

        let labels = decoder.classes().to_vec();
        if let Some(n) = classifier.class_count() {
            if n != labels.len() {
                return Err(AssessmentError::SchemaMismatch(format!(
                    "classifier has {} classes, label decoder has {}",
                    n,
                    labels.len()
                )));
            }
        }

        let metadata = ModelMetadata {
            backend: classifier.name().to_string(),
            source: source.into(),
            labels,
            feature_names: schema.feature_names().to_vec(),
            layout: LayoutInfo::current(),
            loaded_at: chrono::Utc::now(),
        };

        log::info!(
            "Model context ready: backend={} labels={:?} layout_hash={:08x}",
            metadata.backend,
            metadata.labels,
            metadata.layout.hash
        );

        Ok(Self {
            classifier: Box::new(classifier),
            decoder: Box::new(decoder),
            schema,
            metadata,
            latency_sum_us: AtomicU64::new(0),
            inference_count: AtomicU64::new(0),
            failure_count: AtomicU64::new(0),
        })
    }

    pub fn metadata(&self) -> &ModelMetadata {
        &self.metadata
    }

    pub fn schema(&self) -> &FeatureSchema {
        &self.schema
    }

    pub fn labels(&self) -> &[String] {
        self.decoder.classes()
    }

    pub fn status(&self) -> EngineStatus {
        let sum = self.latency_sum_us.load(Ordering::Relaxed);
        let count = self.inference_count.load(Ordering::Relaxed);
        let avg = if count > 0 {
            (sum as f64 / count as f64) / 1000.0
        } else {
            0.0
        };

        EngineStatus {
            backend: self.metadata.backend.clone(),
            labels: self.metadata.labels.clone(),
            avg_latency_ms: avg,
            inference_count: count,
            failure_count: self.failure_count.load(Ordering::Relaxed),
        }
    }

    /// Run one record through the classifier and decode the result.
    ///
    /// Probabilities are returned in the model's class order, each paired
    /// with the decoder's label for that index.
    pub fn invoke(&self, record: &FeatureRecord) -> CoreResult<AssessmentResult> {
        let start = Instant::now();

        let outcome = self.run(record);

        match &outcome {
            Ok(result) => {
                let elapsed = start.elapsed().as_micros() as u64;
                self.latency_sum_us.fetch_add(elapsed, Ordering::Relaxed);
                self.inference_count.fetch_add(1, Ordering::Relaxed);
                log::debug!(
                    "Inference ok: label={} in {}us ({})",
                    result.predicted_label,
                    elapsed,
                    self.metadata.backend
                );
            }
            Err(e) => {
                self.failure_count.fetch_add(1, Ordering::Relaxed);
                log::warn!("Inference failed: {}", e);
            }
        }

        outcome
    }

    fn run(&self, record: &FeatureRecord) -> CoreResult<AssessmentResult> {
        self.schema.validate(record)?;

        let prediction = self.classifier.classify(record)?;
        let labels = self.decoder.classes();

        check_distribution(&prediction.probabilities, labels.len())?;

        let predicted_label = self.decoder.inverse_transform(prediction.class_code)?.to_string();

        let class_probabilities = labels
            .iter()
            .zip(prediction.probabilities)
            .map(|(label, probability)| ClassProbability {
                label: label.clone(),
                probability,
            })
            .collect();

        Ok(AssessmentResult {
            predicted_label,
            class_probabilities,
        })
    }
}

/// One entry per class, each in [0, 1], summing to 1
fn check_distribution(probabilities: &[f64], class_count: usize) -> CoreResult<()> {
    if probabilities.len() != class_count {
        return Err(AssessmentError::SchemaMismatch(format!(
            "model returned {} probabilities for {} labels",
            probabilities.len(),
            class_count
        )));
    }

    if let Some(bad) = probabilities
        .iter()
        .find(|p| !p.is_finite() || **p < 0.0 || **p > 1.0)
    {
        return Err(AssessmentError::ModelFailure(format!(
            "probability {} outside [0, 1]",
            bad
        )));
    }

    let total: f64 = probabilities.iter().sum();
    if (total - 1.0).abs() > PROBABILITY_SUM_TOLERANCE {
        return Err(AssessmentError::ModelFailure(format!(
            "probabilities sum to {}",
            total
        )));
    }

    Ok(())
}
