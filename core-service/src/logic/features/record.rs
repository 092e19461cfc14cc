//! Feature Record - model-ready input derived from one submission
//!
//! Field names match the names the model was trained on exactly; the
//! canonical order lives in `layout.rs`.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use super::assessment::RawAssessment;
use super::layout::{layout_hash, FEATURE_LAYOUT, FEATURE_VERSION};
use super::scoring;

// ============================================================================
// FEATURE VALUE
// ============================================================================

/// A single named input to the classifier
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FeatureValue {
    Number(f64),
    Category(String),
}

impl FeatureValue {
    pub fn as_number(&self) -> Option<f64> {
        match self {
            FeatureValue::Number(n) => Some(*n),
            FeatureValue::Category(_) => None,
        }
    }

    pub fn as_category(&self) -> Option<&str> {
        match self {
            FeatureValue::Category(c) => Some(c),
            FeatureValue::Number(_) => None,
        }
    }
}

// ============================================================================
// FEATURE RECORD
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeatureRecord {
    // Pass-through numerics
    pub age: u32,
    pub stress_level: u8,
    pub sleep_hours: f64,
    pub physical_activity_days: u8,

    // Composite scores, always within [0, 100]
    pub depression_score: f64,
    pub anxiety_score: f64,
    pub social_support_score: f64,
    pub productivity_score: f64,

    // 1 = "yes", 0 = anything else
    pub mental_health_history: u8,
    pub seeks_treatment: u8,

    // Pass-through categoricals
    pub gender: String,
    pub employment_status: String,
    pub work_environment: String,
}

impl FeatureRecord {
    /// Named values in `FEATURE_LAYOUT` order
    pub fn values(&self) -> Vec<(&'static str, FeatureValue)> {
        use FeatureValue::{Category, Number};

        let values = vec![
            Number(self.age as f64),
            Number(self.stress_level as f64),
            Number(self.sleep_hours),
            Number(self.physical_activity_days as f64),
            Number(self.depression_score),
            Number(self.anxiety_score),
            Number(self.social_support_score),
            Number(self.productivity_score),
            Number(self.mental_health_history as f64),
            Number(self.seeks_treatment as f64),
            Category(self.gender.clone()),
            Category(self.employment_status.clone()),
            Category(self.work_environment.clone()),
        ];

        FEATURE_LAYOUT.iter().copied().zip(values).collect()
    }

    /// Feature names this record provides
    pub fn feature_names(&self) -> &'static [&'static str] {
        FEATURE_LAYOUT
    }

    /// Get feature by name
    pub fn get(&self, name: &str) -> Option<FeatureValue> {
        self.values()
            .into_iter()
            .find(|(n, _)| *n == name)
            .map(|(_, v)| v)
    }

    /// The four composite scores, in layout order
    pub fn composite_scores(&self) -> [f64; 4] {
        [
            self.depression_score,
            self.anxiety_score,
            self.social_support_score,
            self.productivity_score,
        ]
    }

    /// Convert to JSON for debug logging
    pub fn to_log_entry(&self) -> serde_json::Value {
        serde_json::json!({
            "feature_version": FEATURE_VERSION,
            "layout_hash": layout_hash(),
            "named_values": self.values().into_iter().collect::<HashMap<_, _>>(),
        })
    }
}

// ============================================================================
// DERIVER
// ============================================================================

/// Raw answers → feature record. Stateless and pure.
#[derive(Debug, Clone, Copy, Default)]
pub struct FeatureDeriver;

impl FeatureDeriver {
    pub fn new() -> Self {
        Self
    }

    /// Build the record for one (already validated) submission
    pub fn derive(&self, raw: &RawAssessment) -> FeatureRecord {
        FeatureRecord {
            age: raw.age,
            stress_level: raw.stress_level,
            sleep_hours: raw.sleep_hours,
            physical_activity_days: raw.physical_activity_days,
            depression_score: scoring::depression_score(&raw.depression_items),
            anxiety_score: scoring::anxiety_score(&raw.anxiety_items),
            social_support_score: scoring::social_support_score(&raw.social_support_items),
            productivity_score: scoring::productivity_score(&raw.productivity_items),
            mental_health_history: scoring::yes_no_flag(&raw.mental_health_history),
            seeks_treatment: scoring::yes_no_flag(&raw.seeks_treatment),
            gender: raw.gender.as_str().to_string(),
            employment_status: raw.employment_status.as_str().to_string(),
            work_environment: raw.work_environment.as_str().to_string(),
        }
    }
}
