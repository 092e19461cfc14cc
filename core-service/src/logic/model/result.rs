//! Assessment Result types
//!
//! Data structures only. Probabilities stay in the model's class order;
//! the severity view is derived from label names, never from positions.

use serde::{Deserialize, Serialize};
use std::fmt;

// ============================================================================
// RISK LEVEL
// ============================================================================

/// Three-way severity classification
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskLevel {
    Low,
    Medium,
    High,
}

impl RiskLevel {
    /// Severity order
    pub const ALL: [RiskLevel; 3] = [RiskLevel::Low, RiskLevel::Medium, RiskLevel::High];

    pub fn as_str(&self) -> &'static str {
        match self {
            RiskLevel::Low => "low",
            RiskLevel::Medium => "medium",
            RiskLevel::High => "high",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            RiskLevel::Low => "Low",
            RiskLevel::Medium => "Medium",
            RiskLevel::High => "High",
        }
    }

    pub fn severity_level(&self) -> u8 {
        match self {
            RiskLevel::Low => 0,
            RiskLevel::Medium => 1,
            RiskLevel::High => 2,
        }
    }

    /// Match a decoder label, ignoring case and surrounding whitespace
    pub fn from_label(label: &str) -> Option<Self> {
        let label = label.trim();
        Self::ALL
            .into_iter()
            .find(|level| level.as_str().eq_ignore_ascii_case(label))
    }
}

impl fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// RESULT
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassProbability {
    pub label: String,
    pub probability: f64,
}

/// Outcome of one invocation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssessmentResult {
    pub predicted_label: String,
    /// One entry per decoder class, in the model's class order
    pub class_probabilities: Vec<ClassProbability>,
}

impl AssessmentResult {
    pub fn risk_level(&self) -> Option<RiskLevel> {
        RiskLevel::from_label(&self.predicted_label)
    }

    /// Raw probability vector, model order
    pub fn probabilities(&self) -> Vec<f64> {
        self.class_probabilities.iter().map(|c| c.probability).collect()
    }

    /// Probabilities ordered low → medium → high by label name. Labels that
    /// are not risk levels follow, in model order.
    pub fn severity_ordered(&self) -> Vec<ClassProbability> {
        let mut ordered = self.class_probabilities.clone();
        // stable sort keeps model order among unrecognised labels
        ordered.sort_by_key(|c| {
            RiskLevel::from_label(&c.label)
                .map(|level| level.severity_level())
                .unwrap_or(u8::MAX)
        });
        ordered
    }

    /// e.g. "Predicted Risk Level: HIGH"
    pub fn headline(&self) -> String {
        format!("Predicted Risk Level: {}", self.predicted_label.to_uppercase())
    }

    /// e.g. "Probabilities: Low 0.10, Medium 0.25, High 0.65"
    pub fn probability_summary(&self) -> String {
        let parts: Vec<String> = self
            .severity_ordered()
            .iter()
            .map(|c| {
                let name = RiskLevel::from_label(&c.label)
                    .map(|l| l.display_name().to_string())
                    .unwrap_or_else(|| c.label.clone());
                format!("{} {:.2}", name, c.probability)
            })
            .collect();

        format!("Probabilities: {}", parts.join(", "))
    }
}
