//! Feature Layout - Centralized Feature Definition
//!
//! **This file controls the feature schema the model was trained on.**
//!
//! ## Rules:
//! 1. Add feature → increment FEATURE_VERSION
//! 2. Rename feature → increment FEATURE_VERSION (names are matched case-sensitively)
//! 3. Remove feature → increment FEATURE_VERSION

use crc32fast::Hasher;
use serde::{Deserialize, Serialize};

// ============================================================================
// FEATURE VERSION
// ============================================================================

/// Current feature layout version
pub const FEATURE_VERSION: u8 = 1;

// ============================================================================
// FEATURE LAYOUT (Authoritative source)
// ============================================================================

/// Feature names in canonical order
pub const FEATURE_LAYOUT: &[&str] = &[
    // === Pass-through numerics (0-3) ===
    "age",
    "stress_level",
    "sleep_hours",
    "physical_activity_days",

    // === Composite scores, 0-100 (4-7) ===
    "depression_score",
    "anxiety_score",
    "social_support_score",
    "productivity_score",

    // === Recoded yes/no flags (8-9) ===
    "mental_health_history",
    "seeks_treatment",

    // === Pass-through categoricals (10-12) ===
    "gender",
    "employment_status",
    "work_environment",
];

/// Total number of features
pub const FEATURE_COUNT: usize = 13;

// ============================================================================
// LAYOUT HASH
// ============================================================================

/// CRC32 over version byte + NUL-separated names
pub fn layout_hash() -> u32 {
    let mut hasher = Hasher::new();
    hasher.update(&[FEATURE_VERSION]);

    for name in FEATURE_LAYOUT {
        hasher.update(name.as_bytes());
        hasher.update(&[0]);
    }

    hasher.finalize()
}

// ============================================================================
// LAYOUT INFO
// ============================================================================

/// Complete layout information for serialization/logging
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LayoutInfo {
    pub version: u8,
    pub hash: u32,
    pub feature_count: usize,
    pub feature_names: Vec<String>,
}

impl LayoutInfo {
    pub fn current() -> Self {
        Self {
            version: FEATURE_VERSION,
            hash: layout_hash(),
            feature_count: FEATURE_COUNT,
            feature_names: FEATURE_LAYOUT.iter().map(|s| s.to_string()).collect(),
        }
    }
}

impl Default for LayoutInfo {
    fn default() -> Self {
        Self::current()
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_feature_count() {
        assert_eq!(FEATURE_LAYOUT.len(), FEATURE_COUNT);
    }

    #[test]
    fn test_layout_hash_stable() {
        assert_eq!(layout_hash(), layout_hash());
        assert_ne!(layout_hash(), 0);
    }

    #[test]
    fn test_names_are_case_sensitive() {
        assert!(FEATURE_LAYOUT.contains(&"age"));
        assert!(!FEATURE_LAYOUT.contains(&"Age"));
        assert_eq!(FEATURE_LAYOUT[7], "productivity_score");
    }

    #[test]
    fn test_layout_info() {
        let info = LayoutInfo::current();
        assert_eq!(info.version, FEATURE_VERSION);
        assert_eq!(info.feature_names.len(), FEATURE_COUNT);
        assert_eq!(info.feature_names.last().map(String::as_str), Some("work_environment"));
    }
}
