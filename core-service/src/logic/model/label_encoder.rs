//! Label Encoder - class code ↔ display label
//!
//! Loaded from the training pipeline's export, never recomputed. The class
//! list is stored in code order: `classes[i]` is the label for code `i`.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use super::classifier::ClassCode;
use crate::logic::error::{AssessmentError, CoreResult};

/// Decoding capability used by the invoker
pub trait LabelDecoder: Send + Sync {
    /// All labels, in class-code order
    fn classes(&self) -> &[String];

    /// Class code → label
    fn inverse_transform(&self, code: ClassCode) -> CoreResult<&str> {
        usize::try_from(code)
            .ok()
            .and_then(|i| self.classes().get(i))
            .map(String::as_str)
            .ok_or_else(|| {
                AssessmentError::SchemaMismatch(format!(
                    "class code {} not known to the label decoder ({} classes)",
                    code,
                    self.classes().len()
                ))
            })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LabelEncoder {
    classes: Vec<String>,
}

impl LabelEncoder {
    /// Build from a class list. The mapping must be bijective, so the list
    /// must be non-empty and free of duplicates.
    pub fn new(classes: Vec<String>) -> Result<Self, String> {
        if classes.is_empty() {
            return Err("label encoder has no classes".to_string());
        }

        let mut seen = HashSet::new();
        for class in &classes {
            if !seen.insert(class.as_str()) {
                return Err(format!("duplicate class '{}'", class));
            }
        }

        Ok(Self { classes })
    }

    /// Parse `{"classes": [...]}`
    pub fn from_json(bytes: &[u8], source: &str) -> CoreResult<Self> {
        #[derive(Deserialize)]
        struct LabelEncoderFile {
            classes: Vec<String>,
        }

        let file: LabelEncoderFile =
            serde_json::from_slice(bytes).map_err(|e| AssessmentError::artifact(source, e))?;

        Self::new(file.classes).map_err(|e| AssessmentError::artifact(source, e))
    }

    pub fn len(&self) -> usize {
        self.classes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.classes.is_empty()
    }
}

impl LabelDecoder for LabelEncoder {
    fn classes(&self) -> &[String] {
        &self.classes
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn encoder() -> LabelEncoder {
        LabelEncoder::from_json(br#"{"classes": ["high", "low", "medium"]}"#, "test").unwrap()
    }

    #[test]
    fn test_inverse_transform() {
        let enc = encoder();
        assert_eq!(enc.inverse_transform(0).unwrap(), "high");
        assert_eq!(enc.inverse_transform(2).unwrap(), "medium");
    }

    #[test]
    fn test_unknown_code_is_schema_mismatch() {
        let enc = encoder();
        assert!(matches!(
            enc.inverse_transform(3),
            Err(AssessmentError::SchemaMismatch(_))
        ));
        assert!(enc.inverse_transform(-1).is_err());
    }

    #[test]
    fn test_every_code_decodes() {
        let enc = encoder();
        for (code, label) in enc.classes().iter().enumerate() {
            assert_eq!(enc.inverse_transform(code as ClassCode).unwrap(), label);
        }
        assert_eq!(enc.len(), 3);
    }

    #[test]
    fn test_rejects_duplicates_and_empty() {
        let dup = LabelEncoder::from_json(br#"{"classes": ["low", "low"]}"#, "dup.json");
        assert!(matches!(dup, Err(AssessmentError::ArtifactUnavailable { .. })));

        assert!(LabelEncoder::from_json(br#"{"classes": []}"#, "empty.json").is_err());
        assert!(LabelEncoder::from_json(b"not json", "bad.json").is_err());
    }
}
