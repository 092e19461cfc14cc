//! Feature Schema - what the model expects to receive
//!
//! Built from the exported feature-name list. The export is either a plain
//! JSON list of names or an object that also carries categorical
//! vocabularies:
//!
//! ```json
//! { "feature_names": ["age", ...], "categories": { "gender": ["female", ...] } }
//! ```

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};

use crate::logic::error::{AssessmentError, CoreResult};
use crate::logic::features::{
    EmploymentStatus, FeatureRecord, FeatureValue, Gender, WorkEnvironment, FEATURE_LAYOUT,
};

#[derive(Deserialize)]
#[serde(untagged)]
enum FeatureNamesFile {
    List(Vec<String>),
    Detailed {
        feature_names: Vec<String>,
        #[serde(default)]
        categories: BTreeMap<String, Vec<String>>,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeatureSchema {
    feature_names: Vec<String>,
    /// Empty when the export carries no vocabularies
    categories: BTreeMap<String, Vec<String>>,
}

impl FeatureSchema {
    pub fn new(feature_names: Vec<String>) -> Self {
        Self {
            feature_names,
            categories: BTreeMap::new(),
        }
    }

    pub fn with_categories(mut self, categories: BTreeMap<String, Vec<String>>) -> Self {
        self.categories = categories;
        self
    }

    /// Schema matching this build's layout and form vocabularies
    pub fn canonical() -> Self {
        let mut categories = BTreeMap::new();
        categories.insert(
            Gender::FIELD.to_string(),
            Gender::ALL.iter().map(|g| g.as_str().to_string()).collect(),
        );
        categories.insert(
            EmploymentStatus::FIELD.to_string(),
            EmploymentStatus::ALL.iter().map(|e| e.as_str().to_string()).collect(),
        );
        categories.insert(
            WorkEnvironment::FIELD.to_string(),
            WorkEnvironment::ALL.iter().map(|w| w.as_str().to_string()).collect(),
        );

        Self::new(FEATURE_LAYOUT.iter().map(|s| s.to_string()).collect()).with_categories(categories)
    }

    /// Parse the feature-name export
    pub fn from_json(bytes: &[u8], source: &str) -> CoreResult<Self> {
        let file: FeatureNamesFile =
            serde_json::from_slice(bytes).map_err(|e| AssessmentError::artifact(source, e))?;

        let schema = match file {
            FeatureNamesFile::List(names) => Self::new(names),
            FeatureNamesFile::Detailed {
                feature_names,
                categories,
            } => Self::new(feature_names).with_categories(categories),
        };

        if schema.feature_names.is_empty() {
            return Err(AssessmentError::artifact(source, "feature name list is empty"));
        }

        let mut seen = HashSet::new();
        if let Some(dup) = schema.feature_names.iter().find(|n| !seen.insert(n.as_str())) {
            return Err(AssessmentError::artifact(
                source,
                format!("duplicate feature name '{}'", dup),
            ));
        }

        if let Some(stray) = schema
            .categories
            .keys()
            .find(|k| !schema.feature_names.contains(k))
        {
            return Err(AssessmentError::artifact(
                source,
                format!("vocabulary given for unknown feature '{}'", stray),
            ));
        }

        Ok(schema)
    }

    pub fn feature_names(&self) -> &[String] {
        &self.feature_names
    }

    pub fn categories(&self) -> &BTreeMap<String, Vec<String>> {
        &self.categories
    }

    /// Compare a provided name set to the expected one (order-insensitive,
    /// case-sensitive).
    pub fn check_names(&self, provided: &[&str]) -> CoreResult<()> {
        let provided_set: HashSet<&str> = provided.iter().copied().collect();
        let expected_set: HashSet<&str> = self.feature_names.iter().map(String::as_str).collect();

        let mut missing: Vec<&str> = expected_set.difference(&provided_set).copied().collect();
        let mut extra: Vec<&str> = provided_set.difference(&expected_set).copied().collect();

        if missing.is_empty() && extra.is_empty() {
            return Ok(());
        }

        missing.sort_unstable();
        extra.sort_unstable();
        Err(AssessmentError::SchemaMismatch(format!(
            "missing features {:?}, unexpected features {:?}",
            missing, extra
        )))
    }

    /// Full check of one record: names, then categorical vocabularies
    pub fn validate(&self, record: &FeatureRecord) -> CoreResult<()> {
        let values = record.values();
        let names: Vec<&str> = values.iter().map(|(n, _)| *n).collect();
        self.check_names(&names)?;

        for (name, value) in &values {
            let Some(vocabulary) = self.categories.get(*name) else {
                continue;
            };

            match value {
                FeatureValue::Category(v) if vocabulary.contains(v) => {}
                FeatureValue::Category(v) => {
                    return Err(AssessmentError::SchemaMismatch(format!(
                        "{} '{}' not in trained vocabulary {:?}",
                        name, v, vocabulary
                    )));
                }
                FeatureValue::Number(_) => {
                    return Err(AssessmentError::SchemaMismatch(format!(
                        "{} is numeric but the model expects a category",
                        name
                    )));
                }
            }
        }

        Ok(())
    }
}
