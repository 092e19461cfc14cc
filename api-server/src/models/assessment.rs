//! Assessment request/response models

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::{Validate, ValidationError};

use innersight_core::constants::{APP_TITLE, DISCLAIMER};
use innersight_core::logic::engine::Assessment;
use innersight_core::logic::features::assessment::{LIKERT_ITEM_MAX, SYMPTOM_ITEM_MAX};
use innersight_core::logic::features::UnknownCategory;
use innersight_core::{
    ClassProbability, EmploymentStatus, FeatureRecord, Gender, RawAssessment, RiskLevel,
    WorkEnvironment,
};

use crate::{AppError, AppResult};

/// Request fields in the order the form presents them
pub const FORM_FIELDS: [&str; 13] = [
    "age",
    "gender",
    "employment_status",
    "work_environment",
    "mental_health_history",
    "seeks_treatment",
    "stress_level",
    "sleep_hours",
    "physical_activity_days",
    "depression_items",
    "anxiety_items",
    "social_support_items",
    "productivity_items",
];

/// Raw answers as posted by the form
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct AssessmentRequest {
    #[validate(range(min = 12, max = 100, message = "age must be between 12 and 100"))]
    pub age: u32,
    pub gender: String,
    pub employment_status: String,
    pub work_environment: String,
    pub mental_health_history: String,
    pub seeks_treatment: String,
    #[validate(range(min = 0, max = 10, message = "stress_level must be between 0 and 10"))]
    pub stress_level: u8,
    #[validate(range(min = 0.0, max = 12.0, message = "sleep_hours must be between 0 and 12"))]
    pub sleep_hours: f64,
    #[validate(range(min = 0, max = 7, message = "physical_activity_days must be between 0 and 7"))]
    pub physical_activity_days: u8,
    #[validate(custom(function = "symptom_items"))]
    pub depression_items: [u8; 3],
    #[validate(custom(function = "symptom_items"))]
    pub anxiety_items: [u8; 3],
    #[validate(custom(function = "likert_items"))]
    pub social_support_items: [u8; 2],
    #[validate(custom(function = "likert_items"))]
    pub productivity_items: [u8; 2],
}

fn symptom_items(items: &[u8; 3]) -> Result<(), ValidationError> {
    items_within(items, SYMPTOM_ITEM_MAX)
}

fn likert_items(items: &[u8; 2]) -> Result<(), ValidationError> {
    items_within(items, LIKERT_ITEM_MAX)
}

fn items_within(items: &[u8], max: u8) -> Result<(), ValidationError> {
    if items.iter().all(|&i| i <= max) {
        return Ok(());
    }

    let mut err = ValidationError::new("range");
    err.message = Some(format!("every item must be between 0 and {}", max).into());
    Err(err)
}

fn category<T>(value: &str) -> AppResult<T>
where
    T: std::str::FromStr<Err = UnknownCategory>,
{
    value
        .parse()
        .map_err(|e: UnknownCategory| AppError::invalid(e.field, e.to_string()))
}

impl AssessmentRequest {
    /// Check bounds and choice lists, then hand over to the core
    pub fn into_raw(self) -> AppResult<RawAssessment> {
        self.validate()?;
        RawAssessment::try_from(self)
    }
}

impl TryFrom<AssessmentRequest> for RawAssessment {
    type Error = AppError;

    fn try_from(req: AssessmentRequest) -> Result<Self, Self::Error> {
        Ok(RawAssessment {
            age: req.age,
            gender: category::<Gender>(&req.gender)?,
            employment_status: category::<EmploymentStatus>(&req.employment_status)?,
            work_environment: category::<WorkEnvironment>(&req.work_environment)?,
            mental_health_history: req.mental_health_history,
            seeks_treatment: req.seeks_treatment,
            stress_level: req.stress_level,
            sleep_hours: req.sleep_hours,
            physical_activity_days: req.physical_activity_days,
            depression_items: req.depression_items,
            anxiety_items: req.anxiety_items,
            social_support_items: req.social_support_items,
            productivity_items: req.productivity_items,
        })
    }
}

/// Rendered result of one assessment
#[derive(Debug, Serialize)]
pub struct AssessmentResponse {
    pub id: Uuid,
    pub assessed_at: DateTime<Utc>,
    pub title: &'static str,
    pub disclaimer: &'static str,
    pub predicted_label: String,
    pub risk_level: Option<RiskLevel>,
    pub headline: String,
    pub summary: String,
    /// Model class order
    pub probabilities: Vec<ClassProbability>,
    /// low → medium → high
    pub severity_ordered: Vec<ClassProbability>,
    pub features: FeatureRecord,
}

impl From<Assessment> for AssessmentResponse {
    fn from(assessment: Assessment) -> Self {
        let Assessment { features, result } = assessment;

        Self {
            id: Uuid::new_v4(),
            assessed_at: Utc::now(),
            title: APP_TITLE,
            disclaimer: DISCLAIMER,
            risk_level: result.risk_level(),
            headline: result.headline(),
            summary: result.probability_summary(),
            severity_ordered: result.severity_ordered(),
            predicted_label: result.predicted_label,
            probabilities: result.class_probabilities,
            features,
        }
    }
}
