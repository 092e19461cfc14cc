//! Raw Assessment - one questionnaire submission
//!
//! Answers exactly as collected from the person. Bounds are declared here
//! and enforced by `RawAssessment::validate` before any scoring happens.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::logic::error::{AssessmentError, CoreResult};

// ============================================================================
// BOUNDS
// ============================================================================

pub const AGE_RANGE: (u32, u32) = (12, 100);
pub const STRESS_RANGE: (u8, u8) = (0, 10);
pub const SLEEP_RANGE: (f64, f64) = (0.0, 12.0);
pub const ACTIVITY_RANGE: (u8, u8) = (0, 7);

/// Depression and anxiety items (0 = never, 3 = always)
pub const SYMPTOM_ITEM_MAX: u8 = 3;

/// Social support and productivity items
pub const LIKERT_ITEM_MAX: u8 = 4;

// ============================================================================
// CATEGORICAL ANSWERS
// ============================================================================

macro_rules! categorical {
    (
        $(#[$meta:meta])*
        $name:ident, $field:literal {
            $($variant:ident => $text:literal),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        pub enum $name {
            $(#[serde(rename = $text)] $variant,)+
        }

        impl $name {
            /// Every accepted answer, in form order
            pub const ALL: &'static [$name] = &[$($name::$variant,)+];

            /// Name of the feature this answer feeds
            pub const FIELD: &'static str = $field;

            /// Exact string the model was trained on
            pub fn as_str(&self) -> &'static str {
                match self {
                    $($name::$variant => $text,)+
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl FromStr for $name {
            type Err = UnknownCategory;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $($text => Ok($name::$variant),)+
                    _ => Err(UnknownCategory {
                        field: $field,
                        value: s.to_string(),
                    }),
                }
            }
        }
    };
}

categorical! {
    /// Gender as offered by the form
    Gender, "gender" {
        Male => "male",
        Female => "female",
        NonBinary => "non-binary",
        PreferNotToSay => "prefer not to say",
    }
}

categorical! {
    EmploymentStatus, "employment_status" {
        Employed => "employed",
        SelfEmployed => "self-employed",
        Student => "student",
        Unemployed => "unemployed",
        Other => "other",
    }
}

categorical! {
    WorkEnvironment, "work_environment" {
        OnSite => "on-site",
        Remote => "remote",
        Hybrid => "hybrid",
    }
}

/// Categorical answer outside the form's choice list
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownCategory {
    pub field: &'static str,
    pub value: String,
}

impl fmt::Display for UnknownCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown {} '{}'", self.field, self.value)
    }
}

impl std::error::Error for UnknownCategory {}

// ============================================================================
// RAW ASSESSMENT
// ============================================================================

/// One person's questionnaire submission.
///
/// `mental_health_history` and `seeks_treatment` keep the answer text as
/// given; recoding to 0/1 happens in the deriver.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawAssessment {
    pub age: u32,
    pub gender: Gender,
    pub employment_status: EmploymentStatus,
    pub work_environment: WorkEnvironment,
    pub mental_health_history: String,
    pub seeks_treatment: String,
    pub stress_level: u8,
    pub sleep_hours: f64,
    pub physical_activity_days: u8,
    pub depression_items: [u8; 3],
    pub anxiety_items: [u8; 3],
    pub social_support_items: [u8; 2],
    pub productivity_items: [u8; 2],
}

impl RawAssessment {
    /// Check every numeric answer against its declared bounds.
    ///
    /// Reports the first violation found, in form order.
    pub fn validate(&self) -> CoreResult<()> {
        check_range("age", self.age as f64, AGE_RANGE.0 as f64, AGE_RANGE.1 as f64)?;
        check_range(
            "stress_level",
            self.stress_level as f64,
            STRESS_RANGE.0 as f64,
            STRESS_RANGE.1 as f64,
        )?;
        check_range("sleep_hours", self.sleep_hours, SLEEP_RANGE.0, SLEEP_RANGE.1)?;
        check_range(
            "physical_activity_days",
            self.physical_activity_days as f64,
            ACTIVITY_RANGE.0 as f64,
            ACTIVITY_RANGE.1 as f64,
        )?;

        check_items("depression_items", &self.depression_items, SYMPTOM_ITEM_MAX)?;
        check_items("anxiety_items", &self.anxiety_items, SYMPTOM_ITEM_MAX)?;
        check_items("social_support_items", &self.social_support_items, LIKERT_ITEM_MAX)?;
        check_items("productivity_items", &self.productivity_items, LIKERT_ITEM_MAX)?;

        Ok(())
    }
}

fn check_range(field: &'static str, value: f64, min: f64, max: f64) -> CoreResult<()> {
    // NaN fails both comparisons, so test for containment rather than exclusion
    if value >= min && value <= max {
        Ok(())
    } else {
        Err(AssessmentError::out_of_range(field, value, min, max))
    }
}

fn check_items(field: &'static str, items: &[u8], max: u8) -> CoreResult<()> {
    for &item in items {
        check_range(field, item as f64, 0.0, max as f64)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> RawAssessment {
        RawAssessment {
            age: 30,
            gender: Gender::Male,
            employment_status: EmploymentStatus::Employed,
            work_environment: WorkEnvironment::OnSite,
            mental_health_history: "no".to_string(),
            seeks_treatment: "no".to_string(),
            stress_level: 5,
            sleep_hours: 7.0,
            physical_activity_days: 2,
            depression_items: [0, 0, 0],
            anxiety_items: [0, 0, 0],
            social_support_items: [3, 3],
            productivity_items: [3, 2],
        }
    }

    #[test]
    fn test_valid_sample_passes() {
        assert!(sample().validate().is_ok());
    }

    #[test]
    fn test_age_bounds_inclusive() {
        let mut raw = sample();
        raw.age = 12;
        assert!(raw.validate().is_ok());
        raw.age = 100;
        assert!(raw.validate().is_ok());
        raw.age = 11;
        match raw.validate() {
            Err(AssessmentError::InvalidInputRange { field, value, .. }) => {
                assert_eq!(field, "age");
                assert_eq!(value, 11.0);
            }
            other => panic!("expected InvalidInputRange, got {:?}", other),
        }
    }

    #[test]
    fn test_sleep_hours_rejects_nan_and_overflow() {
        let mut raw = sample();
        raw.sleep_hours = f64::NAN;
        assert!(raw.validate().is_err());
        raw.sleep_hours = 12.5;
        assert!(raw.validate().is_err());
        raw.sleep_hours = 0.0;
        assert!(raw.validate().is_ok());
    }

    #[test]
    fn test_item_out_of_range() {
        let mut raw = sample();
        raw.anxiety_items = [0, 4, 0];
        let err = raw.validate().unwrap_err();
        assert!(matches!(err, AssessmentError::InvalidInputRange { .. }));
        assert!(err.to_string().contains("anxiety_items"));

        let mut raw = sample();
        raw.productivity_items = [5, 0];
        assert!(raw.validate().is_err());
    }

    #[test]
    fn test_categorical_round_trip_strings() {
        for gender in Gender::ALL {
            assert_eq!(gender.as_str().parse::<Gender>().unwrap(), *gender);
        }
        assert_eq!("self-employed".parse::<EmploymentStatus>(), Ok(EmploymentStatus::SelfEmployed));
        assert_eq!("prefer not to say".parse::<Gender>(), Ok(Gender::PreferNotToSay));

        let err = "Remote".parse::<WorkEnvironment>().unwrap_err();
        assert_eq!(err.field, "work_environment");
    }

    #[test]
    fn test_serde_uses_model_strings() {
        let json = serde_json::to_value(sample()).unwrap();
        assert_eq!(json["gender"], "male");
        assert_eq!(json["work_environment"], "on-site");
    }
}
