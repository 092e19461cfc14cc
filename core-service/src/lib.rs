//! InnerSight Core - Feature derivation & risk model inference
//!
//! Turns one questionnaire submission into a model-ready feature record,
//! runs it through the loaded classifier and returns a labelled risk level.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────┐   ┌─────────────────┐   ┌──────────────────────────┐
//! │ RawAssessment│──▶│ FeatureDeriver  │──▶│ ModelContext::invoke     │
//! │ (validated)  │   │ (pure scoring)  │   │ classifier + label codec │
//! └──────────────┘   └─────────────────┘   └────────────┬─────────────┘
//!                                                       ▼
//!                                              AssessmentResult
//! ```
//!
//! The model artifacts are loaded once into a [`ModelContext`] and shared
//! read-only for the lifetime of the process.

pub mod constants;
pub mod logic;

pub use logic::engine::assess;
pub use logic::error::{AssessmentError, CoreResult};
pub use logic::features::{
    EmploymentStatus, FeatureDeriver, FeatureRecord, FeatureValue, Gender, RawAssessment,
    WorkEnvironment,
};
pub use logic::model::{
    AssessmentResult, ClassProbability, Classifier, LabelDecoder, LabelEncoder, ModelBackend,
    ModelContext, RiskLevel,
};
