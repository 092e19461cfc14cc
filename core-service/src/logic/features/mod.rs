//! Features Module - Feature Derivation
//!
//! Raw questionnaire answers → bounded composite scores → flat feature record.
//! Pure functions only; nothing here touches the model.

pub mod assessment;
pub mod layout;
pub mod record;
pub mod scoring;


// Re-export common types
pub use assessment::{EmploymentStatus, Gender, RawAssessment, UnknownCategory, WorkEnvironment};
pub use layout::{layout_hash, LayoutInfo, FEATURE_COUNT, FEATURE_LAYOUT, FEATURE_VERSION};
pub use record::{FeatureDeriver, FeatureRecord, FeatureValue};
pub use scoring::{scale, ScaleBounds};
