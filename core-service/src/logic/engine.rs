//! Assessment Engine - one submission end to end
//!
//! validate → derive features → invoke the model. Each call is independent;
//! the only shared state is the read-only `ModelContext`.

use serde::{Deserialize, Serialize};

use super::error::CoreResult;
use super::features::{FeatureDeriver, FeatureRecord, RawAssessment};
use super::model::{AssessmentResult, ModelContext};

/// Derived features together with the model outcome
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Assessment {
    pub features: FeatureRecord,
    pub result: AssessmentResult,
}

/// Run one raw submission through the pipeline.
///
/// Out-of-range answers fail with `InvalidInputRange` before the model is
/// touched.
pub fn assess(ctx: &ModelContext, raw: &RawAssessment) -> CoreResult<Assessment> {
    raw.validate()?;

    let features = FeatureDeriver::new().derive(raw);
    log::debug!("Derived features: {}", features.to_log_entry());

    let result = ctx.invoke(&features)?;
    log::info!(
        "Assessment complete: {} ({})",
        result.predicted_label,
        result.probability_summary()
    );

    Ok(Assessment { features, result })
}
