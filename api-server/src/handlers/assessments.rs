//! Assessment handlers

use axum::{extract::rejection::JsonRejection, extract::State, Json};

use innersight_core::{assess, FeatureDeriver, FeatureRecord};

use crate::models::{AssessmentRequest, AssessmentResponse};
use crate::{AppResult, AppState};

/// Derived feature record only, no model call
pub async fn derive_features(
    payload: Result<Json<AssessmentRequest>, JsonRejection>,
) -> AppResult<Json<FeatureRecord>> {
    let Json(req) = payload?;
    let raw = req.into_raw()?;
    raw.validate()?;

    Ok(Json(FeatureDeriver::new().derive(&raw)))
}

/// Score one submission
pub async fn create(
    State(state): State<AppState>,
    payload: Result<Json<AssessmentRequest>, JsonRejection>,
) -> AppResult<Json<AssessmentResponse>> {
    let Json(req) = payload?;
    let raw = req.into_raw()?;

    let assessment = assess(&state.context, &raw)?;
    tracing::info!(
        label = %assessment.result.predicted_label,
        "Assessment served"
    );

    Ok(Json(AssessmentResponse::from(assessment)))
}
