//! Model metadata handler

use axum::{extract::State, Json};
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::collections::BTreeMap;

use innersight_core::logic::features::LayoutInfo;
use innersight_core::logic::model::EngineStatus;

use crate::AppState;

#[derive(Serialize)]
pub struct ModelInfoResponse {
    backend: String,
    source: String,
    labels: Vec<String>,
    feature_names: Vec<String>,
    categories: BTreeMap<String, Vec<String>>,
    layout: LayoutInfo,
    loaded_at: DateTime<Utc>,
    status: EngineStatus,
}

/// What is loaded and how it has been doing
pub async fn info(State(state): State<AppState>) -> Json<ModelInfoResponse> {
    let ctx = &state.context;
    let metadata = ctx.metadata();

    Json(ModelInfoResponse {
        backend: metadata.backend.clone(),
        source: metadata.source.clone(),
        labels: metadata.labels.clone(),
        feature_names: metadata.feature_names.clone(),
        categories: ctx.schema().categories().clone(),
        layout: metadata.layout.clone(),
        loaded_at: metadata.loaded_at,
        status: ctx.status(),
    })
}
