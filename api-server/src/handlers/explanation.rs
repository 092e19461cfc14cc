//! Explanation image handler

use axum::{
    extract::State,
    http::header,
    response::IntoResponse,
};
use std::io::ErrorKind;

use crate::{AppError, AppResult, AppState};

/// Global feature importance plot, if one was exported
pub async fn image(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let path = &state.config.explanation_image;

    let bytes = match tokio::fs::read(path).await {
        Ok(bytes) => bytes,
        Err(e) if e.kind() == ErrorKind::NotFound => {
            tracing::debug!("No explanation image at {}", path.display());
            return Err(AppError::NotFound("Explanation image not available".to_string()));
        }
        Err(e) => {
            return Err(AppError::InternalError(format!(
                "reading {}: {}",
                path.display(),
                e
            )))
        }
    };

    Ok(([(header::CONTENT_TYPE, "image/png")], bytes))
}
