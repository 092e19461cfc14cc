//! Error handling

use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use innersight_core::AssessmentError;
use serde_json::json;
use validator::ValidationErrors;

use crate::models::FORM_FIELDS;

pub type AppResult<T> = Result<T, AppError>;

/// Shown instead of any model or artifact failure detail
pub const ASSESSMENT_FAILED_MESSAGE: &str =
    "We could not complete the assessment. Please try again later.";

#[derive(Debug)]
pub enum AppError {
    // Input errors
    InvalidInput { field: String, message: String },
    MalformedBody(String),

    // Resource errors
    NotFound(String),

    // Core engine errors
    AssessmentFailed(String),

    // Generic errors
    InternalError(String),
}

impl AppError {
    pub fn invalid(field: impl Into<String>, message: impl Into<String>) -> Self {
        AppError::InvalidInput {
            field: field.into(),
            message: message.into(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, body) = match &self {
            AppError::InvalidInput { field, message } => (
                StatusCode::BAD_REQUEST,
                json!({ "error": message, "field": field, "status": 400 }),
            ),
            AppError::MalformedBody(msg) => (
                StatusCode::BAD_REQUEST,
                json!({ "error": msg, "status": 400 }),
            ),
            AppError::NotFound(msg) => (
                StatusCode::NOT_FOUND,
                json!({ "error": msg, "status": 404 }),
            ),
            AppError::AssessmentFailed(msg) => {
                tracing::error!("Assessment failed: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    json!({ "error": ASSESSMENT_FAILED_MESSAGE, "status": 500 }),
                )
            }
            AppError::InternalError(msg) => {
                tracing::error!("Internal error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    json!({ "error": "Internal server error", "status": 500 }),
                )
            }
        };

        (status, Json(body)).into_response()
    }
}

impl From<AssessmentError> for AppError {
    fn from(err: AssessmentError) -> Self {
        match &err {
            AssessmentError::InvalidInputRange { field, .. } => {
                AppError::invalid(*field, err.to_string())
            }
            _ => AppError::AssessmentFailed(err.to_string()),
        }
    }
}

impl From<ValidationErrors> for AppError {
    /// Reports the first failing field in form order
    fn from(errors: ValidationErrors) -> Self {
        let mut failures: Vec<(String, String)> = errors
            .field_errors()
            .into_iter()
            .map(|(field, errs)| {
                let field = field.to_string();
                let message = errs
                    .first()
                    .and_then(|e| e.message.as_ref().map(|m| m.to_string()))
                    .unwrap_or_else(|| format!("{} is out of range", field));
                (field, message)
            })
            .collect();

        failures.sort_by_key(|(field, _)| {
            FORM_FIELDS
                .iter()
                .position(|f| *f == field.as_str())
                .unwrap_or(usize::MAX)
        });

        match failures.into_iter().next() {
            Some((field, message)) => AppError::InvalidInput { field, message },
            None => AppError::MalformedBody(errors.to_string()),
        }
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::MalformedBody(rejection.body_text())
    }
}
