use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use validator::ValidationErrors;

/// Errors surfaced to API clients
#[derive(thiserror::Error, Debug)]
pub enum ApiError {
    /// The request body is malformed or fails field validation
    #[error("{0}")]
    InvalidRequest(String),

    /// Normalization removed every token of the text
    #[error("Text became empty after preprocessing.")]
    EmptyAfterPreprocessing,
}

impl ApiError {
    /// The HTTP status for this error
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::InvalidRequest(_) => StatusCode::UNPROCESSABLE_ENTITY,
            ApiError::EmptyAfterPreprocessing => StatusCode::BAD_REQUEST,
        }
    }
}

impl From<ValidationErrors> for ApiError {
    fn from(errors: ValidationErrors) -> Self {
        ApiError::InvalidRequest(errors.to_string())
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::InvalidRequest(rejection.body_text())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status(), Json(json!({ "detail": self.to_string() }))).into_response()
    }
}
