//! HTTP error envelope.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;

use perjadin_core::extract::ExtractError;
use perjadin_core::meeting::MeetingError;
use perjadin_core::recap::RecapError;
use perjadin_core::xlsx::RenderError;
use perjadin_shared::AppError;

/// Response wrapper around the app-wide error taxonomy.
///
/// Validation errors surface as 4xx with a field-level message; upstream
/// failures as 5xx with the wrapped cause visible. No retries anywhere: a
/// single upstream failure fails the whole request.
#[derive(Debug)]
pub struct ApiError(pub AppError);

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status =
            StatusCode::from_u16(self.0.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        let body = json!({
            "error": self.0.error_code(),
            "message": self.0.to_string(),
        });
        (status, Json(body)).into_response()
    }
}

impl From<AppError> for ApiError {
    fn from(err: AppError) -> Self {
        Self(err)
    }
}

impl From<RecapError> for ApiError {
    fn from(err: RecapError) -> Self {
        match err {
            RecapError::EmptyAssignees => Self(AppError::EmptyInput(err.to_string())),
            RecapError::InvalidDateRange { .. } => Self(AppError::Validation(err.to_string())),
        }
    }
}

impl From<ExtractError> for ApiError {
    fn from(err: ExtractError) -> Self {
        let app = match &err {
            ExtractError::NoDocuments => AppError::EmptyInput(err.to_string()),
            ExtractError::FileTooLarge { .. } | ExtractError::UnsupportedFileType { .. } => {
                AppError::Validation(err.to_string())
            }
            ExtractError::NotConfigured => AppError::ServiceUnavailable(err.to_string()),
            ExtractError::Cancelled => AppError::Cancelled(err.to_string()),
            ExtractError::Upstream(_) | ExtractError::MalformedResponse(_) => {
                AppError::upstream("extraction", err.to_string())
            }
        };
        Self(app)
    }
}

impl From<MeetingError> for ApiError {
    fn from(err: MeetingError) -> Self {
        match &err {
            MeetingError::Step { .. } => Self(AppError::upstream("meeting", err.to_string())),
            MeetingError::ProviderUnavailable { .. } => {
                Self(AppError::ServiceUnavailable(err.to_string()))
            }
        }
    }
}

impl From<RenderError> for ApiError {
    fn from(err: RenderError) -> Self {
        match err {
            RenderError::NoRows => Self(AppError::EmptyInput(err.to_string())),
            RenderError::Worksheet(_) => Self(AppError::Render(err.to_string())),
        }
    }
}
