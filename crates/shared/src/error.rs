//! Application-wide error types.

use thiserror::Error;

/// Result type alias using `AppError`.
pub type AppResult<T> = Result<T, AppError>;

/// Application error types.
#[derive(Debug, Error)]
pub enum AppError {
    /// Authentication failed (reserved, not currently enforced).
    #[error("Authentication failed: {0}")]
    Unauthorized(String),

    /// Access denied (reserved, not currently enforced).
    #[error("Access denied: {0}")]
    Forbidden(String),

    /// Validation error.
    #[error("Validation error: {0}")]
    Validation(String),

    /// No documents, assignees, or transactions supplied.
    #[error("Empty input: {0}")]
    EmptyInput(String),

    /// The request was cancelled before the upstream call completed.
    #[error("Request cancelled: {0}")]
    Cancelled(String),

    /// An upstream service call failed. Carries the originating service name.
    #[error("{service} error: {message}")]
    UpstreamService {
        /// Name of the service that failed.
        service: &'static str,
        /// Wrapped cause, visible in the response body.
        message: String,
    },

    /// A requested feature has no configured provider.
    #[error("Service unavailable: {0}")]
    ServiceUnavailable(String),

    /// Failure producing the spreadsheet artifact.
    #[error("Render error: {0}")]
    Render(String),

    /// Internal server error.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    /// Returns the HTTP status code for this error.
    #[must_use]
    pub const fn status_code(&self) -> u16 {
        match self {
            Self::Unauthorized(_) => 401,
            Self::Forbidden(_) => 403,
            Self::Validation(_) | Self::EmptyInput(_) => 400,
            Self::UpstreamService { .. } => 502,
            Self::ServiceUnavailable(_) => 503,
            Self::Cancelled(_) => 504,
            Self::Render(_) | Self::Internal(_) => 500,
        }
    }

    /// Returns the error code for API responses.
    #[must_use]
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::Unauthorized(_) => "UNAUTHORIZED",
            Self::Forbidden(_) => "FORBIDDEN",
            Self::Validation(_) => "VALIDATION_ERROR",
            Self::EmptyInput(_) => "EMPTY_INPUT",
            Self::Cancelled(_) => "CANCELLED",
            Self::UpstreamService { .. } => "UPSTREAM_SERVICE_ERROR",
            Self::ServiceUnavailable(_) => "SERVICE_UNAVAILABLE",
            Self::Render(_) => "RENDER_ERROR",
            Self::Internal(_) => "INTERNAL_ERROR",
        }
    }

    /// Wraps an upstream service failure with the originating service name.
    pub fn upstream(service: &'static str, err: impl std::fmt::Display) -> Self {
        Self::UpstreamService {
            service,
            message: err.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_status_codes() {
        assert_eq!(AppError::Unauthorized(String::new()).status_code(), 401);
        assert_eq!(AppError::Forbidden(String::new()).status_code(), 403);
        assert_eq!(AppError::Validation(String::new()).status_code(), 400);
        assert_eq!(AppError::EmptyInput(String::new()).status_code(), 400);
        assert_eq!(AppError::Cancelled(String::new()).status_code(), 504);
        assert_eq!(
            AppError::upstream("gemini", "boom").status_code(),
            502
        );
        assert_eq!(
            AppError::ServiceUnavailable(String::new()).status_code(),
            503
        );
        assert_eq!(AppError::Render(String::new()).status_code(), 500);
        assert_eq!(AppError::Internal(String::new()).status_code(), 500);
    }

    #[test]
    fn test_error_codes() {
        assert_eq!(
            AppError::Validation(String::new()).error_code(),
            "VALIDATION_ERROR"
        );
        assert_eq!(
            AppError::EmptyInput(String::new()).error_code(),
            "EMPTY_INPUT"
        );
        assert_eq!(AppError::Cancelled(String::new()).error_code(), "CANCELLED");
        assert_eq!(
            AppError::upstream("zoom", "x").error_code(),
            "UPSTREAM_SERVICE_ERROR"
        );
        assert_eq!(AppError::Render(String::new()).error_code(), "RENDER_ERROR");
    }

    #[test]
    fn test_upstream_display_names_service() {
        let err = AppError::upstream("drive", "status 403: quota");
        assert_eq!(err.to_string(), "drive error: status 403: quota");
    }
}
