//! API error types

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use coursecat::CatalogError;
use coursimil::SimilarityError;
use serde::Serialize;

/// Result type for API operations
pub type ApiResult<T> = Result<T, ApiError>;

/// Message returned when the recommendation request body is unusable
pub const INVALID_REQUEST_MESSAGE: &str =
    "Invalid request. Course object with courseCode is required.";

/// API error with HTTP status code
#[derive(Debug, Clone, Serialize)]
pub struct ApiError {
    /// HTTP status code
    #[serde(skip)]
    pub status: StatusCode,

    /// Error message
    pub message: String,

    /// Optional error code for client handling
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,

    /// Underlying cause, only exposed in development
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl ApiError {
    /// Create a new API error
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
            code: None,
            details: None,
        }
    }

    /// Create a new API error with code
    pub fn with_code(
        status: StatusCode,
        message: impl Into<String>,
        code: impl Into<String>,
    ) -> Self {
        Self {
            status,
            message: message.into(),
            code: Some(code.into()),
            details: None,
        }
    }

    /// Attach the underlying cause
    #[must_use]
    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }

    /// Drop the underlying cause unless `expose` is set
    #[must_use]
    pub fn expose_details(mut self, expose: bool) -> Self {
        if !expose {
            self.details = None;
        }
        self
    }

    /// 400 Bad Request
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::with_code(StatusCode::BAD_REQUEST, message, "BAD_REQUEST")
    }

    /// 404 Not Found
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::with_code(StatusCode::NOT_FOUND, message, "NOT_FOUND")
    }

    /// 422 Unprocessable Entity
    pub fn validation(message: impl Into<String>) -> Self {
        Self::with_code(
            StatusCode::UNPROCESSABLE_ENTITY,
            message,
            "VALIDATION_ERROR",
        )
    }

    /// 500 Internal Server Error
    pub fn internal(message: impl Into<String>) -> Self {
        Self::with_code(
            StatusCode::INTERNAL_SERVER_ERROR,
            message,
            "INTERNAL_ERROR",
        )
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match &self.code {
            Some(code) => write!(f, "[{:?}] [{}] {}", self.status, code, self.message)?,
            None => write!(f, "[{:?}] {}", self.status, self.message)?,
        }
        if let Some(details) = &self.details {
            write!(f, ": {}", details)?;
        }
        Ok(())
    }
}

impl std::error::Error for ApiError {}

impl From<SimilarityError> for ApiError {
    fn from(error: SimilarityError) -> Self {
        ApiError::validation(error.to_string())
    }
}

impl From<CatalogError> for ApiError {
    fn from(error: CatalogError) -> Self {
        ApiError::internal("Failed to read the course catalog").with_details(error.to_string())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let mut body = serde_json::json!({
            "success": false,
            "error": self.message,
            "code": self.code,
        });
        if let Some(details) = self.details {
            body["details"] = serde_json::Value::String(details);
        }

        (self.status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_error_bad_request() {
        let error = ApiError::bad_request(INVALID_REQUEST_MESSAGE);
        assert_eq!(error.status, StatusCode::BAD_REQUEST);
        assert!(error.message.contains("courseCode"));
    }

    #[test]
    fn test_api_error_not_found() {
        let error = ApiError::not_found("Course not found");
        assert_eq!(error.status, StatusCode::NOT_FOUND);
        assert_eq!(error.code, Some("NOT_FOUND".to_string()));
    }

    #[test]
    fn test_api_error_from_similarity_error() {
        let error: ApiError = SimilarityError::invalid("CS101", "credits must not be negative").into();
        assert_eq!(error.status, StatusCode::UNPROCESSABLE_ENTITY);
        assert!(error.message.contains("CS101"));
    }

    #[test]
    fn test_api_error_details_hidden_outside_development() {
        let error = ApiError::internal("boom").with_details("disk full");
        assert_eq!(error.clone().expose_details(true).details.as_deref(), Some("disk full"));
        assert!(error.expose_details(false).details.is_none());
    }

    #[test]
    fn test_api_error_display() {
        let error = ApiError::internal("boom").with_details("disk full");
        let display = format!("{}", error);
        assert!(display.contains("INTERNAL_ERROR"));
        assert!(display.contains("disk full"));
    }

    #[test]
    fn test_api_error_into_response() {
        let error = ApiError::bad_request("test error");
        let response = error.into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
}
