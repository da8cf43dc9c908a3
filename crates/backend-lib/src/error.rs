// crates/backend-lib/src/error.rs

//! Central error type + Axum integration.
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use sessiongate_common::{ErrorBody, ErrorDetail};
use thiserror::Error;

/// Application error types with error codes and context
#[derive(Error, Debug)]
pub enum AppError {
    /// Input was present but does not satisfy the credential rules
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Missing required fields")]
    MissingFields,

    #[error("Conflict: {0}")]
    Conflict(String),

    /// Unknown username and wrong password both map here
    #[error("Invalid username or password")]
    InvalidCredentials,

    /// Session cookie / CSRF header pair rejected
    #[error("Unauthorized")]
    Unauthorized,

    #[error("Password hashing failed: {0}")]
    Hashing(String),

    #[error("Token generation failed: {0}")]
    TokenGeneration(String),

    #[error("Internal error: {0}")]
    Internal(String),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl AppError {
    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::Validation(_) => StatusCode::NOT_ACCEPTABLE,
            AppError::MissingFields => StatusCode::BAD_REQUEST,
            AppError::Conflict(_) => StatusCode::CONFLICT,
            AppError::InvalidCredentials | AppError::Unauthorized => StatusCode::UNAUTHORIZED,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Get the error code for this error
    pub fn error_code(&self) -> &'static str {
        match self {
            AppError::InvalidCredentials => "AUTH_001",
            AppError::Unauthorized => "AUTH_002",
            AppError::Validation(_) => "VAL_001",
            AppError::MissingFields => "VAL_002",
            AppError::Conflict(_) => "CONFLICT_001",
            AppError::Internal(_) => "INT_001",
            AppError::Hashing(_) => "INT_002",
            AppError::TokenGeneration(_) => "INT_003",
            AppError::Config(_) => "CFG_001",
        }
    }

    /// Whether the cause must stay server-side
    pub fn is_internal(&self) -> bool {
        self.status_code() == StatusCode::INTERNAL_SERVER_ERROR
    }

    /// Get a message that is safe to hand to the client
    pub fn sanitized_message(&self) -> String {
        match self {
            AppError::Validation(reason) => reason.clone(),
            AppError::Conflict(reason) => reason.clone(),
            AppError::MissingFields => "Missing required fields".to_string(),
            AppError::InvalidCredentials => "Invalid username or password".to_string(),
            AppError::Unauthorized => "Unauthorized".to_string(),
            AppError::Hashing(_)
            | AppError::TokenGeneration(_)
            | AppError::Internal(_)
            | AppError::Config(_) => "An internal server error occurred".to_string(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        if self.is_internal() {
            tracing::error!(code = self.error_code(), "request failed: {self}");
        }

        let body = ErrorBody {
            error: ErrorDetail {
                code: self.error_code().to_string(),
                message: self.sanitized_message(),
            },
        };

        (status, axum::Json(body)).into_response()
    }
}

impl From<tokio::task::JoinError> for AppError {
    fn from(err: tokio::task::JoinError) -> Self {
        AppError::Internal(format!("blocking task failed: {err}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;
    use axum::response::IntoResponse;

    #[test]
    fn test_app_error_display() {
        let err = AppError::Validation("username too short".to_string());
        assert_eq!(err.to_string(), "Validation error: username too short");

        assert_eq!(
            AppError::InvalidCredentials.to_string(),
            "Invalid username or password"
        );
        assert_eq!(AppError::Unauthorized.to_string(), "Unauthorized");
    }

    #[test]
    fn test_app_error_status_codes() {
        assert_eq!(
            AppError::Validation("password too short".to_string()).status_code(),
            StatusCode::NOT_ACCEPTABLE
        );
        assert_eq!(AppError::MissingFields.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(
            AppError::Conflict("username taken".to_string()).status_code(),
            StatusCode::CONFLICT
        );
        assert_eq!(
            AppError::InvalidCredentials.status_code(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(AppError::Unauthorized.status_code(), StatusCode::UNAUTHORIZED);
        assert_eq!(
            AppError::Hashing("entropy".to_string()).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(
            AppError::TokenGeneration("entropy".to_string()).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_app_error_error_codes() {
        assert_eq!(AppError::InvalidCredentials.error_code(), "AUTH_001");
        assert_eq!(AppError::Unauthorized.error_code(), "AUTH_002");
        assert_eq!(
            AppError::Validation("x".to_string()).error_code(),
            "VAL_001"
        );
        assert_eq!(
            AppError::Internal("test".to_string()).error_code(),
            "INT_001"
        );
    }

    #[test]
    fn test_internal_causes_are_not_exposed() {
        let err = AppError::Hashing("OsRng unavailable".to_string());
        assert!(!err.sanitized_message().contains("OsRng"));

        let err = AppError::TokenGeneration("getrandom: EAGAIN".to_string());
        assert!(!err.sanitized_message().contains("getrandom"));
    }

    #[tokio::test]
    async fn test_error_into_response() {
        let response = AppError::Hashing("secret cause".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert!(response
            .headers()
            .get("content-type")
            .unwrap()
            .to_str()
            .unwrap()
            .contains("application/json"));

        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body: ErrorBody = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body.error.code, "INT_002");
        assert!(!body.error.message.contains("secret cause"));
    }
}
