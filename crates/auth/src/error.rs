//! Authentication errors

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

/// Authentication error
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AuthError {
    #[error("Authorization header required")]
    MissingAuthorization,
    #[error("Invalid authorization header format")]
    InvalidAuthorizationFormat,
    #[error("Invalid or expired token")]
    InvalidToken,
    #[error("Invalid user ID in token")]
    InvalidUserId,
    #[error("User not found")]
    UserNotFound,
    #[error("Failed to load user")]
    UserLoadError,
}

impl AuthError {
    /// Whether the failure means the caller is simply not authenticated,
    /// as opposed to the identity store being unavailable.
    pub fn is_unauthenticated(&self) -> bool {
        !matches!(self, AuthError::UserLoadError)
    }
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        let (status, code) = match self {
            AuthError::MissingAuthorization => {
                (StatusCode::UNAUTHORIZED, "MISSING_AUTHORIZATION")
            }
            AuthError::InvalidAuthorizationFormat => {
                (StatusCode::UNAUTHORIZED, "INVALID_AUTHORIZATION")
            }
            AuthError::InvalidToken | AuthError::InvalidUserId => {
                (StatusCode::UNAUTHORIZED, "INVALID_TOKEN")
            }
            AuthError::UserNotFound => (StatusCode::UNAUTHORIZED, "USER_NOT_FOUND"),
            AuthError::UserLoadError => (StatusCode::INTERNAL_SERVER_ERROR, "USER_LOAD_ERROR"),
        };

        let body = Json(json!({
            "error": {
                "code": code,
                "message": self.to_string(),
            }
        }));

        (status, body).into_response()
    }
}
