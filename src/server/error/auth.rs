use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use crate::model::api::ErrorDto;

#[derive(Error, Debug)]
pub enum AuthError {
    /// Request has no `Authorization: Bearer` header.
    #[error("Missing bearer token")]
    MissingToken,

    /// Bearer token failed signature, format or expiry validation.
    #[error("Invalid bearer token: {0}")]
    InvalidToken(String),

    /// Token is valid but the user it names no longer exists.
    #[error("User {0} from access token not found in database")]
    UserNotFound(i32),

    /// Authenticated user's role is not permitted for the requested operation.
    #[error("User {0} denied access: {1}")]
    AccessDenied(i32, String),

    /// Email/password combination did not match.
    #[error("Invalid email or password")]
    InvalidCredentials,

    /// Password change supplied the wrong current password.
    #[error("Current password is incorrect")]
    WrongPassword,

    /// Registration asked for the admin role with a wrong or expired code.
    #[error("Invalid or expired admin code")]
    InvalidAdminCode,
}

/// Converts authentication errors into HTTP responses.
///
/// - `MissingToken` / `InvalidToken` / `UserNotFound` → 401 Unauthorized with "Authentication required"
/// - `InvalidCredentials` → 401 Unauthorized with "Invalid email or password"
/// - `WrongPassword` → 401 Unauthorized
/// - `AccessDenied` → 403 Forbidden
/// - `InvalidAdminCode` → 400 Bad Request
///
/// All errors are logged at debug level for diagnostics while keeping client-facing messages
/// generic to avoid information leakage.
impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        tracing::debug!("{}", self);

        let (status, message) = match self {
            Self::MissingToken | Self::InvalidToken(_) | Self::UserNotFound(_) => (
                StatusCode::UNAUTHORIZED,
                "Authentication required, please log in again.",
            ),
            Self::InvalidCredentials => (StatusCode::UNAUTHORIZED, "Invalid email or password"),
            Self::WrongPassword => (StatusCode::UNAUTHORIZED, "Current password is incorrect"),
            Self::AccessDenied(_, _) => (
                StatusCode::FORBIDDEN,
                "You do not have permission to perform this action.",
            ),
            Self::InvalidAdminCode => (StatusCode::BAD_REQUEST, "Invalid or expired admin code"),
        };

        (
            status,
            Json(ErrorDto {
                error: message.to_string(),
            }),
        )
            .into_response()
    }
}
