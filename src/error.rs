use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;

/// Application error taxonomy. Business "does not exist" conditions are
/// `NotFound`; upstream provider faults collapse into `Upstream` (the caller
/// never learns whether it was a timeout, a 5xx, or a malformed payload);
/// persistence faults are `Store`.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("{0} not found")]
    NotFound(String),

    #[error("upstream error: {0}")]
    Upstream(String),

    #[error("store error: {0}")]
    Store(#[from] mongodb::error::Error),

    #[error("invalid username")]
    InvalidUsername,

    #[error("invalid password")]
    InvalidPassword,

    #[error("invalid email")]
    InvalidEmail,

    #[error("invalid mobile number")]
    InvalidMobile,

    #[error("invalid username or password")]
    InvalidCredentials,

    #[error("signup failed")]
    SignupFailed,

    #[error("authorization token required")]
    TokenRequired,

    #[error("invalid token")]
    InvalidToken,

    #[error("blacklisted token")]
    BlacklistedToken,

    #[error("unauthorized access")]
    Unauthorized,

    #[error("user is already an admin")]
    AlreadyAdmin,

    #[error("cryptocurrency symbol is required")]
    MissingSymbol,

    #[error("invalid request status")]
    InvalidRequestStatus,

    #[error("invalid request payload")]
    InvalidPayload,
}

impl AppError {
    /// (HTTP status, app code, stable public message). Code ranges follow the
    /// original API: 1xxx auth, 2xxx crypto, 3xxx store, 4xxx token, 5xxx payload.
    fn parts(&self) -> (StatusCode, u16, String) {
        match self {
            AppError::InvalidUsername => (
                StatusCode::BAD_REQUEST,
                1001,
                "Invalid username: must be at least 5 characters (letters, digits, underscore)".into(),
            ),
            AppError::InvalidPassword => (
                StatusCode::BAD_REQUEST,
                1002,
                "Invalid password: must be at least 8 characters, include an uppercase letter, a number, and a special character".into(),
            ),
            AppError::InvalidEmail => (
                StatusCode::BAD_REQUEST,
                1003,
                "Invalid email: must be a valid email address".into(),
            ),
            AppError::InvalidMobile => (
                StatusCode::BAD_REQUEST,
                1004,
                "Invalid mobile number: must be 10 digits".into(),
            ),
            AppError::SignupFailed => {
                (StatusCode::INTERNAL_SERVER_ERROR, 1005, "Signup failed".into())
            }
            AppError::InvalidCredentials => (
                StatusCode::UNAUTHORIZED,
                1006,
                "Invalid username or password".into(),
            ),
            AppError::AlreadyAdmin => (
                StatusCode::BAD_REQUEST,
                3004,
                "User is already an admin".into(),
            ),
            AppError::MissingSymbol => (
                StatusCode::BAD_REQUEST,
                2001,
                "Cryptocurrency symbol is required".into(),
            ),
            AppError::Upstream(_) => (
                StatusCode::BAD_GATEWAY,
                2002,
                "Error reaching the market data provider".into(),
            ),
            AppError::NotFound(what) => {
                (StatusCode::NOT_FOUND, 3001, format!("{what} not found"))
            }
            AppError::Store(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                3000,
                "Internal storage error".into(),
            ),
            AppError::TokenRequired => (
                StatusCode::UNAUTHORIZED,
                4002,
                "Authorization token required".into(),
            ),
            AppError::InvalidToken => (StatusCode::UNAUTHORIZED, 4003, "Invalid token".into()),
            AppError::Unauthorized => {
                (StatusCode::UNAUTHORIZED, 4004, "Unauthorized access".into())
            }
            AppError::BlacklistedToken => {
                (StatusCode::UNAUTHORIZED, 4005, "Blacklisted token".into())
            }
            AppError::InvalidRequestStatus => {
                (StatusCode::BAD_REQUEST, 5001, "Invalid request status".into())
            }
            AppError::InvalidPayload => {
                (StatusCode::BAD_REQUEST, 5002, "Invalid request payload".into())
            }
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        // Internal detail goes to the log only; callers get the stable message.
        match &self {
            AppError::Store(e) => tracing::error!("store error: {e}"),
            AppError::Upstream(e) => tracing::warn!("upstream error: {e}"),
            _ => {}
        }

        let (status, code, message) = self.parts();
        (status, Json(json!({ "code": code, "message": message }))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_is_business_level() {
        let (status, code, msg) = AppError::NotFound("cryptocurrency XYZ".into()).parts();
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(code, 3001);
        assert_eq!(msg, "cryptocurrency XYZ not found");
    }

    #[test]
    fn upstream_detail_never_reaches_the_message() {
        let (_, _, msg) = AppError::Upstream("connect timeout to 10.0.0.1".into()).parts();
        assert!(!msg.contains("10.0.0.1"));
    }
}
