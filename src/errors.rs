use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Redirect, Response},
};
use tracing::error;

use crate::forms::FieldErrors;

/// Message shown for any login failure. One text for both "no such email"
/// and "wrong password" so callers cannot enumerate accounts.
pub const LOGIN_FAILED: &str = "Login Unsuccessful. Please check email and password";

#[derive(Debug)]
pub enum ApiError {
    /// Generic authentication failure on POST /login.
    InvalidCredentials,
    /// Anonymous caller hit a protected route; send them to the login form
    /// and keep the path they asked for so login can bounce them back.
    LoginRequired { next: String },
    /// Authenticated caller is not the author of the post.
    Forbidden,
    NotFound,
    /// Per-field validation failures. Nothing was mutated; the client
    /// re-renders the form from this structure.
    Validation(FieldErrors),
    InternalError(String),
}

/// Convert our custom errors to HTTP responses.
///
/// `IntoResponse` trait: axum calls this to turn handler `Err` values into
/// what the client actually sees.
impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::InvalidCredentials => (StatusCode::UNAUTHORIZED, LOGIN_FAILED),
            ApiError::LoginRequired { next } => {
                return Redirect::to(&format!("/login?next={}", next)).into_response();
            }
            ApiError::Forbidden => (StatusCode::FORBIDDEN, "You are not allowed to do that"),
            ApiError::NotFound => (StatusCode::NOT_FOUND, "Not Found"),
            ApiError::Validation(errors) => {
                return (
                    StatusCode::UNPROCESSABLE_ENTITY,
                    Json(serde_json::json!({
                      "errors": errors
                    })),
                )
                    .into_response();
            }
            ApiError::InternalError(msg) => {
                error!("Internal error: {}", msg);
                (StatusCode::INTERNAL_SERVER_ERROR, "Internal server error")
            }
        };

        (
            status,
            Json(serde_json::json!({
              "error": message
            })),
        )
            .into_response()
    }
}
