use actix_web::{http::StatusCode, HttpResponse};

use crate::dto::{ErrorResponse, ErrorResponseExt};
use sk_core::errors::{DomainError, StoreError, TokenError};

/// Maps a domain error onto an HTTP response.
///
/// Every error in the unauthorized class produces the same body, so a
/// client cannot tell a forged token from an expired or rotated one.
pub fn handle_domain_error(error: &DomainError) -> HttpResponse {
    if error.is_unauthorized() {
        tracing::debug!(code = error.code(), "Request unauthorized");
        return unauthorized();
    }

    if error.is_server_fault() {
        tracing::error!(code = error.code(), error = %error, "Request failed");
    }

    let (status, code, message) = match error {
        DomainError::Token(TokenError::CodeMismatch) => (
            StatusCode::BAD_REQUEST,
            "invalid_code",
            "The verification code is incorrect".to_string(),
        ),
        DomainError::NotFound { .. } => (
            StatusCode::NOT_FOUND,
            "not_found",
            "The requested resource was not found".to_string(),
        ),
        DomainError::Conflict { message } => (StatusCode::CONFLICT, "conflict", message.clone()),
        DomainError::Store(StoreError::Unavailable { .. }) => (
            StatusCode::SERVICE_UNAVAILABLE,
            "service_unavailable",
            "The service is temporarily unavailable".to_string(),
        ),
        _ => (
            StatusCode::INTERNAL_SERVER_ERROR,
            "internal_error",
            "An internal error occurred".to_string(),
        ),
    };

    ErrorResponse::new(code, message).to_response(status)
}

/// Uniform 401 response
pub fn unauthorized() -> HttpResponse {
    ErrorResponse::new("unauthorized", "Authentication required")
        .to_response(StatusCode::UNAUTHORIZED)
}
