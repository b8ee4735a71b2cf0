use actix_web::{http::StatusCode, web, HttpResponse};

use crate::dto::{ErrorResponse, ErrorResponseExt, MessageResponse, PasswordResetConfirmRequest};
use crate::handlers::error_handler::handle_domain_error;

use sk_core::errors::DomainError;
use sk_core::repositories::{AccountRepository, SessionStore};

use super::{clear_refresh_cookie, AppState};

/// Handler for POST /api/v1/auth/password-reset/confirm
///
/// Replaces the password using the token and code from the reset email.
/// Every outstanding access token of the account stops working.
///
/// # Request Body
///
/// ```json
/// {
///     "token": "9f86d0...",
///     "code": "1a2b3c4d",
///     "password": "new password"
/// }
/// ```
///
/// ## Errors
/// - 400 Bad Request: Empty password or wrong code
/// - 401 Unauthorized: Token unknown, expired or already used
pub async fn confirm_password_reset<S, A>(
    state: web::Data<AppState<S, A>>,
    request: web::Json<PasswordResetConfirmRequest>,
) -> HttpResponse
where
    S: SessionStore + 'static,
    A: AccountRepository + 'static,
{
    let PasswordResetConfirmRequest {
        token,
        code,
        password,
    } = request.into_inner();

    if password.is_empty() {
        return ErrorResponse::new("invalid_password", "Password must not be empty")
            .to_response(StatusCode::BAD_REQUEST);
    }

    let cost = state.auth_config.password_hash_cost;
    let password_hash = match web::block(move || bcrypt::hash(password, cost)).await {
        Ok(Ok(hash)) => hash,
        Ok(Err(e)) => {
            return handle_domain_error(&DomainError::Internal {
                message: format!("password hashing failed: {}", e),
            })
        }
        Err(e) => {
            return handle_domain_error(&DomainError::Internal {
                message: format!("password hashing task failed: {}", e),
            })
        }
    };

    match state
        .auth_service
        .reset_password(&token, &code, password_hash)
        .await
    {
        Ok(()) => clear_refresh_cookie(
            HttpResponse::Ok().json(MessageResponse::new("Password updated")),
            &state.auth_config.cookie,
        ),
        Err(error) => handle_domain_error(&error),
    }
}
