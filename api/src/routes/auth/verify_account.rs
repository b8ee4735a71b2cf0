use actix_web::{web, HttpResponse};

use crate::dto::{VerifyAccountRequest, VerifyAccountResponse};
use crate::handlers::error_handler::handle_domain_error;

use sk_core::repositories::{AccountRepository, SessionStore};

use super::{refresh_cookie, AppState};

/// Handler for POST /api/v1/auth/verify-account
///
/// Confirms an account with the token and code from the confirmation email
/// and logs it in.
///
/// # Request Body
///
/// ```json
/// {
///     "token": "9f86d0...",
///     "code": "1a2b3c4d"
/// }
/// ```
///
/// ## Errors
/// - 400 Bad Request: Wrong code (the token stays usable)
/// - 401 Unauthorized: Token unknown, expired or already used
/// - 409 Conflict: Account already verified
pub async fn verify_account<S, A>(
    state: web::Data<AppState<S, A>>,
    request: web::Json<VerifyAccountRequest>,
) -> HttpResponse
where
    S: SessionStore + 'static,
    A: AccountRepository + 'static,
{
    let request = request.into_inner();

    match state
        .auth_service
        .confirm_account(&request.token, &request.code)
        .await
    {
        Ok(confirmed) => {
            let cookie = refresh_cookie(&state.auth_config.cookie, &confirmed.tokens);
            HttpResponse::Ok().cookie(cookie).json(VerifyAccountResponse {
                access_token: confirmed.tokens.access_token,
                expires_in: confirmed.tokens.access_expires_in,
                account: confirmed.account,
            })
        }
        Err(error) => handle_domain_error(&error),
    }
}
