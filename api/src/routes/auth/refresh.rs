use actix_web::{web, HttpRequest, HttpResponse};

use crate::dto::AccessTokenResponse;
use crate::handlers::error_handler::{handle_domain_error, unauthorized};

use sk_core::repositories::{AccountRepository, SessionStore};

use super::{clear_refresh_cookie, refresh_cookie, AppState};

/// Handler for POST /api/v1/auth/refresh
///
/// Rotates the session identified by the refresh token cookie.
///
/// # Response
///
/// ## Success (200 OK)
/// ```json
/// {
///     "access_token": "eyJ...",
///     "token_type": "Bearer",
///     "expires_in": 3600
/// }
/// ```
/// The rotated refresh token replaces the cookie.
///
/// ## Errors
/// - 401 Unauthorized: Cookie missing, or the refresh token is unknown,
///   expired or already used. The cookie is cleared.
/// - 503 Service Unavailable: Session store unreachable
pub async fn refresh<S, A>(req: HttpRequest, state: web::Data<AppState<S, A>>) -> HttpResponse
where
    S: SessionStore + 'static,
    A: AccountRepository + 'static,
{
    let cookie_config = &state.auth_config.cookie;

    let raw_refresh_token = match req.cookie(&cookie_config.name) {
        Some(cookie) if !cookie.value().is_empty() => cookie.value().to_string(),
        _ => return unauthorized(),
    };

    match state.auth_service.refresh_session(&raw_refresh_token).await {
        Ok(pair) => HttpResponse::Ok()
            .cookie(refresh_cookie(cookie_config, &pair))
            .json(AccessTokenResponse::from(&pair)),
        Err(error) if error.is_unauthorized() => {
            clear_refresh_cookie(handle_domain_error(&error), cookie_config)
        }
        Err(error) => handle_domain_error(&error),
    }
}
