use actix_web::{web, HttpRequest, HttpResponse};

use crate::dto::MessageResponse;
use crate::handlers::error_handler::handle_domain_error;
use crate::middleware::auth::AuthContext;

use sk_core::repositories::{AccountRepository, SessionStore};

use super::{clear_refresh_cookie, AppState};

/// Handler for POST /api/v1/auth/logout
///
/// Ends the caller's session. Requires a Bearer access token; the refresh
/// token cookie, when present, is revoked together with it and cleared.
///
/// ## Errors
/// - 401 Unauthorized: Missing or invalid access token
/// - 503 Service Unavailable: Session store unreachable
pub async fn logout<S, A>(
    req: HttpRequest,
    state: web::Data<AppState<S, A>>,
    auth: AuthContext,
) -> HttpResponse
where
    S: SessionStore + 'static,
    A: AccountRepository + 'static,
{
    let cookie_config = &state.auth_config.cookie;
    let raw_refresh_token = req
        .cookie(&cookie_config.name)
        .map(|cookie| cookie.value().to_string())
        .filter(|value| !value.is_empty());

    match state
        .auth_service
        .logout(auth.session_id, raw_refresh_token.as_deref())
        .await
    {
        Ok(()) => clear_refresh_cookie(
            HttpResponse::Ok().json(MessageResponse::new("Logged out successfully")),
            cookie_config,
        ),
        Err(error) => handle_domain_error(&error),
    }
}

/// Handler for POST /api/v1/auth/logout-all
///
/// Ends the caller's session and invalidates every other access token of
/// the account.
pub async fn logout_all<S, A>(
    req: HttpRequest,
    state: web::Data<AppState<S, A>>,
    auth: AuthContext,
) -> HttpResponse
where
    S: SessionStore + 'static,
    A: AccountRepository + 'static,
{
    let cookie_config = &state.auth_config.cookie;
    let raw_refresh_token = req
        .cookie(&cookie_config.name)
        .map(|cookie| cookie.value().to_string())
        .filter(|value| !value.is_empty());

    if let Err(error) = state
        .auth_service
        .logout(auth.session_id, raw_refresh_token.as_deref())
        .await
    {
        return handle_domain_error(&error);
    }

    match state.auth_service.logout_everywhere(auth.user_id).await {
        Ok(()) => clear_refresh_cookie(
            HttpResponse::Ok().json(MessageResponse::new("Logged out of all sessions")),
            cookie_config,
        ),
        Err(error) => handle_domain_error(&error),
    }
}
