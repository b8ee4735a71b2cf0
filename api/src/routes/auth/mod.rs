//! Authentication route handlers
//!
//! Session endpoints (refresh, logout, session introspection) and the
//! account confirmation and password reset endpoints. The raw refresh token
//! only ever travels in an HTTP-only cookie; the access token is returned in
//! the body and sent back as a Bearer header.

pub mod logout;
pub mod password_reset;
pub mod refresh;
pub mod session;
pub mod verify_account;

use std::sync::Arc;

use actix_web::cookie::{time::Duration, Cookie, SameSite};
use actix_web::HttpResponse;

use sk_core::domain::TokenPair;
use sk_core::repositories::{AccountRepository, SessionStore};
use sk_core::services::AuthService;
use sk_shared::config::{AuthConfig, RefreshCookieConfig};

/// Application state that holds shared services
pub struct AppState<S, A>
where
    S: SessionStore,
    A: AccountRepository,
{
    pub auth_service: Arc<AuthService<S, A>>,
    pub auth_config: AuthConfig,
}

impl<S, A> AppState<S, A>
where
    S: SessionStore,
    A: AccountRepository,
{
    pub fn new(auth_service: Arc<AuthService<S, A>>, auth_config: AuthConfig) -> Self {
        Self {
            auth_service,
            auth_config,
        }
    }
}

/// Cookie carrying the raw refresh token of `pair`
pub(crate) fn refresh_cookie(config: &RefreshCookieConfig, pair: &TokenPair) -> Cookie<'static> {
    let max_age = i64::try_from(pair.refresh_expires_in).unwrap_or(i64::MAX);

    Cookie::build(config.name.clone(), pair.refresh_token.clone())
        .path(config.path.clone())
        .secure(config.secure)
        .http_only(config.http_only)
        .same_site(same_site(&config.same_site))
        .max_age(Duration::seconds(max_age))
        .finish()
}

/// Cookie instructing the client to drop its refresh token
pub(crate) fn removal_cookie(config: &RefreshCookieConfig) -> Cookie<'static> {
    let mut cookie = Cookie::build(config.name.clone(), "")
        .path(config.path.clone())
        .secure(config.secure)
        .http_only(config.http_only)
        .same_site(same_site(&config.same_site))
        .finish();
    cookie.make_removal();
    cookie
}

/// Adds a removal cookie to an already built response
pub(crate) fn clear_refresh_cookie(
    mut response: HttpResponse,
    config: &RefreshCookieConfig,
) -> HttpResponse {
    if let Err(e) = response.add_cookie(&removal_cookie(config)) {
        tracing::warn!(error = %e, "Failed to attach refresh cookie removal");
    }
    response
}

fn same_site(value: &str) -> SameSite {
    match value.to_ascii_lowercase().as_str() {
        "lax" => SameSite::Lax,
        "none" => SameSite::None,
        _ => SameSite::Strict,
    }
}
