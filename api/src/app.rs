//! Application factory
//!
//! Builds the actix-web application around an [`AppState`]. The token
//! service is also registered as `Arc<dyn AccessVerifier>` so the Bearer
//! middleware does not need to know the store and repository types.

use std::sync::Arc;

use actix_web::{
    body::MessageBody,
    dev::{ServiceFactory, ServiceRequest, ServiceResponse},
    middleware::Logger,
    web, App, Error, HttpResponse,
};

use crate::dto::{ErrorResponse, ErrorResponseExt};
use crate::middleware::auth::JwtAuth;
use crate::routes::auth::{logout, password_reset, refresh, session, verify_account, AppState};

use sk_core::repositories::{AccountRepository, SessionStore};
use sk_core::services::AccessVerifier;

/// Create and configure the application with all dependencies
pub fn create_app<S, A>(
    app_state: web::Data<AppState<S, A>>,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse<impl MessageBody>,
        Error = Error,
        InitError = (),
    >,
>
where
    S: SessionStore + 'static,
    A: AccountRepository + 'static,
{
    let verifier: Arc<dyn AccessVerifier> = app_state.auth_service.token_service().clone();

    App::new()
        .app_data(app_state)
        .app_data(web::Data::new(verifier))
        .wrap(Logger::default())
        .route("/health", web::get().to(health_check))
        .service(
            web::scope("/api/v1").service(
                web::scope("/auth")
                    .route("/refresh", web::post().to(refresh::refresh::<S, A>))
                    .route(
                        "/verify-account",
                        web::post().to(verify_account::verify_account::<S, A>),
                    )
                    .route(
                        "/password-reset/confirm",
                        web::post().to(password_reset::confirm_password_reset::<S, A>),
                    )
                    .service(
                        web::resource("/logout")
                            .wrap(JwtAuth::new())
                            .route(web::post().to(logout::logout::<S, A>)),
                    )
                    .service(
                        web::resource("/logout-all")
                            .wrap(JwtAuth::new())
                            .route(web::post().to(logout::logout_all::<S, A>)),
                    )
                    .service(
                        web::resource("/session")
                            .wrap(JwtAuth::new())
                            .route(web::get().to(session::session)),
                    ),
            ),
        )
        .default_service(web::route().to(not_found))
}

/// Health check endpoint handler
async fn health_check() -> HttpResponse {
    HttpResponse::Ok().json(serde_json::json!({
        "status": "healthy",
        "service": "sessionkeep-api",
        "version": env!("CARGO_PKG_VERSION"),
        "timestamp": chrono::Utc::now().to_rfc3339(),
    }))
}

/// Default 404 handler
async fn not_found() -> HttpResponse {
    ErrorResponse::new("not_found", "The requested resource was not found")
        .to_response(actix_web::http::StatusCode::NOT_FOUND)
}
