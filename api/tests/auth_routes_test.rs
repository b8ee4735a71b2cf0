//! Integration tests for the authentication routes

use std::sync::Arc;

use actix_web::{cookie::Cookie, dev::ServiceResponse, http::header, test, web};
use sk_api::app::create_app;
use sk_api::routes::auth::AppState;
use sk_core::domain::{Account, TokenPair};
use sk_core::repositories::{AccountRepository, InMemoryAccountRepository, InMemorySessionStore};
use sk_core::services::{
    AuthService, TokenService, TokenServiceConfig, VerificationService,
    VerificationServiceConfig,
};
use sk_shared::{AuthConfig, JwtConfig};
use uuid::Uuid;

type State = AppState<InMemorySessionStore, InMemoryAccountRepository>;

struct TestContext {
    state: web::Data<State>,
    accounts: Arc<InMemoryAccountRepository>,
}

fn context() -> TestContext {
    let mut config = AuthConfig::default();
    config.jwt = JwtConfig::new("route-test-secret");
    config.password_hash_cost = 4;

    let store = Arc::new(InMemorySessionStore::new());
    let accounts = Arc::new(InMemoryAccountRepository::new());
    let token_service = Arc::new(TokenService::new(
        store.clone(),
        accounts.clone(),
        TokenServiceConfig::from(&config.jwt),
    ));
    let verification_service = Arc::new(VerificationService::new(
        store,
        VerificationServiceConfig::from(&config.verification),
    ));
    let auth_service = Arc::new(AuthService::new(
        accounts.clone(),
        token_service,
        verification_service,
    ));

    TestContext {
        state: web::Data::new(AppState::new(auth_service, config)),
        accounts,
    }
}

impl TestContext {
    async fn seed_account(&self, verified: bool) -> Uuid {
        let mut account = Account::new(
            "user@example.com".to_string(),
            "$2b$04$unused".to_string(),
            "v1".to_string(),
        );
        if verified {
            account.verify();
        }
        self.accounts.insert(account).await
    }

    async fn login(&self, user_id: Uuid) -> TokenPair {
        self.state.auth_service.start_session(user_id).await.unwrap()
    }
}

fn bearer(token: &str) -> (header::HeaderName, String) {
    (header::AUTHORIZATION, format!("Bearer {}", token))
}

fn refresh_cookie_value<B>(resp: &ServiceResponse<B>) -> Option<String> {
    resp.response()
        .cookies()
        .find(|cookie| cookie.name() == "refresh_token")
        .map(|cookie| cookie.value().to_string())
}

#[actix_web::test]
async fn test_health_check() {
    let ctx = context();
    let app = test::init_service(create_app(ctx.state.clone())).await;

    let req = test::TestRequest::get().uri("/health").to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), 200);
}

#[actix_web::test]
async fn test_unknown_route_returns_404() {
    let ctx = context();
    let app = test::init_service(create_app(ctx.state.clone())).await;

    let req = test::TestRequest::get().uri("/api/v1/nope").to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), 404);
    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], "not_found");
}

#[actix_web::test]
async fn test_session_requires_bearer_token() {
    let ctx = context();
    let app = test::init_service(create_app(ctx.state.clone())).await;

    let req = test::TestRequest::get()
        .uri("/api/v1/auth/session")
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), 401);
    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], "unauthorized");
}

#[actix_web::test]
async fn test_session_returns_principal() {
    let ctx = context();
    let user_id = ctx.seed_account(true).await;
    let pair = ctx.login(user_id).await;
    let app = test::init_service(create_app(ctx.state.clone())).await;

    let req = test::TestRequest::get()
        .uri("/api/v1/auth/session")
        .insert_header(bearer(&pair.access_token))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), 200);
    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["user_id"], user_id.to_string());
    assert_eq!(body["session_id"], pair.session_id.to_string());
}

#[actix_web::test]
async fn test_forged_and_revoked_tokens_get_identical_401() {
    let ctx = context();
    let user_id = ctx.seed_account(true).await;
    let pair = ctx.login(user_id).await;
    ctx.state
        .auth_service
        .logout(pair.session_id, Some(&pair.refresh_token))
        .await
        .unwrap();
    let app = test::init_service(create_app(ctx.state.clone())).await;

    let mut bodies = Vec::new();
    for token in [pair.access_token.as_str(), "not.a.jwt"] {
        let req = test::TestRequest::get()
            .uri("/api/v1/auth/session")
            .insert_header(bearer(token))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), 401);

        let body: serde_json::Value = test::read_body_json(resp).await;
        bodies.push((body["error"].clone(), body["message"].clone()));
    }

    assert_eq!(bodies[0], bodies[1]);
}

#[actix_web::test]
async fn test_refresh_rotates_cookie() {
    let ctx = context();
    let user_id = ctx.seed_account(true).await;
    let pair = ctx.login(user_id).await;
    let app = test::init_service(create_app(ctx.state.clone())).await;

    let req = test::TestRequest::post()
        .uri("/api/v1/auth/refresh")
        .cookie(Cookie::new("refresh_token", pair.refresh_token.clone()))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), 200);
    let rotated = refresh_cookie_value(&resp).expect("rotated refresh cookie");
    assert_ne!(rotated, pair.refresh_token);

    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["token_type"], "Bearer");
    assert_eq!(body["expires_in"], 3600);
    let access_token = body["access_token"].as_str().unwrap().to_string();

    // The old access token died with its session; the new one works
    let req = test::TestRequest::get()
        .uri("/api/v1/auth/session")
        .insert_header(bearer(&pair.access_token))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), 401);

    let req = test::TestRequest::get()
        .uri("/api/v1/auth/session")
        .insert_header(bearer(&access_token))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), 200);
}

#[actix_web::test]
async fn test_refresh_replay_is_rejected_and_cookie_cleared() {
    let ctx = context();
    let user_id = ctx.seed_account(true).await;
    let pair = ctx.login(user_id).await;
    let app = test::init_service(create_app(ctx.state.clone())).await;

    let first = test::TestRequest::post()
        .uri("/api/v1/auth/refresh")
        .cookie(Cookie::new("refresh_token", pair.refresh_token.clone()))
        .to_request();
    assert_eq!(test::call_service(&app, first).await.status(), 200);

    let replay = test::TestRequest::post()
        .uri("/api/v1/auth/refresh")
        .cookie(Cookie::new("refresh_token", pair.refresh_token.clone()))
        .to_request();
    let resp = test::call_service(&app, replay).await;

    assert_eq!(resp.status(), 401);
    assert_eq!(refresh_cookie_value(&resp), Some(String::new()));
}

#[actix_web::test]
async fn test_refresh_without_cookie() {
    let ctx = context();
    let app = test::init_service(create_app(ctx.state.clone())).await;

    let req = test::TestRequest::post()
        .uri("/api/v1/auth/refresh")
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), 401);
}

#[actix_web::test]
async fn test_logout_revokes_session_and_clears_cookie() {
    let ctx = context();
    let user_id = ctx.seed_account(true).await;
    let pair = ctx.login(user_id).await;
    let app = test::init_service(create_app(ctx.state.clone())).await;

    let req = test::TestRequest::post()
        .uri("/api/v1/auth/logout")
        .insert_header(bearer(&pair.access_token))
        .cookie(Cookie::new("refresh_token", pair.refresh_token.clone()))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), 200);
    assert_eq!(refresh_cookie_value(&resp), Some(String::new()));
    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["message"], "Logged out successfully");

    let req = test::TestRequest::get()
        .uri("/api/v1/auth/session")
        .insert_header(bearer(&pair.access_token))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), 401);

    let req = test::TestRequest::post()
        .uri("/api/v1/auth/refresh")
        .cookie(Cookie::new("refresh_token", pair.refresh_token.clone()))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), 401);
}

#[actix_web::test]
async fn test_logout_without_auth() {
    let ctx = context();
    let app = test::init_service(create_app(ctx.state.clone())).await;

    let req = test::TestRequest::post()
        .uri("/api/v1/auth/logout")
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), 401);
}

#[actix_web::test]
async fn test_logout_all_revokes_other_sessions() {
    let ctx = context();
    let user_id = ctx.seed_account(true).await;
    let phone = ctx.login(user_id).await;
    let laptop = ctx.login(user_id).await;
    let app = test::init_service(create_app(ctx.state.clone())).await;

    let req = test::TestRequest::post()
        .uri("/api/v1/auth/logout-all")
        .insert_header(bearer(&phone.access_token))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), 200);

    let req = test::TestRequest::get()
        .uri("/api/v1/auth/session")
        .insert_header(bearer(&laptop.access_token))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), 401);
}

#[actix_web::test]
async fn test_verify_account_sets_refresh_cookie() {
    let ctx = context();
    let user_id = ctx.seed_account(false).await;
    let issued = ctx
        .state
        .auth_service
        .request_account_verification(user_id)
        .await
        .unwrap();
    let app = test::init_service(create_app(ctx.state.clone())).await;

    let req = test::TestRequest::post()
        .uri("/api/v1/auth/verify-account")
        .set_json(serde_json::json!({ "token": issued.raw_token, "code": issued.code }))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), 200);
    assert!(refresh_cookie_value(&resp).is_some_and(|value| !value.is_empty()));

    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["account"]["is_verified"], true);
    assert!(body["account"].get("password_hash").is_none());
    assert!(body["access_token"].is_string());

    let account = ctx.accounts.find_by_id(user_id).await.unwrap().unwrap();
    assert!(account.is_verified);
}

#[actix_web::test]
async fn test_verify_account_wrong_code() {
    let ctx = context();
    let user_id = ctx.seed_account(false).await;
    let issued = ctx
        .state
        .auth_service
        .request_account_verification(user_id)
        .await
        .unwrap();
    let app = test::init_service(create_app(ctx.state.clone())).await;

    let req = test::TestRequest::post()
        .uri("/api/v1/auth/verify-account")
        .set_json(serde_json::json!({ "token": issued.raw_token, "code": "00000000" }))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), 400);
    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], "invalid_code");
}

#[actix_web::test]
async fn test_verify_account_unknown_token() {
    let ctx = context();
    let app = test::init_service(create_app(ctx.state.clone())).await;

    let req = test::TestRequest::post()
        .uri("/api/v1/auth/verify-account")
        .set_json(serde_json::json!({ "token": "deadbeef", "code": "00000000" }))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), 401);
}

#[actix_web::test]
async fn test_password_reset_confirm() {
    let ctx = context();
    let user_id = ctx.seed_account(true).await;
    let pair = ctx.login(user_id).await;
    let issued = ctx
        .state
        .auth_service
        .request_password_reset(user_id)
        .await
        .unwrap();
    let app = test::init_service(create_app(ctx.state.clone())).await;

    let req = test::TestRequest::post()
        .uri("/api/v1/auth/password-reset/confirm")
        .set_json(serde_json::json!({
            "token": issued.raw_token,
            "code": issued.code,
            "password": "correct horse battery staple",
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 200);

    let account = ctx.accounts.find_by_id(user_id).await.unwrap().unwrap();
    assert!(bcrypt::verify("correct horse battery staple", &account.password_hash).unwrap());

    let req = test::TestRequest::get()
        .uri("/api/v1/auth/session")
        .insert_header(bearer(&pair.access_token))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), 401);
}

#[actix_web::test]
async fn test_password_reset_rejects_empty_password() {
    let ctx = context();
    let user_id = ctx.seed_account(true).await;
    let issued = ctx
        .state
        .auth_service
        .request_password_reset(user_id)
        .await
        .unwrap();
    let app = test::init_service(create_app(ctx.state.clone())).await;

    let req = test::TestRequest::post()
        .uri("/api/v1/auth/password-reset/confirm")
        .set_json(serde_json::json!({
            "token": issued.raw_token,
            "code": issued.code,
            "password": "",
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), 400);
    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], "invalid_password");
}
