//! Unit tests for authentication service

use std::sync::Arc;

use uuid::Uuid;

use crate::domain::entities::account::Account;
use crate::errors::{DomainError, TokenError};
use crate::repositories::{AccountRepository, InMemoryAccountRepository, InMemorySessionStore};
use crate::services::auth::AuthService;
use crate::services::token::tests::mocks::test_config;
use crate::services::token::TokenService;
use crate::services::verification::{VerificationService, VerificationServiceConfig};

struct Fixture {
    store: Arc<InMemorySessionStore>,
    accounts: Arc<InMemoryAccountRepository>,
    service: AuthService<InMemorySessionStore, InMemoryAccountRepository>,
}

fn fixture() -> Fixture {
    let store = Arc::new(InMemorySessionStore::new());
    let accounts = Arc::new(InMemoryAccountRepository::new());
    let token_service = Arc::new(TokenService::new(
        store.clone(),
        accounts.clone(),
        test_config(),
    ));
    let verification_service = Arc::new(VerificationService::new(
        store.clone(),
        VerificationServiceConfig::default(),
    ));

    Fixture {
        store,
        service: AuthService::new(accounts.clone(), token_service, verification_service),
        accounts,
    }
}

async fn seed(fixture: &Fixture, verified: bool) -> Uuid {
    let mut account = Account::new(
        "user@example.com".to_string(),
        "$2b$04$old".to_string(),
        "v1".to_string(),
    );
    if verified {
        account.verify();
    }
    fixture.accounts.insert(account).await
}

#[tokio::test]
async fn test_start_session_uses_account_version() {
    let f = fixture();
    let user_id = seed(&f, true).await;

    let pair = f.service.start_session(user_id).await.unwrap();
    let principal = f.service.authenticate(&pair.access_token).await.unwrap();

    assert_eq!(principal.user_id, user_id);
    assert_eq!(principal.jwt_version, "v1");
}

#[tokio::test]
async fn test_start_session_unknown_account() {
    let f = fixture();
    let result = f.service.start_session(Uuid::new_v4()).await;
    assert!(matches!(result, Err(DomainError::NotFound { .. })));
}

#[tokio::test]
async fn test_refresh_then_logout() {
    let f = fixture();
    let user_id = seed(&f, true).await;

    let first = f.service.start_session(user_id).await.unwrap();
    let second = f.service.refresh_session(&first.refresh_token).await.unwrap();

    f.service
        .logout(second.session_id, Some(&second.refresh_token))
        .await
        .unwrap();
    f.service
        .logout(second.session_id, Some(&second.refresh_token))
        .await
        .unwrap();

    assert!(f.service.authenticate(&second.access_token).await.is_err());
    assert!(f.service.refresh_session(&second.refresh_token).await.is_err());
    assert!(f.store.is_empty().await);
}

#[tokio::test]
async fn test_logout_without_refresh_token() {
    let f = fixture();
    let user_id = seed(&f, true).await;
    let pair = f.service.start_session(user_id).await.unwrap();

    f.service.logout(pair.session_id, None).await.unwrap();

    assert!(f.service.authenticate(&pair.access_token).await.is_err());
    assert_eq!(f.store.len().await, 1);
}

#[tokio::test]
async fn test_confirm_account() {
    let f = fixture();
    let user_id = seed(&f, false).await;

    let issued = f.service.request_account_verification(user_id).await.unwrap();
    let confirmed = f
        .service
        .confirm_account(&issued.raw_token, &issued.code)
        .await
        .unwrap();

    assert!(confirmed.account.is_verified);
    assert!(f.accounts.find_by_id(user_id).await.unwrap().unwrap().is_verified);

    let principal = f
        .service
        .authenticate(&confirmed.tokens.access_token)
        .await
        .unwrap();
    assert_eq!(principal.user_id, user_id);
}

#[tokio::test]
async fn test_confirm_account_wrong_code_keeps_token() {
    let f = fixture();
    let user_id = seed(&f, false).await;
    let issued = f.service.request_account_verification(user_id).await.unwrap();

    let result = f.service.confirm_account(&issued.raw_token, "00000000").await;
    assert!(matches!(
        result,
        Err(DomainError::Token(TokenError::CodeMismatch))
    ));
    assert!(!f.accounts.find_by_id(user_id).await.unwrap().unwrap().is_verified);

    assert!(f
        .service
        .confirm_account(&issued.raw_token, &issued.code)
        .await
        .is_ok());
}

#[tokio::test]
async fn test_confirm_account_is_single_use() {
    let f = fixture();
    let user_id = seed(&f, false).await;
    let issued = f.service.request_account_verification(user_id).await.unwrap();

    f.service
        .confirm_account(&issued.raw_token, &issued.code)
        .await
        .unwrap();
    let again = f.service.confirm_account(&issued.raw_token, &issued.code).await;

    assert!(matches!(
        again,
        Err(DomainError::Token(TokenError::VerificationNotFound))
    ));
}

#[tokio::test]
async fn test_request_verification_for_verified_account() {
    let f = fixture();
    let user_id = seed(&f, true).await;

    let result = f.service.request_account_verification(user_id).await;
    assert!(matches!(result, Err(DomainError::Conflict { .. })));
}

#[tokio::test]
async fn test_reset_password_revokes_access_tokens() {
    let f = fixture();
    let user_id = seed(&f, true).await;
    let session = f.service.start_session(user_id).await.unwrap();

    let issued = f.service.request_password_reset(user_id).await.unwrap();
    f.service
        .reset_password(&issued.raw_token, &issued.code, "$2b$04$new".to_string())
        .await
        .unwrap();

    let account = f.accounts.find_by_id(user_id).await.unwrap().unwrap();
    assert_eq!(account.password_hash, "$2b$04$new");
    assert_ne!(account.jwt_version, "v1");

    let result = f.service.authenticate(&session.access_token).await;
    assert!(matches!(
        result,
        Err(DomainError::Token(TokenError::SessionRevoked))
    ));
}

#[tokio::test]
async fn test_reset_token_cannot_confirm_account() {
    let f = fixture();
    let user_id = seed(&f, false).await;
    let issued = f.service.request_password_reset(user_id).await.unwrap();

    let result = f.service.confirm_account(&issued.raw_token, &issued.code).await;
    assert!(matches!(
        result,
        Err(DomainError::Token(TokenError::VerificationNotFound))
    ));
}

#[tokio::test]
async fn test_logout_everywhere() {
    let f = fixture();
    let user_id = seed(&f, true).await;
    let phone = f.service.start_session(user_id).await.unwrap();
    let laptop = f.service.start_session(user_id).await.unwrap();

    f.service.logout_everywhere(user_id).await.unwrap();

    assert!(f.service.authenticate(&phone.access_token).await.is_err());
    assert!(f.service.authenticate(&laptop.access_token).await.is_err());
}
