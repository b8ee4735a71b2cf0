use uuid::Uuid;

use crate::domain::entities::account::Account;
use crate::repositories::account::{AccountRepository, InMemoryAccountRepository};

fn account() -> Account {
    Account::new(
        "user@example.com".to_string(),
        "$2b$04$hash".to_string(),
        "v1".to_string(),
    )
}

#[tokio::test]
async fn test_find_seeded_account() {
    let repo = InMemoryAccountRepository::new();
    let id = repo.insert(account()).await;

    let found = repo.find_by_id(id).await.unwrap().unwrap();
    assert_eq!(found.email, "user@example.com");
}

#[tokio::test]
async fn test_find_unknown_account() {
    let repo = InMemoryAccountRepository::new();
    assert!(repo.find_by_id(Uuid::new_v4()).await.unwrap().is_none());
}

#[tokio::test]
async fn test_save_replaces_account() {
    let repo = InMemoryAccountRepository::new();
    let id = repo.insert(account()).await;

    let mut updated = repo.find_by_id(id).await.unwrap().unwrap();
    updated.set_jwt_version("v2".to_string());
    repo.save(updated).await.unwrap();

    let found = repo.find_by_id(id).await.unwrap().unwrap();
    assert_eq!(found.jwt_version, "v2");
}
