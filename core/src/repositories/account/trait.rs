//! Account repository trait defining the interface the token lifecycle needs
//! from the account store.

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::entities::account::Account;
use crate::errors::DomainError;

/// Repository trait for the account profile store.
///
/// Only the two operations the token lifecycle depends on are modelled here:
/// reading the live `jwt_version` and persisting a bumped one.
#[async_trait]
pub trait AccountRepository: Send + Sync {
    /// Find an account by ID
    ///
    /// # Returns
    /// * `Ok(Some(Account))` - Account found
    /// * `Ok(None)` - No account with the given ID
    /// * `Err(DomainError)` - Store error occurred
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Account>, DomainError>;

    /// Persist an account, replacing any stored version of it
    async fn save(&self, account: Account) -> Result<Account, DomainError>;
}
