//! Main authentication service implementation

use std::sync::Arc;

use uuid::Uuid;

use crate::domain::entities::account::Account;
use crate::domain::entities::token::{AccessPrincipal, SessionId, TokenPair};
use crate::domain::entities::verification::{IssuedVerification, VerificationPurpose};
use crate::errors::{DomainError, DomainResult};
use crate::repositories::{AccountRepository, SessionStore};
use crate::services::token::{hash_secret, TokenService};
use crate::services::verification::VerificationService;

/// An account together with a freshly issued session
#[derive(Debug, Clone)]
pub struct AccountSession {
    pub account: Account,
    pub tokens: TokenPair,
}

/// Authentication service for the account-facing session flows
pub struct AuthService<S, A>
where
    S: SessionStore,
    A: AccountRepository,
{
    /// Account store
    accounts: Arc<A>,
    /// Session lifecycle
    token_service: Arc<TokenService<S, A>>,
    /// One-time verification tokens
    verification_service: Arc<VerificationService<S>>,
}

impl<S, A> AuthService<S, A>
where
    S: SessionStore,
    A: AccountRepository,
{
    /// Create a new authentication service
    ///
    /// # Arguments
    ///
    /// * `accounts` - Account store, shared with the token service
    /// * `token_service` - Session lifecycle manager
    /// * `verification_service` - Verification token manager
    pub fn new(
        accounts: Arc<A>,
        token_service: Arc<TokenService<S, A>>,
        verification_service: Arc<VerificationService<S>>,
    ) -> Self {
        Self {
            accounts,
            token_service,
            verification_service,
        }
    }

    pub fn token_service(&self) -> &Arc<TokenService<S, A>> {
        &self.token_service
    }

    /// Start a session after login or registration
    pub async fn start_session(&self, user_id: Uuid) -> DomainResult<TokenPair> {
        let account = self.find_account(user_id).await?;
        self.token_service
            .issue(account.id, &account.jwt_version, None)
            .await
    }

    /// Rotate a session using its raw refresh token
    pub async fn refresh_session(&self, raw_refresh_token: &str) -> DomainResult<TokenPair> {
        self.token_service.refresh(raw_refresh_token).await
    }

    /// Resolve the identity behind an access token
    pub async fn authenticate(&self, access_token: &str) -> DomainResult<AccessPrincipal> {
        self.token_service.verify_access(access_token).await
    }

    /// End one session. Safe to repeat.
    ///
    /// Without the refresh token only the access record can be located; the
    /// refresh record then lapses with its TTL.
    pub async fn logout(
        &self,
        session_id: SessionId,
        raw_refresh_token: Option<&str>,
    ) -> DomainResult<()> {
        match raw_refresh_token {
            Some(raw) => {
                self.token_service
                    .revoke(session_id, &hash_secret(raw))
                    .await
            }
            None => self.token_service.revoke_access(session_id).await,
        }
    }

    /// Invalidate every access token of the account
    pub async fn logout_everywhere(&self, user_id: Uuid) -> DomainResult<()> {
        self.token_service.revoke_all(user_id).await?;
        Ok(())
    }

    /// Issue an account confirmation token and code for delivery by email
    pub async fn request_account_verification(
        &self,
        user_id: Uuid,
    ) -> DomainResult<IssuedVerification> {
        let account = self.find_account(user_id).await?;
        if account.is_verified {
            return Err(DomainError::Conflict {
                message: "Account is already verified".to_string(),
            });
        }

        self.verification_service
            .issue(account.id, VerificationPurpose::AccountVerification)
            .await
    }

    /// Issue a password reset token and code for delivery by email
    pub async fn request_password_reset(&self, user_id: Uuid) -> DomainResult<IssuedVerification> {
        let account = self.find_account(user_id).await?;
        self.verification_service
            .issue(account.id, VerificationPurpose::PasswordReset)
            .await
    }

    /// Confirm an account and log it in
    ///
    /// The token is only consumed once the account is known to need
    /// confirmation.
    pub async fn confirm_account(&self, raw_token: &str, code: &str) -> DomainResult<AccountSession> {
        let purpose = VerificationPurpose::AccountVerification;
        let user_id = self
            .verification_service
            .verify(raw_token, code, purpose)
            .await?;

        let mut account = self.find_account(user_id).await?;
        if account.is_verified {
            return Err(DomainError::Conflict {
                message: "Account is already verified".to_string(),
            });
        }

        self.verification_service
            .consume(raw_token, code, purpose)
            .await?;

        account.verify();
        let account = self.accounts.save(account).await?;
        let tokens = self
            .token_service
            .issue(account.id, &account.jwt_version, None)
            .await?;

        tracing::info!(
            user_id = %account.id,
            event = "account_verified",
            "Account verified"
        );

        Ok(AccountSession { account, tokens })
    }

    /// Replace the password and revoke every outstanding access token
    ///
    /// # Arguments
    ///
    /// * `raw_token` - Password reset token from the emailed link
    /// * `code` - Code from the same email
    /// * `password_hash` - New password, already slow-hashed by the caller
    pub async fn reset_password(
        &self,
        raw_token: &str,
        code: &str,
        password_hash: String,
    ) -> DomainResult<()> {
        let purpose = VerificationPurpose::PasswordReset;
        let user_id = self
            .verification_service
            .verify(raw_token, code, purpose)
            .await?;
        let mut account = self.find_account(user_id).await?;

        self.verification_service
            .consume(raw_token, code, purpose)
            .await?;

        let jwt_version = self.token_service.new_jwt_version()?;
        account.set_password_hash(password_hash);
        account.set_jwt_version(jwt_version);
        self.accounts.save(account).await?;

        tracing::info!(
            user_id = %user_id,
            event = "password_reset",
            "Password reset, outstanding access tokens revoked"
        );
        Ok(())
    }

    async fn find_account(&self, user_id: Uuid) -> DomainResult<Account> {
        self.accounts
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| DomainError::NotFound {
                resource: format!("account {}", user_id),
            })
    }
}
