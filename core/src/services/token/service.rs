//! Token lifecycle: issuance, rotation, verification and revocation

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::entities::session::{
    access_token_key, refresh_token_key, AccessRecord, RefreshRecord,
};
use crate::domain::entities::token::{
    AccessPrincipal, PriorSession, SessionId, TokenPair, REFRESH_TOKEN_BYTES,
};
use crate::errors::{DomainError, DomainResult, StoreError, TokenError};
use crate::repositories::{AccountRepository, SessionStore};

use super::codec::AccessTokenCodec;
use super::config::TokenServiceConfig;
use super::hasher::{digest_hint, hash_secret};
use super::random::TokenGenerator;

/// Random bytes in a freshly minted `jwt_version`
const JWT_VERSION_BYTES: usize = 8;

/// Verifies access tokens for the HTTP layer
#[async_trait]
pub trait AccessVerifier: Send + Sync {
    async fn verify_access(&self, token: &str) -> DomainResult<AccessPrincipal>;
}

/// Service managing the access/refresh session lifecycle.
///
/// Holds no session state of its own: every record lives in the session
/// store, whose per-key atomic delete is the only synchronization point.
pub struct TokenService<S: SessionStore, A: AccountRepository> {
    store: Arc<S>,
    accounts: Arc<A>,
    codec: AccessTokenCodec,
    generator: TokenGenerator,
    config: TokenServiceConfig,
}

impl<S: SessionStore, A: AccountRepository> TokenService<S, A> {
    /// Creates a new token service
    ///
    /// # Arguments
    ///
    /// * `store` - Session store holding refresh and access records
    /// * `accounts` - Account store supplying the live `jwt_version`
    /// * `config` - Token service configuration
    pub fn new(store: Arc<S>, accounts: Arc<A>, config: TokenServiceConfig) -> Self {
        let codec = AccessTokenCodec::new(&config.jwt_secret, config.access_token_expiry_seconds);

        Self {
            store,
            accounts,
            codec,
            generator: TokenGenerator::new(),
            config,
        }
    }

    /// Replaces the random source used for refresh tokens and version stamps
    pub fn with_generator(mut self, generator: TokenGenerator) -> Self {
        self.generator = generator;
        self
    }

    pub fn codec(&self) -> &AccessTokenCodec {
        &self.codec
    }

    /// Issues a new session for `user_id`.
    ///
    /// With `prior` set this is the rotation path: the prior session's
    /// records are claimed and deleted before anything new is minted. If the
    /// prior refresh record is already gone, a concurrent rotation won and
    /// this call fails with `InvalidSession`.
    ///
    /// If the refresh record is written but the access record is not, the
    /// refresh record is deleted again (best effort) and the call fails with
    /// `IssuanceFailed`. A refresh record that survives a failed compensating
    /// delete expires with its TTL.
    pub async fn issue(
        &self,
        user_id: Uuid,
        jwt_version: &str,
        prior: Option<PriorSession>,
    ) -> DomainResult<TokenPair> {
        if let Some(prior) = prior {
            self.invalidate_prior(user_id, &prior).await?;
        }

        let session_id = SessionId::new();
        let refresh_token = self.generator.generate(REFRESH_TOKEN_BYTES)?;
        let refresh_hash = hash_secret(&refresh_token);
        let access_token = self.codec.sign(user_id, session_id, jwt_version)?;

        self.persist_session(user_id, session_id, &refresh_hash)
            .await?;

        tracing::info!(
            user_id = %user_id,
            session_id = %session_id,
            event = "session_issued",
            "Issued new session"
        );

        Ok(TokenPair {
            access_token,
            refresh_token,
            session_id,
            access_expires_in: self.config.access_token_expiry_seconds,
            refresh_expires_in: self.config.refresh_token_expiry_seconds,
        })
    }

    /// Exchanges a raw refresh token for a new session.
    ///
    /// Unknown, expired and already rotated tokens all fail with the same
    /// `InvalidSession`.
    pub async fn refresh(&self, raw_refresh_token: &str) -> DomainResult<TokenPair> {
        let refresh_hash = hash_secret(raw_refresh_token);
        let key = refresh_token_key(&refresh_hash);

        let fields = self
            .store
            .get_all(&key)
            .await?
            .ok_or(TokenError::InvalidSession)?;
        let record = RefreshRecord::from_fields(&fields)
            .ok_or_else(|| StoreError::Corrupted { key: key.clone() })?;

        // jwt_version is read fresh so a bump since login takes effect here
        let account = self
            .accounts
            .find_by_id(record.user_id)
            .await?
            .ok_or_else(|| {
                tracing::warn!(
                    user_id = %record.user_id,
                    event = "refresh_account_missing",
                    "Refresh token belongs to an unknown account"
                );
                TokenError::InvalidSession
            })?;

        tracing::debug!(
            user_id = %record.user_id,
            session_id = %record.session_id,
            refresh_hint = digest_hint(&refresh_hash),
            "Rotating session"
        );

        self.issue(
            record.user_id,
            &account.jwt_version,
            Some(PriorSession {
                raw_refresh_token: raw_refresh_token.to_string(),
                session_id: record.session_id,
            }),
        )
        .await
    }

    /// Verifies an access token and confirms its session is still live.
    ///
    /// A valid signature is not enough: the access record must exist, belong
    /// to the same user, and the embedded `jwt_version` must equal the
    /// account's current one. Otherwise the token is `SessionRevoked`.
    pub async fn verify_access(&self, token: &str) -> DomainResult<AccessPrincipal> {
        let principal = self.codec.verify(token)?;
        let key = access_token_key(principal.session_id);

        let fields = self
            .store
            .get_all(&key)
            .await?
            .ok_or(TokenError::SessionRevoked)?;
        let record =
            AccessRecord::from_fields(&fields).ok_or_else(|| StoreError::Corrupted { key })?;

        if record.user_id != principal.user_id {
            tracing::warn!(
                user_id = %principal.user_id,
                session_id = %principal.session_id,
                event = "access_record_mismatch",
                "Access record belongs to a different user"
            );
            return Err(TokenError::SessionRevoked.into());
        }

        let account = self
            .accounts
            .find_by_id(principal.user_id)
            .await?
            .ok_or(TokenError::SessionRevoked)?;

        if account.jwt_version != principal.jwt_version {
            tracing::debug!(
                user_id = %principal.user_id,
                session_id = %principal.session_id,
                "Access token carries a stale jwt version"
            );
            return Err(TokenError::SessionRevoked.into());
        }

        Ok(principal)
    }

    /// Deletes both records of a session. Already absent records are fine.
    pub async fn revoke(&self, session_id: SessionId, refresh_hash: &str) -> DomainResult<()> {
        let refresh_removed = self.store.delete(&refresh_token_key(refresh_hash)).await?;
        let access_removed = self.store.delete(&access_token_key(session_id)).await?;

        tracing::info!(
            session_id = %session_id,
            refresh_removed,
            access_removed,
            event = "session_revoked",
            "Revoked session"
        );
        Ok(())
    }

    /// Deletes only the access record of a session, for callers that no
    /// longer hold the refresh token
    pub async fn revoke_access(&self, session_id: SessionId) -> DomainResult<()> {
        let removed = self.store.delete(&access_token_key(session_id)).await?;

        tracing::info!(
            session_id = %session_id,
            access_removed = removed,
            event = "session_access_revoked",
            "Revoked session access"
        );
        Ok(())
    }

    /// Invalidates every outstanding access token of `user_id` by replacing
    /// the account's `jwt_version`. Returns the new version.
    pub async fn revoke_all(&self, user_id: Uuid) -> DomainResult<String> {
        let mut account = self
            .accounts
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| DomainError::NotFound {
                resource: format!("account {}", user_id),
            })?;

        let jwt_version = self.new_jwt_version()?;
        account.set_jwt_version(jwt_version.clone());
        self.accounts.save(account).await?;

        tracing::info!(
            user_id = %user_id,
            event = "sessions_revoked_globally",
            "Rotated jwt version"
        );
        Ok(jwt_version)
    }

    /// Fresh random `jwt_version` value
    pub fn new_jwt_version(&self) -> Result<String, TokenError> {
        self.generator.generate(JWT_VERSION_BYTES)
    }

    async fn invalidate_prior(&self, user_id: Uuid, prior: &PriorSession) -> DomainResult<()> {
        let refresh_hash = hash_secret(&prior.raw_refresh_token);

        let claimed = self.store.delete(&refresh_token_key(&refresh_hash)).await?;
        if !claimed {
            tracing::warn!(
                user_id = %user_id,
                session_id = %prior.session_id,
                refresh_hint = digest_hint(&refresh_hash),
                event = "refresh_reuse",
                "Refresh token was already rotated"
            );
            return Err(TokenError::InvalidSession.into());
        }

        self.store.delete(&access_token_key(prior.session_id)).await?;
        Ok(())
    }

    async fn persist_session(
        &self,
        user_id: Uuid,
        session_id: SessionId,
        refresh_hash: &str,
    ) -> DomainResult<()> {
        let refresh_key = refresh_token_key(refresh_hash);
        let refresh = RefreshRecord {
            user_id,
            session_id,
        };
        self.store
            .put(
                &refresh_key,
                refresh.to_fields(),
                Duration::from_secs(self.config.refresh_token_expiry_seconds),
            )
            .await?;

        let access = AccessRecord { user_id };
        let written = self
            .store
            .put(
                &access_token_key(session_id),
                access.to_fields(),
                Duration::from_secs(self.config.access_token_expiry_seconds),
            )
            .await;

        if let Err(e) = written {
            if let Err(cleanup) = self.store.delete(&refresh_key).await {
                tracing::warn!(
                    user_id = %user_id,
                    session_id = %session_id,
                    error = %cleanup,
                    "Orphaned refresh record left to expire"
                );
            }
            return Err(TokenError::IssuanceFailed {
                message: e.to_string(),
            }
            .into());
        }

        Ok(())
    }
}

#[async_trait]
impl<S, A> AccessVerifier for TokenService<S, A>
where
    S: SessionStore,
    A: AccountRepository,
{
    async fn verify_access(&self, token: &str) -> DomainResult<AccessPrincipal> {
        TokenService::verify_access(self, token).await
    }
}
