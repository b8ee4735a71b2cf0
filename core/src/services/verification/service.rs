//! Main verification service implementation

use std::sync::Arc;
use std::time::Duration;

use constant_time_eq::constant_time_eq;
use uuid::Uuid;

use crate::domain::entities::verification::{
    IssuedVerification, VerificationPurpose, VerificationRecord,
};
use crate::errors::{DomainResult, StoreError, TokenError};
use crate::repositories::SessionStore;
use crate::services::token::{digest_hint, hash_secret, TokenGenerator};

use super::config::VerificationServiceConfig;

/// Verification service for single-use, code-paired tokens.
///
/// A record is consumed only when both the raw token and the code match.
/// A wrong code leaves the record in place until it expires.
pub struct VerificationService<S: SessionStore> {
    /// Store holding verification records
    store: Arc<S>,
    generator: TokenGenerator,
    config: VerificationServiceConfig,
}

impl<S: SessionStore> VerificationService<S> {
    pub fn new(store: Arc<S>, config: VerificationServiceConfig) -> Self {
        Self {
            store,
            generator: TokenGenerator::new(),
            config,
        }
    }

    pub fn with_generator(mut self, generator: TokenGenerator) -> Self {
        self.generator = generator;
        self
    }

    /// Issue a token and code for `user_id`
    ///
    /// # Returns
    ///
    /// The raw token and the code, for delivery to the user. Only the
    /// token's hash is stored.
    pub async fn issue(
        &self,
        user_id: Uuid,
        purpose: VerificationPurpose,
    ) -> DomainResult<IssuedVerification> {
        let raw_token = self.generator.generate(self.config.token_bytes)?;
        let code = self.generator.generate(self.config.code_bytes)?;
        let token_hash = hash_secret(&raw_token);

        let record = VerificationRecord {
            code: code.clone(),
            user_id,
        };
        self.store
            .put(
                &purpose.key(&token_hash),
                record.to_fields(),
                Duration::from_secs(self.config.token_expiry_seconds),
            )
            .await?;

        tracing::info!(
            user_id = %user_id,
            purpose = %purpose,
            token_hint = digest_hint(&token_hash),
            event = "verification_issued",
            "Issued verification token"
        );

        Ok(IssuedVerification { raw_token, code })
    }

    /// Check a token and code without consuming them
    ///
    /// # Errors
    ///
    /// * `VerificationNotFound` - Unknown, expired or already consumed token
    /// * `CodeMismatch` - Token found but the code differs; record kept
    pub async fn verify(
        &self,
        raw_token: &str,
        code: &str,
        purpose: VerificationPurpose,
    ) -> DomainResult<Uuid> {
        let token_hash = hash_secret(raw_token);
        let key = purpose.key(&token_hash);

        let fields = self
            .store
            .get_all(&key)
            .await?
            .ok_or(TokenError::VerificationNotFound)?;
        let record = VerificationRecord::from_fields(&fields)
            .ok_or_else(|| StoreError::Corrupted { key: key.clone() })?;

        if !constant_time_eq(record.code.as_bytes(), code.as_bytes()) {
            tracing::warn!(
                user_id = %record.user_id,
                purpose = %purpose,
                token_hint = digest_hint(&token_hash),
                event = "verification_code_mismatch",
                "Verification code mismatch"
            );
            return Err(TokenError::CodeMismatch.into());
        }

        Ok(record.user_id)
    }

    /// Check a token and code, then delete the record so it cannot be replayed
    ///
    /// Of two concurrent calls with the same token, only the one whose delete
    /// removes the record succeeds.
    pub async fn consume(
        &self,
        raw_token: &str,
        code: &str,
        purpose: VerificationPurpose,
    ) -> DomainResult<Uuid> {
        let user_id = self.verify(raw_token, code, purpose).await?;

        let token_hash = hash_secret(raw_token);
        if !self.store.delete(&purpose.key(&token_hash)).await? {
            return Err(TokenError::VerificationNotFound.into());
        }

        tracing::info!(
            user_id = %user_id,
            purpose = %purpose,
            event = "verification_consumed",
            "Consumed verification token"
        );
        Ok(user_id)
    }

    /// Drop a token without checking its code
    pub async fn discard(&self, raw_token: &str, purpose: VerificationPurpose) -> DomainResult<()> {
        self.store
            .delete(&purpose.key(&hash_secret(raw_token)))
            .await?;
        Ok(())
    }
}
