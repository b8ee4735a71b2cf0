//! Signing and verification of stateless access tokens

use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use uuid::Uuid;

use crate::domain::entities::token::{AccessPrincipal, Claims, SessionId};
use crate::errors::{TokenError, TokenRejection};

/// The only algorithm accepted on verification
const ALGORITHM: Algorithm = Algorithm::HS256;

/// HS256 access token codec.
///
/// Pure: never consults the session store. Whether the session behind a
/// valid token still exists is checked by the token service.
#[derive(Clone)]
pub struct AccessTokenCodec {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
    ttl_seconds: u64,
}

impl AccessTokenCodec {
    pub fn new(secret: &str, ttl_seconds: u64) -> Self {
        let mut validation = Validation::new(ALGORITHM);
        validation.leeway = 0;
        validation.set_required_spec_claims(&["exp", "iat", "jti"]);

        Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            validation,
            ttl_seconds,
        }
    }

    pub fn ttl_seconds(&self) -> u64 {
        self.ttl_seconds
    }

    /// Signs a token for `user_id` bound to `session_id`, expiring `ttl_seconds` from now
    pub fn sign(
        &self,
        user_id: Uuid,
        session_id: SessionId,
        jwt_version: &str,
    ) -> Result<String, TokenError> {
        let claims = Claims::new_access_token(user_id, session_id, jwt_version, self.ttl_seconds);
        self.encode(&claims)
    }

    pub(crate) fn encode(&self, claims: &Claims) -> Result<String, TokenError> {
        encode(&Header::new(ALGORITHM), claims, &self.encoding_key).map_err(|e| {
            tracing::error!(error = %e, event = "token_signing_failed", "Failed to sign access token");
            TokenError::SigningFailed
        })
    }

    /// Verifies signature, algorithm and expiry, returning the embedded identity
    pub fn verify(&self, token: &str) -> Result<AccessPrincipal, TokenError> {
        let data = decode::<Claims>(token, &self.decoding_key, &self.validation)
            .map_err(|e| TokenError::InvalidAccessToken(rejection_for(e.kind())))?;

        AccessPrincipal::try_from(data.claims)
            .map_err(|_| TokenError::InvalidAccessToken(TokenRejection::Malformed))
    }
}

fn rejection_for(kind: &ErrorKind) -> TokenRejection {
    match kind {
        ErrorKind::ExpiredSignature => TokenRejection::Expired,
        ErrorKind::InvalidSignature => TokenRejection::BadSignature,
        ErrorKind::InvalidAlgorithm | ErrorKind::InvalidAlgorithmName => {
            TokenRejection::UnexpectedAlgorithm
        }
        _ => TokenRejection::Malformed,
    }
}
