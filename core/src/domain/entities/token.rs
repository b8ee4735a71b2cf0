//! Token entities for the access/refresh credential pair.

use chrono::{Duration, Utc};
use serde::{Deserialize, Serialize};
use sk_shared::config::MAX_EXPIRY_SECONDS;
use uuid::Uuid;

/// Access token expiration time (1 hour)
pub const ACCESS_TOKEN_EXPIRY_SECONDS: u64 = 60 * 60;

/// Refresh token expiration time (7 days)
pub const REFRESH_TOKEN_EXPIRY_SECONDS: u64 = 7 * 24 * 60 * 60;

/// Random bytes behind every raw refresh token (256 bits)
pub const REFRESH_TOKEN_BYTES: usize = 32;

/// Session identifier (`jti`), minted fresh on every issuance
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SessionId(Uuid);

impl SessionId {
    /// Mints a new, never reused session id
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn as_uuid(&self) -> Uuid {
        self.0
    }
}

impl Default for SessionId {
    fn default() -> Self {
        Self::new()
    }
}

impl From<Uuid> for SessionId {
    fn from(id: Uuid) -> Self {
        Self(id)
    }
}

impl std::fmt::Display for SessionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

impl std::str::FromStr for SessionId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(s).map(Self)
    }
}

/// Claims structure for the access token payload
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    /// Owning user id
    #[serde(rename = "userId")]
    pub user_id: String,

    /// Session id linking the token to its access record
    pub jti: String,

    /// Account-wide revocation stamp at signing time
    #[serde(rename = "jwtVersion")]
    pub jwt_version: String,

    /// Issued at timestamp
    pub iat: i64,

    /// Expiration timestamp
    pub exp: i64,
}

impl Claims {
    /// Creates new claims for an access token
    ///
    /// # Arguments
    ///
    /// * `user_id` - The user's UUID
    /// * `session_id` - The session the token belongs to
    /// * `jwt_version` - The account's current version stamp
    /// * `ttl_seconds` - Lifetime of the token, capped at `MAX_EXPIRY_SECONDS`
    pub fn new_access_token(
        user_id: Uuid,
        session_id: SessionId,
        jwt_version: &str,
        ttl_seconds: u64,
    ) -> Self {
        let now = Utc::now();
        let ttl = i64::try_from(ttl_seconds.min(MAX_EXPIRY_SECONDS)).unwrap_or(i64::MAX);
        let expiry = now + Duration::seconds(ttl);

        Self {
            user_id: user_id.to_string(),
            jti: session_id.to_string(),
            jwt_version: jwt_version.to_string(),
            iat: now.timestamp(),
            exp: expiry.timestamp(),
        }
    }

    /// Checks if the claims have expired
    pub fn is_expired(&self) -> bool {
        Utc::now().timestamp() >= self.exp
    }
}

/// Identity carried by a verified access token
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccessPrincipal {
    pub user_id: Uuid,
    pub session_id: SessionId,
    pub jwt_version: String,
}

impl TryFrom<Claims> for AccessPrincipal {
    type Error = uuid::Error;

    fn try_from(claims: Claims) -> Result<Self, Self::Error> {
        Ok(Self {
            user_id: Uuid::parse_str(&claims.user_id)?,
            session_id: claims.jti.parse()?,
            jwt_version: claims.jwt_version,
        })
    }
}

/// The session being replaced during refresh rotation
#[derive(Debug, Clone)]
pub struct PriorSession {
    /// Raw refresh token presented by the client
    pub raw_refresh_token: String,
    /// Session id recorded alongside that refresh token
    pub session_id: SessionId,
}

/// Token pair returned to the client
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenPair {
    /// Signed access token
    pub access_token: String,

    /// Raw (unhashed) refresh token
    pub refresh_token: String,

    /// Session both tokens belong to
    pub session_id: SessionId,

    /// Access token expiry time in seconds
    pub access_expires_in: u64,

    /// Refresh token expiry time in seconds
    pub refresh_expires_in: u64,
}
