//! Account entity as seen by the token lifecycle.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Account profile owned by the account store
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Account {
    /// Unique identifier for the account
    pub id: Uuid,

    /// Login email
    pub email: String,

    /// Slow hash of the password, never the password itself
    #[serde(skip_serializing)]
    pub password_hash: String,

    /// Revocation stamp embedded in every access token for this account.
    /// Replacing it invalidates all outstanding access tokens at once.
    #[serde(skip_serializing)]
    pub jwt_version: String,

    /// Whether the email address has been confirmed
    pub is_verified: bool,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Account {
    /// Creates a new, unverified account
    pub fn new(email: String, password_hash: String, jwt_version: String) -> Self {
        let now = Utc::now();

        Self {
            id: Uuid::new_v4(),
            email,
            password_hash,
            jwt_version,
            is_verified: false,
            created_at: now,
            updated_at: now,
        }
    }

    /// Marks the account's email as confirmed
    pub fn verify(&mut self) {
        self.is_verified = true;
        self.updated_at = Utc::now();
    }

    /// Replaces the revocation stamp
    pub fn set_jwt_version(&mut self, jwt_version: String) {
        self.jwt_version = jwt_version;
        self.updated_at = Utc::now();
    }

    /// Stores a new password hash
    pub fn set_password_hash(&mut self, password_hash: String) {
        self.password_hash = password_hash;
        self.updated_at = Utc::now();
    }
}
