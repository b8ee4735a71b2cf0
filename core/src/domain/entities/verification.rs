//! One-time verification tokens (account confirmation, password reset).

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::session::{Fields, FIELD_USER_ID};

const FIELD_CODE: &str = "code";

/// What a verification token is allowed to confirm.
///
/// Each purpose has its own key prefix, so a password-reset token can never
/// be consumed as an account-verification token or vice versa.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VerificationPurpose {
    AccountVerification,
    PasswordReset,
}

impl VerificationPurpose {
    pub fn key_prefix(&self) -> &'static str {
        match self {
            VerificationPurpose::AccountVerification => "verification",
            VerificationPurpose::PasswordReset => "passwordReset",
        }
    }

    /// Store key for a verification record
    pub fn key(&self, token_hash: &str) -> String {
        format!("{}:{}", self.key_prefix(), token_hash)
    }
}

impl std::fmt::Display for VerificationPurpose {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            VerificationPurpose::AccountVerification => write!(f, "account_verification"),
            VerificationPurpose::PasswordReset => write!(f, "password_reset"),
        }
    }
}

/// Raw token and code handed to the caller for out-of-band delivery
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IssuedVerification {
    /// Raw token, typically embedded in a link
    pub raw_token: String,
    /// Short code, typically typed in by the user
    pub code: String,
}

/// Stored verification record, keyed by the hash of the raw token
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerificationRecord {
    pub code: String,
    pub user_id: Uuid,
}

impl VerificationRecord {
    pub fn to_fields(&self) -> Fields {
        Fields::from([
            (FIELD_CODE.to_string(), self.code.clone()),
            (FIELD_USER_ID.to_string(), self.user_id.to_string()),
        ])
    }

    pub fn from_fields(fields: &Fields) -> Option<Self> {
        Some(Self {
            code: fields.get(FIELD_CODE)?.clone(),
            user_id: fields.get(FIELD_USER_ID)?.parse().ok()?,
        })
    }
}
