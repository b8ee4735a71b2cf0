//! Session records persisted in the key-value store.
//!
//! Key layout (inspected directly when debugging the store):
//! - `refreshToken:<sha256(raw refresh token)>` -> `{userId, jti}`
//! - `accessToken:<jti>` -> `{userId}`

use std::collections::HashMap;

use uuid::Uuid;

use super::token::SessionId;

/// Field set stored under a single key
pub type Fields = HashMap<String, String>;

pub const REFRESH_TOKEN_PREFIX: &str = "refreshToken";
pub const ACCESS_TOKEN_PREFIX: &str = "accessToken";

pub(crate) const FIELD_USER_ID: &str = "userId";
pub(crate) const FIELD_JTI: &str = "jti";

/// Store key for a refresh record
pub fn refresh_token_key(token_hash: &str) -> String {
    format!("{}:{}", REFRESH_TOKEN_PREFIX, token_hash)
}

/// Store key for an access record
pub fn access_token_key(session_id: SessionId) -> String {
    format!("{}:{}", ACCESS_TOKEN_PREFIX, session_id)
}

/// Refresh token record, keyed by the hash of the raw token
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RefreshRecord {
    pub user_id: Uuid,
    pub session_id: SessionId,
}

impl RefreshRecord {
    pub fn to_fields(&self) -> Fields {
        Fields::from([
            (FIELD_USER_ID.to_string(), self.user_id.to_string()),
            (FIELD_JTI.to_string(), self.session_id.to_string()),
        ])
    }

    /// Parses a stored field set; `None` when a field is missing or invalid
    pub fn from_fields(fields: &Fields) -> Option<Self> {
        Some(Self {
            user_id: fields.get(FIELD_USER_ID)?.parse().ok()?,
            session_id: fields.get(FIELD_JTI)?.parse().ok()?,
        })
    }
}

/// Access token record, keyed by session id
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccessRecord {
    pub user_id: Uuid,
}

impl AccessRecord {
    pub fn to_fields(&self) -> Fields {
        Fields::from([(FIELD_USER_ID.to_string(), self.user_id.to_string())])
    }

    pub fn from_fields(fields: &Fields) -> Option<Self> {
        Some(Self {
            user_id: fields.get(FIELD_USER_ID)?.parse().ok()?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_layout() {
        let session_id: SessionId = "6f1f7c39-2bd5-4f5e-9a53-2d0c0b9b8c11".parse().unwrap();

        assert_eq!(refresh_token_key("abc123"), "refreshToken:abc123");
        assert_eq!(
            access_token_key(session_id),
            "accessToken:6f1f7c39-2bd5-4f5e-9a53-2d0c0b9b8c11"
        );
    }

    #[test]
    fn test_refresh_record_fields() {
        let record = RefreshRecord {
            user_id: Uuid::new_v4(),
            session_id: SessionId::new(),
        };
        let fields = record.to_fields();

        assert_eq!(fields.get("userId"), Some(&record.user_id.to_string()));
        assert_eq!(fields.get("jti"), Some(&record.session_id.to_string()));
        assert_eq!(RefreshRecord::from_fields(&fields), Some(record));
    }

    #[test]
    fn test_refresh_record_missing_jti() {
        let fields = Fields::from([("userId".to_string(), Uuid::new_v4().to_string())]);
        assert_eq!(RefreshRecord::from_fields(&fields), None);
    }

    #[test]
    fn test_access_record_invalid_user_id() {
        let fields = Fields::from([("userId".to_string(), "garbage".to_string())]);
        assert_eq!(AccessRecord::from_fields(&fields), None);
    }
}
