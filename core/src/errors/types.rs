//! Error types for the token lifecycle and its session store

use thiserror::Error;

/// Why a signed access token was rejected by the codec
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenRejection {
    /// Not a well-formed token, or claims of the wrong shape
    Malformed,
    /// Signature does not match the shared secret
    BadSignature,
    /// Header names an algorithm other than the pinned one
    UnexpectedAlgorithm,
    /// `exp` is in the past
    Expired,
}

impl std::fmt::Display for TokenRejection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TokenRejection::Malformed => write!(f, "malformed"),
            TokenRejection::BadSignature => write!(f, "bad signature"),
            TokenRejection::UnexpectedAlgorithm => write!(f, "unexpected algorithm"),
            TokenRejection::Expired => write!(f, "expired"),
        }
    }
}

/// Token-related errors
#[derive(Error, Debug)]
pub enum TokenError {
    #[error("Secure random source unavailable")]
    EntropyUnavailable,

    /// Refresh token unknown, expired or already rotated. The three cases are
    /// deliberately a single variant.
    #[error("Invalid session")]
    InvalidSession,

    /// Access token is cryptographically valid but its session record is gone
    /// or its version stamp is stale.
    #[error("Session revoked")]
    SessionRevoked,

    #[error("Invalid access token: {0}")]
    InvalidAccessToken(TokenRejection),

    #[error("Token signing failed")]
    SigningFailed,

    /// Verification token unknown, expired or already consumed
    #[error("Verification token not found")]
    VerificationNotFound,

    #[error("Invalid verification code")]
    CodeMismatch,

    /// A new session was only partially written
    #[error("Token issuance failed: {message}")]
    IssuanceFailed { message: String },
}

impl TokenError {
    /// Stable error code for logs and API bodies
    pub fn code(&self) -> &'static str {
        match self {
            TokenError::EntropyUnavailable => "ENTROPY_UNAVAILABLE",
            TokenError::InvalidSession => "INVALID_SESSION",
            TokenError::SessionRevoked => "SESSION_REVOKED",
            TokenError::InvalidAccessToken(_) => "INVALID_ACCESS_TOKEN",
            TokenError::SigningFailed => "SIGNING_FAILED",
            TokenError::VerificationNotFound => "VERIFICATION_NOT_FOUND",
            TokenError::CodeMismatch => "CODE_MISMATCH",
            TokenError::IssuanceFailed { .. } => "ISSUANCE_FAILED",
        }
    }
}

/// Key-value session store errors
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Session store unavailable: {message}")]
    Unavailable { message: String },

    /// A record exists but lacks the fields its key prefix promises
    #[error("Corrupted session record: {key}")]
    Corrupted { key: String },

    /// A write carried no fields; stores cannot keep an empty record
    #[error("Refusing to store empty record: {key}")]
    EmptyRecord { key: String },
}

impl StoreError {
    /// Stable error code for logs and API bodies
    pub fn code(&self) -> &'static str {
        match self {
            StoreError::Unavailable { .. } => "STORE_UNAVAILABLE",
            StoreError::Corrupted { .. } => "STORE_CORRUPTED",
            StoreError::EmptyRecord { .. } => "STORE_EMPTY_RECORD",
        }
    }
}
