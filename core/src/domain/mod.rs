//! Domain layer containing business entities.

pub mod entities;

// Re-export commonly used domain types
pub use entities::{
    access_token_key, refresh_token_key, AccessPrincipal, AccessRecord, Account, Claims, Fields,
    IssuedVerification, PriorSession, RefreshRecord, SessionId, TokenPair, VerificationPurpose,
    VerificationRecord, ACCESS_TOKEN_EXPIRY_SECONDS, REFRESH_TOKEN_BYTES,
    REFRESH_TOKEN_EXPIRY_SECONDS,
};
