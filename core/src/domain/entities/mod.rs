//! Domain entities representing core business objects.

pub mod account;
pub mod session;
pub mod token;
pub mod verification;

// Re-export commonly used types
pub use account::Account;
pub use session::{access_token_key, refresh_token_key, AccessRecord, Fields, RefreshRecord};
pub use token::{
    AccessPrincipal, Claims, PriorSession, SessionId, TokenPair, ACCESS_TOKEN_EXPIRY_SECONDS,
    REFRESH_TOKEN_BYTES, REFRESH_TOKEN_EXPIRY_SECONDS,
};
pub use verification::{IssuedVerification, VerificationPurpose, VerificationRecord};
