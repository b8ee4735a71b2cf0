//! Business services containing domain logic and use cases.

pub mod auth;
pub mod token;
pub mod verification;

// Re-export commonly used types
pub use auth::{AccountSession, AuthService};
pub use token::{
    hash_secret, AccessTokenCodec, AccessVerifier, EntropySource, OsEntropy, TokenGenerator,
    TokenService, TokenServiceConfig,
};
pub use verification::{VerificationService, VerificationServiceConfig};
