//! Configuration for the verification service

use sk_shared::VerificationConfig;

/// Default verification record lifetime (30 minutes)
pub const DEFAULT_TOKEN_EXPIRY_SECONDS: u64 = 30 * 60;

/// Configuration for the verification service
#[derive(Debug, Clone)]
pub struct VerificationServiceConfig {
    /// Seconds before an issued token and code expire
    pub token_expiry_seconds: u64,
    /// Random bytes in the raw token
    pub token_bytes: usize,
    /// Random bytes in the code
    pub code_bytes: usize,
}

impl Default for VerificationServiceConfig {
    fn default() -> Self {
        Self {
            token_expiry_seconds: DEFAULT_TOKEN_EXPIRY_SECONDS,
            token_bytes: 32,
            code_bytes: 4,
        }
    }
}

impl From<&VerificationConfig> for VerificationServiceConfig {
    fn from(config: &VerificationConfig) -> Self {
        Self {
            token_expiry_seconds: config.token_expiry,
            token_bytes: config.token_bytes,
            code_bytes: config.code_bytes,
        }
    }
}
