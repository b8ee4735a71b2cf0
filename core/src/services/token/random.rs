//! Random token generation from a cryptographically secure source

use std::sync::Arc;

use rand::rngs::OsRng;
use rand::RngCore;

use crate::errors::TokenError;

/// Source of random bytes
pub trait EntropySource: Send + Sync {
    fn fill(&self, dest: &mut [u8]) -> Result<(), rand::Error>;
}

/// Operating system CSPRNG
#[derive(Debug, Clone, Copy, Default)]
pub struct OsEntropy;

impl EntropySource for OsEntropy {
    fn fill(&self, dest: &mut [u8]) -> Result<(), rand::Error> {
        OsRng.try_fill_bytes(dest)
    }
}

/// Produces opaque hex tokens and verification codes
#[derive(Clone)]
pub struct TokenGenerator {
    source: Arc<dyn EntropySource>,
}

impl TokenGenerator {
    pub fn new() -> Self {
        Self::with_source(Arc::new(OsEntropy))
    }

    pub fn with_source(source: Arc<dyn EntropySource>) -> Self {
        Self { source }
    }

    /// Generates `n` random bytes, hex encoded into `2n` characters
    ///
    /// # Errors
    ///
    /// `TokenError::EntropyUnavailable` when the source cannot supply bytes
    pub fn generate(&self, n: usize) -> Result<String, TokenError> {
        let mut bytes = vec![0u8; n];
        self.source.fill(&mut bytes).map_err(|e| {
            tracing::error!(error = %e, event = "entropy_unavailable", "Secure random source failed");
            TokenError::EntropyUnavailable
        })?;
        Ok(hex::encode(bytes))
    }
}

impl Default for TokenGenerator {
    fn default() -> Self {
        Self::new()
    }
}
