//! # Infrastructure Layer
//!
//! Concrete implementations of the collaborator traits declared in
//! `sk_core`. Currently this is the Redis-backed [`SessionStore`]
//! (`cache::RedisSessionStore`), used in production in place of the
//! in-memory store.
//!
//! [`SessionStore`]: sk_core::repositories::SessionStore

/// Cache module - Redis client and session store
pub mod cache;

use sk_core::errors::StoreError;

/// Infrastructure-specific error types
#[derive(Debug, thiserror::Error)]
pub enum InfrastructureError {
    /// Redis cache error
    #[error("Cache error: {0}")]
    Cache(#[from] redis::RedisError),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}

impl From<InfrastructureError> for StoreError {
    fn from(error: InfrastructureError) -> Self {
        StoreError::Unavailable {
            message: error.to_string(),
        }
    }
}
