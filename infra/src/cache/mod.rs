//! Cache module for Redis-backed session storage
//!
//! This module provides the Redis client (connection setup with retry,
//! hash-of-fields operations with TTL) and the `SessionStore`
//! implementation built on it.

pub mod redis_client;
pub mod session_store;

#[cfg(test)]
mod tests;

pub use redis_client::RedisClient;
pub use session_store::RedisSessionStore;

// Re-export commonly used types
pub use sk_shared::CacheConfig;
