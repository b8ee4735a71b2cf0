//! Redis implementation of the session store
//!
//! Records are Redis hashes under the keys built by `sk_core`
//! (`refreshToken:<hash>`, `accessToken:<jti>`, `verification:<hash>`,
//! `passwordReset:<hash>`), expiring through native key TTLs.

use std::time::Duration;

use async_trait::async_trait;
use sk_core::domain::Fields;
use sk_core::errors::StoreError;
use sk_core::repositories::session::check_fields;
use sk_core::repositories::SessionStore;

use super::redis_client::RedisClient;
use crate::InfrastructureError;
use sk_shared::CacheConfig;

/// Session store backed by Redis hashes
#[derive(Clone)]
pub struct RedisSessionStore {
    /// Redis client for cache operations
    redis_client: RedisClient,
}

impl RedisSessionStore {
    pub fn new(redis_client: RedisClient) -> Self {
        Self { redis_client }
    }

    /// Connect using the given configuration
    pub async fn connect(config: &CacheConfig) -> Result<Self, InfrastructureError> {
        Ok(Self::new(RedisClient::new(config).await?))
    }

    pub fn client(&self) -> &RedisClient {
        &self.redis_client
    }
}

/// `EXPIRE 0` deletes the key at once, so sub-second TTLs round up
fn ttl_seconds(ttl: Duration) -> u64 {
    let secs = ttl.as_secs();
    if ttl.subsec_nanos() > 0 {
        secs + 1
    } else {
        secs.max(1)
    }
}

#[async_trait]
impl SessionStore for RedisSessionStore {
    async fn put(&self, key: &str, fields: Fields, ttl: Duration) -> Result<(), StoreError> {
        check_fields(key, &fields)?;

        self.redis_client
            .hset_with_expiry(key, &fields, ttl_seconds(ttl))
            .await
            .map_err(StoreError::from)
    }

    async fn get_all(&self, key: &str) -> Result<Option<Fields>, StoreError> {
        self.redis_client
            .hgetall(key)
            .await
            .map_err(StoreError::from)
    }

    async fn delete(&self, key: &str) -> Result<bool, StoreError> {
        self.redis_client
            .delete(key)
            .await
            .map_err(StoreError::from)
    }
}
