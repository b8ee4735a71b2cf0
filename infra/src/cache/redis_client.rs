//! Redis cache client implementation
//!
//! This module provides a Redis client over a multiplexed connection with
//! retry logic at connection time, and the hash-of-fields operations the
//! session store is built on. Individual commands are never retried: a
//! failure is returned to the caller immediately.

use std::collections::HashMap;
use std::time::Duration;

use redis::{aio::MultiplexedConnection, AsyncCommands, Client};
use tokio::time::sleep;
use tracing::{debug, error, info, warn};

use crate::InfrastructureError;
use sk_shared::CacheConfig;

/// Cap on the delay between connection attempts
const MAX_RETRY_DELAY_MS: u64 = 5000;

/// Redis client with connection retry
///
/// Cloning is cheap: clones share the same multiplexed connection.
#[derive(Clone)]
pub struct RedisClient {
    /// Redis multiplexed connection for async operations
    connection: MultiplexedConnection,
}

impl RedisClient {
    /// Create a new Redis client
    ///
    /// Connection attempts follow `config.connect_retries` and back off
    /// exponentially from `config.retry_delay_ms`.
    ///
    /// # Returns
    /// * `Result<Self, InfrastructureError>` - Redis client or error
    pub async fn new(config: &CacheConfig) -> Result<Self, InfrastructureError> {
        info!(url = %mask_url(&config.url), "Creating Redis client");

        let client = Client::open(config.url.as_str()).map_err(|e| {
            error!(error = %e, "Failed to parse Redis URL");
            InfrastructureError::Config(format!("Invalid Redis URL: {}", e))
        })?;

        let connection = Self::create_connection_with_retry(
            client,
            config.connect_retries.max(1),
            config.retry_delay_ms,
        )
        .await?;

        info!("Redis client created successfully");
        Ok(Self { connection })
    }

    /// Create multiplexed connection with retry logic
    async fn create_connection_with_retry(
        client: Client,
        max_retries: u32,
        retry_delay_ms: u64,
    ) -> Result<MultiplexedConnection, InfrastructureError> {
        let mut attempts = 0;
        let mut delay = retry_delay_ms;

        loop {
            attempts += 1;
            debug!(attempt = attempts, "Attempting to connect to Redis");

            match client.get_multiplexed_async_connection().await {
                Ok(connection) => {
                    info!("Successfully connected to Redis");
                    return Ok(connection);
                }
                Err(e) if attempts < max_retries => {
                    warn!(
                        attempt = attempts,
                        max_retries,
                        error = %e,
                        "Failed to connect to Redis. Retrying in {}ms...",
                        delay
                    );
                    sleep(Duration::from_millis(delay)).await;
                    delay = next_delay(delay);
                }
                Err(e) => {
                    error!(
                        attempts,
                        error = %e,
                        "Failed to connect to Redis"
                    );
                    return Err(InfrastructureError::Cache(e));
                }
            }
        }
    }

    /// Replace the hash stored at `key` and set its expiry
    ///
    /// `DEL`, `HSET` and `EXPIRE` run as one `MULTI`/`EXEC` transaction so
    /// readers never observe fields from a previous write or a hash without
    /// a TTL. `fields` must not be empty: Redis has no empty hash, so the
    /// write would leave the key deleted.
    pub async fn hset_with_expiry(
        &self,
        key: &str,
        fields: &HashMap<String, String>,
        expiry_seconds: u64,
    ) -> Result<(), InfrastructureError> {
        debug!(key = %mask_key(key), expiry_seconds, "Writing hash");

        let items: Vec<(&str, &str)> = fields
            .iter()
            .map(|(k, v)| (k.as_str(), v.as_str()))
            .collect();

        let mut pipe = redis::pipe();
        pipe.atomic().del(key).ignore();
        pipe.hset_multiple(key, &items).ignore();
        pipe.cmd("EXPIRE").arg(key).arg(expiry_seconds).ignore();

        let mut conn = self.connection.clone();
        pipe.query_async::<_, ()>(&mut conn).await.map_err(|e| {
            error!(key = %mask_key(key), error = %e, "Failed to write hash");
            InfrastructureError::Cache(e)
        })
    }

    /// Read every field of the hash at `key`
    ///
    /// Redis answers `HGETALL` on a missing key with an empty hash, which is
    /// reported here as `None`.
    pub async fn hgetall(
        &self,
        key: &str,
    ) -> Result<Option<HashMap<String, String>>, InfrastructureError> {
        let mut conn = self.connection.clone();
        let fields: HashMap<String, String> = conn.hgetall(key).await.map_err(|e| {
            error!(key = %mask_key(key), error = %e, "Failed to read hash");
            InfrastructureError::Cache(e)
        })?;

        if fields.is_empty() {
            debug!(key = %mask_key(key), "Key not found");
            Ok(None)
        } else {
            Ok(Some(fields))
        }
    }

    /// Delete a key
    ///
    /// # Returns
    /// * `Ok(true)` - Key was deleted
    /// * `Ok(false)` - Key did not exist
    pub async fn delete(&self, key: &str) -> Result<bool, InfrastructureError> {
        let mut conn = self.connection.clone();
        let deleted: u32 = conn.del(key).await.map_err(|e| {
            error!(key = %mask_key(key), error = %e, "Failed to delete key");
            InfrastructureError::Cache(e)
        })?;

        debug!(key = %mask_key(key), deleted = deleted > 0, "Deleted key");
        Ok(deleted > 0)
    }

    /// Get time-to-live for a key
    ///
    /// # Returns
    /// * `Result<Option<i64>, InfrastructureError>` - TTL in seconds, None if
    ///   the key doesn't exist or has no expiry
    pub async fn ttl(&self, key: &str) -> Result<Option<i64>, InfrastructureError> {
        let mut conn = self.connection.clone();
        let ttl: i64 = conn.ttl(key).await.map_err(InfrastructureError::Cache)?;

        Ok((ttl >= 0).then_some(ttl))
    }
}

/// Exponential backoff step, capped
pub(crate) fn next_delay(delay: u64) -> u64 {
    delay.saturating_mul(2).min(MAX_RETRY_DELAY_MS)
}

/// Mask credentials in a Redis URL for logging
pub(crate) fn mask_url(url: &str) -> String {
    if let Some(at_pos) = url.rfind('@') {
        if let Some(proto_end) = url.find("://") {
            let proto = &url[..proto_end + 3];
            let host_part = &url[at_pos..];
            return format!("{}****{}", proto, host_part);
        }
    }
    url.to_string()
}

/// Shorten the hashed part of a session key for logging
pub(crate) fn mask_key(key: &str) -> String {
    match key.split_once(':') {
        Some((prefix, id)) if id.len() > 8 => {
            format!("{}:{}...", prefix, id.get(..8).unwrap_or(id))
        }
        _ => key.to_string(),
    }
}
