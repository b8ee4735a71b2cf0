//! Session store trait defining the interface for TTL-bearing session records.

use std::time::Duration;

use async_trait::async_trait;

use crate::domain::entities::session::Fields;
use crate::errors::StoreError;

/// Key-value store holding session metadata.
///
/// A key maps to a small field set with an attached TTL. Entries expire on
/// their own once the TTL elapses; an expired entry must never be returned.
///
/// Implementations are expected to be atomic per key: of two concurrent
/// `delete` calls on the same live key, exactly one reports `true`.
///
/// Records always carry at least one field. A missing record and an empty
/// one would look the same on some backends, so `put` rejects empty field
/// sets with `StoreError::EmptyRecord` (see [`check_fields`]).
#[async_trait]
pub trait SessionStore: Send + Sync {
    /// Replace the field set stored under `key` and reset its TTL
    ///
    /// # Returns
    /// * `Ok(())` - Record written
    /// * `Err(StoreError::EmptyRecord)` - `fields` is empty; nothing was changed
    /// * `Err(StoreError::Unavailable)` - Store could not be reached
    async fn put(&self, key: &str, fields: Fields, ttl: Duration) -> Result<(), StoreError>;

    /// Read every field stored under `key`
    ///
    /// # Returns
    /// * `Ok(Some(fields))` - Live record found
    /// * `Ok(None)` - No record, or the record has expired
    /// * `Err(StoreError::Unavailable)` - Store could not be reached
    async fn get_all(&self, key: &str) -> Result<Option<Fields>, StoreError>;

    /// Remove the record stored under `key`
    ///
    /// # Returns
    /// * `Ok(true)` - A live record was removed
    /// * `Ok(false)` - Nothing to remove (not an error)
    /// * `Err(StoreError::Unavailable)` - Store could not be reached
    async fn delete(&self, key: &str) -> Result<bool, StoreError>;
}

/// Validates a field set before it is written
pub fn check_fields(key: &str, fields: &Fields) -> Result<(), StoreError> {
    if fields.is_empty() {
        return Err(StoreError::EmptyRecord {
            key: key.to_string(),
        });
    }
    Ok(())
}
