use async_trait::async_trait;

use super::{CacheEntry, CacheKey};
use crate::errors::StoreError;

/// Storage backing the response cache.
#[async_trait]
pub trait CacheStore: Send + Sync {
    /// Most recent row for `key` still flagged valid, expired or not.
    async fn find_valid(&self, key: &CacheKey) -> Result<Option<CacheEntry>, StoreError>;

    /// Flags every valid row for the entry's key as invalid and inserts the
    /// entry, atomically. Returns how many rows were flipped.
    async fn replace(&self, entry: CacheEntry) -> Result<usize, StoreError>;

    async fn insert(&self, entry: CacheEntry) -> Result<(), StoreError>;
}
