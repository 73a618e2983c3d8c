use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;
use log::warn;

use super::{CacheEntry, CacheKey, CacheStore};
use crate::errors::StoreError;

/// Cache store that keeps every row in memory, invalidated ones included.
#[derive(Default)]
pub struct InMemoryCacheStore {
    rows: Mutex<Vec<CacheEntry>>,
}

impl InMemoryCacheStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock_rows(&self) -> MutexGuard<'_, Vec<CacheEntry>> {
        self.rows.lock().unwrap_or_else(|poisoned| {
            warn!("Cache store mutex was poisoned, recovering");
            poisoned.into_inner()
        })
    }

    /// Every row ever written for `key`, oldest first.
    pub fn rows_for(&self, key: &CacheKey) -> Vec<CacheEntry> {
        self.lock_rows()
            .iter()
            .filter(|row| &row.key == key)
            .cloned()
            .collect()
    }

    pub fn len(&self) -> usize {
        self.lock_rows().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock_rows().is_empty()
    }
}

#[async_trait]
impl CacheStore for InMemoryCacheStore {
    async fn find_valid(&self, key: &CacheKey) -> Result<Option<CacheEntry>, StoreError> {
        Ok(self
            .lock_rows()
            .iter()
            .rev()
            .find(|row| row.is_valid && &row.key == key)
            .cloned())
    }

    async fn replace(&self, entry: CacheEntry) -> Result<usize, StoreError> {
        let mut rows = self.lock_rows();
        let mut flipped = 0;
        for row in rows
            .iter_mut()
            .filter(|row| row.is_valid && row.key == entry.key)
        {
            row.is_valid = false;
            flipped += 1;
        }
        rows.push(entry);
        Ok(flipped)
    }

    async fn insert(&self, entry: CacheEntry) -> Result<(), StoreError> {
        self.lock_rows().push(entry);
        Ok(())
    }
}
