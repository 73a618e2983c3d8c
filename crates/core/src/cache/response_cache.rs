//! Response cache over a [`CacheStore`].
//!
//! The TTL is read from the `cache_ttl_hours` tunable on every write so an
//! admin change applies without a restart.

use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use log::{debug, warn};
use serde::de::DeserializeOwned;
use serde::Serialize;

use super::{CacheEntry, CacheKey, CacheStore};
use crate::config::ConfigSnapshot;
use crate::constants::{DEFAULT_CACHE_TTL_HOURS, TUNABLE_CACHE_TTL_HOURS};
use crate::errors::StoreError;

/// Source of the current time.
pub type Clock = Arc<dyn Fn() -> DateTime<Utc> + Send + Sync>;

pub struct ResponseCache {
    store: Arc<dyn CacheStore>,
    config: Arc<dyn ConfigSnapshot>,
    clock: Clock,
}

impl ResponseCache {
    pub fn new(store: Arc<dyn CacheStore>, config: Arc<dyn ConfigSnapshot>) -> Self {
        Self {
            store,
            config,
            clock: Arc::new(Utc::now),
        }
    }

    pub fn with_clock(mut self, clock: Clock) -> Self {
        self.clock = clock;
        self
    }

    /// Current TTL. Non-numeric or non-positive tunables fall back to the default.
    pub fn ttl(&self) -> Duration {
        let hours = self
            .config
            .tunable(TUNABLE_CACHE_TTL_HOURS)
            .and_then(|raw| raw.trim().parse::<i64>().ok())
            .filter(|hours| *hours > 0)
            .unwrap_or(DEFAULT_CACHE_TTL_HOURS);
        Duration::hours(hours)
    }

    /// The live entry for `key`, if any. Store errors count as a miss.
    pub async fn get_entry(&self, key: &CacheKey) -> Option<CacheEntry> {
        let entry = match self.store.find_valid(key).await {
            Ok(entry) => entry?,
            Err(e) => {
                warn!("Cache read failed for {:?}: {}", key, e);
                return None;
            }
        };

        if entry.is_live((self.clock)()) {
            Some(entry)
        } else {
            debug!("Cache entry for {:?} expired at {}", key, entry.expires_at);
            None
        }
    }

    /// The cached value for `key`, if live and well formed.
    pub async fn get<T: DeserializeOwned>(&self, key: &CacheKey) -> Option<T> {
        let entry = self.get_entry(key).await?;
        match serde_json::from_str(&entry.payload) {
            Ok(value) => Some(value),
            Err(e) => {
                warn!("Ignoring malformed cache payload for {:?}: {}", key, e);
                None
            }
        }
    }

    /// Stores `value` as the only valid entry for `key`.
    pub async fn set<T: Serialize + ?Sized>(&self, key: &CacheKey, value: &T) -> Result<(), StoreError> {
        let payload = serde_json::to_string(value)?;
        let now = (self.clock)();
        let entry = CacheEntry::new(key.clone(), payload, now, now + self.ttl());

        let replaced = self.store.replace(entry).await?;
        if replaced > 0 {
            debug!("Replaced {} cache entries for {:?}", replaced, key);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    use crate::cache::InMemoryCacheStore;
    use crate::config::InMemoryConfig;
    use autofill_vehicle_data::{Capability, EmissionsReport, VehicleIdentifier};

    struct Fixture {
        cache: ResponseCache,
        store: Arc<InMemoryCacheStore>,
        config: Arc<InMemoryConfig>,
        now: Arc<Mutex<DateTime<Utc>>>,
    }

    fn fixture() -> Fixture {
        let store = Arc::new(InMemoryCacheStore::new());
        let config = Arc::new(InMemoryConfig::new());
        let now = Arc::new(Mutex::new(Utc::now()));
        let clock_now = now.clone();
        let cache = ResponseCache::new(store.clone(), config.clone())
            .with_clock(Arc::new(move || *clock_now.lock().unwrap()));
        Fixture {
            cache,
            store,
            config,
            now,
        }
    }

    fn key() -> CacheKey {
        CacheKey::new(&VehicleIdentifier::plate("AB-123-CD"), Capability::Emissions)
    }

    fn report(co2: u32) -> EmissionsReport {
        EmissionsReport {
            energy_class: Some("C".to_string()),
            co2_grams_per_km: Some(co2),
            fuel_consumption_mixed: None,
            euro_standard: Some(6),
        }
    }

    #[tokio::test]
    async fn test_set_then_get_until_expiry() {
        let f = fixture();
        f.cache.set(&key(), &report(118)).await.unwrap();

        let cached: Option<EmissionsReport> = f.cache.get(&key()).await;
        assert_eq!(cached, Some(report(118)));

        *f.now.lock().unwrap() += Duration::hours(49);
        let cached: Option<EmissionsReport> = f.cache.get(&key()).await;
        assert_eq!(cached, None);

        // the row is still there
        let rows = f.store.rows_for(&key());
        assert_eq!(rows.len(), 1);
        assert!(rows[0].is_valid);
    }

    #[tokio::test]
    async fn test_second_set_leaves_one_valid_row() {
        let f = fixture();
        f.cache.set(&key(), &report(118)).await.unwrap();
        f.cache.set(&key(), &report(120)).await.unwrap();

        let rows = f.store.rows_for(&key());
        assert_eq!(rows.len(), 2);
        assert_eq!(rows.iter().filter(|r| r.is_valid).count(), 1);

        let cached: Option<EmissionsReport> = f.cache.get(&key()).await;
        assert_eq!(cached.and_then(|r| r.co2_grams_per_km), Some(120));
    }

    /// Suspends before every store call so concurrent writers interleave.
    struct YieldingStore {
        inner: InMemoryCacheStore,
    }

    #[async_trait::async_trait]
    impl CacheStore for YieldingStore {
        async fn find_valid(&self, key: &CacheKey) -> Result<Option<CacheEntry>, StoreError> {
            tokio::task::yield_now().await;
            self.inner.find_valid(key).await
        }

        async fn replace(&self, entry: CacheEntry) -> Result<usize, StoreError> {
            tokio::task::yield_now().await;
            self.inner.replace(entry).await
        }

        async fn insert(&self, entry: CacheEntry) -> Result<(), StoreError> {
            tokio::task::yield_now().await;
            self.inner.insert(entry).await
        }
    }

    #[tokio::test]
    async fn test_concurrent_sets_leave_one_valid_row() {
        let store = Arc::new(YieldingStore {
            inner: InMemoryCacheStore::new(),
        });
        let cache = ResponseCache::new(store.clone(), Arc::new(InMemoryConfig::new()));

        let (k1, k2, k3) = (key(), key(), key());
        let (r1, r2, r3) = (report(118), report(120), report(122));
        let (first, second, third) = tokio::join!(
            cache.set(&k1, &r1),
            cache.set(&k2, &r2),
            cache.set(&k3, &r3),
        );
        first.unwrap();
        second.unwrap();
        third.unwrap();

        let rows = store.inner.rows_for(&key());
        assert_eq!(rows.len(), 3);
        assert_eq!(rows.iter().filter(|r| r.is_valid).count(), 1);
        assert!(cache.get_entry(&key()).await.is_some());
    }

    #[tokio::test]
    async fn test_keys_are_isolated_by_capability_and_type() {
        let f = fixture();
        f.cache.set(&key(), &report(118)).await.unwrap();

        let other_capability =
            CacheKey::new(&VehicleIdentifier::plate("AB-123-CD"), Capability::Recalls);
        let other_type = CacheKey::new(&VehicleIdentifier::vin("AB-123-CD"), Capability::Emissions);

        assert!(f.cache.get_entry(&other_capability).await.is_none());
        assert!(f.cache.get_entry(&other_type).await.is_none());
    }

    #[tokio::test]
    async fn test_malformed_payload_is_a_miss() {
        let f = fixture();
        let now = *f.now.lock().unwrap();
        f.store
            .insert(CacheEntry::new(
                key(),
                "{\"co2GramsPerKm\": \"lots\"".to_string(),
                now,
                now + Duration::hours(1),
            ))
            .await
            .unwrap();

        assert!(f.cache.get_entry(&key()).await.is_some());
        let cached: Option<EmissionsReport> = f.cache.get(&key()).await;
        assert_eq!(cached, None);
    }

    #[test]
    fn test_ttl_tunable_and_fallback() {
        let f = fixture();
        assert_eq!(f.cache.ttl(), Duration::hours(48));

        f.config.set_tunable(TUNABLE_CACHE_TTL_HOURS, "12");
        assert_eq!(f.cache.ttl(), Duration::hours(12));

        for invalid in ["0", "-3", "two days", ""] {
            f.config.set_tunable(TUNABLE_CACHE_TTL_HOURS, invalid);
            assert_eq!(f.cache.ttl(), Duration::hours(48), "tunable {:?}", invalid);
        }
    }

    #[tokio::test]
    async fn test_ttl_is_read_on_each_write() {
        let f = fixture();
        f.config.set_tunable(TUNABLE_CACHE_TTL_HOURS, "1");
        f.cache.set(&key(), &report(118)).await.unwrap();

        *f.now.lock().unwrap() += Duration::hours(2);
        assert!(f.cache.get_entry(&key()).await.is_none());

        f.config.set_tunable(TUNABLE_CACHE_TTL_HOURS, "24");
        f.cache.set(&key(), &report(118)).await.unwrap();
        *f.now.lock().unwrap() += Duration::hours(2);
        assert!(f.cache.get_entry(&key()).await.is_some());
    }
}
