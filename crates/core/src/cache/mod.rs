//! Time-boxed provider response cache.

mod cache_model;
mod cache_traits;
mod memory_store;
mod response_cache;

pub use cache_model::{CacheEntry, CacheKey};
pub use cache_traits::CacheStore;
pub use memory_store::InMemoryCacheStore;
pub use response_cache::{Clock, ResponseCache};
