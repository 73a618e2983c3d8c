/// Consecutive failures after which a provider raises a critical alert.
pub const FAILURE_ALERT_THRESHOLD: u32 = 3;

/// Cache TTL used when the tunable is absent or invalid.
pub const DEFAULT_CACHE_TTL_HOURS: i64 = 48;

// Tunable keys read from the configuration snapshot

pub const TUNABLE_CACHE_TTL_HOURS: &str = "cache_ttl_hours";
pub const TUNABLE_PLATE_REGISTRY_BASE_URL: &str = "plate_registry.base_url";
pub const TUNABLE_PLATE_REGISTRY_API_KEY: &str = "plate_registry.api_key";
pub const TUNABLE_ADEME_BASE_URL: &str = "ademe.base_url";
pub const TUNABLE_IDENTITY_STATIC_TOKENS: &str = "identity.static_tokens";
pub const TUNABLE_BLOB_STORAGE_ROOT: &str = "blob_storage.root";

/// Provider label used in source statuses for cache hits.
pub const CACHE_PROVIDER_KEY: &str = "cache";

/// Listing ids generated for a fresh auto-fill run start with this prefix.
pub const TEMP_LISTING_PREFIX: &str = "tmp-";

/// Audit action recorded for each auto-fill run.
pub const AUDIT_ACTION_AUTOFILL: &str = "vehicle_autofill";
