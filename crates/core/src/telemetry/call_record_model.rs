//! Call record model and its append-only store.

use std::sync::Mutex;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use autofill_vehicle_data::Capability;

use crate::errors::StoreError;

/// Status code recorded for a successful provider call.
pub const STATUS_OK: u16 = 200;
/// Status code recorded for a failed provider call.
pub const STATUS_FAILED: u16 = 500;

/// Outcome of one instrumented provider invocation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CallRecord {
    pub capability: Capability,
    pub provider_key: String,
    /// Provider method that was invoked (e.g. "lookup", "decode").
    pub endpoint: String,
    pub status_code: u16,
    pub latency_ms: u64,
    pub cost: Decimal,
    pub error: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl CallRecord {
    pub fn is_failure(&self) -> bool {
        self.status_code >= 400
    }
}

/// Append-only sink for call records.
#[async_trait]
pub trait CallLogStore: Send + Sync {
    async fn append(&self, record: &CallRecord) -> Result<(), StoreError>;
}

/// Call log kept in memory, mainly for tests and single-process deployments.
#[derive(Default)]
pub struct InMemoryCallLog {
    records: Mutex<Vec<CallRecord>>,
}

impl InMemoryCallLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn records(&self) -> Vec<CallRecord> {
        self.records
            .lock()
            .map(|r| r.clone())
            .unwrap_or_default()
    }

    /// Sum of the cost of every recorded call for a provider key.
    pub fn total_cost(&self, provider_key: &str) -> Decimal {
        self.records()
            .iter()
            .filter(|r| r.provider_key == provider_key)
            .map(|r| r.cost)
            .sum()
    }
}

#[async_trait]
impl CallLogStore for InMemoryCallLog {
    async fn append(&self, record: &CallRecord) -> Result<(), StoreError> {
        self.records
            .lock()
            .map_err(|_| StoreError::Unavailable("call log lock poisoned".to_string()))?
            .push(record.clone());
        Ok(())
    }
}
