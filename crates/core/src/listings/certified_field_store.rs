use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;
use log::warn;

use super::CertifiedField;
use crate::errors::StoreError;

/// Store for certified fields, unique per (listing id, field name).
#[async_trait]
pub trait CertifiedFieldStore: Send + Sync {
    /// Inserts the field or replaces the one with the same listing id and name.
    async fn upsert(&self, field: &CertifiedField) -> Result<(), StoreError>;
}

#[derive(Default)]
pub struct InMemoryCertifiedFieldStore {
    fields: Mutex<HashMap<(String, String), CertifiedField>>,
}

impl InMemoryCertifiedFieldStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock_fields(&self) -> MutexGuard<'_, HashMap<(String, String), CertifiedField>> {
        self.fields.lock().unwrap_or_else(|poisoned| {
            warn!("Certified field store mutex was poisoned, recovering");
            poisoned.into_inner()
        })
    }

    /// Fields stored for a listing, sorted by name.
    pub fn for_listing(&self, listing_id: &str) -> Vec<CertifiedField> {
        let mut fields: Vec<_> = self
            .lock_fields()
            .values()
            .filter(|f| f.listing_id == listing_id)
            .cloned()
            .collect();
        fields.sort_by(|a, b| a.field_name.cmp(&b.field_name));
        fields
    }

    pub fn len(&self) -> usize {
        self.lock_fields().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock_fields().is_empty()
    }
}

#[async_trait]
impl CertifiedFieldStore for InMemoryCertifiedFieldStore {
    async fn upsert(&self, field: &CertifiedField) -> Result<(), StoreError> {
        self.lock_fields().insert(
            (field.listing_id.clone(), field.field_name.clone()),
            field.clone(),
        );
        Ok(())
    }
}
