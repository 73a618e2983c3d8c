//! Certified listing fields.

mod certified_field_model;
mod certified_field_store;

pub use certified_field_model::CertifiedField;
pub use certified_field_store::{CertifiedFieldStore, InMemoryCertifiedFieldStore};
