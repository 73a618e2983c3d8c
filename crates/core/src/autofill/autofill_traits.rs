use async_trait::async_trait;

use super::autofill_model::{AutofillRequest, AutofillResult};
use crate::errors::Result;

/// Trait for the auto-fill operation
#[async_trait]
pub trait AutofillServiceTrait: Send + Sync {
    /// Pre-fills a listing from every data capability.
    ///
    /// Only invalid input and unusable configuration are returned as errors;
    /// provider failures are reported per source in the result.
    async fn autofill(&self, request: AutofillRequest) -> Result<AutofillResult>;
}
