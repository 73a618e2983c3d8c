//! Error types and retry classification for the vehicle data crate.
//!
//! This module provides:
//! - [`ProviderError`]: The error enum returned by every provider call
//! - [`RetryClass`]: Classification used by the HTTP adapters' bounded retry loop

mod retry;

pub use retry::RetryClass;

use thiserror::Error;

/// Errors that can occur while talking to a vehicle data provider.
///
/// Each variant is classified into a [`RetryClass`] via the
/// [`retry_class`](Self::retry_class) method. Only the HTTP adapters act on
/// the classification; callers above the provider layer treat every variant
/// as a failed call.
#[derive(Error, Debug)]
pub enum ProviderError {
    /// The provider has no record for the requested vehicle.
    #[error("No data from {provider} for {subject}")]
    NotFound {
        /// The provider that was queried
        provider: String,
        /// What was looked up (plate, VIN, make/model...)
        subject: String,
    },

    /// The request did not carry enough information for this provider.
    /// For example, a recall search without make, model and year.
    #[error("Insufficient data: {0}")]
    InsufficientData(String),

    /// The provider rate limited the request (HTTP 429).
    #[error("Rate limited: {provider}")]
    RateLimited {
        /// The provider that rate limited the request
        provider: String,
    },

    /// The request to the provider timed out.
    #[error("Timeout: {provider}")]
    Timeout {
        /// The provider that timed out
        provider: String,
    },

    /// The provider rejected the request (4xx other than 404/429).
    #[error("Request rejected by {provider} ({status}): {message}")]
    Rejected {
        /// The provider that rejected the request
        provider: String,
        /// HTTP status code
        status: u16,
        /// Body or reason returned by the provider
        message: String,
    },

    /// The provider is failing on its side (5xx or connection failure).
    #[error("Provider error: {provider} - {message}")]
    Unavailable {
        /// The failing provider
        provider: String,
        /// The error message from the provider
        message: String,
    },

    /// The provider answered but the payload could not be understood.
    #[error("Invalid response from {provider}: {message}")]
    InvalidResponse {
        /// The provider that returned the payload
        provider: String,
        /// Why the payload was rejected
        message: String,
    },

    /// A local storage backend failed.
    #[error("Storage error: {0}")]
    Storage(#[from] std::io::Error),
}

impl ProviderError {
    /// Returns the retry classification for this error.
    ///
    /// # Examples
    ///
    /// ```
    /// use autofill_vehicle_data::errors::{ProviderError, RetryClass};
    ///
    /// let error = ProviderError::RateLimited { provider: "nhtsa_vpic".to_string() };
    /// assert_eq!(error.retry_class(), RetryClass::WithBackoff);
    ///
    /// let error = ProviderError::InsufficientData("no VIN".to_string());
    /// assert_eq!(error.retry_class(), RetryClass::Never);
    /// ```
    pub fn retry_class(&self) -> RetryClass {
        match self {
            Self::RateLimited { .. } | Self::Timeout { .. } | Self::Unavailable { .. } => {
                RetryClass::WithBackoff
            }
            Self::NotFound { .. }
            | Self::InsufficientData(_)
            | Self::Rejected { .. }
            | Self::InvalidResponse { .. }
            | Self::Storage(_) => RetryClass::Never,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transient_errors_retry_with_backoff() {
        let timeout = ProviderError::Timeout {
            provider: "ademe".to_string(),
        };
        assert_eq!(timeout.retry_class(), RetryClass::WithBackoff);

        let unavailable = ProviderError::Unavailable {
            provider: "plate_registry".to_string(),
            message: "502 Bad Gateway".to_string(),
        };
        assert_eq!(unavailable.retry_class(), RetryClass::WithBackoff);
    }

    #[test]
    fn test_terminal_errors_never_retry() {
        let not_found = ProviderError::NotFound {
            provider: "nhtsa_vpic".to_string(),
            subject: "VF1RFB00X56789012".to_string(),
        };
        assert_eq!(not_found.retry_class(), RetryClass::Never);

        let rejected = ProviderError::Rejected {
            provider: "plate_registry".to_string(),
            status: 401,
            message: "Invalid API key".to_string(),
        };
        assert_eq!(rejected.retry_class(), RetryClass::Never);
    }

    #[test]
    fn test_error_display() {
        let error = ProviderError::Unavailable {
            provider: "ademe".to_string(),
            message: "Service down".to_string(),
        };
        assert_eq!(format!("{}", error), "Provider error: ademe - Service down");

        let error = ProviderError::InsufficientData("no VIN available".to_string());
        assert_eq!(format!("{}", error), "Insufficient data: no VIN available");
    }
}
