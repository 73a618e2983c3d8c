//! Core error types for the auto-fill service.
//!
//! Only validation and configuration errors ever reach a caller of the
//! orchestrator. Provider and store errors are caught at their call boundary
//! and degrade into the returned result or a log line.

use thiserror::Error;

use autofill_vehicle_data::Capability;

/// Type alias for Result using our Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Root error type for the auto-fill core.
#[derive(Error, Debug)]
pub enum Error {
    #[error("Input validation failed: {0}")]
    Validation(#[from] ValidationError),

    #[error("Provider configuration error: {0}")]
    Configuration(#[from] ConfigurationError),

    #[error("Store operation failed: {0}")]
    Store(#[from] StoreError),
}

/// Rejected auto-fill input. Raised before any provider is called.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Unsupported identifier type '{0}', expected 'plate' or 'vin'")]
    UnsupportedIdentifierType(String),

    #[error("'{0}' is not a valid license plate")]
    InvalidPlate(String),

    #[error("'{0}' is not a valid VIN")]
    InvalidVin(String),
}

/// No usable implementation could be built for a capability.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigurationError {
    #[error("No active provider registered for {capability}")]
    NoActiveProvider { capability: Capability },

    #[error("Active provider '{key}' for {capability} is not implemented")]
    NotImplemented { capability: Capability, key: String },

    #[error("Provider '{key}' for {capability} is missing setting '{setting}'")]
    MissingSetting {
        capability: Capability,
        key: String,
        setting: String,
    },

    #[error("Resolved adapter serves {actual}, expected {expected}")]
    CapabilityMismatch {
        expected: Capability,
        actual: Capability,
    },
}

/// Storage-agnostic error for the sinks and stores this crate writes to.
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Store unavailable: {0}")]
    Unavailable(String),

    #[error("Serialization failed: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Write rejected: {0}")]
    Rejected(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_configuration_error_display_distinguishes_causes() {
        let missing = ConfigurationError::NoActiveProvider {
            capability: Capability::Identity,
        };
        assert_eq!(
            missing.to_string(),
            "No active provider registered for identity"
        );

        let unknown = ConfigurationError::NotImplemented {
            capability: Capability::BlobStorage,
            key: "s3".to_string(),
        };
        assert_eq!(
            unknown.to_string(),
            "Active provider 's3' for blob_storage is not implemented"
        );
    }

    #[test]
    fn test_validation_error_converts_to_root() {
        let error: Error = ValidationError::InvalidPlate("ZZ-ZZ-ZZ".to_string()).into();
        assert_eq!(
            error.to_string(),
            "Input validation failed: 'ZZ-ZZ-ZZ' is not a valid license plate"
        );
    }
}
