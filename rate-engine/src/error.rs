//! Error types for the rating engine

use thiserror::Error;

/// Result type for rating operations
pub type Result<T> = std::result::Result<T, Error>;

/// Rating errors
///
/// Business-rule violations are detected in a fail-fast validation pass
/// before any monetary computation begins, and are returned rather than
/// panicked. A failed quote yields no price; nothing is retried.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    /// Weight missing, non-numeric, or not positive
    #[error("Invalid weight: weight must be a positive number of kilograms")]
    InvalidWeight,

    /// Service type not present in the rate card
    #[error("Unknown service type: {service}")]
    UnknownServiceType {
        /// Requested service name
        service: String,
    },

    /// Actual package weight exceeds the service's cap
    #[error("Weight {weight_kg}kg exceeds the {max_weight_kg}kg limit for {service}")]
    WeightExceedsServiceLimit {
        /// Requested weight in kilograms
        weight_kg: f64,
        /// Service weight cap in kilograms
        max_weight_kg: f64,
        /// Service name
        service: String,
    },

    /// COD requested for a service that forbids it
    #[error("Cash on delivery is not available for {service}")]
    CodNotAvailableForService {
        /// Service name
        service: String,
    },

    /// Invalid configuration
    #[error("Invalid configuration: {0}")]
    Config(String),
}

impl Error {
    /// Stable machine-readable error code for API callers
    pub fn error_code(&self) -> &'static str {
        match self {
            Error::InvalidWeight => "INVALID_WEIGHT",
            Error::UnknownServiceType { .. } => "UNKNOWN_SERVICE_TYPE",
            Error::WeightExceedsServiceLimit { .. } => "WEIGHT_EXCEEDS_SERVICE_LIMIT",
            Error::CodNotAvailableForService { .. } => "COD_NOT_AVAILABLE_FOR_SERVICE",
            Error::Config(_) => "INVALID_CONFIGURATION",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes_are_stable() {
        assert_eq!(Error::InvalidWeight.error_code(), "INVALID_WEIGHT");
        assert_eq!(
            Error::UnknownServiceType {
                service: "Turbo".to_string()
            }
            .error_code(),
            "UNKNOWN_SERVICE_TYPE"
        );
        assert_eq!(
            Error::WeightExceedsServiceLimit {
                weight_kg: 60.0,
                max_weight_kg: 50.0,
                service: "Standard".to_string()
            }
            .error_code(),
            "WEIGHT_EXCEEDS_SERVICE_LIMIT"
        );
        assert_eq!(
            Error::CodNotAvailableForService {
                service: "SameDay".to_string()
            }
            .error_code(),
            "COD_NOT_AVAILABLE_FOR_SERVICE"
        );
    }

    #[test]
    fn test_error_messages_are_descriptive() {
        let err = Error::WeightExceedsServiceLimit {
            weight_kg: 60.0,
            max_weight_kg: 50.0,
            service: "Standard".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Weight 60kg exceeds the 50kg limit for Standard"
        );
    }
}
