//! Error types for client configuration.
//!
//! All configuration constructors return `Result<T, ConfigError>` so that a
//! misconfigured client fails before the first request is sent.
//!
//! # Example
//!
//! ```rust
//! use hiweb_api::{AccessToken, ConfigError};
//!
//! let result = AccessToken::new("");
//! assert!(matches!(result, Err(ConfigError::EmptyAccessToken)));
//! ```

use thiserror::Error;

/// Errors that can occur while building a [`ClientConfig`](crate::ClientConfig).
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// Access token cannot be empty.
    #[error("Access token cannot be empty. Omit the token instead of passing an empty string.")]
    EmptyAccessToken,

    /// Tenant identifier cannot be empty.
    #[error("Tenant id cannot be empty. Omit the tenant id instead of passing an empty string.")]
    EmptyTenantId,

    /// Tenant header name is not a usable HTTP header name.
    #[error("Invalid tenant header name '{name}'.")]
    InvalidTenantHeader {
        /// The rejected header name.
        name: String,
    },

    /// Base URI is invalid.
    #[error("Invalid base URI '{uri}'. Please provide a URL with scheme and host (e.g., 'https://api.example.com/').")]
    InvalidBaseUri {
        /// The invalid URI that was provided.
        uri: String,
    },

    /// A required field is missing.
    #[error("Missing required field: '{field}'. This field must be set before building the configuration.")]
    MissingRequiredField {
        /// The name of the missing field.
        field: &'static str,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_base_uri_error_message() {
        let error = ConfigError::InvalidBaseUri {
            uri: "not a url".to_string(),
        };
        let message = error.to_string();
        assert!(message.contains("not a url"));
        assert!(message.contains("scheme and host"));
    }

    #[test]
    fn test_missing_required_field_error_message() {
        let error = ConfigError::MissingRequiredField { field: "base_uri" };
        let message = error.to_string();
        assert!(message.contains("base_uri"));
        assert!(message.contains("must be set"));
    }

    #[test]
    fn test_error_implements_std_error() {
        let error = ConfigError::EmptyAccessToken;
        let _: &dyn std::error::Error = &error;
    }
}
