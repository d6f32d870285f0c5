//! HTTP-level error types.
//!
//! - [`HttpResponseError`]: non-2xx HTTP responses
//! - [`InvalidHttpRequestError`]: a request rejected before it is sent
//! - [`InvalidResponseError`]: a 2xx response whose body is not valid JSON:API
//! - [`HttpError`]: unified error type encompassing all of the above
//!
//! # Example
//!
//! ```rust,ignore
//! use hiweb_api::clients::HttpError;
//!
//! match client.get("products/1", RequestOptions::new()).await {
//!     Ok(response) => println!("{:?}", response.document),
//!     Err(HttpError::Response(e)) => println!("API error {}: {}", e.code, e.message),
//!     Err(HttpError::InvalidResponse(e)) => println!("Bad payload: {}", e),
//!     Err(HttpError::InvalidRequest(e)) => println!("Invalid request: {}", e),
//!     Err(HttpError::Network(e)) => println!("Network error: {}", e),
//! }
//! ```

use thiserror::Error;

pub use crate::document::InvalidResponseError;

/// Error returned when a request receives a non-successful response.
///
/// The message holds the serialized JSON:API `errors` member when the
/// server sent one, otherwise the raw response body.
///
/// # Example
///
/// ```rust
/// use hiweb_api::clients::HttpResponseError;
///
/// let error = HttpResponseError {
///     code: 404,
///     message: r#"[{"status":"404","title":"Not Found"}]"#.to_string(),
/// };
/// assert!(error.to_string().starts_with("HTTP 404"));
/// ```
#[derive(Debug, Error)]
#[error("HTTP {code}: {message}")]
pub struct HttpResponseError {
    /// The HTTP status code of the response.
    pub code: u16,
    /// Serialized error payload.
    pub message: String,
}

/// Error returned when a request fails validation before it is sent.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum InvalidHttpRequestError {
    /// The HTTP method is not one of get, post, patch or delete.
    #[error("Request method {method} is invalid")]
    InvalidMethod {
        /// The invalid method that was provided.
        method: String,
    },
}

/// Unified error type for all HTTP-related errors.
///
/// [`HttpError::status`] gives the HTTP status code when one is known, so
/// callers can tell a server answer apart from a connection failure.
#[derive(Debug, Error)]
pub enum HttpError {
    /// An HTTP response error (non-2xx status code).
    #[error(transparent)]
    Response(#[from] HttpResponseError),

    /// Request validation failed.
    #[error(transparent)]
    InvalidRequest(#[from] InvalidHttpRequestError),

    /// The response body is not a valid JSON:API document.
    #[error(transparent)]
    InvalidResponse(#[from] InvalidResponseError),

    /// Network or connection error.
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),
}

impl HttpError {
    /// Returns the HTTP status code, if the failure carried one.
    #[must_use]
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Response(e) => Some(e.code),
            Self::Network(e) => e.status().map(|s| s.as_u16()),
            Self::InvalidRequest(_) | Self::InvalidResponse(_) => None,
        }
    }

    /// Returns `true` if the server answered with `404 Not Found`.
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        self.status() == Some(404)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_http_response_error_includes_status_code_in_message() {
        let error = HttpResponseError {
            code: 500,
            message: "boom".to_string(),
        };
        assert_eq!(error.to_string(), "HTTP 500: boom");
    }

    #[test]
    fn test_invalid_method_message() {
        let error = InvalidHttpRequestError::InvalidMethod {
            method: "put".to_string(),
        };
        assert_eq!(error.to_string(), "Request method put is invalid");
    }

    #[test]
    fn test_status_is_known_only_for_responses() {
        let response = HttpError::Response(HttpResponseError {
            code: 404,
            message: String::new(),
        });
        assert_eq!(response.status(), Some(404));
        assert!(response.is_not_found());

        let invalid = HttpError::InvalidRequest(InvalidHttpRequestError::InvalidMethod {
            method: "head".to_string(),
        });
        assert_eq!(invalid.status(), None);
        assert!(!invalid.is_not_found());
    }

    #[test]
    fn test_error_types_implement_std_error() {
        let response: &dyn std::error::Error = &HttpResponseError {
            code: 400,
            message: "test".to_string(),
        };
        let _ = response;

        let invalid: &dyn std::error::Error = &InvalidHttpRequestError::InvalidMethod {
            method: "options".to_string(),
        };
        let _ = invalid;
    }
}
