//! Request types: the HTTP verb and the per-request options.

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use crate::clients::errors::InvalidHttpRequestError;

/// HTTP methods supported by the API.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HttpMethod {
    /// Read a resource or a collection page.
    Get,
    /// Create a resource.
    Post,
    /// Update a resource.
    Patch,
    /// Delete a resource.
    Delete,
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Get => write!(f, "get"),
            Self::Post => write!(f, "post"),
            Self::Patch => write!(f, "patch"),
            Self::Delete => write!(f, "delete"),
        }
    }
}

impl FromStr for HttpMethod {
    type Err = InvalidHttpRequestError;

    /// Parses a method name, ignoring case.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "get" => Ok(Self::Get),
            "post" => Ok(Self::Post),
            "patch" => Ok(Self::Patch),
            "delete" => Ok(Self::Delete),
            other => Err(InvalidHttpRequestError::InvalidMethod {
                method: other.to_string(),
            }),
        }
    }
}

/// Caller-supplied options for a single request.
///
/// Headers set here are merged under the client's mandatory headers, so a
/// caller cannot override `Content-Type`, `Authorization` or the tenant
/// header.
///
/// # Example
///
/// ```rust
/// use hiweb_api::clients::RequestOptions;
/// use serde_json::json;
///
/// let options = RequestOptions::new()
///     .query_param("page", "2")
///     .header("X-Trace", "abc")
///     .json(json!({"data": {"type": "products"}}));
///
/// assert_eq!(options.query, vec![("page".to_string(), "2".to_string())]);
/// assert!(options.body.is_some());
/// ```
#[derive(Clone, Debug, Default, PartialEq)]
pub struct RequestOptions {
    /// Extra headers.
    pub headers: HashMap<String, String>,
    /// Query parameters, in the order they are appended to the URL.
    pub query: Vec<(String, String)>,
    /// JSON body.
    pub body: Option<serde_json::Value>,
}

impl RequestOptions {
    /// Creates empty options.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a single header.
    #[must_use]
    pub fn header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(key.into(), value.into());
        self
    }

    /// Appends a single query parameter.
    #[must_use]
    pub fn query_param(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.query.push((key.into(), value.into()));
        self
    }

    /// Sets the JSON body.
    #[must_use]
    pub fn json(mut self, body: impl Into<serde_json::Value>) -> Self {
        self.body = Some(body.into());
        self
    }
}
