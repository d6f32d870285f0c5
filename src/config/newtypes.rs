//! Validated newtype wrappers for configuration values.
//!
//! This module provides type-safe wrappers around string values that validate
//! their contents on construction. Invalid values are rejected with clear error messages.

use crate::error::ConfigError;
use std::fmt;

/// A validated bearer token.
///
/// The `Debug` implementation masks the token so it never ends up in logs.
///
/// # Example
///
/// ```rust
/// use hiweb_api::AccessToken;
///
/// let token = AccessToken::new("abc").unwrap();
/// assert_eq!(token.as_ref(), "abc");
/// assert_eq!(format!("{:?}", token), "AccessToken(*****)");
/// ```
#[derive(Clone, PartialEq, Eq)]
pub struct AccessToken(String);

impl AccessToken {
    /// Creates a new validated access token.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::EmptyAccessToken`] if the token is empty.
    pub fn new(token: impl Into<String>) -> Result<Self, ConfigError> {
        let token = token.into();
        if token.is_empty() {
            return Err(ConfigError::EmptyAccessToken);
        }
        Ok(Self(token))
    }
}

impl AsRef<str> for AccessToken {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for AccessToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("AccessToken(*****)")
    }
}

/// A validated tenant (website) identifier.
///
/// Sent with every request so a multi-tenant backend knows which website
/// the request applies to.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TenantId(String);

impl TenantId {
    /// Creates a new validated tenant identifier.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::EmptyTenantId`] if the identifier is empty
    /// or only whitespace.
    pub fn new(id: impl Into<String>) -> Result<Self, ConfigError> {
        let id = id.into();
        if id.trim().is_empty() {
            return Err(ConfigError::EmptyTenantId);
        }
        Ok(Self(id))
    }
}

impl AsRef<str> for TenantId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TenantId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A validated base URI for the API.
///
/// Requires an alphabetic scheme followed by `://` and a non-empty host.
/// Endpoints are resolved against it with [`BaseUri::join`].
///
/// # Example
///
/// ```rust
/// use hiweb_api::BaseUri;
///
/// let uri = BaseUri::new("http://product-api.local/").unwrap();
/// assert_eq!(uri.scheme(), "http");
/// assert_eq!(uri.host_name(), "product-api.local");
/// assert_eq!(uri.join("products/1"), "http://product-api.local/products/1");
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BaseUri {
    uri: String,
    scheme_end: usize,
    host_start: usize,
    host_end: usize,
}

impl BaseUri {
    /// Creates a new validated base URI.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidBaseUri`] if the scheme or host is missing.
    pub fn new(uri: impl Into<String>) -> Result<Self, ConfigError> {
        let uri = uri.into().trim().to_string();
        let invalid = || ConfigError::InvalidBaseUri { uri: uri.clone() };

        let scheme_end = uri.find("://").ok_or_else(invalid)?;
        let scheme = &uri[..scheme_end];
        if scheme.is_empty() || !scheme.chars().all(|c| c.is_ascii_alphabetic()) {
            return Err(invalid());
        }

        let host_start = scheme_end + 3;
        let remainder = &uri[host_start..];
        let host_end = remainder
            .find([':', '/', '?', '#'])
            .map_or(uri.len(), |i| host_start + i);
        if host_end == host_start {
            return Err(invalid());
        }

        // Query strings and fragments cannot be joined with an endpoint
        if remainder.contains(['?', '#']) {
            return Err(invalid());
        }

        Ok(Self {
            uri,
            scheme_end,
            host_start,
            host_end,
        })
    }

    /// Returns the URI scheme (e.g., "https").
    #[must_use]
    pub fn scheme(&self) -> &str {
        &self.uri[..self.scheme_end]
    }

    /// Returns the host name portion of the URI.
    #[must_use]
    pub fn host_name(&self) -> &str {
        &self.uri[self.host_start..self.host_end]
    }

    /// Resolves an endpoint against this base URI, separated by exactly one `/`.
    #[must_use]
    pub fn join(&self, endpoint: &str) -> String {
        format!(
            "{}/{}",
            self.uri.trim_end_matches('/'),
            endpoint.trim_start_matches('/')
        )
    }
}

impl AsRef<str> for BaseUri {
    fn as_ref(&self) -> &str {
        &self.uri
    }
}
