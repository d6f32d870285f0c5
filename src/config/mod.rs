//! Configuration types for the API client.
//!
//! # Overview
//!
//! - [`ClientConfig`]: immutable configuration shared by every request
//! - [`ClientConfigBuilder`]: a builder for constructing [`ClientConfig`] instances
//! - [`BaseUri`]: a validated base URI
//! - [`AccessToken`]: a bearer token with masked debug output
//! - [`TenantId`]: a validated tenant (website) identifier
//!
//! The configuration is fixed once built. Calls made from different tasks
//! read the same values, so no locking is involved.
//!
//! # Example
//!
//! ```rust
//! use hiweb_api::{AccessToken, BaseUri, ClientConfig, TenantId};
//!
//! let config = ClientConfig::builder()
//!     .base_uri(BaseUri::new("http://product-api.local/").unwrap())
//!     .token(AccessToken::new("abc").unwrap())
//!     .tenant_id(TenantId::new("9f1c3a").unwrap())
//!     .build()
//!     .unwrap();
//!
//! assert_eq!(config.tenant_header(), "Website-Id");
//! ```

mod newtypes;

use std::time::Duration;

pub use newtypes::{AccessToken, BaseUri, TenantId};

use crate::error::ConfigError;

/// Header used to carry the tenant id when no other name is configured.
pub const DEFAULT_TENANT_HEADER: &str = "Website-Id";

/// Configuration for the API client.
///
/// # Thread Safety
///
/// `ClientConfig` is `Clone`, `Send`, and `Sync`.
#[derive(Clone, Debug)]
pub struct ClientConfig {
    base_uri: BaseUri,
    token: Option<AccessToken>,
    tenant_id: Option<TenantId>,
    tenant_header: String,
    user_agent_prefix: Option<String>,
    timeout: Option<Duration>,
}

impl ClientConfig {
    /// Creates a new builder for constructing a `ClientConfig`.
    #[must_use]
    pub fn builder() -> ClientConfigBuilder {
        ClientConfigBuilder::new()
    }

    /// Returns the base URI.
    #[must_use]
    pub const fn base_uri(&self) -> &BaseUri {
        &self.base_uri
    }

    /// Returns the bearer token, if configured.
    #[must_use]
    pub const fn token(&self) -> Option<&AccessToken> {
        self.token.as_ref()
    }

    /// Returns the tenant id, if configured.
    #[must_use]
    pub const fn tenant_id(&self) -> Option<&TenantId> {
        self.tenant_id.as_ref()
    }

    /// Returns the name of the header that carries the tenant id.
    #[must_use]
    pub fn tenant_header(&self) -> &str {
        &self.tenant_header
    }

    /// Returns the user agent prefix, if configured.
    #[must_use]
    pub fn user_agent_prefix(&self) -> Option<&str> {
        self.user_agent_prefix.as_deref()
    }

    /// Returns the per-request transport timeout, if configured.
    #[must_use]
    pub const fn timeout(&self) -> Option<Duration> {
        self.timeout
    }
}

const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<ClientConfig>();
};

/// Builder for constructing [`ClientConfig`] instances.
///
/// `base_uri` is required. Everything else is optional.
///
/// # Defaults
///
/// - `token`: `None` (no `Authorization` header)
/// - `tenant_id`: `None` (no tenant header)
/// - `tenant_header`: [`DEFAULT_TENANT_HEADER`]
/// - `user_agent_prefix`: `None`
/// - `timeout`: `None` (transport default)
#[derive(Debug, Default)]
pub struct ClientConfigBuilder {
    base_uri: Option<BaseUri>,
    token: Option<AccessToken>,
    tenant_id: Option<TenantId>,
    tenant_header: Option<String>,
    user_agent_prefix: Option<String>,
    timeout: Option<Duration>,
}

impl ClientConfigBuilder {
    /// Creates a new builder with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the base URI (required).
    #[must_use]
    pub fn base_uri(mut self, uri: BaseUri) -> Self {
        self.base_uri = Some(uri);
        self
    }

    /// Sets the bearer token.
    #[must_use]
    pub fn token(mut self, token: AccessToken) -> Self {
        self.token = Some(token);
        self
    }

    /// Sets the tenant id.
    #[must_use]
    pub fn tenant_id(mut self, id: TenantId) -> Self {
        self.tenant_id = Some(id);
        self
    }

    /// Overrides the name of the tenant header.
    #[must_use]
    pub fn tenant_header(mut self, name: impl Into<String>) -> Self {
        self.tenant_header = Some(name.into());
        self
    }

    /// Sets the user agent prefix for HTTP requests.
    #[must_use]
    pub fn user_agent_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.user_agent_prefix = Some(prefix.into());
        self
    }

    /// Sets the transport timeout applied to each request.
    #[must_use]
    pub const fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Builds the [`ClientConfig`].
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingRequiredField`] if `base_uri` is not set,
    /// or [`ConfigError::InvalidTenantHeader`] if the tenant header name is
    /// empty or contains characters not allowed in a header name.
    pub fn build(self) -> Result<ClientConfig, ConfigError> {
        let base_uri = self
            .base_uri
            .ok_or(ConfigError::MissingRequiredField { field: "base_uri" })?;

        let tenant_header = self
            .tenant_header
            .unwrap_or_else(|| DEFAULT_TENANT_HEADER.to_string());
        if tenant_header.is_empty()
            || !tenant_header
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
        {
            return Err(ConfigError::InvalidTenantHeader {
                name: tenant_header,
            });
        }

        Ok(ClientConfig {
            base_uri,
            token: self.token,
            tenant_id: self.tenant_id,
            tenant_header,
            user_agent_prefix: self.user_agent_prefix,
            timeout: self.timeout,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base() -> BaseUri {
        BaseUri::new("http://product-api.local/").unwrap()
    }

    #[test]
    fn test_builder_requires_base_uri() {
        let result = ClientConfigBuilder::new()
            .token(AccessToken::new("abc").unwrap())
            .build();

        assert!(matches!(
            result,
            Err(ConfigError::MissingRequiredField { field: "base_uri" })
        ));
    }

    #[test]
    fn test_builder_provides_sensible_defaults() {
        let config = ClientConfig::builder().base_uri(base()).build().unwrap();

        assert!(config.token().is_none());
        assert!(config.tenant_id().is_none());
        assert_eq!(config.tenant_header(), DEFAULT_TENANT_HEADER);
        assert!(config.user_agent_prefix().is_none());
        assert!(config.timeout().is_none());
    }

    #[test]
    fn test_builder_with_all_optional_fields() {
        let config = ClientConfig::builder()
            .base_uri(base())
            .token(AccessToken::new("abc").unwrap())
            .tenant_id(TenantId::new("site-7").unwrap())
            .tenant_header("X-Tenant")
            .user_agent_prefix("Importer/2.0")
            .timeout(Duration::from_secs(5))
            .build()
            .unwrap();

        assert_eq!(config.token().unwrap().as_ref(), "abc");
        assert_eq!(config.tenant_id().unwrap().as_ref(), "site-7");
        assert_eq!(config.tenant_header(), "X-Tenant");
        assert_eq!(config.user_agent_prefix(), Some("Importer/2.0"));
        assert_eq!(config.timeout(), Some(Duration::from_secs(5)));
    }

    #[test]
    fn test_builder_rejects_bad_tenant_header() {
        let result = ClientConfig::builder()
            .base_uri(base())
            .tenant_header("Website Id")
            .build();

        assert!(matches!(
            result,
            Err(ConfigError::InvalidTenantHeader { name }) if name == "Website Id"
        ));
    }

    #[test]
    fn test_debug_does_not_leak_token() {
        let config = ClientConfig::builder()
            .base_uri(base())
            .token(AccessToken::new("very-secret").unwrap())
            .build()
            .unwrap();

        let debug_str = format!("{config:?}");
        assert!(debug_str.contains("ClientConfig"));
        assert!(!debug_str.contains("very-secret"));
    }
}
