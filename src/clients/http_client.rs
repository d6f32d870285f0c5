//! The request gateway.
//!
//! [`ApiClient`] turns `(method, endpoint, options)` into an HTTP call with
//! the standard JSON:API headers injected, then validates and parses the
//! response body into a [`Document`](crate::document::Document).

use std::collections::HashMap;

use crate::clients::errors::{HttpError, HttpResponseError};
use crate::clients::http_request::{HttpMethod, RequestOptions};
use crate::clients::http_response::{ApiResponse, HttpResponse};
use crate::config::ClientConfig;
use crate::document::{self, MEDIA_TYPE};

/// Crate version from Cargo.toml.
pub const SDK_VERSION: &str = env!("CARGO_PKG_VERSION");

/// HTTP client for the JSON:API backend.
///
/// The client handles:
/// - URL construction from the configured base URI
/// - Mandatory headers: `Content-Type`, `Accept`, `User-Agent`, bearer
///   token and tenant id
/// - Validation and parsing of every response body
///
/// Nothing is retried. Transport failures and non-2xx answers are returned
/// as [`HttpError`].
///
/// # Thread Safety
///
/// `ApiClient` is `Send + Sync`; wrap it in an `Arc` to share it between
/// resource managers and tasks.
///
/// # Example
///
/// ```rust,ignore
/// use hiweb_api::{ApiClient, BaseUri, ClientConfig, RequestOptions};
///
/// let config = ClientConfig::builder()
///     .base_uri(BaseUri::new("http://product-api.local/").unwrap())
///     .build()
///     .unwrap();
/// let client = ApiClient::new(config)?;
///
/// let response = client.get("products/1", RequestOptions::new()).await?;
/// println!("{:?}", response.document.resource());
/// ```
#[derive(Debug)]
pub struct ApiClient {
    client: reqwest::Client,
    config: ClientConfig,
    default_headers: HashMap<String, String>,
}

const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<ApiClient>();
};

impl ApiClient {
    /// Creates a new client from a configuration.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError::Network`] if the underlying reqwest client
    /// cannot be created (e.g., TLS initialization failure).
    pub fn new(config: ClientConfig) -> Result<Self, HttpError> {
        let user_agent_prefix = config
            .user_agent_prefix()
            .map_or(String::new(), |prefix| format!("{prefix} | "));
        let user_agent = format!("{user_agent_prefix}Hiweb API Client v{SDK_VERSION} | Rust");

        let mut default_headers = HashMap::new();
        default_headers.insert("Content-Type".to_string(), MEDIA_TYPE.to_string());
        default_headers.insert("Accept".to_string(), MEDIA_TYPE.to_string());
        default_headers.insert("User-Agent".to_string(), user_agent);

        if let Some(token) = config.token() {
            default_headers.insert(
                "Authorization".to_string(),
                format!("Bearer {}", token.as_ref()),
            );
        }

        if let Some(tenant_id) = config.tenant_id() {
            default_headers.insert(
                config.tenant_header().to_string(),
                tenant_id.as_ref().to_string(),
            );
        }

        let mut builder = reqwest::Client::builder().use_rustls_tls();
        if let Some(timeout) = config.timeout() {
            builder = builder.timeout(timeout);
        }
        let client = builder.build()?;

        Ok(Self {
            client,
            config,
            default_headers,
        })
    }

    /// Returns the configuration this client was built with.
    #[must_use]
    pub const fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Returns the headers injected into every request.
    #[must_use]
    pub const fn default_headers(&self) -> &HashMap<String, String> {
        &self.default_headers
    }

    /// Sends a GET request.
    ///
    /// # Errors
    ///
    /// See [`ApiClient::send`].
    pub async fn get(&self, endpoint: &str, options: RequestOptions) -> Result<ApiResponse, HttpError> {
        self.send(HttpMethod::Get, endpoint, options).await
    }

    /// Sends a POST request.
    ///
    /// # Errors
    ///
    /// See [`ApiClient::send`].
    pub async fn post(&self, endpoint: &str, options: RequestOptions) -> Result<ApiResponse, HttpError> {
        self.send(HttpMethod::Post, endpoint, options).await
    }

    /// Sends a PATCH request.
    ///
    /// # Errors
    ///
    /// See [`ApiClient::send`].
    pub async fn patch(&self, endpoint: &str, options: RequestOptions) -> Result<ApiResponse, HttpError> {
        self.send(HttpMethod::Patch, endpoint, options).await
    }

    /// Sends a DELETE request.
    ///
    /// # Errors
    ///
    /// See [`ApiClient::send`].
    pub async fn delete(&self, endpoint: &str, options: RequestOptions) -> Result<ApiResponse, HttpError> {
        self.send(HttpMethod::Delete, endpoint, options).await
    }

    /// Sends a request whose method is given by name (case-insensitive).
    ///
    /// # Errors
    ///
    /// Returns [`HttpError::InvalidRequest`] if the method is not one of
    /// get, post, patch or delete, otherwise see [`ApiClient::send`].
    pub async fn request(
        &self,
        method: &str,
        endpoint: &str,
        options: RequestOptions,
    ) -> Result<ApiResponse, HttpError> {
        let method: HttpMethod = method.parse()?;
        self.send(method, endpoint, options).await
    }

    /// Sends a request and parses the response into a document.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError`] if:
    /// - A network error occurs (`Network`)
    /// - A non-2xx response is received (`Response`)
    /// - The body is not a valid JSON:API document (`InvalidResponse`)
    pub async fn send(
        &self,
        method: HttpMethod,
        endpoint: &str,
        options: RequestOptions,
    ) -> Result<ApiResponse, HttpError> {
        let url = self.config.base_uri().join(endpoint);

        // Caller headers first so the mandatory ones win
        let mut headers = options.headers;
        headers.retain(|key, _| {
            !self
                .default_headers
                .keys()
                .any(|default| default.eq_ignore_ascii_case(key))
        });
        for (key, value) in &self.default_headers {
            headers.insert(key.clone(), value.clone());
        }

        let mut req_builder = match method {
            HttpMethod::Get => self.client.get(&url),
            HttpMethod::Post => self.client.post(&url),
            HttpMethod::Patch => self.client.patch(&url),
            HttpMethod::Delete => self.client.delete(&url),
        };

        for (key, value) in &headers {
            req_builder = req_builder.header(key, value);
        }

        if !options.query.is_empty() {
            req_builder = req_builder.query(&options.query);
        }

        if let Some(body) = &options.body {
            req_builder = req_builder.body(body.to_string());
        }

        tracing::debug!(%method, %url, "sending request");
        let res = req_builder.send().await?;

        let code = res.status().as_u16();
        let res_headers = Self::parse_response_headers(res.headers());
        let body = res.text().await?;
        let response = HttpResponse::new(code, res_headers, body);

        if !response.is_ok() {
            tracing::debug!(%method, %url, code, "request failed");
            return Err(HttpError::Response(HttpResponseError {
                code,
                message: Self::serialize_error(&response),
            }));
        }

        let document = document::parse(&response.body).map_err(|e| {
            tracing::warn!(%method, %url, reason = %e.reason, "invalid JSON:API response");
            e
        })?;

        Ok(ApiResponse { response, document })
    }

    /// Parses response headers into a `HashMap`.
    fn parse_response_headers(
        headers: &reqwest::header::HeaderMap,
    ) -> HashMap<String, Vec<String>> {
        let mut result: HashMap<String, Vec<String>> = HashMap::new();
        for (name, value) in headers {
            let key = name.as_str().to_lowercase();
            let value = value.to_str().unwrap_or_default().to_string();
            result.entry(key).or_default().push(value);
        }
        result
    }

    /// Serializes an error response: the `errors` member if present, the raw body otherwise.
    fn serialize_error(response: &HttpResponse) -> String {
        serde_json::from_str::<serde_json::Value>(&response.body)
            .ok()
            .and_then(|body| body.get("errors").map(ToString::to_string))
            .unwrap_or_else(|| response.body.trim().to_string())
    }
}
