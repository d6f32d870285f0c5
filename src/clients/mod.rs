//! The request gateway: HTTP client types for the JSON:API backend.
//!
//! # Overview
//!
//! - [`ApiClient`]: the async client that injects the standard headers and
//!   parses every response into a [`Document`](crate::document::Document)
//! - [`RequestOptions`]: extra headers, query parameters and JSON body
//! - [`HttpMethod`]: supported HTTP methods (GET, POST, PATCH, DELETE)
//! - [`ApiResponse`]: the raw [`HttpResponse`] plus the parsed document
//! - [`HttpError`]: everything that can go wrong on the way
//!
//! # Example
//!
//! ```rust,ignore
//! use hiweb_api::{AccessToken, ApiClient, BaseUri, ClientConfig, RequestOptions};
//!
//! let config = ClientConfig::builder()
//!     .base_uri(BaseUri::new("http://product-api.local/").unwrap())
//!     .token(AccessToken::new("abc").unwrap())
//!     .build()
//!     .unwrap();
//! let client = ApiClient::new(config)?;
//!
//! let response = client
//!     .request("GET", "products", RequestOptions::new().query_param("limit", "10"))
//!     .await?;
//! ```
//!
//! # Retry Behavior
//!
//! There is none. Every failure is returned to the caller as-is.

mod errors;
mod http_client;
mod http_request;
mod http_response;

pub use errors::{HttpError, HttpResponseError, InvalidHttpRequestError, InvalidResponseError};
pub use http_client::{ApiClient, SDK_VERSION};
pub use http_request::{HttpMethod, RequestOptions};
pub use http_response::{ApiResponse, HttpResponse};
