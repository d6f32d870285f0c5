//! # Hiweb API Client
//!
//! An async client for JSON:API backends that performs CRUD operations and
//! transparently paginates collection queries.
//!
//! ## Overview
//!
//! This crate provides:
//! - Type-safe configuration via [`ClientConfig`] and [`ClientConfigBuilder`]
//! - Validated newtypes for the base URI, bearer token and tenant id
//! - A request gateway, [`ApiClient`], that injects the JSON:API headers and
//!   validates every response
//! - A JSON:API document model and codec in [`document`]
//! - [`ResourceManager`]: create/update/find/delete and a multi-page
//!   collection crawl with filter translation and aggregation
//!
//! ## Quick Start
//!
//! ```rust
//! use hiweb_api::{AccessToken, BaseUri, ClientConfig, TenantId};
//!
//! let config = ClientConfig::builder()
//!     .base_uri(BaseUri::new("http://product-api.local/").unwrap())
//!     .token(AccessToken::new("your-token").unwrap())
//!     .tenant_id(TenantId::new("your-website-id").unwrap())
//!     .build()
//!     .unwrap();
//! ```
//!
//! ## Working with Resources
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use hiweb_api::{ApiClient, CollectionQuery, Lookup, ResourceManager};
//!
//! let client = Arc::new(ApiClient::new(config)?);
//! let products = ResourceManager::new("products", client);
//!
//! // Every page of the collection, folded into one document
//! let all = products.get(&CollectionQuery::new().max_crawl_pages(0)).await?;
//!
//! // A 404 is an answer, not an error
//! if let Lookup::NotFound = products.find("42").await? {
//!     println!("no product 42");
//! }
//! ```
//!
//! ## Design Principles
//!
//! - **No global state**: configuration is built once and passed explicitly
//! - **Fail-fast validation**: newtypes validate on construction
//! - **Thread-safe**: all client types are `Send + Sync`
//! - **Async-first**: designed for use with the Tokio runtime
//! - **No partial results**: a crawl that fails returns an error, never a
//!   truncated collection

pub mod clients;
pub mod config;
pub mod document;
pub mod error;
pub mod resources;

pub use config::{AccessToken, BaseUri, ClientConfig, ClientConfigBuilder, TenantId};
pub use error::ConfigError;

pub use clients::{
    ApiClient, ApiResponse, HttpError, HttpMethod, HttpResponse, HttpResponseError,
    InvalidHttpRequestError, InvalidResponseError, RequestOptions,
};

pub use document::{Document, PrimaryData, Relationship, Resource, ResourceIdentifier};

pub use resources::{
    CollectionQuery, Filter, FilterCondition, Lookup, ResourceError, ResourceManager,
};
