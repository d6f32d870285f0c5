//! Resource managers: CRUD for one resource type plus collection crawling.
//!
//! - **[`ResourceManager`]**: create, update, find, delete and the paginated
//!   collection fetch [`ResourceManager::get`]
//! - **[`CollectionQuery`]**: filter, sort, page size, page cap and deadline
//!   of a crawl
//! - **[`Filter`]** and **[`FilterCondition`]**: the filter sent in the
//!   `query` header
//! - **[`Lookup`]**: the found / not-found answer of a point lookup
//! - **[`ResourceError`]**: errors of resource operations
//!
//! # Crawling
//!
//! The backend signals the end of a collection in two ways: a page shorter
//! than the requested limit, and a page without a `next` link. Either one
//! stops the crawl. A 404 on a page request also ends it. The page cap
//! (`max_crawl_pages`, default 1, 0 for none) bounds it from above.
//!
//! ```rust,ignore
//! use hiweb_api::resources::{CollectionQuery, Filter, ResourceManager};
//! use serde_json::json;
//!
//! let products = ResourceManager::new("products", client);
//! let query = CollectionQuery::new()
//!     .filter(Filter::from_value(json!({"vendor": "Acme"}))?)
//!     .sort("title")
//!     .max_crawl_pages(0);
//!
//! let document = products.get(&query).await?;
//! println!("{} products", document.resources().len());
//! ```

mod errors;
mod filter;
mod manager;
mod query;

pub use errors::ResourceError;
pub use filter::{Filter, FilterCondition};
pub use manager::{Lookup, ResourceManager, FILTER_HEADER};
pub use query::{CollectionQuery, MAX_PAGE_LIMIT};
