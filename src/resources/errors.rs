//! Error types for resource manager operations.
//!
//! A missing resource is not an error here: [`ResourceManager::find`]
//! answers [`Lookup::NotFound`] and a collection crawl treats a 404 as the
//! end of the collection. Everything else propagates unchanged.
//!
//! [`ResourceManager::find`]: crate::resources::ResourceManager::find
//! [`Lookup::NotFound`]: crate::resources::Lookup::NotFound

use crate::clients::HttpError;
use thiserror::Error;

/// Error type for resource manager operations.
///
/// # Example
///
/// ```rust
/// use hiweb_api::resources::ResourceError;
///
/// let error = ResourceError::InvalidFilter {
///     index: 2,
///     reason: "missing 'field'".to_string(),
/// };
/// assert!(error.to_string().contains("condition 2"));
/// ```
#[derive(Debug, Error)]
pub enum ResourceError {
    /// A filter sequence contains an element that is not a condition.
    #[error("Invalid filter: condition {index} {reason}")]
    InvalidFilter {
        /// Position of the offending element.
        index: usize,
        /// What is wrong with it.
        reason: String,
    },

    /// The filter value is neither a condition, a list of conditions nor a map.
    #[error("Invalid filter: expected a condition, a list of conditions or a map, found {found}")]
    UnsupportedFilter {
        /// The JSON type that was provided.
        found: &'static str,
    },

    /// The response to a single-resource call has no single primary resource.
    #[error("Expected a single {resource} resource in the response data")]
    UnexpectedData {
        /// The resource type of the manager.
        resource: String,
    },

    /// The crawl deadline passed before the collection was fully read.
    #[error("Deadline exceeded after {pages_fetched} page(s) of {resource}")]
    DeadlineExceeded {
        /// The resource type of the manager.
        resource: String,
        /// Pages fetched before the deadline.
        pages_fetched: u32,
    },

    /// The request payload could not be serialized.
    #[error("Failed to serialize request payload: {0}")]
    Serialization(#[from] serde_json::Error),

    /// An HTTP-level error occurred.
    #[error(transparent)]
    Http(#[from] HttpError),
}

impl ResourceError {
    /// Returns the HTTP status code, if the failure carried one.
    #[must_use]
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Http(e) => e.status(),
            _ => None,
        }
    }
}
