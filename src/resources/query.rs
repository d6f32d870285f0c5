//! Options of a collection crawl.

use tokio::time::Instant;

use crate::resources::Filter;

/// Largest page size the backend serves.
pub const MAX_PAGE_LIMIT: u32 = 100;

/// Options for [`ResourceManager::get`](crate::resources::ResourceManager::get).
///
/// # Defaults
///
/// - `filter`: empty
/// - `sort`: none
/// - `start_page`: 1
/// - `limit`: [`MAX_PAGE_LIMIT`]
/// - `max_crawl_pages`: 1 (0 means no cap), compared with the page counter
/// - `deadline`: none
///
/// # Example
///
/// ```rust
/// use hiweb_api::resources::{CollectionQuery, Filter};
///
/// let query = CollectionQuery::new()
///     .filter(Filter::condition("status", "active"))
///     .sort("-created_at")
///     .limit(250)
///     .max_crawl_pages(0);
///
/// assert_eq!(query.effective_limit(), 100);
/// ```
#[derive(Clone, Debug)]
pub struct CollectionQuery {
    filter: Filter,
    sort: Option<String>,
    start_page: u32,
    limit: u32,
    max_crawl_pages: u32,
    deadline: Option<Instant>,
}

impl Default for CollectionQuery {
    fn default() -> Self {
        Self {
            filter: Filter::default(),
            sort: None,
            start_page: 1,
            limit: MAX_PAGE_LIMIT,
            max_crawl_pages: 1,
            deadline: None,
        }
    }
}

impl CollectionQuery {
    /// Creates a query with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the filter.
    #[must_use]
    pub fn filter(mut self, filter: impl Into<Filter>) -> Self {
        self.filter = filter.into();
        self
    }

    /// Sets the sort expression, sent verbatim as the `sort` parameter.
    #[must_use]
    pub fn sort(mut self, sort: impl Into<String>) -> Self {
        self.sort = Some(sort.into());
        self
    }

    /// Sets the first page to request. Values below 1 are read as 1.
    #[must_use]
    pub fn start_page(mut self, page: u32) -> Self {
        self.start_page = page.max(1);
        self
    }

    /// Sets the page size. Clamped to `1..=100` when the crawl runs.
    #[must_use]
    pub const fn limit(mut self, limit: u32) -> Self {
        self.limit = limit;
        self
    }

    /// Stops the crawl once the page counter reaches `pages`; 0 crawls until
    /// the collection ends. The counter is the next page number to request,
    /// so from page 1 a cap of `n > 1` fetches `n - 1` pages.
    #[must_use]
    pub const fn max_crawl_pages(mut self, pages: u32) -> Self {
        self.max_crawl_pages = pages;
        self
    }

    /// Aborts the crawl once `deadline` passes.
    #[must_use]
    pub const fn deadline(mut self, deadline: Instant) -> Self {
        self.deadline = Some(deadline);
        self
    }

    /// Returns the filter.
    #[must_use]
    pub const fn filter_ref(&self) -> &Filter {
        &self.filter
    }

    /// Returns the sort expression.
    #[must_use]
    pub fn sort_ref(&self) -> Option<&str> {
        self.sort.as_deref()
    }

    /// Returns the first page to request.
    #[must_use]
    pub const fn first_page(&self) -> u32 {
        self.start_page
    }

    /// Returns the page size actually sent.
    #[must_use]
    pub fn effective_limit(&self) -> u32 {
        self.limit.clamp(1, MAX_PAGE_LIMIT)
    }

    /// Returns the page cap (0 = none).
    #[must_use]
    pub const fn page_cap(&self) -> u32 {
        self.max_crawl_pages
    }

    /// Returns the deadline, if any.
    #[must_use]
    pub const fn deadline_at(&self) -> Option<Instant> {
        self.deadline
    }
}
