//! Resource manager: single-resource calls and the collection crawl.

use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use tokio::time::Instant;

use crate::clients::{ApiClient, ApiResponse, HttpError, RequestOptions};
use crate::document::{self, Document, JsonMap, Relationship, Resource};
use crate::resources::{CollectionQuery, Filter, ResourceError};

/// Header that carries the serialized filter of a collection request.
pub const FILTER_HEADER: &str = "query";

/// Result of a point lookup.
#[derive(Clone, Debug, PartialEq)]
pub enum Lookup {
    /// The server returned the resource.
    Found(Document),
    /// The server answered 404.
    NotFound,
}

impl Lookup {
    /// Returns `true` for [`Lookup::Found`].
    #[must_use]
    pub const fn is_found(&self) -> bool {
        matches!(self, Self::Found(_))
    }

    /// Returns the document, if found.
    #[must_use]
    pub fn into_document(self) -> Option<Document> {
        match self {
            Self::Found(document) => Some(document),
            Self::NotFound => None,
        }
    }

    /// Returns the primary resource, if found.
    #[must_use]
    pub fn into_resource(self) -> Option<Resource> {
        self.into_document().and_then(Document::into_resource)
    }
}

/// CRUD operations and collection crawling for one resource type.
///
/// The type is fixed at construction; every payload this manager sends
/// carries it.
///
/// # Example
///
/// ```rust,ignore
/// use std::collections::BTreeMap;
/// use std::sync::Arc;
/// use hiweb_api::document::JsonMap;
/// use hiweb_api::resources::{CollectionQuery, Filter, Lookup, ResourceManager};
/// use serde_json::json;
///
/// let products = ResourceManager::new("products", Arc::new(client));
///
/// let mut attributes = JsonMap::new();
/// attributes.insert("title".to_string(), json!("Lamp"));
/// let created = products
///     .create(attributes, BTreeMap::new(), JsonMap::new())
///     .await?;
///
/// let everything = products
///     .get(&CollectionQuery::new().filter(Filter::condition("vendor", "Acme")).max_crawl_pages(0))
///     .await?;
///
/// match products.find("15").await? {
///     Lookup::Found(document) => println!("{:?}", document.resource()),
///     Lookup::NotFound => println!("gone"),
/// }
/// ```
#[derive(Clone, Debug)]
pub struct ResourceManager {
    kind: String,
    client: Arc<ApiClient>,
}

const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<ResourceManager>();
};

impl ResourceManager {
    /// Creates a manager for `kind` (e.g. `"products"`), which is also the
    /// collection endpoint.
    #[must_use]
    pub fn new(kind: impl Into<String>, client: Arc<ApiClient>) -> Self {
        Self {
            kind: kind.into(),
            client,
        }
    }

    /// Returns the resource type.
    #[must_use]
    pub fn kind(&self) -> &str {
        &self.kind
    }

    /// Creates a resource.
    ///
    /// Empty `attributes`, `relationships` and `meta` are left out of the
    /// payload.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::Http`] for request failures and
    /// [`ResourceError::UnexpectedData`] if the response has no single
    /// primary resource.
    pub async fn create(
        &self,
        attributes: JsonMap,
        relationships: BTreeMap<String, Relationship>,
        meta: JsonMap,
    ) -> Result<Resource, ResourceError> {
        let payload = self.payload(None, attributes, relationships, meta);
        let options = RequestOptions::new().json(document::to_value(&Document::single(payload))?);

        let response = self.client.post(&self.kind, options).await?;
        response
            .document
            .into_resource()
            .ok_or_else(|| self.unexpected_data())
    }

    /// Updates the resource `id`.
    ///
    /// A `204 No Content` answer means the server took the update as sent,
    /// so the sent resource is returned.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::Http`] for request failures.
    pub async fn update(
        &self,
        id: &str,
        attributes: JsonMap,
        relationships: BTreeMap<String, Relationship>,
        meta: JsonMap,
    ) -> Result<Resource, ResourceError> {
        let payload = self.payload(Some(id), attributes, relationships, meta);
        let options = RequestOptions::new().json(document::to_value(&Document::single(payload.clone()))?);

        let response = self.client.patch(&self.member_path(id), options).await?;
        match response.document.data {
            None if response.response.code == 204 => Ok(payload),
            _ => response
                .document
                .into_resource()
                .ok_or_else(|| self.unexpected_data()),
        }
    }

    /// Looks up the resource `id`.
    ///
    /// The whole response document is kept so that side-loaded `included`
    /// resources and top-level `meta` stay available;
    /// [`Lookup::into_resource`] gives just the primary resource.
    ///
    /// # Errors
    ///
    /// A 404 is [`Lookup::NotFound`], not an error. Any other failure is
    /// returned as [`ResourceError::Http`].
    pub async fn find(&self, id: &str) -> Result<Lookup, ResourceError> {
        match self.client.get(&self.member_path(id), RequestOptions::new()).await {
            Ok(response) => Ok(Lookup::Found(response.document)),
            Err(e) if e.is_not_found() => Ok(Lookup::NotFound),
            Err(e) => Err(e.into()),
        }
    }

    /// Deletes the resource `id` and returns the response document, which
    /// is empty when the server answers `204 No Content`.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::Http`] for request failures.
    pub async fn delete(&self, id: &str) -> Result<Document, ResourceError> {
        let response = self
            .client
            .delete(&self.member_path(id), RequestOptions::new())
            .await?;
        Ok(response.document)
    }

    /// Crawls the collection and returns every page folded into one document.
    ///
    /// Pages are requested one after another with `page`, `limit` and
    /// `sort` query parameters and the filter in the [`FILTER_HEADER`]
    /// header. The crawl stops after a page that is shorter than the limit,
    /// after a page without a `next` link, or once the page counter (the
    /// next page number to request) reaches `max_crawl_pages`, whichever
    /// comes first. A 404 ends the collection.
    ///
    /// Starting from page 1, a cap of 1 fetches one page and a cap of
    /// `n > 1` fetches `n - 1` pages.
    ///
    /// Meta objects are merged shallowly; a key repeated on a later page
    /// replaces the earlier value.
    ///
    /// # Errors
    ///
    /// Any failure other than a 404 aborts the crawl, and nothing fetched so
    /// far is returned. [`ResourceError::DeadlineExceeded`] is returned when
    /// the query's deadline passes.
    pub async fn get(&self, query: &CollectionQuery) -> Result<Document, ResourceError> {
        let filter = query.filter_ref().to_query()?;
        let mut state = PageState::new(query.first_page(), query.effective_limit());

        let stop = loop {
            let mut options = RequestOptions::new()
                .query_param("page", state.page.to_string())
                .query_param("limit", state.limit.to_string());
            if let Some(sort) = query.sort_ref() {
                options = options.query_param("sort", sort);
            }
            if let Some(filter) = &filter {
                options = options.header(FILTER_HEADER, filter.clone());
            }

            tracing::debug!(resource = %self.kind, page = state.page, limit = state.limit, "fetching collection page");

            let response = match self.fetch_page(options, query.deadline_at(), &state).await? {
                Ok(response) => response,
                Err(e) if e.is_not_found() => break Stop::EndOfCollection,
                Err(e) => return Err(e.into()),
            };

            let has_next = response.document.has_next_link();
            let received = state.absorb(response.document);

            if received < state.limit as usize {
                break Stop::ShortPage;
            }
            if !has_next {
                break Stop::NoNextLink;
            }
            if query.page_cap() != 0 && state.page >= query.page_cap() {
                break Stop::PageCap;
            }
        };

        tracing::debug!(
            resource = %self.kind,
            %stop,
            pages = state.pages_fetched,
            resources = state.data.len(),
            included = state.included.len(),
            "collection crawl finished"
        );
        Ok(state.into_document())
    }

    /// Crawls the whole collection matching `filter` with the largest page size.
    ///
    /// # Errors
    ///
    /// See [`ResourceManager::get`].
    pub async fn all(&self, filter: impl Into<Filter>) -> Result<Document, ResourceError> {
        self.get(&CollectionQuery::new().filter(filter).max_crawl_pages(0))
            .await
    }

    /// Sends one page request, bounded by the deadline when there is one.
    ///
    /// The outer error is the deadline; the inner result is the request.
    async fn fetch_page(
        &self,
        options: RequestOptions,
        deadline: Option<Instant>,
        state: &PageState,
    ) -> Result<Result<ApiResponse, HttpError>, ResourceError> {
        let request = self.client.get(&self.kind, options);
        let Some(deadline) = deadline else {
            return Ok(request.await);
        };

        let expired = || ResourceError::DeadlineExceeded {
            resource: self.kind.clone(),
            pages_fetched: state.pages_fetched,
        };
        if Instant::now() >= deadline {
            return Err(expired());
        }
        tokio::time::timeout_at(deadline, request)
            .await
            .map_err(|_| expired())
    }

    fn member_path(&self, id: &str) -> String {
        format!("{}/{}", self.kind, urlencoding::encode(id))
    }

    fn payload(
        &self,
        id: Option<&str>,
        attributes: JsonMap,
        relationships: BTreeMap<String, Relationship>,
        meta: JsonMap,
    ) -> Resource {
        Resource {
            kind: self.kind.clone(),
            id: id.map(ToString::to_string),
            attributes,
            relationships,
            meta,
            links: JsonMap::new(),
        }
    }

    fn unexpected_data(&self) -> ResourceError {
        ResourceError::UnexpectedData {
            resource: self.kind.clone(),
        }
    }
}

/// Why a crawl stopped.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Stop {
    ShortPage,
    NoNextLink,
    PageCap,
    EndOfCollection,
}

impl fmt::Display for Stop {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ShortPage => write!(f, "short page"),
            Self::NoNextLink => write!(f, "no next link"),
            Self::PageCap => write!(f, "page cap reached"),
            Self::EndOfCollection => write!(f, "end of collection"),
        }
    }
}

/// Accumulated state of one crawl.
#[derive(Debug)]
struct PageState {
    page: u32,
    limit: u32,
    pages_fetched: u32,
    data: Vec<Resource>,
    included: Vec<Resource>,
    meta: JsonMap,
}

impl PageState {
    fn new(page: u32, limit: u32) -> Self {
        Self {
            page,
            limit,
            pages_fetched: 0,
            data: Vec::new(),
            included: Vec::new(),
            meta: JsonMap::new(),
        }
    }

    /// Folds one page into the state and returns how many primary
    /// resources it held.
    fn absorb(&mut self, mut page: Document) -> usize {
        self.page = self.page.saturating_add(1);
        self.pages_fetched += 1;

        let included = std::mem::take(&mut page.included);
        let meta = std::mem::take(&mut page.meta);
        let resources = page.into_resources();
        let received = resources.len();
        self.data.extend(resources);
        self.included.extend(included);

        for (key, value) in meta {
            if self.meta.insert(key.clone(), value).is_some() {
                tracing::debug!(%key, "meta key overwritten by a later page");
            }
        }
        received
    }

    fn into_document(self) -> Document {
        Document {
            included: self.included,
            meta: self.meta,
            ..Document::collection(self.data)
        }
    }
}
