//! Typed request builders.
//!
//! A [`Route`] is an immutable description of a single API call, tagged
//! with the type it decodes into. Builder methods take `self` by value
//! and return a modified copy, so a base route can be stored and
//! branched without interior mutation.

use std::collections::BTreeMap;
use std::marker::PhantomData;

use reqwest::Method;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

use trakt_core::error::{TraktError, TraktResult};

use crate::client::TraktClient;
use crate::query::{ExtendedType, Filter, SearchType};
use crate::status;
use crate::transport::ApiRequest;

/// A request description bound to a client, decoding into `T`.
pub struct Route<T> {
    pub(crate) client: TraktClient,
    pub(crate) path: String,
    pub(crate) method: Method,
    /// Endpoint-fixed query parameters. BTreeMap keeps URL serialization
    /// deterministic for a given route.
    pub(crate) query: BTreeMap<String, String>,
    pub(crate) body: Option<Value>,
    pub(crate) requires_authentication: bool,
    pub(crate) extended: Vec<ExtendedType>,
    pub(crate) page: Option<u32>,
    pub(crate) limit: Option<u32>,
    pub(crate) filters: Vec<Filter>,
    pub(crate) search_type: Option<SearchType>,
    pub(crate) search_query: Option<String>,
    pub(crate) _result: PhantomData<fn() -> T>,
}

impl<T> Clone for Route<T> {
    fn clone(&self) -> Self {
        Self {
            client: self.client.clone(),
            path: self.path.clone(),
            method: self.method.clone(),
            query: self.query.clone(),
            body: self.body.clone(),
            requires_authentication: self.requires_authentication,
            extended: self.extended.clone(),
            page: self.page,
            limit: self.limit,
            filters: self.filters.clone(),
            search_type: self.search_type,
            search_query: self.search_query.clone(),
            _result: PhantomData,
        }
    }
}

impl<T> Route<T> {
    pub(crate) fn new(
        client: &TraktClient,
        path: impl Into<String>,
        method: Method,
        requires_authentication: bool,
    ) -> Self {
        Self {
            client: client.clone(),
            path: path.into(),
            method,
            query: BTreeMap::new(),
            body: None,
            requires_authentication,
            extended: Vec::new(),
            page: None,
            limit: None,
            filters: Vec::new(),
            search_type: None,
            search_query: None,
            _result: PhantomData,
        }
    }

    /// Build a path from segments, skipping `None` entries.
    pub(crate) fn from_segments(
        client: &TraktClient,
        segments: impl IntoIterator<Item = Option<String>>,
        method: Method,
        requires_authentication: bool,
    ) -> Self {
        let path = segments
            .into_iter()
            .flatten()
            .collect::<Vec<_>>()
            .join("/");
        Self::new(client, path, method, requires_authentication)
    }

    /// Pin a fixed query parameter on the endpoint.
    pub(crate) fn with_query(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.query.insert(key.into(), value.into());
        self
    }

    /// Attach a JSON body.
    pub(crate) fn with_body<B: Serialize>(mut self, body: &B) -> TraktResult<Self> {
        self.body = Some(serde_json::to_value(body)?);
        Ok(self)
    }

    /// Request the given detail levels (`extended=` parameter).
    pub fn extend(mut self, levels: &[ExtendedType]) -> Self {
        self.extended.extend_from_slice(levels);
        self
    }

    /// Request a specific page of a paginated endpoint.
    pub fn page(mut self, page: u32) -> Self {
        self.page = Some(page);
        self
    }

    /// Set the page size of a paginated endpoint.
    pub fn limit(mut self, limit: u32) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Add a server-side result filter.
    pub fn filter(mut self, filter: Filter) -> Self {
        self.filters.push(filter);
        self
    }

    /// Restrict search results to one entity kind.
    pub fn search_type(mut self, search_type: SearchType) -> Self {
        self.search_type = Some(search_type);
        self
    }

    /// Set the free-text search query.
    pub fn query(mut self, query: impl Into<String>) -> Self {
        self.search_query = Some(query.into());
        self
    }

    /// Merge fixed and builder-supplied parameters into the final query
    /// map. Builder parameters win on key collision.
    pub(crate) fn final_query(&self) -> BTreeMap<String, String> {
        let mut merged = self.query.clone();
        if !self.extended.is_empty() {
            merged.insert("extended".into(), ExtendedType::join(&self.extended));
        }
        if let Some(page) = self.page {
            merged.insert("page".into(), page.to_string());
        }
        if let Some(limit) = self.limit {
            merged.insert("limit".into(), limit.to_string());
        }
        if let Some(search_type) = self.search_type {
            merged.insert("type".into(), search_type.as_str().into());
        }
        if let Some(query) = &self.search_query {
            merged.insert("query".into(), query.clone());
        }
        for filter in &self.filters {
            let (key, value) = filter.pair();
            merged.insert(key.into(), value);
        }
        merged
    }

    pub(crate) async fn build_request(&self) -> TraktResult<ApiRequest> {
        self.client
            .build_request(
                &self.path,
                &self.final_query(),
                self.requires_authentication,
                self.method.clone(),
                self.body.as_ref(),
            )
            .await
    }
}

impl<T: DeserializeOwned> Route<T> {
    /// Execute the request with the client's configured retry limit and
    /// decode the response body.
    pub async fn perform(self) -> TraktResult<T> {
        let retry_limit = self.client.retry_limit();
        self.perform_with_retry(retry_limit).await
    }

    /// Execute with an explicit bound on rate-limit retry attempts.
    pub async fn perform_with_retry(self, retry_limit: u32) -> TraktResult<T> {
        let request = self.build_request().await?;
        let response = self.client.fetch(request, retry_limit).await?;
        if response.body.is_empty() {
            return Err(TraktError::NoContent);
        }
        Ok(serde_json::from_slice(&response.body)?)
    }
}

/// A request whose success response carries no payload.
#[derive(Clone)]
pub struct EmptyRoute {
    inner: Route<()>,
}

impl EmptyRoute {
    pub(crate) fn new(
        client: &TraktClient,
        path: impl Into<String>,
        method: Method,
        requires_authentication: bool,
    ) -> Self {
        Self {
            inner: Route::new(client, path, method, requires_authentication),
        }
    }

    pub(crate) fn with_body<B: Serialize>(mut self, body: &B) -> TraktResult<Self> {
        self.inner = self.inner.with_body(body)?;
        Ok(self)
    }

    /// Execute the request, succeeding on any 2xx.
    pub async fn perform(self) -> TraktResult<()> {
        let retry_limit = self.inner.client.retry_limit();
        self.perform_with_retry(retry_limit).await
    }

    pub async fn perform_with_retry(self, retry_limit: u32) -> TraktResult<()> {
        let request = self.inner.build_request().await?;
        self.inner.client.fetch(request, retry_limit).await?;
        Ok(())
    }
}

/// One decoded page of a paginated endpoint, with its position in the
/// full result set.
#[derive(Debug, Clone, PartialEq)]
pub struct Paged<T> {
    pub items: Vec<T>,
    pub current_page: u32,
    pub page_count: u32,
}

/// A request against a paginated endpoint, decoding each page into
/// `Vec<T>` plus pagination headers.
///
/// Single-page fetches go through [`PagedRoute::perform`]; whole-result
/// fetches and streaming live in the pagination module.
pub struct PagedRoute<T> {
    pub(crate) inner: Route<Vec<T>>,
}

impl<T> Clone for PagedRoute<T> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
        }
    }
}

impl<T> PagedRoute<T> {
    pub(crate) fn new(
        client: &TraktClient,
        path: impl Into<String>,
        method: Method,
        requires_authentication: bool,
    ) -> Self {
        Self {
            inner: Route::new(client, path, method, requires_authentication),
        }
    }

    pub(crate) fn from_segments(
        client: &TraktClient,
        segments: impl IntoIterator<Item = Option<String>>,
        method: Method,
        requires_authentication: bool,
    ) -> Self {
        Self {
            inner: Route::from_segments(client, segments, method, requires_authentication),
        }
    }

    pub(crate) fn with_query(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.inner = self.inner.with_query(key, value);
        self
    }

    pub fn extend(mut self, levels: &[ExtendedType]) -> Self {
        self.inner = self.inner.extend(levels);
        self
    }

    pub fn page(mut self, page: u32) -> Self {
        self.inner = self.inner.page(page);
        self
    }

    pub fn limit(mut self, limit: u32) -> Self {
        self.inner = self.inner.limit(limit);
        self
    }

    pub fn filter(mut self, filter: Filter) -> Self {
        self.inner = self.inner.filter(filter);
        self
    }

    pub fn search_type(mut self, search_type: SearchType) -> Self {
        self.inner = self.inner.search_type(search_type);
        self
    }

    pub fn query(mut self, query: impl Into<String>) -> Self {
        self.inner = self.inner.query(query);
        self
    }
}

impl<T: DeserializeOwned> PagedRoute<T> {
    /// Fetch the page selected by the builder (`page`/`limit`) together
    /// with the server's pagination headers.
    pub async fn perform(self) -> TraktResult<Paged<T>> {
        let retry_limit = self.inner.client.retry_limit();
        self.perform_with_retry(retry_limit).await
    }

    pub async fn perform_with_retry(self, retry_limit: u32) -> TraktResult<Paged<T>> {
        let request = self.inner.build_request().await?;
        let response = self.inner.client.fetch(request, retry_limit).await?;
        if response.body.is_empty() {
            return Err(TraktError::NoContent);
        }
        let (current_page, page_count) = status::pagination_headers(&response.headers);
        let items: Vec<T> = serde_json::from_slice(&response.body)?;
        Ok(Paged {
            items,
            current_page,
            page_count,
        })
    }
}
