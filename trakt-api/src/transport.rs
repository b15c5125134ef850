//! HTTP transport abstraction.
//!
//! The request core only needs a single request/response round trip, so
//! the transport is a one-method trait with a production implementation
//! over reqwest and an in-memory mock for tests.

use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use reqwest::{Method, StatusCode, Url};

use trakt_core::error::{TraktError, TraktResult};

/// A fully-formed request, ready for a transport to execute.
#[derive(Debug, Clone)]
pub struct ApiRequest {
    pub method: Method,
    pub url: Url,
    pub headers: HeaderMap,
    /// JSON body bytes, if the endpoint takes one.
    pub body: Option<Vec<u8>>,
}

/// A raw response: status, headers, and body bytes.
///
/// Decoding into typed values happens in the route layer, after the
/// status code has been classified.
#[derive(Debug, Clone)]
pub struct ApiResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: Vec<u8>,
}

/// A single async request/response round trip.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn execute(&self, request: ApiRequest) -> TraktResult<ApiResponse>;
}

/// Production transport over a shared reqwest client.
pub struct HttpTransport {
    client: reqwest::Client,
}

impl HttpTransport {
    /// Build a transport with the given request timeout.
    pub fn new(timeout_ms: u64) -> TraktResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_millis(timeout_ms))
            .connect_timeout(Duration::from_secs(15))
            .pool_max_idle_per_host(5)
            .pool_idle_timeout(Duration::from_secs(90))
            .tcp_keepalive(Duration::from_secs(30))
            .build()
            .map_err(|e| TraktError::Network(format!("failed to build HTTP client: {e}")))?;

        Ok(Self { client })
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn execute(&self, request: ApiRequest) -> TraktResult<ApiResponse> {
        let mut builder = self
            .client
            .request(request.method, request.url)
            .headers(request.headers);
        if let Some(body) = request.body {
            builder = builder.body(body);
        }

        let response = builder
            .send()
            .await
            .map_err(|e| TraktError::Network(e.to_string()))?;

        let status = response.status();
        let headers = response.headers().clone();
        let body = response
            .bytes()
            .await
            .map_err(|e| TraktError::Network(format!("failed to read response body: {e}")))?
            .to_vec();

        Ok(ApiResponse {
            status,
            headers,
            body,
        })
    }
}

/// A canned response for [`MockTransport`], matched by method and URL.
#[derive(Debug, Clone)]
pub struct MockedResponse {
    pub method: Method,
    pub url: String,
    pub status: u16,
    pub headers: Vec<(String, String)>,
    pub body: Vec<u8>,
    /// Artificial latency, for simulating out-of-order completion.
    pub delay: Duration,
}

impl MockedResponse {
    /// A JSON response for the given method and exact URL.
    pub fn json(method: Method, url: impl Into<String>, status: u16, body: &str) -> Self {
        Self {
            method,
            url: url.into(),
            status,
            headers: vec![("content-type".into(), "application/json".into())],
            body: body.as_bytes().to_vec(),
            delay: Duration::ZERO,
        }
    }

    /// Attach a response header.
    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    /// Delay the response by the given duration.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    /// Pagination headers, as sent by paginated endpoints.
    pub fn with_pagination(self, page: u32, page_count: u32) -> Self {
        self.with_header(trakt_core::constants::headers::PAGINATION_PAGE, page.to_string())
            .with_header(
                trakt_core::constants::headers::PAGINATION_PAGE_COUNT,
                page_count.to_string(),
            )
    }
}

/// In-memory test double for [`Transport`].
///
/// Mocks for the same method + URL are consumed in insertion order, with
/// the last one sticky, so a sequence like "429 then 200" takes two
/// entries. Every executed request is recorded for assertions. No real
/// network I/O happens.
#[derive(Default)]
pub struct MockTransport {
    mocks: Mutex<Vec<MockedResponse>>,
    requests: Mutex<Vec<ApiRequest>>,
}

impl MockTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a mocked response.
    pub fn add(&self, mock: MockedResponse) {
        lock(&self.mocks).push(mock);
    }

    /// All requests executed so far, in order.
    pub fn requests(&self) -> Vec<ApiRequest> {
        lock(&self.requests).clone()
    }

    /// Number of executed requests whose URL matches exactly.
    pub fn request_count(&self, url: &str) -> usize {
        lock(&self.requests)
            .iter()
            .filter(|r| r.url.as_str() == url)
            .count()
    }

    fn take_mock(&self, request: &ApiRequest) -> Option<MockedResponse> {
        let mut mocks = lock(&self.mocks);
        let matches: Vec<usize> = mocks
            .iter()
            .enumerate()
            .filter(|(_, m)| m.method == request.method && m.url == request.url.as_str())
            .map(|(i, _)| i)
            .collect();
        match matches.len() {
            0 => None,
            // The last matching mock stays queued and answers repeat requests.
            1 => Some(mocks[matches[0]].clone()),
            _ => Some(mocks.remove(matches[0])),
        }
    }
}

fn lock<T>(mutex: &Mutex<T>) -> std::sync::MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

#[async_trait]
impl Transport for MockTransport {
    async fn execute(&self, request: ApiRequest) -> TraktResult<ApiResponse> {
        lock(&self.requests).push(request.clone());

        let mock = self.take_mock(&request).ok_or_else(|| {
            TraktError::Network(format!(
                "no mocked response for {} {}",
                request.method, request.url
            ))
        })?;

        if !mock.delay.is_zero() {
            tokio::time::sleep(mock.delay).await;
        }

        let status = StatusCode::from_u16(mock.status)
            .map_err(|_| TraktError::Network(format!("invalid mocked status {}", mock.status)))?;

        let mut headers = HeaderMap::new();
        for (name, value) in &mock.headers {
            let name = HeaderName::from_bytes(name.as_bytes())
                .map_err(|_| TraktError::Network(format!("invalid mocked header name {name}")))?;
            let value = HeaderValue::from_str(value)
                .map_err(|_| TraktError::Network("invalid mocked header value".into()))?;
            headers.insert(name, value);
        }

        Ok(ApiResponse {
            status,
            headers,
            body: mock.body.clone(),
        })
    }
}
