//! Workspace-wide constants.

/// Library name.
pub const LIB_NAME: &str = "trakt";

/// Library version.
pub const LIB_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Production API host.
pub const PRODUCTION_API_HOST: &str = "api.trakt.tv";

/// Staging API host.
pub const STAGING_API_HOST: &str = "api-staging.trakt.tv";

/// Production web host (OAuth authorization page).
pub const PRODUCTION_WEB_HOST: &str = "trakt.tv";

/// Staging web host.
pub const STAGING_WEB_HOST: &str = "staging.trakt.tv";

/// Value of the `trakt-api-version` header.
pub const API_VERSION: &str = "2";

/// Default API request timeout in milliseconds.
pub const DEFAULT_API_TIMEOUT_MS: u64 = 30_000;

/// Default number of attempts before a rate-limit error surfaces.
pub const DEFAULT_RETRY_LIMIT: u32 = 3;

/// Default maximum number of concurrent page fetches.
pub const DEFAULT_MAX_CONCURRENT_PAGE_REQUESTS: usize = 10;

/// Backoff applied when the device-token endpoint answers 429.
pub const DEVICE_POLL_BACKOFF_SECS: u64 = 10;

/// Header names exchanged with the API.
pub mod headers {
    /// Carries the client id on every request.
    pub const API_KEY: &str = "trakt-api-key";
    /// Carries the API version on every request.
    pub const API_VERSION: &str = "trakt-api-version";
    /// Response header: 1-based index of the returned page.
    pub const PAGINATION_PAGE: &str = "x-pagination-page";
    /// Response header: total number of pages.
    pub const PAGINATION_PAGE_COUNT: &str = "x-pagination-page-count";
    /// Response header on 429: seconds to wait before retrying.
    pub const RETRY_AFTER: &str = "retry-after";
}
