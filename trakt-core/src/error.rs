//! Global error types for the Trakt client.
//!
//! All error categories across the workspace are unified into a single
//! `TraktError` enum with conversions from underlying library errors.
//! HTTP-classified variants map one-to-one onto the status codes the
//! Trakt API documents, so callers can handle every failure exhaustively.

use std::time::Duration;

use thiserror::Error;

/// Convenience type alias for Results using TraktError.
pub type TraktResult<T> = Result<T, TraktError>;

/// Unified error type covering all error categories in the Trakt client.
#[derive(Error, Debug)]
pub enum TraktError {
    // -- Configuration errors --
    /// Failed to load or parse configuration.
    #[error("configuration error: {0}")]
    Config(String),

    /// Client id or client secret is missing.
    #[error("missing client credentials")]
    MissingClientInfo,

    /// Path and query could not be combined into a valid URL.
    #[error("malformed url: {0}")]
    MalformedUrl(String),

    /// File system operation failed (auth state persistence).
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    // -- Authorization errors --
    /// An authorized request was built without a cached access token.
    #[error("user is not authorized; sign in with Trakt first")]
    UserNotAuthorized,

    /// The refresh token was rejected; the user must re-authenticate.
    #[error("invalid refresh token; sign in with Trakt again")]
    InvalidRefreshToken,

    /// The authentication store reported a failure.
    #[error(transparent)]
    Authentication(#[from] AuthenticationError),

    // -- HTTP-classified errors --
    /// Success with an empty body (204 or empty 2xx); nothing to decode.
    #[error("no content")]
    NoContent,

    /// Bad Request (400) - request couldn't be parsed.
    #[error("request could not be parsed")]
    BadRequest,

    /// Unauthorized (401) - OAuth must be provided.
    #[error("unauthorized; please sign in with Trakt")]
    Unauthorized,

    /// Forbidden (403) - invalid API key or unapproved app.
    #[error("forbidden; invalid API key or unapproved app")]
    Forbidden,

    /// Not Found (404) - method exists, but no record found.
    #[error("no record found")]
    NotFound,

    /// Method Not Found (405) - method doesn't exist.
    #[error("method not found")]
    MethodNotFound,

    /// Conflict (409) - resource already created.
    #[error("resource has already been created")]
    Conflict,

    /// Precondition Failed (412) - use application/json content type.
    #[error("invalid content type")]
    PreconditionFailed,

    /// Account Limit Exceeded (420) - list count, item count, etc.
    #[error("account limit exceeded; see Trakt.tv for account limits")]
    AccountLimitExceeded,

    /// Unprocessable Entity (422) - validation errors.
    #[error("invalid entity")]
    UnprocessableEntity,

    /// Account locked (423) - user must contact Trakt support.
    #[error("account locked; contact Trakt support to unlock")]
    AccountLocked,

    /// VIP Only (426) - user must upgrade to VIP.
    #[error("this feature requires Trakt VIP")]
    VipOnly,

    /// Rate Limit Exceeded (429) with a server-specified retry interval.
    #[error("rate limited; retry after {0:?}")]
    RetryAfter(Duration),

    /// Rate Limit Exceeded (429), retry interval absent or unparseable.
    #[error("rate limited; please try again in a minute")]
    RateLimitExceeded,

    /// Server Error (500).
    #[error("Trakt.tv server error; please try again later")]
    ServerError,

    /// Service Unavailable (502 / 503 / 504) - server overloaded.
    #[error("Trakt.tv is overloaded; try again in 30 seconds")]
    ServerOverloaded,

    /// Any other 5xx - upstream gateway error.
    #[error("upstream gateway error (status {0})")]
    UpstreamGateway(u16),

    /// Any status code outside the documented set.
    #[error("unhandled response (status {0})")]
    Unhandled(u16),

    // -- Transport / decoding errors --
    /// The HTTP transport failed before a status code was available.
    #[error("network error: {0}")]
    Network(String),

    /// Payload present but does not match the expected shape.
    #[error("decode error: {0}")]
    Decode(#[from] serde_json::Error),

    // -- Device-code flow --
    /// Polling for a device access token failed.
    #[error(transparent)]
    TokenPoll(#[from] TokenPollError),
}

/// Failures reported by an authentication state store.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AuthenticationError {
    /// A token was found, but is past its expiration date.
    #[error("stored access token has expired")]
    TokenExpired {
        /// The stored refresh token, usable for a token exchange.
        refresh_token: String,
    },

    /// No credentials could be retrieved from the store.
    #[error("no stored credentials")]
    NoStoredCredentials,
}

/// Errors surfaced while polling for a device access token.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TokenPollError {
    /// 404 - the device code is invalid.
    #[error("invalid device code")]
    InvalidDeviceCode,

    /// 409 - the device code has already been approved.
    #[error("device code already used")]
    AlreadyUsed,

    /// 410 - the device code expired, or the polling window elapsed.
    #[error("device code expired; restart the activation process")]
    Expired,

    /// 418 - the user explicitly denied the device code.
    #[error("user denied the device code")]
    Denied,

    /// Any status code outside the documented polling set.
    #[error("unexpected status code {0} while polling")]
    UnexpectedStatus(u16),

    /// 200 without a decodable token payload.
    #[error("token endpoint returned success without an access token")]
    MissingAccessToken,
}

impl From<toml::de::Error> for TraktError {
    fn from(e: toml::de::Error) -> Self {
        TraktError::Config(e.to_string())
    }
}

impl From<toml::ser::Error> for TraktError {
    fn from(e: toml::ser::Error) -> Self {
        TraktError::Config(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = TraktError::Config("bad value".to_string());
        assert_eq!(err.to_string(), "configuration error: bad value");
    }

    #[test]
    fn test_authentication_error_carries_refresh_token() {
        let err = AuthenticationError::TokenExpired {
            refresh_token: "r".into(),
        };
        match err {
            AuthenticationError::TokenExpired { refresh_token } => {
                assert_eq!(refresh_token, "r")
            }
            _ => panic!("wrong variant"),
        }
    }

    #[test]
    fn test_token_poll_error_from() {
        let err: TraktError = TokenPollError::Denied.into();
        assert_eq!(err.to_string(), "user denied the device code");
    }

    #[test]
    fn test_retry_after_display() {
        let err = TraktError::RetryAfter(Duration::from_secs(2));
        assert!(err.to_string().contains("retry after"));
    }
}
