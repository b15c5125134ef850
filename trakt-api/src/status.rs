//! HTTP status classification and response-header helpers.
//!
//! `classify_status` is the single place where a raw status code becomes
//! a domain error. It is total: every status code maps to exactly one
//! outcome, and 2xx always passes through.

use std::time::Duration;

use reqwest::header::HeaderMap;
use reqwest::{Method, StatusCode};

use trakt_core::constants::headers;
use trakt_core::error::TraktError;

/// Map a status code (plus headers, for the 429 retry-after case) to a
/// pass-through or a specific error variant. Side-effect free.
pub fn classify_status(status: StatusCode, header_map: &HeaderMap) -> Result<(), TraktError> {
    if status.is_success() {
        return Ok(());
    }

    Err(match status.as_u16() {
        400 => TraktError::BadRequest,
        401 => TraktError::Unauthorized,
        403 => TraktError::Forbidden,
        404 => TraktError::NotFound,
        405 => TraktError::MethodNotFound,
        409 => TraktError::Conflict,
        412 => TraktError::PreconditionFailed,
        420 => TraktError::AccountLimitExceeded,
        422 => TraktError::UnprocessableEntity,
        423 => TraktError::AccountLocked,
        426 => TraktError::VipOnly,
        429 => match retry_after(header_map) {
            Some(delay) => TraktError::RetryAfter(delay),
            None => TraktError::RateLimitExceeded,
        },
        500 => TraktError::ServerError,
        502 | 503 | 504 => TraktError::ServerOverloaded,
        code @ (501 | 505..=599) => TraktError::UpstreamGateway(code),
        code => TraktError::Unhandled(code),
    })
}

/// Parse the numeric `retry-after` header, if present.
pub fn retry_after(header_map: &HeaderMap) -> Option<Duration> {
    header_map
        .get(headers::RETRY_AFTER)?
        .to_str()
        .ok()?
        .trim()
        .parse::<u64>()
        .ok()
        .map(Duration::from_secs)
}

/// Extract `(current_page, page_count)` from pagination headers.
/// Missing or unparseable headers read as 0, matching the wire contract
/// of non-paginated responses.
pub fn pagination_headers(header_map: &HeaderMap) -> (u32, u32) {
    let parse = |name: &str| {
        header_map
            .get(name)
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.trim().parse::<u32>().ok())
            .unwrap_or(0)
    };
    (
        parse(headers::PAGINATION_PAGE),
        parse(headers::PAGINATION_PAGE_COUNT),
    )
}

/// The success status each method conventionally returns.
pub fn expected_status(method: &Method) -> StatusCode {
    match *method {
        Method::POST => StatusCode::CREATED,
        Method::DELETE => StatusCode::NO_CONTENT,
        _ => StatusCode::OK,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use reqwest::header::{HeaderName, HeaderValue};

    fn empty() -> HeaderMap {
        HeaderMap::new()
    }

    #[test]
    fn test_classification_is_total() {
        // Every status code in 100-599 maps to exactly one outcome.
        let headers = empty();
        for code in 100u16..=599 {
            let status = StatusCode::from_u16(code).unwrap();
            let outcome = classify_status(status, &headers);
            if (200..300).contains(&code) {
                assert!(outcome.is_ok(), "status {code} should pass through");
            } else {
                assert!(outcome.is_err(), "status {code} should classify as an error");
            }
        }
    }

    #[test]
    fn test_specific_mappings() {
        let headers = empty();
        let classify = |code: u16| classify_status(StatusCode::from_u16(code).unwrap(), &headers);

        assert!(matches!(classify(400), Err(TraktError::BadRequest)));
        assert!(matches!(classify(401), Err(TraktError::Unauthorized)));
        assert!(matches!(classify(403), Err(TraktError::Forbidden)));
        assert!(matches!(classify(404), Err(TraktError::NotFound)));
        assert!(matches!(classify(405), Err(TraktError::MethodNotFound)));
        assert!(matches!(classify(409), Err(TraktError::Conflict)));
        assert!(matches!(classify(412), Err(TraktError::PreconditionFailed)));
        assert!(matches!(classify(420), Err(TraktError::AccountLimitExceeded)));
        assert!(matches!(classify(422), Err(TraktError::UnprocessableEntity)));
        assert!(matches!(classify(423), Err(TraktError::AccountLocked)));
        assert!(matches!(classify(426), Err(TraktError::VipOnly)));
        assert!(matches!(classify(500), Err(TraktError::ServerError)));
        assert!(matches!(classify(502), Err(TraktError::ServerOverloaded)));
        assert!(matches!(classify(503), Err(TraktError::ServerOverloaded)));
        assert!(matches!(classify(504), Err(TraktError::ServerOverloaded)));
        assert!(matches!(classify(520), Err(TraktError::UpstreamGateway(520))));
        assert!(matches!(classify(418), Err(TraktError::Unhandled(418))));
    }

    #[test]
    fn test_rate_limit_with_retry_after() {
        let mut map = HeaderMap::new();
        map.insert(
            HeaderName::from_static(headers::RETRY_AFTER),
            HeaderValue::from_static("7"),
        );
        let outcome = classify_status(StatusCode::TOO_MANY_REQUESTS, &map);
        assert!(matches!(
            outcome,
            Err(TraktError::RetryAfter(d)) if d == Duration::from_secs(7)
        ));
    }

    #[test]
    fn test_rate_limit_without_retry_after() {
        let outcome = classify_status(StatusCode::TOO_MANY_REQUESTS, &empty());
        assert!(matches!(outcome, Err(TraktError::RateLimitExceeded)));
    }

    #[test]
    fn test_rate_limit_with_unparseable_retry_after() {
        let mut map = HeaderMap::new();
        map.insert(
            HeaderName::from_static(headers::RETRY_AFTER),
            HeaderValue::from_static("soon"),
        );
        let outcome = classify_status(StatusCode::TOO_MANY_REQUESTS, &map);
        assert!(matches!(outcome, Err(TraktError::RateLimitExceeded)));
    }

    #[test]
    fn test_pagination_headers() {
        let mut map = HeaderMap::new();
        map.insert(
            HeaderName::from_static(headers::PAGINATION_PAGE),
            HeaderValue::from_static("2"),
        );
        map.insert(
            HeaderName::from_static(headers::PAGINATION_PAGE_COUNT),
            HeaderValue::from_static("10"),
        );
        assert_eq!(pagination_headers(&map), (2, 10));
        assert_eq!(pagination_headers(&empty()), (0, 0));
    }

    #[test]
    fn test_expected_status_per_method() {
        assert_eq!(expected_status(&Method::GET), StatusCode::OK);
        assert_eq!(expected_status(&Method::POST), StatusCode::CREATED);
        assert_eq!(expected_status(&Method::PUT), StatusCode::OK);
        assert_eq!(expected_status(&Method::DELETE), StatusCode::NO_CONTENT);
    }
}
