//! Retry-engine behavior against rate-limit responses.
//!
//! These run with a paused clock so the retry sleeps auto-advance.

mod common;

use std::time::Duration;

use reqwest::Method;

use common::test_client;
use trakt_api::MockedResponse;
use trakt_core::error::TraktError;

const URL: &str = "https://api.trakt.tv/movies/tron-legacy-2010";
const MOVIE: &str = r#"{"title": "TRON: Legacy", "year": 2010, "ids": {"trakt": 1}}"#;

fn rate_limited() -> MockedResponse {
    MockedResponse::json(Method::GET, URL, 429, "").with_header("retry-after", "1")
}

#[tokio::test(start_paused = true)]
async fn test_persistent_rate_limit_stops_after_limit_attempts() {
    let (client, transport) = test_client();
    transport.add(rate_limited());

    let result = client
        .movie_summary("tron-legacy-2010")
        .perform_with_retry(3)
        .await;

    assert!(matches!(result, Err(TraktError::RetryAfter(_))));
    assert_eq!(transport.request_count(URL), 3);
}

#[tokio::test(start_paused = true)]
async fn test_transient_rate_limit_succeeds_on_second_attempt() {
    let (client, transport) = test_client();
    transport.add(rate_limited());
    transport.add(MockedResponse::json(Method::GET, URL, 200, MOVIE));

    let movie = client
        .movie_summary("tron-legacy-2010")
        .perform_with_retry(3)
        .await
        .expect("second attempt succeeds");

    assert_eq!(movie.title, "TRON: Legacy");
    assert_eq!(transport.request_count(URL), 2);
}

#[tokio::test(start_paused = true)]
async fn test_perform_uses_configured_retry_limit() {
    let (client, transport) = test_client();
    transport.add(rate_limited());

    // Default config allows 3 attempts.
    let result = client.movie_summary("tron-legacy-2010").perform().await;

    assert!(matches!(result, Err(TraktError::RetryAfter(_))));
    assert_eq!(transport.request_count(URL), 3);
}

#[tokio::test(start_paused = true)]
async fn test_retry_limit_one_means_single_attempt() {
    let (client, transport) = test_client();
    transport.add(rate_limited());

    let result = client
        .movie_summary("tron-legacy-2010")
        .perform_with_retry(1)
        .await;

    assert!(matches!(result, Err(TraktError::RetryAfter(_))));
    assert_eq!(transport.request_count(URL), 1);
}

#[tokio::test(start_paused = true)]
async fn test_dropped_request_abandons_pending_retry() {
    let (client, transport) = test_client();
    transport.add(rate_limited());

    // The first attempt fires immediately, then the engine sleeps for
    // the server-specified second. Timing out halfway through the
    // backoff drops the in-flight future.
    let request = client
        .movie_summary("tron-legacy-2010")
        .perform_with_retry(3);
    let result = tokio::time::timeout(Duration::from_millis(500), request).await;
    assert!(result.is_err(), "request still backing off when dropped");
    assert_eq!(transport.request_count(URL), 1);

    // Well past the retry delay, no further attempt is dispatched.
    tokio::time::sleep(Duration::from_secs(5)).await;
    assert_eq!(transport.request_count(URL), 1);
}

#[tokio::test(start_paused = true)]
async fn test_non_rate_limit_errors_are_not_retried() {
    let (client, transport) = test_client();
    transport.add(MockedResponse::json(Method::GET, URL, 500, ""));
    transport.add(MockedResponse::json(Method::GET, URL, 200, MOVIE));

    let result = client
        .movie_summary("tron-legacy-2010")
        .perform_with_retry(3)
        .await;

    assert!(matches!(result, Err(TraktError::ServerError)));
    assert_eq!(transport.request_count(URL), 1);
}

#[tokio::test(start_paused = true)]
async fn test_rate_limit_without_header_is_not_retried() {
    let (client, transport) = test_client();
    transport.add(MockedResponse::json(Method::GET, URL, 429, ""));

    let result = client
        .movie_summary("tron-legacy-2010")
        .perform_with_retry(3)
        .await;

    assert!(matches!(result, Err(TraktError::RateLimitExceeded)));
    assert_eq!(transport.request_count(URL), 1);
}
