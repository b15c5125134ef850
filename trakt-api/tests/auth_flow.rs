//! Token refresh and device-code polling flows.

mod common;

use std::sync::Arc;

use chrono::{Duration, Utc};
use reqwest::Method;

use common::{client_with_storage, signed_in_client, test_client, token_response};
use trakt_api::{AuthStorage, AuthenticationState, MemoryAuthStorage, MockedResponse};
use trakt_core::error::{TokenPollError, TraktError};
use trakt_models::DeviceCode;

const TOKEN_URL: &str = "https://api.trakt.tv/oauth/token";
const DEVICE_TOKEN_URL: &str = "https://api.trakt.tv/oauth/device/token";

fn expired_storage() -> Arc<MemoryAuthStorage> {
    Arc::new(MemoryAuthStorage::with_state(AuthenticationState {
        access_token: "stale-access".into(),
        refresh_token: "r".into(),
        expiration_date: Utc::now() - Duration::hours(1),
    }))
}

#[tokio::test]
async fn test_refresh_exchanges_stored_refresh_token() {
    let storage = expired_storage();
    let (client, transport) = client_with_storage(Arc::clone(&storage));
    transport.add(MockedResponse::json(
        Method::POST,
        TOKEN_URL,
        200,
        &token_response("new-access", "new-refresh"),
    ));

    client.check_to_refresh().await.expect("refresh succeeds");

    // Exactly one token exchange, carrying the stored refresh token.
    assert_eq!(transport.request_count(TOKEN_URL), 1);
    let body = transport.requests()[0].body.clone().expect("exchange has a body");
    let body: serde_json::Value = serde_json::from_slice(&body).expect("body is JSON");
    assert_eq!(body["refresh_token"], "r");
    assert_eq!(body["grant_type"], "refresh_token");

    // The store now reports the new state as current.
    let state = storage.get_current_state().await.expect("state is live");
    assert_eq!(state.access_token, "new-access");
    assert_eq!(state.refresh_token, "new-refresh");
}

#[tokio::test]
async fn test_refresh_with_live_state_is_a_no_op() {
    let (client, transport) = signed_in_client();
    client.check_to_refresh().await.expect("nothing to refresh");
    assert!(transport.requests().is_empty());
}

#[tokio::test]
async fn test_refresh_without_credentials_is_unauthorized() {
    let (client, _transport) = test_client();
    let result = client.check_to_refresh().await;
    assert!(matches!(result, Err(TraktError::UserNotAuthorized)));
}

#[tokio::test]
async fn test_rejected_refresh_token_maps_to_invalid() {
    let storage = expired_storage();
    let (client, transport) = client_with_storage(storage);
    transport.add(MockedResponse::json(Method::POST, TOKEN_URL, 401, ""));

    let result = client.check_to_refresh().await;
    assert!(matches!(result, Err(TraktError::InvalidRefreshToken)));
}

#[tokio::test]
async fn test_refreshed_token_used_by_authorized_routes() {
    let storage = expired_storage();
    let (client, transport) = client_with_storage(storage);
    transport.add(MockedResponse::json(
        Method::POST,
        TOKEN_URL,
        200,
        &token_response("new-access", "new-refresh"),
    ));
    transport.add(MockedResponse::json(
        Method::GET,
        "https://api.trakt.tv/users/me",
        200,
        r#"{"username": "sean", "private": false, "name": null, "vip": null, "ids": {"slug": "sean"}}"#,
    ));

    client.check_to_refresh().await.expect("refresh succeeds");
    client.me().perform().await.expect("profile request succeeds");

    let profile_request = transport
        .requests()
        .into_iter()
        .find(|r| r.url.path() == "/users/me")
        .expect("profile request sent");
    assert_eq!(
        profile_request
            .headers
            .get(reqwest::header::AUTHORIZATION)
            .and_then(|v| v.to_str().ok()),
        Some("Bearer new-access")
    );
}

fn device_code(expires_in: u64, interval: u64) -> DeviceCode {
    DeviceCode {
        device_code: "device-code-1".into(),
        user_code: "5055CC52".into(),
        verification_url: "https://trakt.tv/activate".into(),
        expires_in,
        interval,
    }
}

#[tokio::test(start_paused = true)]
async fn test_device_poll_waits_through_pending_then_saves() {
    let (client, transport) = test_client();
    transport.add(MockedResponse::json(Method::POST, DEVICE_TOKEN_URL, 400, ""));
    transport.add(MockedResponse::json(Method::POST, DEVICE_TOKEN_URL, 400, ""));
    transport.add(MockedResponse::json(
        Method::POST,
        DEVICE_TOKEN_URL,
        200,
        &token_response("device-access", "device-refresh"),
    ));

    let state = client
        .poll_for_access_token(&device_code(600, 5))
        .await
        .expect("poll ends in approval");

    assert_eq!(state.access_token, "device-access");
    assert_eq!(transport.request_count(DEVICE_TOKEN_URL), 3);
    assert!(client.is_signed_in().await);
}

#[tokio::test(start_paused = true)]
async fn test_device_poll_denied() {
    let (client, transport) = test_client();
    transport.add(MockedResponse::json(Method::POST, DEVICE_TOKEN_URL, 418, ""));

    let result = client.poll_for_access_token(&device_code(600, 5)).await;
    assert!(matches!(
        result,
        Err(TraktError::TokenPoll(TokenPollError::Denied))
    ));
}

#[tokio::test(start_paused = true)]
async fn test_device_poll_invalid_code() {
    let (client, transport) = test_client();
    transport.add(MockedResponse::json(Method::POST, DEVICE_TOKEN_URL, 404, ""));

    let result = client.poll_for_access_token(&device_code(600, 5)).await;
    assert!(matches!(
        result,
        Err(TraktError::TokenPoll(TokenPollError::InvalidDeviceCode))
    ));
}

#[tokio::test(start_paused = true)]
async fn test_device_poll_backs_off_on_rate_limit() {
    let (client, transport) = test_client();
    transport.add(MockedResponse::json(Method::POST, DEVICE_TOKEN_URL, 429, ""));
    transport.add(MockedResponse::json(
        Method::POST,
        DEVICE_TOKEN_URL,
        200,
        &token_response("device-access", "device-refresh"),
    ));

    let state = client
        .poll_for_access_token(&device_code(600, 5))
        .await
        .expect("poll survives a rate limit");
    assert_eq!(state.access_token, "device-access");
    assert_eq!(transport.request_count(DEVICE_TOKEN_URL), 2);
}

#[tokio::test(start_paused = true)]
async fn test_device_poll_stops_at_code_expiry() {
    let (client, transport) = test_client();
    // Pending forever; the deadline has to end the loop.
    transport.add(MockedResponse::json(Method::POST, DEVICE_TOKEN_URL, 400, ""));

    let result = client.poll_for_access_token(&device_code(10, 2)).await;
    assert!(matches!(
        result,
        Err(TraktError::TokenPoll(TokenPollError::Expired))
    ));
    assert!(transport.request_count(DEVICE_TOKEN_URL) <= 6);
}

#[tokio::test(start_paused = true)]
async fn test_device_poll_rejects_out_of_range_expiry() {
    let (client, transport) = test_client();

    // An absurd expires_in must surface as an error, not a panic.
    let result = client
        .poll_for_access_token(&device_code(u64::MAX, 5))
        .await;
    assert!(matches!(result, Err(TraktError::Config(_))));
    assert!(transport.requests().is_empty());
}

#[tokio::test]
async fn test_sign_out_revokes_and_clears() {
    let (client, transport) = signed_in_client();
    transport.add(MockedResponse::json(
        Method::GET,
        "https://api.trakt.tv/users/me",
        200,
        r#"{"username": "sean", "private": false, "name": null, "vip": null, "ids": {"slug": "sean"}}"#,
    ));
    transport.add(MockedResponse::json(
        Method::POST,
        "https://api.trakt.tv/oauth/revoke",
        200,
        "",
    ));

    // Populate the credential cache, then sign out.
    client.me().perform().await.expect("profile request succeeds");
    client.sign_out().await.expect("sign-out succeeds");

    assert_eq!(
        transport.request_count("https://api.trakt.tv/oauth/revoke"),
        1
    );
    assert!(!client.is_signed_in().await);

    let result = client.me().perform().await;
    assert!(matches!(result, Err(TraktError::UserNotAuthorized)));
}
