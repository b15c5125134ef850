#![allow(dead_code)]

use std::sync::Arc;

use chrono::{Duration, Utc};

use trakt_api::{AuthenticationState, MemoryAuthStorage, MockTransport, TraktClient};
use trakt_core::config::ClientConfig;

pub fn config() -> ClientConfig {
    ClientConfig::new("client-id", "client-secret", "urn:ietf:wg:oauth:2.0:oob")
}

/// A client over a mock transport with no stored credentials.
pub fn test_client() -> (TraktClient, Arc<MockTransport>) {
    client_with_storage(Arc::new(MemoryAuthStorage::new()))
}

/// A client over a mock transport with live credentials already stored.
pub fn signed_in_client() -> (TraktClient, Arc<MockTransport>) {
    client_with_storage(Arc::new(MemoryAuthStorage::with_state(AuthenticationState {
        access_token: "access-token".into(),
        refresh_token: "refresh-token".into(),
        expiration_date: Utc::now() + Duration::hours(1),
    })))
}

pub fn client_with_storage(
    storage: Arc<MemoryAuthStorage>,
) -> (TraktClient, Arc<MockTransport>) {
    let transport = Arc::new(MockTransport::new());
    let client = TraktClient::builder(config())
        .transport(Arc::clone(&transport) as Arc<dyn trakt_api::Transport>)
        .auth_storage(storage)
        .build()
        .expect("client builds");
    (client, transport)
}

/// A JSON array of `count` movies with consecutive trakt ids from `start`.
pub fn movies_page(start: u64, count: u64) -> String {
    let movies: Vec<String> = (start..start + count)
        .map(|id| format!(r#"{{"title":"Movie {id}","year":2020,"ids":{{"trakt":{id}}}}}"#))
        .collect();
    format!("[{}]", movies.join(","))
}

/// A token-exchange response created just now, valid for two hours.
pub fn token_response(access_token: &str, refresh_token: &str) -> String {
    format!(
        r#"{{
            "access_token": "{access_token}",
            "token_type": "bearer",
            "expires_in": 7200,
            "refresh_token": "{refresh_token}",
            "scope": "public",
            "created_at": {}
        }}"#,
        Utc::now().timestamp()
    )
}
