//! The API client: request assembly, retry execution, and the OAuth
//! token lifecycle.
//!
//! A [`TraktClient`] is a cheap handle over shared state (transport,
//! configuration, credential cache) and can be cloned freely across
//! tasks. Endpoint constructors hang off it in the endpoint modules;
//! this module owns the two low-level operations every route funnels
//! through: [`TraktClient::build_request`] and [`TraktClient::fetch`].

use std::collections::BTreeMap;
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;

use chrono::DateTime;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue, AUTHORIZATION, CONTENT_TYPE};
use reqwest::{Method, Url};
use serde_json::Value;
use tracing::{debug, warn};

use trakt_core::config::ClientConfig;
use trakt_core::constants::{headers, API_VERSION, DEVICE_POLL_BACKOFF_SECS};
use trakt_core::error::{AuthenticationError, TokenPollError, TraktError, TraktResult};
use trakt_models::{AuthenticationInfo, DeviceCode};

use crate::auth::{AuthStorage, AuthenticationState, FileAuthStorage};
use crate::status;
use crate::transport::{ApiRequest, ApiResponse, HttpTransport, Transport};

struct Inner {
    transport: Arc<dyn Transport>,
    config: ClientConfig,
    api_host: String,
    auth_storage: Arc<dyn AuthStorage>,
    // Exactly one cached state at a time; absent means signed out.
    cached_auth: Mutex<Option<AuthenticationState>>,
}

/// Handle to the API. Clone to share across tasks.
#[derive(Clone)]
pub struct TraktClient {
    inner: Arc<Inner>,
}

/// Assembles a [`TraktClient`], defaulting to the reqwest transport and
/// the file-backed credential store.
pub struct TraktClientBuilder {
    config: ClientConfig,
    transport: Option<Arc<dyn Transport>>,
    auth_storage: Option<Arc<dyn AuthStorage>>,
}

impl TraktClientBuilder {
    pub fn transport(mut self, transport: Arc<dyn Transport>) -> Self {
        self.transport = Some(transport);
        self
    }

    pub fn auth_storage(mut self, auth_storage: Arc<dyn AuthStorage>) -> Self {
        self.auth_storage = Some(auth_storage);
        self
    }

    pub fn build(self) -> TraktResult<TraktClient> {
        self.config.validate()?;

        let transport = match self.transport {
            Some(transport) => transport,
            None => Arc::new(HttpTransport::new(self.config.api_timeout_ms)?),
        };
        let auth_storage = match self.auth_storage {
            Some(storage) => storage,
            None => Arc::new(FileAuthStorage::new(FileAuthStorage::default_path()?)),
        };

        let api_host = self.config.api_host().to_string();
        Ok(TraktClient {
            inner: Arc::new(Inner {
                transport,
                config: self.config,
                api_host,
                auth_storage,
                cached_auth: Mutex::new(None),
            }),
        })
    }
}

impl TraktClient {
    pub fn builder(config: ClientConfig) -> TraktClientBuilder {
        TraktClientBuilder {
            config,
            transport: None,
            auth_storage: None,
        }
    }

    /// Convenience constructor with default transport and storage.
    pub fn new(config: ClientConfig) -> TraktResult<Self> {
        Self::builder(config).build()
    }

    fn cached_auth(&self) -> MutexGuard<'_, Option<AuthenticationState>> {
        self.inner
            .cached_auth
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Whether credentials are available, either live or refreshable.
    pub async fn is_signed_in(&self) -> bool {
        if self.cached_auth().is_some() {
            return true;
        }
        !matches!(
            self.inner.auth_storage.get_current_state().await,
            Err(AuthenticationError::NoStoredCredentials)
        )
    }

    /// The browser URL that starts the authorization-code flow.
    pub fn oauth_url(&self) -> TraktResult<Url> {
        let base = format!("https://{}/oauth/authorize", self.inner.config.oauth_host());
        Url::parse_with_params(
            &base,
            &[
                ("response_type", "code"),
                ("client_id", &self.inner.config.client_id),
                ("redirect_uri", &self.inner.config.redirect_uri),
            ],
        )
        .map_err(|e| TraktError::MalformedUrl(format!("{base}: {e}")))
    }

    /// Exchange an authorization code for credentials and persist them.
    pub async fn get_token(&self, code: &str) -> TraktResult<AuthenticationState> {
        let info = self.get_access_token(code)?.perform().await?;
        self.save_credentials(info).await
    }

    /// Request a device code for the limited-input sign-in flow.
    pub async fn get_app_code(&self) -> TraktResult<DeviceCode> {
        self.generate_device_code()?.perform().await
    }

    /// Poll the token endpoint until the user approves, denies, or the
    /// device code expires. Polling stops at the code's expiry deadline
    /// no matter which branch keeps it waiting.
    pub async fn poll_for_access_token(
        &self,
        device_code: &DeviceCode,
    ) -> TraktResult<AuthenticationState> {
        let deadline = tokio::time::Instant::now()
            .checked_add(Duration::from_secs(device_code.expires_in))
            .ok_or_else(|| TraktError::Config("device code expiry out of range".into()))?;
        let interval = Duration::from_secs(device_code.interval);

        loop {
            if tokio::time::Instant::now() >= deadline {
                return Err(TokenPollError::Expired.into());
            }

            let (info, status) = self.request_access_token(&device_code.device_code).await?;
            match status {
                200 => {
                    let info = info.ok_or(TokenPollError::MissingAccessToken)?;
                    return self.save_credentials(info).await;
                }
                // Authorization still pending.
                400 => tokio::time::sleep(interval).await,
                404 => return Err(TokenPollError::InvalidDeviceCode.into()),
                409 => return Err(TokenPollError::AlreadyUsed.into()),
                410 => return Err(TokenPollError::Expired.into()),
                418 => return Err(TokenPollError::Denied.into()),
                429 => {
                    debug!("device token poll rate limited, backing off");
                    tokio::time::sleep(Duration::from_secs(DEVICE_POLL_BACKOFF_SECS)).await;
                }
                other => return Err(TokenPollError::UnexpectedStatus(other).into()),
            }
        }
    }

    /// Renew credentials if the store reports them expired. A no-op when
    /// the current state is still live.
    pub async fn check_to_refresh(&self) -> TraktResult<()> {
        match self.inner.auth_storage.get_current_state().await {
            Ok(state) => {
                *self.cached_auth() = Some(state);
                Ok(())
            }
            Err(AuthenticationError::TokenExpired { refresh_token }) => {
                self.refresh_access_token(&refresh_token).await?;
                Ok(())
            }
            Err(AuthenticationError::NoStoredCredentials) => Err(TraktError::UserNotAuthorized),
        }
    }

    /// Revoke the current token (best effort) and clear all credential
    /// state.
    pub async fn sign_out(&self) -> TraktResult<()> {
        let access_token = self
            .cached_auth()
            .as_ref()
            .map(|state| state.access_token.clone());
        if let Some(token) = access_token {
            match self.revoke_token(&token) {
                Ok(route) => {
                    if let Err(e) = route.perform().await {
                        warn!(error = %e, "token revocation failed, clearing local state anyway");
                    }
                }
                Err(e) => warn!(error = %e, "building token revocation request failed"),
            }
        }

        *self.cached_auth() = None;
        self.inner.auth_storage.clear().await
    }

    pub(crate) async fn refresh_access_token(
        &self,
        refresh_token: &str,
    ) -> TraktResult<AuthenticationState> {
        let info = self
            .exchange_refresh_token(refresh_token)?
            .perform()
            .await
            .map_err(|e| match e {
                // The token endpoint answers 401 when the refresh token
                // itself has been revoked or expired.
                TraktError::Unauthorized => TraktError::InvalidRefreshToken,
                other => other,
            })?;
        self.save_credentials(info).await
    }

    /// Persist a token-exchange response and make it the cached state.
    pub(crate) async fn save_credentials(
        &self,
        info: AuthenticationInfo,
    ) -> TraktResult<AuthenticationState> {
        let expires_at = info
            .created_at
            .checked_add(info.expires_in)
            .and_then(|secs| i64::try_from(secs).ok())
            .and_then(|secs| DateTime::from_timestamp(secs, 0))
            .ok_or_else(|| {
                TraktError::Config("token expiry timestamp out of range".into())
            })?;

        let state = AuthenticationState {
            access_token: info.access_token,
            refresh_token: info.refresh_token,
            expiration_date: expires_at,
        };
        self.inner.auth_storage.update_state(state.clone()).await?;
        *self.cached_auth() = Some(state.clone());
        debug!("credentials saved");
        Ok(state)
    }

    /// The access token for authorized requests: the cached state, or a
    /// one-time load from storage. No implicit refresh happens here;
    /// callers renew expired credentials with [`Self::check_to_refresh`].
    async fn access_token(&self) -> TraktResult<String> {
        if let Some(state) = self.cached_auth().as_ref() {
            return Ok(state.access_token.clone());
        }
        match self.inner.auth_storage.get_current_state().await {
            Ok(state) => {
                let token = state.access_token.clone();
                *self.cached_auth() = Some(state);
                Ok(token)
            }
            Err(_) => Err(TraktError::UserNotAuthorized),
        }
    }

    /// Assemble the final HTTP request for a route: URL with query
    /// parameters, standard API headers, optional JSON body, and the
    /// bearer token when the endpoint requires authorization.
    pub(crate) async fn build_request(
        &self,
        path: &str,
        query: &BTreeMap<String, String>,
        authorized: bool,
        method: Method,
        body: Option<&Value>,
    ) -> TraktResult<ApiRequest> {
        let raw = format!("https://{}/{}", self.inner.api_host, path);
        let mut url = Url::parse(&raw).map_err(|e| TraktError::MalformedUrl(format!("{raw}: {e}")))?;
        if !query.is_empty() {
            url.query_pairs_mut().extend_pairs(query.iter());
        }

        let mut header_map = HeaderMap::new();
        header_map.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        header_map.insert(
            HeaderName::from_static(headers::API_VERSION),
            HeaderValue::from_static(API_VERSION),
        );
        header_map.insert(
            HeaderName::from_static(headers::API_KEY),
            HeaderValue::from_str(&self.inner.config.client_id)
                .map_err(|_| TraktError::Config("client id is not a valid header value".into()))?,
        );

        if authorized {
            let token = self.access_token().await?;
            header_map.insert(
                AUTHORIZATION,
                HeaderValue::from_str(&format!("Bearer {token}"))
                    .map_err(|_| TraktError::Config("access token is not a valid header value".into()))?,
            );
        }

        let body = body.map(serde_json::to_vec).transpose()?;
        Ok(ApiRequest {
            method,
            url,
            headers: header_map,
            body,
        })
    }

    /// Execute a request through the retry engine. Only rate-limit
    /// responses that carry a retry delay are retried, and attempts are
    /// strictly sequential: `retry_limit` bounds the total attempt count.
    pub(crate) async fn fetch(
        &self,
        request: ApiRequest,
        retry_limit: u32,
    ) -> TraktResult<ApiResponse> {
        let expected = status::expected_status(&request.method);
        let mut attempt: u32 = 1;

        loop {
            debug!(method = %request.method, url = %request.url, attempt, "executing request");
            let response = self.inner.transport.execute(request.clone()).await?;
            if response.status != expected {
                debug!(
                    url = %request.url,
                    status = response.status.as_u16(),
                    expected = expected.as_u16(),
                    "unexpected response status"
                );
            }

            match status::classify_status(response.status, &response.headers) {
                Ok(()) => return Ok(response),
                Err(TraktError::RetryAfter(delay)) => {
                    if attempt >= retry_limit {
                        return Err(TraktError::RetryAfter(delay));
                    }
                    attempt += 1;
                    warn!(
                        url = %request.url,
                        delay_secs = delay.as_secs(),
                        attempt,
                        "rate limited, retrying after server-specified delay"
                    );
                    // Dropping the enclosing future aborts this sleep and
                    // abandons the pending retry.
                    tokio::time::sleep(delay).await;
                }
                Err(e) => return Err(e),
            }
        }
    }

    pub(crate) fn transport(&self) -> &Arc<dyn Transport> {
        &self.inner.transport
    }

    pub(crate) fn retry_limit(&self) -> u32 {
        self.inner.config.retry_limit
    }

    pub(crate) fn client_id(&self) -> &str {
        &self.inner.config.client_id
    }

    pub(crate) fn client_secret(&self) -> &str {
        &self.inner.config.client_secret
    }

    pub(crate) fn redirect_uri(&self) -> &str {
        &self.inner.config.redirect_uri
    }
}
