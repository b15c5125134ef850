//! OAuth token endpoints.

use reqwest::{Method, StatusCode};

use trakt_core::error::TraktResult;
use trakt_models::{AuthenticationInfo, DeviceCode, OAuthBody};

use crate::client::TraktClient;
use crate::route::{EmptyRoute, Route};

impl TraktClient {
    /// Exchange an authorization code for tokens.
    pub fn get_access_token(&self, code: &str) -> TraktResult<Route<AuthenticationInfo>> {
        let body = OAuthBody::authorization_code(
            code,
            self.client_id(),
            self.client_secret(),
            self.redirect_uri(),
        );
        Route::new(self, "oauth/token", Method::POST, false).with_body(&body)
    }

    /// Exchange a refresh token for new tokens.
    pub fn exchange_refresh_token(
        &self,
        refresh_token: &str,
    ) -> TraktResult<Route<AuthenticationInfo>> {
        let body = OAuthBody::refresh_token(
            refresh_token,
            self.client_id(),
            self.client_secret(),
            self.redirect_uri(),
        );
        Route::new(self, "oauth/token", Method::POST, false).with_body(&body)
    }

    /// Invalidate an access token server-side.
    pub fn revoke_token(&self, access_token: &str) -> TraktResult<EmptyRoute> {
        let body = OAuthBody::revoke(access_token, self.client_id(), self.client_secret());
        EmptyRoute::new(self, "oauth/revoke", Method::POST, false).with_body(&body)
    }

    /// Start the device flow by generating a device + user code pair.
    pub fn generate_device_code(&self) -> TraktResult<Route<DeviceCode>> {
        let body = OAuthBody::device_code(self.client_id());
        Route::new(self, "oauth/device/code", Method::POST, false).with_body(&body)
    }

    /// One poll of the device token endpoint.
    ///
    /// The poll loop branches on the raw status code (400 means "keep
    /// waiting", not a failure), so this bypasses status classification
    /// and hands back the decoded payload, if any, together with the
    /// status.
    pub(crate) async fn request_access_token(
        &self,
        device_code: &str,
    ) -> TraktResult<(Option<AuthenticationInfo>, u16)> {
        let body = OAuthBody::device_token(device_code, self.client_id(), self.client_secret());
        let route: Route<AuthenticationInfo> =
            Route::new(self, "oauth/device/token", Method::POST, false).with_body(&body)?;
        let request = route.build_request().await?;
        let response = self.transport().execute(request).await?;

        let info = if response.status == StatusCode::OK && !response.body.is_empty() {
            Some(serde_json::from_slice(&response.body)?)
        } else {
            None
        };
        Ok((info, response.status.as_u16()))
    }
}
