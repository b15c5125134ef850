//! OAuth request bodies and token responses.

use serde::{Deserialize, Serialize};

/// Body for the OAuth token, revoke, and device-code endpoints.
///
/// The set of populated fields varies by grant type; absent fields must be
/// omitted from the encoded JSON entirely, never sent as null.
#[derive(Debug, Clone, Default, Serialize)]
pub struct OAuthBody {
    /// Authorization code or device code.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
    /// Access token being revoked.
    #[serde(rename = "token", skip_serializing_if = "Option::is_none")]
    pub access_token: Option<String>,
    #[serde(rename = "refresh_token", skip_serializing_if = "Option::is_none")]
    pub refresh_token: Option<String>,
    #[serde(rename = "client_id", skip_serializing_if = "Option::is_none")]
    pub client_id: Option<String>,
    #[serde(rename = "client_secret", skip_serializing_if = "Option::is_none")]
    pub client_secret: Option<String>,
    #[serde(rename = "redirect_uri", skip_serializing_if = "Option::is_none")]
    pub redirect_uri: Option<String>,
    /// "authorization_code" or "refresh_token".
    #[serde(rename = "grant_type", skip_serializing_if = "Option::is_none")]
    pub grant_type: Option<String>,
}

impl OAuthBody {
    /// Body for exchanging an authorization code for an access token.
    pub fn authorization_code(
        code: impl Into<String>,
        client_id: impl Into<String>,
        client_secret: impl Into<String>,
        redirect_uri: impl Into<String>,
    ) -> Self {
        Self {
            code: Some(code.into()),
            client_id: Some(client_id.into()),
            client_secret: Some(client_secret.into()),
            redirect_uri: Some(redirect_uri.into()),
            grant_type: Some("authorization_code".into()),
            ..Self::default()
        }
    }

    /// Body for exchanging a refresh token for a new access token.
    pub fn refresh_token(
        refresh_token: impl Into<String>,
        client_id: impl Into<String>,
        client_secret: impl Into<String>,
        redirect_uri: impl Into<String>,
    ) -> Self {
        Self {
            refresh_token: Some(refresh_token.into()),
            client_id: Some(client_id.into()),
            client_secret: Some(client_secret.into()),
            redirect_uri: Some(redirect_uri.into()),
            grant_type: Some("refresh_token".into()),
            ..Self::default()
        }
    }

    /// Body for revoking an access token.
    pub fn revoke(
        access_token: impl Into<String>,
        client_id: impl Into<String>,
        client_secret: impl Into<String>,
    ) -> Self {
        Self {
            access_token: Some(access_token.into()),
            client_id: Some(client_id.into()),
            client_secret: Some(client_secret.into()),
            ..Self::default()
        }
    }

    /// Body for generating a device code.
    pub fn device_code(client_id: impl Into<String>) -> Self {
        Self {
            client_id: Some(client_id.into()),
            ..Self::default()
        }
    }

    /// Body for a single device-token poll request.
    pub fn device_token(
        device_code: impl Into<String>,
        client_id: impl Into<String>,
        client_secret: impl Into<String>,
    ) -> Self {
        Self {
            code: Some(device_code.into()),
            client_id: Some(client_id.into()),
            client_secret: Some(client_secret.into()),
            ..Self::default()
        }
    }
}

/// Response from a successful token exchange.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthenticationInfo {
    pub access_token: String,
    pub token_type: String,
    /// Lifetime of the access token, in seconds.
    pub expires_in: u64,
    pub refresh_token: String,
    pub scope: Option<String>,
    /// Unix timestamp of when the token was created.
    pub created_at: u64,
}

/// Codes for the device authentication flow.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeviceCode {
    pub device_code: String,
    /// Short code the user types at the verification URL.
    pub user_code: String,
    pub verification_url: String,
    /// Seconds until the device code expires.
    pub expires_in: u64,
    /// Seconds to wait between polls.
    pub interval: u64,
}
