//! Client configuration management.
//!
//! Holds the application credentials registered with Trakt (client id,
//! client secret, redirect URI) and connection settings. Configuration is
//! persisted as TOML on disk.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::constants;
use crate::error::{TraktError, TraktResult};

/// Credentials and connection settings for a Trakt API client.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClientConfig {
    /// OAuth client id issued by Trakt. Sent as the `trakt-api-key` header.
    #[serde(default)]
    pub client_id: String,

    /// OAuth client secret issued by Trakt.
    #[serde(default)]
    pub client_secret: String,

    /// Redirect URI registered with the Trakt application.
    #[serde(default)]
    pub redirect_uri: String,

    /// Use the staging environment instead of production.
    #[serde(default)]
    pub staging: bool,

    /// API request timeout in milliseconds.
    #[serde(default = "default_api_timeout")]
    pub api_timeout_ms: u64,

    /// Maximum attempts per request when the server rate-limits with a
    /// retry delay.
    #[serde(default = "default_retry_limit")]
    pub retry_limit: u32,
}

fn default_api_timeout() -> u64 {
    constants::DEFAULT_API_TIMEOUT_MS
}

fn default_retry_limit() -> u32 {
    constants::DEFAULT_RETRY_LIMIT
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            client_id: String::new(),
            client_secret: String::new(),
            redirect_uri: String::new(),
            staging: false,
            api_timeout_ms: default_api_timeout(),
            retry_limit: default_retry_limit(),
        }
    }
}

impl ClientConfig {
    /// Create a configuration from application credentials.
    pub fn new(
        client_id: impl Into<String>,
        client_secret: impl Into<String>,
        redirect_uri: impl Into<String>,
    ) -> Self {
        Self {
            client_id: client_id.into(),
            client_secret: client_secret.into(),
            redirect_uri: redirect_uri.into(),
            ..Self::default()
        }
    }

    /// Fail with `MissingClientInfo` unless both credentials are present.
    pub fn validate(&self) -> TraktResult<()> {
        if self.client_id.is_empty() || self.client_secret.is_empty() {
            return Err(TraktError::MissingClientInfo);
        }
        Ok(())
    }

    /// API host for the selected environment.
    pub fn api_host(&self) -> &'static str {
        if self.staging {
            constants::STAGING_API_HOST
        } else {
            constants::PRODUCTION_API_HOST
        }
    }

    /// Web host serving the OAuth authorization page.
    pub fn oauth_host(&self) -> &'static str {
        if self.staging {
            constants::STAGING_WEB_HOST
        } else {
            constants::PRODUCTION_WEB_HOST
        }
    }

    /// Load configuration from a TOML file.
    pub fn load(path: &Path) -> TraktResult<Self> {
        let contents = std::fs::read_to_string(path)?;
        Ok(toml::from_str(&contents)?)
    }

    /// Save configuration to a TOML file, creating parent directories.
    pub fn save(&self, path: &Path) -> TraktResult<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let contents = toml::to_string_pretty(self)?;
        std::fs::write(path, contents)?;
        Ok(())
    }

    /// Default configuration file location for the current platform.
    pub fn default_path() -> TraktResult<PathBuf> {
        let base = dirs::config_dir()
            .ok_or_else(|| TraktError::Config("no config directory on this platform".into()))?;
        Ok(base.join("trakt").join("config.toml"))
    }
}
