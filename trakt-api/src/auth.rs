//! OAuth credential state and its persistence.
//!
//! The client keeps one [`AuthenticationState`] at a time, loaded from
//! and saved through an [`AuthStorage`]. The file-backed store writes a
//! small versioned TOML document under the user config directory; the
//! in-memory store exists for tests and embedding hosts that manage
//! credentials themselves.

use std::path::PathBuf;
use std::sync::Mutex;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use trakt_core::error::{AuthenticationError, TraktError, TraktResult};

/// A usable set of OAuth credentials.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthenticationState {
    pub access_token: String,
    pub refresh_token: String,
    pub expiration_date: DateTime<Utc>,
}

impl AuthenticationState {
    pub fn is_expired(&self) -> bool {
        self.expiration_date <= Utc::now()
    }
}

/// Where credentials live between runs.
///
/// `get_current_state` returns a non-expired state or says why there is
/// none: [`AuthenticationError::TokenExpired`] hands back the refresh
/// token so the caller can renew, [`AuthenticationError::NoStoredCredentials`]
/// means a fresh sign-in is needed.
#[async_trait]
pub trait AuthStorage: Send + Sync {
    async fn get_current_state(&self) -> Result<AuthenticationState, AuthenticationError>;
    async fn update_state(&self, state: AuthenticationState) -> TraktResult<()>;
    async fn clear(&self) -> TraktResult<()>;
}

/// On-disk auth document. The version field gates schema changes: a
/// document with an unknown version is treated as absent rather than
/// misread.
#[derive(Debug, Serialize, Deserialize)]
struct StoredAuth {
    version: u32,
    access_token: String,
    refresh_token: String,
    expires_at: Option<DateTime<Utc>>,
}

const STORED_AUTH_VERSION: u32 = 1;

/// TOML-file credential store.
pub struct FileAuthStorage {
    path: PathBuf,
}

impl FileAuthStorage {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    /// `<config_dir>/trakt/auth.toml`.
    pub fn default_path() -> TraktResult<PathBuf> {
        let base = dirs::config_dir()
            .ok_or_else(|| TraktError::Config("could not determine config directory".into()))?;
        Ok(base.join("trakt").join("auth.toml"))
    }

    fn read(&self) -> Option<StoredAuth> {
        let contents = std::fs::read_to_string(&self.path).ok()?;
        match toml::from_str::<StoredAuth>(&contents) {
            Ok(stored) if stored.version == STORED_AUTH_VERSION => Some(stored),
            Ok(stored) => {
                warn!(
                    path = %self.path.display(),
                    version = stored.version,
                    "ignoring auth file with unknown schema version"
                );
                None
            }
            Err(e) => {
                warn!(path = %self.path.display(), error = %e, "ignoring unreadable auth file");
                None
            }
        }
    }
}

#[async_trait]
impl AuthStorage for FileAuthStorage {
    async fn get_current_state(&self) -> Result<AuthenticationState, AuthenticationError> {
        let stored = self.read().ok_or(AuthenticationError::NoStoredCredentials)?;

        // A record without an expiry cannot be trusted as live; force a
        // refresh with the stored refresh token.
        let expiration_date = stored.expires_at.ok_or_else(|| {
            AuthenticationError::TokenExpired {
                refresh_token: stored.refresh_token.clone(),
            }
        })?;

        let state = AuthenticationState {
            access_token: stored.access_token,
            refresh_token: stored.refresh_token,
            expiration_date,
        };
        if state.is_expired() {
            return Err(AuthenticationError::TokenExpired {
                refresh_token: state.refresh_token,
            });
        }
        Ok(state)
    }

    async fn update_state(&self, state: AuthenticationState) -> TraktResult<()> {
        let stored = StoredAuth {
            version: STORED_AUTH_VERSION,
            access_token: state.access_token,
            refresh_token: state.refresh_token,
            expires_at: Some(state.expiration_date),
        };
        let contents = toml::to_string_pretty(&stored)?;
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(&self.path, contents)?;
        debug!(path = %self.path.display(), "saved auth state");
        Ok(())
    }

    async fn clear(&self) -> TraktResult<()> {
        match std::fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

/// In-memory credential store.
#[derive(Default)]
pub struct MemoryAuthStorage {
    state: Mutex<Option<AuthenticationState>>,
}

impl MemoryAuthStorage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_state(state: AuthenticationState) -> Self {
        Self {
            state: Mutex::new(Some(state)),
        }
    }
}

#[async_trait]
impl AuthStorage for MemoryAuthStorage {
    async fn get_current_state(&self) -> Result<AuthenticationState, AuthenticationError> {
        let guard = self
            .state
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        let state = guard
            .clone()
            .ok_or(AuthenticationError::NoStoredCredentials)?;
        if state.is_expired() {
            return Err(AuthenticationError::TokenExpired {
                refresh_token: state.refresh_token,
            });
        }
        Ok(state)
    }

    async fn update_state(&self, state: AuthenticationState) -> TraktResult<()> {
        *self
            .state
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner()) = Some(state);
        Ok(())
    }

    async fn clear(&self) -> TraktResult<()> {
        *self
            .state
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner()) = None;
        Ok(())
    }
}
