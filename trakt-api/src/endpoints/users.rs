//! User endpoints. Most of these require authorization.

use reqwest::Method;

use trakt_models::{ListItem, User};

use crate::client::TraktClient;
use crate::query::WatchedType;
use crate::route::{PagedRoute, Route};

impl TraktClient {
    /// A user's public profile.
    pub fn user_profile(&self, username: &str) -> Route<User> {
        Route::new(self, format!("users/{username}"), Method::GET, false)
    }

    /// The signed-in user's own profile.
    pub fn me(&self) -> Route<User> {
        Route::new(self, "users/me", Method::GET, true)
    }

    /// The signed-in user's watchlist, optionally narrowed to one item
    /// kind.
    pub fn watchlist(&self, item_type: Option<WatchedType>) -> PagedRoute<ListItem> {
        PagedRoute::from_segments(
            self,
            [
                Some("users".to_string()),
                Some("me".to_string()),
                Some("watchlist".to_string()),
                item_type.map(|t| t.as_str().to_string()),
            ],
            Method::GET,
            true,
        )
    }

    /// Items of one kind the signed-in user has hidden from the given
    /// section, e.g. `"calendar"` or `"recommendations"`.
    pub fn hidden_items(&self, section: &str, item_type: WatchedType) -> PagedRoute<ListItem> {
        PagedRoute::new(self, format!("users/hidden/{section}"), Method::GET, true)
            .with_query("type", item_type.as_str())
    }
}
