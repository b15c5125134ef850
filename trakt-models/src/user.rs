//! User profile and list item models.

use serde::{Deserialize, Serialize};

use crate::ids::TraktIds;
use crate::movie::Movie;
use crate::show::{Episode, Show};

/// A user profile in its minimal representation.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct User {
    pub username: String,
    pub private: bool,
    pub name: Option<String>,
    pub vip: Option<bool>,
    pub ids: TraktIds,
}

/// One entry of a watchlist, hidden-items listing, or custom list.
///
/// The populated entity field matches `item_type`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ListItem {
    pub rank: Option<u32>,
    pub id: Option<u64>,
    /// "movie", "show", "season", "episode", or "person".
    #[serde(rename = "type")]
    pub item_type: Option<String>,
    pub notes: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub movie: Option<Movie>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub show: Option<Show>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub episode: Option<Episode>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_user() {
        let json = r#"{
            "username": "sean",
            "private": false,
            "name": "Sean Rudford",
            "vip": true,
            "ids": {"slug": "sean"}
        }"#;
        let user: User = serde_json::from_str(json).unwrap();
        assert_eq!(user.username, "sean");
        assert_eq!(user.vip, Some(true));
    }

    #[test]
    fn test_decode_watchlist_item() {
        let json = r#"{
            "rank": 1,
            "id": 101,
            "type": "movie",
            "notes": null,
            "movie": {"title": "TRON: Legacy", "year": 2010, "ids": {"trakt": 1}}
        }"#;
        let item: ListItem = serde_json::from_str(json).unwrap();
        assert_eq!(item.item_type.as_deref(), Some("movie"));
        assert!(item.movie.is_some());
        assert!(item.show.is_none());
    }
}
