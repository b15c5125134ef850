//! Show and episode entity models.

use serde::{Deserialize, Serialize};

use crate::ids::TraktIds;

/// A show in its minimal representation.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Show {
    pub title: String,
    pub year: Option<u16>,
    pub ids: TraktIds,
}

/// A show being watched right now, with its watcher count.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TrendingShow {
    /// Number of users currently watching.
    pub watchers: u64,
    pub show: Show,
}

/// An episode in its minimal representation.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Episode {
    pub season: u32,
    pub number: u32,
    pub title: Option<String>,
    pub ids: TraktIds,
}
