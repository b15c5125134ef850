//! Movie entity models.

use serde::{Deserialize, Serialize};

use crate::ids::TraktIds;

/// A movie in its minimal representation.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Movie {
    pub title: String,
    pub year: Option<u16>,
    pub ids: TraktIds,
}

/// A movie being watched right now, with its watcher count.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TrendingMovie {
    /// Number of users currently watching.
    pub watchers: u64,
    pub movie: Movie,
}
