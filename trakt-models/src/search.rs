//! Search result models.

use serde::{Deserialize, Serialize};

use crate::movie::Movie;
use crate::people::Person;
use crate::show::{Episode, Show};

/// One hit from a text query or id lookup.
///
/// Exactly one of the entity fields is populated, indicated by `result_type`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchResult {
    /// "movie", "show", "episode", "person", or "list".
    #[serde(rename = "type")]
    pub result_type: String,
    /// Relevance score for text queries; absent for id lookups.
    pub score: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub movie: Option<Movie>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub show: Option<Show>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub episode: Option<Episode>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub person: Option<Person>,
}
