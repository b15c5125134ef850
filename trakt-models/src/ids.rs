//! External identifiers attached to every Trakt entity.

use serde::{Deserialize, Serialize};

/// The id bundle Trakt returns for movies, shows, episodes, and people.
///
/// Every field is optional: which ids are present depends on the entity
/// kind and on how much metadata Trakt has matched.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TraktIds {
    /// Trakt's own numeric id.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub trakt: Option<u64>,
    /// URL slug, e.g. "the-dark-knight-2008".
    #[serde(skip_serializing_if = "Option::is_none")]
    pub slug: Option<String>,
    /// IMDB id, e.g. "tt0468569".
    #[serde(skip_serializing_if = "Option::is_none")]
    pub imdb: Option<String>,
    /// TMDB numeric id.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tmdb: Option<u64>,
    /// TVDB numeric id (shows and episodes).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tvdb: Option<u64>,
    /// TVRage numeric id (legacy).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tvrage: Option<u64>,
}

impl TraktIds {
    /// Id bundle containing only a Trakt numeric id.
    pub fn trakt(id: u64) -> Self {
        Self {
            trakt: Some(id),
            ..Self::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_partial_ids() {
        let json = r#"{"trakt":120,"slug":"the-dark-knight-2008","imdb":"tt0468569"}"#;
        let ids: TraktIds = serde_json::from_str(json).unwrap();
        assert_eq!(ids.trakt, Some(120));
        assert_eq!(ids.slug.as_deref(), Some("the-dark-knight-2008"));
        assert!(ids.tmdb.is_none());
    }

    #[test]
    fn test_serialize_omits_absent_ids() {
        let ids = TraktIds::trakt(42);
        let json = serde_json::to_value(&ids).unwrap();
        let object = json.as_object().unwrap();
        assert_eq!(object.len(), 1);
        assert_eq!(object["trakt"], 42);
    }
}
