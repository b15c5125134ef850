//! Checkin request and response models.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::movie::Movie;
use crate::show::Episode;

/// Body for `POST /checkin`. Exactly one of `movie` or `episode` is set.
#[derive(Debug, Clone, Default, Serialize)]
pub struct CheckinBody {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub movie: Option<Movie>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub episode: Option<Episode>,
    /// Message posted to connected social accounts.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl CheckinBody {
    /// Check into a movie.
    pub fn movie(movie: Movie) -> Self {
        Self {
            movie: Some(movie),
            ..Self::default()
        }
    }

    /// Check into an episode.
    pub fn episode(episode: Episode) -> Self {
        Self {
            episode: Some(episode),
            ..Self::default()
        }
    }
}

/// Response from a successful checkin.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CheckinResponse {
    pub id: u64,
    pub watched_at: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub movie: Option<Movie>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub episode: Option<Episode>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ids::TraktIds;

    #[test]
    fn test_checkin_body_serializes_only_present_entity() {
        let body = CheckinBody::movie(Movie {
            title: "Guardians of the Galaxy".into(),
            year: Some(2014),
            ids: TraktIds::trakt(28),
        });
        let json = serde_json::to_value(&body).unwrap();
        let object = json.as_object().unwrap();
        assert_eq!(object.len(), 1);
        assert!(object.contains_key("movie"));
    }

    #[test]
    fn test_decode_checkin_response() {
        let json = r#"{
            "id": 3373536619,
            "watched_at": "2014-08-06T01:11:37.000Z",
            "movie": {"title": "Guardians of the Galaxy", "year": 2014, "ids": {"trakt": 28}}
        }"#;
        let response: CheckinResponse = serde_json::from_str(json).unwrap();
        assert_eq!(response.id, 3373536619);
        assert!(response.watched_at.is_some());
    }
}
