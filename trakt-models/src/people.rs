//! Person entity model.

use serde::{Deserialize, Serialize};

use crate::ids::TraktIds;

/// A person (actor, director, etc.) in their minimal representation.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Person {
    pub name: String,
    pub ids: TraktIds,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_person() {
        let json = r#"{"name": "Bryan Cranston", "ids": {"trakt": 142, "slug": "bryan-cranston"}}"#;
        let person: Person = serde_json::from_str(json).unwrap();
        assert_eq!(person.name, "Bryan Cranston");
    }
}
