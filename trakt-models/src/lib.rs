//! Trakt Models - Typed data-transfer objects for the Trakt REST API.
//!
//! These are plain serde structs decoded from (and encoded into) API
//! payloads. The request core treats them as opaque; only equality and
//! hashing matter to it, for deduplicating paginated results.
//!
//! This is a representative subset of the API surface: entities follow
//! the same field-mapping pattern, so further models are mechanical
//! additions.

pub mod auth;
pub mod checkin;
pub mod ids;
pub mod movie;
pub mod people;
pub mod search;
pub mod show;
pub mod user;

// Re-export the model types at the crate root
pub use auth::{AuthenticationInfo, DeviceCode, OAuthBody};
pub use checkin::{CheckinBody, CheckinResponse};
pub use ids::TraktIds;
pub use movie::{Movie, TrendingMovie};
pub use people::Person;
pub use search::SearchResult;
pub use show::{Episode, Show, TrendingShow};
pub use user::{ListItem, User};
