//! Endpoint constructors, grouped by API resource.
//!
//! Each module adds methods to [`crate::client::TraktClient`] that
//! return unexecuted routes; callers chain modifiers and `perform()`.
//! This is a representative subset of the API: further endpoints follow
//! the same one-constructor-per-path pattern.

pub mod auth;
pub mod checkin;
pub mod movies;
pub mod search;
pub mod shows;
pub mod users;
