//! Trakt API - Typed HTTP request core for the Trakt REST API.
//!
//! The pieces, from the bottom up:
//!
//! - [`transport`]: one-method request/response trait with a reqwest
//!   implementation and an in-memory mock.
//! - [`status`]: total classification of status codes into the error
//!   taxonomy, plus pagination/rate-limit header parsing.
//! - [`route`]: immutable, typed request builders ([`Route`],
//!   [`PagedRoute`], [`EmptyRoute`]) with copy-on-write modifiers.
//! - [`pagination`]: bounded-concurrency all-pages and in-order
//!   streaming retrieval over a [`PagedRoute`].
//! - [`auth`] and [`client`]: credential storage and the client handle
//!   that assembles, authorizes, retries, and executes every request.
//! - [`endpoints`]: per-resource route constructors.
//!
//! ```no_run
//! use std::error::Error;
//! use trakt_api::{ExtendedType, TraktClient};
//! use trakt_core::config::ClientConfig;
//!
//! # async fn run() -> Result<(), Box<dyn Error>> {
//! let client = TraktClient::new(ClientConfig::new("id", "secret", "urn:ietf:wg:oauth:2.0:oob"))?;
//! let trending = client
//!     .trending_movies()
//!     .extend(&[ExtendedType::Min])
//!     .page(1)
//!     .limit(10)
//!     .perform()
//!     .await?;
//! println!("{} movies, page {}/{}", trending.items.len(), trending.current_page, trending.page_count);
//! # Ok(())
//! # }
//! ```

pub mod auth;
pub mod client;
pub mod endpoints;
pub mod pagination;
pub mod query;
pub mod route;
pub mod status;
pub mod transport;

pub use auth::{AuthStorage, AuthenticationState, FileAuthStorage, MemoryAuthStorage};
pub use client::{TraktClient, TraktClientBuilder};
pub use query::{ExtendedType, Filter, LookupType, Period, SearchType, WatchedType};
pub use route::{EmptyRoute, Paged, PagedRoute, Route};
pub use transport::{ApiRequest, ApiResponse, HttpTransport, MockTransport, MockedResponse, Transport};
