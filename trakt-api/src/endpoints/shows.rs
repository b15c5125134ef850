//! Show endpoints.

use reqwest::Method;

use trakt_models::{Show, TrendingShow};

use crate::client::TraktClient;
use crate::route::{PagedRoute, Route};

impl TraktClient {
    /// Shows being watched right now, most-watched first.
    pub fn trending_shows(&self) -> PagedRoute<TrendingShow> {
        PagedRoute::new(self, "shows/trending", Method::GET, false)
    }

    /// The most popular shows, by rating and vote count.
    pub fn popular_shows(&self) -> PagedRoute<Show> {
        PagedRoute::new(self, "shows/popular", Method::GET, false)
    }

    /// A single show by Trakt ID or slug.
    pub fn show_summary(&self, id: &str) -> Route<Show> {
        Route::new(self, format!("shows/{id}"), Method::GET, false)
    }

    /// Shows related to the given one.
    pub fn related_shows(&self, id: &str) -> PagedRoute<Show> {
        PagedRoute::new(self, format!("shows/{id}/related"), Method::GET, false)
    }
}
