//! Movie endpoints.

use reqwest::Method;

use trakt_models::{Movie, TrendingMovie};

use crate::client::TraktClient;
use crate::query::Period;
use crate::route::{PagedRoute, Route};

impl TraktClient {
    /// Movies being watched right now, most-watched first.
    pub fn trending_movies(&self) -> PagedRoute<TrendingMovie> {
        PagedRoute::new(self, "movies/trending", Method::GET, false)
    }

    /// The most popular movies, by rating and vote count.
    pub fn popular_movies(&self) -> PagedRoute<Movie> {
        PagedRoute::new(self, "movies/popular", Method::GET, false)
    }

    /// The most watched movies over the given period.
    pub fn most_watched_movies(&self, period: Period) -> PagedRoute<Movie> {
        PagedRoute::new(
            self,
            format!("movies/watched/{period}"),
            Method::GET,
            false,
        )
    }

    /// A single movie by Trakt ID or slug.
    pub fn movie_summary(&self, id: &str) -> Route<Movie> {
        Route::new(self, format!("movies/{id}"), Method::GET, false)
    }

    /// Movies related to the given one.
    pub fn related_movies(&self, id: &str) -> PagedRoute<Movie> {
        PagedRoute::new(self, format!("movies/{id}/related"), Method::GET, false)
    }
}
