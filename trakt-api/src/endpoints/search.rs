//! Search and ID-lookup endpoints.

use reqwest::Method;

use trakt_models::SearchResult;

use crate::client::TraktClient;
use crate::query::LookupType;
use crate::route::PagedRoute;

impl TraktClient {
    /// Free-text search; narrow with `.query()` and `.search_type()`.
    pub fn search(&self) -> PagedRoute<SearchResult> {
        PagedRoute::new(self, "search", Method::GET, false)
    }

    /// Look an entity up by an external database ID.
    pub fn id_lookup(&self, lookup: LookupType) -> PagedRoute<SearchResult> {
        PagedRoute::new(
            self,
            format!("search/{}/{}", lookup.name(), lookup.id()),
            Method::GET,
            false,
        )
    }
}
