//! Check-in endpoints.

use reqwest::Method;

use trakt_core::error::TraktResult;
use trakt_models::{CheckinBody, CheckinResponse};

use crate::client::TraktClient;
use crate::route::{EmptyRoute, Route};

impl TraktClient {
    /// Check into a movie or episode. The server answers 409 if another
    /// check-in is already active.
    pub fn check_in(&self, body: &CheckinBody) -> TraktResult<Route<CheckinResponse>> {
        Route::new(self, "checkin", Method::POST, true).with_body(body)
    }

    /// Cancel any active check-in.
    pub fn delete_active_checkins(&self) -> EmptyRoute {
        EmptyRoute::new(self, "checkin", Method::DELETE, true)
    }
}
