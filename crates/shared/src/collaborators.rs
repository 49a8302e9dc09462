//! Seams to the external services the app drives but does not implement.
//!
//! The browser build provides implementations backed by the Google Maps
//! JavaScript API and `navigator.geolocation`; tests use in-memory fakes.
#![allow(async_fn_in_trait)]

use crate::error::{GeolocationError, LookupError};
use crate::geo::Coordinate;
use crate::models::Suggestion;

/// A live, initialized map surface.
pub trait MapViewport {
    fn pan_to(&self, coordinate: Coordinate);
    fn set_zoom(&self, level: u8);
}

/// One-shot current-position lookup.
pub trait Geolocator {
    async fn current_position(&self) -> Result<Coordinate, GeolocationError>;
}

/// Address autocomplete plus geocoding of a chosen suggestion.
pub trait PlaceSearch {
    /// Whether the underlying service script is ready to take queries.
    fn is_ready(&self) -> bool;

    /// Ranked suggestions for partial input. No matches is `Ok(vec![])`.
    async fn suggest(&self, text: &str) -> Result<Vec<Suggestion>, LookupError>;

    /// Geocode a suggestion's description.
    async fn resolve(&self, description: &str) -> Result<Coordinate, LookupError>;
}
