//! Geographic coordinates and the map's fixed camera settings.
//!
//! The map opens over Strasbourg. Recentering (search result or
//! geolocation) always lands at a neighbourhood-level zoom.
use serde::{Deserialize, Serialize};

/// Initial map center.
pub const DEFAULT_CENTER: Coordinate = Coordinate::new(48.573406, 7.752111);

/// Initial map zoom level.
pub const DEFAULT_ZOOM: u8 = 17;

/// Zoom level applied on every recenter.
pub const RECENTER_ZOOM: u8 = 14;

/// A WGS84 latitude/longitude pair in degrees.
///
/// Serialized as `{"lat": .., "lng": ..}`, the shape the mapping library uses.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    #[serde(rename = "lat")]
    pub latitude: f64,
    #[serde(rename = "lng")]
    pub longitude: f64,
}

impl Coordinate {
    pub const fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    /// Both components finite and within the WGS84 ranges.
    pub fn is_valid(&self) -> bool {
        self.latitude.is_finite()
            && self.longitude.is_finite()
            && (-90.0..=90.0).contains(&self.latitude)
            && (-180.0..=180.0).contains(&self.longitude)
    }
}

impl std::fmt::Display for Coordinate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&format_coordinate(*self))
    }
}

/// Format a coordinate for display (e.g., "48.60000° N, 7.75000° E").
pub fn format_coordinate(c: Coordinate) -> String {
    let ns = if c.latitude < 0.0 { 'S' } else { 'N' };
    let ew = if c.longitude < 0.0 { 'W' } else { 'E' };
    format!(
        "{:.5}\u{00b0} {}, {:.5}\u{00b0} {}",
        c.latitude.abs(),
        ns,
        c.longitude.abs(),
        ew
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_center_is_valid() {
        assert!(DEFAULT_CENTER.is_valid());
    }

    #[test]
    fn test_is_valid_rejects_out_of_range() {
        assert!(!Coordinate::new(91.0, 0.0).is_valid());
        assert!(!Coordinate::new(0.0, -180.5).is_valid());
        assert!(!Coordinate::new(f64::NAN, 0.0).is_valid());
        assert!(Coordinate::new(-90.0, 180.0).is_valid());
    }

    #[test]
    fn test_format_coordinate_north_east() {
        assert_eq!(
            format_coordinate(Coordinate::new(48.6, 7.75)),
            "48.60000\u{00b0} N, 7.75000\u{00b0} E"
        );
    }

    #[test]
    fn test_format_coordinate_south_west() {
        let s = format_coordinate(Coordinate::new(-33.8688, -151.2093));
        assert_eq!(s, "33.86880\u{00b0} S, 151.20930\u{00b0} W");
    }

    #[test]
    fn test_coordinate_serializes_as_lat_lng() {
        let json = serde_json::to_value(Coordinate::new(48.55, 7.8)).unwrap();
        assert_eq!(json["lat"], 48.55);
        assert_eq!(json["lng"], 7.8);
    }

    #[test]
    fn test_coordinate_deserializes_from_lat_lng() {
        let c: Coordinate = serde_json::from_str(r#"{"lat":48.6,"lng":7.75}"#).unwrap();
        assert_eq!(c, Coordinate::new(48.6, 7.75));
    }
}
