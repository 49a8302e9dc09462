use pindrop_shared::geo::{Coordinate, DEFAULT_CENTER, DEFAULT_ZOOM};

/// Libraries requested alongside the core maps script.
pub const MAPS_LIBRARIES: &str = "places";

/// Quiet period after the last keystroke before suggestions are fetched.
pub const SUGGEST_DEBOUNCE_MS: u32 = 300;

/// Suggestions are biased toward places within this radius of the initial center.
pub const SEARCH_BIAS_RADIUS_M: f64 = 200_000.0;

const MAP_STYLES: &str = include_str!("../assets/map_styles.json");

/// Where place suggestions are biased toward.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SearchBias {
    pub center: Coordinate,
    pub radius_m: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    /// Google Maps API key. `None` fails the script gate without a request.
    pub api_key: Option<String>,
    pub libraries: &'static str,
    pub initial_center: Coordinate,
    pub initial_zoom: u8,
    /// JSON array of map style rules.
    pub map_styles: &'static str,
    pub search_bias: SearchBias,
}

impl AppConfig {
    /// Read the API key baked in at build time from `GOOGLE_MAPS_API_KEY`.
    pub fn from_build_env() -> Self {
        Self::with_api_key(option_env!("GOOGLE_MAPS_API_KEY"))
    }

    pub fn with_api_key(api_key: Option<&str>) -> Self {
        let api_key = api_key
            .map(str::trim)
            .filter(|k| !k.is_empty())
            .map(str::to_string);
        Self {
            api_key,
            libraries: MAPS_LIBRARIES,
            initial_center: DEFAULT_CENTER,
            initial_zoom: DEFAULT_ZOOM,
            map_styles: MAP_STYLES,
            search_bias: SearchBias {
                center: DEFAULT_CENTER,
                radius_m: SEARCH_BIAS_RADIUS_M,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_key_is_missing() {
        assert!(AppConfig::with_api_key(Some("   ")).api_key.is_none());
        assert!(AppConfig::with_api_key(Some("")).api_key.is_none());
        assert!(AppConfig::with_api_key(None).api_key.is_none());
    }

    #[test]
    fn test_key_is_trimmed() {
        let config = AppConfig::with_api_key(Some(" AIzaTestKey\n"));
        assert_eq!(config.api_key.as_deref(), Some("AIzaTestKey"));
    }

    #[test]
    fn test_defaults() {
        let config = AppConfig::with_api_key(Some("k"));
        assert_eq!(config.libraries, "places");
        assert_eq!(config.initial_zoom, 17);
        assert_eq!(config.initial_center, DEFAULT_CENTER);
        assert_eq!(config.search_bias.center, DEFAULT_CENTER);
        assert!((config.search_bias.radius_m - 200_000.0).abs() < 1e-9);
    }

    #[test]
    fn test_bundled_map_styles_are_a_json_array() {
        let styles: serde_json::Value = serde_json::from_str(MAP_STYLES).unwrap();
        assert!(!styles.as_array().unwrap().is_empty());
    }
}
