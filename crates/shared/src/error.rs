use thiserror::Error;

/// Why the mapping library never became usable.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ScriptLoadError {
    #[error("missing Google Maps API key")]
    MissingApiKey,
    #[error("Google Maps rejected the API key")]
    InvalidApiKey,
    #[error("failed to load maps script: {0}")]
    Failed(String),
}

/// Failure of a places lookup (suggestions or address resolution).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LookupError {
    #[error("places library is not ready")]
    NotReady,
    #[error("no results for {0:?}")]
    NoResults(String),
    #[error("places service returned {0}")]
    Service(String),
    #[error("could not decode places response: {0}")]
    Decode(String),
}

/// Failure of a one-shot geolocation request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum GeolocationError {
    #[error("geolocation permission denied")]
    PermissionDenied,
    #[error("position unavailable")]
    Unavailable,
    #[error("geolocation timed out")]
    Timeout,
    #[error("geolocation is not supported")]
    Unsupported,
}

impl GeolocationError {
    /// Map a bridge error code to a variant. Unknown codes count as unavailable.
    pub fn from_code(code: &str) -> Self {
        match code {
            "permission-denied" => GeolocationError::PermissionDenied,
            "timeout" => GeolocationError::Timeout,
            "unsupported" => GeolocationError::Unsupported,
            _ => GeolocationError::Unavailable,
        }
    }
}
