use tracing::debug;

use crate::collaborators::Geolocator;
use crate::geo::Coordinate;

/// One-shot "where am I" lookup. Any failure is swallowed.
pub async fn locate<G: Geolocator>(geolocator: &G) -> Option<Coordinate> {
    match geolocator.current_position().await {
        Ok(coordinate) => {
            debug!(%coordinate, "located user");
            Some(coordinate)
        }
        Err(e) => {
            debug!(error = %e, "geolocation failed");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::collaborators::fakes::{FixedGeolocator, RecordingViewport, ViewportCall};
    use crate::error::GeolocationError;
    use crate::shell::Shell;
    use futures::executor::block_on;

    fn loaded_shell() -> Shell {
        let mut shell = Shell::new();
        shell.on_script_loaded(Ok(()));
        shell
    }

    #[test]
    fn test_locate_success_recenters() {
        let here = Coordinate::new(48.5734, 7.7521);
        let shell = loaded_shell();
        let viewport = RecordingViewport::default();

        if let Some(c) = block_on(locate(&FixedGeolocator(Ok(here)))) {
            shell.recenter(Some(&viewport), c);
        }
        assert_eq!(
            *viewport.calls.borrow(),
            vec![ViewportCall::Pan(here), ViewportCall::Zoom(14)]
        );
    }

    #[test]
    fn test_locate_failures_do_not_recenter() {
        let shell = loaded_shell();
        let viewport = RecordingViewport::default();
        for err in [
            GeolocationError::PermissionDenied,
            GeolocationError::Unavailable,
            GeolocationError::Timeout,
            GeolocationError::Unsupported,
        ] {
            if let Some(c) = block_on(locate(&FixedGeolocator(Err(err)))) {
                shell.recenter(Some(&viewport), c);
            }
        }
        assert!(viewport.calls.borrow().is_empty());
    }
}
