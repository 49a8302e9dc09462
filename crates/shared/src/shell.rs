use chrono::{DateTime, Utc};
use tracing::{debug, info, warn};

use crate::collaborators::MapViewport;
use crate::error::ScriptLoadError;
use crate::geo::{Coordinate, RECENTER_ZOOM};
use crate::models::{LoadState, Marker, MarkerId, MarkerList};

/// Top-level screen state: the dropped pins, the inspected pin, and the
/// script-loading gate.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Shell {
    markers: MarkerList,
    selection: Option<MarkerId>,
    load: LoadState,
}

impl Shell {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn markers(&self) -> &MarkerList {
        &self.markers
    }

    pub fn selection(&self) -> Option<MarkerId> {
        self.selection
    }

    /// The selected marker, if any.
    pub fn selected(&self) -> Option<&Marker> {
        self.selection.and_then(|id| self.markers.get(id))
    }

    pub fn load_state(&self) -> &LoadState {
        &self.load
    }

    /// Resolve the script-loading gate. Only the first result counts.
    pub fn on_script_loaded(&mut self, result: Result<(), ScriptLoadError>) {
        match &result {
            Ok(()) => info!("maps script loaded"),
            Err(e) => info!(error = %e, "maps script unavailable"),
        }
        if !self.load.resolve(result) {
            debug!("ignoring repeated script load result");
        }
    }

    /// Google refused the API key. Fails the gate, even after a load.
    pub fn on_credentials_rejected(&mut self) {
        if self.load.reject_credentials() {
            warn!("maps API key rejected");
            self.selection = None;
        }
    }

    /// Drop a pin where the map was clicked.
    pub fn on_map_activated(&mut self, coordinate: Coordinate, now: DateTime<Utc>) -> &Marker {
        let marker = self.markers.push(coordinate, now);
        debug!(id = %marker.id, %coordinate, "marker dropped");
        marker
    }

    /// Select a marker. Unknown ids are refused so the selection never dangles.
    pub fn on_marker_activated(&mut self, id: MarkerId) -> bool {
        if !self.markers.contains(id) {
            debug!(%id, "ignoring activation of unknown marker");
            return false;
        }
        self.selection = Some(id);
        true
    }

    pub fn on_selection_dismissed(&mut self) {
        self.selection = None;
    }

    /// Pan and zoom the viewport to `coordinate`.
    ///
    /// Does nothing until the script gate is loaded and a viewport exists.
    pub fn recenter<V: MapViewport>(&self, viewport: Option<&V>, coordinate: Coordinate) -> bool {
        let Some(viewport) = viewport.filter(|_| self.load.is_loaded()) else {
            debug!(%coordinate, "recenter before viewport ready");
            return false;
        };
        viewport.pan_to(coordinate);
        viewport.set_zoom(RECENTER_ZOOM);
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::collaborators::fakes::{RecordingViewport, ViewportCall};
    use chrono::TimeZone;

    fn t0() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap()
    }

    fn loaded() -> Shell {
        let mut shell = Shell::new();
        shell.on_script_loaded(Ok(()));
        shell
    }

    #[test]
    fn test_clicks_append_in_order() {
        let mut shell = loaded();
        let clicks = [
            Coordinate::new(48.60, 7.75),
            Coordinate::new(48.55, 7.80),
            Coordinate::new(48.50, 7.70),
        ];
        for c in clicks {
            shell.on_map_activated(c, t0());
        }
        let placed: Vec<Coordinate> = shell.markers().iter().map(|m| m.coordinate).collect();
        assert_eq!(placed, clicks);
    }

    #[test]
    fn test_activate_then_dismiss() {
        let mut shell = loaded();
        let first = shell.on_map_activated(Coordinate::new(48.60, 7.75), t0()).id;
        let second = shell.on_map_activated(Coordinate::new(48.55, 7.80), t0()).id;

        assert!(shell.on_marker_activated(second));
        assert_eq!(shell.selection(), Some(second));
        assert!(shell.on_marker_activated(first));
        assert_eq!(shell.selected().unwrap().coordinate, Coordinate::new(48.60, 7.75));

        shell.on_selection_dismissed();
        assert_eq!(shell.selection(), None);
        shell.on_selection_dismissed();
        assert_eq!(shell.selection(), None);
        assert_eq!(shell.markers().len(), 2);
    }

    #[test]
    fn test_unknown_marker_is_not_selected() {
        let mut shell = loaded();
        let id = shell.on_map_activated(Coordinate::new(1.0, 2.0), t0()).id;
        shell.on_marker_activated(id);
        assert!(!shell.on_marker_activated(MarkerId(99)));
        assert_eq!(shell.selection(), Some(id));
    }

    #[test]
    fn test_end_to_end_click_select_dismiss() {
        let mut shell = loaded();
        shell.on_map_activated(Coordinate::new(48.60, 7.75), t0());
        shell.on_map_activated(Coordinate::new(48.55, 7.80), t0());
        let before = shell.markers().clone();

        let first = shell.markers().iter().next().unwrap().id;
        shell.on_marker_activated(first);
        shell.on_selection_dismissed();

        assert_eq!(shell.markers(), &before);
        let coords: Vec<Coordinate> = shell.markers().iter().map(|m| m.coordinate).collect();
        assert_eq!(coords, [Coordinate::new(48.60, 7.75), Coordinate::new(48.55, 7.80)]);
        assert!(shell.selection().is_none());
    }

    #[test]
    fn test_recenter_pans_then_zooms() {
        let shell = loaded();
        let viewport = RecordingViewport::default();
        let target = Coordinate::new(48.58, 7.74);
        assert!(shell.recenter(Some(&viewport), target));
        assert_eq!(
            *viewport.calls.borrow(),
            vec![ViewportCall::Pan(target), ViewportCall::Zoom(14)]
        );
    }

    #[test]
    fn test_recenter_is_ignored_while_loading() {
        let shell = Shell::new();
        let viewport = RecordingViewport::default();
        assert!(!shell.recenter(Some(&viewport), Coordinate::new(0.0, 0.0)));
        assert!(viewport.calls.borrow().is_empty());
    }

    #[test]
    fn test_recenter_is_ignored_after_load_failure() {
        let mut shell = Shell::new();
        shell.on_script_loaded(Err(ScriptLoadError::MissingApiKey));
        let viewport = RecordingViewport::default();
        assert!(!shell.recenter(Some(&viewport), Coordinate::new(0.0, 0.0)));
        assert!(viewport.calls.borrow().is_empty());
    }

    #[test]
    fn test_rejected_key_after_load_stops_recentering() {
        let mut shell = loaded();
        let id = shell.on_map_activated(Coordinate::new(48.60, 7.75), t0()).id;
        shell.on_marker_activated(id);
        shell.on_credentials_rejected();

        assert_eq!(
            shell.load_state(),
            &LoadState::Failed(ScriptLoadError::InvalidApiKey)
        );
        assert!(shell.selection().is_none());
        let viewport = RecordingViewport::default();
        assert!(!shell.recenter(Some(&viewport), Coordinate::new(0.0, 0.0)));
        assert!(viewport.calls.borrow().is_empty());
    }

    #[test]
    fn test_recenter_without_viewport() {
        let shell = loaded();
        assert!(!shell.recenter(None::<&RecordingViewport>, Coordinate::new(0.0, 0.0)));
    }
}
