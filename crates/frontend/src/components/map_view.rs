use chrono::{DateTime, Utc};
use dioxus::logger::tracing::{error, info, warn};
use dioxus::prelude::*;
use futures::channel::mpsc::UnboundedReceiver;
use futures::StreamExt;
use pindrop_shared::geo::format_coordinate;
use pindrop_shared::models::Marker;
use pindrop_shared::relative_time::format_relative;
use pindrop_shared::shell::Shell;

use crate::bridge::{GoogleViewport, MapEvent};
use crate::config::AppConfig;

const MAP_CONTAINER_ID: &str = "pindrop-map-container";

const PIN_ICON: Asset = asset!("/assets/pin.svg");

/// Info-window body for a selected marker.
pub fn popup_html(marker: &Marker, now: DateTime<Utc>) -> String {
    format!(
        r#"<div class="pin-popup"><h3>Dropped</h3><p>{}</p><p class="coord">{}</p></div>"#,
        format_relative(marker.created_at, now),
        format_coordinate(marker.coordinate)
    )
}

/// Apply one map event to the shell.
fn handle_map_event(shell: &mut Signal<Shell>, event: MapEvent) {
    match event {
        MapEvent::Clicked(coordinate) => {
            shell.write().on_map_activated(coordinate, Utc::now());
        }
        MapEvent::MarkerClicked(id) => {
            shell.write().on_marker_activated(id);
        }
        MapEvent::PopupClosed => shell.write().on_selection_dismissed(),
    }
}

#[component]
pub fn MapView(shell: Signal<Shell>, viewport: Signal<Option<GoogleViewport>>) -> Element {
    let config = use_context::<AppConfig>();

    // Map callbacks fire outside the Dioxus runtime; funnel them through a
    // coroutine so signal writes happen inside it.
    let events = use_coroutine(move |mut rx: UnboundedReceiver<MapEvent>| async move {
        let mut shell = shell;
        while let Some(event) = rx.next().await {
            handle_map_event(&mut shell, event);
        }
    });

    let mut viewport = viewport;
    let onmounted = move |_evt: Event<MountedData>| {
        if viewport.peek().is_some() {
            return;
        }
        match GoogleViewport::create(MAP_CONTAINER_ID, &config, move |e| events.send(e)) {
            Ok(vp) => {
                info!("map viewport ready");
                viewport.set(Some(vp));
            }
            Err(e) => error!(error = %e, "could not create map"),
        }
    };

    // Keep glyphs and the popup in step with the shell.
    use_effect(move || {
        let shell = shell.read();
        let viewport = viewport.read();
        let Some(vp) = viewport.as_ref() else {
            return;
        };
        if let Err(e) = vp.sync_markers(shell.markers(), &PIN_ICON.to_string()) {
            warn!(error = %e, "could not sync markers");
        }
        match shell.selected() {
            Some(marker) => vp.open_popup(marker, &popup_html(marker, Utc::now())),
            None => vp.close_popup(),
        }
    });

    rsx! {
        div {
            id: MAP_CONTAINER_ID,
            class: "map-container",
            onmounted: onmounted,
        }
    }
}
