use dioxus::prelude::*;
use pindrop_shared::geo::Coordinate;
use pindrop_shared::locate::locate;

use crate::bridge::BrowserGeolocator;

const COMPASS_ICON: Asset = asset!("/assets/compass.svg");

#[component]
pub fn LocateButton(on_located: EventHandler<Coordinate>) -> Element {
    let mut locating = use_signal(|| false);

    rsx! {
        button {
            class: "locate",
            title: "Center on my location",
            "aria-label": "Center on my location",
            disabled: *locating.read(),
            onclick: move |_| {
                locating.set(true);
                spawn(async move {
                    let found = locate(&BrowserGeolocator).await;
                    locating.set(false);
                    if let Some(coordinate) = found {
                        on_located.call(coordinate);
                    }
                });
            },
            img { src: COMPASS_ICON, alt: "compass" }
        }
    }
}
