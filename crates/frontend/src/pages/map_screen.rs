use dioxus::logger::tracing::debug;
use dioxus::prelude::*;
use futures::channel::mpsc::UnboundedReceiver;
use futures::StreamExt;
use pindrop_shared::geo::Coordinate;
use pindrop_shared::models::LoadState;
use pindrop_shared::shell::Shell;

use crate::bridge::{self, GoogleViewport};
use crate::components::locate_button::LocateButton;
use crate::components::map_view::MapView;
use crate::components::search_box::SearchBox;
use crate::config::AppConfig;

/// Header label for the number of dropped pins.
pub fn pin_count_label(count: usize) -> String {
    match count {
        0 => "No pins yet".to_string(),
        1 => "1 pin".to_string(),
        n => format!("{n} pins"),
    }
}

#[component]
pub fn MapScreen() -> Element {
    let config = use_context_provider(AppConfig::from_build_env);

    let mut shell = use_signal(Shell::new);
    let viewport = use_signal(|| None::<GoogleViewport>);

    // gm_authFailure fires outside the Dioxus runtime.
    let auth = use_coroutine(move |mut rx: UnboundedReceiver<()>| async move {
        let mut shell = shell;
        while rx.next().await.is_some() {
            shell.write().on_credentials_rejected();
        }
    });
    use_hook(|| bridge::on_auth_failure(move || auth.send(())));

    let script = use_resource(move || {
        let config = config.clone();
        async move { bridge::load_maps_script(&config).await }
    });

    // Resolve the gate once the script settles.
    use_effect(move || {
        if let Some(result) = script.read().as_ref() {
            shell.write().on_script_loaded(result.clone());
        }
    });

    let recenter = move |coordinate: Coordinate| {
        if !shell.read().recenter(viewport.read().as_ref(), coordinate) {
            debug!(%coordinate, "recenter skipped");
        }
    };

    let load = shell.read().load_state().clone();
    match load {
        LoadState::Loading => rsx! {
            div { class: "status", "Loading maps\u{2026}" }
        },
        LoadState::Failed(e) => rsx! {
            div { class: "status error",
                p { "Error loading maps" }
                p { class: "status-detail", "{e}" }
            }
        },
        LoadState::Loaded => {
            let count = pin_count_label(shell.read().markers().len());
            rsx! {
                div { class: "app",
                    div { class: "header",
                        h1 { "Pin Drop" }
                        span { class: "pin-count", "{count}" }
                        SearchBox { on_resolved: recenter }
                        LocateButton { on_located: recenter }
                    }
                    MapView { shell: shell, viewport: viewport }
                }
            }
        }
    }
}
