use dioxus::prelude::*;
use gloo_timers::future::TimeoutFuture;
use pindrop_shared::collaborators::PlaceSearch;
use pindrop_shared::geo::Coordinate;
use pindrop_shared::search::{resolve_choice, SearchState};

use crate::bridge::PlacesService;
use crate::config::{AppConfig, SUGGEST_DEBOUNCE_MS};

#[component]
pub fn SearchBox(on_resolved: EventHandler<Coordinate>) -> Element {
    let config = use_context::<AppConfig>();
    let places = use_hook(|| PlacesService::new(config.search_bias));
    let mut search = use_signal(SearchState::new);

    let mut on_text = move |text: String| {
        let Some(generation) = search.write().on_text_changed(&text) else {
            return;
        };
        spawn(async move {
            TimeoutFuture::new(SUGGEST_DEBOUNCE_MS).await;
            if !search.peek().is_current(generation) {
                return;
            }
            let result = places.suggest(&text).await;
            search.write().apply_suggestions(generation, result);
        });
    };

    let mut choose = move |description: String| {
        search.write().choose(&description);
        spawn(async move {
            if let Some(coordinate) = resolve_choice(&places, &description).await {
                on_resolved.call(coordinate);
            }
        });
    };

    let state = search.read();
    let value = state.value().to_string();
    let suggestions = state.suggestions().to_vec();
    let highlighted = state.highlighted();
    drop(state);

    rsx! {
        div { class: "search",
            input {
                r#type: "search",
                placeholder: "Search an address",
                "aria-label": "Search an address",
                autocomplete: "off",
                // The map screen only mounts once the script (places library
                // included) has loaded, so this settles on the first render.
                disabled: !places.is_ready(),
                value: "{value}",
                oninput: move |evt: Event<FormData>| on_text(evt.value()),
                onkeydown: move |evt: Event<KeyboardData>| match evt.key() {
                    Key::ArrowDown => {
                        evt.prevent_default();
                        search.write().move_highlight(1);
                    }
                    Key::ArrowUp => {
                        evt.prevent_default();
                        search.write().move_highlight(-1);
                    }
                    Key::Enter => {
                        let picked = search.read().highlighted_description().map(str::to_string);
                        if let Some(description) = picked {
                            choose(description);
                        }
                    }
                    Key::Escape => search.write().dismiss(),
                    _ => {}
                },
            }
            if !suggestions.is_empty() {
                ul { class: "suggestions", role: "listbox",
                    for (i, s) in suggestions.into_iter().enumerate() {
                        {
                            let description = s.description.clone();
                            let cls = if highlighted == Some(i) { "suggestion active" } else { "suggestion" };
                            rsx! {
                                li {
                                    key: "{s.id}",
                                    class: "{cls}",
                                    role: "option",
                                    // Keep focus in the input while clicking.
                                    onmousedown: move |evt: Event<MouseData>| evt.prevent_default(),
                                    onclick: move |_| choose(description.clone()),
                                    "{s.description}"
                                }
                            }
                        }
                    }
                }
            }
        }
    }
}
