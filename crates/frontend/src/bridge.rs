//! Browser side of the collaborators: the Google Maps JavaScript API
//! (map, markers, info window, places, geocoder) and `navigator.geolocation`.
//!
//! JavaScript hands results back as JSON strings so decoding stays in Rust
//! and can be tested off the browser.
use pindrop_shared::collaborators::{Geolocator, MapViewport, PlaceSearch};
use pindrop_shared::error::{GeolocationError, LookupError, ScriptLoadError};
use pindrop_shared::geo::Coordinate;
use pindrop_shared::models::{Marker, MarkerId, MarkerList, Suggestion};
use serde::Serialize;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::JsFuture;

use crate::config::{AppConfig, SearchBias};

#[wasm_bindgen(inline_js = "
export function pindrop_load_script(apiKey, libraries) {
    if (window.google && window.google.maps && window.google.maps.Map) {
        return Promise.resolve();
    }
    if (window.__pindropScript) {
        return window.__pindropScript;
    }
    window.__pindropScript = new Promise((resolve, reject) => {
        const params = new URLSearchParams({
            key: apiKey,
            libraries,
            callback: '__pindropMapsReady',
        });
        window.__pindropMapsReady = () => resolve();
        const script = document.createElement('script');
        script.src = 'https://maps.googleapis.com/maps/api/js?' + params.toString();
        script.async = true;
        script.onerror = () => reject(new Error('could not fetch the Google Maps script'));
        document.head.appendChild(script);
    });
    return window.__pindropScript;
}

export function pindrop_on_auth_failure(callback) {
    window.gm_authFailure = () => callback();
}

export function pindrop_create_map(container, lat, lng, zoom, styles, onClick, onMarkerClick, onPopupClose) {
    const map = new google.maps.Map(container, {
        center: { lat, lng },
        zoom,
        styles: JSON.parse(styles),
        disableDefaultUI: true,
        zoomControl: true,
        clickableIcons: false,
    });
    map.addListener('click', (e) => {
        if (e.latLng) onClick(e.latLng.lat(), e.latLng.lng());
    });
    const info = new google.maps.InfoWindow();
    info.addListener('closeclick', () => onPopupClose());
    map.__pindrop = { glyphs: new Map(), info, onMarkerClick };
    return map;
}

export function pindrop_pan_to(map, lat, lng) {
    map.panTo({ lat, lng });
}

export function pindrop_set_zoom(map, zoom) {
    map.setZoom(zoom);
}

export function pindrop_sync_markers(map, markers, iconUrl) {
    const state = map.__pindrop;
    const wanted = JSON.parse(markers);
    const seen = new Set();
    for (const m of wanted) {
        seen.add(m.id);
        if (state.glyphs.has(m.id)) continue;
        const glyph = new google.maps.Marker({
            map,
            position: { lat: m.lat, lng: m.lng },
            title: m.title,
            icon: {
                url: iconUrl,
                scaledSize: new google.maps.Size(30, 30),
                origin: new google.maps.Point(0, 0),
                anchor: new google.maps.Point(15, 30),
            },
        });
        glyph.addListener('click', () => state.onMarkerClick(m.id));
        state.glyphs.set(m.id, glyph);
    }
    for (const [id, glyph] of state.glyphs) {
        if (!seen.has(id)) {
            glyph.setMap(null);
            state.glyphs.delete(id);
        }
    }
}

export function pindrop_open_popup(map, lat, lng, html) {
    const info = map.__pindrop.info;
    info.setContent(html);
    info.setPosition({ lat, lng });
    info.open({ map });
}

export function pindrop_close_popup(map) {
    map.__pindrop.info.close();
}

export function pindrop_places_ready() {
    return !!(window.google && google.maps && google.maps.places);
}

export function pindrop_suggest(input, lat, lng, radius) {
    return new Promise((resolve, reject) => {
        const service = new google.maps.places.AutocompleteService();
        service.getPlacePredictions(
            { input, locationBias: { center: { lat, lng }, radius } },
            (predictions, status) => {
                const S = google.maps.places.PlacesServiceStatus;
                if (status === S.OK) {
                    resolve(JSON.stringify(predictions.map((p) => ({
                        id: p.place_id,
                        description: p.description,
                    }))));
                } else if (status === S.ZERO_RESULTS) {
                    resolve('[]');
                } else {
                    reject(String(status));
                }
            },
        );
    });
}

export function pindrop_geocode(address) {
    return new Promise((resolve, reject) => {
        new google.maps.Geocoder().geocode({ address }, (results, status) => {
            if (status === 'OK' && results && results.length > 0) {
                const loc = results[0].geometry.location;
                resolve(JSON.stringify({ lat: loc.lat(), lng: loc.lng() }));
            } else {
                reject(String(status));
            }
        });
    });
}

export function pindrop_current_position() {
    return new Promise((resolve, reject) => {
        if (!('geolocation' in navigator)) {
            reject('unsupported');
            return;
        }
        navigator.geolocation.getCurrentPosition(
            (p) => resolve(JSON.stringify({ lat: p.coords.latitude, lng: p.coords.longitude })),
            (e) => reject(e.code === 1 ? 'permission-denied' : e.code === 3 ? 'timeout' : 'position-unavailable'),
        );
    });
}
")]
extern "C" {
    #[wasm_bindgen(catch)]
    fn pindrop_load_script(api_key: &str, libraries: &str) -> Result<js_sys::Promise, JsValue>;

    fn pindrop_on_auth_failure(callback: &JsValue);

    #[wasm_bindgen(catch)]
    fn pindrop_create_map(
        container: &web_sys::Element,
        lat: f64,
        lng: f64,
        zoom: u8,
        styles: &str,
        on_click: &JsValue,
        on_marker_click: &JsValue,
        on_popup_close: &JsValue,
    ) -> Result<JsValue, JsValue>;

    fn pindrop_pan_to(map: &JsValue, lat: f64, lng: f64);

    fn pindrop_set_zoom(map: &JsValue, zoom: u8);

    #[wasm_bindgen(catch)]
    fn pindrop_sync_markers(map: &JsValue, markers: &str, icon_url: &str) -> Result<(), JsValue>;

    fn pindrop_open_popup(map: &JsValue, lat: f64, lng: f64, html: &str);

    fn pindrop_close_popup(map: &JsValue);

    fn pindrop_places_ready() -> bool;

    #[wasm_bindgen(catch)]
    fn pindrop_suggest(input: &str, lat: f64, lng: f64, radius: f64)
        -> Result<js_sys::Promise, JsValue>;

    #[wasm_bindgen(catch)]
    fn pindrop_geocode(address: &str) -> Result<js_sys::Promise, JsValue>;

    fn pindrop_current_position() -> js_sys::Promise;
}

/// Best-effort text for a rejected promise or thrown value.
fn js_error_message(value: JsValue) -> String {
    if let Some(s) = value.as_string() {
        return s;
    }
    if let Some(err) = value.dyn_ref::<js_sys::Error>() {
        return String::from(err.message());
    }
    format!("{:?}", value)
}

// ---------------------------------------------------------------------------
// Payload codecs
// ---------------------------------------------------------------------------

#[derive(Debug, Serialize)]
struct GlyphPayload {
    id: u64,
    lat: f64,
    lng: f64,
    title: String,
}

/// JSON array describing the glyphs the map should show.
pub fn markers_payload(markers: &MarkerList) -> String {
    let glyphs: Vec<GlyphPayload> = markers
        .iter()
        .map(|m| GlyphPayload {
            id: m.id.0,
            lat: m.coordinate.latitude,
            lng: m.coordinate.longitude,
            title: format!("Pin {}", m.id),
        })
        .collect();
    serde_json::to_string(&glyphs).unwrap_or_else(|_| "[]".to_string())
}

pub fn decode_suggestions(json: &str) -> Result<Vec<Suggestion>, LookupError> {
    serde_json::from_str(json).map_err(|e| LookupError::Decode(e.to_string()))
}

pub fn decode_coordinate(json: &str) -> Result<Coordinate, LookupError> {
    let c: Coordinate = serde_json::from_str(json).map_err(|e| LookupError::Decode(e.to_string()))?;
    if !c.is_valid() {
        return Err(LookupError::Decode(format!("coordinate out of range: {json}")));
    }
    Ok(c)
}

/// Map a places/geocoder status string to a lookup error.
pub fn lookup_error_from_status(status: &str, query: &str) -> LookupError {
    match status {
        "ZERO_RESULTS" | "NOT_FOUND" => LookupError::NoResults(query.to_string()),
        _ => LookupError::Service(status.to_string()),
    }
}

// ---------------------------------------------------------------------------
// Script loading
// ---------------------------------------------------------------------------

/// Inject the maps script (once per page) and wait for its ready callback.
pub async fn load_maps_script(config: &AppConfig) -> Result<(), ScriptLoadError> {
    let Some(key) = config.api_key.as_deref() else {
        return Err(ScriptLoadError::MissingApiKey);
    };
    let promise = pindrop_load_script(key, config.libraries)
        .map_err(|e| ScriptLoadError::Failed(js_error_message(e)))?;
    JsFuture::from(promise)
        .await
        .map_err(|e| ScriptLoadError::Failed(js_error_message(e)))?;
    Ok(())
}

/// Run `f` when Google rejects the API key. Must be registered before the
/// script loads; Google may report it before or after the ready callback.
pub fn on_auth_failure<F: FnMut() + 'static>(f: F) {
    let callback = Closure::<dyn FnMut()>::new(f).into_js_value();
    pindrop_on_auth_failure(&callback);
}

// ---------------------------------------------------------------------------
// Map viewport
// ---------------------------------------------------------------------------

/// Things the map reports back to the app.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MapEvent {
    Clicked(Coordinate),
    MarkerClicked(MarkerId),
    PopupClosed,
}

/// Handle to a live `google.maps.Map`.
pub struct GoogleViewport {
    map: JsValue,
}

impl GoogleViewport {
    /// Create the map inside the element with `container_id`. Map events
    /// are forwarded to `emit` for as long as the page lives.
    pub fn create<F>(container_id: &str, config: &AppConfig, emit: F) -> Result<Self, String>
    where
        F: Fn(MapEvent) + Copy + 'static,
    {
        let container = web_sys::window()
            .and_then(|w| w.document())
            .and_then(|d| d.get_element_by_id(container_id))
            .ok_or_else(|| format!("missing map container #{container_id}"))?;

        let on_click = Closure::<dyn FnMut(f64, f64)>::new(move |lat: f64, lng: f64| {
            emit(MapEvent::Clicked(Coordinate::new(lat, lng)))
        })
        .into_js_value();
        let on_marker_click = Closure::<dyn FnMut(f64)>::new(move |id: f64| {
            emit(MapEvent::MarkerClicked(MarkerId(id as u64)))
        })
        .into_js_value();
        let on_popup_close =
            Closure::<dyn FnMut()>::new(move || emit(MapEvent::PopupClosed)).into_js_value();

        let center = config.initial_center;
        let map = pindrop_create_map(
            &container,
            center.latitude,
            center.longitude,
            config.initial_zoom,
            config.map_styles,
            &on_click,
            &on_marker_click,
            &on_popup_close,
        )
        .map_err(js_error_message)?;
        Ok(Self { map })
    }

    /// Add glyphs for new markers and drop glyphs for missing ones.
    pub fn sync_markers(&self, markers: &MarkerList, icon_url: &str) -> Result<(), String> {
        pindrop_sync_markers(&self.map, &markers_payload(markers), icon_url).map_err(js_error_message)
    }

    pub fn open_popup(&self, marker: &Marker, html: &str) {
        let c = marker.coordinate;
        pindrop_open_popup(&self.map, c.latitude, c.longitude, html);
    }

    pub fn close_popup(&self) {
        pindrop_close_popup(&self.map);
    }
}

impl MapViewport for GoogleViewport {
    fn pan_to(&self, coordinate: Coordinate) {
        pindrop_pan_to(&self.map, coordinate.latitude, coordinate.longitude);
    }

    fn set_zoom(&self, level: u8) {
        pindrop_set_zoom(&self.map, level);
    }
}

// ---------------------------------------------------------------------------
// Places
// ---------------------------------------------------------------------------

/// Autocomplete service plus geocoder.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlacesService {
    bias: SearchBias,
}

impl PlacesService {
    pub fn new(bias: SearchBias) -> Self {
        Self { bias }
    }
}

/// Await a promise that resolves to a JSON string.
async fn await_json(promise: js_sys::Promise, query: &str) -> Result<String, LookupError> {
    let value = JsFuture::from(promise)
        .await
        .map_err(|e| lookup_error_from_status(&js_error_message(e), query))?;
    value
        .as_string()
        .ok_or_else(|| LookupError::Decode("expected a JSON string".to_string()))
}

impl PlaceSearch for PlacesService {
    fn is_ready(&self) -> bool {
        pindrop_places_ready()
    }

    async fn suggest(&self, text: &str) -> Result<Vec<Suggestion>, LookupError> {
        if !self.is_ready() {
            return Err(LookupError::NotReady);
        }
        let center = self.bias.center;
        let promise = pindrop_suggest(text, center.latitude, center.longitude, self.bias.radius_m)
            .map_err(|e| LookupError::Service(js_error_message(e)))?;
        decode_suggestions(&await_json(promise, text).await?)
    }

    async fn resolve(&self, description: &str) -> Result<Coordinate, LookupError> {
        if !self.is_ready() {
            return Err(LookupError::NotReady);
        }
        let promise =
            pindrop_geocode(description).map_err(|e| LookupError::Service(js_error_message(e)))?;
        decode_coordinate(&await_json(promise, description).await?)
    }
}

// ---------------------------------------------------------------------------
// Geolocation
// ---------------------------------------------------------------------------

/// `navigator.geolocation`, one request per call.
#[derive(Debug, Clone, Copy, Default)]
pub struct BrowserGeolocator;

impl Geolocator for BrowserGeolocator {
    async fn current_position(&self) -> Result<Coordinate, GeolocationError> {
        let value = JsFuture::from(pindrop_current_position())
            .await
            .map_err(|e| GeolocationError::from_code(&js_error_message(e)))?;
        value
            .as_string()
            .and_then(|json| decode_coordinate(&json).ok())
            .ok_or(GeolocationError::Unavailable)
    }
}
