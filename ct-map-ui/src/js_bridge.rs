//! Browser interop: Leaflet through `js_sys::eval()`, documents through `web_sys`.
//!
//! Leaflet is loaded by `index.html` as a global `L`. [`LeafletSurface`]
//! turns [`MapSurface`] calls into Leaflet statements and evaluates them in
//! one go once Leaflet and the container element exist. Document fetches use
//! `window.fetch` with an `AbortController` armed by a timer.

use crate::context::MapContext;
use crate::surface::{ControlPosition, MapSurface, MarkerIcon, Overlay, PolygonStyle};
use ct_buoy::error::{BuoyError, Result};
use ct_buoy::lat_lng::LatLng;
use ct_buoy::source::DocumentSource;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;
use web_sys::{AbortController, DomException, RequestCache, RequestInit, Response, Window};

/// Name of the single base layer in the layer-toggle control.
const BASE_LAYER_NAME: &str = "OpenStreetMap";

/// Execute arbitrary JS, wrapping in try/catch to avoid panics.
pub fn call_js(code: &str) {
    let wrapped = format!(
        "try {{ {} }} catch(e) {{ console.warn('ClearTide JS call failed:', e); }}",
        code
    );
    let _ = js_sys::eval(&wrapped);
}

/// Quote a string as a JS literal. JSON string syntax is valid JS.
fn js_str(s: &str) -> String {
    serde_json::to_string(s).unwrap_or_else(|_| "\"\"".to_string())
}

fn js_lat_lng(p: &LatLng) -> String {
    format!("[{}, {}]", p.latitude, p.longitude)
}

fn js_overlay(overlay: Overlay) -> String {
    format!("overlays[{}]", js_str(overlay.label()))
}

/// A [`MapSurface`] that collects Leaflet statements for a single evaluation.
#[derive(Debug, Clone)]
pub struct LeafletSurface {
    container_id: String,
    statements: Vec<String>,
}

impl LeafletSurface {
    /// Start a fresh map in `container_id`: base layer, both overlay groups
    /// and the layer-toggle control. A map left from an earlier run is removed.
    pub fn new(container_id: &str, ctx: &MapContext) -> Self {
        let overlay_groups = Overlay::ALL
            .iter()
            .map(|o| format!("{}: L.layerGroup()", js_str(o.label())))
            .collect::<Vec<String>>()
            .join(", ");
        let init = format!(
            "if (window.__ctMap) {{ window.__ctMap.remove(); }}\n\
             var map = L.map({id}).setView({center}, {zoom});\n\
             var base = L.tileLayer({tiles}, {{ maxZoom: {max_zoom}, attribution: {attribution} }}).addTo(map);\n\
             var overlays = {{ {groups} }};\n\
             L.control.layers({{ {base_name}: base }}, overlays).addTo(map);\n\
             window.__ctMap = map;\n\
             window.__ctOverlays = overlays;",
            id = js_str(container_id),
            center = js_lat_lng(&ctx.center),
            zoom = ctx.zoom,
            tiles = js_str(&ctx.tile_url),
            max_zoom = ctx.max_zoom,
            attribution = js_str(&ctx.attribution),
            groups = overlay_groups,
            base_name = js_str(BASE_LAYER_NAME),
        );
        LeafletSurface {
            container_id: container_id.to_string(),
            statements: vec![init],
        }
    }

    /// The complete script, polling until Leaflet and the container are ready.
    pub fn script(&self) -> String {
        format!(
            r#"
        (function() {{
            var poll = setInterval(function() {{
                if (typeof L !== 'undefined' && document.getElementById({id})) {{
                    clearInterval(poll);
                    try {{
                        {body}
                    }} catch(e) {{ console.error('[ClearTide] map render error:', e); }}
                }}
            }}, 100);
        }})();
        "#,
            id = js_str(&self.container_id),
            body = self.statements.join("\n"),
        )
    }

    /// Evaluate everything collected so far.
    pub fn commit(self) {
        call_js(&self.script());
    }
}

impl MapSurface for LeafletSurface {
    fn add_polygon(&mut self, overlay: Overlay, boundary: &[LatLng], style: &PolygonStyle, popup: &str) {
        let ring = boundary.iter().map(js_lat_lng).collect::<Vec<String>>().join(", ");
        let style_json = serde_json::to_string(style).unwrap_or_else(|_| "{}".to_string());
        self.statements.push(format!(
            "L.polygon([{}], {}).bindPopup({}).addTo({});",
            ring,
            style_json,
            js_str(popup),
            js_overlay(overlay)
        ));
    }

    fn add_marker(&mut self, overlay: Overlay, coordinates: LatLng, icon: MarkerIcon, popup: &str) {
        let color = icon.color();
        self.statements.push(format!(
            "L.circleMarker({}, {{ radius: 7, color: {c}, fillColor: {c}, fillOpacity: 0.9 }}).bindPopup({}).addTo({});",
            js_lat_lng(&coordinates),
            js_str(popup),
            js_overlay(overlay),
            c = js_str(color),
        ));
    }

    fn add_control(&mut self, position: ControlPosition, content: &str) {
        self.statements.push(format!(
            "(function() {{ var c = L.control({{ position: {} }}); \
             c.onAdd = function() {{ var d = L.DomUtil.create('div', 'ct-control'); d.innerHTML = {}; return d; }}; \
             c.addTo(map); }})();",
            js_str(position.as_leaflet()),
            js_str(content)
        ));
    }

    fn set_overlay(&mut self, overlay: Overlay, visible: bool) {
        let group = js_overlay(overlay);
        self.statements.push(if visible {
            format!("{}.addTo(map);", group)
        } else {
            format!("map.removeLayer({});", group)
        });
    }
}

fn js_error_message(value: JsValue) -> String {
    if let Some(err) = value.dyn_ref::<js_sys::Error>() {
        return String::from(err.message());
    }
    if let Some(err) = value.dyn_ref::<DomException>() {
        return err.message();
    }
    value.as_string().unwrap_or_else(|| format!("{:?}", value))
}

/// An aborted fetch only ever comes from the timeout.
fn fetch_error_reason(value: JsValue) -> String {
    match value.dyn_ref::<DomException>() {
        Some(err) if err.name() == "AbortError" => "request timed out".to_string(),
        _ => js_error_message(value),
    }
}

/// Fetch a text document, aborting after `timeout_ms`.
///
/// Non-success statuses are errors.
pub async fn fetch_text(url: &str, timeout_ms: u32) -> std::result::Result<String, String> {
    let window = web_sys::window().ok_or_else(|| "no window available".to_string())?;
    let controller = AbortController::new().map_err(js_error_message)?;

    let _timer = AbortTimer::arm(&window, &controller, timeout_ms)?;
    fetch_with_controller(&window, url, &controller).await
}

/// Aborts a controller after a delay unless dropped first.
struct AbortTimer {
    window: Window,
    handle: i32,
    _callback: Closure<dyn FnMut()>,
}

impl AbortTimer {
    fn arm(
        window: &Window,
        controller: &AbortController,
        timeout_ms: u32,
    ) -> std::result::Result<Self, String> {
        let controller = controller.clone();
        let callback: Closure<dyn FnMut()> = Closure::once(move || controller.abort());
        let handle = window
            .set_timeout_with_callback_and_timeout_and_arguments_0(
                callback.as_ref().unchecked_ref(),
                i32::try_from(timeout_ms).unwrap_or(i32::MAX),
            )
            .map_err(js_error_message)?;
        Ok(AbortTimer {
            window: window.clone(),
            handle,
            _callback: callback,
        })
    }
}

impl Drop for AbortTimer {
    fn drop(&mut self) {
        self.window.clear_timeout_with_handle(self.handle);
    }
}

async fn fetch_with_controller(
    window: &Window,
    url: &str,
    controller: &AbortController,
) -> std::result::Result<String, String> {
    let init = RequestInit::new();
    init.set_method("GET");
    init.set_cache(RequestCache::NoCache);
    init.set_signal(Some(&controller.signal()));

    let response: Response = JsFuture::from(window.fetch_with_str_and_init(url, &init))
        .await
        .map_err(fetch_error_reason)?
        .dyn_into()
        .map_err(|_| "fetch did not resolve to a Response".to_string())?;
    if !response.ok() {
        return Err(format!("bad response status {}", response.status()));
    }

    let body = JsFuture::from(response.text().map_err(js_error_message)?)
        .await
        .map_err(fetch_error_reason)?;
    body.as_string()
        .ok_or_else(|| "response body is not text".to_string())
}

/// Text of an inline element such as `<script type="application/json">`.
pub fn inline_text(element_id: &str) -> Option<String> {
    web_sys::window()?
        .document()?
        .get_element_by_id(element_id)?
        .text_content()
}

/// A document fetched by the browser.
#[derive(Debug, Clone)]
pub struct BrowserSource {
    url: String,
    timeout_ms: u32,
}

impl BrowserSource {
    pub fn new(url: impl Into<String>, timeout_ms: u32) -> Self {
        BrowserSource {
            url: url.into(),
            timeout_ms,
        }
    }
}

impl DocumentSource for BrowserSource {
    async fn fetch(&self) -> Result<String> {
        fetch_text(&self.url, self.timeout_ms)
            .await
            .map_err(|reason| BuoyError::data_fetch(&self.url, reason))
    }

    fn describe(&self) -> String {
        self.url.clone()
    }
}
