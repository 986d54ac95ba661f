//! ClearTide Bloom Map
//!
//! Shows simulated algal bloom zones around Tampa Bay together with the
//! latest telemetry from each monitoring buoy.
//!
//! Settings are `MapContext` defaults, overridden by the page's
//! `bloom-map-config` JSON element when present.
//!
//! Data flow:
//! 1. On mount, the station GeoJSON and the readings JSON are fetched
//!    concurrently from the URLs in `MapContext`.
//! 2. Once both arrive, `ct_buoy` joins them into a `RenderState`. If either
//!    fetch fails nothing is drawn and the error is shown instead.
//! 3. The render state and the static bloom zones are pushed onto a Leaflet
//!    map: "Bloom Zones" and "Buoys" overlays, a legend and, when any buoy
//!    reported a valid timestamp, a "Last Updated" banner.

use ct_buoy::source::load_render_state;
use ct_map_ui::components::{MapContainer, StatusPanel};
use ct_map_ui::context::MapContext;
use ct_map_ui::js_bridge::{inline_text, BrowserSource, LeafletSurface};
use ct_map_ui::overlay::present;
use ct_map_ui::state::{AppState, LoadStatus};
use dioxus::prelude::*;

/// DOM element ID Leaflet renders into.
const MAP_ID: &str = "bloom-map";

/// Optional inline JSON in `index.html` overriding `MapContext` defaults.
const CONFIG_ID: &str = "bloom-map-config";

fn main() {
    dioxus_logger::init(dioxus_logger::tracing::Level::INFO).expect("failed to init logger");
    dioxus::LaunchBuilder::new()
        .with_cfg(dioxus::web::Config::new().rootname("bloom-map-root"))
        .launch(App);
}

#[component]
fn App() -> Element {
    let mut state = use_context_provider(|| {
        AppState::new(MapContext::with_overrides(inline_text(CONFIG_ID).as_deref()))
    });

    // Fetch both documents once on mount
    use_effect(move || {
        spawn(async move {
            let ctx: MapContext = (*state.context.peek()).clone();
            let features = BrowserSource::new(ctx.features_url.clone(), ctx.fetch_timeout_ms);
            let readings = BrowserSource::new(ctx.readings_url.clone(), ctx.fetch_timeout_ms);

            match load_render_state(&features, &readings, ctx.feature_policy).await {
                Ok(render_state) => {
                    state.render_state.set(Some(render_state));
                    state.status.set(LoadStatus::Ready);
                }
                Err(e) => {
                    log::error!("Failed to load buoy data: {}", e);
                    state.status.set(LoadStatus::Failed(e.to_string()));
                }
            }
        });
    });

    // Draw the map once data is ready
    use_effect(move || {
        if (state.status)() != LoadStatus::Ready {
            return;
        }

        let render_state = match &*state.render_state.read() {
            Some(rs) => rs.clone(),
            None => return,
        };
        let ctx: MapContext = (*state.context.read()).clone();

        let mut surface = LeafletSurface::new(MAP_ID, &ctx);
        present(&mut surface, &render_state, &ctx.zones);
        surface.commit();
    });

    let status = (state.status)();

    rsx! {
        div {
            style: "padding: 16px; font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', Roboto, sans-serif;",

            h3 {
                style: "margin: 0 0 4px 0; font-size: 16px;",
                "ClearTide Bloom Map"
            }
            p {
                style: "margin: 0 0 8px 0; font-size: 12px; color: #666;",
                "Simulated bloom zones and live buoy readings, Tampa Bay"
            }

            if status == LoadStatus::Ready {
                MapContainer { id: MAP_ID.to_string() }
            } else {
                StatusPanel { status }
            }
        }
    }
}
