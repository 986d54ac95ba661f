//! Application state managed via Dioxus context.
//!
//! `AppState` bundles the reactive signals into a single struct provided via
//! `use_context_provider`. Child components retrieve it with `use_context::<AppState>()`.

use crate::context::MapContext;
use ct_buoy::pipeline::RenderState;
use dioxus::prelude::*;

/// Where the one-shot data load currently stands.
#[derive(Debug, Clone, PartialEq)]
pub enum LoadStatus {
    Loading,
    Ready,
    Failed(String),
}

/// Shared application state for the bloom map.
#[derive(Clone, Copy)]
pub struct AppState {
    /// Startup configuration, fixed after launch
    pub context: Signal<MapContext>,
    pub status: Signal<LoadStatus>,
    /// Result of the last successful pipeline run
    pub render_state: Signal<Option<RenderState>>,
}

impl AppState {
    pub fn new(context: MapContext) -> Self {
        Self {
            context: Signal::new(context),
            status: Signal::new(LoadStatus::Loading),
            render_state: Signal::new(None),
        }
    }
}
