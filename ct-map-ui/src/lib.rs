//! Overlay presentation and Dioxus components for the ClearTide bloom map.
//!
//! This crate provides:
//! - `surface`: the `MapSurface` capability trait the presentation layer draws through
//! - `overlay`, `popup`, `legend`: turning a `RenderState` into polygons, markers and controls
//! - `js_bridge`: the Leaflet implementation of `MapSurface` and browser fetches
//! - `context` / `state`: startup configuration and reactive app state
//! - `components`: reusable RSX components

pub mod components;
pub mod context;
pub mod js_bridge;
pub mod legend;
pub mod overlay;
pub mod popup;
pub mod state;
pub mod surface;
