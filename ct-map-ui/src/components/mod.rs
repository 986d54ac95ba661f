//! Reusable Dioxus RSX components for the bloom map.

mod map_container;
mod status_panel;

pub use map_container::MapContainer;
pub use status_panel::StatusPanel;
