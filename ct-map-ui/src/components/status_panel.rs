//! Loading / error panel shown in place of the map.

use crate::state::LoadStatus;
use dioxus::prelude::*;

#[derive(Props, Clone, PartialEq)]
pub struct StatusPanelProps {
    pub status: LoadStatus,
}

/// Renders nothing once data is ready; otherwise a loading note or the error.
#[component]
pub fn StatusPanel(props: StatusPanelProps) -> Element {
    match props.status {
        LoadStatus::Ready => rsx! {},
        LoadStatus::Loading => rsx! {
            div {
                style: "display: flex; justify-content: center; align-items: center; padding: 40px; color: #666;",
                "Loading buoy data..."
            }
        },
        LoadStatus::Failed(message) => rsx! {
            div {
                style: "padding: 12px 16px; margin: 8px 0; background: #FFEBEE; color: #C62828; border-radius: 4px; border: 1px solid #EF9A9A;",
                strong { "Map data unavailable: " }
                "{message}"
            }
        },
    }
}
