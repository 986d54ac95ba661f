//! Pushes a pipeline result and the static bloom zones onto a map.

use crate::legend::legend_html;
use crate::popup::{last_updated_banner, station_popup, zone_popup};
use crate::surface::{ControlPosition, MapSurface, MarkerIcon, Overlay, PolygonStyle};
use ct_buoy::bloom_zone::BloomZone;
use ct_buoy::pipeline::RenderState;
use log::info;

/// What was handed to the surface, for logging and tests.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Default)]
pub struct PresentationSummary {
    pub polygons: usize,
    pub markers: usize,
    pub banner: bool,
}

/// Populate both overlays, the legend and the optional banner.
pub fn present<S: MapSurface>(
    surface: &mut S,
    state: &RenderState,
    zones: &[BloomZone],
) -> PresentationSummary {
    for zone in zones {
        let style = PolygonStyle::filled(zone.severity.color());
        surface.add_polygon(Overlay::BloomZones, &zone.boundary, &style, &zone_popup(zone));
    }

    for marker in &state.markers {
        surface.add_marker(
            Overlay::Buoys,
            marker.feature.coordinates,
            MarkerIcon::Buoy,
            &station_popup(marker),
        );
    }

    surface.add_control(ControlPosition::BottomRight, &legend_html());

    let banner = last_updated_banner(state.latest_observation.as_ref());
    if let Some(text) = &banner {
        surface.add_control(ControlPosition::BottomLeft, text);
    }

    for overlay in Overlay::ALL {
        surface.set_overlay(overlay, true);
    }

    let summary = PresentationSummary {
        polygons: zones.len(),
        markers: state.markers.len(),
        banner: banner.is_some(),
    };
    info!(
        "Presented {} bloom zones and {} buoys (banner: {})",
        summary.polygons, summary.markers, summary.banner
    );
    summary
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use ct_buoy::feature::StationFeature;
    use ct_buoy::lat_lng::LatLng;
    use ct_buoy::pipeline;
    use ct_buoy::reading::StationReadingStore;
    use serde_json::json;

    #[derive(Debug, PartialEq)]
    enum Call {
        Polygon(Overlay, usize, String, String),
        Marker(Overlay, LatLng, String),
        Control(ControlPosition, String),
        Visible(Overlay, bool),
    }

    #[derive(Default)]
    struct RecordingSurface {
        calls: Vec<Call>,
    }

    impl MapSurface for RecordingSurface {
        fn add_polygon(&mut self, overlay: Overlay, boundary: &[LatLng], style: &PolygonStyle, popup: &str) {
            self.calls.push(Call::Polygon(
                overlay,
                boundary.len(),
                style.fill_color.clone(),
                popup.to_string(),
            ));
        }

        fn add_marker(&mut self, overlay: Overlay, coordinates: LatLng, _icon: MarkerIcon, popup: &str) {
            self.calls.push(Call::Marker(overlay, coordinates, popup.to_string()));
        }

        fn add_control(&mut self, position: ControlPosition, content: &str) {
            self.calls.push(Call::Control(position, content.to_string()));
        }

        fn set_overlay(&mut self, overlay: Overlay, visible: bool) {
            self.calls.push(Call::Visible(overlay, visible));
        }
    }

    fn state_with(readings: serde_json::Value) -> RenderState {
        let features = vec![
            StationFeature::new("B1", Some("Egmont".into()), LatLng::new(27.6, -82.76)),
            StationFeature::new("B7", None, LatLng::new(27.52, -82.68)),
        ];
        let store = StationReadingStore::from_value(&readings).unwrap();
        pipeline::run(&features, &store)
    }

    #[test]
    fn test_present_full_state() {
        let state = state_with(json!({
            "B1": { "status": "online", "last_update": "2024-03-05T12:00:00Z" }
        }));
        let zones = BloomZone::demo_zones();
        let mut surface = RecordingSurface::default();
        let summary = present(&mut surface, &state, &zones);

        assert_eq!(
            summary,
            PresentationSummary {
                polygons: 3,
                markers: 2,
                banner: true
            }
        );

        let polygons = surface
            .calls
            .iter()
            .filter(|c| matches!(c, Call::Polygon(Overlay::BloomZones, ..)))
            .count();
        assert_eq!(polygons, zones.len());

        match &surface.calls[0] {
            Call::Polygon(_, points, fill, _) => {
                assert_eq!(*points, 4);
                assert_eq!(fill, zones[0].severity.color());
            }
            other => panic!("unexpected first call {other:?}"),
        }

        let markers: Vec<&Call> = surface
            .calls
            .iter()
            .filter(|c| matches!(c, Call::Marker(Overlay::Buoys, ..)))
            .collect();
        assert_eq!(markers.len(), 2);
        if let Call::Marker(_, position, popup) = markers[1] {
            assert_eq!(*position, LatLng::new(27.52, -82.68));
            assert!(popup.contains("Status: n/a"));
            assert!(popup.contains("Temperature: –"));
        }

        assert!(surface.calls.iter().any(|c| matches!(
            c,
            Call::Control(ControlPosition::BottomRight, html) if html.contains("Legend")
        )));
        assert!(surface.calls.contains(&Call::Control(
            ControlPosition::BottomLeft,
            "<strong>Last Updated:</strong> 2024-03-05T12:00:00Z".to_string()
        )));
        assert!(surface.calls.contains(&Call::Visible(Overlay::BloomZones, true)));
        assert!(surface.calls.contains(&Call::Visible(Overlay::Buoys, true)));
    }

    #[test]
    fn test_banner_omitted_without_timestamp() {
        let state = state_with(json!({}));
        assert_eq!(state.latest_observation, None);
        let mut surface = RecordingSurface::default();
        let summary = present(&mut surface, &state, &[]);
        assert!(!summary.banner);
        assert!(!surface
            .calls
            .iter()
            .any(|c| matches!(c, Call::Control(ControlPosition::BottomLeft, _))));
        // legend is unconditional
        assert!(surface
            .calls
            .iter()
            .any(|c| matches!(c, Call::Control(ControlPosition::BottomRight, _))));
    }

    #[test]
    fn test_banner_shows_latest() {
        let state = state_with(json!({
            "B1": { "last_update": "2024-01-01T00:00:00Z" },
            "B7": { "last_update": "2024-03-05T12:00:00Z" }
        }));
        assert_eq!(
            state.latest_observation,
            Some(Utc.with_ymd_and_hms(2024, 3, 5, 12, 0, 0).unwrap())
        );
        let mut surface = RecordingSurface::default();
        present(&mut surface, &state, &[]);
        assert!(surface.calls.iter().any(|c| matches!(
            c,
            Call::Control(ControlPosition::BottomLeft, text) if text.ends_with("2024-03-05T12:00:00Z")
        )));
    }
}
