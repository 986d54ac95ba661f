//! Capability interface over the mapping library.
//!
//! The presentation layer only talks to the map through [`MapSurface`], so it
//! can be driven by the Leaflet bridge in the browser or by a recorder in tests.

use ct_buoy::lat_lng::LatLng;
use serde::Serialize;

/// A toggleable group of map features.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash, Serialize)]
pub enum Overlay {
    BloomZones,
    Buoys,
}

impl Overlay {
    pub const ALL: [Overlay; 2] = [Overlay::BloomZones, Overlay::Buoys];

    /// Name shown in the layer-toggle control.
    pub fn label(self) -> &'static str {
        match self {
            Overlay::BloomZones => "Bloom Zones",
            Overlay::Buoys => "Buoys",
        }
    }
}

/// Corner a control is pinned to.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash, Serialize)]
pub enum ControlPosition {
    TopLeft,
    TopRight,
    BottomLeft,
    BottomRight,
}

impl ControlPosition {
    /// Leaflet's position keyword.
    pub fn as_leaflet(self) -> &'static str {
        match self {
            ControlPosition::TopLeft => "topleft",
            ControlPosition::TopRight => "topright",
            ControlPosition::BottomLeft => "bottomleft",
            ControlPosition::BottomRight => "bottomright",
        }
    }
}

/// Stroke and fill for a polygon.
#[derive(Debug, PartialEq, Clone, Serialize)]
pub struct PolygonStyle {
    pub color: String,
    #[serde(rename = "fillColor")]
    pub fill_color: String,
    #[serde(rename = "fillOpacity")]
    pub fill_opacity: f64,
    pub weight: u32,
}

impl PolygonStyle {
    /// Outline and fill in the same colour, half transparent.
    pub fn filled(color: &str) -> Self {
        PolygonStyle {
            color: color.to_string(),
            fill_color: color.to_string(),
            fill_opacity: 0.4,
            weight: 2,
        }
    }
}

/// Icon used for point markers.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Serialize)]
pub enum MarkerIcon {
    Buoy,
}

impl MarkerIcon {
    /// Colour of the marker dot, shared with the legend swatch.
    pub fn color(self) -> &'static str {
        match self {
            MarkerIcon::Buoy => "#1565C0",
        }
    }
}

/// Operations the presentation layer needs from a map.
pub trait MapSurface {
    fn add_polygon(&mut self, overlay: Overlay, boundary: &[LatLng], style: &PolygonStyle, popup: &str);

    fn add_marker(&mut self, overlay: Overlay, coordinates: LatLng, icon: MarkerIcon, popup: &str);

    /// Add an informational control whose body is `content` (HTML).
    fn add_control(&mut self, position: ControlPosition, content: &str);

    fn set_overlay(&mut self, overlay: Overlay, visible: bool);
}
