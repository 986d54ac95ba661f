//! Application context: everything the map needs that is fixed at startup.
//!
//! Built once in `main` and passed down explicitly; no part of the map setup
//! reads global state.

use ct_buoy::bloom_zone::BloomZone;
use ct_buoy::feature::FeaturePolicy;
use ct_buoy::lat_lng::LatLng;
use log::warn;
use serde::{Deserialize, Serialize};

/// Map view, base layer and data source settings.
#[derive(Debug, PartialEq, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MapContext {
    /// Initial view centre (Tampa Bay)
    pub center: LatLng,
    pub zoom: u8,
    pub max_zoom: u8,
    pub tile_url: String,
    pub attribution: String,
    /// GeoJSON station locations, resolved against the page URL
    pub features_url: String,
    /// Readings keyed by station id, resolved against the page URL
    pub readings_url: String,
    pub fetch_timeout_ms: u32,
    pub feature_policy: FeaturePolicy,
    /// Static bloom polygons drawn under the buoys
    pub zones: Vec<BloomZone>,
}

impl Default for MapContext {
    fn default() -> Self {
        MapContext {
            center: LatLng::new(27.9, -82.8),
            zoom: 10,
            max_zoom: 18,
            tile_url: "https://{s}.tile.openstreetmap.org/{z}/{x}/{y}.png".to_string(),
            attribution: "© OpenStreetMap contributors".to_string(),
            features_url: "./buoys.geojson".to_string(),
            readings_url: "./buoy_readings.json".to_string(),
            fetch_timeout_ms: 15_000,
            feature_policy: FeaturePolicy::Strict,
            zones: BloomZone::demo_zones(),
        }
    }
}

impl MapContext {
    /// Apply overrides from a JSON object; missing keys keep their defaults.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Defaults with the page's inline overrides applied. Blank or invalid
    /// overrides are ignored.
    pub fn with_overrides(overrides: Option<&str>) -> Self {
        match overrides.map(str::trim).filter(|json| !json.is_empty()) {
            None => MapContext::default(),
            Some(json) => MapContext::from_json(json).unwrap_or_else(|e| {
                warn!("Ignoring invalid map config: {}", e);
                MapContext::default()
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let ctx = MapContext::default();
        assert_eq!(ctx.center, LatLng::new(27.9, -82.8));
        assert_eq!(ctx.zoom, 10);
        assert_eq!(ctx.feature_policy, FeaturePolicy::Strict);
        assert_eq!(ctx.zones.len(), 3);
    }

    #[test]
    fn test_partial_override() {
        let ctx = MapContext::from_json(
            r#"{ "readings_url": "https://data.example.org/latest.json", "feature_policy": "skip_invalid", "zones": [] }"#,
        )
        .unwrap();
        assert_eq!(ctx.readings_url, "https://data.example.org/latest.json");
        assert_eq!(ctx.feature_policy, FeaturePolicy::SkipInvalid);
        assert!(ctx.zones.is_empty());
        assert_eq!(ctx.features_url, "./buoys.geojson");
        assert_eq!(ctx.fetch_timeout_ms, 15_000);
    }

    #[test]
    fn test_overrides_fall_back_to_defaults() {
        assert_eq!(MapContext::with_overrides(None), MapContext::default());
        assert_eq!(MapContext::with_overrides(Some("  \n ")), MapContext::default());
        assert_eq!(MapContext::with_overrides(Some("{ zoom: ")), MapContext::default());

        let ctx = MapContext::with_overrides(Some(r#"{ "zoom": 12 }"#));
        assert_eq!(ctx.zoom, 12);
        assert_eq!(ctx.readings_url, "./buoy_readings.json");
    }
}
