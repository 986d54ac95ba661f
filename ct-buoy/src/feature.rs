//! Buoy station locations from a GeoJSON FeatureCollection.

use crate::error::{BuoyError, Result};
use crate::lat_lng::LatLng;
use log::{info, warn};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// How `parse_features` treats a feature that cannot be joined.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FeaturePolicy {
    /// The first malformed feature fails the whole collection.
    #[default]
    Strict,
    /// Malformed features are logged and dropped; well-formed siblings are kept.
    SkipInvalid,
}

/// One buoy station location.
#[derive(Debug, PartialEq, Clone, Serialize, Deserialize)]
pub struct StationFeature {
    /// Join key into the reading store
    pub id: String,
    /// Name from the geospatial source, used when the reading has none
    pub name: Option<String>,
    pub coordinates: LatLng,
}

impl StationFeature {
    pub fn new(id: impl Into<String>, name: Option<String>, coordinates: LatLng) -> Self {
        StationFeature {
            id: id.into(),
            name,
            coordinates,
        }
    }

    /// Label used when neither the reading nor the feature carries a name.
    pub fn generic_label(&self) -> String {
        format!("Buoy {}", self.id)
    }

    /// Parse a single GeoJSON feature; `index` is only used in error messages.
    pub fn from_geojson(index: usize, feature: &Value) -> Result<Self> {
        let properties = feature.get("properties").filter(|p| p.is_object());

        let id = properties
            .and_then(|p| p.get("id"))
            .and_then(id_string)
            .or_else(|| feature.get("id").and_then(id_string))
            .ok_or_else(|| BuoyError::malformed(index, "missing station id"))?;

        let name = properties
            .and_then(|p| p.get("name"))
            .and_then(Value::as_str)
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(String::from);

        let coordinates = point_coordinates(feature)
            .map_err(|reason| BuoyError::malformed(index, format!("station {id}: {reason}")))?;

        Ok(StationFeature {
            id,
            name,
            coordinates,
        })
    }
}

fn id_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) if !s.trim().is_empty() => Some(s.trim().to_string()),
        Value::Number(n) if n.is_i64() || n.is_u64() => Some(n.to_string()),
        _ => None,
    }
}

fn point_coordinates(feature: &Value) -> std::result::Result<LatLng, String> {
    let geometry = feature
        .get("geometry")
        .filter(|g| g.is_object())
        .ok_or("missing geometry")?;
    match geometry.get("type").and_then(Value::as_str) {
        Some("Point") => {}
        Some(other) => return Err(format!("expected Point geometry, found {other}")),
        None => return Err("geometry has no type".to_string()),
    }
    let pair = geometry
        .get("coordinates")
        .and_then(Value::as_array)
        .filter(|c| c.len() >= 2)
        .ok_or("missing point coordinates")?;
    let (lon, lat) = match (pair[0].as_f64(), pair[1].as_f64()) {
        (Some(lon), Some(lat)) => (lon, lat),
        _ => return Err("coordinates are not numeric".to_string()),
    };
    let position = LatLng::from_lon_lat(lon, lat);
    if !position.is_valid() {
        return Err(format!("coordinates ({lat}, {lon}) are out of range"));
    }
    Ok(position)
}

/// Parse every station feature in a FeatureCollection, honouring `policy`.
pub fn parse_features(document: &Value, policy: FeaturePolicy) -> Result<Vec<StationFeature>> {
    let features = document
        .get("features")
        .and_then(Value::as_array)
        .ok_or_else(|| {
            BuoyError::InvalidDocument("expected a FeatureCollection with a features array".into())
        })?;

    let mut stations = Vec::with_capacity(features.len());
    let mut skipped = 0usize;
    for (index, raw) in features.iter().enumerate() {
        match StationFeature::from_geojson(index, raw) {
            Ok(station) => stations.push(station),
            Err(e) => match policy {
                FeaturePolicy::Strict => return Err(e),
                FeaturePolicy::SkipInvalid => {
                    warn!("Skipping station feature: {}", e);
                    skipped += 1;
                }
            },
        }
    }
    info!(
        "Parsed {} station features ({} skipped)",
        stations.len(),
        skipped
    );
    Ok(stations)
}

/// Parse a FeatureCollection from JSON text.
pub fn parse_features_json(body: &str, policy: FeaturePolicy) -> Result<Vec<StationFeature>> {
    let document: Value = serde_json::from_str(body)
        .map_err(|e| BuoyError::InvalidDocument(format!("features are not valid JSON: {e}")))?;
    parse_features(&document, policy)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    const BUOYS_GEOJSON: &str = include_str!("../../fixtures/buoys.geojson");

    fn point(id: Value, name: Option<&str>, lon: f64, lat: f64) -> Value {
        json!({
            "type": "Feature",
            "properties": { "id": id, "name": name },
            "geometry": { "type": "Point", "coordinates": [lon, lat] }
        })
    }

    #[test]
    fn test_parse_fixture() {
        let stations = parse_features_json(BUOYS_GEOJSON, FeaturePolicy::Strict).unwrap();
        assert!(stations.len() >= 3);
        assert_eq!(stations[0].id, "B1");
        assert!(stations.iter().all(|s| s.coordinates.is_valid()));
    }

    #[test]
    fn test_coordinates_are_lat_first() {
        let doc = json!({ "type": "FeatureCollection", "features": [point(json!("B1"), Some("Egmont"), -82.76, 27.6)] });
        let stations = parse_features(&doc, FeaturePolicy::Strict).unwrap();
        assert_eq!(stations[0].coordinates, LatLng::new(27.6, -82.76));
        assert_eq!(stations[0].name.as_deref(), Some("Egmont"));
    }

    #[test]
    fn test_missing_name_is_tolerated() {
        let doc = json!({ "features": [point(json!(42), None, -82.7, 27.8)] });
        let stations = parse_features(&doc, FeaturePolicy::Strict).unwrap();
        assert_eq!(stations[0].id, "42");
        assert_eq!(stations[0].name, None);
        assert_eq!(stations[0].generic_label(), "Buoy 42");
    }

    #[test]
    fn test_feature_level_id_fallback() {
        let doc = json!({ "features": [{
            "type": "Feature",
            "id": "B9",
            "properties": {},
            "geometry": { "type": "Point", "coordinates": [-82.7, 27.8] }
        }] });
        let stations = parse_features(&doc, FeaturePolicy::Strict).unwrap();
        assert_eq!(stations[0].id, "B9");
    }

    #[test]
    fn test_missing_id_strict_fails() {
        let doc = json!({ "features": [
            point(json!("B1"), Some("ok"), -82.7, 27.8),
            { "type": "Feature", "properties": { "name": "no id" },
              "geometry": { "type": "Point", "coordinates": [-82.6, 27.9] } }
        ] });
        let err = parse_features(&doc, FeaturePolicy::Strict).unwrap_err();
        assert_eq!(
            err,
            BuoyError::MalformedFeature {
                index: 1,
                reason: "missing station id".to_string()
            }
        );
    }

    #[test]
    fn test_missing_id_skip_keeps_sibling() {
        let doc = json!({ "features": [
            { "type": "Feature", "properties": { "name": "no id" },
              "geometry": { "type": "Point", "coordinates": [-82.6, 27.9] } },
            point(json!("B1"), Some("ok"), -82.7, 27.8)
        ] });
        let stations = parse_features(&doc, FeaturePolicy::SkipInvalid).unwrap();
        assert_eq!(stations.len(), 1);
        assert_eq!(stations[0].id, "B1");
    }

    #[test]
    fn test_bad_geometry_is_malformed() {
        let cases = [
            json!({ "properties": { "id": "B1" } }),
            json!({ "properties": { "id": "B1" }, "geometry": { "type": "Polygon", "coordinates": [] } }),
            json!({ "properties": { "id": "B1" }, "geometry": { "type": "Point", "coordinates": [-82.7] } }),
            json!({ "properties": { "id": "B1" }, "geometry": { "type": "Point", "coordinates": ["x", 27.8] } }),
            json!({ "properties": { "id": "B1" }, "geometry": { "type": "Point", "coordinates": [27.8, -182.7] } }),
        ];
        for (i, feature) in cases.into_iter().enumerate() {
            let err = StationFeature::from_geojson(i, &feature).unwrap_err();
            assert!(
                matches!(err, BuoyError::MalformedFeature { index, .. } if index == i),
                "case {i}: {err:?}"
            );
        }
    }

    #[test]
    fn test_not_a_feature_collection() {
        let err = parse_features(&json!({ "type": "Feature" }), FeaturePolicy::Strict).unwrap_err();
        assert!(matches!(err, BuoyError::InvalidDocument(_)));
    }
}
