use crate::error::{BuoyError, Result};
use crate::lat_lng::LatLng;
use crate::severity::Severity;
use serde::{Deserialize, Serialize};

/// A polygon marking a detected or simulated algal bloom.
#[derive(Debug, PartialEq, Clone, Serialize, Deserialize)]
pub struct BloomZone {
    /// Title shown in the zone popup
    pub name: String,
    /// Exterior ring, latitude-first. The ring is implicitly closed.
    pub boundary: Vec<LatLng>,
    pub severity: Severity,
}

impl BloomZone {
    /// Build a zone, rejecting boundaries that cannot form a polygon.
    pub fn new(name: impl Into<String>, boundary: Vec<LatLng>, severity: Severity) -> Result<Self> {
        let name = name.into();
        if boundary.len() < 3 {
            return Err(BuoyError::InvalidZone(format!(
                "{} has {} boundary points, at least 3 are required",
                name,
                boundary.len()
            )));
        }
        if let Some(p) = boundary.iter().find(|p| !p.is_valid()) {
            return Err(BuoyError::InvalidZone(format!(
                "{} has an out-of-range point ({}, {})",
                name, p.latitude, p.longitude
            )));
        }
        Ok(BloomZone {
            name,
            boundary,
            severity,
        })
    }

    /// Like [`BloomZone::new`] but classifies a free-form severity label.
    pub fn with_label(name: impl Into<String>, boundary: Vec<LatLng>, label: &str) -> Result<Self> {
        BloomZone::new(name, boundary, Severity::from_label(label))
    }

    /// Static demo zones around Tampa Bay.
    pub fn demo_zones() -> Vec<BloomZone> {
        let zones: [(&str, [(f64, f64); 4], Severity); 3] = [
            (
                "Simulated Bloom Zone – ClearTide Demo",
                [(27.8, -82.7), (27.8, -82.6), (27.9, -82.6), (27.9, -82.7)],
                Severity::High,
            ),
            (
                "Old Tampa Bay",
                [(27.93, -82.66), (27.93, -82.58), (28.0, -82.58), (28.0, -82.66)],
                Severity::Moderate,
            ),
            (
                "Boca Ciega Bay",
                [(27.7, -82.78), (27.7, -82.71), (27.76, -82.71), (27.76, -82.78)],
                Severity::Low,
            ),
        ];
        zones
            .into_iter()
            .filter_map(|(name, ring, severity)| {
                let boundary = ring.iter().map(|&(lat, lng)| LatLng::new(lat, lng)).collect();
                BloomZone::new(name, boundary, severity).ok()
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_demo_zones_are_valid() {
        let zones = BloomZone::demo_zones();
        assert_eq!(zones.len(), 3);
        assert!(zones.iter().all(|z| z.boundary.len() >= 3));
        assert_eq!(zones[0].severity, Severity::High);
    }

    #[test]
    fn test_too_few_points_rejected() {
        let err = BloomZone::new(
            "sliver",
            vec![LatLng::new(27.8, -82.7), LatLng::new(27.9, -82.6)],
            Severity::Low,
        )
        .unwrap_err();
        assert!(matches!(err, BuoyError::InvalidZone(_)));
    }

    #[test]
    fn test_unknown_label_is_not_an_error() {
        let ring = vec![
            LatLng::new(27.8, -82.7),
            LatLng::new(27.8, -82.6),
            LatLng::new(27.9, -82.6),
        ];
        let zone = BloomZone::with_label("odd", ring, "catastrophic").unwrap();
        assert_eq!(zone.severity, Severity::Unknown);
    }
}
