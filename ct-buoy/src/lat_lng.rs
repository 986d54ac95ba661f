use serde::{Deserialize, Serialize};

/// A geographic position in decimal degrees.
///
/// Stored latitude-first, the order Leaflet expects. GeoJSON documents carry
/// `[longitude, latitude]`; use [`LatLng::from_lon_lat`] when reading them.
#[derive(Debug, PartialEq, Clone, Copy, Serialize, Deserialize)]
pub struct LatLng {
    pub latitude: f64,
    pub longitude: f64,
}

impl LatLng {
    pub const fn new(latitude: f64, longitude: f64) -> Self {
        LatLng {
            latitude,
            longitude,
        }
    }

    pub const fn from_lon_lat(longitude: f64, latitude: f64) -> Self {
        LatLng::new(latitude, longitude)
    }

    /// True when both components are finite and inside the geographic range.
    pub fn is_valid(&self) -> bool {
        self.latitude.is_finite()
            && self.longitude.is_finite()
            && (-90.0..=90.0).contains(&self.latitude)
            && (-180.0..=180.0).contains(&self.longitude)
    }
}

#[cfg(test)]
mod tests {
    use super::LatLng;

    #[test]
    fn test_range_checks() {
        assert!(LatLng::new(27.85, -82.65).is_valid());
        assert!(LatLng::new(-90.0, 180.0).is_valid());
        assert!(!LatLng::new(90.5, 0.0).is_valid());
        assert!(!LatLng::new(0.0, -180.1).is_valid());
        assert!(!LatLng::new(f64::NAN, 0.0).is_valid());
    }

    #[test]
    fn test_from_lon_lat_swaps_order() {
        let p = LatLng::from_lon_lat(-82.65, 27.85);
        assert_eq!(p.latitude, 27.85);
        assert_eq!(p.longitude, -82.65);
    }
}
