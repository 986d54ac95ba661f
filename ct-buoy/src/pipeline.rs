//! Join of station locations with their readings.
//!
//! The join is total: every feature yields a marker, with an empty reading
//! substituted for stations that never reported. While joining, the newest
//! parseable `last_update` across all stations is tracked for the
//! "Last Updated" banner.

use crate::feature::StationFeature;
use crate::reading::{StationReading, StationReadingStore};
use chrono::{DateTime, Utc};
use log::{debug, info};
use serde::Serialize;

/// A station location paired with the reading to display for it.
#[derive(Debug, PartialEq, Clone, Serialize)]
pub struct StationMarker {
    pub feature: StationFeature,
    /// Empty (all fields `None`) when the station has no reading
    pub reading: StationReading,
}

impl StationMarker {
    /// Reading name, then feature name, then a generic label.
    pub fn display_name(&self) -> String {
        self.reading
            .name
            .clone()
            .or_else(|| self.feature.name.clone())
            .unwrap_or_else(|| self.feature.generic_label())
    }
}

/// Output of one pipeline run. Replaced wholesale on the next run.
#[derive(Debug, PartialEq, Clone, Default, Serialize)]
pub struct RenderState {
    /// Newest valid `last_update` among joined stations
    pub latest_observation: Option<DateTime<Utc>>,
    /// One entry per input feature, in input order
    pub markers: Vec<StationMarker>,
}

impl RenderState {
    pub fn marker_count(&self) -> usize {
        self.markers.len()
    }
}

/// Join `features` against `store`.
pub fn run(features: &[StationFeature], store: &StationReadingStore) -> RenderState {
    let mut latest_observation: Option<DateTime<Utc>> = None;
    let mut missing = 0usize;

    let markers = features
        .iter()
        .map(|feature| {
            let reading = match store.lookup(&feature.id) {
                Some(r) => r.clone(),
                None => {
                    missing += 1;
                    StationReading::default()
                }
            };

            match reading.observed_at() {
                Some(Ok(instant)) => {
                    // strictly newer only, so ties keep the first seen
                    if latest_observation.map_or(true, |current| instant > current) {
                        latest_observation = Some(instant);
                    }
                }
                Some(Err(e)) => debug!("Station {}: {}, treating as absent", feature.id, e),
                None => {}
            }

            StationMarker {
                feature: feature.clone(),
                reading,
            }
        })
        .collect::<Vec<StationMarker>>();

    info!(
        "Joined {} stations ({} without readings), latest observation {:?}",
        markers.len(),
        missing,
        latest_observation
    );

    RenderState {
        latest_observation,
        markers,
    }
}
