//! Latest buoy readings keyed by station id.
//!
//! The readings document is a JSON object mapping station id to a record:
//!
//! ```text
//! {
//!   "B1": { "name": "Egmont Key", "status": "online", "temp_c": 24.1,
//!           "chl_a": 12.7, "turbidity": 3.2, "last_update": "2024-03-05T12:00:00Z" }
//! }
//! ```
//!
//! Every field is optional. Values of the wrong type are dropped with a
//! warning instead of failing the whole document.

use crate::error::{BuoyError, Result};
use crate::timestamp::parse_timestamp;
use chrono::{DateTime, Utc};
use log::{info, warn};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeMap;

/// The most recent reading reported by one station.
#[derive(Debug, PartialEq, Clone, Default, Serialize, Deserialize)]
pub struct StationReading {
    pub name: Option<String>,
    pub status: Option<String>,
    pub temperature_celsius: Option<f64>,
    pub chlorophyll_a: Option<f64>,
    pub turbidity: Option<f64>,
    /// Raw ISO-8601 string as reported
    pub last_update: Option<String>,
}

impl StationReading {
    /// Parsed `last_update`. `None` when absent; an error when present but unreadable.
    pub fn observed_at(&self) -> Option<Result<DateTime<Utc>>> {
        self.last_update.as_deref().map(parse_timestamp)
    }

    /// True when no field carries data.
    pub fn is_empty(&self) -> bool {
        *self == StationReading::default()
    }

    fn from_record(station_id: &str, record: &Map<String, Value>) -> Self {
        StationReading {
            name: text_field(station_id, record, "name"),
            status: text_field(station_id, record, "status"),
            temperature_celsius: number_field(station_id, record, "temp_c"),
            chlorophyll_a: number_field(station_id, record, "chl_a"),
            turbidity: number_field(station_id, record, "turbidity"),
            last_update: text_field(station_id, record, "last_update"),
        }
    }
}

fn text_field(station_id: &str, record: &Map<String, Value>, key: &str) -> Option<String> {
    match record.get(key)? {
        Value::Null => None,
        Value::String(s) if s.trim().is_empty() => None,
        Value::String(s) => Some(s.trim().to_string()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        other => {
            warn!("Station {}: ignoring non-text {} value {}", station_id, key, other);
            None
        }
    }
}

fn number_field(station_id: &str, record: &Map<String, Value>, key: &str) -> Option<f64> {
    let parsed = match record.get(key)? {
        Value::Null => return None,
        Value::Number(n) => n.as_f64(),
        Value::String(s) => match s.trim().to_lowercase().as_str() {
            "" | "null" | "n/a" | "na" => return None,
            t => t.parse::<f64>().ok(),
        },
        _ => None,
    };
    match parsed {
        Some(v) if v.is_finite() => Some(v),
        _ => {
            warn!(
                "Station {}: ignoring non-numeric {} value {}",
                station_id,
                key,
                record.get(key).unwrap_or(&Value::Null)
            );
            None
        }
    }
}

/// In-memory mapping from station id to its latest reading. Built once, never mutated.
#[derive(Debug, PartialEq, Clone, Default)]
pub struct StationReadingStore {
    readings: BTreeMap<String, StationReading>,
}

impl StationReadingStore {
    /// Build the store from a parsed readings document.
    pub fn from_value(document: &Value) -> Result<Self> {
        let entries = document.as_object().ok_or_else(|| {
            BuoyError::InvalidDocument(
                "readings document must be an object keyed by station id".to_string(),
            )
        })?;
        let readings = entries
            .iter()
            .map(|(station_id, record)| {
                let reading = match record.as_object() {
                    Some(fields) => StationReading::from_record(station_id, fields),
                    None => {
                        warn!(
                            "Station {}: reading record is not an object, treating as empty",
                            station_id
                        );
                        StationReading::default()
                    }
                };
                (station_id.clone(), reading)
            })
            .collect::<BTreeMap<_, _>>();
        info!("Loaded readings for {} stations", readings.len());
        Ok(StationReadingStore { readings })
    }

    /// Parse a readings document from JSON text.
    pub fn from_json(body: &str) -> Result<Self> {
        let document: Value = serde_json::from_str(body)
            .map_err(|e| BuoyError::InvalidDocument(format!("readings are not valid JSON: {e}")))?;
        StationReadingStore::from_value(&document)
    }

    /// Reading for a station, or `None` when the station never reported.
    pub fn lookup(&self, station_id: &str) -> Option<&StationReading> {
        self.readings.get(station_id)
    }

    pub fn len(&self) -> usize {
        self.readings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.readings.is_empty()
    }

    /// Station ids in sorted order.
    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.readings.keys().map(String::as_str)
    }
}
