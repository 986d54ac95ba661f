//! Popup and banner text.
//!
//! Popups are small HTML fragments. Everything that came from a fetched
//! document is escaped before it is interpolated.

use chrono::{DateTime, Utc};
use ct_buoy::bloom_zone::BloomZone;
use ct_buoy::pipeline::StationMarker;
use ct_buoy::timestamp::format_timestamp;

/// Shown for absent text fields (status, last update).
pub const TEXT_FALLBACK: &str = "n/a";
/// Shown for absent numeric fields.
pub const NUMBER_FALLBACK: &str = "–";

/// Escape text for inclusion in HTML element content or attributes.
pub fn escape_html(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

fn text_or_fallback(value: Option<&str>) -> String {
    value.map_or_else(|| TEXT_FALLBACK.to_string(), escape_html)
}

fn number_or_fallback(value: Option<f64>, unit: &str) -> String {
    match value {
        Some(v) => format!("{} {}", v, unit),
        None => NUMBER_FALLBACK.to_string(),
    }
}

/// Popup body for one buoy marker.
pub fn station_popup(marker: &StationMarker) -> String {
    let reading = &marker.reading;
    format!(
        "<strong>{name}</strong><br>\
         Status: {status}<br>\
         Temperature: {temp}<br>\
         Chlorophyll-a: {chl}<br>\
         Turbidity: {turb}<br>\
         Last update: {updated}",
        name = escape_html(&marker.display_name()),
        status = text_or_fallback(reading.status.as_deref()),
        temp = number_or_fallback(reading.temperature_celsius, "°C"),
        chl = number_or_fallback(reading.chlorophyll_a, "µg/L"),
        turb = number_or_fallback(reading.turbidity, "NTU"),
        updated = text_or_fallback(reading.last_update.as_deref()),
    )
}

/// Popup body for a bloom zone.
pub fn zone_popup(zone: &BloomZone) -> String {
    format!(
        "<strong>{}</strong><br>Severity: {}",
        escape_html(&zone.name),
        zone.severity.label()
    )
}

/// Text of the "Last Updated" banner, or `None` when nothing has a timestamp.
pub fn last_updated_banner(latest: Option<&DateTime<Utc>>) -> Option<String> {
    latest.map(|t| format!("<strong>Last Updated:</strong> {}", format_timestamp(t)))
}
