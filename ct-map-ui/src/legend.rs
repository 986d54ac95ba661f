//! Bottom-right legend: the three severity colours plus the buoy swatch.

use crate::surface::MarkerIcon;
use ct_buoy::severity::Severity;

#[derive(Debug, PartialEq, Clone, Copy)]
pub enum Swatch {
    /// Filled square, as drawn for bloom polygons
    Area,
    /// Round dot, as drawn for buoy markers
    Point,
}

#[derive(Debug, PartialEq, Clone)]
pub struct LegendEntry {
    pub label: String,
    pub color: &'static str,
    pub swatch: Swatch,
}

/// The four fixed legend rows in display order.
pub fn legend_entries() -> Vec<LegendEntry> {
    let mut entries: Vec<LegendEntry> = Severity::ALL
        .iter()
        .map(|s| LegendEntry {
            label: format!("{} severity", s.label()),
            color: s.color(),
            swatch: Swatch::Area,
        })
        .collect();
    entries.push(LegendEntry {
        label: "Buoy".to_string(),
        color: MarkerIcon::Buoy.color(),
        swatch: Swatch::Point,
    });
    entries
}

/// Legend body as an HTML fragment.
pub fn legend_html() -> String {
    let rows = legend_entries()
        .iter()
        .map(|entry| {
            let radius = match entry.swatch {
                Swatch::Area => "2px",
                Swatch::Point => "50%",
            };
            format!(
                "<div><i style=\"display:inline-block;width:12px;height:12px;margin-right:6px;\
                 background:{};border-radius:{};\"></i>{}</div>",
                entry.color, radius, entry.label
            )
        })
        .collect::<Vec<String>>()
        .join("");
    format!("<div class=\"ct-legend\"><strong>Legend</strong>{}</div>", rows)
}
