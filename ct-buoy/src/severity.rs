use serde::{Deserialize, Serialize};
use std::fmt;

/// Fill colour for zones whose severity label is not recognised.
pub const FALLBACK_COLOR: &str = "#9E9E9E";

/// Categorical bloom intensity.
///
/// `Unknown` absorbs any label outside low/moderate/high so that a bad
/// label degrades to a neutral colour instead of failing the render.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Low,
    Moderate,
    High,
    Unknown,
}

impl Severity {
    /// Known levels in legend order.
    pub const ALL: [Severity; 3] = [Severity::Low, Severity::Moderate, Severity::High];

    /// Classify a free-form label. Matching is trimmed and case-insensitive.
    pub fn from_label(label: &str) -> Self {
        let lowered = label.trim().to_lowercase();
        match lowered.as_str() {
            "low" => Severity::Low,
            "moderate" => Severity::Moderate,
            "high" => Severity::High,
            _ => Severity::Unknown,
        }
    }

    pub fn color(self) -> &'static str {
        match self {
            Severity::Low => "#FDD835",
            Severity::Moderate => "#FB8C00",
            Severity::High => "#E53935",
            Severity::Unknown => FALLBACK_COLOR,
        }
    }

    /// Human-readable label for popups and the legend.
    pub fn label(self) -> &'static str {
        match self {
            Severity::Low => "Low",
            Severity::Moderate => "Moderate",
            Severity::High => "High",
            Severity::Unknown => "Unknown",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Map a severity label straight to its display colour.
pub fn color_for(label: &str) -> &'static str {
    Severity::from_label(label).color()
}
