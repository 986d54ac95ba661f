/// Error types for the buoy library
use thiserror::Error;

/// Main error type for buoy data operations
#[derive(Error, Debug, Clone, PartialEq)]
pub enum BuoyError {
    /// A station feature lacks its join key or a usable point geometry
    #[error("Malformed station feature #{index}: {reason}")]
    MalformedFeature { index: usize, reason: String },

    /// One of the input documents could not be fetched or read
    #[error("Failed to fetch {origin}: {reason}")]
    DataFetch { origin: String, reason: String },

    /// A `last_update` value is not a recognisable timestamp
    #[error("Failed to parse timestamp: {0}")]
    TimestampParse(String),

    /// The document parsed but does not have the expected top-level shape
    #[error("Invalid document: {0}")]
    InvalidDocument(String),

    /// A bloom zone boundary cannot form a polygon
    #[error("Invalid bloom zone: {0}")]
    InvalidZone(String),
}

impl BuoyError {
    pub fn data_fetch(origin: impl Into<String>, reason: impl ToString) -> Self {
        BuoyError::DataFetch {
            origin: origin.into(),
            reason: reason.to_string(),
        }
    }

    pub(crate) fn malformed(index: usize, reason: impl Into<String>) -> Self {
        BuoyError::MalformedFeature {
            index,
            reason: reason.into(),
        }
    }
}

/// Type alias for Results using BuoyError
pub type Result<T> = std::result::Result<T, BuoyError>;
