//! Core types and data pipeline for the ClearTide bloom map.
//!
//! - `feature` / `reading`: the two fetched documents (station locations and
//!   latest readings)
//! - `pipeline`: joins them into a `RenderState`
//! - `source`: fetches both documents concurrently before joining
//! - `severity` / `bloom_zone`: static bloom polygons and their colours

pub mod bloom_zone;
pub mod error;
pub mod feature;
pub mod lat_lng;
pub mod pipeline;
pub mod reading;
pub mod severity;
pub mod source;
pub mod timestamp;

pub use error::{BuoyError, Result};
