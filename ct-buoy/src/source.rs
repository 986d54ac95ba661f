//! Document sources and the two-way fetch that feeds the pipeline.
//!
//! Both documents are fetched concurrently and the pipeline only runs once
//! both have arrived. Any failure on either side fails the whole load, so a
//! caller never sees a `RenderState` built from one document.

use crate::error::{BuoyError, Result};
use crate::feature::{parse_features, FeaturePolicy};
use crate::pipeline::{self, RenderState};
use crate::reading::StationReadingStore;
use futures::future::try_join;
use log::info;
use serde_json::Value;

/// Something that can produce the text of one input document.
#[allow(async_fn_in_trait)]
pub trait DocumentSource {
    /// Fetch the whole document body.
    async fn fetch(&self) -> Result<String>;

    /// Short label used in logs and error messages (usually a URL).
    fn describe(&self) -> String;
}

/// A document already held in memory, e.g. an embedded fixture.
#[derive(Debug, Clone)]
pub struct StaticSource {
    label: String,
    body: String,
}

impl StaticSource {
    pub fn new(label: impl Into<String>, body: impl Into<String>) -> Self {
        StaticSource {
            label: label.into(),
            body: body.into(),
        }
    }
}

impl DocumentSource for StaticSource {
    async fn fetch(&self) -> Result<String> {
        Ok(self.body.clone())
    }

    fn describe(&self) -> String {
        self.label.clone()
    }
}

/// Fetch a document over HTTP with a bounded timeout.
#[cfg(not(target_arch = "wasm32"))]
#[derive(Debug, Clone)]
pub struct HttpSource {
    client: reqwest::Client,
    url: String,
}

#[cfg(not(target_arch = "wasm32"))]
impl HttpSource {
    pub fn new(url: impl Into<String>, timeout: std::time::Duration) -> Result<Self> {
        let url = url.into();
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| BuoyError::data_fetch(&url, e))?;
        Ok(HttpSource { client, url })
    }

    /// Share an existing client; its timeout applies.
    pub fn with_client(client: reqwest::Client, url: impl Into<String>) -> Self {
        HttpSource {
            client,
            url: url.into(),
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
impl DocumentSource for HttpSource {
    async fn fetch(&self) -> Result<String> {
        let response = self.client.get(&self.url).send().await.map_err(|e| {
            if e.is_timeout() {
                BuoyError::data_fetch(&self.url, "request timed out")
            } else {
                BuoyError::data_fetch(&self.url, e)
            }
        })?;
        let status = response.status();
        if !status.is_success() {
            return Err(BuoyError::data_fetch(
                &self.url,
                format!("bad response status {status}"),
            ));
        }
        response
            .text()
            .await
            .map_err(|e| BuoyError::data_fetch(&self.url, format!("failed to read body: {e}")))
    }

    fn describe(&self) -> String {
        self.url.clone()
    }
}

fn parse_document(origin: &str, body: &str) -> Result<Value> {
    serde_json::from_str(body).map_err(|e| BuoyError::data_fetch(origin, format!("body is not JSON: {e}")))
}

fn as_fetch_error(origin: &str, error: BuoyError) -> BuoyError {
    match error {
        BuoyError::InvalidDocument(reason) => BuoyError::data_fetch(origin, reason),
        other => other,
    }
}

/// Fetch both documents concurrently, then join them.
///
/// Errors:
/// - `DataFetch` if either fetch fails or either body is not a document of
///   the expected shape
/// - `MalformedFeature` if `policy` is strict and a station feature is unusable
pub async fn load_render_state<F, R>(
    features: &F,
    readings: &R,
    policy: FeaturePolicy,
) -> Result<RenderState>
where
    F: DocumentSource,
    R: DocumentSource,
{
    let features_origin = features.describe();
    let readings_origin = readings.describe();
    info!(
        "Fetching station features from {} and readings from {}",
        features_origin, readings_origin
    );

    let (features_body, readings_body) = try_join(features.fetch(), readings.fetch()).await?;

    let features_doc = parse_document(&features_origin, &features_body)?;
    let readings_doc = parse_document(&readings_origin, &readings_body)?;

    let stations = parse_features(&features_doc, policy)
        .map_err(|e| as_fetch_error(&features_origin, e))?;
    let store = StationReadingStore::from_value(&readings_doc)
        .map_err(|e| as_fetch_error(&readings_origin, e))?;

    Ok(pipeline::run(&stations, &store))
}
