//! Blocking client for the TomTom Traffic Flow Segment Data API.
//!
//! Each [`SpeedSource::current_speed`] call issues exactly one GET:
//!
//! ```text
//! {base_url}/{zoom}/json?point={lat},{lon}&unit=KMPH&key={api_key}
//! ```
//!
//! The request uses the transport's default timeout and is never retried.
//! The API key only ever travels in the query string; it is not logged.

use reqwest::blocking::Client;
use tracing::debug;

use ed_core::GeoPoint;

use crate::flow::parse_flow_segment;
use crate::source::SpeedSource;
use crate::{TrafficError, TrafficResult};

/// Absolute flow-segment endpoint, without the zoom and format suffix.
pub const DEFAULT_BASE_URL: &str =
    "https://api.tomtom.com/traffic/services/4/flowSegmentData/absolute";

/// Map zoom level that selects the road-segment granularity.
pub const DEFAULT_ZOOM: u8 = 10;

/// Connection settings for [`TomTomClient`].
#[derive(Clone)]
pub struct TomTomConfig {
    pub api_key:  String,
    pub base_url: String,
    pub zoom:     u8,
}

impl TomTomConfig {
    /// Config against the public endpoint with the default zoom.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key:  api_key.into(),
            base_url: DEFAULT_BASE_URL.to_owned(),
            zoom:     DEFAULT_ZOOM,
        }
    }

    /// Point the client at another host (a proxy or a local stub).
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Endpoint URL without query parameters.
    pub fn endpoint(&self) -> String {
        format!("{}/{}/json", self.base_url.trim_end_matches('/'), self.zoom)
    }
}

impl std::fmt::Debug for TomTomConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TomTomConfig")
            .field("api_key", &"<redacted>")
            .field("base_url", &self.base_url)
            .field("zoom", &self.zoom)
            .finish()
    }
}

/// Live speed lookups against the flow-segment API.
pub struct TomTomClient {
    config: TomTomConfig,
    http:   Client,
}

impl TomTomClient {
    /// Build a client.
    ///
    /// # Errors
    ///
    /// [`TrafficError::MissingApiKey`] if the key is blank;
    /// [`TrafficError::Http`] if the HTTP client cannot be initialised.
    pub fn new(config: TomTomConfig) -> TrafficResult<Self> {
        if config.api_key.trim().is_empty() {
            return Err(TrafficError::MissingApiKey);
        }
        let http = Client::builder().build()?;
        Ok(Self { config, http })
    }

    pub fn config(&self) -> &TomTomConfig {
        &self.config
    }

    /// Query parameters for a lookup at `at`, in request order.
    pub fn query(&self, at: GeoPoint) -> [(&'static str, String); 3] {
        [
            ("point", format!("{},{}", at.lat, at.lon)),
            ("unit", "KMPH".to_owned()),
            ("key", self.config.api_key.clone()),
        ]
    }
}

impl SpeedSource for TomTomClient {
    fn current_speed(&self, at: GeoPoint) -> TrafficResult<f64> {
        let response = self
            .http
            .get(self.config.endpoint())
            .query(&self.query(at))
            .send()?;

        let status = response.status();
        if !status.is_success() {
            return Err(TrafficError::Status(status.as_u16()));
        }

        let body = response.text()?;
        let segment = parse_flow_segment(&body)?;
        debug!(
            %at,
            current_kmh = segment.current_speed_kmh,
            free_flow_kmh = ?segment.free_flow_speed_kmh,
            confidence = ?segment.confidence,
            "traffic speed"
        );
        Ok(segment.current_speed_kmh)
    }
}
