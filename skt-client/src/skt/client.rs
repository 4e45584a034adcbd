//! SKT open API HTTP client.
//!
//! Provides async methods for the station, nearby station and trip
//! searches. Responses are SOAP XML; they are converted to JSON and run
//! through the endpoint pipelines.

use reqwest::header::CONTENT_TYPE;
use tracing::debug;

use crate::domain::{Point, Trip};
use crate::geo::Wgs84;
use crate::xml;

use super::endpoint::{Endpoint, NearbyStations, Stations, Trips, parse_response};
use super::error::SktError;
use super::query::{
    DEFAULT_MAX_RESULTS, DEFAULT_NEARBY_RADIUS, Params, TripQuery, nearby_stations_params,
    stations_params, trip_params,
};

/// Default base URL for the SKT open API.
pub const DEFAULT_BASE_URL: &str = "http://www.labs.skanetrafiken.se/v2.2";

/// Configuration for the SKT client.
#[derive(Debug, Clone)]
pub struct SktConfig {
    /// Base URL for the API (defaults to the public endpoint)
    pub base_url: String,
    /// Request timeout in seconds
    pub timeout_secs: u64,
    /// Trips requested when a query does not say
    pub max_results: u32,
    /// Nearby station radius in meters when a call does not say
    pub nearby_radius: u32,
}

impl SktConfig {
    pub fn new() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_secs: 30,
            max_results: DEFAULT_MAX_RESULTS,
            nearby_radius: DEFAULT_NEARBY_RADIUS,
        }
    }

    /// Set a custom base URL (for testing).
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Set request timeout.
    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }

    pub fn with_max_results(mut self, n: u32) -> Self {
        self.max_results = n;
        self
    }

    pub fn with_nearby_radius(mut self, meters: u32) -> Self {
        self.nearby_radius = meters;
        self
    }
}

impl Default for SktConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Whether a content type denotes XML (`text/xml`, `application/soap+xml`).
fn is_xml(content_type: &str) -> bool {
    let lower = content_type.to_ascii_lowercase();
    lower.match_indices("xml").any(|(i, _)| {
        lower[..i]
            .chars()
            .next_back()
            .is_some_and(|c| !(c.is_alphanumeric() || c == '_'))
    })
}

/// SKT open API client.
#[derive(Debug, Clone)]
pub struct SktClient {
    http: reqwest::Client,
    base_url: String,
    max_results: u32,
    nearby_radius: u32,
}

impl SktClient {
    /// Create a new client with the given configuration.
    pub fn new(config: SktConfig) -> Result<Self, SktError> {
        let http = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            max_results: config.max_results,
            nearby_radius: config.nearby_radius,
        })
    }

    /// Search stations, addresses and points of interest by name.
    pub async fn stations(&self, query: &str) -> Result<Vec<Point>, SktError> {
        self.request::<Stations>(&stations_params(query)).await
    }

    /// Stations within `radius` meters of a location.
    pub async fn nearby_stations(
        &self,
        location: Wgs84,
        radius: Option<u32>,
    ) -> Result<Vec<Point>, SktError> {
        let radius = radius.unwrap_or(self.nearby_radius);
        self.request::<NearbyStations>(&nearby_stations_params(location, Some(radius)))
            .await
    }

    /// Search trips between two points.
    ///
    /// A query without a date searches from five minutes ago, local time.
    pub async fn trips(&self, query: &TripQuery) -> Result<Vec<Trip>, SktError> {
        let mut query = query.clone();
        query.max_results.get_or_insert(self.max_results);

        let now = chrono::Local::now().naive_local();
        self.request::<Trips>(&trip_params(&query, now)).await
    }

    async fn request<E: Endpoint>(&self, params: &Params) -> Result<Vec<E::Item>, SktError> {
        let url = format!("{}{}", self.base_url, E::PATH);
        debug!(endpoint = E::NAME, %url, ?params, "SKT request");

        let response = self.http.get(&url).query(params).send().await?;

        let status = response.status();
        debug!(endpoint = E::NAME, %status, "SKT response");

        if status == reqwest::StatusCode::UNAUTHORIZED {
            return Err(SktError::Unauthorized);
        }

        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            return Err(SktError::RateLimited);
        }

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(SktError::Api {
                status: status.as_u16(),
                message: body,
            });
        }

        let xml_body = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .is_some_and(is_xml);

        let body = response.text().await?;

        let raw = if xml_body {
            xml::to_json(&body)?
        } else {
            serde_json::from_str(&body).map_err(|e| SktError::Json {
                message: e.to_string(),
                body: Some(body.chars().take(500).collect()),
            })?
        };

        let items = parse_response::<E>(&raw)?;
        debug!(endpoint = E::NAME, count = items.len(), "SKT results");
        Ok(items)
    }
}
