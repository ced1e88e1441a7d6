//! Google Maps web service client (geocoding + directions).

use async_trait::async_trait;
use log::{debug, warn};
use serde::Deserialize;
use std::time::Duration;

use super::{DirectionsRequest, DirectionsService, Geocoder, RouteFetcher, TravelMode};
use crate::error::{GeocodeError, RouteError};
use crate::geo::{decode_polyline, Address, Coordinate, Route, RouteSummary};

pub const DEFAULT_BASE_URL: &str = "https://maps.googleapis.com/maps/api";

pub type GoogleRouteFetcher = RouteFetcher<GoogleMapsClient, GoogleMapsClient>;

const STATUS_OK: &str = "OK";
const STATUS_ZERO_RESULTS: &str = "ZERO_RESULTS";

/// HTTP client for the Geocoding and Directions JSON APIs
#[derive(Clone)]
pub struct GoogleMapsClient {
    http: reqwest::Client,
    api_key: String,
    base_url: String,
}

impl GoogleMapsClient {
    pub fn new(api_key: impl Into<String>) -> Result<Self, reqwest::Error> {
        Self::with_base_url(api_key, DEFAULT_BASE_URL)
    }

    /// Points the client at a different host, e.g. a local stub server
    pub fn with_base_url(
        api_key: impl Into<String>,
        base_url: impl Into<String>,
    ) -> Result<Self, reqwest::Error> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(20))
            .build()?;

        Ok(Self {
            http,
            api_key: api_key.into(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    /// Route fetcher that uses this client for both geocoding and directions
    pub fn route_fetcher(self, mode: TravelMode) -> GoogleRouteFetcher {
        RouteFetcher::new(self.clone(), self).with_mode(mode)
    }

    async fn get_text(&self, endpoint: &str, query: &[(&str, &str)]) -> Result<String, reqwest::Error> {
        let url = format!("{}/{}/json", self.base_url, endpoint);
        debug!("GET {}", url);

        self.http
            .get(&url)
            .query(query)
            .query(&[("key", self.api_key.as_str())])
            .send()
            .await?
            .error_for_status()?
            .text()
            .await
    }
}

#[async_trait]
impl Geocoder for GoogleMapsClient {
    async fn resolve(&self, address: &Address) -> Result<Coordinate, GeocodeError> {
        let body = self
            .get_text("geocode", &[("address", address.as_str())])
            .await
            .map_err(GeocodeError::transport)?;
        parse_geocode_response(address, &body)
    }
}

#[async_trait]
impl DirectionsService for GoogleMapsClient {
    async fn route(&self, request: &DirectionsRequest) -> Result<Route, RouteError> {
        let origin = request.origin.to_query();
        let destination = request.destination.to_query();
        let body = self
            .get_text(
                "directions",
                &[
                    ("origin", origin.as_str()),
                    ("destination", destination.as_str()),
                    ("mode", request.mode.as_str()),
                ],
            )
            .await
            .map_err(RouteError::transport)?;
        parse_directions_response(&body)
    }
}

#[derive(Debug, Deserialize)]
struct GeocodeResponse {
    status: String,
    #[serde(default)]
    error_message: Option<String>,
    #[serde(default)]
    results: Vec<GeocodeResult>,
}

#[derive(Debug, Deserialize)]
struct GeocodeResult {
    #[serde(default)]
    formatted_address: Option<String>,
    geometry: Geometry,
}

#[derive(Debug, Deserialize)]
struct Geometry {
    location: Coordinate,
}

#[derive(Debug, Deserialize)]
struct DirectionsResponse {
    status: String,
    #[serde(default)]
    error_message: Option<String>,
    #[serde(default)]
    routes: Vec<DirectionsRoute>,
}

#[derive(Debug, Deserialize)]
struct DirectionsRoute {
    overview_polyline: EncodedPolyline,
    #[serde(default)]
    legs: Vec<Leg>,
}

#[derive(Debug, Deserialize)]
struct EncodedPolyline {
    points: String,
}

#[derive(Debug, Deserialize)]
struct Leg {
    #[serde(default)]
    distance: Option<TextValue>,
    #[serde(default)]
    duration: Option<TextValue>,
}

#[derive(Debug, Deserialize)]
struct TextValue {
    value: f64,
}

/// First candidate of a geocoding response body
pub fn parse_geocode_response(address: &Address, body: &str) -> Result<Coordinate, GeocodeError> {
    let response: GeocodeResponse =
        serde_json::from_str(body).map_err(|e| GeocodeError::Decode(e.to_string()))?;

    match response.status.as_str() {
        STATUS_OK => {}
        STATUS_ZERO_RESULTS => return Err(GeocodeError::NotFound(address.to_string())),
        _ => {
            return Err(GeocodeError::Status {
                status: response.status,
                message: response.error_message.unwrap_or_default(),
            })
        }
    }

    let first = response
        .results
        .into_iter()
        .next()
        .ok_or_else(|| GeocodeError::NotFound(address.to_string()))?;

    if let Some(formatted) = &first.formatted_address {
        debug!("{} resolved as {}", address, formatted);
    }
    Ok(first.geometry.location)
}

/// Overview path of the first route of a directions response body
pub fn parse_directions_response(body: &str) -> Result<Route, RouteError> {
    let response: DirectionsResponse =
        serde_json::from_str(body).map_err(|e| RouteError::Decode(e.to_string()))?;

    if response.status != STATUS_OK {
        warn!("Directions request returned {}", response.status);
        return Err(RouteError::Status {
            status: response.status,
            message: response.error_message.unwrap_or_default(),
        });
    }

    let first = response.routes.into_iter().next().ok_or(RouteError::NoRoutes)?;
    let waypoints = decode_polyline(&first.overview_polyline.points)?;

    let summary = RouteSummary {
        distance_m: first
            .legs
            .iter()
            .filter_map(|leg| leg.distance.as_ref())
            .map(|d| d.value)
            .sum(),
        duration_s: first
            .legs
            .iter()
            .filter_map(|leg| leg.duration.as_ref())
            .map(|d| d.value)
            .sum(),
    };

    Ok(Route::new(waypoints)?.with_summary(summary))
}
