//! Client for the external directions service.
//!
//! Issues a GET for a travel profile and origin/destination pair and decodes
//! the JSON body into a [`RouteInfo`]. Transport and parsing are split so the
//! parser can be tested against canned bodies.

use once_cell::sync::Lazy;
use reqwest::blocking::Client;
use serde::Deserialize;

use crate::core::geo::GeoPoint;
use crate::{Error, Result};

/// Shared blocking HTTP client with a crate User-Agent. Building the client
/// once avoids the cost of TLS and connection pool setup for every request.
pub(crate) static HTTP_CLIENT: Lazy<Client> = Lazy::new(|| {
    Client::builder()
        .user_agent("postmap/0.1 (+https://github.com/example/postmap)")
        .build()
        .expect("failed to build reqwest blocking client")
});

const DEFAULT_BASE_URL: &str = "https://api.mapbox.com/directions/v5/mapbox";

/// Travel profile for a directions request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TravelMode {
    Walking,
    Cycling,
    Driving,
}

impl TravelMode {
    pub fn profile(&self) -> &'static str {
        match self {
            Self::Walking => "walking",
            Self::Cycling => "cycling",
            Self::Driving => "driving",
        }
    }
}

/// One maneuver along a route.
#[derive(Debug, Clone, PartialEq)]
pub struct RouteStep {
    pub instruction: String,
    pub maneuver: String,
    pub distance_m: f64,
    pub duration_s: f64,
}

/// A fetched route: discarded whenever the route is cleared or replaced.
#[derive(Debug, Clone, PartialEq)]
pub struct RouteInfo {
    pub distance_m: f64,
    pub duration_s: f64,
    pub path: Vec<GeoPoint>,
    pub steps: Vec<RouteStep>,
}

impl RouteInfo {
    /// `"{n}m"` under a kilometer, `"{n.n}km"` above.
    pub fn formatted_distance(&self) -> String {
        if self.distance_m < 1000.0 {
            format!("{}m", self.distance_m.round() as i64)
        } else {
            format!("{:.1}km", self.distance_m / 1000.0)
        }
    }

    /// `"{n} min"` under an hour, `"{h}h {m}min"` above.
    pub fn formatted_duration(&self) -> String {
        let minutes = (self.duration_s / 60.0).round() as i64;
        if minutes < 60 {
            format!("{} min", minutes.max(1))
        } else {
            format!("{}h {}min", minutes / 60, minutes % 60)
        }
    }
}

// Wire shapes of the directions response body.

#[derive(Deserialize)]
struct DirectionsResponse {
    routes: Vec<DirectionsRoute>,
}

#[derive(Deserialize)]
struct DirectionsRoute {
    geometry: RouteGeometry,
    distance: f64,
    duration: f64,
    #[serde(default)]
    legs: Vec<RouteLeg>,
}

#[derive(Deserialize)]
struct RouteGeometry {
    /// `[lng, lat]` pairs
    coordinates: Vec<[f64; 2]>,
}

#[derive(Deserialize)]
struct RouteLeg {
    steps: Vec<LegStep>,
}

#[derive(Deserialize)]
struct LegStep {
    maneuver: Maneuver,
    distance: f64,
    duration: f64,
}

#[derive(Deserialize)]
struct Maneuver {
    #[serde(rename = "type")]
    kind: String,
    instruction: String,
}

/// Thin wrapper over the directions endpoint.
#[derive(Debug, Clone)]
pub struct DirectionsClient {
    base_url: String,
    access_token: String,
}

impl DirectionsClient {
    pub fn new(access_token: impl Into<String>) -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            access_token: access_token.into(),
        }
    }

    /// Overrides the service base URL (tests, self-hosted routers).
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn request_url(&self, mode: TravelMode, origin: GeoPoint, destination: GeoPoint) -> String {
        format!(
            "{}/{}/{},{};{},{}?geometries=geojson&steps=true&access_token={}",
            self.base_url,
            mode.profile(),
            origin.lng,
            origin.lat,
            destination.lng,
            destination.lat,
            self.access_token,
        )
    }

    /// Fetches a route. Blocks; callers run this off the UI thread.
    pub fn fetch(
        &self,
        mode: TravelMode,
        origin: GeoPoint,
        destination: GeoPoint,
    ) -> Result<RouteInfo> {
        let url = self.request_url(mode, origin, destination);
        log::debug!("fetching {} directions", mode.profile());

        let resp = HTTP_CLIENT.get(&url).send()?;
        if !resp.status().is_success() {
            return Err(Error::Directions(format!("HTTP {}", resp.status())));
        }
        parse_response(&resp.text()?)
    }
}

/// Decodes a directions body into the first route. An empty `routes` array or
/// empty geometry is a failure, not an empty route.
pub fn parse_response(body: &str) -> Result<RouteInfo> {
    let decoded: DirectionsResponse = serde_json::from_str(body)?;
    let route = decoded
        .routes
        .into_iter()
        .next()
        .ok_or_else(|| Error::Directions("empty route list".to_string()))?;

    if route.geometry.coordinates.is_empty() {
        return Err(Error::Directions("empty route geometry".to_string()));
    }

    let path = route
        .geometry
        .coordinates
        .iter()
        .map(|[lng, lat]| GeoPoint::new(*lat, *lng))
        .collect();

    let steps = route
        .legs
        .into_iter()
        .next()
        .map(|leg| {
            leg.steps
                .into_iter()
                .map(|step| RouteStep {
                    instruction: step.maneuver.instruction,
                    maneuver: step.maneuver.kind,
                    distance_m: step.distance,
                    duration_s: step.duration,
                })
                .collect()
        })
        .unwrap_or_default();

    Ok(RouteInfo {
        distance_m: route.distance,
        duration_s: route.duration,
        path,
        steps,
    })
}
