//! Geo lookups for the distance endpoint: client IP → coordinates via
//! ip-api.com, city name → coordinates via Nominatim, and the haversine
//! great-circle distance between the two.

use std::net::IpAddr;

use serde::Deserialize;

use crate::config::GeoConfig;
use crate::error::{AppError, AppResult};

const EARTH_RADIUS_KM: f64 = 6371.0;

/// A latitude/longitude pair in degrees.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Coord {
    pub lat: f64,
    pub lon: f64,
}

/// Great-circle distance between two points, in kilometers.
pub fn haversine_km(a: Coord, b: Coord) -> f64 {
    let dlat = (b.lat - a.lat).to_radians();
    let dlon = (b.lon - a.lon).to_radians();
    let h = (dlat / 2.0).sin().powi(2)
        + a.lat.to_radians().cos() * b.lat.to_radians().cos() * (dlon / 2.0).sin().powi(2);
    2.0 * EARTH_RADIUS_KM * h.sqrt().asin()
}

#[derive(Debug, Deserialize)]
pub(crate) struct IpApiResponse {
    pub(crate) status: Option<String>,
    pub(crate) message: Option<String>,
    pub(crate) lat: Option<f64>,
    pub(crate) lon: Option<f64>,
}

/// Nominatim serializes coordinates as strings.
#[derive(Debug, Deserialize)]
pub(crate) struct NominatimEntry {
    pub(crate) lat: String,
    pub(crate) lon: String,
}

pub(crate) fn coord_from_ip_api(resp: IpApiResponse, ip: IpAddr) -> AppResult<Coord> {
    if resp.status.as_deref() == Some("fail") {
        return Err(AppError::Geolocation(format!(
            "IP lookup for {} failed: {}",
            ip,
            resp.message.unwrap_or_else(|| "unknown reason".to_string())
        )));
    }
    match (resp.lat, resp.lon) {
        (Some(lat), Some(lon)) => Ok(Coord { lat, lon }),
        _ => Err(AppError::Geolocation(format!("IP lookup for {} returned no coordinates", ip))),
    }
}

pub(crate) fn coord_from_nominatim(entries: Vec<NominatimEntry>, city: &str) -> AppResult<Coord> {
    let first = entries
        .into_iter()
        .next()
        .ok_or_else(|| AppError::Geolocation(format!("city not found: {}", city)))?;
    let lat = first
        .lat
        .parse::<f64>()
        .map_err(|e| AppError::Geolocation(format!("invalid latitude for {}: {}", city, e)))?;
    let lon = first
        .lon
        .parse::<f64>()
        .map_err(|e| AppError::Geolocation(format!("invalid longitude for {}: {}", city, e)))?;
    Ok(Coord { lat, lon })
}

/// Client for the two external geocoding services. Base URLs come from the
/// configuration so tests can point at a local stand-in.
#[derive(Clone)]
pub struct GeoClient {
    http: reqwest::Client,
    ip_api_base: String,
    nominatim_base: String,
}

impl GeoClient {
    pub fn new(cfg: &GeoConfig) -> anyhow::Result<Self> {
        // Nominatim's usage policy requires an identifying User-Agent.
        let http = reqwest::Client::builder()
            .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| anyhow::anyhow!("failed to build HTTP client: {}", e))?;
        Ok(Self {
            http,
            ip_api_base: cfg.ip_api_base.trim_end_matches('/').to_string(),
            nominatim_base: cfg.nominatim_base.trim_end_matches('/').to_string(),
        })
    }

    pub async fn locate_ip(&self, ip: IpAddr) -> AppResult<Coord> {
        let url = format!("{}/json/{}", self.ip_api_base, ip);
        let resp = self.http.get(&url).send().await?.error_for_status()?;
        let body: IpApiResponse = resp.json().await?;
        coord_from_ip_api(body, ip)
    }

    pub async fn locate_city(&self, city: &str) -> AppResult<Coord> {
        let url = format!("{}/search", self.nominatim_base);
        let resp = self
            .http
            .get(&url)
            .query(&[("q", city), ("format", "json")])
            .send()
            .await?
            .error_for_status()?;
        let entries: Vec<NominatimEntry> = resp.json().await?;
        coord_from_nominatim(entries, city)
    }
}
