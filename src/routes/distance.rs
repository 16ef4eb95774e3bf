use axum::{
    extract::{Query, State},
    response::IntoResponse,
    Json,
};
use serde::Deserialize;

use crate::{
    error::{AppError, AppResult},
    geo,
    middleware::ip::ClientIp,
    state::AppState,
    types::{DataResponse, DistanceDto},
};

#[derive(Debug, Deserialize)]
pub struct DistanceQuery {
    pub city: Option<String>,
}

/// Distance in kilometers between the caller (geolocated by IP) and a city.
/// Two sequential external lookups; either failing aborts the request.
pub async fn distance(
    State(state): State<AppState>,
    ClientIp(ip): ClientIp,
    Query(query): Query<DistanceQuery>,
) -> AppResult<impl IntoResponse> {
    let city = query
        .city
        .as_deref()
        .map(str::trim)
        .filter(|c| !c.is_empty())
        .ok_or_else(|| AppError::BadRequest("city query parameter is required".to_string()))?;

    state.metrics.inc_distance_lookups();

    let origin = state.geo.locate_ip(ip).await?;
    let target = state.geo.locate_city(city).await?;
    let distance_km = geo::haversine_km(origin, target);

    Ok(Json(DataResponse { data: DistanceDto { distance_km } }))
}
