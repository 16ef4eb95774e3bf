use std::net::IpAddr;

use crate::error::AppError;
use crate::geo::{coord_from_ip_api, coord_from_nominatim, haversine_km, Coord};

const PARIS: Coord = Coord { lat: 48.8589, lon: 2.32 };
const LYON: Coord = Coord { lat: 45.7578, lon: 4.8320 };

#[test]
fn test_haversine_paris_to_lyon() {
    let distance = haversine_km(PARIS, LYON);
    assert!((distance - 465.0).abs() < 10.0, "expected ~465 km, got {:.2}", distance);
}

#[test]
fn test_haversine_is_symmetric_and_zero_on_identity() {
    assert_eq!(haversine_km(PARIS, PARIS), 0.0);
    let there = haversine_km(PARIS, LYON);
    let back = haversine_km(LYON, PARIS);
    assert!((there - back).abs() < 1e-9);
}

fn test_ip() -> IpAddr {
    "8.8.8.8".parse().unwrap()
}

#[test]
fn test_ip_api_success_response() {
    let resp = serde_json::from_str(r#"{"status":"success","lat":39.03,"lon":-77.5}"#).unwrap();
    let coord = coord_from_ip_api(resp, test_ip()).unwrap();
    assert!((coord.lat - 39.03).abs() < 1e-9);
    assert!((coord.lon + 77.5).abs() < 1e-9);
}

#[test]
fn test_ip_api_failure_status_is_reported() {
    let resp =
        serde_json::from_str(r#"{"status":"fail","message":"private range"}"#).unwrap();
    match coord_from_ip_api(resp, test_ip()) {
        Err(AppError::Geolocation(msg)) => assert!(msg.contains("private range")),
        other => panic!("expected Geolocation error, got {:?}", other.map(|_| ())),
    }
}

#[test]
fn test_ip_api_missing_coordinates_is_reported() {
    let resp = serde_json::from_str(r#"{"status":"success"}"#).unwrap();
    assert!(matches!(coord_from_ip_api(resp, test_ip()), Err(AppError::Geolocation(_))));
}

#[test]
fn test_nominatim_first_entry_wins() {
    // Nominatim serializes coordinates as strings
    let entries = serde_json::from_str(
        r#"[{"lat":"48.8588897","lon":"2.32"},{"lat":"0.0","lon":"0.0"}]"#,
    )
    .unwrap();
    let coord = coord_from_nominatim(entries, "Paris").unwrap();
    assert!((coord.lat - 48.8588897).abs() < 1e-9);
    assert!((coord.lon - 2.32).abs() < 1e-9);
}

#[test]
fn test_nominatim_no_results_is_city_not_found() {
    let entries = serde_json::from_str("[]").unwrap();
    match coord_from_nominatim(entries, "Atlantis") {
        Err(AppError::Geolocation(msg)) => assert!(msg.contains("Atlantis")),
        other => panic!("expected Geolocation error, got {:?}", other.map(|_| ())),
    }
}

#[test]
fn test_nominatim_unparseable_coordinates_rejected() {
    let entries = serde_json::from_str(r#"[{"lat":"north","lon":"2.32"}]"#).unwrap();
    assert!(matches!(coord_from_nominatim(entries, "Paris"), Err(AppError::Geolocation(_))));
}
