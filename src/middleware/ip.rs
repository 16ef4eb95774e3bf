use async_trait::async_trait;
use axum::{
    extract::{connect_info::ConnectInfo, FromRequestParts},
    http::{request::Parts, HeaderMap},
};
use std::convert::Infallible;
use std::net::{IpAddr, SocketAddr};

/// The client address as observed through proxy headers, falling back to the
/// socket peer address. Unlike `ConnectInfo` this never rejects when the
/// connection info extension is absent (e.g. in tests or custom services).
#[derive(Clone, Copy, Debug)]
pub struct ClientIp(pub IpAddr);

fn ip_from_headers(headers: &HeaderMap) -> Option<IpAddr> {
    if let Some(h) = headers.get("x-forwarded-for").and_then(|hv| hv.to_str().ok()) {
        if let Some(first) = h.split(',').next() {
            if let Ok(ip) = first.trim().parse::<IpAddr>() {
                return Some(ip);
            }
        }
    }
    if let Some(h) = headers.get("x-real-ip").and_then(|hv| hv.to_str().ok()) {
        if let Ok(ip) = h.parse::<IpAddr>() {
            return Some(ip);
        }
    }
    None
}

#[async_trait]
impl<S> FromRequestParts<S> for ClientIp
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        if let Some(ip) = ip_from_headers(&parts.headers) {
            return Ok(ClientIp(ip));
        }
        let fallback = ConnectInfo::<SocketAddr>::from_request_parts(parts, state)
            .await
            .ok()
            .map(|ConnectInfo(addr)| addr.ip());
        Ok(ClientIp(fallback.unwrap_or(IpAddr::from([127, 0, 0, 1]))))
    }
}
