use std::sync::Arc;

use axum::{
    extract::{Request, State},
    http::header,
    middleware::Next,
    response::Response,
};

use crate::config::AppConfig;
use crate::error::AppError;

/// Middleware that checks for a Bearer token in the Authorization header.
///
/// The expected token comes from the `auth.token` configuration value
/// (environment: `WARENLAGER__AUTH__TOKEN`). When no token is configured the
/// middleware is a no-op and all requests pass through.
pub async fn require_auth(
    State(cfg): State<Arc<AppConfig>>,
    req: Request,
    next: Next,
) -> Result<Response, AppError> {
    let expected = match cfg.auth_token() {
        Some(t) => t,
        None => return Ok(next.run(req).await),
    };

    let auth_header = req.headers().get(header::AUTHORIZATION).and_then(|h| h.to_str().ok());

    match auth_header {
        Some(value) if value.starts_with("Bearer ") => {
            if constant_time_eq(value[7..].as_bytes(), expected.as_bytes()) {
                Ok(next.run(req).await)
            } else {
                Err(AppError::Unauthorized("invalid bearer token".to_string()))
            }
        }
        _ => Err(AppError::Unauthorized("missing bearer token".to_string())),
    }
}

// Constant-time comparison to prevent timing attacks
fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        return false;
    }
    let mut diff = 0u8;
    for (x, y) in a.iter().zip(b.iter()) {
        diff |= x ^ y;
    }
    diff == 0
}
