use crate::state::AppState;
use axum::{
    extract::State,
    http::{header, StatusCode},
    response::IntoResponse,
    Json,
};

// Health check endpoint - lightweight, no auth
pub async fn healthz() -> impl IntoResponse {
    (StatusCode::OK, "ok")
}

// Readiness probe: checks DB connectivity with timeout protection
pub async fn readyz(State(state): State<AppState>) -> impl IntoResponse {
    let query = sqlx::query("SELECT 1").fetch_one(&state.db);
    match tokio::time::timeout(std::time::Duration::from_secs(5), query).await {
        Ok(Ok(_)) => (StatusCode::OK, "ready").into_response(),
        Ok(Err(e)) => (StatusCode::SERVICE_UNAVAILABLE, format!("not ready: {}", e)).into_response(),
        Err(_) => (StatusCode::SERVICE_UNAVAILABLE, "not ready: timeout").into_response(),
    }
}

// Metrics endpoint: returns JSON snapshot
pub async fn metrics(State(state): State<AppState>) -> impl IntoResponse {
    let snapshot = state.metrics.get_snapshot();
    Json(snapshot)
}

// Prometheus-compatible text exposition format
pub async fn metrics_prometheus(State(state): State<AppState>) -> impl IntoResponse {
    let m = state.metrics.get_snapshot();
    let body = format!(
        "# HELP warenlager_products_created Products created\n# TYPE warenlager_products_created counter\nwarenlager_products_created {}\n\
# HELP warenlager_products_updated Products updated\n# TYPE warenlager_products_updated counter\nwarenlager_products_updated {}\n\
# HELP warenlager_products_deleted Products deleted\n# TYPE warenlager_products_deleted counter\nwarenlager_products_deleted {}\n\
# HELP warenlager_list_queries Product list queries\n# TYPE warenlager_list_queries counter\nwarenlager_list_queries {}\n\
# HELP warenlager_distance_lookups Distance lookups\n# TYPE warenlager_distance_lookups counter\nwarenlager_distance_lookups {}\n\
# HELP warenlager_uptime_seconds Uptime seconds\n# TYPE warenlager_uptime_seconds gauge\nwarenlager_uptime_seconds {}\n",
        m.products_created,
        m.products_updated,
        m.products_deleted,
        m.list_queries,
        m.distance_lookups,
        m.uptime_seconds,
    );
    ([(header::CONTENT_TYPE, "text/plain; version=0.0.4")], body)
}

// Version/Build info endpoint (JSON)
pub async fn version() -> impl IntoResponse {
    let body = serde_json::json!({
        "name": env!("CARGO_PKG_NAME"),
        "version": env!("CARGO_PKG_VERSION"),
        "package": {
            "description": env!("CARGO_PKG_DESCRIPTION"),
            "authors": env!("CARGO_PKG_AUTHORS"),
            "license": env!("CARGO_PKG_LICENSE"),
        },
        "build": {
            "profile": if cfg!(debug_assertions) { "debug" } else { "release" },
            "os": std::env::consts::OS,
            "arch": std::env::consts::ARCH,
        }
    });
    (StatusCode::OK, Json(body))
}
