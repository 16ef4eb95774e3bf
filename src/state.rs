use std::sync::Arc;

use crate::config::AppConfig;
use crate::geo::GeoClient;
use crate::metrics::Metrics;

/// The shared application state.
///
/// Holds the resources every request handler needs: the database pool, the
/// configuration, the outbound geo client, and the usage counters. Cloneable
/// for use with Axum's request extraction system.
#[derive(Clone)]
pub struct AppState {
    /// The database connection pool.
    pub db: sqlx::SqlitePool,
    /// The application configuration.
    pub config: Arc<AppConfig>,
    /// Client for the external IP/city geocoding services.
    pub geo: GeoClient,
    /// The application metrics.
    pub metrics: Metrics,
}

impl AppState {
    pub fn new(db: sqlx::SqlitePool, config: AppConfig, geo: GeoClient) -> Self {
        Self { db, config: Arc::new(config), geo, metrics: Metrics::new() }
    }
}
