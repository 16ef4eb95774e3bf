use serde::Serialize;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Instant;

/// Usage counters for monitoring
#[derive(Clone)]
pub struct Metrics {
    pub products_created: Arc<AtomicU64>,
    pub products_updated: Arc<AtomicU64>,
    pub products_deleted: Arc<AtomicU64>,
    pub list_queries: Arc<AtomicU64>,
    pub distance_lookups: Arc<AtomicU64>,
    pub start_time: Instant,
}

impl Metrics {
    pub fn new() -> Self {
        Self {
            products_created: Arc::new(AtomicU64::new(0)),
            products_updated: Arc::new(AtomicU64::new(0)),
            products_deleted: Arc::new(AtomicU64::new(0)),
            list_queries: Arc::new(AtomicU64::new(0)),
            distance_lookups: Arc::new(AtomicU64::new(0)),
            start_time: Instant::now(),
        }
    }

    pub fn inc_products_created(&self) {
        self.products_created.fetch_add(1, Ordering::Relaxed);
    }

    pub fn inc_products_updated(&self) {
        self.products_updated.fetch_add(1, Ordering::Relaxed);
    }

    pub fn inc_products_deleted(&self) {
        self.products_deleted.fetch_add(1, Ordering::Relaxed);
    }

    pub fn inc_list_queries(&self) {
        self.list_queries.fetch_add(1, Ordering::Relaxed);
    }

    pub fn inc_distance_lookups(&self) {
        self.distance_lookups.fetch_add(1, Ordering::Relaxed);
    }

    pub fn get_snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            products_created: self.products_created.load(Ordering::Relaxed),
            products_updated: self.products_updated.load(Ordering::Relaxed),
            products_deleted: self.products_deleted.load(Ordering::Relaxed),
            list_queries: self.list_queries.load(Ordering::Relaxed),
            distance_lookups: self.distance_lookups.load(Ordering::Relaxed),
            uptime_seconds: self.start_time.elapsed().as_secs(),
        }
    }
}

impl Default for Metrics {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Serialize)]
pub struct MetricsSnapshot {
    pub products_created: u64,
    pub products_updated: u64,
    pub products_deleted: u64,
    pub list_queries: u64,
    pub distance_lookups: u64,
    pub uptime_seconds: u64,
}
