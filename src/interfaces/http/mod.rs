//! HTTP interface layer

pub mod common;
pub mod modules;
pub mod router;

use std::sync::Arc;
use std::time::Instant;

use metrics_exporter_prometheus::PrometheusHandle;

use crate::application::services::{AvailabilityService, BookingService};
use crate::domain::RepositoryProvider;

/// Shared state handed to every handler.
#[derive(Clone)]
pub struct AppState {
    pub repos: Arc<dyn RepositoryProvider>,
    pub availability: Arc<AvailabilityService>,
    pub bookings: Arc<BookingService>,
    /// None when no Prometheus recorder is installed (tests)
    pub metrics: Option<PrometheusHandle>,
    pub started_at: Instant,
}

impl AppState {
    pub fn new(
        repos: Arc<dyn RepositoryProvider>,
        availability: Arc<AvailabilityService>,
        bookings: Arc<BookingService>,
        metrics: Option<PrometheusHandle>,
    ) -> Self {
        Self {
            repos,
            availability,
            bookings,
            metrics,
            started_at: Instant::now(),
        }
    }
}
