//! Prometheus scrape endpoint for the dashboard service.
//!
//! Renders whatever the installed `metrics-exporter-prometheus` recorder
//! has accumulated, which for this service is the request instrumentation
//! from [`super::middleware`] plus the login/signup counters emitted by the
//! auth handlers.

use axum::{extract::State, http::StatusCode, response::IntoResponse};
use metrics_exporter_prometheus::PrometheusHandle;

/// State carrying the recorder handle for `GET /metrics`.
#[derive(Clone)]
pub struct MetricsState {
    pub handle: PrometheusHandle,
}

/// `GET /metrics` — unauthenticated, Prometheus text exposition format.
pub async fn prometheus_metrics(State(state): State<MetricsState>) -> impl IntoResponse {
    let body = state.handle.render();
    (
        StatusCode::OK,
        [("content-type", "text/plain; version=0.0.4; charset=utf-8")],
        body,
    )
}
