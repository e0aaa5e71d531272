//! Per-request instrumentation for the dashboard API.
//!
//! Every request passing through the router increments
//! `pulseboard_http_requests_total` and feeds
//! `pulseboard_http_request_duration_seconds`; the `/metrics` handler in
//! this module's sibling exposes them for scraping.

use axum::{body::Body, extract::MatchedPath, http::Request, middleware::Next, response::Response};
use std::time::Instant;

pub(crate) const REQUESTS_TOTAL: &str = "pulseboard_http_requests_total";
pub(crate) const REQUEST_DURATION_SECONDS: &str = "pulseboard_http_request_duration_seconds";

/// Records the request counter (labels `method`, `path`, `status`) and the
/// duration histogram (labels `method`, `path`).
///
/// The `path` label uses the matched route template (`/api/v1/platforms`,
/// not the concrete URI) so unmatched probe URLs cannot explode cardinality.
pub async fn request_metrics_middleware(request: Request<Body>, next: Next) -> Response {
    let method = request.method().to_string();
    let path = request
        .extensions()
        .get::<MatchedPath>()
        .map(|mp| mp.as_str().to_string())
        .unwrap_or_else(|| request.uri().path().to_string());

    let start = Instant::now();
    let response = next.run(request).await;
    let duration = start.elapsed().as_secs_f64();

    let status = response.status().as_u16().to_string();

    metrics::counter!(REQUESTS_TOTAL, "method" => method.clone(), "path" => path.clone(), "status" => status)
        .increment(1);
    metrics::histogram!(REQUEST_DURATION_SECONDS, "method" => method, "path" => path)
        .record(duration);

    response
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{middleware, routing::get, Router};
    use axum::http::StatusCode;
    use metrics_exporter_prometheus::PrometheusBuilder;
    use tower::util::ServiceExt;

    #[tokio::test]
    async fn records_counter_and_histogram_for_matched_route() {
        // The only test that installs the process-global recorder.
        let handle = PrometheusBuilder::new()
            .install_recorder()
            .expect("install recorder");

        let router = Router::new()
            .route("/ping", get(|| async { StatusCode::OK }))
            .layer(middleware::from_fn(request_metrics_middleware));

        let response = router
            .oneshot(
                Request::builder()
                    .uri("/ping")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let rendered = handle.render();
        assert!(rendered.contains(REQUESTS_TOTAL));
        assert!(rendered.contains(REQUEST_DURATION_SECONDS));
        assert!(rendered.contains(r#"method="GET""#));
        assert!(rendered.contains(r#"path="/ping""#));
        assert!(rendered.contains(r#"status="200""#));
    }
}
