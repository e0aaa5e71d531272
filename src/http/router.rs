//! API Router with Swagger UI

use std::sync::Arc;
use std::time::Instant;

use axum::{
    middleware,
    routing::{get, post},
    Router,
};
use metrics_exporter_prometheus::PrometheusHandle;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};
use utoipa_swagger_ui::SwaggerUi;

use crate::auth::middleware::{auth_middleware, AuthState};
use crate::auth::JwtConfig;
use crate::http::common::ApiResponse;
use crate::http::modules::metrics::middleware::request_metrics_middleware;
use crate::http::modules::{analytics, auth, export, health, metrics, platforms, prediction};
use crate::store::UserStore;

/// Security scheme modifier for OpenAPI
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .description(Some("JWT Bearer token"))
                        .build(),
                ),
            );
        }
    }
}

/// OpenAPI documentation
#[derive(OpenApi)]
#[openapi(
    paths(
        // Health
        health::handlers::health_check,
        // Auth
        auth::handlers::login,
        auth::handlers::register,
        auth::handlers::get_current_user,
        auth::handlers::logout,
        // Dashboard
        platforms::handlers::search_platforms,
        analytics::handlers::engagement_comparison,
        analytics::handlers::growth_trend,
        analytics::handlers::data_insights,
        analytics::handlers::platform_comparison,
        export::handlers::export_csv,
        // Prediction
        prediction::handlers::predict_users,
        prediction::handlers::model_details,
    ),
    components(
        schemas(
            // Common
            ApiResponse<String>,
            // Auth
            auth::dto::LoginRequest,
            auth::dto::LoginResponse,
            auth::dto::RegisterRequest,
            auth::dto::UserInfo,
            // Platforms
            platforms::dto::PlatformDto,
            platforms::dto::PlatformListResponse,
            // Analytics
            analytics::dto::EngagementBar,
            analytics::dto::EngagementResponse,
            analytics::dto::GrowthPoint,
            analytics::dto::GrowthResponse,
            analytics::dto::ScatterPoint,
            analytics::dto::PieSlice,
            analytics::dto::InsightsResponse,
            analytics::dto::ComparisonEntry,
            analytics::dto::ComparisonChart,
            analytics::dto::ComparisonResponse,
            // Prediction
            prediction::dto::PredictRequest,
            prediction::dto::PredictResponse,
            prediction::dto::OverlayPoint,
            prediction::dto::ModelResponse,
            // Health
            health::handlers::HealthResponse,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Health", description = "Service health check. Use for uptime/readiness monitoring."),
        (name = "Authentication", description = "Signup, login and session management. Login returns a JWT in the `token` field; pass it in the `Authorization: Bearer <token>` header. Credentials live in a flat CSV file."),
        (name = "Dashboard", description = "The dashboard panels as JSON chart series over the fixed 10-platform dataset: platform search, engagement bars, growth trend line, scatter/pie insights, pairwise comparison and CSV export. The dataset never changes at runtime."),
        (name = "Prediction", description = "Ordinary-least-squares projection of users from (engagement, growth), re-fit from the dataset on every request. Inputs are bounded to engagement 0-100 and growth 0-50."),
    ),
    info(
        title = "Pulseboard API",
        version = "0.1.0",
        description = "REST API for a social media analytics dashboard.

## Authentication

Register via `POST /api/v1/auth/register`, then log in via
`POST /api/v1/auth/login` and pass the returned token in the
`Authorization: Bearer <token>` header. Every dashboard endpoint requires it.

## Response format

All JSON endpoints wrap their payload in a standard envelope:
```json
{\"success\": true, \"data\": {...}}
```

On error:
```json
{\"success\": false, \"data\": null, \"error\": \"description\"}
```",
        license(
            name = "MIT"
        )
    )
)]
pub struct ApiDoc;

/// Create the API router with all routes
pub fn create_api_router(
    store: Arc<dyn UserStore>,
    jwt_config: JwtConfig,
    prometheus_handle: PrometheusHandle,
) -> Router {
    let middleware_state = AuthState {
        jwt_config: jwt_config.clone(),
    };

    let auth_state = auth::AuthHandlerState { store, jwt_config };

    // CORS configuration
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    // Auth routes (public)
    let auth_routes = Router::new()
        .route("/login", post(auth::handlers::login))
        .route("/register", post(auth::handlers::register))
        .with_state(auth_state.clone());

    // Auth routes (protected)
    let auth_protected_routes = Router::new()
        .route("/me", get(auth::handlers::get_current_user))
        .route("/logout", post(auth::handlers::logout))
        .layer(middleware::from_fn_with_state(
            middleware_state.clone(),
            auth_middleware,
        ))
        .with_state(auth_state);

    // Dashboard routes (protected): one route per panel projection
    let dashboard_routes = Router::new()
        .route("/platforms", get(platforms::handlers::search_platforms))
        .route(
            "/analytics/engagement",
            get(analytics::handlers::engagement_comparison),
        )
        .route("/analytics/growth", get(analytics::handlers::growth_trend))
        .route("/analytics/insights", get(analytics::handlers::data_insights))
        .route(
            "/analytics/comparison",
            get(analytics::handlers::platform_comparison),
        )
        .route("/export/csv", get(export::handlers::export_csv))
        .route("/prediction", post(prediction::handlers::predict_users))
        .route("/prediction/model", get(prediction::handlers::model_details))
        .layer(middleware::from_fn_with_state(
            middleware_state,
            auth_middleware,
        ));

    // Prometheus scrape endpoint (no auth)
    let metrics_routes = Router::new()
        .route("/metrics", get(metrics::handlers::prometheus_metrics))
        .with_state(metrics::MetricsState {
            handle: prometheus_handle,
        });

    let health_routes = Router::new()
        .route("/health", get(health::handlers::health_check))
        .with_state(health::HealthState {
            started_at: Instant::now(),
        });

    let swagger_routes = SwaggerUi::new("/docs").url("/api-doc/openapi.json", ApiDoc::openapi());

    // Build router
    Router::new()
        // Swagger UI
        .merge(swagger_routes)
        // Health
        .merge(health_routes)
        // Prometheus
        .merge(metrics_routes)
        // Auth
        .nest("/api/v1/auth", auth_routes)
        .nest("/api/v1/auth", auth_protected_routes)
        // Dashboard panels
        .nest("/api/v1", dashboard_routes)
        // Middleware
        .layer(middleware::from_fn(request_metrics_middleware))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{header, Request, StatusCode};
    use tower::ServiceExt;

    use crate::store::CsvUserStore;

    fn test_router(dir: &tempfile::TempDir) -> Router {
        let store = Arc::new(CsvUserStore::new(dir.path().join("users.csv")));
        let handle = metrics_exporter_prometheus::PrometheusBuilder::new()
            .build_recorder()
            .handle();
        create_api_router(
            store,
            JwtConfig {
                secret: "test-secret".to_string(),
                expiration_hours: 1,
                issuer: "pulseboard".to_string(),
            },
            handle,
        )
    }

    #[tokio::test]
    async fn dashboard_routes_require_a_token() {
        let dir = tempfile::tempdir().unwrap();
        let router = test_router(&dir);

        let response = router
            .oneshot(
                Request::builder()
                    .uri("/api/v1/platforms")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn token_from_login_opens_the_dashboard() {
        let dir = tempfile::tempdir().unwrap();
        let router = test_router(&dir);

        let register = Request::builder()
            .method("POST")
            .uri("/api/v1/auth/register")
            .header("content-type", "application/json")
            .body(Body::from(r#"{"username": "alice", "password": "pw"}"#))
            .unwrap();
        assert_eq!(
            router.clone().oneshot(register).await.unwrap().status(),
            StatusCode::CREATED
        );

        let login = Request::builder()
            .method("POST")
            .uri("/api/v1/auth/login")
            .header("content-type", "application/json")
            .body(Body::from(r#"{"username": "alice", "password": "pw"}"#))
            .unwrap();
        let response = router.clone().oneshot(login).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        let token = body["data"]["token"].as_str().unwrap().to_string();

        let platforms = Request::builder()
            .uri("/api/v1/platforms?search=face")
            .header(header::AUTHORIZATION, format!("Bearer {token}"))
            .body(Body::empty())
            .unwrap();
        let response = router.oneshot(platforms).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body["data"]["total"], 1);
        assert_eq!(body["data"]["platforms"][0]["platform"], "Facebook");
    }

    #[tokio::test]
    async fn health_and_metrics_are_public() {
        let dir = tempfile::tempdir().unwrap();
        let router = test_router(&dir);

        let health = router
            .clone()
            .oneshot(
                Request::builder()
                    .uri("/health")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(health.status(), StatusCode::OK);

        let metrics = router
            .oneshot(
                Request::builder()
                    .uri("/metrics")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(metrics.status(), StatusCode::OK);
    }
}
