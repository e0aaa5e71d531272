//!
//! Social media analytics dashboard server.
//! Reads configuration from TOML file (~/.config/pulseboard/config.toml).

use std::sync::Arc;

use tracing::{error, info, warn};

use pulseboard::auth::JwtConfig;
use pulseboard::shared::ShutdownSignal;
use pulseboard::{create_api_router, default_config_path, AppConfig, CsvUserStore, UserStore};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // ── Load configuration ─────────────────────────────────────
    let config_path = std::env::var("PULSEBOARD_CONFIG")
        .map(std::path::PathBuf::from)
        .unwrap_or_else(|_| default_config_path());
    let app_cfg = match AppConfig::load(&config_path) {
        Ok(cfg) => {
            // Initialize logging with configured level
            tracing_subscriber::fmt()
                .with_env_filter(
                    tracing_subscriber::EnvFilter::try_from_default_env()
                        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&cfg.logging.level)),
                )
                .init();
            info!("Configuration loaded from {}", config_path.display());
            cfg
        }
        Err(e) => {
            tracing_subscriber::fmt()
                .with_env_filter(
                    tracing_subscriber::EnvFilter::try_from_default_env()
                        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
                )
                .init();
            warn!("Failed to load config: {}. Using defaults.", e);
            AppConfig::default()
        }
    };

    info!("Starting Pulseboard analytics dashboard...");

    // ── Prometheus metrics recorder (must be installed before any metrics calls) ──
    let prometheus_handle = metrics_exporter_prometheus::PrometheusBuilder::new()
        .install_recorder()
        .map_err(|e| {
            error!("Failed to install Prometheus metrics recorder: {}", e);
            e
        })?;
    info!("Prometheus metrics recorder installed");

    // ── Build sub-configs from AppConfig ───────────────────────
    let jwt_config = JwtConfig {
        secret: app_cfg.security.jwt_secret.clone(),
        expiration_hours: app_cfg.security.jwt_expiration_hours,
        issuer: "pulseboard".to_string(),
    };
    info!(
        "JWT configured with {}h token expiration",
        jwt_config.expiration_hours
    );

    // ── User store ─────────────────────────────────────────────
    let store = Arc::new(CsvUserStore::new(&app_cfg.storage.users_file));
    // Touch the file so a malformed or absent store heals before traffic.
    let users = store.load_all().await?;
    info!(
        "User store ready at {} ({} users)",
        app_cfg.storage.users_file.display(),
        users.len()
    );
    let store: Arc<dyn UserStore> = store;

    // ── Shutdown coordination ──────────────────────────────────
    let shutdown = ShutdownSignal::new();
    shutdown.start_signal_listener();

    // ── REST API server ────────────────────────────────────────
    let router = create_api_router(store, jwt_config, prometheus_handle);

    let addr = app_cfg.server.address();
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("REST API server listening on http://{}", addr);
    info!("Swagger UI available at http://{}/docs/", addr);

    let server_shutdown = shutdown.clone();
    axum::serve(listener, router)
        .with_graceful_shutdown(async move {
            server_shutdown.wait().await;
            info!("REST API server received shutdown signal");
        })
        .await?;

    info!("Pulseboard shutdown complete");
    Ok(())
}
