//! # Pulseboard
//!
//! Social media analytics dashboard service: a fixed 10-platform dataset
//! served as chart-ready JSON behind a username/password gate, plus a
//! least-squares user-count predictor.
//!
//! ## Architecture
//!
//! - **domain**: the static dataset, user records and errors
//! - **store**: flat-file credential storage behind a small trait
//! - **auth**: JWT session tokens and the request auth context
//! - **analytics**: the ordinary-least-squares predictor
//! - **http**: REST API with Swagger documentation
//! - **config**: TOML configuration
//! - **shared**: graceful shutdown plumbing

pub mod analytics;
pub mod auth;
pub mod config;
pub mod domain;
pub mod http;
pub mod shared;
pub mod store;

pub use config::{default_config_path, AppConfig};

// Re-export the API router and store for the binary and tests
pub use http::create_api_router;
pub use store::{CsvUserStore, UserStore};
