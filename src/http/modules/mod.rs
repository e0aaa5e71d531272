//! HTTP modules, one per dashboard surface.

pub mod analytics;
pub mod auth;
pub mod export;
pub mod health;
pub mod metrics;
pub mod platforms;
pub mod prediction;
