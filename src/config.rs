//! Configuration module
//!
//! Settings are read from a TOML file (`~/.config/pulseboard/config.toml`
//! by default, overridable via the `PULSEBOARD_CONFIG` env var). A missing
//! or unreadable file falls back to defaults.

use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse config file: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Top-level application configuration
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub security: SecurityConfig,
    pub storage: StorageConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Bind address for the REST API
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SecurityConfig {
    /// Secret used to sign session tokens
    pub jwt_secret: String,
    pub jwt_expiration_hours: i64,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    /// Path to the flat CSV credentials file
    pub users_file: PathBuf,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Default tracing filter when RUST_LOG is unset
    pub level: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
        }
    }
}

impl Default for SecurityConfig {
    fn default() -> Self {
        Self {
            jwt_secret: std::env::var("JWT_SECRET")
                .unwrap_or_else(|_| "super-secret-key-change-in-production".to_string()),
            jwt_expiration_hours: 24,
        }
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            users_file: PathBuf::from("users.csv"),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

impl AppConfig {
    /// Load configuration from a TOML file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Ok(toml::from_str(&contents)?)
    }
}

impl ServerConfig {
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Default config path: `~/.config/pulseboard/config.toml`
pub fn default_config_path() -> PathBuf {
    dirs_next::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("pulseboard")
        .join("config.toml")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_sensible() {
        let cfg = AppConfig::default();
        assert_eq!(cfg.server.address(), "0.0.0.0:8080");
        assert_eq!(cfg.security.jwt_expiration_hours, 24);
        assert_eq!(cfg.storage.users_file, PathBuf::from("users.csv"));
        assert_eq!(cfg.logging.level, "info");
    }

    #[test]
    fn partial_file_fills_in_defaults() {
        let cfg: AppConfig = toml::from_str(
            r#"
            [server]
            port = 9999

            [storage]
            users_file = "/var/lib/pulseboard/users.csv"
            "#,
        )
        .unwrap();

        assert_eq!(cfg.server.port, 9999);
        assert_eq!(cfg.server.host, "0.0.0.0");
        assert_eq!(
            cfg.storage.users_file,
            PathBuf::from("/var/lib/pulseboard/users.csv")
        );
    }
}
