//! Application configuration module
//!
//! Type-safe configuration loaded from environment variables using the
//! `config` and `dotenvy` crates. Variables carry the `AUCTION_HOUSE` prefix
//! and nested values are separated with double underscores.
//!
//! # Example
//!
//! ```no_run
//! use auction_house::config::AppConfig;
//!
//! let config = AppConfig::load().expect("Failed to load configuration");
//! config.validate().expect("Invalid configuration");
//! ```

mod database;
mod error;
mod live;
mod server;

pub use database::DatabaseConfig;
pub use error::{ConfigError, ValidationError};
pub use live::LiveConfig;
pub use server::{Environment, ServerConfig};

use serde::Deserialize;

/// Root application configuration
///
/// Load using [`AppConfig::load()`] which reads from environment variables.
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    /// Server configuration (bind address, logging, CORS)
    #[serde(default)]
    pub server: ServerConfig,

    /// Database configuration (PostgreSQL connection)
    pub database: DatabaseConfig,

    /// Live update tuning (send timeout, heartbeat)
    #[serde(default)]
    pub live: LiveConfig,
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// 1. Loads `.env` file if present (for development)
    /// 2. Reads environment variables with `AUCTION_HOUSE` prefix
    /// 3. Uses `__` (double underscore) to separate nested values
    ///
    /// # Environment Variable Format
    ///
    /// - `AUCTION_HOUSE__SERVER__PORT=4567` -> `server.port = 4567`
    /// - `AUCTION_HOUSE__DATABASE__URL=...` -> `database.url = ...`
    /// - `AUCTION_HOUSE__LIVE__SEND_TIMEOUT_MS=500` -> `live.send_timeout_ms = 500`
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if required variables are missing or values
    /// cannot be parsed.
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let config = config::Config::builder()
            .add_source(
                config::Environment::default()
                    .prefix("AUCTION_HOUSE")
                    .separator("__"),
            )
            .build()?
            .try_deserialize()?;

        Ok(config)
    }

    /// Validate all configuration sections.
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.server.validate()?;
        self.database.validate()?;
        self.live.validate()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;
    use std::sync::Mutex;

    // env vars are process-global
    static ENV_MUTEX: Mutex<()> = Mutex::new(());

    const VARS: &[&str] = &[
        "AUCTION_HOUSE__DATABASE__URL",
        "AUCTION_HOUSE__SERVER__PORT",
        "AUCTION_HOUSE__SERVER__ENVIRONMENT",
        "AUCTION_HOUSE__LIVE__SEND_TIMEOUT_MS",
        "AUCTION_HOUSE__LIVE__CHANNEL_CAPACITY",
    ];

    fn load_with(vars: &[(&str, &str)]) -> Result<AppConfig, ConfigError> {
        env::set_var("AUCTION_HOUSE__DATABASE__URL", "postgres://test@localhost/auctions");
        for (key, value) in vars {
            env::set_var(key, value);
        }
        let result = AppConfig::load();
        for key in VARS {
            env::remove_var(key);
        }
        result
    }

    #[test]
    fn loads_minimal_environment() {
        let _guard = ENV_MUTEX.lock().unwrap();
        let config = load_with(&[]).unwrap();

        assert_eq!(config.database.url, "postgres://test@localhost/auctions");
        assert_eq!(config.server.port, 4567);
        assert_eq!(config.live, LiveConfig::default());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn overrides_nested_values() {
        let _guard = ENV_MUTEX.lock().unwrap();
        let config = load_with(&[
            ("AUCTION_HOUSE__SERVER__PORT", "3000"),
            ("AUCTION_HOUSE__LIVE__SEND_TIMEOUT_MS", "250"),
            ("AUCTION_HOUSE__LIVE__CHANNEL_CAPACITY", "8"),
        ])
        .unwrap();

        assert_eq!(config.server.port, 3000);
        assert_eq!(config.live.send_timeout_ms, 250);
        assert_eq!(config.live.channel_capacity, 8);
    }

    #[test]
    fn detects_production() {
        let _guard = ENV_MUTEX.lock().unwrap();
        let config = load_with(&[("AUCTION_HOUSE__SERVER__ENVIRONMENT", "production")]).unwrap();
        assert!(config.server.is_production());
    }

    #[test]
    fn invalid_live_section_fails_validation() {
        let _guard = ENV_MUTEX.lock().unwrap();
        let config = load_with(&[("AUCTION_HOUSE__LIVE__CHANNEL_CAPACITY", "0")]).unwrap();
        assert_eq!(
            config.validate(),
            Err(ValidationError::InvalidChannelCapacity)
        );
    }
}
