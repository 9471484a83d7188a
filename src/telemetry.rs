//! Tracing subscriber setup.

use tracing_subscriber::EnvFilter;

use crate::config::ServerConfig;

type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Build the log filter. `RUST_LOG` wins over `server.log_level`.
pub fn env_filter(config: &ServerConfig) -> EnvFilter {
    EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.log_level))
        .unwrap_or_else(|_| EnvFilter::new("info"))
}

/// JSON lines when asked for, and always in production.
pub fn json_output(config: &ServerConfig) -> bool {
    config.json_logs || config.is_production()
}

/// Install the global subscriber: JSON lines or pretty output.
pub fn init_tracing(config: &ServerConfig) -> Result<(), BoxError> {
    let filter = env_filter(config);

    if json_output(config) {
        tracing_subscriber::fmt()
            .json()
            .with_env_filter(filter)
            .try_init()
    } else {
        tracing_subscriber::fmt()
            .pretty()
            .with_env_filter(filter)
            .try_init()
    }
}
