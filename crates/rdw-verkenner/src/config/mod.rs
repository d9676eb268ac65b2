use std::env;
use std::fmt;
use url::Url;

use crate::rdw::query::DATASET_ENDPOINT;
use crate::vehicles::expiry::DEFAULT_WINDOW_DAYS;

const DEFAULT_LIST_LIMIT: u32 = 50;

/// Runtime configuration for the explorer, read from the environment.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Dataset endpoint; override with `RDW_ENDPOINT` to point at a mirror.
    pub endpoint: Url,
    /// Default `$limit` for the list fetch (`RDW_LIST_LIMIT`).
    pub list_limit: u32,
    /// Forward window for the APK expiry predicate (`RDW_APK_WINDOW_DAYS`).
    pub expiry_window_days: i64,
    /// Tracing filter when `RUST_LOG` is unset (`RDW_LOG_LEVEL`).
    pub log_level: String,
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let endpoint_raw =
            env::var("RDW_ENDPOINT").unwrap_or_else(|_| DATASET_ENDPOINT.to_string());
        let endpoint = endpoint_raw
            .parse::<Url>()
            .map_err(|source| ConfigError::InvalidEndpoint {
                value: endpoint_raw,
                source,
            })?;

        let list_limit = env::var("RDW_LIST_LIMIT")
            .unwrap_or_else(|_| DEFAULT_LIST_LIMIT.to_string())
            .parse::<u32>()
            .map_err(|_| ConfigError::InvalidLimit)?;

        let expiry_window_days = env::var("RDW_APK_WINDOW_DAYS")
            .unwrap_or_else(|_| DEFAULT_WINDOW_DAYS.to_string())
            .parse::<i64>()
            .map_err(|_| ConfigError::InvalidWindow)?;
        if expiry_window_days < 0 {
            return Err(ConfigError::InvalidWindow);
        }

        let log_level = env::var("RDW_LOG_LEVEL").unwrap_or_else(|_| "info".to_string());

        Ok(Self {
            endpoint,
            list_limit,
            expiry_window_days,
            log_level,
        })
    }
}

#[derive(Debug)]
pub enum ConfigError {
    InvalidEndpoint {
        value: String,
        source: url::ParseError,
    },
    InvalidLimit,
    InvalidWindow,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidEndpoint { value, .. } => {
                write!(f, "RDW_ENDPOINT '{}' is not a valid URL", value)
            }
            ConfigError::InvalidLimit => write!(f, "RDW_LIST_LIMIT must be a valid u32"),
            ConfigError::InvalidWindow => {
                write!(f, "RDW_APK_WINDOW_DAYS must be a non-negative number of days")
            }
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::InvalidEndpoint { source, .. } => Some(source),
            ConfigError::InvalidLimit | ConfigError::InvalidWindow => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Mutex, OnceLock};

    fn env_guard() -> &'static Mutex<()> {
        static GUARD: OnceLock<Mutex<()>> = OnceLock::new();
        GUARD.get_or_init(|| Mutex::new(()))
    }

    fn reset_env() {
        env::remove_var("RDW_ENDPOINT");
        env::remove_var("RDW_LIST_LIMIT");
        env::remove_var("RDW_APK_WINDOW_DAYS");
        env::remove_var("RDW_LOG_LEVEL");
    }

    #[test]
    fn load_uses_defaults_when_env_missing() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();

        let config = AppConfig::load().expect("config loads with defaults");
        assert_eq!(config.endpoint.as_str(), DATASET_ENDPOINT);
        assert_eq!(config.list_limit, 50);
        assert_eq!(config.expiry_window_days, 60);
        assert_eq!(config.log_level, "info");
    }

    #[test]
    fn rejects_malformed_limit() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        env::set_var("RDW_LIST_LIMIT", "vijftig");

        assert!(matches!(AppConfig::load(), Err(ConfigError::InvalidLimit)));
        reset_env();
    }

    #[test]
    fn rejects_negative_window() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        env::set_var("RDW_APK_WINDOW_DAYS", "-7");

        assert!(matches!(AppConfig::load(), Err(ConfigError::InvalidWindow)));
        reset_env();
    }

    #[test]
    fn endpoint_override_is_honored() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        env::set_var("RDW_ENDPOINT", "https://spiegel.example/resource/m9d7-ebf2.json");

        let config = AppConfig::load().expect("config loads");
        assert_eq!(config.endpoint.host_str(), Some("spiegel.example"));
        reset_env();
    }
}
