//! Application configuration loaded from environment variables.

use std::env;
use std::str::FromStr;
use std::time::Duration;

/// Ceiling on any single store operation unless overridden.
pub const DEFAULT_STORE_TIMEOUT: Duration = Duration::from_secs(10);

/// Which document store backs the service.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreBackend {
    /// Google Cloud Firestore (or its emulator)
    Firestore,
    /// Process-local store, contents are lost on exit
    Memory,
}

impl FromStr for StoreBackend {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "firestore" => Ok(StoreBackend::Firestore),
            "memory" => Ok(StoreBackend::Memory),
            _ => Err(()),
        }
    }
}

/// Application configuration, loaded once at startup.
#[derive(Debug, Clone)]
pub struct Config {
    /// GCP project ID
    pub gcp_project_id: String,
    /// Server port
    pub port: u16,
    /// Upper bound on each store operation
    pub store_timeout: Duration,
    pub store_backend: StoreBackend,
}

impl Config {
    /// Config for tests: in-memory store, default timeout.
    pub fn test_default() -> Self {
        Self {
            gcp_project_id: "test-project".to_string(),
            port: 8080,
            store_timeout: DEFAULT_STORE_TIMEOUT,
            store_backend: StoreBackend::Memory,
        }
    }

    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok(); // Load .env file if present

        let port = match env::var("PORT") {
            Ok(raw) => raw.trim().parse().map_err(|_| ConfigError::Invalid {
                var: "PORT",
                value: raw,
            })?,
            Err(_) => 8080,
        };

        let store_timeout = match env::var("STORE_TIMEOUT_SECS") {
            Ok(raw) => match raw.trim().parse::<u64>() {
                Ok(secs) if secs > 0 => Duration::from_secs(secs),
                _ => {
                    return Err(ConfigError::Invalid {
                        var: "STORE_TIMEOUT_SECS",
                        value: raw,
                    })
                }
            },
            Err(_) => DEFAULT_STORE_TIMEOUT,
        };

        let store_backend = match env::var("STORE_BACKEND") {
            Ok(raw) => raw.parse().map_err(|_| ConfigError::Invalid {
                var: "STORE_BACKEND",
                value: raw,
            })?,
            Err(_) => StoreBackend::Firestore,
        };

        Ok(Self {
            gcp_project_id: env::var("GCP_PROJECT_ID").unwrap_or_else(|_| "local-dev".to_string()),
            port,
            store_timeout,
            store_backend,
        })
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for {var}: {value:?}")]
    Invalid { var: &'static str, value: String },
}
