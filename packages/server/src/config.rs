use escopo_config::{
    CORS_ORIGIN, DEFAULT_CORS_ORIGIN, DEFAULT_HTTP_TIMEOUT_SECS, DEFAULT_PORT, DEFAULT_TABLE_NAME,
    ESCOPO_BACKEND, ESCOPO_HTTP_TIMEOUT_SECS, ESCOPO_TABLE_NAME, ESCOPO_TABLE_TOKEN,
    ESCOPO_TABLE_URL, PORT,
};
use escopo_storage::StorageProvider;
use std::env;
use std::num::ParseIntError;
use std::str::FromStr;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Invalid port number: {0}")]
    InvalidPort(#[from] ParseIntError),
    #[error("Port {0} is out of valid range (1-65535)")]
    PortOutOfRange(u16),
    #[error("Invalid storage backend: {0} (expected 'http' or 'memory')")]
    InvalidBackend(String),
    #[error("{0} must be set when the http backend is selected")]
    MissingVariable(&'static str),
    #[error("Invalid HTTP timeout: {0}")]
    InvalidTimeout(String),
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum BackendKind {
    Http,
    Memory,
}

impl FromStr for BackendKind {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "http" => Ok(BackendKind::Http),
            "memory" => Ok(BackendKind::Memory),
            _ => Err(ConfigError::InvalidBackend(s.to_string())),
        }
    }
}

#[derive(Debug)]
pub struct Config {
    pub port: u16,
    pub cors_origin: String,
    pub storage: StorageProvider,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the config from any variable source
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        let port = match var(PORT) {
            Some(raw) => raw.trim().parse::<u16>()?,
            None => DEFAULT_PORT,
        };
        if port == 0 {
            return Err(ConfigError::PortOutOfRange(port));
        }

        let cors_origin = var(CORS_ORIGIN).unwrap_or_else(|| DEFAULT_CORS_ORIGIN.to_string());

        let backend = match var(ESCOPO_BACKEND) {
            Some(raw) => raw.parse::<BackendKind>()?,
            None => BackendKind::Http,
        };

        let storage = match backend {
            BackendKind::Memory => StorageProvider::Memory,
            BackendKind::Http => {
                let base_url = var(ESCOPO_TABLE_URL)
                    .ok_or(ConfigError::MissingVariable(ESCOPO_TABLE_URL))?;
                let timeout_secs = match var(ESCOPO_HTTP_TIMEOUT_SECS) {
                    Some(raw) => match raw.trim().parse::<u64>() {
                        Ok(secs) if secs > 0 => secs,
                        _ => return Err(ConfigError::InvalidTimeout(raw)),
                    },
                    None => DEFAULT_HTTP_TIMEOUT_SECS,
                };
                StorageProvider::Http {
                    base_url: base_url.trim().to_string(),
                    table: var(ESCOPO_TABLE_NAME)
                        .unwrap_or_else(|| DEFAULT_TABLE_NAME.to_string()),
                    token: var(ESCOPO_TABLE_TOKEN),
                    timeout_secs,
                }
            }
        };

        Ok(Config {
            port,
            cors_origin,
            storage,
        })
    }
}
