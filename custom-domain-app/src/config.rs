//! Application configuration
//!
//! Resolved once at startup: an optional TOML file overlaid by environment variables. Keys
//! in the file are the lower-case form of the environment variable names
//! (`CLOUDFLARE_ID` -> `cloudflare_id`).

use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::time::Duration;

use custom_domain_provider::{ProviderConfig, ProviderCredentials, mask_secret};
use serde::Deserialize;
use thiserror::Error;

/// Environment variable naming the config file.
pub const CONFIG_PATH_ENV: &str = "PROVISIONER_CONFIG";
/// Config file read when [`CONFIG_PATH_ENV`] is unset (only if it exists).
pub const DEFAULT_CONFIG_PATH: &str = "provisioner.toml";

pub const DEFAULT_CLOUDFLARE_ENDPOINT: &str = "https://api.cloudflare.com/client/v4";
pub const DEFAULT_DNS_PROXY_NAME: &str = "proxy.xylophonexyz.com";
pub const DEFAULT_BIND_ADDRESS: &str = "0.0.0.0:8080";
const DEFAULT_REDIS_HOST: &str = "127.0.0.1";
const DEFAULT_REDIS_PORT: u16 = 6379;
const DEFAULT_REDIS_DB: i64 = 0;
const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;
const DEFAULT_STORE_TIMEOUT_SECS: u64 = 5;

/// Configuration errors
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Missing required configuration: {0}")]
    Missing(&'static str),

    #[error("Invalid value for {key}: '{value}' ({reason})")]
    Invalid {
        key: &'static str,
        value: String,
        reason: String,
    },

    #[error("Failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse config file {path}: {source}")]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },
}

/// Log output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

impl FromStr for LogFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "text" | "pretty" => Ok(Self::Text),
            "json" => Ok(Self::Json),
            other => Err(format!("expected 'text' or 'json', got '{other}'")),
        }
    }
}

/// Routing store connection parameters
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RedisSettings {
    pub host: String,
    pub port: u16,
    pub db: i64,
}

impl RedisSettings {
    /// `redis://host:port/db`
    #[must_use]
    pub fn url(&self) -> String {
        if self.host.contains(':') {
            format!("redis://[{}]:{}/{}", self.host, self.port, self.db)
        } else {
            format!("redis://{}:{}/{}", self.host, self.port, self.db)
        }
    }
}

/// Resolved application configuration
#[derive(Clone)]
pub struct AppConfig {
    /// Zone provider account e-mail (`CLOUDFLARE_ID`)
    pub cloudflare_id: String,
    /// Zone provider API key (`CLOUDFLARE_KEY`)
    pub cloudflare_key: String,
    pub cloudflare_endpoint: String,
    /// Hosting platform API base URL (`API_ENDPOINT`)
    pub api_endpoint: String,
    pub redis: RedisSettings,
    pub dns_proxy_name: String,
    pub bind_address: String,
    pub request_timeout: Duration,
    pub store_timeout: Duration,
    pub log_format: LogFormat,
    pub log_dir: Option<PathBuf>,
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("cloudflare_id", &self.cloudflare_id)
            .field("cloudflare_key", &mask_secret(&self.cloudflare_key))
            .field("cloudflare_endpoint", &self.cloudflare_endpoint)
            .field("api_endpoint", &self.api_endpoint)
            .field("redis", &self.redis)
            .field("dns_proxy_name", &self.dns_proxy_name)
            .field("bind_address", &self.bind_address)
            .field("request_timeout", &self.request_timeout)
            .field("store_timeout", &self.store_timeout)
            .field("log_format", &self.log_format)
            .field("log_dir", &self.log_dir)
            .finish()
    }
}

/// On-disk form; every key optional.
#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FileConfig {
    pub cloudflare_id: Option<String>,
    pub cloudflare_key: Option<String>,
    pub cloudflare_endpoint: Option<String>,
    pub api_endpoint: Option<String>,
    pub redis_host: Option<String>,
    pub redis_port: Option<u16>,
    pub redis_db: Option<i64>,
    pub dns_proxy_name: Option<String>,
    pub bind_address: Option<String>,
    pub request_timeout_secs: Option<u64>,
    pub store_timeout_secs: Option<u64>,
    pub log_format: Option<String>,
    pub log_dir: Option<PathBuf>,
}

impl FileConfig {
    pub fn from_path(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        toml::from_str(&text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }
}

impl AppConfig {
    /// Load from the process environment and the config file it points at.
    pub fn load() -> Result<Self, ConfigError> {
        let file = match std::env::var(CONFIG_PATH_ENV) {
            Ok(path) => Some(FileConfig::from_path(Path::new(&path))?),
            Err(_) if Path::new(DEFAULT_CONFIG_PATH).is_file() => {
                Some(FileConfig::from_path(Path::new(DEFAULT_CONFIG_PATH))?)
            }
            Err(_) => None,
        };
        Self::resolve(file.unwrap_or_default(), |key| std::env::var(key).ok())
    }

    /// Merge `file` with values from `env`; `env` wins.
    pub fn resolve<F>(file: FileConfig, env: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let text = |key: &'static str, from_file: Option<String>| {
            env(key)
                .filter(|v| !v.trim().is_empty())
                .or(from_file)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };
        let required = |key: &'static str, from_file: Option<String>| {
            text(key, from_file).ok_or(ConfigError::Missing(key))
        };

        let request_timeout_secs = number(
            "REQUEST_TIMEOUT_SECS",
            env("REQUEST_TIMEOUT_SECS"),
            file.request_timeout_secs,
            DEFAULT_REQUEST_TIMEOUT_SECS,
        )?;
        let store_timeout_secs = number(
            "STORE_TIMEOUT_SECS",
            env("STORE_TIMEOUT_SECS"),
            file.store_timeout_secs,
            DEFAULT_STORE_TIMEOUT_SECS,
        )?;
        let log_format = match text("LOG_FORMAT", file.log_format) {
            Some(value) => value
                .parse::<LogFormat>()
                .map_err(|reason| ConfigError::Invalid {
                    key: "LOG_FORMAT",
                    value,
                    reason,
                })?,
            None => LogFormat::default(),
        };

        let config = Self {
            cloudflare_id: required("CLOUDFLARE_ID", file.cloudflare_id)?,
            cloudflare_key: required("CLOUDFLARE_KEY", file.cloudflare_key)?,
            cloudflare_endpoint: text("CLOUDFLARE_ENDPOINT", file.cloudflare_endpoint)
                .unwrap_or_else(|| DEFAULT_CLOUDFLARE_ENDPOINT.to_string()),
            api_endpoint: required("API_ENDPOINT", file.api_endpoint)?
                .trim_end_matches('/')
                .to_string(),
            redis: RedisSettings {
                host: text("REDIS_HOST", file.redis_host)
                    .unwrap_or_else(|| DEFAULT_REDIS_HOST.to_string()),
                port: number("REDIS_PORT", env("REDIS_PORT"), file.redis_port, DEFAULT_REDIS_PORT)?,
                db: number("REDIS_DB", env("REDIS_DB"), file.redis_db, DEFAULT_REDIS_DB)?,
            },
            dns_proxy_name: text("DNS_PROXY_NAME", file.dns_proxy_name)
                .unwrap_or_else(|| DEFAULT_DNS_PROXY_NAME.to_string()),
            bind_address: text("BIND_ADDRESS", file.bind_address)
                .unwrap_or_else(|| DEFAULT_BIND_ADDRESS.to_string()),
            request_timeout: Duration::from_secs(request_timeout_secs),
            store_timeout: Duration::from_secs(store_timeout_secs),
            log_format,
            log_dir: env("LOG_DIR")
                .filter(|v| !v.trim().is_empty())
                .map(PathBuf::from)
                .or(file.log_dir),
        };

        if config.request_timeout.is_zero() {
            return Err(ConfigError::Invalid {
                key: "REQUEST_TIMEOUT_SECS",
                value: "0".to_string(),
                reason: "must be positive".to_string(),
            });
        }
        if config.store_timeout.is_zero() {
            return Err(ConfigError::Invalid {
                key: "STORE_TIMEOUT_SECS",
                value: "0".to_string(),
                reason: "must be positive".to_string(),
            });
        }

        Ok(config)
    }

    /// Zone provider client configuration.
    #[must_use]
    pub fn provider_config(&self) -> ProviderConfig {
        ProviderConfig::new(ProviderCredentials::Cloudflare {
            auth_email: self.cloudflare_id.clone(),
            auth_key: self.cloudflare_key.clone(),
        })
        .with_endpoint(self.cloudflare_endpoint.clone())
        .with_request_timeout(self.request_timeout)
    }
}

fn number<T>(
    key: &'static str,
    from_env: Option<String>,
    from_file: Option<T>,
    default: T,
) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match from_env.filter(|v| !v.trim().is_empty()) {
        Some(value) => value
            .trim()
            .parse()
            .map_err(|e: T::Err| ConfigError::Invalid {
                key,
                value: value.clone(),
                reason: e.to_string(),
            }),
        None => Ok(from_file.unwrap_or(default)),
    }
}
