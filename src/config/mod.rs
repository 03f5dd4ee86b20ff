use std::env;
use std::time::Duration;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for {key}: {value}")]
    Invalid { key: &'static str, value: String },
    #[error("{0} is required when SESSION_BACKEND=redis")]
    Missing(&'static str),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionBackend {
    Memory,
    Redis,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub server_host: String,
    pub server_port: u16,
    pub api_base_url: String,
    pub auth_token_url: String,
    pub api_timeout_secs: u64,
    /// IPv4 CIDR blocks allowed through the request filter
    pub allowed_networks: Vec<String>,
    /// Lets loopback and unidentified callers through the request filter
    pub development_mode: bool,
    pub session_backend: SessionBackend,
    pub redis_url: Option<String>,
    pub session_ttl_secs: u64,
    pub secure_cookies: bool,
    pub voters_page_size: usize,
    pub static_dir: String,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenv::dotenv().ok();
        Self::from_vars(|key| env::var(key).ok())
    }

    /// Builds the configuration from an arbitrary variable lookup.
    pub fn from_vars<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        let session_backend = match var("SESSION_BACKEND").as_deref() {
            None | Some("memory") => SessionBackend::Memory,
            Some("redis") => SessionBackend::Redis,
            Some(other) => {
                return Err(ConfigError::Invalid {
                    key: "SESSION_BACKEND",
                    value: other.to_string(),
                });
            }
        };
        let redis_url = var("REDIS_URL");
        if session_backend == SessionBackend::Redis && redis_url.is_none() {
            return Err(ConfigError::Missing("REDIS_URL"));
        }

        let session_ttl_raw = var("SESSION_TTL");
        let session_ttl_secs = parse_or(
            "SESSION_TTL",
            session_ttl_raw.as_deref().map(|v| v.trim_end_matches('h').to_string()),
            8u64,
        )?
        .checked_mul(3600)
        .ok_or_else(|| ConfigError::Invalid {
            key: "SESSION_TTL",
            value: session_ttl_raw.unwrap_or_default(),
        })?;

        let allowed_networks = var("ALLOWED_NETWORKS")
            .unwrap_or_else(|| "201.138.6.68/32".to_string())
            .split(',')
            .map(|block| block.trim().to_string())
            .filter(|block| !block.is_empty())
            .collect();

        Ok(Config {
            server_host: var("SERVER_HOST").unwrap_or_else(|| "0.0.0.0".to_string()),
            server_port: parse_or("SERVER_PORT", var("SERVER_PORT"), 3000)?,
            api_base_url: var("API_BASE_URL")
                .unwrap_or_else(|| "http://localhost:3000/api/votacion".to_string())
                .trim_end_matches('/')
                .to_string(),
            auth_token_url: var("AUTH_TOKEN_URL")
                .unwrap_or_else(|| "http://localhost:3000/api/token".to_string()),
            api_timeout_secs: parse_or("API_TIMEOUT_SECS", var("API_TIMEOUT_SECS"), 15)?,
            allowed_networks,
            development_mode: parse_flag("DEVELOPMENT_MODE", var("DEVELOPMENT_MODE"))?,
            session_backend,
            redis_url,
            session_ttl_secs,
            secure_cookies: parse_flag("SECURE_COOKIES", var("SECURE_COOKIES"))?,
            voters_page_size: parse_or("VOTERS_PAGE_SIZE", var("VOTERS_PAGE_SIZE"), 10usize)?
                .max(1),
            static_dir: var("STATIC_DIR").unwrap_or_else(|| "static".to_string()),
        })
    }

    pub fn session_ttl(&self) -> Duration {
        Duration::from_secs(self.session_ttl_secs)
    }

    pub fn api_timeout(&self) -> Duration {
        Duration::from_secs(self.api_timeout_secs)
    }
}

fn parse_or<T: std::str::FromStr>(
    key: &'static str,
    value: Option<String>,
    default: T,
) -> Result<T, ConfigError> {
    match value {
        None => Ok(default),
        Some(raw) => raw
            .parse()
            .map_err(|_| ConfigError::Invalid { key, value: raw }),
    }
}

fn parse_flag(key: &'static str, value: Option<String>) -> Result<bool, ConfigError> {
    let Some(raw) = value else {
        return Ok(false);
    };
    match raw.to_ascii_lowercase().as_str() {
        "1" | "true" | "on" | "yes" => Ok(true),
        "0" | "false" | "off" | "no" => Ok(false),
        _ => Err(ConfigError::Invalid { key, value: raw }),
    }
}
