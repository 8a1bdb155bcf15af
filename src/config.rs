//! Application configuration loaded from a YAML file with environment overrides.
//!
//! Configuration is loaded once at startup and validated before the server starts.
//!
//! ## File
//!
//! ```yaml
//! server:
//!   listen: "0.0.0.0:8080"
//! geoip:
//!   db_path: "GeoLite2-Country.mmdb"
//!   timeout_ms: 300
//! cache:
//!   driver: redis          # redis | memory
//!   address: "localhost:6379"
//!   password: ""
//!   db: 0
//!   ttl_seconds: 86400
//!   timeout_ms: 300
//!   key_prefix: ""
//! log:
//!   level: info
//!   format: text           # text | json
//! ```
//!
//! Every field is optional and falls back to the values shown above.
//!
//! ## Environment Overrides
//!
//! - `REDIS_ADDRESS` - Redis `host:port`
//! - `REDIS_PASSWORD` - Redis password (empty means no authentication)
//! - `REDIS_DB` - Redis logical database index
//! - `GEOIP_DB_PATH` - Path to the `.mmdb` file
//! - `LISTEN` - Bind address
//! - `LOG_FORMAT` - `text` or `json`
//! - `RUST_LOG` - Log filter, takes precedence over `log.level`

use anyhow::{Context, Result};
use serde::Deserialize;
use std::env;
use std::path::Path;
use std::time::Duration;

use crate::application::services::ResolverSettings;

/// Service configuration.
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    pub server: ServerConfig,
    pub geoip: GeoIpConfig,
    pub cache: CacheConfig,
    pub log: LogConfig,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct ServerConfig {
    pub listen: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            listen: "0.0.0.0:8080".to_string(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct GeoIpConfig {
    pub db_path: String,
    /// Bound on a single database lookup, in milliseconds.
    pub timeout_ms: u64,
}

impl Default for GeoIpConfig {
    fn default() -> Self {
        Self {
            db_path: "GeoLite2-Country.mmdb".to_string(),
            timeout_ms: 300,
        }
    }
}

/// Which cache backend to use.
#[derive(Debug, Clone, Copy, Default, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum CacheDriver {
    #[default]
    Redis,
    Memory,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct CacheConfig {
    pub driver: CacheDriver,
    /// Redis `host:port`.
    pub address: String,
    pub password: String,
    /// Redis logical database index.
    pub db: u32,
    pub ttl_seconds: u64,
    /// Bound on a single cache read or write, in milliseconds.
    pub timeout_ms: u64,
    /// Prepended to every cache key. Empty keeps the bare IP as key.
    pub key_prefix: String,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            driver: CacheDriver::Redis,
            address: "localhost:6379".to_string(),
            password: String::new(),
            db: 0,
            ttl_seconds: 24 * 60 * 60,
            timeout_ms: 300,
            key_prefix: String::new(),
        }
    }
}

impl CacheConfig {
    /// Builds the Redis connection URL from address, password and database index.
    pub fn redis_url(&self) -> String {
        if self.password.is_empty() {
            format!("redis://{}/{}", self.address, self.db)
        } else {
            format!("redis://:{}@{}/{}", self.password, self.address, self.db)
        }
    }
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct LogConfig {
    pub level: String,
    pub format: String,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "text".to_string(),
        }
    }
}

impl Config {
    /// Reads the YAML file at `path` and applies environment overrides.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed, or an override
    /// has an invalid value.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let data = std::fs::read_to_string(path)
            .with_context(|| format!("Error reading configuration file {}", path.display()))?;
        let mut config = Self::from_yaml(&data)
            .with_context(|| format!("Error parsing configuration file {}", path.display()))?;
        config.apply_env_overrides()?;
        Ok(config)
    }

    /// Parses configuration from YAML text without consulting the environment.
    pub fn from_yaml(data: &str) -> Result<Self> {
        if data.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_yaml::from_str(data)?)
    }

    /// Applies environment variable overrides on top of the file values.
    fn apply_env_overrides(&mut self) -> Result<()> {
        if let Some(address) = non_empty_var("REDIS_ADDRESS") {
            self.cache.address = address;
        }
        if let Ok(password) = env::var("REDIS_PASSWORD") {
            self.cache.password = password;
        }
        if let Some(db) = non_empty_var("REDIS_DB") {
            self.cache.db = db
                .parse()
                .with_context(|| format!("REDIS_DB must be a number, got '{}'", db))?;
        }
        if let Some(path) = non_empty_var("GEOIP_DB_PATH") {
            self.geoip.db_path = path;
        }
        if let Some(listen) = non_empty_var("LISTEN") {
            self.server.listen = listen;
        }
        if let Some(format) = non_empty_var("LOG_FORMAT") {
            self.log.format = format;
        }
        Ok(())
    }

    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - `server.listen` is not in `host:port` form
    /// - `geoip.db_path` is empty
    /// - a TTL or timeout is zero
    /// - `log.format` is not `text` or `json`
    pub fn validate(&self) -> Result<()> {
        if !self.server.listen.contains(':') {
            anyhow::bail!(
                "server.listen must be in format 'host:port', got '{}'",
                self.server.listen
            );
        }

        if self.geoip.db_path.is_empty() {
            anyhow::bail!("geoip.db_path must not be empty");
        }

        if self.geoip.timeout_ms == 0 {
            anyhow::bail!("geoip.timeout_ms must be greater than 0");
        }

        if self.cache.ttl_seconds == 0 {
            anyhow::bail!("cache.ttl_seconds must be greater than 0");
        }

        if self.cache.timeout_ms == 0 {
            anyhow::bail!("cache.timeout_ms must be greater than 0");
        }

        if self.cache.driver == CacheDriver::Redis && self.cache.address.is_empty() {
            anyhow::bail!("cache.address must be set when cache.driver is 'redis'");
        }

        if self.log.format != "text" && self.log.format != "json" {
            anyhow::bail!(
                "log.format must be 'text' or 'json', got '{}'",
                self.log.format
            );
        }

        Ok(())
    }

    /// Resolver tunables derived from the cache and database sections.
    pub fn resolver_settings(&self) -> ResolverSettings {
        ResolverSettings {
            cache_ttl: Duration::from_secs(self.cache.ttl_seconds),
            cache_timeout: Duration::from_millis(self.cache.timeout_ms),
            lookup_timeout: Duration::from_millis(self.geoip.timeout_ms),
        }
    }

    /// Prints configuration summary (without sensitive data).
    pub fn print_summary(&self) {
        tracing::info!("Configuration loaded:");
        tracing::info!("  Listen address: {}", self.server.listen);
        tracing::info!("  GeoIP database: {}", self.geoip.db_path);
        match self.cache.driver {
            CacheDriver::Redis => tracing::info!(
                "  Cache: {} (ttl {}s)",
                mask_connection_string(&self.cache.redis_url()),
                self.cache.ttl_seconds
            ),
            CacheDriver::Memory => {
                tracing::info!("  Cache: in-memory (ttl {}s)", self.cache.ttl_seconds)
            }
        }
        tracing::info!("  Log format: {}", self.log.format);
    }
}

fn non_empty_var(name: &str) -> Option<String> {
    env::var(name).ok().filter(|v| !v.is_empty())
}

/// Masks sensitive information in connection strings for logging.
///
/// `redis://:password@host:port/db` becomes `redis://:***@host:port/db`.
fn mask_connection_string(url: &str) -> String {
    if let Some(start) = url.find("://") {
        let scheme_end = start + 3;
        let rest = &url[scheme_end..];

        if let Some(at_pos) = rest.find('@') {
            let credentials = &rest[..at_pos];
            let host_part = &rest[at_pos..];

            if let Some(colon_pos) = credentials.rfind(':') {
                let username = &credentials[..colon_pos];
                return format!("{}://{}:***{}", &url[..start], username, host_part);
            }
        }
    }

    url.to_string()
}

/// Loads and validates configuration.
///
/// # Errors
///
/// Returns an error if the file is missing or invalid, or validation fails.
///
/// # Note
///
/// This function expects `.env` to be already loaded
/// (e.g., via `dotenvy::dotenv()` in `main.rs`).
pub fn load(path: impl AsRef<Path>) -> Result<Config> {
    let config = Config::load(path)?;
    config.validate()?;
    Ok(config)
}
