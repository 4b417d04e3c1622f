//! Configuration System
//!
//! Handles loading configuration from files and environment variables.
//! Supports TOML config files and environment variable overrides.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::api::ApiConfig;
use crate::client::ClientConfig;
use crate::format::DEFAULT_CURRENCY_SYMBOL;
use crate::model::DEFAULT_PAGE_SIZE;

/// Main configuration structure
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,

    #[serde(default)]
    pub client: ClientSettings,

    #[serde(default)]
    pub logging: LoggingConfig,
}

/// API server configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,

    #[serde(default = "default_database_path")]
    pub database_path: String,

    /// Built dashboard to serve at `/`
    #[serde(default)]
    pub static_dir: Option<String>,

    #[serde(default)]
    pub cors_origins: Vec<String>,

    #[serde(default = "default_page_size")]
    pub page_size: usize,
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    5000
}

fn default_database_path() -> String {
    dirs::data_local_dir()
        .map(|p| p.join("spendwise").join("expenses.db").to_string_lossy().to_string())
        .unwrap_or_else(|| "./expenses.db".to_string())
}

fn default_page_size() -> usize {
    DEFAULT_PAGE_SIZE
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            database_path: default_database_path(),
            static_dir: None,
            cors_origins: Vec::new(),
            page_size: default_page_size(),
        }
    }
}

impl ServerConfig {
    /// Database path with a leading `~/` expanded
    pub fn database_file(&self) -> PathBuf {
        match (self.database_path.strip_prefix("~/"), dirs::home_dir()) {
            (Some(rest), Some(home)) => home.join(rest),
            _ => PathBuf::from(&self.database_path),
        }
    }

    /// Settings for `api::serve`
    pub fn api_config(&self) -> ApiConfig {
        ApiConfig {
            host: self.host.clone(),
            port: self.port,
            default_page_size: self.page_size.max(1),
            cors_origins: self.cors_origins.clone(),
            static_dir: self.static_dir.as_ref().map(PathBuf::from),
            ..ApiConfig::default()
        }
    }
}

/// Front-end (CLI) configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ClientSettings {
    #[serde(default = "default_base_url")]
    pub base_url: String,

    #[serde(default = "default_page_size")]
    pub page_size: usize,

    #[serde(default = "default_currency_symbol")]
    pub currency_symbol: String,
}

fn default_base_url() -> String {
    "http://localhost:5000".to_string()
}

fn default_currency_symbol() -> String {
    DEFAULT_CURRENCY_SYMBOL.to_string()
}

impl Default for ClientSettings {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            page_size: default_page_size(),
            currency_symbol: default_currency_symbol(),
        }
    }
}

impl ClientSettings {
    pub fn client_config(&self) -> ClientConfig {
        ClientConfig {
            base_url: self.base_url.clone(),
            page_size: self.page_size.max(1),
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,

    #[serde(default = "default_log_format")]
    pub format: String,
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

impl LoggingConfig {
    pub fn is_json(&self) -> bool {
        self.format.eq_ignore_ascii_case("json")
    }
}

impl Config {
    /// Load configuration from a file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            error: e.to_string(),
        })?;

        Self::parse(&content).map_err(|e| ConfigError::Parse {
            path: path.to_path_buf(),
            error: e.to_string(),
        })
    }

    /// Parse TOML content
    pub fn parse(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    /// Load configuration from environment variables only
    pub fn from_env() -> Self {
        let mut config = Config::default();
        config.apply_env_overrides();
        config
    }

    /// Load configuration with environment variable overrides
    pub fn load_with_env(path: &Path) -> Result<Self, ConfigError> {
        let mut config = Self::load(path)?;
        config.apply_env_overrides();
        Ok(config)
    }

    /// Load from default locations or environment
    pub fn load_default() -> Self {
        for path in default_config_paths() {
            if path.exists() {
                match Self::load_with_env(&path) {
                    Ok(config) => {
                        tracing::info!("Loaded config from {:?}", path);
                        return config;
                    }
                    Err(e) => {
                        tracing::warn!("Failed to load config from {:?}: {}", path, e);
                    }
                }
            }
        }

        tracing::debug!("Using default config with environment overrides");
        Self::from_env()
    }

    /// Apply environment variable overrides to an existing config
    fn apply_env_overrides(&mut self) {
        self.apply_overrides(|key| std::env::var(key).ok());
    }

    fn apply_overrides(&mut self, var: impl Fn(&str) -> Option<String>) {
        // Server overrides
        if let Some(host) = var("SPENDWISE_HOST") {
            self.server.host = host;
        }
        if let Some(port) = var("SPENDWISE_PORT").and_then(|p| p.parse().ok()) {
            self.server.port = port;
        }
        if let Some(path) = var("SPENDWISE_DATABASE") {
            self.server.database_path = path;
        }
        if let Some(dir) = var("SPENDWISE_STATIC_DIR") {
            self.server.static_dir = Some(dir).filter(|d| !d.is_empty());
        }

        // Client overrides
        if let Some(url) = var("SPENDWISE_API_URL") {
            self.client.base_url = url;
        }
        if let Some(symbol) = var("SPENDWISE_CURRENCY") {
            self.client.currency_symbol = symbol;
        }

        // Logging overrides
        if let Some(level) = var("SPENDWISE_LOG_LEVEL") {
            self.logging.level = level;
        }
        if let Some(format) = var("SPENDWISE_LOG_FORMAT") {
            self.logging.format = format;
        }
    }
}

/// Config files tried by `Config::load_default`, in order
pub fn default_config_paths() -> Vec<PathBuf> {
    [
        dirs::config_dir().map(|p| p.join("spendwise").join("config.toml")),
        Some(PathBuf::from("./config.toml")),
    ]
    .into_iter()
    .flatten()
    .collect()
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path:?}: {error}")]
    Io { path: PathBuf, error: String },

    #[error("Failed to parse config file {path:?}: {error}")]
    Parse { path: PathBuf, error: String },
}

/// Generate a default config file content
pub fn generate_default_config() -> String {
    r#"# Spendwise Configuration
#
# Environment variables override these settings:
# - SPENDWISE_HOST
# - SPENDWISE_PORT
# - SPENDWISE_DATABASE
# - SPENDWISE_STATIC_DIR
# - SPENDWISE_API_URL
# - SPENDWISE_CURRENCY
# - SPENDWISE_LOG_LEVEL
# - SPENDWISE_LOG_FORMAT

[server]
# API server host
host = "127.0.0.1"

# API server port
port = 5000

# SQLite database file (created on first start)
database_path = "~/.local/share/spendwise/expenses.db"

# Directory of the built dashboard, served at /
# static_dir = "spendwise-ui/dist"

# Allowed CORS origins (empty allows any)
cors_origins = []

# Entries per page when a request gives no limit
page_size = 10

[client]
# Where the CLI finds the API
base_url = "http://localhost:5000"

# Entries requested per page
page_size = 10

# Prefix for rendered amounts
currency_symbol = "₹"

[logging]
# Log level: trace, debug, info, warn, error
level = "info"

# Log format: pretty (for development) or json (for production)
format = "pretty"
"#
    .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.server.port, 5000);
        assert_eq!(config.server.page_size, 10);
        assert_eq!(config.client.base_url, "http://localhost:5000");
        assert_eq!(config.client.currency_symbol, "₹");
        assert!(!config.logging.is_json());
    }

    #[test]
    fn test_generated_config_parses() {
        let config = Config::parse(&generate_default_config()).unwrap();
        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.server.static_dir, None);
        assert_eq!(config.client.page_size, 10);
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let config = Config::parse("[server]\nport = 8080\n\n[logging]\nformat = \"json\"\n").unwrap();
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.client.page_size, 10);
        assert!(config.logging.is_json());
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[client]\ncurrency_symbol = \"$\"\n").unwrap();

        let config = Config::load(&path).unwrap();
        assert_eq!(config.client.currency_symbol, "$");

        let missing = Config::load(&dir.path().join("missing.toml"));
        assert!(matches!(missing, Err(ConfigError::Io { .. })));

        std::fs::write(&path, "[server\n").unwrap();
        assert!(matches!(Config::load(&path), Err(ConfigError::Parse { .. })));
    }

    #[test]
    fn test_overrides() {
        let vars: HashMap<&str, &str> = [
            ("SPENDWISE_PORT", "6000"),
            ("SPENDWISE_API_URL", "http://api.local"),
            ("SPENDWISE_LOG_FORMAT", "json"),
            ("SPENDWISE_STATIC_DIR", ""),
        ]
        .into_iter()
        .collect();

        let mut config = Config::default();
        config.server.static_dir = Some("dist".to_string());
        config.apply_overrides(|key| vars.get(key).map(|v| v.to_string()));

        assert_eq!(config.server.port, 6000);
        assert_eq!(config.client.base_url, "http://api.local");
        assert!(config.logging.is_json());
        assert_eq!(config.server.static_dir, None);
    }

    #[test]
    fn test_bad_port_override_ignored() {
        let mut config = Config::default();
        config.apply_overrides(|key| (key == "SPENDWISE_PORT").then(|| "not-a-port".to_string()));
        assert_eq!(config.server.port, 5000);
    }

    #[test]
    fn test_api_config_conversion() {
        let mut server = ServerConfig::default();
        server.port = 7000;
        server.page_size = 0;
        server.static_dir = Some("dist".to_string());

        let api = server.api_config();
        assert_eq!(api.addr(), "127.0.0.1:7000");
        assert_eq!(api.default_page_size, 1);
        assert_eq!(api.static_dir, Some(PathBuf::from("dist")));
    }

    #[test]
    fn test_database_file() {
        let mut server = ServerConfig::default();
        server.database_path = "/tmp/spendwise.db".to_string();
        assert_eq!(server.database_file(), PathBuf::from("/tmp/spendwise.db"));

        server.database_path = "~/spendwise.db".to_string();
        if let Some(home) = dirs::home_dir() {
            assert_eq!(server.database_file(), home.join("spendwise.db"));
        }
    }
}
