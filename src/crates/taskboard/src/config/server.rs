//! Server configuration for taskboard-server
//!
//! Loads `taskboard.toml` (server address, database and API key settings) and
//! applies environment overrides on top of it.

use axum::http::HeaderName;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::str::FromStr;
use thiserror::Error;

pub mod security;

#[derive(Debug, Error)]
pub enum ServerConfigError {
    #[error("Failed to read config file: {0}")]
    ReadError(std::io::Error),
    #[error("Failed to parse TOML: {0}")]
    ParseError(toml::de::Error),
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

/// Server identification and listen address
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServerInfoConfig {
    /// Server name, used in logs
    #[serde(default = "default_server_name")]
    pub name: String,
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for ServerInfoConfig {
    fn default() -> Self {
        Self {
            name: default_server_name(),
            host: default_host(),
            port: default_port(),
        }
    }
}

fn default_server_name() -> String {
    "taskboard".to_string()
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    8080
}

/// Database configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DatabaseConfig {
    /// SQLite database file path
    #[serde(default = "default_database_path")]
    pub path: String,
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            path: default_database_path(),
            max_connections: default_max_connections(),
        }
    }
}

fn default_database_path() -> String {
    "taskboard.db".to_string()
}

fn default_max_connections() -> u32 {
    5
}

/// API key authentication settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SecurityConfig {
    /// Header carrying the key; a query parameter of the same name is the fallback
    #[serde(default = "default_api_key_header")]
    pub api_key_header: String,
    /// Realm announced in `WWW-Authenticate`
    #[serde(default = "default_api_key_realm")]
    pub api_key_realm: String,
    /// Expected key (can be overridden by API_KEY_SECRET environment variable)
    #[serde(default)]
    pub api_key: Option<String>,
}

impl Default for SecurityConfig {
    fn default() -> Self {
        Self {
            api_key_header: default_api_key_header(),
            api_key_realm: default_api_key_realm(),
            api_key: None,
        }
    }
}

fn default_api_key_header() -> String {
    "X-API-Key".to_string()
}

fn default_api_key_realm() -> String {
    "taskboard".to_string()
}

/// Complete server configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default)]
    pub server: ServerInfoConfig,
    #[serde(default)]
    pub database: DatabaseConfig,
    #[serde(default)]
    pub security: SecurityConfig,
}

impl ServerConfig {
    /// Load configuration from a TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ServerConfigError> {
        let content =
            std::fs::read_to_string(path.as_ref()).map_err(ServerConfigError::ReadError)?;
        Self::from_toml_str(&content)
    }

    /// Load configuration from TOML string
    pub fn from_toml_str(content: &str) -> Result<Self, ServerConfigError> {
        toml::from_str(content).map_err(ServerConfigError::ParseError)
    }

    /// Load configuration from default location or environment
    ///
    /// Searches for config in:
    /// 1. CONFIG_PATH environment variable
    /// 2. ./config/taskboard.toml
    /// 3. ./taskboard.toml
    ///
    /// Falls back to defaults when no file exists, then applies environment
    /// overrides and validates the result.
    pub fn load() -> Result<Self, ServerConfigError> {
        let config = match std::env::var("CONFIG_PATH") {
            Ok(config_path) => Self::from_file(config_path)?,
            Err(_) => Self::search_paths()
                .into_iter()
                .find(|path| path.exists())
                .map(Self::from_file)
                .transpose()?
                .unwrap_or_default(),
        };

        let config = config.with_env_overrides(|key| std::env::var(key).ok())?;
        config.validate()?;
        Ok(config)
    }

    fn search_paths() -> [PathBuf; 2] {
        [
            PathBuf::from("config/taskboard.toml"),
            PathBuf::from("./taskboard.toml"),
        ]
    }

    /// Apply `HOST`, `PORT`, `DATABASE_PATH`, `API_KEY_HEADER`,
    /// `API_KEY_REALM` and `API_KEY_SECRET` from `lookup`
    pub fn with_env_overrides<F>(mut self, lookup: F) -> Result<Self, ServerConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(host) = lookup("HOST") {
            self.server.host = host;
        }
        if let Some(port) = lookup("PORT") {
            self.server.port = port.parse().map_err(|_| {
                ServerConfigError::InvalidConfig(format!("PORT must be a valid u16, got '{}'", port))
            })?;
        }
        if let Some(path) = lookup("DATABASE_PATH") {
            self.database.path = path;
        }
        if let Some(header) = lookup("API_KEY_HEADER") {
            self.security.api_key_header = header;
        }
        if let Some(realm) = lookup("API_KEY_REALM") {
            self.security.api_key_realm = realm;
        }
        if let Some(secret) = lookup("API_KEY_SECRET") {
            self.security.api_key = Some(secret);
        }
        Ok(self)
    }

    /// Check the settings the server cannot start without
    pub fn validate(&self) -> Result<(), ServerConfigError> {
        if self.api_key().is_none() {
            return Err(ServerConfigError::InvalidConfig(
                "No API key configured. Set API_KEY_SECRET or [security].api_key".to_string(),
            ));
        }
        if HeaderName::from_str(&self.security.api_key_header).is_err() {
            return Err(ServerConfigError::InvalidConfig(format!(
                "Invalid API key header name: '{}'",
                self.security.api_key_header
            )));
        }
        if self.database.max_connections == 0 {
            return Err(ServerConfigError::InvalidConfig(
                "database.max_connections must be at least 1".to_string(),
            ));
        }
        Ok(())
    }

    /// The configured API key, ignoring an empty value
    pub fn api_key(&self) -> Option<&str> {
        self.security
            .api_key
            .as_deref()
            .filter(|key| !key.is_empty())
    }

    /// Get database URL from configuration
    pub fn database_url(&self) -> String {
        format!("sqlite://{}", self.database.path)
    }

    /// `host:port` to bind the listener to
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}
