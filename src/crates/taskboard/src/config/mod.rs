//! Configuration module for taskboard
//!
//! TOML server configuration with environment overrides, and the API key
//! middleware built from it.

pub mod server;

pub use server::security::{api_key_middleware, SecurityState};
pub use server::{
    DatabaseConfig, SecurityConfig, ServerConfig, ServerConfigError, ServerInfoConfig,
};
