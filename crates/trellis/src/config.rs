//! Configuration types for the Trellis pipeline.
//!
//! This module provides configuration structures that control where
//! assembled request URLs point. All types implement
//! [`serde::Deserialize`] for flexible loading from external sources
//! (the CLI loads them from TOML files).
//!
//! # Example
//!
//! ```
//! # use trellis::config::AppConfig;
//! let config = AppConfig::default();
//! assert!(config.server().base_url().starts_with("http://www.plantuml.com/"));
//! ```

use serde::Deserialize;

use crate::request::DEFAULT_BASE_URL;

/// Top-level application configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Rendering service section.
    #[serde(default)]
    server: ServerConfig,
}

impl AppConfig {
    /// Creates a new [`AppConfig`] with the specified server configuration.
    pub fn new(server: ServerConfig) -> Self {
        Self { server }
    }

    /// Returns the rendering service configuration.
    pub fn server(&self) -> &ServerConfig {
        &self.server
    }
}

/// Remote rendering service configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ServerConfig {
    /// Base path tokens are appended to; falls back to the public
    /// PlantUML PNG endpoint when unset.
    #[serde(default)]
    base_url: Option<String>,
}

impl ServerConfig {
    /// Creates a new [`ServerConfig`] with an explicit base path.
    pub fn new(base_url: Option<String>) -> Self {
        Self { base_url }
    }

    /// Returns the configured base path, or the default endpoint.
    pub fn base_url(&self) -> &str {
        self.base_url.as_deref().unwrap_or(DEFAULT_BASE_URL)
    }
}
