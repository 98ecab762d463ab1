use std::path::PathBuf;

use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;

#[derive(Debug, Deserialize, Clone)]
pub struct CorsConfig {
    pub allow_origins: Vec<String>,
    pub max_age: u64,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub cors: CorsConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DatabaseConfig {
    pub url: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct StorageConfig {
    /// Root directory of the content blob store.
    pub root: PathBuf,
    /// Maximum document content size in bytes.
    pub max_content_size: u64,
}

/// Connection settings for the external document-type catalog.
#[derive(Debug, Deserialize, Clone)]
pub struct CatalogConfig {
    /// Bearer token with read access to the type catalog.
    pub token: Option<String>,
    pub timeout_secs: u64,
}

#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub storage: StorageConfig,
    pub catalog: CatalogConfig,
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        let s = Config::builder()
            .set_default("server.host", "127.0.0.1")?
            .set_default("server.port", 3000)?
            .set_default("server.cors.allow_origins", Vec::<String>::new())?
            .set_default("server.cors.max_age", 3600)?
            .set_default("storage.root", "./content")?
            .set_default("storage.max_content_size", 64 * 1024 * 1024)?
            .set_default("catalog.timeout_secs", 10)?
            // Load from config/config.toml
            .add_source(File::with_name("config/config").required(false))
            // Override from environment (e.g., REGISTRY__DATABASE__URL)
            .add_source(Environment::with_prefix("REGISTRY").separator("__"))
            .build()?;

        s.try_deserialize()
    }
}
