use service_core::config::{self as core_config, get_env, is_production};
use service_core::error::AppError;
use std::env;

#[derive(Debug, Clone)]
pub struct VetConfig {
    pub common: core_config::Config,
    pub store: StoreConfig,
    pub mongodb: MongoConfig,
}

#[derive(Debug, Clone)]
pub struct StoreConfig {
    pub backend: StoreBackend,
}

#[derive(Debug, Clone)]
pub struct MongoConfig {
    pub uri: String,
    /// Falls back to the database named in `uri`, then to [`DEFAULT_DATABASE`].
    pub database: Option<String>,
}

pub const DEFAULT_DATABASE: &str = "petclinic";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreBackend {
    Mongodb,
    Memory,
}

impl VetConfig {
    pub fn load() -> Result<Self, AppError> {
        // Load common config (handles .env and APP__ prefix)
        let common_config = core_config::Config::load()?;
        let is_prod = is_production();

        let backend: StoreBackend = get_env("STORE_BACKEND", Some("mongodb"), is_prod)?
            .parse()
            .map_err(|e: String| AppError::ConfigError(anyhow::anyhow!(e)))?;

        // The connection string is only mandatory when MongoDB backs the store.
        let uri = match backend {
            StoreBackend::Mongodb => get_env("MONGO_DB_URI", None, is_prod)?,
            StoreBackend::Memory => env::var("MONGO_DB_URI").unwrap_or_default(),
        };

        let database = if is_prod {
            Some(get_env("MONGO_DB_NAME", None, is_prod)?)
        } else {
            env::var("MONGO_DB_NAME").ok()
        };

        Ok(VetConfig {
            common: common_config,
            store: StoreConfig { backend },
            mongodb: MongoConfig { uri, database },
        })
    }
}

impl std::str::FromStr for StoreBackend {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "mongodb" | "mongo" => Ok(StoreBackend::Mongodb),
            "memory" => Ok(StoreBackend::Memory),
            _ => Err(format!("Invalid store backend: {}", s)),
        }
    }
}
