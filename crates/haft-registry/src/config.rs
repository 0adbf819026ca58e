//! Deployment configuration.
//!
//! One TOML file configures both the publish CLI and the registry
//! server:
//!
//! ```toml
//! cache_directory = "/var/lib/haft/cache"
//! store_path = "/var/lib/haft/records.json"
//!
//! [server]
//! host = "127.0.0.1"
//! port = 8060
//! cache_path = "/axes"
//! ```

use crate::ConfigError;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

/// Registry deployment configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct RegistryConfig {
    /// Directory where published archives are cached on disk.
    pub cache_directory: PathBuf,

    /// Location of the record store file.
    pub store_path: PathBuf,

    #[serde(default)]
    pub server: ServerConfig,
}

/// HTTP serving section.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,

    /// Public path prefix under which cached archives are served.
    pub cache_path: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8060,
            cache_path: "/axes".to_string(),
        }
    }
}

impl RegistryConfig {
    /// Load configuration from a TOML file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let raw = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(toml::from_str(&raw)?)
    }
}
