//! Runtime configuration.
//!
//! Values come from environment variables and are then overridden by CLI
//! flags in `main`. Nothing here is global: the resolved config is passed to
//! [`crate::registry::Registry::from_config`] and the server explicitly.

use std::net::SocketAddr;
use std::path::PathBuf;

use anyhow::{Context, Result};

pub const DEFAULT_HOST: &str = "0.0.0.0";
pub const DEFAULT_PORT: u16 = 5000;
pub const DEFAULT_GIFTS_FILE: &str = "presentes.json";
pub const DEFAULT_PEOPLE_FILE: &str = "pessoas.json";
/// Base URL used by the CLI client commands.
pub const DEFAULT_URL: &str = "http://localhost:5000";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegistryConfig {
    /// Directory holding both JSON files.
    pub data_dir: PathBuf,
    /// Gift list file name, relative to `data_dir` unless absolute.
    pub gifts_file: PathBuf,
    /// Reservation records file name, relative to `data_dir` unless absolute.
    pub people_file: PathBuf,
    pub host: String,
    pub port: u16,
}

impl RegistryConfig {
    /// Config with default file names inside `data_dir`.
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
            gifts_file: PathBuf::from(DEFAULT_GIFTS_FILE),
            people_file: PathBuf::from(DEFAULT_PEOPLE_FILE),
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
        }
    }

    /// Load configuration from environment variables.
    ///
    /// - `REGISTRY_DATA_DIR`: data directory (default: platform data dir)
    /// - `REGISTRY_GIFTS_FILE` / `REGISTRY_PEOPLE_FILE`: file names
    /// - `IP` / `PORT`: listen address
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let data_dir = match lookup("REGISTRY_DATA_DIR") {
            Some(dir) => PathBuf::from(dir),
            None => default_data_dir()?,
        };

        let mut config = Self::new(data_dir);
        if let Some(file) = lookup("REGISTRY_GIFTS_FILE") {
            config.gifts_file = PathBuf::from(file);
        }
        if let Some(file) = lookup("REGISTRY_PEOPLE_FILE") {
            config.people_file = PathBuf::from(file);
        }
        if let Some(host) = lookup("IP") {
            config.host = host;
        }
        if let Some(port) = lookup("PORT") {
            config.port = port
                .parse()
                .with_context(|| format!("Invalid PORT value: {}", port))?;
        }

        Ok(config)
    }

    pub fn gifts_path(&self) -> PathBuf {
        self.data_dir.join(&self.gifts_file)
    }

    pub fn people_path(&self) -> PathBuf {
        self.data_dir.join(&self.people_file)
    }

    pub fn socket_addr(&self) -> Result<SocketAddr> {
        format!("{}:{}", self.host, self.port)
            .parse()
            .with_context(|| format!("Invalid listen address {}:{}", self.host, self.port))
    }
}

fn default_data_dir() -> Result<PathBuf> {
    let dirs = directories::ProjectDirs::from("", "", "gift-registry")
        .ok_or_else(|| anyhow::anyhow!("Could not determine data directory"))?;
    Ok(dirs.data_dir().to_path_buf())
}
