//! Configuration loading and management
//!
//! Configuration can come from a YAML file, from environment variables, or
//! both: [`AppConfig::from_env`] starts from the file named by `ITEMS_CONFIG`
//! (if any) and applies the environment on top.

use anyhow::{Context, Result, bail};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// HTTP server settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Address to bind, e.g. "0.0.0.0:8010"
    pub bind: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: "0.0.0.0:8010".to_string(),
        }
    }
}

/// PostgreSQL connection settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DatabaseConfig {
    pub user: String,
    pub password: String,
    pub host: String,
    pub port: u16,
    /// Database name
    pub name: String,
    pub ssl_mode: String,
    pub max_connections: u32,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            user: "postgres".to_string(),
            password: String::new(),
            host: "db".to_string(),
            port: 5432,
            name: "postgres".to_string(),
            ssl_mode: "disable".to_string(),
            max_connections: 10,
        }
    }
}

impl DatabaseConfig {
    /// Build the `postgresql://` connection string
    pub fn connection_string(&self) -> String {
        self.format_url(&self.password)
    }

    /// Same as [`connection_string`](Self::connection_string) with the password masked, for logs
    pub fn redacted_connection_string(&self) -> String {
        if self.password.is_empty() {
            self.format_url("")
        } else {
            self.format_url("***")
        }
    }

    fn format_url(&self, password: &str) -> String {
        format!(
            "postgresql://{}:{}@{}:{}/{}?sslmode={}",
            self.user, password, self.host, self.port, self.name, self.ssl_mode
        )
    }
}

/// Which [`ItemService`](crate::core::ItemService) backs the server
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    #[default]
    Memory,
    Postgres,
}

impl FromStr for StorageBackend {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "memory" | "in-memory" | "in_memory" => Ok(StorageBackend::Memory),
            "postgres" | "postgresql" => Ok(StorageBackend::Postgres),
            other => bail!("Unknown storage backend '{}'", other),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    pub backend: StorageBackend,
}

/// Complete application configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub storage: StorageConfig,
}

impl AppConfig {
    /// Load configuration from a YAML file
    pub fn from_yaml_file(path: &str) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file '{}'", path))?;
        Self::from_yaml_str(&content)
    }

    /// Load configuration from a YAML string
    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        let config: Self = serde_yaml::from_str(yaml)?;
        Ok(config)
    }

    /// Load configuration from the process environment
    ///
    /// Recognised variables: `ITEMS_CONFIG`, `ITEMS_BIND`, `ITEMS_STORAGE`,
    /// `POSTGRES_USER`, `POSTGRES_PASSWORD`, `POSTGRES_DB`, `POSTGRES_HOST`
    /// and `POSTGRES_PORT`.
    pub fn from_env() -> Result<Self> {
        let base = match std::env::var("ITEMS_CONFIG") {
            Ok(path) => Self::from_yaml_file(&path)?,
            Err(_) => Self::default(),
        };
        base.merge_env(|key| std::env::var(key).ok())
    }

    /// Apply overrides from a variable lookup
    pub fn merge_env(mut self, lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        if let Some(bind) = lookup("ITEMS_BIND") {
            self.server.bind = bind;
        }
        if let Some(backend) = lookup("ITEMS_STORAGE") {
            self.storage.backend = backend.parse()?;
        }
        if let Some(user) = lookup("POSTGRES_USER") {
            self.database.user = user;
        }
        if let Some(password) = lookup("POSTGRES_PASSWORD") {
            self.database.password = password;
        }
        if let Some(name) = lookup("POSTGRES_DB") {
            self.database.name = name;
        }
        if let Some(host) = lookup("POSTGRES_HOST") {
            self.database.host = host;
        }
        if let Some(port) = lookup("POSTGRES_PORT") {
            self.database.port = port
                .parse()
                .with_context(|| format!("Invalid POSTGRES_PORT '{}'", port))?;
        }
        Ok(self)
    }
}
