use crate::error::{FyyurError, Result};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

pub const DEFAULT_CONFIG_PATH: &str = "config.toml";

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub static_dir: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 5000,
            static_dir: "static".to_string(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct DatabaseConfig {
    /// `sqlite://path`, `sqlite::memory:`, `:memory:` or a bare file path
    pub url: String,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: "sqlite://fyyur.db".to_string(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub directory: String,
    pub file_name: String,
    /// Used when RUST_LOG is not set
    pub filter: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            directory: "logs".to_string(),
            file_name: "fyyur.log".to_string(),
            filter: "fyyur=info,tower_http=info".to_string(),
        }
    }
}

/// Where the database lives, resolved from `DatabaseConfig::url`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DatabaseLocation {
    Memory,
    File(PathBuf),
}

impl DatabaseConfig {
    pub fn location(&self) -> Result<DatabaseLocation> {
        let url = self.url.trim();
        if url.is_empty() {
            return Err(FyyurError::Config("database url is empty".to_string()));
        }
        if url == ":memory:" || url == "sqlite::memory:" || url == "sqlite://:memory:" {
            return Ok(DatabaseLocation::Memory);
        }
        if let Some(path) = url.strip_prefix("sqlite://") {
            if path.is_empty() {
                return Err(FyyurError::Config(format!("database url '{url}' has no path")));
            }
            return Ok(DatabaseLocation::File(PathBuf::from(path)));
        }
        if let Some(path) = url.strip_prefix("sqlite:") {
            return Ok(DatabaseLocation::File(PathBuf::from(path)));
        }
        if url.contains("://") {
            return Err(FyyurError::Config(format!(
                "unsupported database url '{url}' (only sqlite is supported)"
            )));
        }
        Ok(DatabaseLocation::File(PathBuf::from(url)))
    }
}

impl Config {
    /// Load configuration from `path` (or `config.toml` when absent), then
    /// apply environment overrides.
    ///
    /// An explicitly named file must exist; the default one is optional.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut config = match path {
            Some(path) => Self::from_file(path)?,
            None if Path::new(DEFAULT_CONFIG_PATH).exists() => {
                Self::from_file(Path::new(DEFAULT_CONFIG_PATH))?
            }
            None => Config::default(),
        };
        config.apply_env(|key| std::env::var(key).ok())?;
        Ok(config)
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let config_content = fs::read_to_string(path).map_err(|e| {
            FyyurError::Config(format!(
                "Failed to read config file '{}': {}",
                path.display(),
                e
            ))
        })?;
        Self::parse(&config_content)
    }

    pub fn parse(content: &str) -> Result<Self> {
        let config: Config = toml::from_str(content)?;
        Ok(config)
    }

    /// Overlay `DATABASE_URL`, `FYYUR_HOST`, `PORT` and `FYYUR_LOG_DIR`.
    pub fn apply_env<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(url) = lookup("DATABASE_URL") {
            self.database.url = url;
        }
        if let Some(host) = lookup("FYYUR_HOST") {
            self.server.host = host;
        }
        if let Some(port) = lookup("PORT") {
            self.server.port = port
                .trim()
                .parse()
                .map_err(|_| FyyurError::Config(format!("PORT '{port}' is not a valid port")))?;
        }
        if let Some(dir) = lookup("FYYUR_LOG_DIR") {
            self.logging.directory = dir;
        }
        Ok(())
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}
