//! Configuration loading and management
//!
//! Handles parsing of `study-organizer.toml` configuration files.

use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

pub const CONFIG_FILE_NAME: &str = "study-organizer.toml";

/// Main configuration structure
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// HTTP server settings
    #[serde(default)]
    pub server: ServerConfig,

    /// Client settings used by the task commands
    #[serde(default)]
    pub client: ClientConfig,

    /// Derived-view settings shared by the dashboard and the CLI
    #[serde(default)]
    pub dashboard: DashboardConfig,
}

/// Server configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Interface to bind
    #[serde(default = "default_host")]
    pub host: String,

    /// Port to listen on
    #[serde(default = "default_port")]
    pub port: u16,

    /// Allow cross-origin requests from any origin
    #[serde(default = "default_true")]
    pub cors: bool,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

fn default_true() -> bool {
    true
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            cors: default_true(),
        }
    }
}

/// Client configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientConfig {
    /// Base URL of the task API
    #[serde(default = "default_api_url")]
    pub api_url: String,

    /// Request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_api_url() -> String {
    "http://localhost:8080".to_string()
}

fn default_timeout_secs() -> u64 {
    10
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_url: default_api_url(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

/// Dashboard configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DashboardConfig {
    /// Number of dated tasks shown in the timeline
    #[serde(default = "default_timeline_limit")]
    pub timeline_limit: usize,

    /// Open tasks due within this many days are flagged "Due soon"
    #[serde(default = "default_due_soon_days")]
    pub due_soon_days: i64,
}

fn default_timeline_limit() -> usize {
    6
}

fn default_due_soon_days() -> i64 {
    3
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            timeline_limit: default_timeline_limit(),
            due_soon_days: default_due_soon_days(),
        }
    }
}

impl Config {
    /// Load configuration from a TOML file
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(Error::ConfigNotFound(path.to_path_buf()));
        }
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Resolve the configuration for this process.
    ///
    /// An explicit path must load. Otherwise the first of
    /// `./study-organizer.toml` and the platform config file that exists is
    /// used; an unreadable implicit file falls back to defaults.
    pub fn resolve(explicit: Option<&Path>) -> Result<Self> {
        if let Some(path) = explicit {
            return Self::load(path);
        }

        for candidate in implicit_config_paths() {
            if !candidate.exists() {
                continue;
            }
            return Ok(Self::load(&candidate).unwrap_or_else(|err| {
                tracing::warn!(path = %candidate.display(), %err, "ignoring config file");
                Self::default()
            }));
        }

        Ok(Self::default())
    }

    /// Check every section; also run after CLI overrides are applied.
    pub fn validate(&self) -> Result<()> {
        self.server.validate()?;
        self.client.validate()?;
        self.dashboard.validate()?;
        Ok(())
    }
}

impl ServerConfig {
    fn validate(&self) -> Result<()> {
        if self.host.trim().is_empty() {
            return Err(Error::InvalidConfig(
                "server.host cannot be empty".to_string(),
            ));
        }
        if self.port == 0 {
            return Err(Error::InvalidConfig("server.port cannot be 0".to_string()));
        }
        Ok(())
    }
}

impl ClientConfig {
    fn validate(&self) -> Result<()> {
        let url = self.api_url.trim();
        if url.is_empty() {
            return Err(Error::InvalidConfig(
                "client.api_url cannot be empty".to_string(),
            ));
        }
        if !url.starts_with("http://") && !url.starts_with("https://") {
            return Err(Error::InvalidConfig(format!(
                "client.api_url must be an http(s) URL, got '{url}'"
            )));
        }
        if self.timeout_secs == 0 {
            return Err(Error::InvalidConfig(
                "client.timeout_secs must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

impl DashboardConfig {
    fn validate(&self) -> Result<()> {
        if self.timeline_limit == 0 {
            return Err(Error::InvalidConfig(
                "dashboard.timeline_limit must be at least 1".to_string(),
            ));
        }
        if self.due_soon_days < 0 {
            return Err(Error::InvalidConfig(
                "dashboard.due_soon_days cannot be negative".to_string(),
            ));
        }
        Ok(())
    }
}

fn implicit_config_paths() -> Vec<PathBuf> {
    let mut paths = vec![PathBuf::from(CONFIG_FILE_NAME)];
    if let Some(dirs) = ProjectDirs::from("", "", "study-organizer") {
        paths.push(dirs.config_dir().join("config.toml"));
    }
    paths
}
