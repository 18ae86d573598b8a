//! Server settings management.
//!
//! This module handles loading, validating, and saving the server settings
//! in TOML format with platform-specific directory resolution. These are the
//! operator's settings (bind address, build mode, remote config URL); the
//! page content itself lives in the site config document.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use crate::branding::APP_DATA_DIR;

/// Whether the server behaves as a development or a production deployment.
///
/// Only production mode fetches the remote site config; development serves
/// the bundled document as-is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum BuildMode {
    /// Local editing; bundled config only.
    Development,
    /// Deployed site; bundled config plus one remote refresh.
    Production,
}

impl BuildMode {
    /// Mode implied by the compilation profile: release builds are production.
    #[must_use]
    pub const fn from_build_profile() -> Self {
        if cfg!(debug_assertions) {
            Self::Development
        } else {
            Self::Production
        }
    }

    /// Returns true for production mode.
    #[must_use]
    pub const fn is_production(self) -> bool {
        matches!(self, Self::Production)
    }
}

impl Default for BuildMode {
    fn default() -> Self {
        Self::from_build_profile()
    }
}

impl fmt::Display for BuildMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Development => write!(f, "development"),
            Self::Production => write!(f, "production"),
        }
    }
}

/// Network binding configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Host or IP address to bind to.
    pub host: String,
    /// TCP port to listen on.
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 3000,
        }
    }
}

/// Site behaviour configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct SiteConfig {
    /// Build mode; defaults to the compilation profile.
    pub mode: BuildMode,
    /// Absolute URL of the runtime site config (usually ending in
    /// `/siteConfig.json`). Without it, production serves the bundled config.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub remote_config_url: Option<String>,
}

/// Server settings.
///
/// # File Location
///
/// - Linux: `~/.config/PilgrimSite/config.toml`
/// - macOS: `~/Library/Application Support/PilgrimSite/config.toml`
/// - Windows: `%APPDATA%\PilgrimSite\config.toml`
///
/// # Validation
///
/// - `server.host` must be non-empty
/// - `server.port` must be non-zero
/// - `site.remote_config_url`, if set, must be an absolute http(s) URL
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    /// Network binding
    pub server: ServerConfig,
    /// Site behaviour
    pub site: SiteConfig,
}

impl Config {
    /// Creates a new Config with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Gets the platform-specific config directory path.
    pub fn config_dir() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .context("Failed to determine config directory")?
            .join(APP_DATA_DIR);

        Ok(config_dir)
    }

    /// Gets the full path to the default config file.
    pub fn config_file_path() -> Result<PathBuf> {
        Ok(Self::config_dir()?.join("config.toml"))
    }

    /// Loads settings from the default config file.
    ///
    /// If the file doesn't exist, returns default settings.
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_file_path()?)
    }

    /// Loads settings from `path`, or defaults if the file doesn't exist.
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::new());
        }

        let content = fs::read_to_string(path)
            .context(format!("Failed to read config file: {}", path.display()))?;

        let config: Self = toml::from_str(&content)
            .context(format!("Failed to parse config file: {}", path.display()))?;

        config.validate()?;

        Ok(config)
    }

    /// Saves settings to the default config file.
    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_file_path()?)
    }

    /// Saves settings to `path` using atomic write.
    ///
    /// Uses temp file + rename pattern for atomic writes.
    pub fn save_to(&self, path: &Path) -> Result<()> {
        self.validate()?;

        if let Some(dir) = path.parent() {
            fs::create_dir_all(dir).context(format!(
                "Failed to create config directory: {}",
                dir.display()
            ))?;
        }

        let content = toml::to_string_pretty(self).context("Failed to serialize configuration")?;

        let temp_path = path.with_extension("toml.tmp");

        fs::write(&temp_path, content).context(format!(
            "Failed to write temp config file: {}",
            temp_path.display()
        ))?;

        fs::rename(&temp_path, path).context(format!(
            "Failed to rename temp config file to: {}",
            path.display()
        ))?;

        Ok(())
    }

    /// Validates settings values.
    pub fn validate(&self) -> Result<()> {
        if self.server.host.trim().is_empty() {
            anyhow::bail!("Server host cannot be empty");
        }

        if self.server.port == 0 {
            anyhow::bail!("Server port must be between 1 and 65535");
        }

        if let Some(url) = &self.site.remote_config_url {
            let parsed = reqwest::Url::parse(url)
                .context(format!("Invalid remote config URL: {url}"))?;
            if !matches!(parsed.scheme(), "http" | "https") {
                anyhow::bail!(
                    "Remote config URL must use http or https, got '{}'",
                    parsed.scheme()
                );
            }
        }

        Ok(())
    }

    /// Returns the `host:port` string to bind to.
    #[must_use]
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }

    /// Returns the remote config URL if the mode allows a remote refresh.
    #[must_use]
    pub fn remote_refresh_url(&self) -> Option<&str> {
        if self.site.mode.is_production() {
            self.site.remote_config_url.as_deref()
        } else {
            None
        }
    }
}
