//! Configuration directory handling for Beacon applications
//!
//! Every Beacon binary shares one config directory (~/.config/beacon/ by
//! default). Set `BEACON_CONFIG_DIR` to point it somewhere else, which is
//! how tests and packaged deployments keep their settings isolated.
//!
//! Call [`init`] at application startup to bootstrap the directory.

use anyhow::{Context, Result};
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::path::{Path, PathBuf};

/// Name of the application directory under the platform config root
pub const APP_DIR: &str = "beacon";

/// Environment variable that overrides the config directory location
pub const CONFIG_DIR_ENV: &str = "BEACON_CONFIG_DIR";

/// A directory holding Beacon JSON config files
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigDir {
    root: PathBuf,
}

impl ConfigDir {
    /// Locate the config directory: `BEACON_CONFIG_DIR` first, then the
    /// platform config root joined with [`APP_DIR`].
    pub fn discover() -> Option<Self> {
        if let Ok(dir) = std::env::var(CONFIG_DIR_ENV)
            && !dir.trim().is_empty()
        {
            return Some(Self::at(dir.trim()));
        }
        dirs::config_dir().map(|p| Self::at(p.join(APP_DIR)))
    }

    /// Use an explicit directory
    pub fn at(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Path of a file inside this directory
    pub fn path(&self, filename: &str) -> PathBuf {
        self.root.join(filename)
    }

    pub fn exists(&self, filename: &str) -> bool {
        self.path(filename).exists()
    }

    /// Create the directory if it does not exist yet
    pub fn ensure(&self) -> Result<&Path> {
        std::fs::create_dir_all(&self.root).with_context(|| {
            format!("Failed to create config directory: {}", self.root.display())
        })?;
        Ok(&self.root)
    }

    /// Load and parse a JSON file from this directory
    pub fn load_json<T: DeserializeOwned>(&self, filename: &str) -> Result<T> {
        load_json_file(&self.path(filename))
    }

    /// Like [`ConfigDir::load_json`], but a missing file is `Ok(None)`
    pub fn load_json_optional<T: DeserializeOwned>(&self, filename: &str) -> Result<Option<T>> {
        if !self.exists(filename) {
            return Ok(None);
        }
        self.load_json(filename).map(Some)
    }

    /// Save a value as pretty-printed JSON, creating the directory if needed
    pub fn save_json<T: Serialize>(&self, filename: &str, value: &T) -> Result<PathBuf> {
        self.ensure()?;
        let path = self.path(filename);
        let content = serde_json::to_string_pretty(value)?;
        std::fs::write(&path, content)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;
        Ok(path)
    }
}

/// Initialize the Beacon config directory.
///
/// Creates it if it doesn't exist. Call this once at application startup.
pub fn init() -> Result<ConfigDir> {
    let dir = ConfigDir::discover().context("Could not determine config directory")?;
    dir.ensure()?;
    Ok(dir)
}

/// Load and parse a JSON file from an arbitrary path
pub fn load_json_file<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;
    serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse config file: {}", path.display()))
}
