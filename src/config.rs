//! Install layout and compare options
//!
//! Options live in a small TOML file in the per-user config directory:
//! - Windows: %APPDATA%\patch_freshness\config\config.toml
//! - Linux: ~/.config/patch_freshness/config.toml

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::warn;

/// Directories under the game's bin directory
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstallLayout {
    pub bin_directory: PathBuf,
    pub data_directory: PathBuf,
    pub data_win32_directory: PathBuf,
    pub mods_directory: PathBuf,
}

impl InstallLayout {
    pub fn new(bin_directory: impl Into<PathBuf>) -> Self {
        let bin_directory = bin_directory.into();
        let data_directory = bin_directory.join("data");
        Self {
            data_win32_directory: data_directory.join("win32"),
            mods_directory: bin_directory.join("mods"),
            data_directory,
            bin_directory,
        }
    }
}

/// Options for the compare phase
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CompareOptions {
    /// Files shadowed by a same-named file in the mods directory are left alone
    pub mod_files_enabled: bool,
    /// Worker threads for per-file checks (0 = one per CPU)
    pub threads: usize,
}

impl Default for CompareOptions {
    fn default() -> Self {
        Self {
            mod_files_enabled: true,
            threads: 0,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub compare: CompareOptions,
}

impl Config {
    /// Load from the default location, falling back to defaults
    ///
    /// A missing file is normal; a malformed one is logged and ignored.
    pub fn load() -> Self {
        let Some(path) = config_path() else {
            return Self::default();
        };
        if !path.exists() {
            return Self::default();
        }
        match Self::load_from(&path) {
            Ok(config) => config,
            Err(e) => {
                warn!("Ignoring config file {}: {:#}", path.display(), e);
                Self::default()
            }
        }
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config: {}", path.display()))?;
        toml::from_str(&contents)
            .with_context(|| format!("Failed to parse config: {}", path.display()))
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create config directory: {}", parent.display())
            })?;
        }
        let contents = toml::to_string_pretty(self).context("Failed to serialize config")?;
        fs::write(path, contents)
            .with_context(|| format!("Failed to write config: {}", path.display()))
    }
}

/// Default config file location, if the platform has a config directory
pub fn config_path() -> Option<PathBuf> {
    directories::ProjectDirs::from("", "", "patch_freshness")
        .map(|dirs| dirs.config_dir().join("config.toml"))
}
