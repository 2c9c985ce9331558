//! Configuration management for bizplan
//!
//! Handles the ~/.bizplan/ directory structure and config.toml

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::models::{ExportFormat, TemplateKind};

/// Main configuration structure
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub default_template: TemplateKind,
    #[serde(default)]
    pub editor: EditorConfig,
    #[serde(default)]
    pub export: ExportConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EditorConfig {
    /// Quiet period before a field edit is committed
    pub debounce_ms: u64,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self { debounce_ms: 500 }
    }
}

impl EditorConfig {
    pub fn debounce(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ExportConfig {
    /// Overrides the stored export format preference when set
    pub format: Option<ExportFormat>,
    /// Where `export` writes files; defaults to ~/.bizplan/exports
    pub directory: Option<PathBuf>,
}

/// Returns the path to the bizplan home directory (~/.bizplan)
pub fn bizplan_home() -> Result<PathBuf> {
    let home = dirs::home_dir().context("Could not determine home directory")?;
    Ok(home.join(".bizplan"))
}

/// Returns paths to all bizplan directories
#[derive(Debug, Clone)]
pub struct BizplanPaths {
    pub root: PathBuf,
    pub config: PathBuf,
    pub db: PathBuf,
    pub db_file: PathBuf,
    pub exports: PathBuf,
}

impl BizplanPaths {
    pub fn new() -> Result<Self> {
        Ok(Self::at(bizplan_home()?))
    }

    /// Lay out the directory structure under an explicit root
    pub fn at(root: impl Into<PathBuf>) -> Self {
        let root = root.into();
        Self {
            config: root.join("config.toml"),
            db: root.join("db"),
            db_file: root.join("db/bizplan.db"),
            exports: root.join("exports"),
            root,
        }
    }

    /// Create all directories if they don't exist
    pub fn ensure_dirs(&self) -> Result<()> {
        fs::create_dir_all(&self.root).context("Failed to create bizplan root")?;
        fs::create_dir_all(&self.db).context("Failed to create db directory")?;
        fs::create_dir_all(&self.exports).context("Failed to create exports directory")?;
        Ok(())
    }

    /// Check if bizplan has been initialized
    pub fn is_initialized(&self) -> bool {
        self.config.exists() && self.db_file.exists()
    }

    pub fn export_dir(&self, config: &Config) -> PathBuf {
        config
            .export
            .directory
            .clone()
            .unwrap_or_else(|| self.exports.clone())
    }
}

/// Load configuration, falling back to defaults when the file is absent
pub fn load_config(paths: &BizplanPaths) -> Result<Config> {
    load_config_from(&paths.config)
}

pub fn load_config_from(path: &Path) -> Result<Config> {
    if !path.exists() {
        return Ok(Config::default());
    }
    let content = fs::read_to_string(path).context("Failed to read config.toml")?;
    toml::from_str(&content).context("Failed to parse config.toml")
}

/// Save configuration to disk
pub fn save_config(paths: &BizplanPaths, config: &Config) -> Result<()> {
    let content = toml::to_string_pretty(config).context("Failed to serialize config")?;
    fs::write(&paths.config, content).context("Failed to write config.toml")?;
    Ok(())
}
