// ABOUTME: Configuration management for stepwise
// Loads the wizard definition, navigation policy, persistence and toast settings from TOML

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

pub mod steps;

pub use steps::{build_definition, default_steps, FieldConfig, RuleConfig, StepConfig, SUMMARY_SLOT};

use crate::dialog::ToastPosition;
use crate::persistence::{FileSnapshotStore, StorageError};
use crate::wizard::WizardDefinition;

/// Problems turning configured steps into a wizard definition
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("No steps configured")]
    NoSteps,

    #[error("Step key '{0}' is used more than once")]
    DuplicateStepKey(String),

    #[error("Invalid pattern for field '{field}' on step '{step}': {source}")]
    InvalidPattern {
        step: String,
        field: String,
        #[source]
        source: regex::Error,
    },

    #[error("Field '{field}' on step '{step}' must match unknown field '{target}'")]
    UnknownField {
        step: String,
        field: String,
        target: String,
    },
}

/// Indicator layout
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Orientation {
    #[default]
    Horizontal,
    Vertical,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WizardConfig {
    /// Window title
    #[serde(default = "default_title")]
    pub title: String,

    /// Let `go_to_step` ignore reachability
    #[serde(default)]
    pub allow_skip_steps: bool,

    #[serde(default = "default_true")]
    pub show_step_numbers: bool,

    #[serde(default)]
    pub orientation: Orientation,

    #[serde(default)]
    pub persistence: PersistenceConfig,

    #[serde(default)]
    pub toasts: ToastConfig,

    #[serde(default = "default_steps")]
    pub steps: Vec<StepConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PersistenceConfig {
    #[serde(default = "default_true")]
    pub enabled: bool,

    /// Snapshot file name (without extension)
    #[serde(default = "default_storage_key")]
    pub storage_key: String,

    /// Snapshot directory; defaults to ~/.stepwise/snapshots
    #[serde(default)]
    pub directory: Option<PathBuf>,
}

impl Default for PersistenceConfig {
    fn default() -> Self {
        Self {
            enabled: default_true(),
            storage_key: default_storage_key(),
            directory: None,
        }
    }
}

impl PersistenceConfig {
    /// Snapshot store for these settings, or `None` when persistence is off
    pub fn store(&self) -> Result<Option<FileSnapshotStore>, StorageError> {
        if !self.enabled {
            return Ok(None);
        }
        let dir = match &self.directory {
            Some(dir) => dir.clone(),
            None => FileSnapshotStore::default_dir()?,
        };
        Ok(Some(FileSnapshotStore::new(dir, &self.storage_key)))
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToastConfig {
    /// Auto-dismiss delay; 0 keeps toasts until dismissed
    #[serde(default = "default_toast_duration_ms")]
    pub duration_ms: u64,

    #[serde(default)]
    pub position: ToastPosition,
}

impl Default for ToastConfig {
    fn default() -> Self {
        Self {
            duration_ms: default_toast_duration_ms(),
            position: ToastPosition::default(),
        }
    }
}

impl ToastConfig {
    pub fn duration(&self) -> Duration {
        Duration::from_millis(self.duration_ms)
    }
}

fn default_title() -> String {
    "Setup Wizard".to_string()
}

fn default_true() -> bool {
    true
}

fn default_storage_key() -> String {
    "wizard-data".to_string()
}

fn default_toast_duration_ms() -> u64 {
    3000
}

impl Default for WizardConfig {
    fn default() -> Self {
        Self {
            title: default_title(),
            allow_skip_steps: false,
            show_step_numbers: default_true(),
            orientation: Orientation::default(),
            persistence: PersistenceConfig::default(),
            toasts: ToastConfig::default(),
            steps: default_steps(),
        }
    }
}

impl WizardConfig {
    /// Default config path (~/.stepwise/config.toml)
    pub fn config_path() -> Result<PathBuf> {
        let home = dirs::home_dir().context("Could not determine home directory")?;
        Ok(home.join(".stepwise").join("config.toml"))
    }

    /// Load from `path`, or the default location; a missing file yields the defaults
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let path = match path {
            Some(path) => path.to_path_buf(),
            None => Self::config_path()?,
        };

        if !path.exists() {
            tracing::debug!("No config at {}, using defaults", path.display());
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read config from {}", path.display()))?;

        let config: Self = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config from {}", path.display()))?;

        Ok(config)
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create config directory: {}", parent.display())
            })?;
        }

        let content = toml::to_string_pretty(self).context("Failed to serialize config")?;

        fs::write(path, content)
            .with_context(|| format!("Failed to write config to {}", path.display()))?;

        Ok(())
    }

    pub fn definition(&self) -> Result<WizardDefinition, ConfigError> {
        build_definition(&self.title, &self.steps)
    }
}
