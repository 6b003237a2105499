use anyhow::{Context, Result};
use domain::EngineConfig;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

pub const CONFIG_DIR: &str = ".decision-aid";
pub const CONFIG_FILE: &str = "config.toml";
pub const UNSPECIFIED: &str = "unspecified";

fn default_top_n() -> usize {
    10
}

fn default_label() -> String {
    UNSPECIFIED.to_string()
}

/// User-level settings. Every field is optional in the file.
///
/// ```toml
/// catalog = "/etc/decision-aid/catalog.yaml"
/// top_n = 5
/// default_age_group = "40_to_64"
///
/// [engine]
/// mode = "present-only"
/// accumulation = "log-space"
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AidConfig {
    /// Catalog file to load instead of the embedded one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub catalog: Option<PathBuf>,

    /// How many ranked diagnoses to show
    #[serde(default = "default_top_n")]
    pub top_n: usize,

    #[serde(default = "default_label")]
    pub default_age_group: String,

    #[serde(default = "default_label")]
    pub default_sex: String,

    #[serde(default)]
    pub engine: EngineConfig,
}

impl Default for AidConfig {
    fn default() -> Self {
        Self {
            catalog: None,
            engine: EngineConfig::default(),
            top_n: default_top_n(),
            default_age_group: default_label(),
            default_sex: default_label(),
        }
    }
}

/// Reads and writes [`AidConfig`] at `~/.decision-aid/config.toml` or an explicit path.
pub struct ConfigStore {
    path: PathBuf,
}

impl ConfigStore {
    /// Store rooted at the user's home directory.
    pub fn new() -> Result<Self> {
        let home = dirs::home_dir().context("Could not find home directory")?;
        Ok(Self {
            path: home.join(CONFIG_DIR).join(CONFIG_FILE),
        })
    }

    pub fn at(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the config. Returns defaults if the file doesn't exist.
    pub fn load(&self) -> Result<AidConfig> {
        if !self.path.exists() {
            tracing::debug!(path = ?self.path, "No config file, using defaults");
            return Ok(AidConfig::default());
        }

        let content = fs::read_to_string(&self.path)
            .with_context(|| format!("Failed to read config: {:?}", self.path))?;

        toml::from_str(&content).with_context(|| format!("Failed to parse config: {:?}", self.path))
    }

    pub fn save(&self, config: &AidConfig) -> Result<()> {
        if let Some(dir) = self.path.parent() {
            if !dir.exists() {
                fs::create_dir_all(dir).context("Failed to create config dir")?;
            }
        }

        let content = toml::to_string_pretty(config).context("Failed to serialize config")?;
        fs::write(&self.path, content).context("Failed to write config")?;

        Ok(())
    }
}
