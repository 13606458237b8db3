//! Configuration management with layered loading
//!
//! Precedence (lowest to highest):
//! 1. Compiled defaults
//! 2. Global config: `$XDG_CONFIG_HOME/sshalias/sshalias.toml`
//! 3. Environment variables: `SSHALIAS_*` prefix
//! 4. `--file` on the command line (applied by the CLI)

use std::path::{Path, PathBuf};

use config::{Config, ConfigError, Environment};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

use crate::application::ApplicationError;
use crate::domain::{expand_env_vars, DEFAULT_INDENT};

/// Raw settings for intermediate parsing (`None` = not specified, inherit).
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct RawSettings {
    pub ssh_config: Option<PathBuf>,
    pub indent: Option<usize>,
}

/// Unified configuration for sshalias.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Settings {
    /// SSH client config to manage (default: ~/.ssh/config)
    pub ssh_config: PathBuf,
    /// Spaces before each directive when rewriting `Host` blocks
    pub indent: usize,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            ssh_config: default_ssh_config(),
            indent: DEFAULT_INDENT,
        }
    }
}

/// Get the default SSH config path (~/.ssh/config).
fn default_ssh_config() -> PathBuf {
    directories::BaseDirs::new()
        .map(|dirs| dirs.home_dir().join(".ssh").join("config"))
        .unwrap_or_else(|| PathBuf::from("~/.ssh/config"))
}

/// Get the XDG config directory for sshalias.
pub fn global_config_dir() -> Option<PathBuf> {
    ProjectDirs::from("", "", "sshalias").map(|dirs| dirs.config_dir().to_path_buf())
}

/// Get the path to the global config file.
pub fn global_config_path() -> Option<PathBuf> {
    global_config_dir().map(|dir| dir.join("sshalias.toml"))
}

/// Load a TOML file into RawSettings for manual merging.
fn load_raw_settings(path: &Path) -> Result<RawSettings, ApplicationError> {
    let content = std::fs::read_to_string(path).map_err(|e| ApplicationError::Config {
        message: format!("read {}: {}", path.display(), e),
    })?;
    toml::from_str(&content).map_err(|e| ApplicationError::Config {
        message: format!("parse {}: {}", path.display(), e),
    })
}

fn config_err(e: ConfigError) -> ApplicationError {
    ApplicationError::Config {
        message: e.to_string(),
    }
}

impl Settings {
    /// Load settings with layered precedence from the XDG global config.
    pub fn load() -> Result<Self, ApplicationError> {
        Self::load_from(global_config_path().as_deref())
    }

    /// Load settings using `global_path` as the global config file.
    ///
    /// A missing file is skipped; an unreadable or malformed one is an error.
    pub fn load_from(global_path: Option<&Path>) -> Result<Self, ApplicationError> {
        let mut current = Self::default();

        if let Some(path) = global_path {
            if path.exists() {
                let raw = load_raw_settings(path)?;
                current = current.merge_with(&raw);
            }
        }

        current = Self::apply_env_overrides(current)?;
        current.expand_paths();
        Ok(current)
    }

    /// Replace the managed SSH config path (e.g. from `--file`).
    pub fn with_ssh_config(mut self, path: &Path) -> Self {
        self.ssh_config = PathBuf::from(expand_env_vars(&path.to_string_lossy()));
        self
    }

    /// Render these settings as a TOML document.
    pub fn to_toml(&self) -> Result<String, ApplicationError> {
        toml::to_string_pretty(self).map_err(|e| ApplicationError::Config {
            message: format!("serialize settings: {e}"),
        })
    }

    fn merge_with(&self, overlay: &RawSettings) -> Self {
        Self {
            ssh_config: overlay
                .ssh_config
                .clone()
                .unwrap_or_else(|| self.ssh_config.clone()),
            indent: overlay.indent.unwrap_or(self.indent),
        }
    }

    /// Apply SSHALIAS_* environment variables as explicit overrides.
    fn apply_env_overrides(mut settings: Self) -> Result<Self, ApplicationError> {
        let config = Config::builder()
            .add_source(Environment::with_prefix("SSHALIAS").separator("__"))
            .build()
            .map_err(config_err)?;

        if let Ok(val) = config.get_string("ssh_config") {
            settings.ssh_config = PathBuf::from(val);
        }
        match config.get::<usize>("indent") {
            Ok(val) => settings.indent = val,
            Err(ConfigError::NotFound(_)) => {}
            Err(e) => return Err(config_err(e)),
        }

        Ok(settings)
    }

    /// Expand `~`, `$VAR` and `${VAR}` in path-like fields.
    fn expand_paths(&mut self) {
        let expanded = expand_env_vars(self.ssh_config.to_string_lossy().as_ref());
        self.ssh_config = PathBuf::from(expanded);
    }
}
