//! Configuration management with layered loading
//!
//! Precedence (lowest to highest):
//! 1. Compiled defaults
//! 2. Global config: `$XDG_CONFIG_HOME/coven/coven.toml`
//! 3. Local config: `<roster_dir>/.coven.toml` (next to the roster file)
//! 4. Environment variables: `COVEN_*` prefix

use std::path::{Path, PathBuf};

use config::{Config, ConfigError, Environment};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use crate::application::ApplicationError;
use crate::domain::{expand_env_vars, MILLENNIAL_YEAR};

/// Unified configuration for coven.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Settings {
    /// Roster file used when `--roster` is not given
    pub roster: Option<PathBuf>,
    /// Default threshold for `coven after`
    pub millennial_year: i32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            roster: None,
            millennial_year: MILLENNIAL_YEAR,
        }
    }
}

/// Raw settings for intermediate parsing (`None` means "not specified").
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct RawSettings {
    pub roster: Option<PathBuf>,
    pub millennial_year: Option<i32>,
}

/// Get the XDG config directory for coven.
pub fn global_config_dir() -> Option<PathBuf> {
    ProjectDirs::from("", "", "coven").map(|dirs| dirs.config_dir().to_path_buf())
}

/// Get the path to the global config file.
pub fn global_config_path() -> Option<PathBuf> {
    global_config_dir().map(|dir| dir.join("coven.toml"))
}

/// Get the path to the local config file next to a roster.
pub fn local_config_path(roster_dir: &Path) -> PathBuf {
    roster_dir.join(".coven.toml")
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

/// Expand `~` and `$VAR` in a configured path.
fn expand_path(path: &Path) -> PathBuf {
    PathBuf::from(expand_env_vars(path.to_string_lossy().as_ref()))
}

impl Settings {
    /// Overlay wins where it specifies a value.
    ///
    /// A roster path in a config file is expanded first; if it is still
    /// relative it is resolved against that file's directory.
    fn merge_with(&self, overlay: &RawSettings, config_dir: Option<&Path>) -> Self {
        let roster = overlay.roster.as_deref().map(expand_path).map(|roster| {
            match config_dir {
                Some(dir) if roster.is_relative() => dir.join(roster),
                _ => roster,
            }
        });
        Self {
            roster: roster.or_else(|| self.roster.clone()),
            millennial_year: overlay.millennial_year.unwrap_or(self.millennial_year),
        }
    }

    /// Load settings with layered precedence.
    ///
    /// # Arguments
    /// * `roster_dir` - Optional directory of the roster file for local config
    ///
    /// # Precedence (lowest to highest)
    /// 1. Compiled defaults
    /// 2. Global config: `$XDG_CONFIG_HOME/coven/coven.toml`
    /// 3. Local config: `<roster_dir>/.coven.toml`
    /// 4. Environment variables: `COVEN_*` prefix
    #[instrument(level = "debug")]
    pub fn load(roster_dir: Option<&Path>) -> Result<Self, ApplicationError> {
        // 1. Start with defaults
        let mut current = Self::default();

        // 2. Load global config
        if let Some(global_path) = global_config_path() {
            if global_path.exists() {
                debug!("global config: {}", global_path.display());
                let raw = load_raw_settings(&global_path)?;
                current = current.merge_with(&raw, global_path.parent());
            }
        }

        // 3. Load local config next to the roster
        if let Some(dir) = roster_dir {
            let local_path = local_config_path(dir);
            if local_path.exists() {
                debug!("local config: {}", local_path.display());
                let raw = load_raw_settings(&local_path)?;
                current = current.merge_with(&raw, Some(dir));
            }
        }

        // 4. Apply environment variables (explicit override)
        current = Self::apply_env_overrides(current)?;

        Ok(current)
    }

    /// Apply COVEN_* environment variables as explicit overrides.
    fn apply_env_overrides(mut settings: Self) -> Result<Self, ApplicationError> {
        // Use config crate just for env var parsing
        let config = Config::builder()
            .add_source(
                Environment::with_prefix("COVEN")
                    .prefix_separator("_")
                    .separator("__"),
            )
            .build()
            .map_err(config_err)?;

        if let Ok(val) = config.get_string("roster") {
            settings.roster = Some(expand_path(Path::new(&val)));
        }
        if let Ok(val) = config.get_int("millennial_year") {
            settings.millennial_year = i32::try_from(val).map_err(|_| ApplicationError::Config {
                message: format!("COVEN_MILLENNIAL_YEAR out of range: {val}"),
            })?;
        }

        Ok(settings)
    }

    /// Show the effective configuration as TOML.
    pub fn to_toml(&self) -> Result<String, ApplicationError> {
        toml::to_string_pretty(self).map_err(|e| ApplicationError::Config {
            message: format!("serialize config: {e}"),
        })
    }

    /// Generate a template config file.
    pub fn template() -> String {
        r#"# coven configuration
#
# Locations (by precedence, lowest to highest):
#   Global: ~/.config/coven/coven.toml
#   Local:  <roster_dir>/.coven.toml
#   Env:    COVEN_* environment variables

# Roster file used when --roster is not given
# roster = "~/vampires/roster.toml"

# Default threshold year for `coven after`
# millennial_year = 1980
"#
        .to_string()
    }
}

fn config_err(e: ConfigError) -> ApplicationError {
    ApplicationError::Config {
        message: e.to_string(),
    }
}
