//! Configuration loading and discovery for `realm.toml`
//!
//! Provides functions to find, load, and merge configuration.

use super::schema::RealmConfig;
use log::debug;
use std::env;
use std::ffi::OsString;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Name of the configuration file.
pub const CONFIG_FILE_NAME: &str = "realm.toml";

/// Configuration loading error
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ConfigError {
    /// File I/O error
    #[error("Failed to read config: {0}")]
    Io(#[from] std::io::Error),
    /// TOML parsing error
    #[error("Failed to parse realm.toml: {0}")]
    Parse(#[from] toml::de::Error),
    /// Validation error
    #[error("Config validation failed:\n{}", .0.iter().map(|e| format!("  - {}", e)).collect::<Vec<_>>().join("\n"))]
    Validation(Vec<String>),
}

/// CLI arguments that can override config values
#[derive(Debug, Default, Clone)]
pub struct CliOverrides {
    /// Override world directory (absolute, or relative to the config root)
    pub world: Option<PathBuf>,
    /// Override region grid height
    pub column_height: Option<usize>,
    /// Override display scale
    pub scale: Option<f32>,
}

/// A loaded configuration and the directory its relative paths resolve
/// against.
#[derive(Debug, Clone, PartialEq)]
pub struct LoadedConfig {
    pub config: RealmConfig,
    /// Directory containing `realm.toml`, or the current directory when no
    /// config file was found
    pub root: PathBuf,
}

/// Find realm.toml for the current working directory.
///
/// Search order:
/// 1. The current directory and its parents, so a campaign folder holding
///    several world directories can share one realm.toml
/// 2. The per-user realm.toml (see [`find_xdg_config`])
pub fn find_config() -> Option<PathBuf> {
    env::current_dir()
        .ok()
        .and_then(|cwd| find_config_from(&cwd))
        .or_else(find_xdg_config)
}

/// Location of the per-user realm.toml, given `$XDG_CONFIG_HOME` and `$HOME`.
///
/// An empty `XDG_CONFIG_HOME` counts as unset.
pub fn user_config_path(xdg_config_home: Option<OsString>, home: Option<OsString>) -> Option<PathBuf> {
    let base = match xdg_config_home.filter(|dir| !dir.is_empty()) {
        Some(dir) => PathBuf::from(dir),
        None => PathBuf::from(home?).join(".config"),
    };
    Some(base.join("realmgrid").join(CONFIG_FILE_NAME))
}

/// Find the per-user realm.toml, if it exists.
///
/// It holds display defaults for worlds without their own realm.toml. Its
/// `world.dir` resolves against the config directory, so a per-user file
/// that sets one should give an absolute save folder.
pub fn find_xdg_config() -> Option<PathBuf> {
    user_config_path(env::var_os("XDG_CONFIG_HOME"), env::var_os("HOME")).filter(|path| path.is_file())
}

/// Find the nearest realm.toml in `start` or one of its parents.
pub fn find_config_from(start: &Path) -> Option<PathBuf> {
    start
        .ancestors()
        .map(|dir| dir.join(CONFIG_FILE_NAME))
        .find(|path| path.is_file())
}

/// Load configuration from a realm.toml file.
///
/// If a path is provided, loads from that file. Otherwise, uses
/// `find_config()` to locate one. If no config file is found, returns the
/// default configuration rooted at the current directory.
pub fn load_config(path: Option<&Path>) -> Result<LoadedConfig, ConfigError> {
    let config_path = match path {
        Some(p) => Some(p.to_path_buf()),
        None => find_config(),
    };

    match config_path {
        Some(p) => {
            let config = load_config_file(&p)?;
            let root = p
                .parent()
                .filter(|parent| !parent.as_os_str().is_empty())
                .map(Path::to_path_buf)
                .unwrap_or_else(|| PathBuf::from("."));
            debug!("loaded config from '{}'", p.display());
            Ok(LoadedConfig { config, root })
        }
        None => {
            debug!("no realm.toml found, using defaults");
            let root = env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
            Ok(LoadedConfig { config: RealmConfig::default(), root })
        }
    }
}

/// Load configuration from a specific file path.
fn load_config_file(path: &Path) -> Result<RealmConfig, ConfigError> {
    let contents = fs::read_to_string(path)?;
    let config: RealmConfig = toml::from_str(&contents)?;

    let errors = config.validate();
    if !errors.is_empty() {
        return Err(ConfigError::Validation(errors.into_iter().map(|e| e.to_string()).collect()));
    }

    Ok(config)
}

/// Merge CLI overrides into a configuration.
///
/// CLI arguments take precedence over config file values. The merged config
/// is re-validated, since overrides can be out of range too.
pub fn merge_cli_overrides(config: &mut RealmConfig, overrides: &CliOverrides) -> Result<(), ConfigError> {
    if let Some(ref world) = overrides.world {
        config.world.dir = world.clone();
    }

    if let Some(column_height) = overrides.column_height {
        config.world.column_height = column_height;
    }

    if let Some(scale) = overrides.scale {
        config.display.scale = scale;
    }

    let errors = config.validate();
    if !errors.is_empty() {
        return Err(ConfigError::Validation(errors.into_iter().map(|e| e.to_string()).collect()));
    }
    Ok(())
}
