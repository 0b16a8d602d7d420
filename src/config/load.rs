use std::fs;
use std::path::{Path, PathBuf};

use super::error::ConfigError;
use super::paths::ConfigPaths;
use super::types::AppConfig;

#[derive(Debug)]
pub struct LoadedConfig {
    pub config: AppConfig,
    pub paths: ConfigPaths,
    pub config_exists: bool,
    /// Why the file was ignored, if it was.
    pub issue: Option<ConfigError>,
}

/// Loads the config file at the standard or overridden location.
///
/// Only path resolution can fail; a missing, unreadable or malformed file
/// yields the defaults.
pub fn load_config(path_override: Option<PathBuf>) -> Result<LoadedConfig, ConfigError> {
    let paths = ConfigPaths::resolve(path_override)?;
    Ok(load_from(paths))
}

pub fn load_from(paths: ConfigPaths) -> LoadedConfig {
    let (config, config_exists, issue) = match read_config(&paths.config_file) {
        Ok(Some(config)) => (config.normalized(), true, None),
        Ok(None) => {
            log::debug!("no config at {}, using defaults", paths.config_file.display());
            (AppConfig::default(), false, None)
        }
        Err(err) => {
            log::warn!(
                "ignoring config {}: {err}; using defaults",
                paths.config_file.display()
            );
            (AppConfig::default(), true, Some(err))
        }
    };
    LoadedConfig {
        config,
        paths,
        config_exists,
        issue,
    }
}

fn read_config(path: &Path) -> Result<Option<AppConfig>, ConfigError> {
    match fs::read_to_string(path) {
        Ok(contents) => Ok(Some(toml::from_str(&contents)?)),
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(None),
        Err(err) => Err(ConfigError::Io(err)),
    }
}
