use std::path::PathBuf;

use super::error::ConfigError;

const APP_DIR: &str = "agentic-chat";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigPaths {
    pub config_file: PathBuf,
    pub config_dir: PathBuf,
    pub data_dir: PathBuf,
    pub logs_dir: PathBuf,
}

impl ConfigPaths {
    /// Resolves the standard locations; an override replaces only the config file.
    pub fn resolve(config_override: Option<PathBuf>) -> Result<Self, ConfigError> {
        let home = dirs::home_dir().ok_or(ConfigError::MissingHome)?;
        let data_dir = home.join(".local").join("share").join(APP_DIR);

        let (config_dir, config_file) = match config_override {
            Some(path) => {
                let dir = path
                    .parent()
                    .map(PathBuf::from)
                    .ok_or(ConfigError::MissingHome)?;
                (dir, path)
            }
            None => {
                let dir = home.join(".config").join(APP_DIR);
                let file = dir.join("config.toml");
                (dir, file)
            }
        };

        Ok(Self {
            config_file,
            config_dir,
            logs_dir: data_dir.join("logs"),
            data_dir,
        })
    }

    pub fn default_log_file(&self) -> PathBuf {
        self.logs_dir.join(format!("{APP_DIR}.log"))
    }
}
