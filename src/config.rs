//! Application settings read from a TOML file, with built-in defaults.

#[path = "config/error.rs"]
mod error;

#[path = "config/paths.rs"]
mod paths;

#[path = "config/types.rs"]
mod types;

#[path = "config/load.rs"]
mod load;

#[cfg(test)]
#[path = "config/tests.rs"]
mod tests;

pub use error::ConfigError;
pub use load::{load_config, load_from, LoadedConfig};
pub use paths::ConfigPaths;
pub use types::{AppConfig, LoggingConfig, ProvisionSettings, UiConfig};
