//! Obtaining ready-to-call model handles under transient provider failures.

#[path = "provision/config.rs"]
mod config;

#[path = "provision/classify.rs"]
mod classify;

#[path = "provision/error.rs"]
mod error;

#[path = "provision/credentials.rs"]
mod credentials;

#[path = "provision/factory.rs"]
mod factory;

#[path = "provision/progress.rs"]
mod progress;

#[path = "provision/provisioner.rs"]
mod provisioner;


pub use classify::ErrorKind;
pub use config::ProvisionConfig;
pub use credentials::Credentials;
pub use error::ProvisionError;
pub use factory::{GroqFactory, GroqSettings, ModelFactory};
pub use progress::{LogProgress, Notice, ProgressSink};
pub use provisioner::Provisioner;
