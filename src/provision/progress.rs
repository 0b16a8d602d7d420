use std::fmt;
use std::time::Duration;

use super::classify::ErrorKind;

/// User-visible progress emitted while provisioning.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    Retrying {
        attempt: usize,
        max_attempts: usize,
        kind: ErrorKind,
        delay: Duration,
    },
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Notice::Retrying {
                attempt,
                max_attempts,
                kind,
                delay,
            } => {
                let secs = delay.as_secs();
                match kind {
                    ErrorKind::RateLimited => write!(
                        f,
                        "Rate limit exceeded. Retrying in {secs} seconds... (Attempt {attempt}/{max_attempts})"
                    ),
                    _ => write!(
                        f,
                        "Groq service unavailable. Retrying in {secs} seconds... (Attempt {attempt}/{max_attempts})"
                    ),
                }
            }
        }
    }
}

/// Receives progress notices before the provisioner blocks.
pub trait ProgressSink: Send + Sync {
    fn notify(&self, notice: &Notice);
}

/// Progress sink that writes notices to the log at warn level.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogProgress;

impl ProgressSink for LogProgress {
    fn notify(&self, notice: &Notice) {
        log::warn!("{notice}");
    }
}
