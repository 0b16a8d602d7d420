use std::time::Duration;

/// Retry policy for provisioning.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ProvisionConfig {
    /// Maximum number of attempts including the first one
    pub max_attempts: usize,
    /// Fixed wait between attempts
    pub retry_delay: Duration,
}

const DEFAULT_MAX_ATTEMPTS: usize = 3;
const DEFAULT_RETRY_DELAY_SECS: u64 = 5;

impl ProvisionConfig {
    pub fn new(max_attempts: usize, retry_delay: Duration) -> Self {
        Self {
            max_attempts,
            retry_delay,
        }
    }

    /// Upper bound on time spent sleeping between attempts.
    pub fn worst_case_wait(&self) -> Duration {
        self.retry_delay
            .saturating_mul(self.max_attempts.saturating_sub(1) as u32)
    }
}

impl Default for ProvisionConfig {
    fn default() -> Self {
        Self {
            max_attempts: DEFAULT_MAX_ATTEMPTS,
            retry_delay: Duration::from_secs(DEFAULT_RETRY_DELAY_SECS),
        }
    }
}
