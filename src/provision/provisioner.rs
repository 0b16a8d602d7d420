use std::sync::Arc;

use tokio::time::sleep;

use crate::{
    chat::ModelHandle,
    observer::{self, SharedObserver, TraceEvent},
};

use super::{
    classify::ErrorKind,
    config::ProvisionConfig,
    credentials::Credentials,
    error::ProvisionError,
    factory::ModelFactory,
    progress::{LogProgress, Notice, ProgressSink},
};

/// Retrying front door for model construction.
pub struct Provisioner {
    factory: Arc<dyn ModelFactory>,
    cfg: ProvisionConfig,
    observer: SharedObserver,
    progress: Arc<dyn ProgressSink>,
}

impl Provisioner {
    pub fn new(factory: Arc<dyn ModelFactory>, cfg: ProvisionConfig) -> Self {
        Self {
            factory,
            cfg,
            observer: observer::noop(),
            progress: Arc::new(LogProgress),
        }
    }

    pub fn with_observer(mut self, observer: SharedObserver) -> Self {
        self.observer = observer;
        self
    }

    pub fn with_progress(mut self, progress: Arc<dyn ProgressSink>) -> Self {
        self.progress = progress;
        self
    }

    pub fn config(&self) -> &ProvisionConfig {
        &self.cfg
    }

    /// Obtains a model handle, retrying unavailable and rate-limited errors.
    pub async fn provision(
        &self,
        credentials: &Credentials,
        model_id: &str,
    ) -> Result<ModelHandle, ProvisionError> {
        self.observer.on_event(&TraceEvent::ProvisionStarted {
            model: model_id.to_string(),
        });

        let (result, attempts) = self.run(credentials, model_id).await;

        self.observer.on_event(&TraceEvent::ProvisionFinished {
            model: model_id.to_string(),
            attempts,
            ok: result.is_ok(),
        });
        result
    }

    async fn run(
        &self,
        credentials: &Credentials,
        model_id: &str,
    ) -> (Result<ModelHandle, ProvisionError>, usize) {
        let Some(api_key) = credentials.llm_key() else {
            return (
                Err(ProvisionError::Authentication(
                    "No Groq API key provided".to_string(),
                )),
                0,
            );
        };

        let max_attempts = self.cfg.max_attempts;
        for attempt in 1..=max_attempts {
            let err = match self.factory.create(api_key, model_id).await {
                Ok(handle) => {
                    log::debug!("Provisioned {model_id} on attempt {attempt}/{max_attempts}");
                    return (Ok(handle), attempt);
                }
                Err(err) => err,
            };

            let kind = ErrorKind::classify(&err);
            let message = err.to_string();
            log::debug!("Provision attempt {attempt}/{max_attempts} failed ({kind}): {message}");

            let outcome = match kind {
                ErrorKind::Unavailable | ErrorKind::RateLimited if attempt < max_attempts => {
                    self.progress.notify(&Notice::Retrying {
                        attempt,
                        max_attempts,
                        kind,
                        delay: self.cfg.retry_delay,
                    });
                    sleep(self.cfg.retry_delay).await;
                    continue;
                }
                ErrorKind::Unavailable => ProvisionError::ServiceUnavailable {
                    attempts: attempt,
                    last_message: message,
                },
                ErrorKind::RateLimited => ProvisionError::RateLimited {
                    attempts: attempt,
                    last_message: message,
                },
                ErrorKind::Unauthorized => ProvisionError::Authentication(message),
                ErrorKind::Other => ProvisionError::Provision(message),
            };
            return (Err(outcome), attempt);
        }

        (
            Err(ProvisionError::Provision(
                "unexpected retry-logic exhaustion".to_string(),
            )),
            max_attempts,
        )
    }
}
