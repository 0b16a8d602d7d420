//! Groq service status lookup from its public Statuspage feed.

use std::time::Duration;

use serde::Deserialize;

pub const GROQ_STATUS_URL: &str = "https://groqstatus.com/api/v2/status.json";

const STATUS_TIMEOUT: Duration = Duration::from_secs(5);
const UNKNOWN_INDICATOR: &str = "unknown";
const UNKNOWN_DESCRIPTION: &str = "Could not determine service status";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceStatus {
    /// Statuspage indicator: `none`, `minor`, `major`, `critical` or `unknown`.
    pub indicator: String,
    pub description: String,
    pub is_operational: bool,
}

impl ServiceStatus {
    fn unknown() -> Self {
        Self {
            indicator: UNKNOWN_INDICATOR.to_string(),
            description: UNKNOWN_DESCRIPTION.to_string(),
            is_operational: false,
        }
    }
}

#[derive(Deserialize)]
struct StatusPage {
    status: StatusBody,
}

#[derive(Deserialize)]
struct StatusBody {
    indicator: String,
    description: String,
}

/// Fetches the current status. Never fails: any problem reads as `unknown`.
pub async fn check_groq_status(client: &reqwest::Client, url: &str) -> ServiceStatus {
    match fetch_status(client, url).await {
        Ok(page) => ServiceStatus {
            is_operational: page.status.indicator == "none",
            indicator: page.status.indicator,
            description: page.status.description,
        },
        Err(e) => {
            log::debug!("status check against {url} failed: {e}");
            ServiceStatus::unknown()
        }
    }
}

async fn fetch_status(client: &reqwest::Client, url: &str) -> Result<StatusPage, reqwest::Error> {
    client
        .get(url)
        .timeout(STATUS_TIMEOUT)
        .send()
        .await?
        .error_for_status()?
        .json::<StatusPage>()
        .await
}
