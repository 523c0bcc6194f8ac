use std::time::Duration;

use tracing::{error, info};

use crate::error::ReportError;

/// Discord rejects message content longer than this.
pub const MESSAGE_LIMIT: usize = 2000;

/// Discord webhook client for announcing swap candidates.
#[derive(Debug, Clone)]
pub struct Discord {
    hook_url: String,
    timeout: Duration,
}

impl Discord {
    pub fn new(hook_url: String, timeout: Duration) -> Self {
        Self { hook_url, timeout }
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Post a plain text message to the webhook, giving up after the configured timeout.
    pub fn post(&self, content: &str) -> Result<(), ReportError> {
        let agent: ureq::Agent = ureq::Agent::config_builder()
            .timeout_global(Some(self.timeout))
            .build()
            .into();
        let payload = serde_json::json!({ "content": content });
        match agent.post(&self.hook_url).send_json(payload) {
            Ok(resp) => {
                info!(status = resp.status().as_u16(), "Posted swap summary to Discord webhook");
                Ok(())
            }
            Err(e) => {
                error!(error = %e, timeout_secs = self.timeout.as_secs(), "Failed to post to Discord webhook");
                Err(ReportError::Webhook(e.to_string()))
            }
        }
    }
}
