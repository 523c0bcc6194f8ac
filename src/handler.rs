use std::sync::Arc;

use chrono::NaiveDate;
use lambda_runtime::{Error, LambdaEvent};
use serde::{Deserialize, Serialize};
use tracing::{error, info, instrument};

use crate::config::Settings;
use crate::discord::{Discord, MESSAGE_LIMIT};
use crate::division::DivisionRegistry;
use crate::error::AppError;
use crate::report::{SwapReport, chat_message};
use crate::resolver::resolve;
use crate::schedule::ScheduleSource;
use crate::ttm::TtmClient;

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    Test,
    Production,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Request {
    pub mode: Mode,
    pub game_id: String,
    /// Overrides `SWAP_CUTOFF_DAYS`.
    #[serde(default)]
    pub cutoff_days: Option<u64>,
    /// Explicit cutoff; takes precedence over `cutoff_days`.
    #[serde(default)]
    pub cutoff_date: Option<NaiveDate>,
    #[serde(default)]
    pub schedule_url: Option<String>,
    #[serde(default)]
    pub discord_hook_url: Option<String>,
    #[serde(default)]
    pub test_discord_hook_url: Option<String>,
}

impl Request {
    /// Webhook for the selected mode, if one was supplied.
    pub fn hook_url(&self) -> Option<&str> {
        match self.mode {
            Mode::Test => self.test_discord_hook_url.as_deref(),
            Mode::Production => self.discord_hook_url.as_deref(),
        }
    }

    /// Merge request overrides into the environment settings.
    pub fn apply(&self, mut settings: Settings) -> Result<Settings, AppError> {
        if let Some(url) = &self.schedule_url {
            settings.schedule_url = url.clone();
        }
        if let Some(days) = self.cutoff_days {
            settings.cutoff_days = days;
        }
        settings.validate()?;
        Ok(settings)
    }

    pub fn cutoff(&self, settings: &Settings, now: chrono::DateTime<chrono::Utc>) -> Result<NaiveDate, AppError> {
        match self.cutoff_date {
            Some(date) => Ok(date),
            None => settings.cutoff_date(now),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct Response {
    pub message: String,
    pub report: SwapReport,
}

#[instrument(skip(event, registry))]
pub async fn handler(event: LambdaEvent<Request>, registry: Arc<DivisionRegistry>) -> Result<Response, Error> {
    let payload = event.payload;
    let settings = payload.apply(Settings::from_env()?)?;
    let cutoff = payload.cutoff(&settings, chrono::Utc::now())?;
    info!(game_id = %payload.game_id, %cutoff, "Searching for swaps");

    let game_id = payload.game_id.clone();
    let hook_url = payload.hook_url().map(str::to_string);
    let timeout = settings.http_timeout();
    let client = TtmClient::new(settings.schedule_url.clone(), timeout);
    // The TTM fetch and the webhook post block, so both run on the blocking pool
    // with owned inputs.
    let (report, message) = tokio::task::spawn_blocking(move || -> Result<(SwapReport, String), AppError> {
        let schedule = client.load()?;
        let request = resolve(&registry, &schedule, &game_id, cutoff)?;
        let message = chat_message(&request, MESSAGE_LIMIT);
        if let Some(hook_url) = hook_url {
            if let Err(e) = Discord::new(hook_url, timeout).post(&message) {
                error!(error = %e, "Failed to post swap summary to Discord");
            }
        }
        Ok((SwapReport::from(&request), message))
    })
    .await??;

    Ok(Response { message, report })
}
