use std::time::Duration;

use chrono::{DateTime, Days, NaiveDate, Utc};
use chrono_tz::Tz;

use crate::error::AppError;
use crate::ttm::DEFAULT_SCHEDULE_URL;

pub const DEFAULT_CUTOFF_DAYS: u64 = 10;
pub const DEFAULT_TIMEZONE: Tz = chrono_tz::America::Toronto;
pub const DEFAULT_HTTP_TIMEOUT_SECONDS: u64 = 30;

/// Runtime settings shared by the Lambda and the command line tool.
///
/// # Environment Variables
/// - `SWAP_SCHEDULE_URL` - TTM schedule endpoint
/// - `SWAP_CUTOFF_DAYS` - games on or before today plus this many days are ignored (default: 10)
/// - `SWAP_TIMEZONE` - IANA time zone used to decide what "today" is (default: America/Toronto)
/// - `SWAP_HTTP_TIMEOUT` - HTTP timeout in seconds (default: 30)
#[derive(Debug, Clone)]
pub struct Settings {
    pub schedule_url: String,
    pub cutoff_days: u64,
    pub timezone: Tz,
    pub http_timeout_seconds: u64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            schedule_url: DEFAULT_SCHEDULE_URL.to_string(),
            cutoff_days: DEFAULT_CUTOFF_DAYS,
            timezone: DEFAULT_TIMEZONE,
            http_timeout_seconds: DEFAULT_HTTP_TIMEOUT_SECONDS,
        }
    }
}

impl Settings {
    pub fn from_env() -> Result<Self, AppError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build settings from an arbitrary key lookup, starting from the defaults.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, AppError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut settings = Self::default();

        if let Some(url) = lookup("SWAP_SCHEDULE_URL").filter(|s| !s.trim().is_empty()) {
            settings.schedule_url = url;
        }
        if let Some(days) = lookup("SWAP_CUTOFF_DAYS") {
            settings.cutoff_days = days.trim().parse().map_err(|_| {
                AppError::config_error(format!("SWAP_CUTOFF_DAYS must be a non-negative integer, got '{days}'"))
            })?;
        }
        if let Some(tz) = lookup("SWAP_TIMEZONE") {
            settings.timezone = tz
                .trim()
                .parse()
                .map_err(|_| AppError::config_error(format!("Unknown time zone '{tz}'")))?;
        }
        if let Some(timeout) = lookup("SWAP_HTTP_TIMEOUT") {
            settings.http_timeout_seconds = timeout
                .trim()
                .parse()
                .ok()
                .filter(|t| *t > 0)
                .ok_or_else(|| {
                    AppError::config_error(format!("SWAP_HTTP_TIMEOUT must be a positive integer, got '{timeout}'"))
                })?;
        }

        settings.validate()?;
        Ok(settings)
    }

    pub fn validate(&self) -> Result<(), AppError> {
        if !(self.schedule_url.starts_with("https://") || self.schedule_url.starts_with("http://")) {
            return Err(AppError::config_error(format!(
                "Schedule URL must start with http:// or https://, got '{}'",
                self.schedule_url
            )));
        }
        Ok(())
    }

    pub fn http_timeout(&self) -> Duration {
        Duration::from_secs(self.http_timeout_seconds)
    }

    /// Today's date in the league time zone plus `cutoff_days`.
    pub fn cutoff_date(&self, now: DateTime<Utc>) -> Result<NaiveDate, AppError> {
        cutoff_from(now.with_timezone(&self.timezone).date_naive(), self.cutoff_days)
    }
}

pub fn cutoff_from(today: NaiveDate, days: u64) -> Result<NaiveDate, AppError> {
    today
        .checked_add_days(Days::new(days))
        .ok_or_else(|| AppError::config_error(format!("Cutoff of {days} days after {today} is out of range")))
}
