use std::time::Duration;

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use tracing::{error, info, info_span, instrument};

use crate::error::SourceError;
use crate::model::ttm::{TtmResponse, TtmScheduleRecord};
use crate::schedule::{ScheduleSet, ScheduleSource};

/// League schedule export on the TTM API (all divisions).
pub const DEFAULT_SCHEDULE_URL: &str = "https://api.off-iceoffice.ca/ooAPI/v1/schedules/games/?orgID=1567976101-7023700001&option1=88&option2=9999&option3=2";

/// Client for the TTM schedule endpoint.
#[derive(Debug, Clone)]
pub struct TtmClient {
    url: String,
    timeout: Duration,
}

impl TtmClient {
    pub fn new(url: impl Into<String>, timeout: Duration) -> Self {
        Self {
            url: url.into(),
            timeout,
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    /// GET the endpoint and return the raw response body.
    fn fetch_body(&self) -> Result<String, SourceError> {
        let agent: ureq::Agent = ureq::Agent::config_builder()
            .timeout_global(Some(self.timeout))
            .build()
            .into();
        let http_error = |source| SourceError::Http {
            url: self.url.clone(),
            source,
        };

        let response = {
            let _span = info_span!("ttm_fetch", url = %self.url).entered();
            agent.get(&self.url).call()
        };
        match response {
            Ok(response) => {
                info!(status = response.status().as_u16(), "Downloaded schedule");
                response.into_body().read_to_string().map_err(http_error)
            }
            Err(e) => {
                error!(error = %e, url = %self.url, "Schedule request failed");
                Err(http_error(e))
            }
        }
    }
}

impl ScheduleSource for TtmClient {
    #[instrument(level = "info", skip(self))]
    fn load(&self) -> Result<ScheduleSet, SourceError> {
        let body = self.fetch_body()?;
        let records = decode_envelope(&body)?;
        let schedule = ScheduleSet::from_rows(records.into_iter().map(TtmScheduleRecord::into_row));
        info!(games = schedule.len(), "Decoded TTM schedule");
        Ok(schedule)
    }
}

/// Unwrap a TTM response: parse the JSON shell, base64 decode its `data` field
/// and parse the result as a list of games.
#[instrument(level = "debug", skip(body), fields(bytes = body.len()))]
pub fn decode_envelope(body: &str) -> Result<Vec<TtmScheduleRecord>, SourceError> {
    let shell: TtmResponse = serde_json::from_str(body)?;
    let decoded = STANDARD.decode(shell.data.trim())?;
    let records: Vec<TtmScheduleRecord> = serde_json::from_slice(&decoded)?;
    Ok(records)
}
