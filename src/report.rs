use std::fs;
use std::path::Path;

use serde::Serialize;
use tracing::{info, instrument};

use crate::csv_file::format_row;
use crate::error::ReportError;
use crate::model::game::GameRecord;
use crate::resolver::SwapRequest;

pub const CANDIDATE_HEADER: [&str; 7] = [
    "Division",
    "Game ID",
    "Date",
    "Time",
    "Arena",
    "Home Team",
    "Away Team",
];

/// Default output file for a swap search, e.g. `HLU1501.csv`.
pub fn default_output_name(game_id: &str) -> String {
    format!("{game_id}.csv")
}

/// Candidates as comma-delimited text with a header row.
pub fn candidates_csv(request: &SwapRequest<'_>) -> String {
    let mut out = format_row(&CANDIDATE_HEADER);
    for game in &request.candidates {
        out.push_str(&format_row(&game.columns()));
    }
    out
}

#[instrument(level = "info", skip(request), fields(game_id = %request.game_id, candidates = request.candidates.len()))]
pub fn write_candidates(request: &SwapRequest<'_>, path: &Path) -> Result<(), ReportError> {
    fs::write(path, candidates_csv(request))?;
    info!("Wrote swap candidates");
    Ok(())
}

/// Human readable description of the target game and the outcome.
pub fn summary(request: &SwapRequest<'_>) -> String {
    format!(
        "Game {} on {}: {} vs {}\nDivision swaps: {}\nFound {} potential swaps after {}",
        request.game_id,
        request.date,
        request.home,
        request.away,
        request.division.description(),
        request.candidates.len(),
        request.cutoff,
    )
}

/// Summary followed by one line per candidate, trimmed to at most `limit`
/// characters so it fits in a chat message.
pub fn chat_message(request: &SwapRequest<'_>, limit: usize) -> String {
    let mut message = summary(request);
    let total = request.candidates.len();
    for (shown, game) in request.candidates.iter().enumerate() {
        let line = format!(
            "\n{} {} {} {} vs {} ({})",
            game.game_id, game.date_raw, game.time, game.home_team, game.away_team, game.venue
        );
        let more = format!("\n...and {} more", total - shown);
        // The last line needs no room for a trailing "more" marker.
        let reserve = if shown + 1 < total { more.len() } else { 0 };
        if message.len() + line.len() + reserve > limit {
            message.push_str(&more);
            break;
        }
        message.push_str(&line);
    }
    message
}

/// Serializable view of a resolution, used by the Lambda response.
#[derive(Debug, Clone, Serialize)]
pub struct SwapReport {
    pub game_id: String,
    pub date: chrono::NaiveDate,
    pub home: String,
    pub away: String,
    pub division: String,
    pub swaps: String,
    pub cutoff: chrono::NaiveDate,
    pub exclude_dates: Vec<chrono::NaiveDate>,
    pub exclude_teams: Vec<String>,
    pub candidates: Vec<GameRecord>,
}

impl From<&SwapRequest<'_>> for SwapReport {
    fn from(request: &SwapRequest<'_>) -> Self {
        Self {
            game_id: request.game_id.clone(),
            date: request.date,
            home: request.home.to_string(),
            away: request.away.to_string(),
            division: request.division.label().to_string(),
            swaps: request.division.description().to_string(),
            cutoff: request.cutoff,
            exclude_dates: request.exclude_dates.iter().copied().collect(),
            exclude_teams: request.exclude_teams.iter().map(ToString::to_string).collect(),
            candidates: request.candidates.records().to_vec(),
        }
    }
}
