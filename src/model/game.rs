use chrono::NaiveDate;
use serde::Serialize;

use crate::normalize::{TeamName, normalize};

/// Calendar format of the date column in schedule exports.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Column positions of a schedule row.
pub const DIVISION: usize = 0;
pub const GAME_ID: usize = 1;
pub const DATE: usize = 2;
pub const TIME: usize = 3;
pub const VENUE: usize = 4;
pub const HOME_TEAM: usize = 5;
pub const AWAY_TEAM: usize = 6;
pub const GAME_STATUS: usize = 7;

/// Minimum number of fields a row needs to describe a game.
pub const REQUIRED_FIELDS: usize = 7;

/// One scheduled game.
#[derive(Clone, Debug, Serialize)]
pub struct GameRecord {
    pub division: String,
    pub game_id: String,
    /// Date column exactly as it appeared in the source.
    pub date_raw: String,
    /// Parsed date; `None` marks a malformed row (usually the header).
    pub date: Option<NaiveDate>,
    pub time: String,
    pub venue: String,
    pub home_team: String,
    pub away_team: String,
    pub status: Option<String>,
    #[serde(skip)]
    home: TeamName,
    #[serde(skip)]
    away: TeamName,
}

impl GameRecord {
    /// Build a record from a positional row. Returns `None` when the row has too
    /// few fields to be a game.
    pub fn from_row<S: AsRef<str>>(row: &[S]) -> Option<Self> {
        if row.len() < REQUIRED_FIELDS {
            return None;
        }
        let field = |idx: usize| row[idx].as_ref().to_string();
        let status = row
            .get(GAME_STATUS)
            .map(|s| s.as_ref().trim())
            .filter(|s| !s.is_empty())
            .map(str::to_string);

        Some(Self::new(
            field(DIVISION),
            field(GAME_ID),
            field(DATE),
            field(TIME),
            field(VENUE),
            field(HOME_TEAM),
            field(AWAY_TEAM),
            status,
        ))
    }

    #[allow(clippy::too_many_arguments)]
    pub fn new(
        division: String,
        game_id: String,
        date_raw: String,
        time: String,
        venue: String,
        home_team: String,
        away_team: String,
        status: Option<String>,
    ) -> Self {
        let date = NaiveDate::parse_from_str(date_raw.trim(), DATE_FORMAT).ok();
        let home = normalize(&home_team);
        let away = normalize(&away_team);
        Self {
            division,
            game_id,
            date_raw,
            date,
            time,
            venue,
            home_team,
            away_team,
            status,
            home,
            away,
        }
    }

    /// Normalized home team.
    pub fn home(&self) -> &TeamName {
        &self.home
    }

    /// Normalized away team.
    pub fn away(&self) -> &TeamName {
        &self.away
    }

    /// True if either side of this game is `name` (compared after normalization).
    pub fn contains_team(&self, name: &TeamName) -> bool {
        self.home == *name || self.away == *name
    }

    /// The positional fields of this record, status column omitted.
    pub fn columns(&self) -> [&str; REQUIRED_FIELDS] {
        [
            self.division.as_str(),
            self.game_id.as_str(),
            self.date_raw.as_str(),
            self.time.as_str(),
            self.venue.as_str(),
            self.home_team.as_str(),
            self.away_team.as_str(),
        ]
    }
}
