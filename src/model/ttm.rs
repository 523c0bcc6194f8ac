use serde::{Deserialize, Serialize};

/// Response wrapper returned by the TTM API. `data` holds a base64 encoded
/// JSON document.
#[derive(Debug, Serialize, Deserialize)]
pub struct TtmResponse {
    pub id: i64,
    pub data: String,
}

/// One game as published by TTM.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TtmScheduleRecord {
    #[serde(default)]
    pub id: String,
    #[serde(rename = "gameID")]
    pub game_id: String,
    pub game_date: String,
    #[serde(default)]
    pub game_time: String,
    #[serde(default)]
    pub venue: String,
    pub division: String,
    pub home_team: String,
    pub away_team: String,
}

impl TtmScheduleRecord {
    /// Positional row in schedule column order.
    pub fn into_row(self) -> Vec<String> {
        vec![
            self.division,
            self.game_id,
            self.game_date,
            self.game_time,
            self.venue,
            self.home_team,
            self.away_team,
        ]
    }
}
