use tracing::debug;

use crate::error::{SourceError, SwapError};
use crate::model::game::GameRecord;

/// Anything that can produce a schedule snapshot.
pub trait ScheduleSource {
    fn load(&self) -> Result<ScheduleSet, SourceError>;
}

/// Ordered, read-only collection of games.
#[derive(Clone, Debug, Default)]
pub struct ScheduleSet {
    games: Vec<GameRecord>,
}

impl ScheduleSet {
    /// Build from positional rows. Rows too short to hold a game are skipped.
    pub fn from_rows<I, R, S>(rows: I) -> Self
    where
        I: IntoIterator<Item = R>,
        R: AsRef<[S]>,
        S: AsRef<str>,
    {
        let games = rows
            .into_iter()
            .enumerate()
            .filter_map(|(line, row)| {
                let record = GameRecord::from_row(row.as_ref());
                if record.is_none() {
                    debug!(line, fields = row.as_ref().len(), "Skipping short schedule row");
                }
                record
            })
            .collect();
        Self { games }
    }

    /// First game with the given id.
    pub fn find_by_id(&self, game_id: &str) -> Result<&GameRecord, SwapError> {
        self.games
            .iter()
            .find(|g| g.game_id == game_id)
            .ok_or_else(|| SwapError::GameNotFound {
                game_id: game_id.to_string(),
            })
    }

    /// Games satisfying `predicate`, in their original order.
    pub fn filter<P>(&self, predicate: P) -> ScheduleSet
    where
        P: Fn(&GameRecord) -> bool,
    {
        Self {
            games: self.games.iter().filter(|g| predicate(g)).cloned().collect(),
        }
    }

    pub fn iter(&self) -> std::slice::Iter<'_, GameRecord> {
        self.games.iter()
    }

    pub fn records(&self) -> &[GameRecord] {
        &self.games
    }

    pub fn len(&self) -> usize {
        self.games.len()
    }

    pub fn is_empty(&self) -> bool {
        self.games.is_empty()
    }
}

impl<'a> IntoIterator for &'a ScheduleSet {
    type Item = &'a GameRecord;
    type IntoIter = std::slice::Iter<'a, GameRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.games.iter()
    }
}
