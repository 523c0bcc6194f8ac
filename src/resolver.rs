use std::collections::{BTreeSet, HashSet};

use chrono::NaiveDate;
use tracing::{debug, info, instrument};

use crate::division::{DivisionRegistry, DivisionRule};
use crate::error::SwapError;
use crate::model::game::GameRecord;
use crate::normalize::{TeamName, add_unique, normalize};
use crate::schedule::ScheduleSet;

/// Working state and result of one swap resolution.
#[derive(Debug, Clone)]
pub struct SwapRequest<'r> {
    pub game_id: String,
    pub date: NaiveDate,
    pub home: TeamName,
    pub away: TeamName,
    pub division: &'r DivisionRule,
    pub cutoff: NaiveDate,
    /// Dates on which either team of the target game already plays.
    pub exclude_dates: BTreeSet<NaiveDate>,
    /// Teams already playing on the target date, in first-seen order.
    pub exclude_teams: Vec<TeamName>,
    /// Number of games left after the cutoff and compatibility filters.
    pub universe_size: usize,
    pub candidates: ScheduleSet,
}

/// Find the games that could be swapped with `game_id`.
///
/// Only games strictly after `cutoff` are considered. Exclusions are computed
/// over the whole schedule so that games the target teams play in other
/// divisions still block their dates.
#[instrument(level = "info", skip(registry, schedule), fields(games = schedule.len()))]
pub fn resolve<'r>(
    registry: &'r DivisionRegistry,
    schedule: &ScheduleSet,
    game_id: &str,
    cutoff: NaiveDate,
) -> Result<SwapRequest<'r>, SwapError> {
    let target = schedule.find_by_id(game_id)?;
    let date = target.date.ok_or_else(|| SwapError::MalformedTargetDate {
        game_id: game_id.to_string(),
        date: target.date_raw.clone(),
    })?;
    let home = normalize(&target.home_team);
    let away = normalize(&target.away_team);
    let division = registry.resolve(&target.division)?;
    info!(
        %date,
        home = %home,
        away = %away,
        division = division.label(),
        swaps = division.description(),
        "Located target game"
    );

    if date <= cutoff {
        return Err(SwapError::PastCutoff {
            game_id: game_id.to_string(),
            date,
            cutoff,
        });
    }

    let universe = schedule.filter(|game| in_universe(game, division, cutoff));

    let mut exclude_dates = BTreeSet::new();
    let mut exclude_teams = Vec::new();
    for game in schedule {
        let Some(game_date) = game.date else {
            continue;
        };
        if game.contains_team(&home) || game.contains_team(&away) {
            debug!(game_id = %game.game_id, %game_date, "Swapping team plays");
            exclude_dates.insert(game_date);
        }
        if game_date == date {
            debug!(game_id = %game.game_id, "Playing on swap date");
            add_unique(&mut exclude_teams, &game.home_team);
            add_unique(&mut exclude_teams, &game.away_team);
        }
    }

    let busy: HashSet<&TeamName> = exclude_teams.iter().collect();
    let candidates = universe.filter(|game| {
        let excluded_date = game.date.is_some_and(|d| exclude_dates.contains(&d));
        !excluded_date && !busy.contains(game.home()) && !busy.contains(game.away())
    });

    info!(
        universe = universe.len(),
        excluded_dates = exclude_dates.len(),
        excluded_teams = exclude_teams.len(),
        candidates = candidates.len(),
        "Resolved swap candidates"
    );

    Ok(SwapRequest {
        game_id: game_id.to_string(),
        date,
        home,
        away,
        division,
        cutoff,
        exclude_dates,
        exclude_teams,
        universe_size: universe.len(),
        candidates,
    })
}

fn in_universe(game: &GameRecord, division: &DivisionRule, cutoff: NaiveDate) -> bool {
    let Some(date) = game.date else {
        debug!(row = %game.columns().join(","), "Unparsable date");
        return false;
    };
    if date <= cutoff {
        debug!(game_id = %game.game_id, "Before cutoff date");
        return false;
    }
    if !division.is_compatible(&game.division) {
        debug!(game_id = %game.game_id, division = %game.division, "Wrong division");
        return false;
    }
    true
}
