use std::fmt;

use serde::Serialize;

/// Canonical identity of a team, as produced by [`normalize`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct TeamName(String);

impl TeamName {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TeamName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Canonicalize a raw team name from the schedule.
///
/// Schedules that already carry results append the score to the team name,
/// e.g. `BLACKBURN STINGERS U15 B1 (1)`. Everything from the first `" ("` on is
/// dropped and the remainder is upper-cased.
pub fn normalize(raw: &str) -> TeamName {
    let before = raw.split_once(" (").map(|(before, _)| before).unwrap_or(raw);
    TeamName(before.to_uppercase())
}

/// Append the normalized form of `raw` unless an equal entry (ignoring case) is
/// already present. Returns true when the list grew.
pub fn add_unique(list: &mut Vec<TeamName>, raw: &str) -> bool {
    let name = normalize(raw);
    // Entries are normalized, so they are already upper-cased.
    if list.contains(&name) {
        return false;
    }
    list.push(name);
    true
}
