use std::fs;
use std::path::{Path, PathBuf};

use tracing::{info, instrument};

use crate::error::SourceError;
use crate::schedule::{ScheduleSet, ScheduleSource};

/// Column headers written above an exported schedule.
pub const SCHEDULE_HEADER: [&str; 7] = [
    "Division",
    "GameID",
    "Date",
    "Time",
    "Arena",
    "Home Team",
    "Away Team",
];

/// A schedule stored as a comma-delimited file, one game per line.
#[derive(Debug, Clone)]
pub struct CsvFile {
    path: PathBuf,
}

impl CsvFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl ScheduleSource for CsvFile {
    #[instrument(level = "info", skip(self), fields(path = %self.path.display()))]
    fn load(&self) -> Result<ScheduleSet, SourceError> {
        let text = fs::read_to_string(&self.path)?;
        let schedule = ScheduleSet::from_rows(parse(&text));
        info!(games = schedule.len(), "Loaded schedule file");
        Ok(schedule)
    }
}

/// Split comma-delimited text into rows of fields. Fields may be wrapped in
/// double quotes, in which case commas, line breaks and doubled quotes inside
/// are literal. Blank lines are skipped.
pub fn parse(text: &str) -> Vec<Vec<String>> {
    let mut rows = Vec::new();
    let mut row: Vec<String> = Vec::new();
    let mut field = String::new();
    let mut in_quotes = false;
    let mut quoted = false;
    let mut chars = text.chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            '"' if in_quotes => {
                if chars.peek() == Some(&'"') {
                    field.push('"');
                    chars.next();
                } else {
                    in_quotes = false;
                }
            }
            '"' if field.is_empty() => {
                in_quotes = true;
                quoted = true;
            }
            ',' if !in_quotes => {
                row.push(std::mem::take(&mut field));
                quoted = false;
            }
            '\r' if !in_quotes && chars.peek() == Some(&'\n') => {}
            '\n' if !in_quotes => {
                end_row(&mut rows, &mut row, &mut field, quoted);
                quoted = false;
            }
            _ => field.push(c),
        }
    }
    end_row(&mut rows, &mut row, &mut field, quoted);
    rows
}

fn end_row(rows: &mut Vec<Vec<String>>, row: &mut Vec<String>, field: &mut String, quoted: bool) {
    let blank = row.is_empty() && !quoted && field.trim().is_empty();
    if blank {
        field.clear();
        return;
    }
    row.push(std::mem::take(field));
    rows.push(std::mem::take(row));
}

/// Quote a field when it holds a delimiter, quote or line break.
pub fn escape_field(field: &str) -> String {
    if field.contains([',', '"', '\n', '\r']) {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}

/// One output line, terminated with `\n`.
pub fn format_row<S: AsRef<str>>(fields: &[S]) -> String {
    let mut line = fields
        .iter()
        .map(|f| escape_field(f.as_ref()))
        .collect::<Vec<_>>()
        .join(",");
    line.push('\n');
    line
}

/// Render a schedule in the same column layout it is read from, with a header.
pub fn schedule_csv(schedule: &ScheduleSet) -> String {
    let mut out = format_row(&SCHEDULE_HEADER);
    for game in schedule {
        out.push_str(&format_row(&game.columns()));
    }
    out
}

/// Write a schedule to `path` so it can be reloaded with [`CsvFile`].
#[instrument(level = "info", skip(schedule), fields(games = schedule.len()))]
pub fn save_schedule(schedule: &ScheduleSet, path: &Path) -> Result<(), std::io::Error> {
    fs::write(path, schedule_csv(schedule))
}
