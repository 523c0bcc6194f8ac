use chrono::NaiveDate;

use game_swap_finder::csv_file::{CsvFile, parse};
use game_swap_finder::discord::MESSAGE_LIMIT;
use game_swap_finder::division::DivisionRegistry;
use game_swap_finder::report::{self, SwapReport};
use game_swap_finder::resolver::resolve;
use game_swap_finder::schedule::{ScheduleSet, ScheduleSource};

fn cutoff() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 3, 1).unwrap()
}

#[test]
fn candidates_csv_has_header_and_rows() {
    let schedule = CsvFile::new("tests/schedule.csv").load().unwrap();
    let registry = DivisionRegistry::standard().unwrap();
    let request = resolve(&registry, &schedule, "HLU1301", cutoff()).unwrap();

    let csv = report::candidates_csv(&request);
    let rows = parse(&csv);

    assert_eq!(rows[0], ["Division", "Game ID", "Date", "Time", "Arena", "Home Team", "Away Team"]);
    assert_eq!(rows.len(), 1 + request.candidates.len());
    assert_eq!(rows[1][1], "HLU1501");
    // Score annotations are kept in the output; only comparisons use normalized names
    assert_eq!(rows[2][5], "GLOUCESTER RANGERS U15 B1 (3)");
}

#[test]
fn writes_candidates_to_file() {
    let schedule = CsvFile::new("tests/schedule.csv").load().unwrap();
    let registry = DivisionRegistry::standard().unwrap();
    let request = resolve(&registry, &schedule, "HLU1301", cutoff()).unwrap();
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join(report::default_output_name(&request.game_id));

    report::write_candidates(&request, &path).unwrap();

    assert!(path.ends_with("HLU1301.csv"));
    let text = std::fs::read_to_string(&path).unwrap();
    assert_eq!(text, report::candidates_csv(&request));
}

#[test]
fn summary_describes_target_and_result() {
    let schedule = CsvFile::new("tests/schedule.csv").load().unwrap();
    let registry = DivisionRegistry::standard().unwrap();
    let request = resolve(&registry, &schedule, "HLU1301", cutoff()).unwrap();

    let text = report::summary(&request);
    assert!(text.contains("Game HLU1301 on 2025-03-10"), "summary was: {text}");
    assert!(text.contains("GCTCOUGARS1 vs BLACKBURN STINGERS U13 A1"), "summary was: {text}");
    assert!(text.contains("U13 A -> U13 A, U15 A-B"), "summary was: {text}");
    assert!(text.contains("Found 2 potential swaps"), "summary was: {text}");
}

#[test]
fn chat_message_respects_limit() {
    let schedule = CsvFile::new("tests/schedule.csv").load().unwrap();
    let registry = DivisionRegistry::standard().unwrap();
    let request = resolve(&registry, &schedule, "HLU1301", cutoff()).unwrap();

    let full = report::chat_message(&request, 2000);
    assert!(full.contains("HLU1501") && full.contains("HLU1503"), "message was: {full}");

    let limit = report::summary(&request).len() + 20;
    let short = report::chat_message(&request, limit);
    assert!(short.ends_with("...and 2 more"), "message was: {short}");
    assert!(short.len() <= limit, "message was: {short}");
}

#[test]
fn report_serializes_for_lambda_response() {
    let schedule = CsvFile::new("tests/schedule.csv").load().unwrap();
    let registry = DivisionRegistry::standard().unwrap();
    let request = resolve(&registry, &schedule, "HLU1301", cutoff()).unwrap();

    let value = serde_json::to_value(SwapReport::from(&request)).unwrap();

    assert_eq!(value["division"], "U13 A");
    assert_eq!(value["exclude_dates"], serde_json::json!(["2025-03-10", "2025-03-14"]));
    assert_eq!(value["exclude_teams"][0], "GCTCOUGARS1");
    assert_eq!(value["candidates"][0]["game_id"], "HLU1501");
    assert_eq!(value["candidates"][1]["date"], "2025-03-15");
}

fn row(division: &str, id: &str, date: &str, home: &str, away: &str) -> Vec<String> {
    [division, id, date, "19:00", "Arena", home, away]
        .iter()
        .map(|s| s.to_string())
        .collect()
}

#[test]
fn chat_message_keeps_last_line_that_fits_exactly() {
    let schedule = ScheduleSet::from_rows(vec![
        row("U13 A", "G1", "2025-03-10", "A", "B"),
        row("U15 A", "G2", "2025-03-12", "C", "D"),
    ]);
    let registry = DivisionRegistry::standard().unwrap();
    let request = resolve(&registry, &schedule, "G1", cutoff()).unwrap();
    assert_eq!(request.candidates.len(), 1);

    let full = report::chat_message(&request, MESSAGE_LIMIT);
    let exact = report::chat_message(&request, full.len());

    assert_eq!(exact, full);
    assert!(exact.contains("G2"), "message was: {exact}");
    assert!(!exact.contains("more"), "message was: {exact}");

    // One character short, the candidate no longer fits
    let short = report::chat_message(&request, full.len() - 1);
    assert!(short.ends_with("...and 1 more"), "message was: {short}");
}

#[test]
fn chat_message_exact_fit_with_several_candidates() {
    let schedule = CsvFile::new("tests/schedule.csv").load().unwrap();
    let registry = DivisionRegistry::standard().unwrap();
    let request = resolve(&registry, &schedule, "HLU1301", cutoff()).unwrap();

    let full = report::chat_message(&request, MESSAGE_LIMIT);
    let exact = report::chat_message(&request, full.len());

    assert_eq!(exact, full);
    assert!(exact.contains("HLU1501") && exact.contains("HLU1503"), "message was: {exact}");
}
