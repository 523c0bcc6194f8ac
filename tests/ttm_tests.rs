use std::time::Duration;

use game_swap_finder::error::SourceError;
use game_swap_finder::schedule::ScheduleSet;
use game_swap_finder::ttm::{DEFAULT_SCHEDULE_URL, TtmClient, decode_envelope};

fn load_sample() -> String {
    std::fs::read_to_string("tests/ttm_response.json").expect("failed to read ttm_response.json")
}

#[test]
fn decodes_base64_envelope_in_order() {
    let records = decode_envelope(&load_sample()).expect("decode failed");

    let ids: Vec<&str> = records.iter().map(|r| r.game_id.as_str()).collect();
    assert_eq!(ids, ["HLU1301", "HLU1501", "HLU1502"]);
    assert_eq!(records[2].venue, "Bell Sensplex, Rink 2");
    assert_eq!(records[0].division, "U13 A");
}

#[test]
fn decoded_records_become_schedule_rows() {
    let records = decode_envelope(&load_sample()).unwrap();
    let schedule = ScheduleSet::from_rows(records.into_iter().map(|r| r.into_row()));

    let game = schedule.find_by_id("HLU1501").unwrap();
    assert_eq!(game.date_raw, "2025-03-12");
    assert!(game.date.is_some());
    assert_eq!(game.home_team, "ORLEANS BLUES U15 A1");
    assert_eq!(game.time, "19:30");
}

#[test]
fn rejects_bad_base64() {
    let body = r#"{"id": 1, "data": "not base64!!"}"#;
    assert!(matches!(decode_envelope(body), Err(SourceError::Base64(_))));
}

#[test]
fn rejects_bad_json() {
    assert!(matches!(decode_envelope("<html>"), Err(SourceError::Json(_))));

    // "e30=" is "{}", which is not a list of games
    let body = r#"{"id": 1, "data": "e30="}"#;
    assert!(matches!(decode_envelope(body), Err(SourceError::Json(_))));
}

#[test]
fn client_keeps_configured_url() {
    let client = TtmClient::new(DEFAULT_SCHEDULE_URL, Duration::from_secs(5));
    assert_eq!(client.url(), DEFAULT_SCHEDULE_URL);
    // Avoid network: don't call load here
}
