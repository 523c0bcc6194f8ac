use std::path::PathBuf;
use std::process::ExitCode;

use chrono::NaiveDate;
use clap::Parser;
use game_swap_finder::config::Settings;
use game_swap_finder::csv_file::{self, CsvFile};
use game_swap_finder::division::DivisionRegistry;
use game_swap_finder::error::{AppError, ReportError};
use game_swap_finder::logging;
use game_swap_finder::report;
use game_swap_finder::resolver::resolve;
use game_swap_finder::schedule::{ScheduleSet, ScheduleSource};
use game_swap_finder::ttm::TtmClient;
use tracing::error;

/// Find games that could be swapped with a scheduled game.
///
/// Downloads the league schedule (or reads a saved copy), keeps games in
/// divisions allowed to swap with the target's division, and drops every game
/// that would clash with the target teams or with teams already playing on the
/// target date. Results are printed and written to a CSV file.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Id of the game to swap (e.g. HLU1501)
    game_id: String,

    /// Read the schedule from a saved CSV file instead of downloading it
    #[arg(long, value_name = "PATH")]
    schedule_file: Option<PathBuf>,

    /// Save the downloaded schedule to this CSV file
    #[arg(long, value_name = "PATH", conflicts_with = "schedule_file")]
    save_schedule: Option<PathBuf>,

    /// Where to write the swap candidates [default: <GAME_ID>.csv]
    #[arg(short, long, value_name = "PATH")]
    output: Option<PathBuf>,

    /// Ignore games on or before today plus this many days [env: SWAP_CUTOFF_DAYS]
    #[arg(long, value_name = "DAYS")]
    cutoff_days: Option<u64>,

    /// Ignore games on or before this date (YYYY-MM-DD); overrides --cutoff-days
    #[arg(long, value_name = "DATE")]
    cutoff_date: Option<NaiveDate>,

    /// Schedule endpoint to download from [env: SWAP_SCHEDULE_URL]
    #[arg(long, value_name = "URL")]
    schedule_url: Option<String>,

    /// Log every filtering decision
    #[arg(short, long)]
    debug: bool,
}

fn main() -> ExitCode {
    let args = Args::parse();
    logging::init_cli(args.debug);

    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!(error = %e, "Swap search failed");
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run(args: &Args) -> Result<(), AppError> {
    let registry = DivisionRegistry::standard()?;

    let mut settings = Settings::from_env()?;
    if let Some(url) = &args.schedule_url {
        settings.schedule_url = url.clone();
    }
    if let Some(days) = args.cutoff_days {
        settings.cutoff_days = days;
    }
    settings.validate()?;

    let cutoff = match args.cutoff_date {
        Some(date) => date,
        None => settings.cutoff_date(chrono::Utc::now())?,
    };

    let schedule = load_schedule(args, &settings)?;
    let request = resolve(&registry, &schedule, &args.game_id, cutoff)?;

    println!("{}", report::summary(&request));
    let dates = request
        .exclude_dates
        .iter()
        .map(|d| d.to_string())
        .collect::<Vec<_>>();
    println!("Excluded dates: {}", dates.join(", "));
    let teams = request
        .exclude_teams
        .iter()
        .map(|t| t.as_str())
        .collect::<Vec<_>>();
    println!("Teams playing on {}: {}", request.date, teams.join(", "));
    for game in &request.candidates {
        println!("{}", game.columns().join(","));
    }

    let output = args
        .output
        .clone()
        .unwrap_or_else(|| PathBuf::from(report::default_output_name(&request.game_id)));
    report::write_candidates(&request, &output)?;
    println!(
        "Recorded {} potential matches to {}",
        request.candidates.len(),
        output.display()
    );
    Ok(())
}

fn load_schedule(args: &Args, settings: &Settings) -> Result<ScheduleSet, AppError> {
    if let Some(path) = &args.schedule_file {
        return Ok(CsvFile::new(path.clone()).load()?);
    }

    let schedule = TtmClient::new(settings.schedule_url.clone(), settings.http_timeout()).load()?;
    if let Some(path) = &args.save_schedule {
        csv_file::save_schedule(&schedule, path).map_err(ReportError::from)?;
    }
    Ok(schedule)
}
