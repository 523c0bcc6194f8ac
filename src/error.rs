use chrono::NaiveDate;
use thiserror::Error;

/// Errors produced while resolving a swap request. These are caused by the
/// caller's input and are reported verbatim.
#[derive(Debug, Error)]
pub enum SwapError {
    #[error("Game not found: {game_id}")]
    GameNotFound { game_id: String },

    #[error("Game {game_id} on {date} is not after the cutoff date {cutoff}")]
    PastCutoff {
        game_id: String,
        date: NaiveDate,
        cutoff: NaiveDate,
    },

    #[error("Division '{division}' matched {} registry entries ({})", .matches.len(), .matches.join(", "))]
    AmbiguousDivision {
        division: String,
        matches: Vec<String>,
    },

    #[error("Game {game_id} has an unparsable date: '{date}'")]
    MalformedTargetDate { game_id: String, date: String },
}

/// Errors raised while building the division registry. Any of these means the
/// static table is broken, so callers should stop at startup.
#[derive(Debug, Error)]
pub enum RegistryError {
    #[error("Invalid pattern for division {label}: {source}")]
    InvalidPattern {
        label: String,
        #[source]
        source: regex::Error,
    },

    #[error("Division {label} is matched by {} rules ({})", .matches.len(), .matches.join(", "))]
    NotExclusive { label: String, matches: Vec<String> },

    #[error("Division {label} is not swap-compatible with itself")]
    NotReflexive { label: String },
}

/// Failures fetching or decoding schedule data.
#[derive(Debug, Error)]
pub enum SourceError {
    #[error("Schedule request failed for {url}: {source}")]
    Http {
        url: String,
        #[source]
        source: ureq::Error,
    },

    #[error("I/O error reading schedule: {0}")]
    Io(#[from] std::io::Error),

    #[error("Schedule payload is not valid base64: {0}")]
    Base64(#[from] base64::DecodeError),

    #[error("Schedule payload is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// Failures delivering results.
#[derive(Debug, Error)]
pub enum ReportError {
    #[error("I/O error writing report: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to post to Discord webhook: {0}")]
    Webhook(String),
}

#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Swap(#[from] SwapError),

    #[error(transparent)]
    Registry(#[from] RegistryError),

    #[error(transparent)]
    Source(#[from] SourceError),

    #[error(transparent)]
    Report(#[from] ReportError),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl AppError {
    pub fn config_error(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }
}
