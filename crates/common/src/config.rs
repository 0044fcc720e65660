//! Bot configuration types.

use serde::{Deserialize, Serialize};

/// Top-level bot configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BotConfig {
    /// Amadeus API client id.
    #[serde(default)]
    pub client_id: String,

    /// Amadeus API client secret.
    #[serde(default)]
    pub client_secret: String,

    /// Use the production environment (true) or the free test one (false).
    #[serde(default)]
    pub use_prod: bool,

    /// Telegram delivery settings.
    #[serde(default)]
    pub telegram: TelegramConfig,

    /// Search-grid parameters.
    #[serde(default)]
    pub search: SearchConfig,

    /// Timing parameters.
    #[serde(default)]
    pub timing: TimingConfig,

    /// Path of the persisted best-fare file.
    #[serde(default = "default_state_file")]
    pub state_file: String,
}

/// Telegram credentials. Both empty means alerts are skipped with a warning.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TelegramConfig {
    #[serde(default)]
    pub token: String,
    #[serde(default)]
    pub chat_id: String,
}

/// Search-grid parameters.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchConfig {
    /// Origin airport, IATA code.
    #[serde(default = "default_origin")]
    pub origin: String,

    /// ISO currency code for quoted totals.
    #[serde(default = "default_currency")]
    pub currency: String,

    /// Price ceiling — candidates above this are never tracked.
    #[serde(default = "default_max_price")]
    pub max_price: f64,

    /// Destination airports, IATA codes.
    #[serde(default = "default_destinations")]
    pub destinations: Vec<String>,

    /// First probed departure is today plus this many days.
    #[serde(default = "default_start_in_days")]
    pub start_in_days: i64,

    /// Departures span this many days past the first one.
    #[serde(default = "default_range_days")]
    pub range_days: i64,

    /// Days between consecutive departure dates.
    #[serde(default = "default_step_days")]
    pub step_days: i64,

    /// Shortest trip duration probed, in days.
    #[serde(default = "default_dur_min")]
    pub dur_min: i64,

    /// Longest trip duration probed, in days.
    #[serde(default = "default_dur_max")]
    pub dur_max: i64,

    /// Passenger count sent with every query.
    #[serde(default = "default_adults")]
    pub adults: u32,

    /// Per-query result cap passed to the API.
    #[serde(default = "default_max_results")]
    pub max_results: u32,
}

/// Timing parameters.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimingConfig {
    /// Pause before every search query, in milliseconds. A self-imposed
    /// throttle against the provider's rate limits.
    #[serde(default = "default_query_delay_ms")]
    pub query_delay_ms: u64,
}

// ── Defaults ──────────────────────────────────────────────────────────

fn default_origin() -> String {
    "EZE".into()
}
fn default_currency() -> String {
    "USD".into()
}
fn default_max_price() -> f64 {
    1250.0
}
fn default_destinations() -> Vec<String> {
    vec!["MAD".into(), "BCN".into(), "LIS".into()]
}
fn default_start_in_days() -> i64 {
    30
}
fn default_range_days() -> i64 {
    180
}
fn default_step_days() -> i64 {
    7
}
fn default_dur_min() -> i64 {
    15
}
fn default_dur_max() -> i64 {
    25
}
fn default_adults() -> u32 {
    1
}
fn default_max_results() -> u32 {
    10
}
fn default_query_delay_ms() -> u64 {
    150
}
fn default_state_file() -> String {
    "state_best.json".into()
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            origin: default_origin(),
            currency: default_currency(),
            max_price: default_max_price(),
            destinations: default_destinations(),
            start_in_days: default_start_in_days(),
            range_days: default_range_days(),
            step_days: default_step_days(),
            dur_min: default_dur_min(),
            dur_max: default_dur_max(),
            adults: default_adults(),
            max_results: default_max_results(),
        }
    }
}

impl Default for TimingConfig {
    fn default() -> Self {
        Self {
            query_delay_ms: default_query_delay_ms(),
        }
    }
}

impl Default for BotConfig {
    fn default() -> Self {
        Self {
            client_id: String::new(),
            client_secret: String::new(),
            use_prod: false,
            telegram: TelegramConfig::default(),
            search: SearchConfig::default(),
            timing: TimingConfig::default(),
            state_file: default_state_file(),
        }
    }
}
