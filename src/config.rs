//! Configuration loader — merges env vars, .env file, and config.toml.

use std::path::Path;

use common::config::BotConfig;
use common::Error;

fn parse_i64(raw: &str, env_name: &str) -> Result<i64, Error> {
    raw.trim()
        .parse::<i64>()
        .map_err(|_| Error::Config(format!("{env_name} must be an integer")))
}

fn parse_u32(raw: &str, env_name: &str) -> Result<u32, Error> {
    raw.trim()
        .parse::<u32>()
        .map_err(|_| Error::Config(format!("{env_name} must be an integer >= 0")))
}

fn parse_f64(raw: &str, env_name: &str) -> Result<f64, Error> {
    raw.trim()
        .parse::<f64>()
        .map_err(|_| Error::Config(format!("{env_name} must be a number")))
}

fn is_iata(code: &str) -> bool {
    code.len() == 3 && code.chars().all(|c| c.is_ascii_uppercase())
}

fn validate_config(config: &BotConfig) -> Result<(), Error> {
    let mut issues: Vec<String> = Vec::new();
    let search = &config.search;

    if !is_iata(&search.origin) {
        issues.push(format!(
            "ORIGIN must be a 3-letter IATA code, got {:?}",
            search.origin
        ));
    }
    if search.destinations.is_empty() {
        issues.push("DESTINATIONS must contain at least one code".into());
    }
    for dest in &search.destinations {
        if !is_iata(dest) {
            issues.push(format!("destination {:?} is not a 3-letter IATA code", dest));
        }
    }
    if search.currency.len() != 3 {
        issues.push(format!(
            "CURRENCY must be a 3-letter ISO code, got {:?}",
            search.currency
        ));
    }
    if search.max_price <= 0.0 {
        issues.push("MAX_PRICE must be > 0".into());
    }
    if search.start_in_days < 0 {
        issues.push("START_IN_DAYS must be >= 0".into());
    }
    if search.range_days < 0 {
        issues.push("RANGE_DAYS must be >= 0".into());
    }
    if search.step_days <= 0 {
        issues.push("STEP_DAYS must be > 0".into());
    }
    if search.dur_min < 1 {
        issues.push("DUR_MIN must be >= 1".into());
    }
    if search.dur_min > search.dur_max {
        issues.push("DUR_MIN must be <= DUR_MAX".into());
    }
    if search.adults == 0 {
        issues.push("ADULTS must be > 0".into());
    }
    if search.max_results == 0 {
        issues.push("MAX must be > 0".into());
    }
    if config.state_file.trim().is_empty() {
        issues.push("STATE_FILE must not be empty".into());
    }

    if issues.is_empty() {
        Ok(())
    } else {
        Err(Error::Config(format!(
            "Invalid config:\n - {}",
            issues.join("\n - ")
        )))
    }
}

/// Load bot configuration from environment and optional config file.
pub fn load_config() -> Result<BotConfig, Error> {
    // 1. Load .env file from project root or parent directories.
    if let Err(e) = dotenvy::dotenv() {
        tracing::debug!("No .env file loaded: {}", e);
    }

    // 2. Start with defaults.
    let mut config = BotConfig::default();

    // 3. Try loading config.toml if it exists.
    let config_path = Path::new("config.toml");
    if config_path.exists() {
        let contents = std::fs::read_to_string(config_path)
            .map_err(|e| Error::Config(format!("Failed to read config.toml: {}", e)))?;
        config = toml::from_str(&contents)
            .map_err(|e| Error::Config(format!("Failed to parse config.toml: {}", e)))?;
    }

    // 4. Override with environment variables (highest priority).
    if let Ok(id) = std::env::var("AMADEUS_CLIENT_ID") {
        config.client_id = id.trim().to_string();
    }
    if let Ok(secret) = std::env::var("AMADEUS_CLIENT_SECRET") {
        config.client_secret = secret.trim().to_string();
    }
    if let Ok(env_name) = std::env::var("AMADEUS_ENV") {
        config.use_prod = env_name.trim().eq_ignore_ascii_case("prod");
    }
    if let Ok(token) = std::env::var("TELEGRAM_TOKEN") {
        config.telegram.token = token.trim().to_string();
    }
    if let Ok(chat_id) = std::env::var("TELEGRAM_CHAT_ID") {
        config.telegram.chat_id = chat_id.trim().to_string();
    }
    if let Ok(origin) = std::env::var("ORIGIN") {
        config.search.origin = origin.trim().to_uppercase();
    }
    if let Ok(currency) = std::env::var("CURRENCY") {
        config.search.currency = currency.trim().to_uppercase();
    }
    if let Ok(raw) = std::env::var("MAX_PRICE") {
        config.search.max_price = parse_f64(&raw, "MAX_PRICE")?;
    }
    if let Ok(raw) = std::env::var("DESTINATIONS") {
        config.search.destinations = raw
            .split(',')
            .map(|code| code.trim().to_uppercase())
            .filter(|code| !code.is_empty())
            .collect();
    }
    if let Ok(raw) = std::env::var("START_IN_DAYS") {
        config.search.start_in_days = parse_i64(&raw, "START_IN_DAYS")?;
    }
    if let Ok(raw) = std::env::var("RANGE_DAYS") {
        config.search.range_days = parse_i64(&raw, "RANGE_DAYS")?;
    }
    if let Ok(raw) = std::env::var("STEP_DAYS") {
        config.search.step_days = parse_i64(&raw, "STEP_DAYS")?;
    }
    if let Ok(raw) = std::env::var("DUR_MIN") {
        config.search.dur_min = parse_i64(&raw, "DUR_MIN")?;
    }
    if let Ok(raw) = std::env::var("DUR_MAX") {
        config.search.dur_max = parse_i64(&raw, "DUR_MAX")?;
    }
    if let Ok(raw) = std::env::var("ADULTS") {
        config.search.adults = parse_u32(&raw, "ADULTS")?;
    }
    if let Ok(raw) = std::env::var("MAX") {
        config.search.max_results = parse_u32(&raw, "MAX")?;
    }
    if let Ok(raw) = std::env::var("SLEEP") {
        let secs = parse_f64(&raw, "SLEEP")?;
        if secs < 0.0 {
            return Err(Error::Config("SLEEP must be a number >= 0".into()));
        }
        config.timing.query_delay_ms = (secs * 1000.0) as u64;
    }
    if let Ok(path) = std::env::var("STATE_FILE") {
        config.state_file = path.trim().to_string();
    }

    // 5. Validate required fields — fatal before any network activity.
    if config.client_id.is_empty() {
        return Err(Error::Config(
            "AMADEUS_CLIENT_ID is required (set in .env or environment)".into(),
        ));
    }
    if config.client_secret.is_empty() {
        return Err(Error::Config(
            "AMADEUS_CLIENT_SECRET is required (set in .env or environment)".into(),
        ));
    }

    validate_config(&config)?;

    Ok(config)
}
