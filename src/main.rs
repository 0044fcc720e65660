//! fare-bot: Amadeus cheap-fare discovery and alerting.
//!
//! Single-binary Tokio application that:
//! 1. Walks a departure × duration × destination search grid
//! 2. Queries Amadeus flight-offers for each grid point
//! 3. Tracks the cheapest qualifying fare of the sweep
//! 4. Compares it against the persisted historical best
//! 5. Sends a Telegram alert only when the best improved

mod config;

use std::collections::HashMap;
use std::time::Duration;

use chrono::{Local, SecondsFormat, Utc};
use clap::Parser;
use tokio::time::sleep;
use tracing::{error, info, warn};

use amadeus_client::{AirlineDirectory, AmadeusRestClient};
use common::types::{Candidate, FlightOffersResponse, SearchQuery};
use notify::TelegramNotifier;
use sweep::selector;
use sweep::{BestState, BestTracker, SearchGrid, StateStore};

/// Amadeus cheap-fare alert bot.
#[derive(Parser)]
#[command(name = "fare-bot", about = "Amadeus cheap-fare alert bot")]
struct Cli {
    /// Just exchange credentials for a token and exit.
    #[arg(long)]
    check_auth: bool,

    /// Run the full sweep but skip the state write and the alert.
    #[arg(long)]
    dry_run: bool,
}

#[tokio::main]
async fn main() {
    // Initialize logging.
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "fare_bot=info,amadeus_client=info,sweep=info,notify=info".into()
            }),
        )
        .with_target(true)
        .init();

    let cli = Cli::parse();

    info!("✈️  Fare bot starting up...");

    // Load configuration.
    let cfg = match config::load_config() {
        Ok(c) => c,
        Err(e) => {
            error!("Configuration error: {}", e);
            std::process::exit(1);
        }
    };

    let env_label = if cfg.use_prod { "PRODUCTION" } else { "TEST" };
    info!("Environment: {}", env_label);

    let client = AmadeusRestClient::new(&cfg.client_id, &cfg.client_secret, cfg.use_prod);

    // ── Check-auth mode ──────────────────────────────────────────────
    if cli.check_auth {
        info!("Running auth check...");
        match client.auth().bearer().await {
            Ok(_) => info!("✅ Auth successful, token issued"),
            Err(e) => {
                error!("❌ Auth check failed: {}", e);
                std::process::exit(1);
            }
        }
        return;
    }

    let airlines = AirlineDirectory::new(client.clone());
    let notifier = TelegramNotifier::new(&cfg.telegram);
    let store = StateStore::new(&cfg.state_file);
    let prior = store.load();

    let today = Local::now().date_naive();
    let grid = SearchGrid::new(&cfg.search, today);

    info!(
        "Searching {} -> {} destinations | {}..{} | dur={}-{}d | ceiling={} {} | {} queries | env={}",
        cfg.search.origin,
        cfg.search.destinations.len(),
        grid.first_departure(),
        grid.last_departure(),
        cfg.search.dur_min,
        cfg.search.dur_max,
        cfg.search.max_price,
        cfg.search.currency,
        grid.len(),
        env_label,
    );

    let mut tracker = BestTracker::new(cfg.search.max_price);
    let delay = Duration::from_millis(cfg.timing.query_delay_ms);

    for point in grid.points() {
        // Self-imposed throttle against the provider's rate limits.
        if !delay.is_zero() {
            sleep(delay).await;
        }

        let query = SearchQuery {
            origin: cfg.search.origin.clone(),
            destination: point.destination.clone(),
            departure_date: point.departure_date,
            return_date: point.return_date,
            adults: cfg.search.adults,
            currency: cfg.search.currency.clone(),
            max_results: cfg.search.max_results,
        };

        let resp = match client.flight_offers(&query).await {
            Ok(Some(resp)) => resp,
            // Transport gave up on this grid point; move on.
            Ok(None) => continue,
            Err(e) => {
                error!("Auth failure, aborting sweep: {}", e);
                std::process::exit(1);
            }
        };

        if !resp.status().is_success() {
            let status = resp.status().as_u16();
            let body = resp.text().await.unwrap_or_default();
            let snippet: String = body.chars().take(140).collect();
            warn!(
                "FAIL {} {}->{} {}/{}: {}",
                status,
                query.origin,
                query.destination,
                query.departure_date,
                query.return_date,
                snippet,
            );
            continue;
        }

        let offers: FlightOffersResponse = match resp.json().await {
            Ok(body) => body,
            Err(e) => {
                warn!(
                    "Bad offer payload for {}->{}: {}",
                    query.origin, query.destination, e
                );
                continue;
            }
        };

        let Some(cheapest) = selector::pick_cheapest(&offers.data) else {
            continue;
        };
        let Some(candidate) =
            selector::build_candidate(cheapest, &point, &cfg.search.origin, &cfg.search.currency)
        else {
            continue;
        };

        if tracker.observe(candidate) {
            if let Some(best) = tracker.best() {
                info!(
                    "NEW BEST: {:.2} {} | {} -> {} ({}d) {}->{} | validating={:?} | carriers={:?}",
                    best.total,
                    best.currency,
                    best.departure_date,
                    best.return_date,
                    best.duration_days,
                    best.origin,
                    best.destination,
                    best.validating,
                    best.carriers,
                );
            }
        }
    }

    finish_sweep(tracker, prior, &store, &airlines, &notifier, cli.dry_run).await;

    info!("Sweep complete.");
}

/// Compare the run best against the persisted best; persist and alert only
/// on a strict improvement.
async fn finish_sweep(
    tracker: BestTracker,
    prior: BestState,
    store: &StateStore,
    airlines: &AirlineDirectory,
    notifier: &TelegramNotifier,
    dry_run: bool,
) {
    let improved = tracker.beats(prior.best_total);

    let Some(best) = tracker.into_best() else {
        info!("Nothing found at or below the ceiling in this range.");
        return;
    };

    if !improved {
        info!(
            "Found {:.2} {} but it does not beat the stored best ({:?}).",
            best.total, best.currency, prior.best_total
        );
        return;
    }

    let message = alert_message(&best, airlines).await;

    if dry_run {
        info!(
            "Dry-run: would persist {:.2} {} and send:\n{}",
            best.total, best.currency, message
        );
        return;
    }

    let state = BestState {
        best_total: Some(best.total),
        best_offer: Some(best.clone()),
        updated_at: Some(Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true)),
    };
    match store.save(&state) {
        Ok(()) => info!("Best fare saved to {}", store.path().display()),
        Err(e) => error!(
            "Failed to persist best state to {}: {}",
            store.path().display(),
            e
        ),
    }

    notifier.send(&message).await;
}

/// Build the alert text, resolving carrier names up front so the formatter
/// itself stays synchronous.
async fn alert_message(best: &Candidate, airlines: &AirlineDirectory) -> String {
    let mut names: HashMap<String, Option<String>> = HashMap::new();
    for code in selector::display_codes(best)
        .iter()
        .take(selector::MAX_LISTED_CARRIERS)
    {
        names.insert(code.clone(), airlines.name(code).await);
    }
    let carrier_line =
        selector::format_carrier_line(best, |code| names.get(code).cloned().flatten());

    format!(
        "✈️ Fare alert\n{} → {} (round trip)\nDepart: {} | Return: {} ({} days)\nTotal: {:.2} {}\nAirline(s): {}\n",
        best.origin,
        best.destination,
        best.departure_date,
        best.return_date,
        best.duration_days,
        best.total,
        best.currency,
        carrier_line,
    )
}
