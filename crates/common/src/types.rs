//! Domain types shared across the bot.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

// ── Amadeus wire types ────────────────────────────────────────────────

/// Response body of GET /v2/shopping/flight-offers.
#[derive(Debug, Clone, Deserialize)]
pub struct FlightOffersResponse {
    #[serde(default)]
    pub data: Vec<FlightOffer>,
}

/// A single flight offer as returned by the search API.
///
/// Only the fields the bot reads are modelled; the rest of the (large)
/// provider record is ignored during deserialization.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FlightOffer {
    #[serde(default)]
    pub price: Option<OfferPrice>,
    #[serde(rename = "validatingAirlineCodes", default)]
    pub validating_airline_codes: Vec<String>,
    #[serde(default)]
    pub itineraries: Vec<Itinerary>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OfferPrice {
    /// Amadeus serialises totals as strings, e.g. "1187.40".
    #[serde(default)]
    pub total: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Itinerary {
    #[serde(default)]
    pub segments: Vec<Segment>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Segment {
    #[serde(rename = "carrierCode", default)]
    pub carrier_code: Option<String>,
}

impl FlightOffer {
    /// Parsed total price, or `None` when missing or non-numeric.
    pub fn total_price(&self) -> Option<f64> {
        self.price
            .as_ref()?
            .total
            .as_ref()?
            .trim()
            .parse::<f64>()
            .ok()
    }
}

/// Response body of the OAuth2 client-credentials exchange.
#[derive(Debug, Clone, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
    /// Token lifetime in seconds; the provider omits it occasionally.
    #[serde(default = "default_token_ttl")]
    pub expires_in: u64,
}

fn default_token_ttl() -> u64 {
    900
}

/// Response body of GET /v1/reference-data/airlines.
#[derive(Debug, Clone, Deserialize)]
pub struct AirlinesResponse {
    #[serde(default)]
    pub data: Vec<AirlineInfo>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AirlineInfo {
    #[serde(rename = "businessName", default)]
    pub business_name: Option<String>,
    #[serde(rename = "commonName", default)]
    pub common_name: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
}

// ── Search types ──────────────────────────────────────────────────────

/// One fully-specified round-trip search, built per grid point.
#[derive(Debug, Clone)]
pub struct SearchQuery {
    pub origin: String,
    pub destination: String,
    pub departure_date: NaiveDate,
    pub return_date: NaiveDate,
    pub adults: u32,
    pub currency: String,
    pub max_results: u32,
}

/// A priced, carrier-annotated fare extracted from one query's offer list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Candidate {
    pub total: f64,
    pub currency: String,
    pub origin: String,
    pub destination: String,
    pub departure_date: NaiveDate,
    pub return_date: NaiveDate,
    pub duration_days: i64,
    /// Ticketing carriers, order-preserving.
    pub validating: Vec<String>,
    /// Operating carriers across all segments, sorted.
    pub carriers: Vec<String>,
}
