//! Cheapest-offer selection, carrier extraction, and alert formatting.

use std::collections::{BTreeSet, HashSet};

use common::types::{Candidate, FlightOffer};

use crate::grid::GridPoint;

/// How many carrier codes are spelled out before collapsing to "+n more".
pub const MAX_LISTED_CARRIERS: usize = 5;

/// Pick the offer with the lowest parseable total price.
///
/// Offers whose price is missing or non-numeric are ignored; a provider
/// sending malformed rows must not sink the whole query.
pub fn pick_cheapest(offers: &[FlightOffer]) -> Option<&FlightOffer> {
    offers
        .iter()
        .filter_map(|offer| offer.total_price().map(|price| (offer, price)))
        .min_by(|a, b| a.1.partial_cmp(&b.1).unwrap_or(std::cmp::Ordering::Equal))
        .map(|(offer, _)| offer)
}

/// Validating carriers: order-preserving, deduplicated, uppercased.
pub fn validating_carriers(offer: &FlightOffer) -> Vec<String> {
    let mut seen = HashSet::new();
    offer
        .validating_airline_codes
        .iter()
        .map(|code| code.trim().to_uppercase())
        .filter(|code| !code.is_empty() && seen.insert(code.clone()))
        .collect()
}

/// Operating carriers found across every segment of every itinerary,
/// deduplicated and sorted.
pub fn operating_carriers(offer: &FlightOffer) -> Vec<String> {
    let mut codes = BTreeSet::new();
    for itinerary in &offer.itineraries {
        for segment in &itinerary.segments {
            if let Some(code) = &segment.carrier_code {
                let code = code.trim().to_uppercase();
                if !code.is_empty() {
                    codes.insert(code);
                }
            }
        }
    }
    codes.into_iter().collect()
}

/// Fold one grid point's cheapest offer into a [`Candidate`].
pub fn build_candidate(
    offer: &FlightOffer,
    point: &GridPoint,
    origin: &str,
    currency: &str,
) -> Option<Candidate> {
    let total = offer.total_price()?;
    Some(Candidate {
        total,
        currency: currency.to_string(),
        origin: origin.to_string(),
        destination: point.destination.clone(),
        departure_date: point.departure_date,
        return_date: point.return_date,
        duration_days: point.duration_days,
        validating: validating_carriers(offer),
        carriers: operating_carriers(offer),
    })
}

/// The carrier codes worth displaying: validating when present, operating
/// otherwise.
pub fn display_codes(candidate: &Candidate) -> &[String] {
    if candidate.validating.is_empty() {
        &candidate.carriers
    } else {
        &candidate.validating
    }
}

/// Render the carrier line for an alert message.
///
/// Up to [`MAX_LISTED_CARRIERS`] codes as `"Name (CODE)"`, bare code when
/// the name cannot be resolved; a trailing `"+n more"` when the list is
/// longer; `"N/A"` when there are no codes at all.
pub fn format_carrier_line<F>(candidate: &Candidate, mut resolve: F) -> String
where
    F: FnMut(&str) -> Option<String>,
{
    let codes = display_codes(candidate);
    if codes.is_empty() {
        return "N/A".to_string();
    }

    let mut parts: Vec<String> = codes
        .iter()
        .take(MAX_LISTED_CARRIERS)
        .map(|code| match resolve(code) {
            Some(name) => format!("{} ({})", name, code),
            None => code.clone(),
        })
        .collect();

    if codes.len() > MAX_LISTED_CARRIERS {
        parts.push(format!("+{} more", codes.len() - MAX_LISTED_CARRIERS));
    }

    parts.join(", ")
}
