//! Retry policy for Amadeus requests.
//!
//! Bounded attempts with exponential backoff and jitter. Unauthorized
//! responses are retried immediately after a token refresh; throttling and
//! server errors back off; anything else goes back to the caller as-is.

use std::time::Duration;

use rand::Rng;

/// Default attempt budget for search requests.
pub const DEFAULT_BUDGET: u32 = 4;

/// Reduced budget for best-effort reference lookups.
pub const LOOKUP_BUDGET: u32 = 3;

/// Statuses worth backing off and retrying.
pub fn retryable_status(status: u16) -> bool {
    matches!(status, 429 | 500 | 502 | 503 | 504)
}

/// Backoff before retry `attempt` (1-based): `2^(attempt-1)` seconds plus
/// up to half a second of jitter.
pub fn backoff_delay(attempt: u32) -> Duration {
    let base = 1u64 << attempt.saturating_sub(1).min(16);
    let jitter = rand::thread_rng().gen_range(0.0..0.5);
    Duration::from_secs_f64(base as f64 + jitter)
}
