//! Best-result tracking across one sweep and against the persisted best.

use common::types::Candidate;

/// Tracks the cheapest qualifying candidate seen in the current sweep.
///
/// Starts empty; once a candidate is in, it is only ever replaced by a
/// strictly cheaper one, so the tracked price is non-increasing for the
/// life of the sweep.
#[derive(Debug)]
pub struct BestTracker {
    ceiling: f64,
    best: Option<Candidate>,
}

impl BestTracker {
    pub fn new(ceiling: f64) -> Self {
        Self {
            ceiling,
            best: None,
        }
    }

    /// Offer a candidate. Returns `true` when it became the new run best.
    ///
    /// Candidates above the price ceiling are discarded outright — the bot
    /// tracks fares at or below the target, never the global cheapest.
    pub fn observe(&mut self, candidate: Candidate) -> bool {
        if candidate.total > self.ceiling {
            return false;
        }

        let improves = match &self.best {
            Some(best) => candidate.total < best.total,
            None => true,
        };
        if improves {
            self.best = Some(candidate);
        }
        improves
    }

    pub fn best(&self) -> Option<&Candidate> {
        self.best.as_ref()
    }

    /// Whether the run best strictly beats the persisted best price. No
    /// prior best counts as an improvement; an empty run never does.
    pub fn beats(&self, prior_total: Option<f64>) -> bool {
        match (&self.best, prior_total) {
            (None, _) => false,
            (Some(_), None) => true,
            (Some(best), Some(prior)) => best.total < prior,
        }
    }

    pub fn into_best(self) -> Option<Candidate> {
        self.best
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn candidate(total: f64) -> Candidate {
        Candidate {
            total,
            currency: "USD".into(),
            origin: "EZE".into(),
            destination: "MAD".into(),
            departure_date: NaiveDate::from_ymd_opt(2026, 10, 1).unwrap(),
            return_date: NaiveDate::from_ymd_opt(2026, 10, 16).unwrap(),
            duration_days: 15,
            validating: vec!["IB".into()],
            carriers: vec!["IB".into()],
        }
    }

    #[test]
    fn above_ceiling_candidates_are_never_tracked() {
        let mut tracker = BestTracker::new(1250.0);
        assert!(!tracker.observe(candidate(1250.01)));
        assert!(tracker.best().is_none());

        // At the ceiling is still in budget.
        assert!(tracker.observe(candidate(1250.0)));
        assert_eq!(tracker.best().unwrap().total, 1250.0);
    }

    #[test]
    fn only_strictly_cheaper_candidates_replace_the_best() {
        let mut tracker = BestTracker::new(1250.0);
        assert!(tracker.observe(candidate(900.0)));
        assert!(!tracker.observe(candidate(900.0)));
        assert!(!tracker.observe(candidate(950.0)));
        assert!(tracker.observe(candidate(899.99)));
        assert_eq!(tracker.best().unwrap().total, 899.99);
    }

    #[test]
    fn tracked_price_is_non_increasing() {
        let mut tracker = BestTracker::new(1250.0);
        let mut last = f64::INFINITY;
        for total in [1100.0, 900.0, 1000.0, 850.0, 850.0, 1200.0] {
            tracker.observe(candidate(total));
            let current = tracker.best().unwrap().total;
            assert!(current <= last);
            last = current;
        }
        assert_eq!(last, 850.0);
    }

    #[test]
    fn beats_uses_strict_less_than() {
        let mut tracker = BestTracker::new(1250.0);
        tracker.observe(candidate(700.0));
        assert!(tracker.beats(Some(750.0)));

        let mut tracker = BestTracker::new(1250.0);
        tracker.observe(candidate(800.0));
        assert!(!tracker.beats(Some(750.0)));

        // Ties do not count as improvements.
        let mut tracker = BestTracker::new(1250.0);
        tracker.observe(candidate(750.0));
        assert!(!tracker.beats(Some(750.0)));
    }

    #[test]
    fn first_ever_discovery_always_improves() {
        let mut tracker = BestTracker::new(1250.0);
        tracker.observe(candidate(1249.0));
        assert!(tracker.beats(None));
    }

    #[test]
    fn empty_run_never_improves() {
        let tracker = BestTracker::new(1250.0);
        assert!(!tracker.beats(None));
        assert!(!tracker.beats(Some(750.0)));
    }
}
