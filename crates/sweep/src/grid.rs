//! Search-space enumeration.
//!
//! Walks the cross-product of departure dates, trip durations, and
//! destinations. Departure dates step by `step_days` rather than daily to
//! bound total request volume.

use chrono::{Duration, NaiveDate};

use common::config::SearchConfig;

/// One point of the search grid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GridPoint {
    pub departure_date: NaiveDate,
    pub return_date: NaiveDate,
    pub duration_days: i64,
    pub destination: String,
}

/// The departure × duration × destination grid for one sweep.
#[derive(Debug, Clone)]
pub struct SearchGrid {
    start: NaiveDate,
    /// Last departure date probed, inclusive.
    end: NaiveDate,
    step_days: i64,
    dur_min: i64,
    dur_max: i64,
    destinations: Vec<String>,
}

impl SearchGrid {
    /// Build the grid anchored at `today`.
    pub fn new(cfg: &SearchConfig, today: NaiveDate) -> Self {
        let start = today + Duration::days(cfg.start_in_days);
        Self {
            start,
            end: start + Duration::days(cfg.range_days),
            step_days: cfg.step_days.max(1),
            dur_min: cfg.dur_min,
            dur_max: cfg.dur_max,
            destinations: cfg.destinations.clone(),
        }
    }

    pub fn first_departure(&self) -> NaiveDate {
        self.start
    }

    pub fn last_departure(&self) -> NaiveDate {
        self.end
    }

    /// Lazy walk in departure → duration → destination order. Every call
    /// starts a fresh pass over the same grid.
    pub fn points(&self) -> impl Iterator<Item = GridPoint> + '_ {
        let step = self.step_days;
        let end = self.end;
        let dur_min = self.dur_min;
        let dur_max = self.dur_max;

        let departures = std::iter::successors(Some(self.start), move |dep| {
            let next = *dep + Duration::days(step);
            (next <= end).then_some(next)
        });

        departures.flat_map(move |dep| {
            (dur_min..=dur_max).flat_map(move |duration| {
                self.destinations.iter().map(move |dest| GridPoint {
                    departure_date: dep,
                    return_date: dep + Duration::days(duration),
                    duration_days: duration,
                    destination: dest.clone(),
                })
            })
        })
    }

    /// Total number of grid points in one sweep.
    pub fn len(&self) -> usize {
        let departures = (self.end - self.start).num_days() / self.step_days + 1;
        let durations = (self.dur_max - self.dur_min + 1).max(0);
        departures as usize * durations as usize * self.destinations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cfg() -> SearchConfig {
        SearchConfig {
            destinations: vec!["MAD".into(), "BCN".into()],
            start_in_days: 30,
            range_days: 14,
            step_days: 7,
            dur_min: 15,
            dur_max: 16,
            ..SearchConfig::default()
        }
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn walks_departure_then_duration_then_destination() {
        let grid = SearchGrid::new(&cfg(), date(2026, 9, 1));
        let points: Vec<GridPoint> = grid.points().collect();

        // 3 departures × 2 durations × 2 destinations.
        assert_eq!(points.len(), 12);
        assert_eq!(points.len(), grid.len());

        assert_eq!(points[0].departure_date, date(2026, 10, 1));
        assert_eq!(points[0].duration_days, 15);
        assert_eq!(points[0].destination, "MAD");
        assert_eq!(points[1].destination, "BCN");
        assert_eq!(points[2].duration_days, 16);
        assert_eq!(points[4].departure_date, date(2026, 10, 8));
    }

    #[test]
    fn departure_bounds_are_inclusive() {
        let grid = SearchGrid::new(&cfg(), date(2026, 9, 1));
        assert_eq!(grid.first_departure(), date(2026, 10, 1));
        assert_eq!(grid.last_departure(), date(2026, 10, 15));

        let last = grid.points().last().unwrap();
        assert_eq!(last.departure_date, date(2026, 10, 15));
        assert_eq!(last.duration_days, 16);
        assert_eq!(last.return_date, date(2026, 10, 31));
    }

    #[test]
    fn step_that_overshoots_stops_at_the_boundary() {
        let mut c = cfg();
        c.range_days = 10; // start, start+7; start+14 is past the end
        let grid = SearchGrid::new(&c, date(2026, 9, 1));

        let departures: Vec<NaiveDate> = {
            let mut seen = Vec::new();
            for p in grid.points() {
                if !seen.contains(&p.departure_date) {
                    seen.push(p.departure_date);
                }
            }
            seen
        };
        assert_eq!(departures, vec![date(2026, 10, 1), date(2026, 10, 8)]);
    }

    #[test]
    fn return_date_is_departure_plus_duration() {
        let grid = SearchGrid::new(&cfg(), date(2026, 9, 1));
        for point in grid.points() {
            assert_eq!(
                point.return_date,
                point.departure_date + Duration::days(point.duration_days)
            );
        }
    }

    #[test]
    fn grid_is_restartable() {
        let grid = SearchGrid::new(&cfg(), date(2026, 9, 1));
        let first: Vec<GridPoint> = grid.points().collect();
        let second: Vec<GridPoint> = grid.points().collect();
        assert_eq!(first, second);
    }

    #[test]
    fn zero_range_probes_a_single_departure() {
        let mut c = cfg();
        c.range_days = 0;
        let grid = SearchGrid::new(&c, date(2026, 9, 1));
        assert_eq!(grid.len(), 4); // 1 departure × 2 durations × 2 destinations
        assert!(grid.points().all(|p| p.departure_date == date(2026, 10, 1)));
    }
}
