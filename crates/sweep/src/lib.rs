//! Sweep engine: search-space enumeration, cheapest-offer selection, and
//! best-result tracking.

pub mod grid;
pub mod selector;
pub mod state;
pub mod tracker;

pub use grid::{GridPoint, SearchGrid};
pub use state::{BestState, StateStore};
pub use tracker::BestTracker;
