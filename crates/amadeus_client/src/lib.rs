//! Amadeus self-service API client.
//!
//! Authenticated REST access with lazy token refresh, bounded retries, and
//! a memoized airline-name directory.

pub mod airlines;
pub mod auth;
pub mod rest;
pub mod retry;

#[cfg(test)]
pub(crate) mod testutil;

pub use airlines::AirlineDirectory;
pub use auth::AmadeusAuth;
pub use rest::AmadeusRestClient;
