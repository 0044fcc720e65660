//! REST client for the Amadeus self-service APIs.
//!
//! Every request goes through a bounded retry loop: 401 triggers a token
//! refresh and an immediate retry, throttling and server errors back off
//! exponentially, and transport failures degrade to `Ok(None)` once the
//! budget is spent so one dead query never aborts a sweep.

use std::sync::Arc;

use reqwest::Method;
use tracing::{debug, warn};

use common::types::SearchQuery;
use common::Error;

use crate::auth::AmadeusAuth;
use crate::retry;

const OFFERS_PATH: &str = "/v2/shopping/flight-offers";

/// Async REST client for the Amadeus API.
#[derive(Debug, Clone)]
pub struct AmadeusRestClient {
    client: reqwest::Client,
    auth: Arc<AmadeusAuth>,
    base_url: String,
}

impl AmadeusRestClient {
    /// Create a new REST client.
    ///
    /// * `use_prod` — if true, points to `https://api.amadeus.com`;
    ///   otherwise the free test environment.
    pub fn new(client_id: &str, client_secret: &str, use_prod: bool) -> Self {
        let base_url = if use_prod {
            "https://api.amadeus.com".to_string()
        } else {
            "https://test.api.amadeus.com".to_string()
        };
        Self::with_base_url(&base_url, client_id, client_secret)
    }

    /// Point the client at a custom base URL (tests, proxies).
    pub fn with_base_url(base_url: &str, client_id: &str, client_secret: &str) -> Self {
        let client = reqwest::Client::builder()
            .pool_max_idle_per_host(4)
            .timeout(std::time::Duration::from_secs(30))
            .build()
            .expect("failed to build reqwest client");

        let auth = Arc::new(AmadeusAuth::new(
            client.clone(),
            base_url,
            client_id,
            client_secret,
        ));

        Self {
            client,
            auth,
            base_url: base_url.to_string(),
        }
    }

    /// The credential cache backing this client.
    pub fn auth(&self) -> &AmadeusAuth {
        &self.auth
    }

    /// URL helper.
    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Issue an authenticated request with the default retry budget.
    pub async fn request(
        &self,
        method: Method,
        path: &str,
        params: &[(&str, String)],
    ) -> Result<Option<reqwest::Response>, Error> {
        self.request_with_budget(method, path, params, retry::DEFAULT_BUDGET)
            .await
    }

    /// Same as [`request`](Self::request) with an explicit attempt budget.
    ///
    /// `Ok(None)` means every attempt died in transport; the caller should
    /// skip this query and move on. Any HTTP response — success or not —
    /// is returned as-is once retries are exhausted or the status is not
    /// retryable; classifying it is the caller's job. The only `Err` path
    /// is a failed token exchange.
    pub async fn request_with_budget(
        &self,
        method: Method,
        path: &str,
        params: &[(&str, String)],
        budget: u32,
    ) -> Result<Option<reqwest::Response>, Error> {
        for attempt in 1..=budget {
            let token = self.auth.bearer().await?;

            let result = self
                .client
                .request(method.clone(), self.url(path))
                .bearer_auth(token)
                .query(params)
                .send()
                .await;

            match result {
                Ok(resp) => {
                    let status = resp.status().as_u16();

                    if status == 401 && attempt < budget {
                        debug!(
                            "401 on {} (attempt {}/{}), refreshing token",
                            path, attempt, budget
                        );
                        self.auth.invalidate().await;
                        continue;
                    }

                    if retry::retryable_status(status) && attempt < budget {
                        let wait = retry::backoff_delay(attempt);
                        warn!(
                            "HTTP {} {} (retry {}/{}), waiting {:.1}s",
                            status,
                            path,
                            attempt,
                            budget,
                            wait.as_secs_f64()
                        );
                        tokio::time::sleep(wait).await;
                        continue;
                    }

                    return Ok(Some(resp));
                }
                Err(e) => {
                    if attempt == budget {
                        warn!("Request error on {} after {} attempts: {}", path, budget, e);
                        return Ok(None);
                    }
                    let wait = retry::backoff_delay(attempt);
                    warn!(
                        "Request error on {} (retry {}/{}), waiting {:.1}s: {}",
                        path,
                        attempt,
                        budget,
                        wait.as_secs_f64(),
                        e
                    );
                    tokio::time::sleep(wait).await;
                }
            }
        }

        Ok(None)
    }

    /// Round-trip fare search for one grid point. Thin parameter assembly
    /// over [`request`](Self::request).
    pub async fn flight_offers(
        &self,
        query: &SearchQuery,
    ) -> Result<Option<reqwest::Response>, Error> {
        let params = [
            ("originLocationCode", query.origin.clone()),
            ("destinationLocationCode", query.destination.clone()),
            (
                "departureDate",
                query.departure_date.format("%Y-%m-%d").to_string(),
            ),
            (
                "returnDate",
                query.return_date.format("%Y-%m-%d").to_string(),
            ),
            ("adults", query.adults.to_string()),
            ("currencyCode", query.currency.clone()),
            ("max", query.max_results.to_string()),
        ];

        self.request(Method::GET, OFFERS_PATH, &params).await
    }
}
