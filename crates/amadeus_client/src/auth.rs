//! OAuth2 client-credentials authentication for the Amadeus API.
//!
//! Tokens are cached and refreshed lazily. A token counts as expired 30
//! seconds before its literal expiry to absorb clock skew and in-flight
//! request latency.

use std::time::{Duration, Instant};

use tokio::sync::Mutex;
use tracing::debug;

use common::types::TokenResponse;
use common::Error;

/// Safety margin subtracted from the reported token lifetime.
pub const EXPIRY_MARGIN: Duration = Duration::from_secs(30);

const TOKEN_PATH: &str = "/v1/security/oauth2/token";

#[derive(Debug, Clone)]
struct CachedToken {
    token: String,
    expires_at: Instant,
}

impl CachedToken {
    fn is_fresh_at(&self, now: Instant) -> bool {
        match self.expires_at.checked_sub(EXPIRY_MARGIN) {
            Some(deadline) => now < deadline,
            None => false,
        }
    }
}

/// Lazily-refreshing bearer token cache.
pub struct AmadeusAuth {
    http: reqwest::Client,
    token_url: String,
    client_id: String,
    client_secret: String,
    cached: Mutex<Option<CachedToken>>,
}

impl std::fmt::Debug for AmadeusAuth {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AmadeusAuth")
            .field("token_url", &self.token_url)
            .field("client_id", &self.client_id)
            .field("client_secret", &"<redacted>")
            .finish()
    }
}

impl AmadeusAuth {
    pub fn new(
        http: reqwest::Client,
        base_url: &str,
        client_id: &str,
        client_secret: &str,
    ) -> Self {
        Self {
            http,
            token_url: format!("{}{}", base_url, TOKEN_PATH),
            client_id: client_id.to_string(),
            client_secret: client_secret.to_string(),
            cached: Mutex::new(None),
        }
    }

    /// Return a valid bearer token, refreshing it first when needed.
    ///
    /// No query can proceed without a token, so any exchange failure is an
    /// `Error::Auth` for the caller to propagate.
    pub async fn bearer(&self) -> Result<String, Error> {
        let mut slot = self.cached.lock().await;

        if let Some(cached) = slot.as_ref() {
            if cached.is_fresh_at(Instant::now()) {
                return Ok(cached.token.clone());
            }
        }

        debug!("Refreshing Amadeus access token");
        let resp = self
            .http
            .post(&self.token_url)
            .form(&[
                ("grant_type", "client_credentials"),
                ("client_id", self.client_id.as_str()),
                ("client_secret", self.client_secret.as_str()),
            ])
            .send()
            .await
            .map_err(|e| Error::Auth(format!("token exchange failed: {e}")))?;

        let status = resp.status().as_u16();
        if status != 200 {
            let body: String = resp
                .text()
                .await
                .unwrap_or_default()
                .chars()
                .take(200)
                .collect();
            return Err(Error::Auth(format!(
                "token exchange returned {}: {}",
                status, body
            )));
        }

        let body: TokenResponse = resp
            .json()
            .await
            .map_err(|e| Error::Auth(format!("token response parse error: {e}")))?;

        let token = body.access_token.clone();
        *slot = Some(CachedToken {
            token: body.access_token,
            expires_at: Instant::now() + Duration::from_secs(body.expires_in),
        });

        Ok(token)
    }

    /// Drop the cached token so the next `bearer()` call refreshes.
    ///
    /// Used when a request comes back 401 despite a seemingly valid cached
    /// token; server-side expiry can disagree with ours.
    pub async fn invalidate(&self) {
        *self.cached.lock().await = None;
    }
}
