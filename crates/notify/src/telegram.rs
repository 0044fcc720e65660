//! Telegram notification channel.
//!
//! Send failures are logged and swallowed: a lost alert must never abort a
//! discovery run that already found and persisted a better fare.

use std::time::Duration;

use tracing::{info, warn};

use common::config::TelegramConfig;

const TELEGRAM_API_BASE: &str = "https://api.telegram.org";

/// Thin sendMessage client. Unconfigured credentials turn every send into
/// a warning no-op.
#[derive(Debug, Clone)]
pub struct TelegramNotifier {
    client: reqwest::Client,
    token: String,
    chat_id: String,
    api_base: String,
}

impl TelegramNotifier {
    pub fn new(cfg: &TelegramConfig) -> Self {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(15))
            .build()
            .expect("failed to build Telegram HTTP client");

        Self {
            client,
            token: cfg.token.clone(),
            chat_id: cfg.chat_id.clone(),
            api_base: TELEGRAM_API_BASE.to_string(),
        }
    }

    /// Point the notifier at a custom API base (tests).
    pub fn with_api_base(mut self, base: &str) -> Self {
        self.api_base = base.trim_end_matches('/').to_string();
        self
    }

    pub fn is_configured(&self) -> bool {
        !self.token.is_empty() && !self.chat_id.is_empty()
    }

    /// Deliver `text`, best-effort. Never returns an error.
    pub async fn send(&self, text: &str) {
        if !self.is_configured() {
            warn!("Telegram not configured (TELEGRAM_TOKEN / TELEGRAM_CHAT_ID missing); skipping alert");
            return;
        }

        let url = format!("{}/bot{}/sendMessage", self.api_base, self.token);
        let result = self
            .client
            .post(&url)
            .form(&[
                ("chat_id", self.chat_id.as_str()),
                ("text", text),
                ("disable_web_page_preview", "true"),
            ])
            .send()
            .await;

        match result {
            Ok(resp) if resp.status().is_success() => info!("Telegram alert delivered"),
            Ok(resp) => {
                let status = resp.status().as_u16();
                let body: String = resp.text().await.unwrap_or_default().chars().take(200).collect();
                warn!("Telegram returned {}: {}", status, body);
            }
            Err(e) => warn!("Telegram request error: {}", e),
        }
    }
}
