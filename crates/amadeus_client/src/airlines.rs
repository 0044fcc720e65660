//! Memoized airline-name lookups.
//!
//! Misses are cached too: a code that failed to resolve is recorded as
//! `None` so it is never fetched twice. Lookups run on a reduced retry
//! budget — this is best-effort enrichment for alert text, not the search
//! path.

use std::sync::Arc;

use dashmap::DashMap;
use reqwest::Method;
use tracing::debug;

use common::types::AirlinesResponse;

use crate::rest::AmadeusRestClient;
use crate::retry;

const AIRLINES_PATH: &str = "/v1/reference-data/airlines";

/// Airline display-name directory backed by the reference-data endpoint.
#[derive(Debug, Clone)]
pub struct AirlineDirectory {
    rest: AmadeusRestClient,
    cache: Arc<DashMap<String, Option<String>>>,
}

impl AirlineDirectory {
    pub fn new(rest: AmadeusRestClient) -> Self {
        Self {
            rest,
            cache: Arc::new(DashMap::new()),
        }
    }

    /// Resolve a carrier code to a display name, best-effort.
    ///
    /// Prefers the business name, then the common name, then the raw name
    /// field; an empty trimmed name counts as unresolved.
    pub async fn name(&self, code: &str) -> Option<String> {
        let code = code.trim().to_uppercase();
        if code.is_empty() {
            return None;
        }

        if let Some(hit) = self.cache.get(&code) {
            return hit.clone();
        }

        let resolved = self.fetch(&code).await;
        debug!("Airline {} resolved to {:?}", code, resolved);
        self.cache.insert(code, resolved.clone());
        resolved
    }

    async fn fetch(&self, code: &str) -> Option<String> {
        let params = [("airlineCodes", code.to_string())];
        let resp = self
            .rest
            .request_with_budget(Method::GET, AIRLINES_PATH, &params, retry::LOOKUP_BUDGET)
            .await
            .ok()??;

        if !resp.status().is_success() {
            return None;
        }

        let body: AirlinesResponse = resp.json().await.ok()?;
        let first = body.data.first()?;
        let name = first
            .business_name
            .as_deref()
            .or(first.common_name.as_deref())
            .or(first.name.as_deref())?
            .trim()
            .to_string();

        if name.is_empty() {
            None
        } else {
            Some(name)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testutil::{spawn, Reply};

    fn directory_for(server: &crate::testutil::ScriptedServer) -> AirlineDirectory {
        AirlineDirectory::new(AmadeusRestClient::with_base_url(
            &server.base_url,
            "id",
            "secret",
        ))
    }

    #[tokio::test]
    async fn resolves_and_caches_a_name() {
        let server = spawn(vec![Reply::Json(
            200,
            r#"{"data":[{"businessName":"IBERIA","commonName":"Iberia"}]}"#.into(),
        )])
        .await;
        let directory = directory_for(&server);

        assert_eq!(directory.name("ib").await, Some("IBERIA".to_string()));
        // Second call is served from the cache — lowercase input normalises
        // to the same key and the server sees no further lookup.
        assert_eq!(directory.name("IB").await, Some("IBERIA".to_string()));
        assert_eq!(server.seen.lock().await.len(), 1);
    }

    #[tokio::test]
    async fn falls_back_through_the_name_fields() {
        let server = spawn(vec![Reply::Json(
            200,
            r#"{"data":[{"name":"  Aerolineas Argentinas "}]}"#.into(),
        )])
        .await;
        let directory = directory_for(&server);

        assert_eq!(
            directory.name("AR").await,
            Some("Aerolineas Argentinas".to_string())
        );
    }

    #[tokio::test]
    async fn empty_result_is_cached_as_negative() {
        let server = spawn(vec![Reply::Json(200, r#"{"data":[]}"#.into())]).await;
        let directory = directory_for(&server);

        assert_eq!(directory.name("ZZ").await, None);
        assert_eq!(directory.name("ZZ").await, None);
        assert_eq!(server.seen.lock().await.len(), 1);
    }

    #[tokio::test]
    async fn lookup_error_is_cached_as_negative() {
        let server = spawn(vec![Reply::Json(404, "{}".into())]).await;
        let directory = directory_for(&server);

        assert_eq!(directory.name("XX").await, None);
        assert_eq!(directory.name("XX").await, None);
        assert_eq!(server.seen.lock().await.len(), 1);
    }

    #[tokio::test]
    async fn blank_code_short_circuits() {
        let server = spawn(vec![]).await;
        let directory = directory_for(&server);

        assert_eq!(directory.name("   ").await, None);
        assert!(server.seen.lock().await.is_empty());
        assert_eq!(*server.token_calls.lock().await, 0);
    }
}
