//! API client for the MLB Stats API.
//!
//! This module provides the `StatsApiClient` struct for fetching leader
//! lists and hydrated player stats from statsapi.mlb.com.

use std::future::Future;
use std::time::Duration;

use anyhow::{Context, Result};
use reqwest::Client;
use tracing::{debug, warn};

use crate::models::{LeadersResponse, PeopleResponse};

use super::ApiError;

// ============================================================================
// Constants
// ============================================================================

/// Base URL for the public stats API
const API_BASE_URL: &str = "https://statsapi.mlb.com/api/v1";

/// HTTP request timeout in seconds.
/// The dashboard degrades to cached or fallback data, so failing fast
/// beats waiting on a slow response.
const REQUEST_TIMEOUT_SECS: u64 = 10;

/// Maximum number of retries for rate-limited (429) requests.
/// 3 retries with exponential backoff usually succeeds without excessive delay.
const MAX_RATE_LIMIT_RETRIES: u32 = 3;

/// Initial backoff delay in milliseconds for rate limiting.
/// 1 second is polite to the server while not making users wait too long.
const INITIAL_BACKOFF_MS: u64 = 1000;

/// Every fetch seam the aggregation layer needs, so tests can substitute a
/// stub source for the real HTTP client.
pub trait LeaderSource: Clone + Send + Sync + 'static {
    fn leaders(
        &self,
        stat_param: &str,
        group: &str,
        season: i32,
        limit: usize,
    ) -> impl Future<Output = Result<LeadersResponse>> + Send;

    fn player_season_stats(
        &self,
        player_id: i64,
        group: &str,
    ) -> impl Future<Output = Result<PeopleResponse>> + Send;
}

/// API client for statsapi.mlb.com.
/// Clone is cheap - reqwest::Client uses Arc internally for connection pooling.
#[derive(Clone)]
pub struct StatsApiClient {
    client: Client,
    base_url: String,
}

impl StatsApiClient {
    /// Create a new API client against the public endpoint
    pub fn new() -> Result<Self> {
        Self::with_base_url(API_BASE_URL)
    }

    /// Create a client against an alternate base URL (proxies, mirrors)
    pub fn with_base_url(base_url: &str) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Check if response is successful, returning an error with body if not.
    /// Returns Ok(Some(response)) for success, Ok(None) for rate limit
    /// (should retry), or Err for other errors.
    async fn check_response_for_retry(
        response: reqwest::Response,
    ) -> Result<Option<reqwest::Response>> {
        if response.status().is_success() {
            Ok(Some(response))
        } else if response.status().as_u16() == 429 {
            // Rate limited - signal to retry
            Ok(None)
        } else {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            Err(ApiError::from_status(status, &body).into())
        }
    }

    async fn get_json<T: serde::de::DeserializeOwned>(
        &self,
        url: &str,
        query: &[(&str, String)],
    ) -> Result<T> {
        let mut retries = 0;
        let mut backoff_ms = INITIAL_BACKOFF_MS;

        loop {
            let response = self
                .client
                .get(url)
                .query(query)
                .send()
                .await
                .with_context(|| format!("Failed to send GET request to {}", url))?;

            match Self::check_response_for_retry(response).await? {
                Some(response) => {
                    return response
                        .json()
                        .await
                        .with_context(|| format!("Failed to parse JSON response from {}", url));
                }
                None => {
                    // Rate limited
                    retries += 1;
                    if retries > MAX_RATE_LIMIT_RETRIES {
                        return Err(ApiError::RateLimited.into());
                    }
                    warn!(url, retry = retries, backoff_ms, "Rate limited, backing off");
                    tokio::time::sleep(Duration::from_millis(backoff_ms)).await;
                    backoff_ms *= 2; // Exponential backoff
                }
            }
        }
    }
}

impl LeaderSource for StatsApiClient {
    /// Fetch the ranked leader list for one statistic in one season
    async fn leaders(
        &self,
        stat_param: &str,
        group: &str,
        season: i32,
        limit: usize,
    ) -> Result<LeadersResponse> {
        let url = format!("{}/stats/leaders", self.base_url);
        debug!(stat_param, group, season, limit, "Fetching leaders");

        self.get_json(
            &url,
            &[
                ("leaderCategories", stat_param.to_string()),
                ("statGroup", group.to_string()),
                ("season", season.to_string()),
                ("limit", limit.to_string()),
                ("sportId", "1".to_string()),
            ],
        )
        .await
    }

    /// Fetch a player's year-by-year stats for one stat group
    async fn player_season_stats(&self, player_id: i64, group: &str) -> Result<PeopleResponse> {
        let url = format!("{}/people/{}", self.base_url, player_id);
        let hydrate = format!("stats(group=[{}],type=[yearByYear])", group);
        debug!(player_id, group, "Fetching player season stats");

        self.get_json(&url, &[("hydrate", hydrate)]).await
    }
}
