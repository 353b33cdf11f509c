//! Steam client for steamshelf
//!
//! Talks to three services:
//!
//! - the Steam Web API (owned games, vanity names, player summaries)
//! - the storefront (review aggregates, Deck compatibility, genre and tag catalogues)
//! - SteamSpy (per-game genres and user tags)
//!
//! [`SteamStore`] implements [`StoreGateway`]. Per-game lookups log and swallow
//! their failures; everything else returns [`StoreError`].

mod steamspy;
mod storefront;
mod web_api;

use serde::de::DeserializeOwned;
use std::time::Duration;
use steamshelf_library::{DeckCompat, GameRecord, GenreTags, ReviewSummary, StoreGateway};
use thiserror::Error;

pub use steamspy::parse_genre_tags;
pub use storefront::{
    NON_GAME_GENRES, parse_deck_compat, parse_genre_list, parse_reviews, parse_tag_list,
};
pub use web_api::{PlayerSummary, parse_owned_games};

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("{url} returned {status}")]
    Status {
        url: String,
        status: reqwest::StatusCode,
    },

    #[error("Unexpected response: {0}")]
    Parse(String),

    #[error("Could not resolve Steam user: {0}")]
    InvalidUser(String),

    #[error("Player not found: {0}")]
    PlayerNotFound(String),

    /// Transport failure or timeout. The request URL is stripped since the
    /// Web API key travels in the query string.
    #[error("HTTP error")]
    Http(#[source] reqwest::Error),
}

impl StoreError {
    fn http(err: reqwest::Error) -> Self {
        StoreError::Http(err.without_url())
    }

    /// The error and all of its sources, joined with `: `
    pub fn chain(&self) -> String {
        let mut message = self.to_string();
        let mut source = std::error::Error::source(self);
        while let Some(cause) = source {
            message.push_str(": ");
            message.push_str(&cause.to_string());
            source = cause.source();
        }
        message
    }
}

/// Base URLs of the remote services
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoints {
    pub web_api: String,
    pub store: String,
    pub steamspy: String,
}

impl Default for Endpoints {
    fn default() -> Self {
        Self {
            web_api: "https://api.steampowered.com".to_string(),
            store: "https://store.steampowered.com".to_string(),
            steamspy: "https://steamspy.com".to_string(),
        }
    }
}

/// Client settings
#[derive(Debug, Clone)]
pub struct StoreConfig {
    pub api_key: String,
    pub timeout: Duration,
    pub endpoints: Endpoints,
}

impl StoreConfig {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            timeout: Duration::from_secs(30),
            endpoints: Endpoints::default(),
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_endpoints(mut self, endpoints: Endpoints) -> Self {
        self.endpoints = endpoints;
        self
    }
}

/// Shared Steam client. Build once and pass by reference.
pub struct SteamStore {
    api_key: String,
    endpoints: Endpoints,
    client: reqwest::Client,
}

impl SteamStore {
    /// Create a new client
    pub fn new(config: StoreConfig) -> Result<Self, StoreError> {
        use reqwest::header::{HeaderMap, HeaderValue, ORIGIN, REFERER};

        // Domain-restricted API keys only accept requests from their domain
        let mut headers = HeaderMap::new();
        headers.insert(REFERER, HeaderValue::from_static("http://localhost/"));
        headers.insert(ORIGIN, HeaderValue::from_static("http://localhost"));

        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .user_agent(format!("steamshelf/{}", env!("CARGO_PKG_VERSION")))
            .default_headers(headers)
            .pool_max_idle_per_host(4)
            .build()
            .map_err(StoreError::http)?;

        Ok(Self {
            api_key: config.api_key,
            endpoints: config.endpoints,
            client,
        })
    }

    /// GET `url` and return the body of a successful response
    async fn get_body(&self, url: &str, query: &[(&str, &str)]) -> Result<String, StoreError> {
        tracing::debug!("GET {}", url);

        let response = self
            .client
            .get(url)
            .query(query)
            .send()
            .await
            .map_err(StoreError::http)?;

        if !response.status().is_success() {
            return Err(StoreError::Status {
                url: url.to_string(),
                status: response.status(),
            });
        }

        response.text().await.map_err(StoreError::http)
    }

    /// GET `url` and decode the JSON body
    async fn get_json<T: DeserializeOwned>(
        &self,
        url: &str,
        query: &[(&str, &str)],
    ) -> Result<T, StoreError> {
        let body = self.get_body(url, query).await?;
        serde_json::from_str(&body).map_err(|e| StoreError::Parse(format!("{}: {}", url, e)))
    }
}

/// Collapse a failed per-game lookup into "no data"
fn absent_on_error<T>(what: &str, app_id: u32, result: Result<Option<T>, StoreError>) -> Option<T> {
    match result {
        Ok(value) => {
            if value.is_none() {
                tracing::debug!(app_id, "No {} data", what);
            }
            value
        }
        Err(e) => {
            tracing::warn!(app_id, error = %e.chain(), "{} lookup failed", what);
            None
        }
    }
}

impl StoreGateway for SteamStore {
    type Error = StoreError;

    async fn owned_games(&self, steam_id: &str) -> Result<Vec<GameRecord>, StoreError> {
        self.fetch_owned_games(steam_id).await
    }

    async fn reviews(&self, app_id: u32) -> Option<ReviewSummary> {
        absent_on_error("review", app_id, self.fetch_reviews(app_id).await)
    }

    async fn deck_compat(&self, app_id: u32) -> Option<DeckCompat> {
        absent_on_error("deck compat", app_id, self.fetch_deck_compat(app_id).await)
    }

    async fn genre_tags(&self, app_id: u32) -> Option<GenreTags> {
        absent_on_error("genre/tag", app_id, self.fetch_genre_tags(app_id).await)
    }
}
