use std::time::Duration;

use common::FixtureRecord;
use reqwest::Client;
use tracing::{debug, instrument};

use super::{FeedError, parse_fixtures};
use crate::config::FeedConfig;

/// Header carrying the provider API key.
pub const API_KEY_HEADER: &str = "x-apisports-key";

/// HTTP client for the provider's fixtures endpoint.
///
/// Cheap to clone; the underlying connection pool is shared.
#[derive(Clone, Debug)]
pub struct FixtureFeedClient {
    http: Client,
    base_url: String,
    api_key: String,
    league_id: String,
    season: String,
}

impl FixtureFeedClient {
    /// Build a client from configuration. Fails with [`FeedError::MissingApiKey`]
    /// when no (non-empty) key is configured.
    pub fn from_config(config: &FeedConfig) -> Result<Self, FeedError> {
        let api_key = config
            .api_key
            .clone()
            .filter(|key| !key.trim().is_empty())
            .ok_or(FeedError::MissingApiKey)?;
        let http = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            api_key,
            league_id: config.league_id.clone(),
            season: config.season.clone(),
        })
    }

    /// Fetch every fixture of the configured league and season.
    #[instrument(skip(self), fields(league = %self.league_id, season = %self.season))]
    pub async fn fetch_fixtures(&self) -> Result<Vec<FixtureRecord>, FeedError> {
        let url = format!("{}/fixtures", self.base_url);
        let response = self
            .http
            .get(&url)
            .header(API_KEY_HEADER, &self.api_key)
            .query(&[
                ("league", self.league_id.as_str()),
                ("season", self.season.as_str()),
            ])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(FeedError::Status(status));
        }

        let body = response.text().await?;
        let records = parse_fixtures(&body)?;
        debug!(count = records.len(), "Fetched fixtures");
        Ok(records)
    }
}
