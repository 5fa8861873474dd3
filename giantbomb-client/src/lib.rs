use std::time::Duration;

use beaten_games_domain::{
    ServiceError, ServiceResult,
    suggest::{GameSearchProvider, GameSummary, Platform},
};
use log::{debug, error};
use serde::Deserialize;
use thiserror::Error;

pub const DEFAULT_API_URL: &str = "https://www.giantbomb.com/api";

const FIELD_LIST: &str = "id,name,platforms";
const RESOURCE_TYPE_GAME: &str = "game";
const STATUS_OK: i32 = 1;

#[derive(Debug, Error)]
pub enum GiantBombError {
    #[error("HTTP request failed: {0}")]
    Request(reqwest::Error),

    #[error("Failed to deserialize response: {0}")]
    Serde(#[from] serde_json::Error),

    #[error("Unexpected HTTP status {0}")]
    NotOkResponse(reqwest::StatusCode),

    #[error("Giant Bomb returned status code {code}: {message}")]
    Api { code: i32, message: String },
}

// The request URL carries the API key, so it never goes into error text.
impl From<reqwest::Error> for GiantBombError {
    fn from(e: reqwest::Error) -> Self {
        GiantBombError::Request(e.without_url())
    }
}

#[derive(Deserialize, Debug)]
struct SearchResponse {
    error: String,
    status_code: i32,
    #[serde(default)]
    results: Vec<SearchResult>,
}

#[derive(Deserialize, Debug)]
struct SearchResult {
    id: i64,
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    platforms: Option<Vec<SearchPlatform>>,
}

#[derive(Deserialize, Debug)]
struct SearchPlatform {
    id: i64,
    name: String,
    #[serde(default)]
    abbreviation: Option<String>,
}

/// Search client for the Giant Bomb game catalog.
#[derive(Clone)]
pub struct GiantBombClient {
    http_client: reqwest::Client,
    api_url: String,
    api_key: String,
}

impl GiantBombClient {
    pub fn new(
        api_key: impl Into<String>,
        api_url: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, GiantBombError> {
        let http_client = reqwest::Client::builder()
            .user_agent(concat!("beaten-games/", env!("CARGO_PKG_VERSION")))
            .timeout(timeout)
            .build()?;
        Ok(Self {
            http_client,
            api_url: api_url.into().trim_end_matches('/').to_string(),
            api_key: api_key.into(),
        })
    }

    pub async fn search(
        &self,
        query: &str,
        limit: u32,
        page: u32,
    ) -> Result<Vec<GameSummary>, GiantBombError> {
        let limit = limit.to_string();
        let page = page.to_string();
        let resp = self
            .http_client
            .get(format!("{}/search/", self.api_url))
            .query(&[
                ("api_key", self.api_key.as_str()),
                ("format", "json"),
                ("query", query),
                ("resources", RESOURCE_TYPE_GAME),
                ("field_list", FIELD_LIST),
                ("limit", limit.as_str()),
                ("page", page.as_str()),
            ])
            .send()
            .await?;
        if !resp.status().is_success() {
            return Err(GiantBombError::NotOkResponse(resp.status()));
        }
        let body = resp.text().await?;
        let results = parse_search_response(&body)?;
        debug!("Search for {:?} returned {} games", query, results.len());
        Ok(results)
    }
}

fn parse_search_response(body: &str) -> Result<Vec<GameSummary>, GiantBombError> {
    let response: SearchResponse = serde_json::from_str(body)?;
    if response.status_code != STATUS_OK {
        return Err(GiantBombError::Api {
            code: response.status_code,
            message: response.error,
        });
    }
    Ok(response
        .results
        .into_iter()
        .map(|result| GameSummary {
            id: result.id,
            name: result.name.unwrap_or_default(),
            platforms: result
                .platforms
                .unwrap_or_default()
                .into_iter()
                .map(|p| Platform {
                    id: p.id,
                    name: p.name,
                    abbreviation: p.abbreviation,
                })
                .collect(),
        })
        .collect())
}

#[async_trait::async_trait]
impl GameSearchProvider for GiantBombClient {
    async fn search_games(
        &self,
        query: &str,
        limit: u32,
        page: u32,
    ) -> ServiceResult<Vec<GameSummary>> {
        self.search(query, limit, page).await.map_err(|e| {
            error!("Giant Bomb search for {:?} failed: {}", query, e);
            ServiceError::Search(e.to_string())
        })
    }
}
