use std::sync::{Arc, Mutex};

use serde::{Deserialize, Serialize};

use crate::{ServiceError, ServiceResult};

pub const SUGGEST_LIMIT: u32 = 10;
pub const SUGGEST_PAGE: u32 = 1;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Platform {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub abbreviation: Option<String>,
}

/// A game found in the external catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameSummary {
    pub id: i64,
    pub name: String,
    pub platforms: Vec<Platform>,
}

pub type ArcGameSearchProvider = Arc<Box<dyn GameSearchProvider + Send + Sync + 'static>>;

#[async_trait::async_trait]
pub trait GameSearchProvider {
    async fn search_games(&self, query: &str, limit: u32, page: u32)
    -> ServiceResult<Vec<GameSummary>>;
}

pub type ArcSuggestService = Arc<Box<dyn SuggestService + Send + Sync + 'static>>;

#[async_trait::async_trait]
pub trait SuggestService {
    async fn suggest_games(&self, query: Option<&str>) -> ServiceResult<Vec<GameSummary>>;
}

pub struct SuggestServiceImpl {
    search_provider: ArcGameSearchProvider,
}

impl SuggestServiceImpl {
    pub fn new(search_provider: ArcGameSearchProvider) -> Self {
        Self { search_provider }
    }
}

#[async_trait::async_trait]
impl SuggestService for SuggestServiceImpl {
    async fn suggest_games(&self, query: Option<&str>) -> ServiceResult<Vec<GameSummary>> {
        let query = match query {
            Some(q) if !q.trim().is_empty() => q,
            _ => return ServiceError::bad_request("Query is empty."),
        };
        self.search_provider
            .search_games(query, SUGGEST_LIMIT, SUGGEST_PAGE)
            .await
    }
}

/// Records every query and answers with a fixed result list.
#[derive(Default, Clone)]
pub struct MockGameSearchProvider {
    pub queries: Arc<Mutex<Vec<(String, u32, u32)>>>,
    pub results: Vec<GameSummary>,
    pub fail: bool,
}

#[allow(unused)]
impl MockGameSearchProvider {
    pub fn with_results(results: Vec<GameSummary>) -> Self {
        Self {
            results,
            ..Self::default()
        }
    }

    pub fn get_queries(&self) -> Vec<(String, u32, u32)> {
        self.queries.lock().unwrap().clone()
    }
}

#[async_trait::async_trait]
impl GameSearchProvider for MockGameSearchProvider {
    async fn search_games(
        &self,
        query: &str,
        limit: u32,
        page: u32,
    ) -> ServiceResult<Vec<GameSummary>> {
        self.queries
            .lock()
            .unwrap()
            .push((query.to_string(), limit, page));
        if self.fail {
            return ServiceError::search("mock search failure");
        }
        Ok(self.results.clone())
    }
}
