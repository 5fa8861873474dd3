use axum::{
    Json,
    extract::{Query, State},
};
use beaten_games_domain::suggest::GameSummary;
use serde::Deserialize;

use crate::{AppState, error::ApiError};

#[derive(Debug, Deserialize)]
pub struct SuggestQuery {
    pub q: Option<String>,
}

pub async fn suggest_games(
    State(app_state): State<AppState>,
    Query(query): Query<SuggestQuery>,
) -> Result<Json<Vec<GameSummary>>, ApiError> {
    let games = app_state
        .suggest_service
        .suggest_games(query.q.as_deref())
        .await?;
    Ok(Json(games))
}
