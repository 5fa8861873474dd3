use axum::{
    Form,
    extract::{Path, State, rejection::FormRejection},
    http::StatusCode,
    response::{Html, Redirect},
};
use beaten_games_domain::game::{AddGameForm, GameId, GameNameForm};

use crate::{AppState, error::ApiError, pages};

pub async fn index(State(app_state): State<AppState>) -> Result<Html<String>, ApiError> {
    let games = app_state.game_service.list_games().await?;
    Ok(pages::index_page(&games))
}

pub async fn show(
    State(app_state): State<AppState>,
    Path(id): Path<GameId>,
) -> Result<Html<String>, ApiError> {
    let game = app_state.game_service.get_game(id).await?;
    Ok(pages::game_page(&game))
}

pub async fn add_form() -> Html<String> {
    pages::add_page()
}

#[axum::debug_handler]
pub async fn add(
    State(app_state): State<AppState>,
    form: Result<Form<AddGameForm>, FormRejection>,
) -> Result<Redirect, ApiError> {
    let Form(form) = form?;
    app_state.game_service.add_game(form).await?;
    Ok(Redirect::temporary("/"))
}

#[axum::debug_handler]
pub async fn quick_add(
    State(app_state): State<AppState>,
    form: Result<Form<GameNameForm>, FormRejection>,
) -> Result<StatusCode, ApiError> {
    let Form(form) = form?;
    app_state.game_service.quick_add_game(form.name).await?;
    Ok(StatusCode::OK)
}

#[axum::debug_handler]
pub async fn delete(
    State(app_state): State<AppState>,
    form: Result<Form<GameNameForm>, FormRejection>,
) -> Result<StatusCode, ApiError> {
    let Form(form) = form?;
    app_state.game_service.delete_game(&form.name).await?;
    Ok(StatusCode::OK)
}
