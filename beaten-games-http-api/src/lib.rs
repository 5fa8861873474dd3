use std::{net::SocketAddr, path::Path};

use axum::{
    Router,
    routing::{get, post},
};
use beaten_games_domain::{game::ArcGameService, suggest::ArcSuggestService};
use log::info;
use tower_http::services::ServeDir;

pub mod error;
mod games;
mod pages;
mod suggest;

#[derive(Clone)]
pub struct AppState {
    pub game_service: ArcGameService,
    pub suggest_service: ArcSuggestService,
}

pub fn router(app_state: AppState, static_dir: impl AsRef<Path>) -> Router {
    Router::new()
        .route("/", get(games::index))
        .route("/games/{id}", get(games::show))
        .route("/games/add", get(games::add_form).post(games::add))
        .route("/games/quick-add", post(games::quick_add))
        .route("/games/delete", post(games::delete))
        .route("/suggest/games", get(suggest::suggest_games))
        .nest_service("/static", ServeDir::new(static_dir))
        .with_state(app_state)
}

pub async fn run(
    app_state: AppState,
    address: SocketAddr,
    static_dir: impl AsRef<Path>,
    shutdown_signal: impl std::future::Future<Output = ()> + Send + 'static,
) -> std::io::Result<()> {
    let router = router(app_state, static_dir);

    let listener = tokio::net::TcpListener::bind(address).await?;

    info!("HTTP server listening on {}", address);
    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal)
        .await?;

    info!("HTTP server shut down gracefully");
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::{
        body::Body,
        http::{Request, StatusCode, header},
        response::Response,
    };
    use beaten_games_domain::{
        game::{GameServiceImpl, MockGameRepository},
        nullable::{BeatenOn, Note},
        suggest::{GameSummary, MockGameSearchProvider, SuggestServiceImpl},
    };
    use chrono::NaiveDate;
    use tower::ServiceExt;

    use super::*;

    const STATIC_DIR: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/../static");

    fn build_router(repo: &MockGameRepository, provider: &MockGameSearchProvider) -> Router {
        let app_state = AppState {
            game_service: Arc::new(Box::new(GameServiceImpl::new(Arc::new(Box::new(
                repo.clone(),
            ))))),
            suggest_service: Arc::new(Box::new(SuggestServiceImpl::new(Arc::new(Box::new(
                provider.clone(),
            ))))),
        };
        router(app_state, STATIC_DIR)
    }

    fn get_request(uri: &str) -> Request<Body> {
        Request::builder().uri(uri).body(Body::empty()).unwrap()
    }

    fn form_request(uri: &str, body: &str) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    async fn body_text(resp: Response) -> String {
        let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX)
            .await
            .unwrap();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    #[tokio::test]
    async fn test_pages() {
        let repo = MockGameRepository::new();
        let app = build_router(&repo, &MockGameSearchProvider::default());

        let resp = app.clone().oneshot(get_request("/")).await.unwrap();
        assert_eq!(resp.status(), StatusCode::OK);
        assert!(body_text(resp).await.contains(r#"<table id="games">"#));

        let resp = app.clone().oneshot(get_request("/games/add")).await.unwrap();
        assert_eq!(resp.status(), StatusCode::OK);
        assert!(body_text(resp).await.contains(r#"name="beaten_on""#));

        let resp = app
            .oneshot(get_request("/static/style.css"))
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_add_form_without_note() {
        let repo = MockGameRepository::new();
        let app = build_router(&repo, &MockGameSearchProvider::default());

        let resp = app
            .oneshot(form_request(
                "/games/add",
                "name=Hades&beaten_on=2020-12-10",
            ))
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::TEMPORARY_REDIRECT);
        assert_eq!(resp.headers()[header::LOCATION], "/");

        let games = repo.get_games();
        assert_eq!(games.len(), 1);
        assert_eq!(games[0].name, "Hades");
        assert_eq!(games[0].note, Note::present(String::new()));
        assert_eq!(
            games[0].beaten_on,
            BeatenOn::present(NaiveDate::from_ymd_opt(2020, 12, 10).unwrap())
        );
    }

    #[tokio::test]
    async fn test_add_form_with_empty_date() {
        let repo = MockGameRepository::new();
        let app = build_router(&repo, &MockGameSearchProvider::default());

        let resp = app
            .oneshot(form_request(
                "/games/add",
                "name=Outer+Wilds&note=no%20spoilers&beaten_on=",
            ))
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::TEMPORARY_REDIRECT);

        let games = repo.get_games();
        assert_eq!(games[0].name, "Outer Wilds");
        assert_eq!(games[0].note.get(), "no spoilers");
        assert_eq!(games[0].beaten_on, BeatenOn::zero());
    }

    #[tokio::test]
    async fn test_unparseable_form_is_bad_request() {
        let repo = MockGameRepository::new();
        let app = build_router(&repo, &MockGameSearchProvider::default());

        let req = Request::builder()
            .method("POST")
            .uri("/games/add")
            .body(Body::from("name=Hades"))
            .unwrap();
        let resp = app.oneshot(req).await.unwrap();
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        assert_eq!(body_text(resp).await, "Failed to parse submitted form.");
        assert!(repo.get_games().is_empty());
    }

    #[tokio::test]
    async fn test_malformed_date_is_bad_request() {
        let repo = MockGameRepository::new();
        let app = build_router(&repo, &MockGameSearchProvider::default());

        let resp = app
            .oneshot(form_request("/games/add", "name=Hades&beaten_on=2020-12-1"))
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        assert_eq!(body_text(resp).await, "Failed to parse date.");
        assert!(repo.get_games().is_empty());
    }

    #[tokio::test]
    async fn test_quick_add_then_delete() {
        let repo = MockGameRepository::new();
        let app = build_router(&repo, &MockGameSearchProvider::default());

        let resp = app
            .clone()
            .oneshot(form_request("/games/quick-add", "name=Celeste"))
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::OK);
        assert_eq!(repo.get_games().len(), 1);
        assert!(!repo.get_games()[0].note.is_present());

        let resp = app
            .clone()
            .oneshot(form_request("/games/delete", "name=Celeste"))
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::OK);
        assert!(repo.get_games().is_empty());

        let resp = app
            .oneshot(form_request("/games/delete", "name=Celeste"))
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        assert_eq!(body_text(resp).await, "Can't find this game.");
    }

    #[tokio::test]
    async fn test_wrong_method() {
        let repo = MockGameRepository::new();
        let app = build_router(&repo, &MockGameSearchProvider::default());

        let resp = app
            .clone()
            .oneshot(get_request("/games/delete"))
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::METHOD_NOT_ALLOWED);

        let resp = app.oneshot(form_request("/", "name=Celeste")).await.unwrap();
        assert_eq!(resp.status(), StatusCode::METHOD_NOT_ALLOWED);
        assert!(repo.get_games().is_empty());
    }

    #[tokio::test]
    async fn test_game_detail() {
        let repo = MockGameRepository::new();
        let app = build_router(&repo, &MockGameSearchProvider::default());
        app.clone()
            .oneshot(form_request("/games/quick-add", "name=Celeste"))
            .await
            .unwrap();
        let id = repo.get_games()[0].id;

        let resp = app
            .clone()
            .oneshot(get_request(&format!("/games/{}", id)))
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::OK);
        assert!(body_text(resp).await.contains("<h1>Celeste</h1>"));

        let resp = app
            .clone()
            .oneshot(get_request(&format!("/games/{}", id + 1)))
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);

        let resp = app.oneshot(get_request("/games/celeste")).await.unwrap();
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_suggest_games() {
        let provider = MockGameSearchProvider::with_results(vec![GameSummary {
            id: 56733,
            name: "Celeste".to_string(),
            platforms: vec![],
        }]);
        let app = build_router(&MockGameRepository::new(), &provider);

        let resp = app
            .clone()
            .oneshot(get_request("/suggest/games?q=cel%20este"))
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::OK);
        assert_eq!(
            resp.headers()[header::CONTENT_TYPE],
            "application/json"
        );
        let json: serde_json::Value = serde_json::from_str(&body_text(resp).await).unwrap();
        assert_eq!(
            json,
            serde_json::json!([{"id": 56733, "name": "Celeste", "platforms": []}])
        );
        assert_eq!(provider.get_queries()[0].0, "cel este");
    }

    #[tokio::test]
    async fn test_suggest_without_query() {
        let provider = MockGameSearchProvider::default();
        let app = build_router(&MockGameRepository::new(), &provider);

        let resp = app
            .clone()
            .oneshot(get_request("/suggest/games"))
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        assert_eq!(body_text(resp).await, "Query is empty.");

        let resp = app
            .oneshot(get_request("/suggest/games?q="))
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        assert!(provider.get_queries().is_empty());
    }
}
