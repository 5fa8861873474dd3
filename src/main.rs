use std::sync::Arc;

use beaten_games_domain::{
    game::{ArcGameService, GameServiceImpl},
    suggest::{ArcSuggestService, SuggestServiceImpl},
};
use beaten_games_http_api::AppState;
use beaten_games_persistence_sqlite::{
    create_games_db_pool, ensure_schema, games::SqliteGameRepository,
};
use giantbomb_client::GiantBombClient;
use log::{error, info};

use crate::config::Config;

mod config;
mod logs;

async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    info!("Shutdown signal received. Preparing graceful exit...");
}

#[tokio::main]
async fn main() {
    dotenvy::dotenv().expect("Failed to load .env file");

    let config = match Config::from_env() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Invalid configuration: {}", e);
            std::process::exit(1);
        }
    };

    if let Err(e) = logs::init_logger(&config.log_file_path, &config.log_archive_pattern) {
        eprintln!("Failed to initialize logger: {}", e);
        std::process::exit(1);
    }

    info!("Opening games database at {}", config.db_path);
    let pool = create_games_db_pool(&config.db_path);
    if let Err(e) = ensure_schema(&pool).await {
        error!("Failed to prepare games database: {}", e);
        std::process::exit(1);
    }

    let search_client = match GiantBombClient::new(
        config.giant_bomb_api_key.clone(),
        config.giant_bomb_api_url.clone(),
        config.search_timeout,
    ) {
        Ok(client) => client,
        Err(e) => {
            error!("Failed to create Giant Bomb client: {}", e);
            std::process::exit(1);
        }
    };

    let game_service: ArcGameService = Arc::new(Box::new(GameServiceImpl::new(Arc::new(
        Box::new(SqliteGameRepository::new(pool)),
    ))));
    let suggest_service: ArcSuggestService = Arc::new(Box::new(SuggestServiceImpl::new(
        Arc::new(Box::new(search_client)),
    )));

    let app_state = AppState {
        game_service,
        suggest_service,
    };

    info!("Starting application");

    if let Err(e) = beaten_games_http_api::run(
        app_state,
        config.address,
        &config.static_dir,
        shutdown_signal(),
    )
    .await
    {
        error!("HTTP server failed: {}", e);
        std::process::exit(1);
    }
}
