use beaten_games_domain::{
    game::{GameRepository, NewGame},
    nullable::{BeatenOn, Note},
    util::{parse_date, validate_name},
};
use beaten_games_persistence_sqlite::{
    create_games_db_pool, ensure_schema, games::SqliteGameRepository,
};

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    let args: Vec<String> = std::env::args().collect();
    if args.len() < 2 || args.len() > 4 {
        eprintln!("Usage: add_game <name> [<YYYY-MM-DD>] [<note>]");
        std::process::exit(1);
    }

    let db_path = std::env::var("BEATEN_GAMES_DB").unwrap_or_else(|_| "beaten-games.db".into());

    let name = args[1].clone();
    if let Err(e) = validate_name(&name) {
        eprintln!("{}", e);
        std::process::exit(1);
    }
    let beaten_on = match args.get(2) {
        Some(date_str) => match parse_date(date_str) {
            Ok(date) => BeatenOn::present(date),
            Err(e) => {
                eprintln!("{}", e);
                std::process::exit(1);
            }
        },
        None => BeatenOn::absent(),
    };
    let note = args.get(3).cloned().map_or_else(Note::absent, Note::present);

    let pool = create_games_db_pool(&db_path);
    ensure_schema(&pool)
        .await
        .expect("Failed to create games table");

    let repo = SqliteGameRepository::new(pool);
    let id = repo
        .insert_game(&NewGame {
            name: name.clone(),
            note,
            beaten_on,
        })
        .await
        .expect("Failed to insert game");

    println!("Added game [{}] with id {} to {}", name, id, db_path);
}
