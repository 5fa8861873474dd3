use sqlx::{
    Pool, Sqlite,
    sqlite::{SqliteConnectOptions, SqlitePoolOptions},
};

pub mod games;

const GAMES_TABLE_SQL: &str = "CREATE TABLE IF NOT EXISTS games (id INTEGER PRIMARY KEY AUTOINCREMENT, name TEXT NOT NULL, note TEXT, beaten_on TEXT);";

/// Opens (and creates if missing) the games database at `db_path`.
/// Connections are established on first use.
pub fn create_games_db_pool(db_path: &str) -> Pool<Sqlite> {
    let conn_options = SqliteConnectOptions::new()
        .filename(db_path)
        .create_if_missing(true);

    SqlitePoolOptions::new()
        .max_connections(5)
        .connect_lazy_with(conn_options)
}

pub async fn ensure_schema(pool: &Pool<Sqlite>) -> sqlx::Result<()> {
    sqlx::query(GAMES_TABLE_SQL).execute(pool).await?;
    Ok(())
}

#[cfg(test)]
pub(crate) async fn create_in_memory_pool() -> Pool<Sqlite> {
    let conn_options = SqliteConnectOptions::new()
        .filename(":memory:")
        .create_if_missing(true);

    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect_with(conn_options)
        .await
        .expect("Failed to connect to in-memory database");
    ensure_schema(&pool)
        .await
        .expect("Failed to create games table");
    pool
}
