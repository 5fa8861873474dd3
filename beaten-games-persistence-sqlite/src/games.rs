use beaten_games_domain::{
    ServiceError, ServiceResult,
    game::{Game, GameId, GameRepository, NewGame},
    nullable::{BeatenOn, Note},
};
use chrono::NaiveDate;
use log::error;
use sqlx::{Pool, Row, Sqlite, sqlite::SqliteRow};

pub struct SqliteGameRepository {
    pool: Pool<Sqlite>,
}

impl SqliteGameRepository {
    pub fn new(pool: Pool<Sqlite>) -> Self {
        Self { pool }
    }

    fn game_from_row(row: &SqliteRow) -> sqlx::Result<Game> {
        Ok(Game {
            id: row.try_get("id")?,
            name: row.try_get("name")?,
            note: Note::from(row.try_get::<Option<String>, _>("note")?),
            beaten_on: BeatenOn::from(row.try_get::<Option<NaiveDate>, _>("beaten_on")?),
        })
    }
}

fn storage_error(context: &str, e: sqlx::Error) -> ServiceError {
    error!("{}: {}", context, e);
    ServiceError::Storage(format!("{}: {}", context, e))
}

#[async_trait::async_trait]
impl GameRepository for SqliteGameRepository {
    async fn list_games(&self) -> ServiceResult<Vec<Game>> {
        let rows = sqlx::query("SELECT id, name, note, beaten_on FROM games ORDER BY id")
            .fetch_all(&self.pool)
            .await
            .map_err(|e| storage_error("Failed to list games", e))?;
        rows.iter()
            .map(|row| {
                Self::game_from_row(row).map_err(|e| storage_error("Failed to read game row", e))
            })
            .collect()
    }

    async fn get_game(&self, id: GameId) -> ServiceResult<Option<Game>> {
        let row = sqlx::query("SELECT id, name, note, beaten_on FROM games WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| storage_error("Failed to get game", e))?;
        row.as_ref()
            .map(Self::game_from_row)
            .transpose()
            .map_err(|e| storage_error("Failed to read game row", e))
    }

    async fn insert_game(&self, game: &NewGame) -> ServiceResult<GameId> {
        // Id is auto-incremented
        let res = sqlx::query("INSERT INTO games (name, note, beaten_on) VALUES (?, ?, ?)")
            .bind(&game.name)
            .bind(game.note.as_option())
            .bind(game.beaten_on.as_option())
            .execute(&self.pool)
            .await
            .map_err(|e| storage_error("Failed to insert game", e))?;

        Ok(res.last_insert_rowid())
    }

    async fn delete_games_by_name(&self, name: &str) -> ServiceResult<u64> {
        let res = sqlx::query("DELETE FROM games WHERE name = ?")
            .bind(name)
            .execute(&self.pool)
            .await
            .map_err(|e| storage_error("Failed to delete game", e))?;
        Ok(res.rows_affected())
    }
}
