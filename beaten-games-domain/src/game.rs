use std::sync::{Arc, Mutex};

use chrono::{Local, NaiveDate};
use log::info;
use serde::Deserialize;

use crate::{
    ServiceError, ServiceResult,
    nullable::{BeatenOn, Note},
    util::{parse_date, validate_name},
};

pub type GameId = i64;

/// A beaten game as it is stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Game {
    pub id: GameId,
    pub name: String,
    pub note: Note,
    pub beaten_on: BeatenOn,
}

/// A beaten game that has not been stored yet. Storage assigns the id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewGame {
    pub name: String,
    pub note: Note,
    pub beaten_on: BeatenOn,
}

/// Fields submitted by the full add form. Missing fields deserialize as empty.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct AddGameForm {
    pub name: String,
    pub note: String,
    pub beaten_on: String,
}

/// Form carrying only a game name, used by quick add and delete.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct GameNameForm {
    pub name: String,
}

impl NewGame {
    /// The note is always present, even when blank. An empty date field is
    /// stored as the zero date rather than as absent.
    pub fn from_add_form(form: AddGameForm) -> ServiceResult<Self> {
        let beaten_on = if form.beaten_on.is_empty() {
            BeatenOn::zero()
        } else {
            BeatenOn::present(parse_date(&form.beaten_on)?)
        };
        Ok(Self {
            name: form.name,
            note: Note::present(form.note),
            beaten_on,
        })
    }

    pub fn quick(name: String, today: NaiveDate) -> Self {
        Self {
            name,
            note: Note::absent(),
            beaten_on: BeatenOn::present(today),
        }
    }
}

pub type ArcGameRepository = Arc<Box<dyn GameRepository + Send + Sync + 'static>>;

#[async_trait::async_trait]
pub trait GameRepository {
    /// All games in insertion order.
    async fn list_games(&self) -> ServiceResult<Vec<Game>>;
    async fn get_game(&self, id: GameId) -> ServiceResult<Option<Game>>;
    async fn insert_game(&self, game: &NewGame) -> ServiceResult<GameId>;
    /// Deletes every game with exactly this name and returns how many were removed.
    async fn delete_games_by_name(&self, name: &str) -> ServiceResult<u64>;
}

pub type ArcGameService = Arc<Box<dyn GameService + Send + Sync + 'static>>;

#[async_trait::async_trait]
pub trait GameService {
    async fn list_games(&self) -> ServiceResult<Vec<Game>>;
    async fn get_game(&self, id: GameId) -> ServiceResult<Game>;
    async fn add_game(&self, form: AddGameForm) -> ServiceResult<GameId>;
    async fn quick_add_game(&self, name: String) -> ServiceResult<GameId>;
    async fn delete_game(&self, name: &str) -> ServiceResult<u64>;
}

pub struct GameServiceImpl {
    game_repository: ArcGameRepository,
}

impl GameServiceImpl {
    pub fn new(game_repository: ArcGameRepository) -> Self {
        Self { game_repository }
    }

    async fn insert_validated(&self, game: NewGame) -> ServiceResult<GameId> {
        validate_name(&game.name)?;
        let id = self.game_repository.insert_game(&game).await?;
        info!("Added game {} with id {}", game.name, id);
        Ok(id)
    }
}

#[async_trait::async_trait]
impl GameService for GameServiceImpl {
    async fn list_games(&self) -> ServiceResult<Vec<Game>> {
        self.game_repository.list_games().await
    }

    async fn get_game(&self, id: GameId) -> ServiceResult<Game> {
        match self.game_repository.get_game(id).await? {
            Some(game) => Ok(game),
            None => ServiceError::not_found(format!("No game with id {}.", id)),
        }
    }

    async fn add_game(&self, form: AddGameForm) -> ServiceResult<GameId> {
        let game = NewGame::from_add_form(form)?;
        self.insert_validated(game).await
    }

    async fn quick_add_game(&self, name: String) -> ServiceResult<GameId> {
        let today = Local::now().date_naive();
        self.insert_validated(NewGame::quick(name, today)).await
    }

    async fn delete_game(&self, name: &str) -> ServiceResult<u64> {
        let deleted = self.game_repository.delete_games_by_name(name).await?;
        if deleted == 0 {
            return ServiceError::bad_request("Can't find this game.");
        }
        info!("Deleted {} game(s) named {}", deleted, name);
        Ok(deleted)
    }
}

/// In-memory repository for tests. Set `fail` to make every call return a storage error.
#[derive(Default, Clone)]
pub struct MockGameRepository {
    games: Arc<Mutex<Vec<Game>>>,
    next_id: Arc<Mutex<GameId>>,
    pub fail: bool,
}

#[allow(unused)]
impl MockGameRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }

    pub fn get_games(&self) -> Vec<Game> {
        self.games.lock().unwrap().clone()
    }

    fn check(&self) -> ServiceResult<()> {
        if self.fail {
            return ServiceError::storage("mock storage failure");
        }
        Ok(())
    }
}

#[async_trait::async_trait]
impl GameRepository for MockGameRepository {
    async fn list_games(&self) -> ServiceResult<Vec<Game>> {
        self.check()?;
        Ok(self.get_games())
    }

    async fn get_game(&self, id: GameId) -> ServiceResult<Option<Game>> {
        self.check()?;
        Ok(self.get_games().into_iter().find(|g| g.id == id))
    }

    async fn insert_game(&self, game: &NewGame) -> ServiceResult<GameId> {
        self.check()?;
        let mut next_id = self.next_id.lock().unwrap();
        *next_id += 1;
        self.games.lock().unwrap().push(Game {
            id: *next_id,
            name: game.name.clone(),
            note: game.note.clone(),
            beaten_on: game.beaten_on.clone(),
        });
        Ok(*next_id)
    }

    async fn delete_games_by_name(&self, name: &str) -> ServiceResult<u64> {
        self.check()?;
        let mut games = self.games.lock().unwrap();
        let before = games.len();
        games.retain(|g| g.name != name);
        Ok((before - games.len()) as u64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn service_with(repo: &MockGameRepository) -> GameServiceImpl {
        GameServiceImpl::new(Arc::new(Box::new(repo.clone())))
    }

    fn add_form(name: &str, note: &str, beaten_on: &str) -> AddGameForm {
        AddGameForm {
            name: name.to_string(),
            note: note.to_string(),
            beaten_on: beaten_on.to_string(),
        }
    }

    #[test]
    fn test_add_form_keeps_blank_note_present() {
        let game = NewGame::from_add_form(add_form("Hades", "", "2020-12-10")).unwrap();
        assert_eq!(game.note, Note::present(String::new()));
        assert_eq!(
            game.beaten_on,
            BeatenOn::present(NaiveDate::from_ymd_opt(2020, 12, 10).unwrap())
        );
    }

    #[test]
    fn test_add_form_empty_date_is_zero_date() {
        let game = NewGame::from_add_form(add_form("Hades", "good", "")).unwrap();
        assert_eq!(game.beaten_on, BeatenOn::zero());
        assert_eq!(game.note.get(), "good");
    }

    #[test]
    fn test_add_form_rejects_malformed_date() {
        assert!(matches!(
            NewGame::from_add_form(add_form("Hades", "", "not-a-date")),
            Err(ServiceError::BadRequest(..))
        ));
    }

    #[tokio::test]
    async fn test_add_game() {
        let repo = MockGameRepository::new();
        let service = service_with(&repo);

        let id = service
            .add_game(add_form("Hades", "", "2020-12-10"))
            .await
            .unwrap();

        let games = repo.get_games();
        assert_eq!(games.len(), 1);
        assert_eq!(games[0].id, id);
        assert_eq!(games[0].name, "Hades");
        assert_eq!(games[0].note, Note::present(String::new()));
        assert_eq!(
            games[0].beaten_on,
            BeatenOn::present(NaiveDate::from_ymd_opt(2020, 12, 10).unwrap())
        );
    }

    #[tokio::test]
    async fn test_add_game_malformed_date_does_not_store() {
        let repo = MockGameRepository::new();
        let service = service_with(&repo);

        assert!(matches!(
            service.add_game(add_form("Hades", "", "not-a-date")).await,
            Err(ServiceError::BadRequest(..))
        ));
        assert!(repo.get_games().is_empty());
    }

    #[tokio::test]
    async fn test_empty_name_is_rejected() {
        let repo = MockGameRepository::new();
        let service = service_with(&repo);

        assert!(matches!(
            service.add_game(add_form("", "note", "2020-12-10")).await,
            Err(ServiceError::BadRequest(..))
        ));
        assert!(matches!(
            service.quick_add_game("  ".to_string()).await,
            Err(ServiceError::BadRequest(..))
        ));
        assert!(repo.get_games().is_empty());
    }

    #[tokio::test]
    async fn test_quick_add_game() {
        let repo = MockGameRepository::new();
        let service = service_with(&repo);

        let before = Local::now().date_naive();
        service.quick_add_game("Celeste".to_string()).await.unwrap();
        let after = Local::now().date_naive();

        let games = repo.get_games();
        assert_eq!(games.len(), 1);
        assert_eq!(games[0].name, "Celeste");
        assert!(!games[0].note.is_present());
        let beaten_on = *games[0].beaten_on.get();
        assert!(beaten_on == before || beaten_on == after);
    }

    #[tokio::test]
    async fn test_ids_are_unique() {
        let repo = MockGameRepository::new();
        let service = service_with(&repo);

        let first = service.quick_add_game("Celeste".to_string()).await.unwrap();
        let second = service.quick_add_game("Celeste".to_string()).await.unwrap();
        assert_ne!(first, second);

        let games = service.list_games().await.unwrap();
        assert_eq!(games.len(), 2);
    }

    #[tokio::test]
    async fn test_delete_game() {
        let repo = MockGameRepository::new();
        let service = service_with(&repo);

        service.quick_add_game("Celeste".to_string()).await.unwrap();
        service.quick_add_game("Celeste".to_string()).await.unwrap();
        service.quick_add_game("Hades".to_string()).await.unwrap();

        assert_eq!(service.delete_game("Celeste").await.unwrap(), 2);
        let games = repo.get_games();
        assert_eq!(games.len(), 1);
        assert_eq!(games[0].name, "Hades");
    }

    #[tokio::test]
    async fn test_delete_missing_game_is_bad_request() {
        let repo = MockGameRepository::new();
        let service = service_with(&repo);
        service.quick_add_game("Hades".to_string()).await.unwrap();

        assert!(matches!(
            service.delete_game("Celeste").await,
            Err(ServiceError::BadRequest(..))
        ));
        assert_eq!(repo.get_games().len(), 1);
    }

    #[tokio::test]
    async fn test_get_game() {
        let repo = MockGameRepository::new();
        let service = service_with(&repo);
        let id = service.quick_add_game("Celeste".to_string()).await.unwrap();

        assert_eq!(service.get_game(id).await.unwrap().name, "Celeste");
        assert!(matches!(
            service.get_game(id + 1).await,
            Err(ServiceError::NotFound(..))
        ));
    }

    #[tokio::test]
    async fn test_storage_failure_propagates() {
        let repo = MockGameRepository::failing();
        let service = service_with(&repo);

        assert!(matches!(
            service.list_games().await,
            Err(ServiceError::Storage(..))
        ));
        assert!(matches!(
            service.delete_game("Celeste").await,
            Err(ServiceError::Storage(..))
        ));
    }
}
