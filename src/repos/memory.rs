//! In-memory repository, the default store for tests and single-process
//! hosts.

use async_trait::async_trait;
use dashmap::DashMap;
use parking_lot::Mutex;

use crate::domain::state::{Game, GameId};
use crate::errors::domain::{DomainError, NotFoundKind};
use crate::repos::games::GameRepository;

#[derive(Default)]
pub struct InMemoryGameRepository {
    games: DashMap<GameId, Game>,
    next_id: Mutex<GameId>,
}

impl InMemoryGameRepository {
    pub fn new() -> Self {
        Self::default()
    }

    fn allocate_id(&self) -> GameId {
        let mut next = self.next_id.lock();
        *next += 1;
        *next
    }
}

#[async_trait]
impl GameRepository for InMemoryGameRepository {
    async fn create(&self, mut game: Game) -> Result<Game, DomainError> {
        game.id = self.allocate_id();
        self.games.insert(game.id, game.clone());
        Ok(game)
    }

    async fn fetch(&self, id: GameId) -> Result<Game, DomainError> {
        self.games
            .get(&id)
            .map(|entry| entry.value().clone())
            .ok_or_else(|| DomainError::not_found(NotFoundKind::Game, format!("game {id} not found")))
    }

    async fn save(&self, game: Game) -> Result<(), DomainError> {
        let id = game.id;
        if !self.games.contains_key(&id) {
            return Err(DomainError::not_found(
                NotFoundKind::Game,
                format!("game {id} not found"),
            ));
        }
        self.games.insert(id, game);
        Ok(())
    }

    async fn delete(&self, id: GameId) -> Result<(), DomainError> {
        self.games
            .remove(&id)
            .map(|_| ())
            .ok_or_else(|| DomainError::not_found(NotFoundKind::Game, format!("game {id} not found")))
    }

    async fn list(&self) -> Result<Vec<Game>, DomainError> {
        let mut games: Vec<Game> = self.games.iter().map(|entry| entry.value().clone()).collect();
        games.sort_by_key(|g| g.id);
        Ok(games)
    }
}
