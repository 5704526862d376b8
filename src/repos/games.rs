//! Game repository trait.

use async_trait::async_trait;

use crate::domain::state::{Game, GameId};
use crate::errors::domain::DomainError;

/// Whole-aggregate persistence for game sessions.
///
/// `create` assigns the id; everything else addresses an existing aggregate.
/// Implementations report missing games as [`DomainError::NotFound`] and
/// store trouble as [`DomainError::Infra`].
#[async_trait]
pub trait GameRepository: Send + Sync {
    /// Persist a new game and return it with its assigned id.
    async fn create(&self, game: Game) -> Result<Game, DomainError>;

    /// Load the full aggregate.
    async fn fetch(&self, id: GameId) -> Result<Game, DomainError>;

    /// Write the mutated aggregate back.
    async fn save(&self, game: Game) -> Result<(), DomainError>;

    /// Remove a game entirely (aborted lobbies).
    async fn delete(&self, id: GameId) -> Result<(), DomainError>;

    /// All games, for the lobby listing.
    async fn list(&self) -> Result<Vec<Game>, DomainError>;
}
