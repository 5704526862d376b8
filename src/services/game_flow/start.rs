//! Game start: deck seeding, the initial deal, role assignment, and the
//! first turn.

use tracing::info;

use crate::domain::dealing::{assign_initial_hands, build_deck};
use crate::domain::seating::next_owner;
use crate::domain::state::{require_player, GameId, GamePhase, PlayerId, Turn};
use crate::error::AppError;
use crate::errors::domain::{ConflictKind, DomainError, ValidationKind};
use crate::services::game_flow::{validation, GameFlowService};

impl GameFlowService {
    /// Start a waiting game. Owner-only; requires the minimum seat count.
    /// Seats keep their join order, play runs clockwise, and the first turn
    /// belongs to the first seated player.
    pub async fn start_game(&self, game_id: GameId, player_id: PlayerId) -> Result<(), AppError> {
        let mut game = self.repo().fetch(game_id).await?;
        validation::ensure_phase(&game, GamePhase::Waiting)?;
        let caller = require_player(&game, player_id)?;
        if !caller.owner {
            return Err(DomainError::validation(
                ValidationKind::NotYourTurn,
                "only the owner starts the game",
            )
            .into());
        }
        let seated = game.players.len() as u8;
        if seated < game.min_players {
            return Err(DomainError::conflict(
                ConflictKind::Other("NOT_ENOUGH_PLAYERS".into()),
                format!("need {} players, have {seated}", game.min_players),
            )
            .into());
        }

        game.deck = build_deck(seated, game.rng_seed);
        game.play_direction = Some(true);
        assign_initial_hands(&mut game)?;

        let first_seat = 1;
        let mut turn = Turn::new(first_seat);
        let neighbor = next_owner(&game, first_seat)?;
        turn.destination_player_exchange = game
            .player_at_position(neighbor)
            .map(|p| p.name.clone())
            .unwrap_or_default();
        game.turn = Some(turn);
        game.phase = GamePhase::Playing;
        game.append_log(format!("game started with {seated} players"));

        self.repo().save(game.clone()).await?;
        info!(game_id, seated, first_seat, "game started");

        self.broadcast_state(&game).await;
        for player in &game.players {
            self.push_hand(&game, player.id).await;
        }
        Ok(())
    }
}
