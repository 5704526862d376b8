//! Lobby operations: create, join, leave.

use tracing::info;

use crate::domain::rules::{MAX_PLAYERS, MIN_PLAYERS};
use crate::domain::state::{
    require_player, Game, GameId, GamePhase, Player, PlayerId, Role,
};
use crate::error::AppError;
use crate::errors::domain::{DomainError, ValidationKind};
use crate::notify::EventEnvelope;
use crate::services::game_flow::{validation, GameFlowService};

#[derive(Debug, Clone)]
pub struct CreateGameRequest {
    pub name: String,
    pub owner_name: String,
    pub min_players: u8,
    pub max_players: u8,
    pub password: Option<String>,
    /// Fixed seed for deterministic sessions; generated when absent.
    pub seed: Option<u64>,
}

fn validate_bounds(req: &CreateGameRequest) -> Result<(), DomainError> {
    if req.name.trim().is_empty() || req.owner_name.trim().is_empty() {
        return Err(DomainError::validation(
            ValidationKind::Other("EMPTY_NAME".into()),
            "game and owner names must be non-empty",
        ));
    }
    if req.min_players < MIN_PLAYERS
        || req.max_players > MAX_PLAYERS
        || req.min_players > req.max_players
    {
        return Err(DomainError::validation_other(format!(
            "player bounds must satisfy {MIN_PLAYERS} <= min <= max <= {MAX_PLAYERS}"
        )));
    }
    Ok(())
}

fn next_player_id(game: &Game) -> PlayerId {
    game.players.iter().map(|p| p.id).max().unwrap_or(0) + 1
}

fn seat_player(game: &mut Game, name: &str, owner: bool) -> PlayerId {
    let id = next_player_id(game);
    game.players.push(Player {
        id,
        name: name.to_string(),
        table_position: game.players.len() as u8 + 1,
        role: Role::Unassigned,
        alive: true,
        quarantine: 0,
        owner,
    });
    id
}

impl GameFlowService {
    /// Create a lobby with its owner already seated. Returns the game id and
    /// the owner's player id.
    pub async fn create_game(
        &self,
        req: CreateGameRequest,
    ) -> Result<(GameId, PlayerId), AppError> {
        validate_bounds(&req)?;

        let mut game = Game {
            id: 0,
            name: req.name.clone(),
            min_players: req.min_players,
            max_players: req.max_players,
            password: req.password.clone(),
            phase: GamePhase::Waiting,
            play_direction: None,
            rng_seed: req.seed.unwrap_or_else(rand::random),
            obstacles: Vec::new(),
            players: Vec::new(),
            deck: Vec::new(),
            turn: None,
            log: Vec::new(),
        };
        let owner_id = seat_player(&mut game, &req.owner_name, true);
        game.append_log(format!("{} opened the lobby", req.owner_name));

        let game = self.repo().create(game).await?;
        info!(game_id = game.id, name = %game.name, "game created");
        Ok((game.id, owner_id))
    }

    /// Seat a new player in a waiting lobby.
    pub async fn join_game(
        &self,
        game_id: GameId,
        name: &str,
        password: Option<&str>,
    ) -> Result<PlayerId, AppError> {
        let mut game = self.repo().fetch(game_id).await?;
        validation::ensure_may_join(&game, name)?;
        if game.password.is_some() && game.password.as_deref() != password {
            return Err(DomainError::validation(
                ValidationKind::Other("BAD_PASSWORD".into()),
                "wrong lobby password",
            )
            .into());
        }

        let player_id = seat_player(&mut game, name, false);
        game.append_log(format!("{name} joined"));
        self.repo().save(game.clone()).await?;

        info!(game_id, player_id, "player joined");
        self.broadcast_state(&game).await;
        Ok(player_id)
    }

    /// Leave a waiting lobby. The owner leaving aborts the whole game; the
    /// record stays around in the `Aborted` phase. Anyone else just frees
    /// their seat and positions compact.
    pub async fn leave_game(&self, game_id: GameId, player_id: PlayerId) -> Result<(), AppError> {
        let mut game = self.repo().fetch(game_id).await?;
        validation::ensure_phase(&game, GamePhase::Waiting)?;
        let leaving = require_player(&game, player_id)?;
        let name = leaving.name.clone();
        let is_owner = leaving.owner;

        if is_owner {
            game.phase = GamePhase::Aborted;
            game.append_log(format!("{name} left; game aborted"));
            self.repo().save(game).await?;
            info!(game_id, "owner left, game aborted");
            self.notifier()
                .notify_game(game_id, EventEnvelope::GameAborted)
                .await;
            return Ok(());
        }

        game.players.retain(|p| p.id != player_id);
        for (i, player) in game.players.iter_mut().enumerate() {
            player.table_position = i as u8 + 1;
        }
        game.append_log(format!("{name} left"));
        self.repo().save(game.clone()).await?;

        info!(game_id, player_id, "player left");
        self.broadcast_state(&game).await;
        Ok(())
    }
}
