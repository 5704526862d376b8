//! Read-model projections of a game, filtered per audience.
//!
//! The public view never carries hands, roles, or the password; each player
//! gets their own private view on top of it. Hidden information only ever
//! leaves the aggregate through these types or an explicit reveal notice.

use serde::{Deserialize, Serialize};

use crate::domain::cards::{Card, CardCode, CardId, CardKind};
use crate::domain::state::{
    Game, GameId, GamePhase, LogEntry, Player, PlayerId, Role, TablePosition, Turn, TurnPhase,
};

/// One card as shown to a player who is allowed to see it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CardView {
    pub id: CardId,
    pub code: CardCode,
    pub name: String,
    pub kind: CardKind,
    pub playable: bool,
}

impl From<&Card> for CardView {
    fn from(card: &Card) -> Self {
        Self {
            id: card.id,
            code: card.code,
            name: card.name.clone(),
            kind: card.kind,
            playable: card.playable,
        }
    }
}

/// A player as everyone at the table sees them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerPublic {
    pub id: PlayerId,
    pub name: String,
    pub table_position: TablePosition,
    pub alive: bool,
    pub quarantined: bool,
    pub owner: bool,
    pub hand_size: usize,
}

impl PlayerPublic {
    fn project(game: &Game, player: &Player) -> Self {
        Self {
            id: player.id,
            name: player.name.clone(),
            table_position: player.table_position,
            alive: player.alive,
            quarantined: player.quarantine > 0,
            owner: player.owner,
            hand_size: game.hand_size_of(player.id),
        }
    }
}

/// The turn record as broadcast to the table. Card contents stay hidden; the
/// table only learns which step the turn is in and who is involved.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TurnPublic {
    pub owner: TablePosition,
    pub phase: TurnPhase,
    pub destination_player: String,
    pub destination_player_exchange: String,
}

impl From<&Turn> for TurnPublic {
    fn from(turn: &Turn) -> Self {
        Self {
            owner: turn.owner,
            phase: turn.phase,
            destination_player: turn.destination_player.clone(),
            destination_player_exchange: turn.destination_player_exchange.clone(),
        }
    }
}

/// The whole game as broadcast to everyone at the table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GamePublic {
    pub id: GameId,
    pub name: String,
    pub min_players: u8,
    pub max_players: u8,
    pub phase: GamePhase,
    pub play_direction: Option<bool>,
    pub obstacles: Vec<TablePosition>,
    pub players: Vec<PlayerPublic>,
    pub turn: Option<TurnPublic>,
    pub log: Vec<LogEntry>,
}

impl GamePublic {
    pub fn project(game: &Game) -> Self {
        let mut players: Vec<PlayerPublic> = game
            .players
            .iter()
            .map(|p| PlayerPublic::project(game, p))
            .collect();
        players.sort_by_key(|p| p.table_position);
        Self {
            id: game.id,
            name: game.name.clone(),
            min_players: game.min_players,
            max_players: game.max_players,
            phase: game.phase,
            play_direction: game.play_direction,
            obstacles: game.obstacles.clone(),
            players,
            turn: game.turn.as_ref().map(TurnPublic::from),
            log: game.log.clone(),
        }
    }
}

/// One player's private slice: their own hand and role on top of what the
/// table sees.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerPrivate {
    pub id: PlayerId,
    pub name: String,
    pub table_position: TablePosition,
    pub role: Role,
    pub alive: bool,
    pub quarantined: bool,
    pub hand: Vec<CardView>,
}

impl PlayerPrivate {
    pub fn project(game: &Game, player_id: PlayerId) -> Option<Self> {
        let player = game.player(player_id)?;
        Some(Self {
            id: player.id,
            name: player.name.clone(),
            table_position: player.table_position,
            role: player.role,
            alive: player.alive,
            quarantined: player.quarantine > 0,
            hand: game.hand_of(player_id).into_iter().map(CardView::from).collect(),
        })
    }
}

/// Lobby listing entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameListItem {
    pub id: GameId,
    pub name: String,
    pub min_players: u8,
    pub max_players: u8,
    pub seated: usize,
    pub has_password: bool,
    pub phase: GamePhase,
}

impl GameListItem {
    pub fn project(game: &Game) -> Self {
        Self {
            id: game.id,
            name: game.name.clone(),
            min_players: game.min_players,
            max_players: game.max_players,
            seated: game.players.len(),
            has_password: game.password.is_some(),
            phase: game.phase,
        }
    }
}
