//! Session aggregates: `Game`, `Player`, `Turn`, and their phase enums.
//!
//! A `Game` exclusively owns its players, deck, turn record, and log. Cards
//! hold the owning player's id instead of a reference, so a hand is always
//! the filtered view [`Game::hand_of`] rather than a second owned collection.

use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use crate::domain::cards::{Card, CardId, CardState};
use crate::errors::domain::{DomainError, NotFoundKind};

pub type GameId = i64;
pub type PlayerId = i64;

/// Seat number around the table, 1-based and contiguous over seated players.
pub type TablePosition = u8;

/// Overall session lifecycle.
///
/// Legal transitions: `Waiting` → `Playing` → `Finished`, or
/// `Waiting` → `Aborted`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GamePhase {
    /// Lobby: players may join or leave.
    Waiting,
    /// Turns cycle until a win condition fires.
    Playing,
    /// A win condition fired; winners are recorded in the log.
    Finished,
    /// The owner left before start.
    Aborted,
}

/// Hidden role of a player, assigned when the game starts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Unassigned,
    Human,
    Infected,
    TheThing,
}

/// Step within one player's turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TurnPhase {
    /// New turn: the owner must draw a card.
    Steal,
    /// Owner holds five cards and must play or discard one.
    Deciding,
    /// An action card targets another player, who may respond.
    WaitingResponse,
    /// A card exchange is pending between two players.
    Exchanging,
    /// The exchange just resolved (observable in the mutation result only).
    FinishedExchange,
    /// All effects resolved; anyone may call finish-turn.
    WaitingToFinish,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Player {
    pub id: PlayerId,
    pub name: String,
    pub table_position: TablePosition,
    pub role: Role,
    pub alive: bool,
    /// Rounds of restricted action remaining; 0 = not quarantined.
    pub quarantine: u8,
    /// Exactly one owner (the creator) per game.
    pub owner: bool,
}

/// The per-game turn record, created when the game starts and mutated on
/// every action until the game finishes.
#[derive(Debug, Clone, PartialEq)]
pub struct Turn {
    /// Table position of the player whose turn it is.
    pub owner: TablePosition,
    /// Card currently being resolved, if any.
    pub played_card: Option<CardId>,
    /// Name of the action's primary target; empty when none.
    pub destination_player: String,
    /// Name of the player due to receive the pending card exchange.
    pub destination_player_exchange: String,
    /// Defense card played in response, if any.
    pub response_card: Option<CardId>,
    /// Card offered by the exchange initiator, held until the target acts.
    pub exchange_offer: Option<CardId>,
    /// Set by a deflection defense; blocks infection transfer for the
    /// deflected target.
    pub exchange_immune: bool,
    pub phase: TurnPhase,
}

impl Turn {
    pub fn new(owner: TablePosition) -> Self {
        Self {
            owner,
            played_card: None,
            destination_player: String::new(),
            destination_player_exchange: String::new(),
            response_card: None,
            exchange_offer: None,
            exchange_immune: false,
            phase: TurnPhase::Steal,
        }
    }
}

/// One append-only log line, ordered by timestamp.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogEntry {
    #[serde(with = "time::serde::rfc3339")]
    pub at: OffsetDateTime,
    pub text: String,
}

/// The full session aggregate. The repository persists and returns this as a
/// unit; the host serializes mutations per game id.
#[derive(Debug, Clone, PartialEq)]
pub struct Game {
    pub id: GameId,
    pub name: String,
    pub min_players: u8,
    pub max_players: u8,
    pub password: Option<String>,
    pub phase: GamePhase,
    /// `true` = clockwise (ascending positions). Unset until Playing.
    pub play_direction: Option<bool>,
    /// Base seed for this session's deterministic shuffles and picks.
    pub rng_seed: u64,
    /// Obstacle markers placed between seats; cleared by the rotten-rope
    /// effect. The boundary after position `p` (in the alive cycle) is `p`.
    pub obstacles: Vec<TablePosition>,
    pub players: Vec<Player>,
    pub deck: Vec<Card>,
    pub turn: Option<Turn>,
    pub log: Vec<LogEntry>,
}

impl Game {
    /// The filtered hand view for one player, ordered by card id.
    pub fn hand_of(&self, player_id: PlayerId) -> Vec<&Card> {
        let mut hand: Vec<&Card> = self
            .deck
            .iter()
            .filter(|c| c.state == CardState::InHand && c.player_id == Some(player_id))
            .collect();
        hand.sort_by_key(|c| c.id);
        hand
    }

    pub fn hand_size_of(&self, player_id: PlayerId) -> usize {
        self.deck
            .iter()
            .filter(|c| c.state == CardState::InHand && c.player_id == Some(player_id))
            .count()
    }

    pub fn player(&self, player_id: PlayerId) -> Option<&Player> {
        self.players.iter().find(|p| p.id == player_id)
    }

    pub fn player_mut(&mut self, player_id: PlayerId) -> Option<&mut Player> {
        self.players.iter_mut().find(|p| p.id == player_id)
    }

    pub fn player_by_name(&self, name: &str) -> Option<&Player> {
        self.players.iter().find(|p| p.name == name)
    }

    pub fn player_at_position(&self, position: TablePosition) -> Option<&Player> {
        self.players.iter().find(|p| p.table_position == position)
    }

    pub fn player_at_position_mut(&mut self, position: TablePosition) -> Option<&mut Player> {
        self.players
            .iter_mut()
            .find(|p| p.table_position == position)
    }

    pub fn card(&self, card_id: CardId) -> Option<&Card> {
        self.deck.iter().find(|c| c.id == card_id)
    }

    pub fn card_mut(&mut self, card_id: CardId) -> Option<&mut Card> {
        self.deck.iter_mut().find(|c| c.id == card_id)
    }

    pub fn alive_count(&self) -> usize {
        self.players.iter().filter(|p| p.alive).count()
    }

    pub fn append_log(&mut self, text: impl Into<String>) {
        self.log.push(LogEntry {
            at: OffsetDateTime::now_utc(),
            text: text.into(),
        });
    }
}

pub fn require_player(game: &Game, player_id: PlayerId) -> Result<&Player, DomainError> {
    game.player(player_id).ok_or_else(|| {
        DomainError::not_found(
            NotFoundKind::Player,
            format!("player {player_id} not in game {}", game.id),
        )
    })
}

pub fn require_player_by_name<'a>(game: &'a Game, name: &str) -> Result<&'a Player, DomainError> {
    game.player_by_name(name).ok_or_else(|| {
        DomainError::not_found(
            NotFoundKind::Player,
            format!("no player named '{name}' in game {}", game.id),
        )
    })
}

pub fn require_card(game: &Game, card_id: CardId) -> Result<&Card, DomainError> {
    game.card(card_id).ok_or_else(|| {
        DomainError::not_found(
            NotFoundKind::Card,
            format!("card {card_id} not in game {}", game.id),
        )
    })
}

pub fn require_turn(game: &Game) -> Result<&Turn, DomainError> {
    game.turn.as_ref().ok_or_else(|| {
        DomainError::not_found(
            NotFoundKind::Turn,
            format!("game {} has no turn record", game.id),
        )
    })
}

pub fn require_turn_mut(game: &mut Game) -> Result<&mut Turn, DomainError> {
    let game_id = game.id;
    game.turn.as_mut().ok_or_else(|| {
        DomainError::not_found(
            NotFoundKind::Turn,
            format!("game {game_id} has no turn record"),
        )
    })
}
