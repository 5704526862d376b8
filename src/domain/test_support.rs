//! Shared builders for domain unit tests.

use crate::domain::cards::{Card, CardCode, CardId, CardKind, CardState};
use crate::domain::state::{Game, GamePhase, Player, Role, Turn, TurnPhase};

/// A playing game with one living human per given position, empty deck, and
/// a turn owned by the first position.
pub fn game_with_positions(positions: &[u8]) -> Game {
    let players = positions
        .iter()
        .enumerate()
        .map(|(i, &pos)| Player {
            id: (i + 1) as i64,
            name: format!("p{pos}"),
            table_position: pos,
            role: Role::Human,
            alive: true,
            quarantine: 0,
            owner: i == 0,
        })
        .collect();

    Game {
        id: 1,
        name: "test".into(),
        min_players: 4,
        max_players: 12,
        password: None,
        phase: GamePhase::Playing,
        play_direction: Some(true),
        rng_seed: 7,
        obstacles: Vec::new(),
        players,
        deck: Vec::new(),
        turn: Some(Turn::new(positions[0])),
        log: Vec::new(),
    }
}

/// Append a card to the deck in the given player's hand (or in the deck when
/// `player_id` is `None`) and return its id.
pub fn add_card(game: &mut Game, code: CardCode, player_id: Option<i64>) -> CardId {
    let id = game.deck.len() as CardId + 1;
    let kind = match code {
        CardCode::Scary | CardCode::NoThanks | CardCode::Missed => CardKind::Defense,
        CardCode::LockedDoor => CardKind::Obstacle,
        CardCode::Infection => CardKind::Infection,
        CardCode::WheresTheParty | CardCode::RoundAndRound | CardCode::RottenRope => CardKind::Panic,
        CardCode::TheThing => CardKind::TheThing,
        _ => CardKind::Action,
    };
    game.deck.push(Card {
        id,
        code,
        name: code.as_str().to_string(),
        kind,
        number_in_card: 4,
        state: if player_id.is_some() {
            CardState::InHand
        } else {
            CardState::InDeck
        },
        playable: !matches!(code, CardCode::TheThing | CardCode::Infection),
        player_id,
    });
    id
}

/// Put the turn into the given phase with the given owner position.
pub fn set_turn(game: &mut Game, owner: u8, phase: TurnPhase) {
    let mut turn = Turn::new(owner);
    turn.phase = phase;
    game.turn = Some(turn);
}
