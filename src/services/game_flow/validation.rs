//! Composable legality checks, run before any mutation.
//!
//! Every check returns a [`DomainError`] that maps onto one closed
//! [`crate::errors::ErrorCode`], so hosts can surface precise rejections
//! without this module knowing anything about transports.

use crate::domain::cards::{Card, CardCode, CardKind, CardState};
use crate::domain::rules::{RuleConfig, HAND_LIMIT};
use crate::domain::seating::are_adjacent;
use crate::domain::state::{
    require_card, require_player, require_turn, Game, GamePhase, Player, PlayerId, Role, TurnPhase,
};
use crate::errors::domain::{ConflictKind, DomainError, ValidationKind};

pub fn ensure_phase(game: &Game, expected: GamePhase) -> Result<(), DomainError> {
    if game.phase != expected {
        return Err(DomainError::validation(
            ValidationKind::PhaseMismatch,
            format!("game {} is not in the {expected:?} phase", game.id),
        ));
    }
    Ok(())
}

pub fn ensure_turn_phase(game: &Game, expected: &[TurnPhase]) -> Result<(), DomainError> {
    let phase = require_turn(game)?.phase;
    if !expected.contains(&phase) {
        return Err(DomainError::validation(
            ValidationKind::PhaseMismatch,
            format!("turn is in {phase:?}"),
        ));
    }
    Ok(())
}

pub fn ensure_alive(player: &Player) -> Result<(), DomainError> {
    if !player.alive {
        return Err(DomainError::validation(
            ValidationKind::IllegalTarget,
            format!("player {} is eliminated", player.name),
        ));
    }
    Ok(())
}

/// The acting player must hold the current turn.
pub fn ensure_turn_owner(game: &Game, player_id: PlayerId) -> Result<(), DomainError> {
    let player = require_player(game, player_id)?;
    let turn = require_turn(game)?;
    if player.table_position != turn.owner {
        return Err(DomainError::validation(
            ValidationKind::NotYourTurn,
            format!("it is not {}'s turn", player.name),
        ));
    }
    Ok(())
}

pub fn ensure_card_in_hand<'a>(
    game: &'a Game,
    player_id: PlayerId,
    card_id: i64,
) -> Result<&'a Card, DomainError> {
    let card = require_card(game, card_id)?;
    if card.state != CardState::InHand || card.player_id != Some(player_id) {
        return Err(DomainError::validation(
            ValidationKind::CardNotInHand,
            format!("card {card_id} is not in player {player_id}'s hand"),
        ));
    }
    Ok(card)
}

/// Playing or discarding requires the post-draw hand; drawing requires the
/// resting hand.
pub fn ensure_may_shed_card(game: &Game, player_id: PlayerId) -> Result<(), DomainError> {
    if game.hand_size_of(player_id) < HAND_LIMIT {
        return Err(DomainError::validation(
            ValidationKind::HandConstraint,
            "draw before playing or discarding",
        ));
    }
    Ok(())
}

pub fn ensure_may_draw(game: &Game, player_id: PlayerId) -> Result<(), DomainError> {
    if game.hand_size_of(player_id) >= HAND_LIMIT {
        return Err(DomainError::validation(
            ValidationKind::HandConstraint,
            "hand is already full",
        ));
    }
    Ok(())
}

/// A card can be played as a turn action only if it is flagged playable and
/// is not a defense card; defense cards act in response only.
pub fn ensure_playable_as_action(card: &Card) -> Result<(), DomainError> {
    if !card.playable || card.kind == CardKind::Defense {
        return Err(DomainError::validation(
            ValidationKind::CardNotPlayable,
            format!("{} cannot be played as a turn action", card.code.as_str()),
        ));
    }
    Ok(())
}

/// A responder may only answer with an exchange defense card.
pub fn ensure_playable_as_defense(card: &Card) -> Result<(), DomainError> {
    if card.kind != CardKind::Defense {
        return Err(DomainError::validation(
            ValidationKind::CardNotPlayable,
            format!("{} is not a defense card", card.code.as_str()),
        ));
    }
    Ok(())
}

/// Target legality for a played action card: self-target codes must point at
/// the actor, everything else at a living other player, adjacent unless the
/// code is exempt. Quarantine blocks the listed codes at the source.
pub fn ensure_legal_target(
    game: &Game,
    config: &RuleConfig,
    code: CardCode,
    actor_id: PlayerId,
    target_id: PlayerId,
) -> Result<(), DomainError> {
    let actor = require_player(game, actor_id)?;
    let target = require_player(game, target_id)?;
    ensure_alive(target)?;

    if config.blocked_by_quarantine(code) && actor.quarantine > 0 {
        return Err(DomainError::validation(
            ValidationKind::IllegalTarget,
            format!("{} cannot be played from quarantine", code.as_str()),
        ));
    }

    if config.allows_self_target(code) {
        if actor_id != target_id {
            return Err(DomainError::validation(
                ValidationKind::IllegalTarget,
                format!("{} only targets its own player", code.as_str()),
            ));
        }
        return Ok(());
    }

    if actor_id == target_id {
        return Err(DomainError::validation(
            ValidationKind::IllegalTarget,
            format!("{} cannot target its own player", code.as_str()),
        ));
    }

    if !config.exempt_from_adjacency(code)
        && !are_adjacent(game, actor.table_position, target.table_position)
    {
        return Err(DomainError::validation(
            ValidationKind::IllegalTarget,
            format!("{} must target an adjacent player", code.as_str()),
        ));
    }

    Ok(())
}

/// The responder must be the player the pending action or exchange points at.
pub fn ensure_is_respondent(game: &Game, player_id: PlayerId) -> Result<(), DomainError> {
    let player = require_player(game, player_id)?;
    let turn = require_turn(game)?;
    let expected = match turn.phase {
        TurnPhase::WaitingResponse => &turn.destination_player,
        TurnPhase::Exchanging => &turn.destination_player_exchange,
        _ => {
            return Err(DomainError::validation(
                ValidationKind::PhaseMismatch,
                "nothing to respond to",
            ))
        }
    };
    if &player.name != expected {
        return Err(DomainError::validation(
            ValidationKind::NotYourTurn,
            format!("{} is not the pending respondent", player.name),
        ));
    }
    Ok(())
}

/// Offer restrictions for exchanges: the role card never leaves its holder,
/// and an infected player may not hand over their last infection marker.
pub fn ensure_may_offer(game: &Game, player_id: PlayerId, card_id: i64) -> Result<(), DomainError> {
    let card = ensure_card_in_hand(game, player_id, card_id)?;
    match card.code {
        CardCode::TheThing => Err(DomainError::validation(
            ValidationKind::CardNotPlayable,
            "the role card cannot be exchanged",
        )),
        CardCode::Infection => {
            let player = require_player(game, player_id)?;
            let infection_count = game
                .hand_of(player_id)
                .iter()
                .filter(|c| c.code == CardCode::Infection)
                .count();
            match player.role {
                Role::TheThing => Ok(()),
                Role::Infected if infection_count > 1 => Ok(()),
                _ => Err(DomainError::validation(
                    ValidationKind::CardNotPlayable,
                    "this infection marker cannot be handed over",
                )),
            }
        }
        _ => Ok(()),
    }
}

/// Lobby-join preconditions.
pub fn ensure_may_join(game: &Game, name: &str) -> Result<(), DomainError> {
    if game.phase != GamePhase::Waiting {
        return Err(DomainError::conflict(
            ConflictKind::GameAlreadyStarted,
            format!("game {} already started", game.id),
        ));
    }
    if game.players.len() as u8 >= game.max_players {
        return Err(DomainError::conflict(
            ConflictKind::GameFull,
            format!("game {} is full", game.id),
        ));
    }
    if game.player_by_name(name).is_some() {
        return Err(DomainError::conflict(
            ConflictKind::DuplicateName,
            format!("name '{name}' is taken in game {}", game.id),
        ));
    }
    Ok(())
}
