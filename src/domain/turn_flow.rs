//! Turn-phase transitions: drawing, handing the turn over, and the
//! quarantine countdown tied to the turn boundary.
//!
//! The legality checks that gate these transitions live in the service's
//! validation layer; this module assumes its callers already validated and
//! only enforces the invariants it cannot function without.

use crate::domain::cards::CardId;
use crate::domain::dealing::{draw_from_deck, give_card_to_player};
use crate::domain::rules::RuleConfig;
use crate::domain::seating::next_owner;
use crate::domain::state::{
    require_turn, require_turn_mut, Game, PlayerId, TablePosition, Turn, TurnPhase,
};
use crate::errors::domain::{DomainError, ValidationKind};

/// The turn owner draws the top card; the turn moves to `Deciding`.
pub fn draw_for_turn(game: &mut Game, nonce: u64, player_id: PlayerId) -> Result<CardId, DomainError> {
    let card_id = draw_from_deck(game, nonce)?;
    give_card_to_player(game, card_id, player_id);
    require_turn_mut(game)?.phase = TurnPhase::Deciding;
    Ok(card_id)
}

/// Record a played card awaiting the target's response.
pub fn stage_played_card(
    game: &mut Game,
    card_id: CardId,
    target_name: &str,
) -> Result<(), DomainError> {
    let turn = require_turn_mut(game)?;
    turn.played_card = Some(card_id);
    turn.destination_player = target_name.to_string();
    turn.phase = TurnPhase::WaitingResponse;
    Ok(())
}

/// Move a settled exchange to the finish gate. `FinishedExchange` is only
/// observable inside the mutation that produced it.
pub fn settle_exchange(game: &mut Game) -> Result<(), DomainError> {
    let turn = require_turn_mut(game)?;
    if turn.phase != TurnPhase::FinishedExchange {
        return Err(DomainError::validation(
            ValidationKind::PhaseMismatch,
            "no exchange to settle",
        ));
    }
    turn.phase = TurnPhase::WaitingToFinish;
    Ok(())
}

/// Close the current turn and open the next one.
///
/// Only legal from `WaitingToFinish`. The outgoing owner's quarantine ticks
/// down here, so "two rounds" means the countdown survives exactly two of
/// their own turn boundaries. A seat-swap card that went unanswered grants
/// the mover a second consecutive turn; the turn record resets either way.
pub fn finish_turn(game: &mut Game, config: &RuleConfig) -> Result<TablePosition, DomainError> {
    let turn = require_turn(game)?;
    if turn.phase != TurnPhase::WaitingToFinish {
        return Err(DomainError::validation(
            ValidationKind::PhaseMismatch,
            "turn is not ready to finish",
        ));
    }

    let outgoing = turn.owner;
    let extra_turn = turn
        .played_card
        .and_then(|id| game.card(id))
        .map(|card| config.grants_extra_turn(card.code))
        .unwrap_or(false)
        && turn.response_card.is_none();

    let outgoing_id = game.player_at_position(outgoing).map(|p| p.id);
    if let Some(id) = outgoing_id {
        if let Some(player) = game.player_mut(id) {
            player.quarantine = player.quarantine.saturating_sub(1);
        }
    }

    let next = if extra_turn {
        outgoing
    } else {
        next_owner(game, outgoing)?
    };
    game.turn = Some(Turn::new(next));
    Ok(next)
}
