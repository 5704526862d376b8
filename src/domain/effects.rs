//! Card-effect dispatch: one behavior per card code, closed over the enum
//! with a mandatory default arm.
//!
//! Handlers mutate the aggregate in place and report the reveals the service
//! must push after the mutation commits. Every handler that changes table
//! positions recomputes the queued exchange destination from the
//! post-mutation topology; computing it before the seat change is a bug, not
//! a style choice.

use crate::domain::cards::{CardCode, CardId, CardState};
use crate::domain::dealing::{discard_card, draw_from_deck, give_card_to_player, random_card_in_hand};
use crate::domain::rules::RuleConfig;
use crate::domain::seating::{alive_positions, player_at, successor};
use crate::domain::state::{
    require_player, require_turn_mut, Game, PlayerId, Role, TablePosition, TurnPhase,
};
use crate::errors::domain::{DomainError, ValidationKind};

/// A reveal or announcement owed to players after the mutation commits.
/// The service translates these into notifier payloads; they carry ids only
/// so the domain stays transport-free.
#[derive(Debug, Clone, PartialEq)]
pub enum EffectNotice {
    /// Show `owner`'s whole hand to `viewer` alone.
    HandRevealed {
        viewer: PlayerId,
        owner: PlayerId,
        cards: Vec<CardId>,
    },
    /// Show a single card of `owner` to `viewer` alone.
    CardRevealed {
        viewer: PlayerId,
        owner: PlayerId,
        card: CardId,
    },
    /// Show `owner`'s whole hand to the entire table.
    HandShownToAll { owner: PlayerId, cards: Vec<CardId> },
    /// Tell `player` their quarantine was lifted.
    QuarantineLifted { player: PlayerId },
}

/// What a handler did, beyond the in-place mutation.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EffectOutcome {
    pub notices: Vec<EffectNotice>,
}

impl EffectOutcome {
    fn with(notices: Vec<EffectNotice>) -> Self {
        Self { notices }
    }
}

/// Apply the effect of a played action card. The card leaves the actor's
/// hand and is marked played before the code-specific mutation runs.
pub fn apply_card_effect(
    game: &mut Game,
    config: &RuleConfig,
    nonce: u64,
    actor_id: PlayerId,
    target_id: PlayerId,
    card_id: CardId,
) -> Result<EffectOutcome, DomainError> {
    let code = game
        .card(card_id)
        .map(|c| c.code)
        .ok_or_else(|| DomainError::validation_other(format!("card {card_id} vanished")))?;
    discard_card(game, card_id);

    match code {
        CardCode::Flamethrower => eliminate(game, target_id),
        CardCode::WatchYourBack => reverse_direction(game, actor_id),
        CardCode::ChangePlaces | CardCode::RunAway => swap_seats(game, actor_id, target_id),
        CardCode::Analysis => analyze_hand(game, actor_id, target_id),
        CardCode::Suspicion => peek_random_card(game, nonce, actor_id, target_id),
        CardCode::Whisky => show_own_hand(game, actor_id),
        CardCode::Quarantine => quarantine_target(game, config, target_id),
        CardCode::WheresTheParty => lift_all_quarantines(game),
        CardCode::RoundAndRound => rotate_pairs(game, actor_id),
        CardCode::RottenRope => clear_obstacles(game),
        CardCode::LockedDoor => place_obstacle(game, target_id),
        CardCode::Seduction => open_exchange(game, target_id),
        // No bespoke behavior: the discard above is the whole effect.
        _ => Ok(EffectOutcome::default()),
    }
}

fn position_of(game: &Game, player_id: PlayerId) -> Result<TablePosition, DomainError> {
    Ok(require_player(game, player_id)?.table_position)
}

/// Point the queued exchange at the next living seat after `from`.
fn requeue_exchange_from(game: &mut Game, from: TablePosition) -> Result<(), DomainError> {
    let next = player_at(game, from, 1)?;
    let name = game
        .player_at_position(next)
        .map(|p| p.name.clone())
        .unwrap_or_default();
    require_turn_mut(game)?.destination_player_exchange = name;
    Ok(())
}

fn eliminate(game: &mut Game, target_id: PlayerId) -> Result<EffectOutcome, DomainError> {
    let target_pos = position_of(game, target_id)?;
    if let Some(target) = game.player_mut(target_id) {
        target.alive = false;
    }
    // The dead seat drops out of the cycle, so "one past the target" is the
    // first living seat after it.
    requeue_exchange_from(game, target_pos)?;
    Ok(EffectOutcome::default())
}

fn reverse_direction(game: &mut Game, actor_id: PlayerId) -> Result<EffectOutcome, DomainError> {
    let direction = game.play_direction.ok_or_else(|| {
        DomainError::validation(ValidationKind::PhaseMismatch, "game has no play direction")
    })?;
    game.play_direction = Some(!direction);
    let actor_pos = position_of(game, actor_id)?;
    requeue_exchange_from(game, actor_pos)?;
    Ok(EffectOutcome::default())
}

fn swap_seats(
    game: &mut Game,
    actor_id: PlayerId,
    target_id: PlayerId,
) -> Result<EffectOutcome, DomainError> {
    let actor_pos = position_of(game, actor_id)?;
    let target_pos = position_of(game, target_id)?;
    if let Some(actor) = game.player_mut(actor_id) {
        actor.table_position = target_pos;
    }
    if let Some(target) = game.player_mut(target_id) {
        target.table_position = actor_pos;
    }
    // The mover keeps acting from the seat they landed on.
    require_turn_mut(game)?.owner = target_pos;
    requeue_exchange_from(game, target_pos)?;
    Ok(EffectOutcome::default())
}

fn analyze_hand(
    game: &mut Game,
    actor_id: PlayerId,
    target_id: PlayerId,
) -> Result<EffectOutcome, DomainError> {
    let cards = game.hand_of(target_id).iter().map(|c| c.id).collect();
    Ok(EffectOutcome::with(vec![EffectNotice::HandRevealed {
        viewer: actor_id,
        owner: target_id,
        cards,
    }]))
}

fn peek_random_card(
    game: &mut Game,
    nonce: u64,
    actor_id: PlayerId,
    target_id: PlayerId,
) -> Result<EffectOutcome, DomainError> {
    let card = random_card_in_hand(game, target_id, nonce)?;
    Ok(EffectOutcome::with(vec![EffectNotice::CardRevealed {
        viewer: actor_id,
        owner: target_id,
        card,
    }]))
}

fn show_own_hand(game: &mut Game, actor_id: PlayerId) -> Result<EffectOutcome, DomainError> {
    let cards = game.hand_of(actor_id).iter().map(|c| c.id).collect();
    Ok(EffectOutcome::with(vec![EffectNotice::HandShownToAll {
        owner: actor_id,
        cards,
    }]))
}

fn quarantine_target(
    game: &mut Game,
    config: &RuleConfig,
    target_id: PlayerId,
) -> Result<EffectOutcome, DomainError> {
    let rounds = config.quarantine_rounds;
    if let Some(target) = game.player_mut(target_id) {
        target.quarantine = rounds;
    }
    Ok(EffectOutcome::default())
}

fn lift_all_quarantines(game: &mut Game) -> Result<EffectOutcome, DomainError> {
    let mut notices = Vec::new();
    for player in game.players.iter_mut() {
        if player.quarantine > 0 {
            player.quarantine = 0;
            notices.push(EffectNotice::QuarantineLifted { player: player.id });
        }
    }
    Ok(EffectOutcome::with(notices))
}

/// Pair living players walking clockwise from the actor and swap each pair's
/// seats. With an odd cycle the last seat stays put.
fn rotate_pairs(game: &mut Game, actor_id: PlayerId) -> Result<EffectOutcome, DomainError> {
    let actor_pos = position_of(game, actor_id)?;
    let positions = alive_positions(game);
    let start = positions
        .iter()
        .position(|&p| p == actor_pos)
        .ok_or_else(|| {
            DomainError::validation(ValidationKind::IllegalTarget, "actor is not seated")
        })?;

    let n = positions.len();
    let ordered: Vec<TablePosition> = (0..n).map(|i| positions[(start + i) % n]).collect();
    for pair in ordered.chunks_exact(2) {
        let (a, b) = (pair[0], pair[1]);
        let a_id = game.player_at_position(a).map(|p| p.id);
        let b_id = game.player_at_position(b).map(|p| p.id);
        if let (Some(a_id), Some(b_id)) = (a_id, b_id) {
            if let Some(p) = game.player_mut(a_id) {
                p.table_position = b;
            }
            if let Some(p) = game.player_mut(b_id) {
                p.table_position = a;
            }
        }
    }

    // The turn record follows the actor to their resulting seat.
    let new_actor_pos = position_of(game, actor_id)?;
    require_turn_mut(game)?.owner = new_actor_pos;
    requeue_exchange_from(game, new_actor_pos)?;
    Ok(EffectOutcome::default())
}

fn clear_obstacles(game: &mut Game) -> Result<EffectOutcome, DomainError> {
    game.obstacles.clear();
    Ok(EffectOutcome::default())
}

fn place_obstacle(game: &mut Game, target_id: PlayerId) -> Result<EffectOutcome, DomainError> {
    let pos = position_of(game, target_id)?;
    if !game.obstacles.contains(&pos) {
        game.obstacles.push(pos);
    }
    Ok(EffectOutcome::default())
}

fn open_exchange(game: &mut Game, target_id: PlayerId) -> Result<EffectOutcome, DomainError> {
    let name = require_player(game, target_id)?.name.clone();
    let turn = require_turn_mut(game)?;
    turn.phase = TurnPhase::Exchanging;
    turn.destination_player = name.clone();
    turn.destination_player_exchange = name;
    Ok(EffectOutcome::default())
}

/// Resolve a defense card played against a pending exchange.
///
/// The defense card leaves the defender's hand and the defender draws a
/// replacement, so their hand size is preserved across the refusal.
pub fn apply_exchange_defense(
    game: &mut Game,
    nonce: u64,
    defender_id: PlayerId,
    defense_card: CardId,
) -> Result<EffectOutcome, DomainError> {
    let code = game
        .card(defense_card)
        .map(|c| c.code)
        .ok_or_else(|| DomainError::validation_other(format!("card {defense_card} vanished")))?;

    match code {
        CardCode::Scary => {
            spend_defense(game, nonce, defender_id, defense_card)?;
            let offered = require_turn_mut(game)?.exchange_offer;
            let turn = require_turn_mut(game)?;
            turn.response_card = Some(defense_card);
            turn.exchange_offer = None;
            turn.phase = TurnPhase::WaitingToFinish;
            let mut notices = Vec::new();
            if let Some(offered) = offered {
                if let Some(owner) = game.card(offered).and_then(|c| c.player_id) {
                    notices.push(EffectNotice::CardRevealed {
                        viewer: defender_id,
                        owner,
                        card: offered,
                    });
                }
            }
            Ok(EffectOutcome::with(notices))
        }
        CardCode::NoThanks => {
            spend_defense(game, nonce, defender_id, defense_card)?;
            let turn = require_turn_mut(game)?;
            turn.response_card = Some(defense_card);
            turn.exchange_offer = None;
            turn.phase = TurnPhase::WaitingToFinish;
            Ok(EffectOutcome::default())
        }
        CardCode::Missed => {
            // The exchange slides one seat past the defender, who is now
            // immune to any infection the hand-off would carry.
            spend_defense(game, nonce, defender_id, defense_card)?;
            let defender_pos = position_of(game, defender_id)?;
            let clockwise = game.play_direction.unwrap_or(true);
            let next_pos = successor(game, defender_pos, clockwise)?;
            let next_name = game
                .player_at_position(next_pos)
                .map(|p| p.name.clone())
                .unwrap_or_default();
            let turn = require_turn_mut(game)?;
            turn.response_card = Some(defense_card);
            turn.destination_player_exchange = next_name;
            turn.exchange_immune = true;
            turn.phase = TurnPhase::Exchanging;
            Ok(EffectOutcome::default())
        }
        other => Err(DomainError::validation(
            ValidationKind::CardNotPlayable,
            format!("{} is not an exchange defense", other.as_str()),
        )),
    }
}

fn spend_defense(
    game: &mut Game,
    nonce: u64,
    defender_id: PlayerId,
    defense_card: CardId,
) -> Result<(), DomainError> {
    discard_card(game, defense_card);
    let replacement = draw_from_deck(game, nonce)?;
    give_card_to_player(game, replacement, defender_id);
    Ok(())
}

/// Complete a pending exchange: the initiator's offered card and the
/// target's reply swap hands. An infection marker handed over by The Thing
/// turns a Human target Infected unless a deflection made them immune.
pub fn complete_exchange(
    game: &mut Game,
    initiator_id: PlayerId,
    target_id: PlayerId,
    offered: CardId,
    reply: CardId,
) -> Result<EffectOutcome, DomainError> {
    transfer_card(game, offered, target_id)?;
    transfer_card(game, reply, initiator_id)?;

    let immune = require_turn_mut(game)?.exchange_immune;
    let offered_code = game.card(offered).map(|c| c.code);
    let initiator_role = require_player(game, initiator_id)?.role;
    let target_role = require_player(game, target_id)?.role;

    if offered_code == Some(CardCode::Infection)
        && initiator_role == Role::TheThing
        && target_role == Role::Human
        && !immune
    {
        if let Some(target) = game.player_mut(target_id) {
            target.role = Role::Infected;
        }
    }

    let turn = require_turn_mut(game)?;
    turn.exchange_offer = None;
    turn.exchange_immune = false;
    turn.phase = TurnPhase::FinishedExchange;
    Ok(EffectOutcome::default())
}

fn transfer_card(game: &mut Game, card_id: CardId, to: PlayerId) -> Result<(), DomainError> {
    let card = game.card_mut(card_id).ok_or_else(|| {
        DomainError::validation_other(format!("card {card_id} vanished mid-exchange"))
    })?;
    if card.state != CardState::InHand {
        return Err(DomainError::validation(
            ValidationKind::CardNotInHand,
            format!("card {card_id} is not in a hand"),
        ));
    }
    card.player_id = Some(to);
    Ok(())
}
