//! Deck seeding, initial hands, and deterministic draws.

use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::domain::cards::{Card, CardId, CardKind, CardState, CARD_SET};
use crate::domain::rules::INITIAL_HAND_SIZE;
use crate::domain::state::{Game, PlayerId, Role};
use crate::errors::domain::{DomainError, ValidationKind};

/// Derive the seed for the one-time deck shuffle of a session.
pub fn derive_deck_seed(game_seed: u64) -> u64 {
    game_seed.wrapping_mul(0x9E37_79B9_7F4A_7C15).wrapping_add(1)
}

/// Derive a per-event seed (reshuffles, random hand picks). The nonce must be
/// monotonic across a game's mutations so repeated events diverge; the log
/// length serves, since every committed mutation appends a log entry.
pub fn derive_event_seed(game_seed: u64, nonce: u64) -> u64 {
    game_seed
        .wrapping_add(nonce.wrapping_mul(1_000_000))
        .wrapping_add(2)
}

/// Build the shuffled deck for a player count: every static-card entry with
/// `number_in_card <= player_count` contributes `amount_in_deck` copies.
/// Draw order is the vector order; card ids are assigned after the shuffle.
pub fn build_deck(player_count: u8, game_seed: u64) -> Vec<Card> {
    let mut deck: Vec<Card> = Vec::new();
    for entry in CARD_SET.iter().filter(|s| s.number_in_card <= player_count) {
        for _ in 0..entry.amount_in_deck {
            deck.push(Card {
                id: 0,
                code: entry.code,
                name: entry.name.to_string(),
                kind: entry.kind,
                number_in_card: entry.number_in_card,
                state: CardState::InDeck,
                playable: entry.playable,
                player_id: None,
            });
        }
    }

    let mut rng = ChaCha8Rng::seed_from_u64(derive_deck_seed(game_seed));
    deck.shuffle(&mut rng);
    for (i, card) in deck.iter_mut().enumerate() {
        card.id = (i + 1) as CardId;
    }
    deck
}

/// Deal the initial hands: four cards per player in seat order, skipping
/// infection, panic, and role cards, then force the The Thing card into one
/// uniformly chosen hand in place of one of its dealt cards. The displaced
/// player becomes The Thing; everyone else starts Human.
pub fn assign_initial_hands(game: &mut Game) -> Result<(), DomainError> {
    let mut seat_order: Vec<(PlayerId, u8)> = game
        .players
        .iter()
        .map(|p| (p.id, p.table_position))
        .collect();
    seat_order.sort_by_key(|&(_, pos)| pos);

    for &(player_id, _) in &seat_order {
        let mut dealt = 0;
        for card in game.deck.iter_mut() {
            if dealt == INITIAL_HAND_SIZE {
                break;
            }
            if card.state != CardState::InDeck {
                continue;
            }
            if matches!(
                card.kind,
                CardKind::Infection | CardKind::Panic | CardKind::TheThing
            ) {
                continue;
            }
            card.state = CardState::InHand;
            card.player_id = Some(player_id);
            dealt += 1;
        }
        if dealt != INITIAL_HAND_SIZE {
            return Err(DomainError::validation(
                ValidationKind::Other("DECK_TOO_SMALL".into()),
                "deck cannot cover the initial deal",
            ));
        }
    }

    // Swap the role card into one uniformly chosen hand.
    let mut rng = ChaCha8Rng::seed_from_u64(derive_event_seed(game.rng_seed, 0));
    let chosen = seat_order[rng.random_range(0..seat_order.len())].0;

    let displaced = game
        .deck
        .iter()
        .find(|c| c.state == CardState::InHand && c.player_id == Some(chosen))
        .map(|c| c.id)
        .ok_or_else(|| DomainError::validation_other("chosen hand is empty after the deal"))?;
    let thing = game
        .deck
        .iter()
        .find(|c| c.kind == CardKind::TheThing)
        .map(|c| c.id)
        .ok_or_else(|| DomainError::validation_other("deck is missing the role card"))?;

    if let Some(card) = game.card_mut(displaced) {
        card.state = CardState::InDeck;
        card.player_id = None;
    }
    if let Some(card) = game.card_mut(thing) {
        card.state = CardState::InHand;
        card.player_id = Some(chosen);
    }

    for player in game.players.iter_mut() {
        player.role = if player.id == chosen {
            Role::TheThing
        } else {
            Role::Human
        };
    }
    Ok(())
}

/// Draw the top in-deck card. On exhaustion the played pile is reshuffled
/// back into circulation first; only if both piles are empty does the draw
/// fail.
pub fn draw_from_deck(game: &mut Game, nonce: u64) -> Result<CardId, DomainError> {
    if !game.deck.iter().any(|c| c.state == CardState::InDeck) {
        reshuffle_played_pile(game, nonce)?;
    }
    game.deck
        .iter()
        .find(|c| c.state == CardState::InDeck)
        .map(|c| c.id)
        .ok_or_else(|| {
            DomainError::validation(
                ValidationKind::Other("DECK_EMPTY".into()),
                "no cards left to draw",
            )
        })
}

fn reshuffle_played_pile(game: &mut Game, nonce: u64) -> Result<(), DomainError> {
    let mut any = false;
    for card in game.deck.iter_mut() {
        if card.state == CardState::Played {
            card.state = CardState::InDeck;
            card.player_id = None;
            any = true;
        }
    }
    if !any {
        return Ok(());
    }
    let mut rng = ChaCha8Rng::seed_from_u64(derive_event_seed(game.rng_seed, nonce));
    game.deck.shuffle(&mut rng);
    Ok(())
}

/// Move a card from the deck into a player's hand.
pub fn give_card_to_player(game: &mut Game, card_id: CardId, player_id: PlayerId) {
    if let Some(card) = game.card_mut(card_id) {
        card.state = CardState::InHand;
        card.player_id = Some(player_id);
    }
}

/// Discard a card out of whatever hand holds it.
pub fn discard_card(game: &mut Game, card_id: CardId) {
    if let Some(card) = game.card_mut(card_id) {
        card.state = CardState::Played;
        card.player_id = None;
    }
}

/// Pick one random card from a player's hand, seeded per event.
pub fn random_card_in_hand(
    game: &Game,
    player_id: PlayerId,
    nonce: u64,
) -> Result<CardId, DomainError> {
    let hand = game.hand_of(player_id);
    if hand.is_empty() {
        return Err(DomainError::validation(
            ValidationKind::Other("EMPTY_HAND".into()),
            format!("player {player_id} has no cards to inspect"),
        ));
    }
    let mut rng = ChaCha8Rng::seed_from_u64(derive_event_seed(game.rng_seed, nonce));
    Ok(hand[rng.random_range(0..hand.len())].id)
}
