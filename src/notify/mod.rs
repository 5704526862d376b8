//! Outbound notification seam.
//!
//! The engine never talks to sockets; it hands [`EventEnvelope`]s to a
//! [`Notifier`] and the host fans them out. Envelopes are tagged on `type`
//! so clients can dispatch without peeking at payloads.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::domain::cards::CardId;
use crate::domain::player_view::{CardView, GamePublic, PlayerPrivate};
use crate::domain::state::{GameId, PlayerId};

/// One event as delivered to clients.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum EventEnvelope {
    /// Broadcast: the table state changed.
    GameUpdated { game: GamePublic },
    /// To one player: their private slice changed.
    HandUpdated { player: PlayerPrivate },
    /// Broadcast: a named card was played against a target.
    CardPlayed {
        player: String,
        card: CardView,
        target: String,
    },
    /// Broadcast: someone discarded face down.
    CardDiscarded { player: String },
    /// Broadcast: the target answered with a defense card.
    DefensePlayed { player: String, card: CardView },
    /// To one player: cards revealed to them alone.
    CardsRevealed {
        owner: String,
        cards: Vec<CardView>,
    },
    /// Broadcast: a player showed their whole hand.
    HandShown { owner: String, cards: Vec<CardView> },
    /// To one player: their quarantine was lifted.
    QuarantineLifted,
    /// Broadcast: the turn moved on.
    TurnFinished { owner_position: u8 },
    /// Broadcast: the game ended.
    GameFinished { reason: String, winners: Vec<String> },
    /// Broadcast: the lobby was abandoned by its owner.
    GameAborted,
}

/// Delivery seam implemented by the host (websockets, tests, ...).
#[async_trait]
pub trait Notifier: Send + Sync {
    /// Deliver to every connected player of the game.
    async fn notify_game(&self, game_id: GameId, event: EventEnvelope);

    /// Deliver to a single player.
    async fn notify_player(&self, game_id: GameId, player_id: PlayerId, event: EventEnvelope);
}

/// Notifier that logs instead of delivering. Useful as a default and in
/// tests that only assert on state.
#[derive(Debug, Default, Clone)]
pub struct TracingNotifier;

#[async_trait]
impl Notifier for TracingNotifier {
    async fn notify_game(&self, game_id: GameId, event: EventEnvelope) {
        debug!(game_id, ?event, "broadcast event");
    }

    async fn notify_player(&self, game_id: GameId, player_id: PlayerId, event: EventEnvelope) {
        debug!(game_id, player_id, ?event, "player event");
    }
}

/// Resolve card ids into views, skipping any that no longer exist.
pub(crate) fn card_views(
    game: &crate::domain::state::Game,
    ids: &[CardId],
) -> Vec<CardView> {
    ids.iter()
        .filter_map(|&id| game.card(id).map(CardView::from))
        .collect()
}
