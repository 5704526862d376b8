//! The action surface: every mutating operation runs
//! load → validate → mutate → save, then evaluates win conditions where a
//! player can die or change role, then emits notifications. Notification
//! delivery is fire-and-forget; it never rolls back a committed save.

mod lobby;
mod player_actions;
mod start;
pub mod validation;

use std::sync::Arc;

use tracing::warn;

pub use lobby::CreateGameRequest;

use crate::domain::effects::EffectNotice;
use crate::domain::player_view::{GameListItem, GamePublic, PlayerPrivate};
use crate::domain::rules::RuleConfig;
use crate::domain::state::{require_player, Game, GameId, GamePhase, PlayerId};
use crate::domain::win::{evaluate, record_outcome, WinOutcome};
use crate::error::AppError;
use crate::notify::{card_views, EventEnvelope, Notifier};
use crate::repos::GameRepository;

pub struct GameFlowService {
    repo: Arc<dyn GameRepository>,
    notifier: Arc<dyn Notifier>,
    rules: RuleConfig,
}

impl GameFlowService {
    pub fn new(repo: Arc<dyn GameRepository>, notifier: Arc<dyn Notifier>) -> Self {
        Self {
            repo,
            notifier,
            rules: RuleConfig::default(),
        }
    }

    pub fn with_rules(mut self, rules: RuleConfig) -> Self {
        self.rules = rules;
        self
    }

    pub(crate) fn rules(&self) -> &RuleConfig {
        &self.rules
    }

    pub(crate) fn repo(&self) -> &dyn GameRepository {
        self.repo.as_ref()
    }

    pub(crate) fn notifier(&self) -> &dyn Notifier {
        self.notifier.as_ref()
    }

    /// Monotonic per-game counter for event-seed derivation. Every committed
    /// mutation appends a log entry, so the log length only grows.
    pub(crate) fn nonce(game: &Game) -> u64 {
        game.log.len() as u64
    }

    // ----- reads -----

    pub async fn get_game(&self, game_id: GameId) -> Result<GamePublic, AppError> {
        let game = self.repo.fetch(game_id).await?;
        Ok(GamePublic::project(&game))
    }

    pub async fn get_player(
        &self,
        game_id: GameId,
        player_id: PlayerId,
    ) -> Result<PlayerPrivate, AppError> {
        let game = self.repo.fetch(game_id).await?;
        require_player(&game, player_id)?;
        PlayerPrivate::project(&game, player_id)
            .ok_or_else(|| AppError::internal("player projection failed after lookup"))
    }

    /// Joinable lobbies only; started and finished games drop out.
    pub async fn get_game_list(&self) -> Result<Vec<GameListItem>, AppError> {
        let games = self.repo.list().await?;
        Ok(games
            .iter()
            .filter(|g| g.phase == GamePhase::Waiting)
            .map(GameListItem::project)
            .collect())
    }

    // ----- shared plumbing -----

    /// Evaluate win conditions and, if one fired, finish the game in place.
    pub(crate) fn settle_win(game: &mut Game) -> Option<WinOutcome> {
        if let Some(outcome) = evaluate(game) {
            record_outcome(game, &outcome);
            return Some(outcome);
        }
        None
    }

    /// Broadcast the refreshed public view after a committed mutation.
    pub(crate) async fn broadcast_state(&self, game: &Game) {
        self.notifier
            .notify_game(game.id, EventEnvelope::GameUpdated {
                game: GamePublic::project(game),
            })
            .await;
    }

    /// Push a private hand refresh to one player.
    pub(crate) async fn push_hand(&self, game: &Game, player_id: PlayerId) {
        match PlayerPrivate::project(game, player_id) {
            Some(player) => {
                self.notifier
                    .notify_player(game.id, player_id, EventEnvelope::HandUpdated { player })
                    .await;
            }
            None => warn!(game_id = game.id, player_id, "hand push for unknown player"),
        }
    }

    /// Translate effect notices into deliveries.
    pub(crate) async fn deliver_notices(&self, game: &Game, notices: Vec<EffectNotice>) {
        for notice in notices {
            match notice {
                EffectNotice::HandRevealed { viewer, owner, cards } => {
                    let owner_name = game.player(owner).map(|p| p.name.clone()).unwrap_or_default();
                    self.notifier
                        .notify_player(game.id, viewer, EventEnvelope::CardsRevealed {
                            owner: owner_name,
                            cards: card_views(game, &cards),
                        })
                        .await;
                }
                EffectNotice::CardRevealed { viewer, owner, card } => {
                    let owner_name = game.player(owner).map(|p| p.name.clone()).unwrap_or_default();
                    self.notifier
                        .notify_player(game.id, viewer, EventEnvelope::CardsRevealed {
                            owner: owner_name,
                            cards: card_views(game, &[card]),
                        })
                        .await;
                }
                EffectNotice::HandShownToAll { owner, cards } => {
                    let owner_name = game.player(owner).map(|p| p.name.clone()).unwrap_or_default();
                    self.notifier
                        .notify_game(game.id, EventEnvelope::HandShown {
                            owner: owner_name,
                            cards: card_views(game, &cards),
                        })
                        .await;
                }
                EffectNotice::QuarantineLifted { player } => {
                    self.notifier
                        .notify_player(game.id, player, EventEnvelope::QuarantineLifted)
                        .await;
                }
            }
        }
    }

    /// Announce a finished game.
    pub(crate) async fn announce_outcome(&self, game: &Game, outcome: &WinOutcome) {
        let winners = outcome
            .winners()
            .iter()
            .filter_map(|&id| game.player(id).map(|p| p.name.clone()))
            .collect();
        self.notifier
            .notify_game(game.id, EventEnvelope::GameFinished {
                reason: outcome.describe().to_string(),
                winners,
            })
            .await;
    }
}
