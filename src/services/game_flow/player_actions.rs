//! In-game actions: draw, play, discard, respond, declare, finish.

use tracing::{debug, info};

use crate::domain::cards::{CardCode, CardId, CardKind};
use crate::domain::dealing::{discard_card, draw_from_deck, give_card_to_player};
use crate::domain::effects::{apply_card_effect, apply_exchange_defense, complete_exchange};
use crate::domain::player_view::CardView;
use crate::domain::seating::next_owner;
use crate::domain::state::{
    require_player, require_turn, require_turn_mut, Game, GameId, GamePhase, PlayerId, TurnPhase,
};
use crate::domain::turn_flow::{self, draw_for_turn, settle_exchange, stage_played_card};
use crate::domain::win::{resolve_declaration, record_outcome, WinOutcome};
use crate::error::AppError;
use crate::errors::domain::{DomainError, ValidationKind};
use crate::notify::EventEnvelope;
use crate::services::game_flow::{validation, GameFlowService};

impl GameFlowService {
    /// The turn owner draws their fifth card.
    pub async fn draw_card(&self, game_id: GameId, player_id: PlayerId) -> Result<CardId, AppError> {
        let mut game = self.repo().fetch(game_id).await?;
        validation::ensure_phase(&game, GamePhase::Playing)?;
        validation::ensure_alive(require_player(&game, player_id)?)?;
        validation::ensure_turn_owner(&game, player_id)?;
        validation::ensure_turn_phase(&game, &[TurnPhase::Steal])?;
        validation::ensure_may_draw(&game, player_id)?;

        let nonce = Self::nonce(&game);
        let card = draw_for_turn(&mut game, nonce, player_id)?;
        let name = require_player(&game, player_id)?.name.clone();
        game.append_log(format!("{name} drew a card"));
        self.repo().save(game.clone()).await?;

        debug!(game_id, player_id, card, "card drawn");
        self.broadcast_state(&game).await;
        self.push_hand(&game, player_id).await;
        Ok(card)
    }

    /// Play an action card. Untargeted and self-target cards resolve on the
    /// spot; a seduction opens an exchange; anything aimed at another player
    /// waits for their response first.
    pub async fn play_card(
        &self,
        game_id: GameId,
        player_id: PlayerId,
        card_id: CardId,
        target_id: Option<PlayerId>,
    ) -> Result<(), AppError> {
        let mut game = self.repo().fetch(game_id).await?;
        validation::ensure_phase(&game, GamePhase::Playing)?;
        validation::ensure_alive(require_player(&game, player_id)?)?;
        validation::ensure_turn_owner(&game, player_id)?;
        validation::ensure_turn_phase(&game, &[TurnPhase::Deciding])?;
        validation::ensure_may_shed_card(&game, player_id)?;
        let card = validation::ensure_card_in_hand(&game, player_id, card_id)?;
        validation::ensure_playable_as_action(card)?;
        let code = card.code;
        let card_view = CardView::from(card);

        let target_id = if code.requires_target() {
            let target_id = target_id.ok_or_else(|| {
                DomainError::validation(
                    ValidationKind::IllegalTarget,
                    format!("{} needs a target", code.as_str()),
                )
            })?;
            validation::ensure_legal_target(&game, self.rules(), code, player_id, target_id)?;
            target_id
        } else {
            player_id
        };

        let actor_name = require_player(&game, player_id)?.name.clone();
        let target_name = require_player(&game, target_id)?.name.clone();
        let nonce = Self::nonce(&game);

        let resolves_now = !code.requires_target()
            || self.rules().allows_self_target(code)
            || code == CardCode::Seduction;

        let mut notices = Vec::new();
        if resolves_now {
            let outcome =
                apply_card_effect(&mut game, self.rules(), nonce, player_id, target_id, card_id)?;
            notices = outcome.notices;
            if require_turn(&game)?.phase == TurnPhase::Deciding {
                require_turn_mut(&mut game)?.phase = TurnPhase::WaitingToFinish;
            }
        } else {
            stage_played_card(&mut game, card_id, &target_name)?;
        }

        // Staging cannot kill or convert anyone; wins are evaluated on the
        // resolving path only.
        let finished = if resolves_now {
            Self::settle_win(&mut game)
        } else {
            None
        };
        game.append_log(format!("{actor_name} played {} on {target_name}", card_view.name));
        self.repo().save(game.clone()).await?;
        info!(game_id, player_id, code = code.as_str(), "card played");

        self.notifier()
            .notify_game(game_id, EventEnvelope::CardPlayed {
                player: actor_name,
                card: card_view,
                target: target_name,
            })
            .await;
        self.deliver_notices(&game, notices).await;
        self.broadcast_state(&game).await;
        if resolves_now {
            self.push_hand(&game, player_id).await;
        }
        if let Some(outcome) = finished {
            self.announce_outcome(&game, &outcome).await;
        }
        Ok(())
    }

    /// Discard one card face down instead of playing.
    pub async fn discard_card(
        &self,
        game_id: GameId,
        player_id: PlayerId,
        card_id: CardId,
    ) -> Result<(), AppError> {
        let mut game = self.repo().fetch(game_id).await?;
        validation::ensure_phase(&game, GamePhase::Playing)?;
        validation::ensure_alive(require_player(&game, player_id)?)?;
        validation::ensure_turn_owner(&game, player_id)?;
        validation::ensure_turn_phase(&game, &[TurnPhase::Deciding])?;
        validation::ensure_may_shed_card(&game, player_id)?;
        let card = validation::ensure_card_in_hand(&game, player_id, card_id)?;
        if card.code == CardCode::TheThing {
            return Err(DomainError::validation(
                ValidationKind::CardNotPlayable,
                "the role card cannot be discarded",
            )
            .into());
        }

        discard_card(&mut game, card_id);
        require_turn_mut(&mut game)?.phase = TurnPhase::WaitingToFinish;
        let name = require_player(&game, player_id)?.name.clone();
        game.append_log(format!("{name} discarded a card"));
        self.repo().save(game.clone()).await?;

        debug!(game_id, player_id, card_id, "card discarded");
        self.notifier()
            .notify_game(game_id, EventEnvelope::CardDiscarded { player: name })
            .await;
        self.broadcast_state(&game).await;
        self.push_hand(&game, player_id).await;
        Ok(())
    }

    /// Answer a pending action or exchange.
    ///
    /// In `WaitingResponse` the target either lets the card resolve (`None`)
    /// or cancels it with a defense card. In `Exchanging` the turn owner
    /// records their offer first; the destination then answers with a defense
    /// card or a counter-offer that completes the swap.
    pub async fn respond_to_card(
        &self,
        game_id: GameId,
        player_id: PlayerId,
        card_id: Option<CardId>,
    ) -> Result<(), AppError> {
        let mut game = self.repo().fetch(game_id).await?;
        validation::ensure_phase(&game, GamePhase::Playing)?;
        validation::ensure_alive(require_player(&game, player_id)?)?;

        let phase = require_turn(&game)?.phase;
        match phase {
            TurnPhase::WaitingResponse => {
                self.respond_to_action(&mut game, player_id, card_id).await?
            }
            TurnPhase::Exchanging => {
                self.respond_to_exchange(&mut game, player_id, card_id).await?
            }
            _ => {
                return Err(DomainError::validation(
                    ValidationKind::PhaseMismatch,
                    "nothing to respond to",
                )
                .into())
            }
        }

        let finished = Self::settle_win(&mut game);
        self.repo().save(game.clone()).await?;
        self.broadcast_state(&game).await;
        if let Some(outcome) = finished {
            self.announce_outcome(&game, &outcome).await;
        }
        Ok(())
    }

    async fn respond_to_action(
        &self,
        game: &mut Game,
        player_id: PlayerId,
        card_id: Option<CardId>,
    ) -> Result<(), AppError> {
        validation::ensure_is_respondent(game, player_id)?;
        let staged = require_turn(game)?.played_card.ok_or_else(|| {
            DomainError::validation(ValidationKind::PhaseMismatch, "no card awaiting response")
        })?;
        let actor_id = {
            let owner_pos = require_turn(game)?.owner;
            game.player_at_position(owner_pos)
                .map(|p| p.id)
                .ok_or_else(|| DomainError::validation_other("turn owner seat is empty"))?
        };

        match card_id {
            None => {
                let nonce = Self::nonce(game);
                let outcome = apply_card_effect(
                    game,
                    self.rules(),
                    nonce,
                    actor_id,
                    player_id,
                    staged,
                )?;
                if require_turn(game)?.phase == TurnPhase::WaitingResponse {
                    require_turn_mut(game)?.phase = TurnPhase::WaitingToFinish;
                }
                let target = require_player(game, player_id)?.name.clone();
                game.append_log(format!("the card resolved against {target}"));
                self.deliver_notices(game, outcome.notices).await;
                self.push_hand(game, actor_id).await;
                self.push_hand(game, player_id).await;
            }
            Some(defense_id) => {
                let defense = validation::ensure_card_in_hand(game, player_id, defense_id)?;
                validation::ensure_playable_as_defense(defense)?;
                let defense_view = CardView::from(defense);

                // The attack fizzles: both cards hit the discard pile and
                // the defender restores their hand size.
                discard_card(game, staged);
                discard_card(game, defense_id);
                let nonce = Self::nonce(game);
                let replacement = draw_from_deck(game, nonce)?;
                give_card_to_player(game, replacement, player_id);
                {
                    let turn = require_turn_mut(game)?;
                    turn.response_card = Some(defense_id);
                    turn.phase = TurnPhase::WaitingToFinish;
                }

                let name = require_player(game, player_id)?.name.clone();
                game.append_log(format!("{name} defended with {}", defense_view.name));
                self.notifier()
                    .notify_game(game.id, EventEnvelope::DefensePlayed {
                        player: name,
                        card: defense_view,
                    })
                    .await;
                self.push_hand(game, actor_id).await;
                self.push_hand(game, player_id).await;
            }
        }
        Ok(())
    }

    async fn respond_to_exchange(
        &self,
        game: &mut Game,
        player_id: PlayerId,
        card_id: Option<CardId>,
    ) -> Result<(), AppError> {
        let owner_pos = require_turn(game)?.owner;
        let is_initiator = require_player(game, player_id)?.table_position == owner_pos;
        let offer = require_turn(game)?.exchange_offer;

        if is_initiator && offer.is_none() {
            let offer_id = card_id.ok_or_else(|| {
                DomainError::validation(
                    ValidationKind::CardNotInHand,
                    "an exchange offer requires a card",
                )
            })?;
            validation::ensure_may_offer(game, player_id, offer_id)?;
            require_turn_mut(game)?.exchange_offer = Some(offer_id);
            let name = require_player(game, player_id)?.name.clone();
            game.append_log(format!("{name} offered a card"));
            return Ok(());
        }

        validation::ensure_is_respondent(game, player_id)?;
        let offered = offer.ok_or_else(|| {
            DomainError::validation(
                ValidationKind::PhaseMismatch,
                "waiting for the initiator's offer",
            )
        })?;
        let reply_id = card_id.ok_or_else(|| {
            DomainError::validation(
                ValidationKind::CardNotInHand,
                "answer the exchange with a defense card or an offer",
            )
        })?;

        let reply = validation::ensure_card_in_hand(game, player_id, reply_id)?;
        if reply.kind == CardKind::Defense {
            let defense_view = CardView::from(reply);
            let nonce = Self::nonce(game);
            let outcome = apply_exchange_defense(game, nonce, player_id, reply_id)?;
            let name = require_player(game, player_id)?.name.clone();
            game.append_log(format!("{name} answered the exchange with {}", defense_view.name));
            self.notifier()
                .notify_game(game.id, EventEnvelope::DefensePlayed {
                    player: name,
                    card: defense_view,
                })
                .await;
            self.deliver_notices(game, outcome.notices).await;
            self.push_hand(game, player_id).await;
            return Ok(());
        }

        validation::ensure_may_offer(game, player_id, reply_id)?;
        let initiator_id = game
            .player_at_position(owner_pos)
            .map(|p| p.id)
            .ok_or_else(|| DomainError::validation_other("turn owner seat is empty"))?;
        complete_exchange(game, initiator_id, player_id, offered, reply_id)?;
        settle_exchange(game)?;
        let a = require_player(game, initiator_id)?.name.clone();
        let b = require_player(game, player_id)?.name.clone();
        game.append_log(format!("{a} and {b} exchanged cards"));
        self.push_hand(game, initiator_id).await;
        self.push_hand(game, player_id).await;
        Ok(())
    }

    /// The Thing calls the game. A premature call hands the win to the
    /// humans instead.
    pub async fn declare_victory(
        &self,
        game_id: GameId,
        player_id: PlayerId,
    ) -> Result<WinOutcome, AppError> {
        let mut game = self.repo().fetch(game_id).await?;
        validation::ensure_phase(&game, GamePhase::Playing)?;
        validation::ensure_alive(require_player(&game, player_id)?)?;

        let outcome = resolve_declaration(&game, player_id)?;
        record_outcome(&mut game, &outcome);
        self.repo().save(game.clone()).await?;

        info!(game_id, player_id, reason = outcome.describe(), "victory declared");
        self.broadcast_state(&game).await;
        self.announce_outcome(&game, &outcome).await;
        Ok(outcome)
    }

    /// Close the turn once everything settled and open the next one. Any
    /// seated player may call this; the gate is the turn phase, not the
    /// caller.
    pub async fn finish_turn(&self, game_id: GameId, player_id: PlayerId) -> Result<(), AppError> {
        let mut game = self.repo().fetch(game_id).await?;
        validation::ensure_phase(&game, GamePhase::Playing)?;
        require_player(&game, player_id)?;

        let next = turn_flow::finish_turn(&mut game, self.rules())?;
        let neighbor = next_owner(&game, next)?;
        {
            let exchange_target = game
                .player_at_position(neighbor)
                .map(|p| p.name.clone())
                .unwrap_or_default();
            require_turn_mut(&mut game)?.destination_player_exchange = exchange_target;
        }
        let owner_name = game
            .player_at_position(next)
            .map(|p| p.name.clone())
            .unwrap_or_default();
        game.append_log(format!("turn passed to {owner_name}"));
        self.repo().save(game.clone()).await?;

        debug!(game_id, next_owner = next, "turn finished");
        self.notifier()
            .notify_game(game_id, EventEnvelope::TurnFinished {
                owner_position: next,
            })
            .await;
        self.broadcast_state(&game).await;
        Ok(())
    }
}
