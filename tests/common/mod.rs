//! Shared fixtures for the integration tests: an engine wired to the
//! in-memory store, plus direct aggregate access for scenario setup.

use std::sync::Arc;

use lacosa_engine::domain::cards::{Card, CardCode, CardId, CardKind, CardState};
use lacosa_engine::domain::state::{Game, GameId, PlayerId, TurnPhase};
use lacosa_engine::repos::GameRepository;
use lacosa_engine::{CreateGameRequest, GameFlowService, InMemoryGameRepository, TracingNotifier};

pub struct TestApp {
    pub service: GameFlowService,
    pub repo: Arc<InMemoryGameRepository>,
}

pub fn app() -> TestApp {
    let repo = Arc::new(InMemoryGameRepository::new());
    let service = GameFlowService::new(repo.clone(), Arc::new(TracingNotifier));
    TestApp { service, repo }
}

/// A waiting lobby with `n` seated players named `p1..pn`; `p1` owns it.
/// Seeded, so every derived shuffle is reproducible.
pub async fn lobby(app: &TestApp, n: usize) -> (GameId, Vec<PlayerId>) {
    let (game_id, owner) = app
        .service
        .create_game(CreateGameRequest {
            name: "it".into(),
            owner_name: "p1".into(),
            min_players: 4,
            max_players: 12,
            password: None,
            seed: Some(7),
        })
        .await
        .unwrap();
    let mut ids = vec![owner];
    for i in 2..=n {
        let id = app
            .service
            .join_game(game_id, &format!("p{i}"), None)
            .await
            .unwrap();
        ids.push(id);
    }
    (game_id, ids)
}

/// A started game with `n` players.
pub async fn started(app: &TestApp, n: usize) -> (GameId, Vec<PlayerId>) {
    let (game_id, ids) = lobby(app, n).await;
    app.service.start_game(game_id, ids[0]).await.unwrap();
    (game_id, ids)
}

pub async fn fetch(app: &TestApp, game_id: GameId) -> Game {
    app.repo.fetch(game_id).await.unwrap()
}

pub async fn save(app: &TestApp, game: Game) {
    app.repo.save(game).await.unwrap();
}

/// The player currently holding the turn.
pub async fn turn_owner(app: &TestApp, game_id: GameId) -> PlayerId {
    let game = fetch(app, game_id).await;
    let pos = game.turn.as_ref().unwrap().owner;
    game.player_at_position(pos).unwrap().id
}

/// Point the turn at `player_id`'s seat in the given phase.
pub async fn force_turn(app: &TestApp, game_id: GameId, player_id: PlayerId, phase: TurnPhase) {
    let mut game = fetch(app, game_id).await;
    let pos = game.player(player_id).unwrap().table_position;
    let turn = game.turn.as_mut().unwrap();
    turn.owner = pos;
    turn.phase = phase;
    save(app, game).await;
}

fn kind_of(code: CardCode) -> CardKind {
    match code {
        CardCode::Scary | CardCode::NoThanks | CardCode::Missed => CardKind::Defense,
        CardCode::LockedDoor => CardKind::Obstacle,
        CardCode::Infection => CardKind::Infection,
        CardCode::WheresTheParty | CardCode::RoundAndRound | CardCode::RottenRope => CardKind::Panic,
        CardCode::TheThing => CardKind::TheThing,
        _ => CardKind::Action,
    }
}

/// Insert a fresh card straight into a hand, bypassing the deal.
pub fn put_card(game: &mut Game, code: CardCode, player_id: PlayerId) -> CardId {
    let id = game.deck.iter().map(|c| c.id).max().unwrap_or(0) + 1;
    game.deck.push(Card {
        id,
        code,
        name: code.as_str().to_string(),
        kind: kind_of(code),
        number_in_card: 4,
        state: CardState::InHand,
        playable: !matches!(code, CardCode::TheThing | CardCode::Infection),
        player_id: Some(player_id),
    });
    id
}

/// Pad or trim a hand to exactly `target` cards (filler in, extras out).
pub fn set_hand_size(game: &mut Game, player_id: PlayerId, target: usize) {
    loop {
        let size = game.hand_size_of(player_id);
        if size == target {
            return;
        }
        if size < target {
            put_card(game, CardCode::Filler, player_id);
        } else {
            let id = game.hand_of(player_id).last().unwrap().id;
            let card = game.card_mut(id).unwrap();
            card.state = CardState::Played;
            card.player_id = None;
        }
    }
}
