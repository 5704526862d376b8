mod common;

use common::{app, fetch, lobby};
use lacosa_engine::domain::cards::{deck_size_for, CardCode, CardState};
use lacosa_engine::domain::state::{GamePhase, Role, TurnPhase};
use lacosa_engine::ErrorCode;

#[tokio::test]
async fn four_player_start_seeds_the_tiered_deck() {
    let app = app();
    let (game_id, ids) = lobby(&app, 4).await;
    app.service.start_game(game_id, ids[0]).await.unwrap();

    let game = fetch(&app, game_id).await;
    assert_eq!(game.phase, GamePhase::Playing);
    assert_eq!(game.play_direction, Some(true));
    assert_eq!(game.deck.len(), deck_size_for(4));
    assert_eq!(
        game.deck.iter().filter(|c| c.code == CardCode::TheThing).count(),
        1
    );
}

#[tokio::test]
async fn start_deals_four_cards_and_one_thing_role() {
    let app = app();
    let (game_id, ids) = lobby(&app, 6).await;
    app.service.start_game(game_id, ids[0]).await.unwrap();

    let game = fetch(&app, game_id).await;
    for player in &game.players {
        assert_eq!(game.hand_size_of(player.id), 4);
        assert!(player.alive);
    }
    let things: Vec<_> = game.players.iter().filter(|p| p.role == Role::TheThing).collect();
    assert_eq!(things.len(), 1);
    // The role card sits in the role holder's hand.
    let holder = game
        .deck
        .iter()
        .find(|c| c.code == CardCode::TheThing && c.state == CardState::InHand)
        .and_then(|c| c.player_id)
        .unwrap();
    assert_eq!(holder, things[0].id);

    let turn = game.turn.as_ref().unwrap();
    assert_eq!(turn.phase, TurnPhase::Steal);
    assert!(game.player_at_position(turn.owner).unwrap().alive);
    assert!(!turn.destination_player_exchange.is_empty());
}

#[tokio::test]
async fn the_first_turn_belongs_to_the_first_seated_player() {
    let app = app();
    let (game_id, ids) = lobby(&app, 4).await;
    app.service.start_game(game_id, ids[0]).await.unwrap();

    let game = fetch(&app, game_id).await;
    let turn = game.turn.as_ref().unwrap();
    assert_eq!(turn.owner, 1);
    assert_eq!(game.player_at_position(1).unwrap().id, ids[0]);
}

#[tokio::test]
async fn start_requires_the_minimum_seat_count() {
    let app = app();
    let (game_id, ids) = lobby(&app, 3).await;
    let err = app.service.start_game(game_id, ids[0]).await.unwrap_err();
    assert_eq!(err.code(), ErrorCode::Conflict);

    let game = fetch(&app, game_id).await;
    assert_eq!(game.phase, GamePhase::Waiting);
}

#[tokio::test]
async fn only_the_owner_starts() {
    let app = app();
    let (game_id, ids) = lobby(&app, 4).await;
    let err = app.service.start_game(game_id, ids[1]).await.unwrap_err();
    assert_eq!(err.code(), ErrorCode::NotYourTurn);
}

#[tokio::test]
async fn start_twice_is_an_invalid_phase() {
    let app = app();
    let (game_id, ids) = lobby(&app, 4).await;
    app.service.start_game(game_id, ids[0]).await.unwrap();
    let err = app.service.start_game(game_id, ids[0]).await.unwrap_err();
    assert_eq!(err.code(), ErrorCode::InvalidPhase);
}

#[tokio::test]
async fn same_seed_same_deal() {
    let app = app();
    let (a, ids_a) = lobby(&app, 4).await;
    app.service.start_game(a, ids_a[0]).await.unwrap();
    let (b, ids_b) = lobby(&app, 4).await;
    app.service.start_game(b, ids_b[0]).await.unwrap();

    let game_a = fetch(&app, a).await;
    let game_b = fetch(&app, b).await;
    let codes_a: Vec<_> = game_a.deck.iter().map(|c| c.code).collect();
    let codes_b: Vec<_> = game_b.deck.iter().map(|c| c.code).collect();
    assert_eq!(codes_a, codes_b);
}
