mod common;

use common::{app, fetch, force_turn, save, set_hand_size, turn_owner};
use lacosa_engine::domain::state::TurnPhase;
use lacosa_engine::ErrorCode;

#[tokio::test]
async fn draw_is_owner_only_and_moves_to_deciding() {
    let app = app();
    let (game_id, ids) = common::started(&app, 4).await;

    let owner = turn_owner(&app, game_id).await;
    let bystander = *ids.iter().find(|&&id| id != owner).unwrap();
    let err = app.service.draw_card(game_id, bystander).await.unwrap_err();
    assert_eq!(err.code(), ErrorCode::NotYourTurn);

    app.service.draw_card(game_id, owner).await.unwrap();
    let game = fetch(&app, game_id).await;
    assert_eq!(game.hand_size_of(owner), 5);
    assert_eq!(game.turn.as_ref().unwrap().phase, TurnPhase::Deciding);
}

#[tokio::test]
async fn second_draw_hits_the_hand_limit() {
    let app = app();
    let (game_id, _) = common::started(&app, 4).await;
    let owner = turn_owner(&app, game_id).await;
    app.service.draw_card(game_id, owner).await.unwrap();

    force_turn(&app, game_id, owner, TurnPhase::Steal).await;
    let err = app.service.draw_card(game_id, owner).await.unwrap_err();
    assert_eq!(err.code(), ErrorCode::HandConstraint);
}

#[tokio::test]
async fn playing_before_drawing_is_rejected() {
    let app = app();
    let (game_id, _) = common::started(&app, 4).await;
    let owner = turn_owner(&app, game_id).await;
    force_turn(&app, game_id, owner, TurnPhase::Deciding).await;

    let game = fetch(&app, game_id).await;
    let card = game.hand_of(owner)[0].id;
    let err = app
        .service
        .discard_card(game_id, owner, card)
        .await
        .unwrap_err();
    assert_eq!(err.code(), ErrorCode::HandConstraint);
}

#[tokio::test]
async fn discard_is_not_repeatable() {
    let app = app();
    let (game_id, _) = common::started(&app, 4).await;
    let owner = turn_owner(&app, game_id).await;
    let card = app.service.draw_card(game_id, owner).await.unwrap();

    app.service.discard_card(game_id, owner, card).await.unwrap();
    let game = fetch(&app, game_id).await;
    assert_eq!(game.turn.as_ref().unwrap().phase, TurnPhase::WaitingToFinish);

    // Same card again: no longer in hand, regardless of phase.
    force_turn(&app, game_id, owner, TurnPhase::Deciding).await;
    let mut game = fetch(&app, game_id).await;
    set_hand_size(&mut game, owner, 5);
    save(&app, game).await;
    let err = app
        .service
        .discard_card(game_id, owner, card)
        .await
        .unwrap_err();
    assert_eq!(err.code(), ErrorCode::CardNotInHand);
}

#[tokio::test]
async fn finish_turn_demands_the_gate_then_advances_to_a_living_seat() {
    let app = app();
    let (game_id, ids) = common::started(&app, 4).await;
    let owner = turn_owner(&app, game_id).await;

    let err = app.service.finish_turn(game_id, owner).await.unwrap_err();
    assert_eq!(err.code(), ErrorCode::InvalidPhase);

    let card = app.service.draw_card(game_id, owner).await.unwrap();
    app.service.discard_card(game_id, owner, card).await.unwrap();
    app.service.finish_turn(game_id, owner).await.unwrap();

    let game = fetch(&app, game_id).await;
    let turn = game.turn.as_ref().unwrap();
    assert_eq!(turn.phase, TurnPhase::Steal);
    assert_eq!(turn.played_card, None);
    assert_eq!(turn.response_card, None);
    let new_owner = game.player_at_position(turn.owner).unwrap();
    assert!(new_owner.alive);
    assert!(ids.contains(&new_owner.id));
    assert_ne!(new_owner.id, owner);
}

#[tokio::test]
async fn any_seated_player_may_close_a_settled_turn() {
    let app = app();
    let (game_id, ids) = common::started(&app, 4).await;
    let owner = turn_owner(&app, game_id).await;
    let bystander = *ids.iter().find(|&&id| id != owner).unwrap();

    let card = app.service.draw_card(game_id, owner).await.unwrap();
    app.service.discard_card(game_id, owner, card).await.unwrap();
    app.service.finish_turn(game_id, bystander).await.unwrap();

    let game = fetch(&app, game_id).await;
    let turn = game.turn.as_ref().unwrap();
    assert_eq!(turn.phase, TurnPhase::Steal);
    assert_ne!(game.player_at_position(turn.owner).unwrap().id, owner);
}

#[tokio::test]
async fn quarantine_counts_down_on_own_turn_boundaries_only() {
    let app = app();
    let (game_id, _) = common::started(&app, 4).await;
    let owner = turn_owner(&app, game_id).await;

    let mut game = fetch(&app, game_id).await;
    game.player_mut(owner).unwrap().quarantine = 2;
    save(&app, game).await;

    let card = app.service.draw_card(game_id, owner).await.unwrap();
    app.service.discard_card(game_id, owner, card).await.unwrap();
    app.service.finish_turn(game_id, owner).await.unwrap();

    let game = fetch(&app, game_id).await;
    assert_eq!(game.player(owner).unwrap().quarantine, 1);

    // Someone else's boundary leaves the counter alone.
    let second = turn_owner(&app, game_id).await;
    let card = app.service.draw_card(game_id, second).await.unwrap();
    app.service.discard_card(game_id, second, card).await.unwrap();
    app.service.finish_turn(game_id, second).await.unwrap();

    let game = fetch(&app, game_id).await;
    assert_eq!(game.player(owner).unwrap().quarantine, 1);
}
