mod common;

use common::{app, fetch, save, started};
use lacosa_engine::domain::state::{GamePhase, Role};
use lacosa_engine::{ErrorCode, WinOutcome};

#[tokio::test]
async fn a_human_cannot_declare() {
    let app = app();
    let (game_id, _) = started(&app, 4).await;
    let game = fetch(&app, game_id).await;
    let human = game
        .players
        .iter()
        .find(|p| p.role == Role::Human)
        .unwrap()
        .id;

    let err = app.service.declare_victory(game_id, human).await.unwrap_err();
    assert_eq!(err.code(), ErrorCode::IllegalTarget);
    assert_eq!(fetch(&app, game_id).await.phase, GamePhase::Playing);
}

#[tokio::test]
async fn a_premature_declaration_loses_to_the_humans() {
    let app = app();
    let (game_id, _) = started(&app, 4).await;
    let game = fetch(&app, game_id).await;
    let thing = game
        .players
        .iter()
        .find(|p| p.role == Role::TheThing)
        .unwrap()
        .id;

    let outcome = app.service.declare_victory(game_id, thing).await.unwrap();
    match outcome {
        WinOutcome::HumansWin { winners } => {
            assert_eq!(winners.len(), 3);
            assert!(!winners.contains(&thing));
        }
        other => panic!("unexpected outcome: {other:?}"),
    }
    assert_eq!(fetch(&app, game_id).await.phase, GamePhase::Finished);
}

#[tokio::test]
async fn a_justified_declaration_wins_for_the_thing() {
    let app = app();
    let (game_id, _) = started(&app, 4).await;
    let mut game = fetch(&app, game_id).await;
    let thing = game
        .players
        .iter()
        .find(|p| p.role == Role::TheThing)
        .unwrap()
        .id;
    for player in game.players.iter_mut() {
        if player.id != thing {
            player.role = Role::Infected;
        }
    }
    save(&app, game).await;

    let outcome = app.service.declare_victory(game_id, thing).await.unwrap();
    assert_eq!(outcome, WinOutcome::TheThingWins { winner: thing });
    assert_eq!(fetch(&app, game_id).await.phase, GamePhase::Finished);
}

#[tokio::test]
async fn no_action_survives_a_finished_game() {
    let app = app();
    let (game_id, _) = started(&app, 4).await;
    let game = fetch(&app, game_id).await;
    let thing = game
        .players
        .iter()
        .find(|p| p.role == Role::TheThing)
        .unwrap()
        .id;
    app.service.declare_victory(game_id, thing).await.unwrap();

    let owner = game.player_at_position(game.turn.as_ref().unwrap().owner).unwrap().id;
    let err = app.service.draw_card(game_id, owner).await.unwrap_err();
    assert_eq!(err.code(), ErrorCode::InvalidPhase);
    let err = app.service.finish_turn(game_id, owner).await.unwrap_err();
    assert_eq!(err.code(), ErrorCode::InvalidPhase);
}
