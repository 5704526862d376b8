//! Win-condition evaluation.
//!
//! The checks are ordered; the first that fires decides the game and the
//! evaluator never reports two winners for one state. Callers run this after
//! every mutation that can kill a player or change a role.

use crate::domain::state::{require_player, Game, GamePhase, PlayerId, Role};
use crate::errors::domain::{DomainError, ValidationKind};

/// Who won, and which living players share the win.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WinOutcome {
    /// Exactly one player survives; they win regardless of role.
    SoleSurvivor { winner: PlayerId },
    /// The Thing was burned; the living humans win together.
    HumansWin { winners: Vec<PlayerId> },
    /// Every player except The Thing is infected.
    TheThingWins { winner: PlayerId },
}

impl WinOutcome {
    pub fn winners(&self) -> Vec<PlayerId> {
        match self {
            WinOutcome::SoleSurvivor { winner } | WinOutcome::TheThingWins { winner } => {
                vec![*winner]
            }
            WinOutcome::HumansWin { winners } => winners.clone(),
        }
    }

    pub fn describe(&self) -> &'static str {
        match self {
            WinOutcome::SoleSurvivor { .. } => "sole survivor",
            WinOutcome::HumansWin { .. } => "the humans burned The Thing",
            WinOutcome::TheThingWins { .. } => "everyone else is infected",
        }
    }
}

fn the_thing(game: &Game) -> Option<&crate::domain::state::Player> {
    game.players.iter().find(|p| p.role == Role::TheThing)
}

/// Evaluate the ordered win conditions against the current state.
pub fn evaluate(game: &Game) -> Option<WinOutcome> {
    let living: Vec<_> = game.players.iter().filter(|p| p.alive).collect();

    // 1. Sole survivor, regardless of role.
    if living.len() == 1 {
        return Some(WinOutcome::SoleSurvivor {
            winner: living[0].id,
        });
    }

    // 2. The Thing is dead: the living humans share the win.
    if let Some(thing) = the_thing(game) {
        if !thing.alive {
            let winners = living
                .iter()
                .filter(|p| p.role == Role::Human)
                .map(|p| p.id)
                .collect();
            return Some(WinOutcome::HumansWin { winners });
        }
        // 3. Every living player but The Thing carries the infection.
        let uninfected_others = living
            .iter()
            .filter(|p| p.id != thing.id && p.role != Role::Infected)
            .count();
        if uninfected_others == 0 {
            return Some(WinOutcome::TheThingWins { winner: thing.id });
        }
    }

    None
}

/// Resolve a spoken victory declaration. Only The Thing may declare; a
/// declaration that does not hold hands the win to the humans instead.
pub fn resolve_declaration(
    game: &Game,
    declarer_id: PlayerId,
) -> Result<WinOutcome, DomainError> {
    let declarer = require_player(game, declarer_id)?;
    if declarer.role != Role::TheThing {
        return Err(DomainError::validation(
            ValidationKind::IllegalTarget,
            "only The Thing may declare victory",
        ));
    }

    match evaluate(game) {
        Some(outcome @ WinOutcome::TheThingWins { .. }) => Ok(outcome),
        _ => {
            // The bluff failed: the remaining humans win on the spot.
            let winners = game
                .players
                .iter()
                .filter(|p| p.alive && p.role == Role::Human)
                .map(|p| p.id)
                .collect();
            Ok(WinOutcome::HumansWin { winners })
        }
    }
}

/// Mark the game finished and log the result.
pub fn record_outcome(game: &mut Game, outcome: &WinOutcome) {
    game.phase = GamePhase::Finished;
    let names: Vec<String> = outcome
        .winners()
        .iter()
        .filter_map(|&id| game.player(id).map(|p| p.name.clone()))
        .collect();
    game.append_log(format!("game over: {} ({})", outcome.describe(), names.join(", ")));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::test_support::game_with_positions;

    #[test]
    fn no_winner_while_the_table_is_contested() {
        let mut game = game_with_positions(&[1, 2, 3, 4]);
        game.player_mut(1).unwrap().role = Role::TheThing;
        assert_eq!(evaluate(&game), None);
    }

    #[test]
    fn sole_survivor_wins_even_as_the_thing() {
        let mut game = game_with_positions(&[1, 2, 3, 4]);
        game.player_mut(2).unwrap().role = Role::TheThing;
        for id in [1, 3, 4] {
            game.player_mut(id).unwrap().alive = false;
        }
        assert_eq!(evaluate(&game), Some(WinOutcome::SoleSurvivor { winner: 2 }));
    }

    #[test]
    fn dead_thing_means_living_humans_win() {
        let mut game = game_with_positions(&[1, 2, 3, 4]);
        game.player_mut(2).unwrap().role = Role::TheThing;
        game.player_mut(2).unwrap().alive = false;
        game.player_mut(3).unwrap().role = Role::Infected;

        let outcome = evaluate(&game).unwrap();
        assert_eq!(outcome, WinOutcome::HumansWin { winners: vec![1, 4] });
    }

    #[test]
    fn full_infection_hands_the_win_to_the_thing() {
        let mut game = game_with_positions(&[1, 2, 3, 4]);
        game.player_mut(1).unwrap().role = Role::TheThing;
        for id in [2, 3, 4] {
            game.player_mut(id).unwrap().role = Role::Infected;
        }
        assert_eq!(evaluate(&game), Some(WinOutcome::TheThingWins { winner: 1 }));
    }

    #[test]
    fn sole_survivor_outranks_full_infection() {
        let mut game = game_with_positions(&[1, 2, 3, 4]);
        game.player_mut(1).unwrap().role = Role::TheThing;
        for id in [1, 2, 3] {
            game.player_mut(id).unwrap().alive = false;
        }
        game.player_mut(4).unwrap().role = Role::Infected;
        assert_eq!(evaluate(&game), Some(WinOutcome::SoleSurvivor { winner: 4 }));
    }

    #[test]
    fn humans_cannot_declare_victory() {
        let mut game = game_with_positions(&[1, 2, 3, 4]);
        game.player_mut(2).unwrap().role = Role::TheThing;
        let err = resolve_declaration(&game, 1).unwrap_err();
        assert!(matches!(err, DomainError::Validation { .. }));
    }

    #[test]
    fn false_declaration_hands_the_win_to_the_humans() {
        let mut game = game_with_positions(&[1, 2, 3, 4]);
        game.player_mut(1).unwrap().role = Role::TheThing;
        game.player_mut(2).unwrap().role = Role::Infected;

        let outcome = resolve_declaration(&game, 1).unwrap();
        assert_eq!(outcome, WinOutcome::HumansWin { winners: vec![3, 4] });
    }

    #[test]
    fn true_declaration_confirms_the_thing() {
        let mut game = game_with_positions(&[1, 2, 3, 4]);
        game.player_mut(1).unwrap().role = Role::TheThing;
        for id in [2, 3, 4] {
            game.player_mut(id).unwrap().role = Role::Infected;
        }
        let outcome = resolve_declaration(&game, 1).unwrap();
        assert_eq!(outcome, WinOutcome::TheThingWins { winner: 1 });
    }

    #[test]
    fn recording_an_outcome_finishes_the_game() {
        let mut game = game_with_positions(&[1, 2, 3, 4]);
        record_outcome(&mut game, &WinOutcome::SoleSurvivor { winner: 1 });
        assert_eq!(game.phase, GamePhase::Finished);
        assert!(game.log.last().unwrap().text.contains("p1"));
    }
}
