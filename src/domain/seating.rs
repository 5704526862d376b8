//! Seat / adjacency math over the circular table of living players.
//!
//! These live in `domain` so the effect handlers, turn flow, and validation
//! layer share a single source of truth for rotation and "who acts next".
//!
//! Clockwise direction (`play_direction = true`) walks ascending positions.

use crate::domain::state::{Game, TablePosition};
use crate::errors::domain::{DomainError, ValidationKind};

/// Sorted ascending positions of all living players.
pub fn alive_positions(game: &Game) -> Vec<TablePosition> {
    let mut positions: Vec<TablePosition> = game
        .players
        .iter()
        .filter(|p| p.alive)
        .map(|p| p.table_position)
        .collect();
    positions.sort_unstable();
    positions
}

/// The next living position strictly after `from` in the given direction,
/// wrapping around the table. `from` itself does not need to be alive, which
/// lets callers step past a freshly eliminated seat.
pub fn successor(game: &Game, from: TablePosition, clockwise: bool) -> Result<TablePosition, DomainError> {
    let positions = alive_positions(game);
    if positions.is_empty() {
        return Err(DomainError::validation_other(
            "no living players to rotate through",
        ));
    }

    let next = if clockwise {
        positions
            .iter()
            .copied()
            .find(|&p| p > from)
            .unwrap_or(positions[0])
    } else {
        positions
            .iter()
            .rev()
            .copied()
            .find(|&p| p < from)
            .unwrap_or(positions[positions.len() - 1])
    };
    Ok(next)
}

/// The position holding the next turn after `from`, following the game's
/// play direction. Undefined before the game starts.
pub fn next_owner(game: &Game, from: TablePosition) -> Result<TablePosition, DomainError> {
    let clockwise = game.play_direction.ok_or_else(|| {
        DomainError::validation(
            ValidationKind::PhaseMismatch,
            "play direction is unset before the game starts",
        )
    })?;
    successor(game, from, clockwise)
}

/// Walk `steps` living seats from `from` in the game's play direction.
/// Used by exchange-target selection after seat swaps; with `steps = 0` the
/// starting position is returned unchanged.
pub fn player_at(game: &Game, from: TablePosition, steps: u8) -> Result<TablePosition, DomainError> {
    let clockwise = game.play_direction.unwrap_or(true);
    let mut position = from;
    for _ in 0..steps {
        position = successor(game, position, clockwise)?;
    }
    Ok(position)
}

/// Two living players are adjacent iff their seats are consecutive in the
/// alive cycle, first and last included (circular table).
///
/// With a single survivor the question is undefined; the win-condition
/// evaluator must fire before any caller gets here.
pub fn are_adjacent(game: &Game, a: TablePosition, b: TablePosition) -> bool {
    if a == b {
        return false;
    }
    let positions = alive_positions(game);
    let Some(ia) = positions.iter().position(|&p| p == a) else {
        return false;
    };
    let Some(ib) = positions.iter().position(|&p| p == b) else {
        return false;
    };
    let n = positions.len();
    if n < 2 {
        return false;
    }
    (ia + 1) % n == ib || (ib + 1) % n == ia
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::test_support::game_with_positions;

    #[test]
    fn alive_positions_skips_dead_seats() {
        let mut game = game_with_positions(&[1, 2, 3, 4]);
        game.players[1].alive = false;
        assert_eq!(alive_positions(&game), vec![1, 3, 4]);
    }

    #[test]
    fn next_owner_wraps_clockwise() {
        let mut game = game_with_positions(&[1, 2, 3, 4]);
        game.play_direction = Some(true);
        assert_eq!(next_owner(&game, 4).unwrap(), 1);
        assert_eq!(next_owner(&game, 2).unwrap(), 3);
    }

    #[test]
    fn next_owner_wraps_counter_clockwise() {
        let mut game = game_with_positions(&[1, 2, 3, 4]);
        game.play_direction = Some(false);
        assert_eq!(next_owner(&game, 1).unwrap(), 4);
        assert_eq!(next_owner(&game, 3).unwrap(), 2);
    }

    #[test]
    fn next_owner_skips_dead_players() {
        let mut game = game_with_positions(&[1, 2, 3, 4]);
        game.play_direction = Some(true);
        game.players[2].alive = false; // position 3
        assert_eq!(next_owner(&game, 2).unwrap(), 4);
    }

    #[test]
    fn successor_steps_past_a_dead_starting_seat() {
        let mut game = game_with_positions(&[1, 2, 3, 4]);
        game.players[1].alive = false; // position 2 freshly eliminated
        assert_eq!(successor(&game, 2, true).unwrap(), 3);
    }

    #[test]
    fn player_at_walks_multiple_steps() {
        let mut game = game_with_positions(&[1, 2, 3, 4, 5]);
        game.play_direction = Some(true);
        assert_eq!(player_at(&game, 1, 0).unwrap(), 1);
        assert_eq!(player_at(&game, 1, 2).unwrap(), 3);
        assert_eq!(player_at(&game, 4, 3).unwrap(), 2);
    }

    #[test]
    fn adjacency_is_circular() {
        let game = game_with_positions(&[1, 2, 3, 4]);
        assert!(are_adjacent(&game, 1, 2));
        assert!(are_adjacent(&game, 4, 1));
        assert!(!are_adjacent(&game, 1, 3));
        assert!(!are_adjacent(&game, 2, 2));
    }

    #[test]
    fn adjacency_respects_deaths() {
        let mut game = game_with_positions(&[1, 2, 3, 4]);
        game.players[1].alive = false; // position 2
        assert!(are_adjacent(&game, 1, 3));
        assert!(!are_adjacent(&game, 1, 2));
    }
}
