//! Property tests for the circular seating topology.

use proptest::prelude::*;

use lacosa_engine::domain::cards::{Card, CardCode, CardKind, CardState};
use lacosa_engine::domain::effects::apply_card_effect;
use lacosa_engine::domain::rules::RuleConfig;
use lacosa_engine::domain::seating::{are_adjacent, player_at, successor};
use lacosa_engine::domain::state::{Game, GamePhase, Player, Role, Turn};

fn game_with(positions: &[u8], clockwise: bool) -> Game {
    let players = positions
        .iter()
        .enumerate()
        .map(|(i, &pos)| Player {
            id: (i + 1) as i64,
            name: format!("p{pos}"),
            table_position: pos,
            role: Role::Human,
            alive: true,
            quarantine: 0,
            owner: i == 0,
        })
        .collect();
    Game {
        id: 1,
        name: "prop".into(),
        min_players: 4,
        max_players: 12,
        password: None,
        phase: GamePhase::Playing,
        play_direction: Some(clockwise),
        rng_seed: 7,
        obstacles: Vec::new(),
        players,
        deck: Vec::new(),
        turn: Some(Turn::new(positions[0])),
        log: Vec::new(),
    }
}

fn seat_set() -> impl Strategy<Value = Vec<u8>> {
    proptest::collection::btree_set(1u8..=12, 1..=12).prop_map(|s| s.into_iter().collect())
}

proptest! {
    #[test]
    fn successor_always_lands_on_a_living_seat(
        seats in seat_set(),
        from in 0u8..=13,
        clockwise in any::<bool>(),
    ) {
        let game = game_with(&seats, clockwise);
        let next = successor(&game, from, clockwise).unwrap();
        prop_assert!(seats.contains(&next));
    }

    #[test]
    fn walking_the_whole_cycle_returns_home(
        seats in seat_set(),
        start_idx in any::<prop::sample::Index>(),
        clockwise in any::<bool>(),
    ) {
        let game = game_with(&seats, clockwise);
        let start = seats[start_idx.index(seats.len())];
        let steps = seats.len() as u8;
        prop_assert_eq!(player_at(&game, start, steps).unwrap(), start);
    }

    #[test]
    fn adjacency_is_symmetric(
        seats in seat_set(),
        a_idx in any::<prop::sample::Index>(),
        b_idx in any::<prop::sample::Index>(),
    ) {
        let game = game_with(&seats, true);
        let a = seats[a_idx.index(seats.len())];
        let b = seats[b_idx.index(seats.len())];
        prop_assert_eq!(are_adjacent(&game, a, b), are_adjacent(&game, b, a));
    }

    #[test]
    fn pairwise_rotation_keeps_seats_unique(
        seats in proptest::collection::btree_set(1u8..=12, 2..=12)
            .prop_map(|s| s.into_iter().collect::<Vec<u8>>()),
        actor_idx in any::<prop::sample::Index>(),
    ) {
        let mut game = game_with(&seats, true);
        let actor = game.players[actor_idx.index(seats.len())].id;
        game.deck.push(Card {
            id: 1,
            code: CardCode::RoundAndRound,
            name: "Vuelta y vuelta".into(),
            kind: CardKind::Panic,
            number_in_card: 4,
            state: CardState::InHand,
            playable: true,
            player_id: Some(actor),
        });

        apply_card_effect(&mut game, &RuleConfig::default(), 1, actor, actor, 1).unwrap();

        let mut after: Vec<u8> = game.players.iter().map(|p| p.table_position).collect();
        after.sort_unstable();
        let mut expected = seats.clone();
        expected.sort_unstable();
        prop_assert_eq!(after, expected);
    }
}
