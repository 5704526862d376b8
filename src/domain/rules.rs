//! Numeric rule constants and the configurable exemption lists.

use crate::domain::cards::CardCode;

pub const MIN_PLAYERS: u8 = 4;
pub const MAX_PLAYERS: u8 = 12;

/// Cards dealt to each player at game start.
pub const INITIAL_HAND_SIZE: usize = 4;

/// Resting hand size. Drawing is rejected at `HAND_LIMIT`, playing and
/// discarding are rejected below it (the player must draw first).
pub const HAND_LIMIT: usize = 5;

/// Per-card-code policy knobs. The source material disagrees with itself on
/// which codes are exempt from adjacency and which grant an extra turn, so
/// these are data rather than hard-coded match arms; `Default` carries the
/// later, more complete policy.
#[derive(Debug, Clone)]
pub struct RuleConfig {
    /// Codes a player may (and must) target at themselves.
    pub self_target: Vec<CardCode>,
    /// Codes exempt from the adjacent-target-only rule.
    pub non_adjacent: Vec<CardCode>,
    /// Seat-swap codes whose player keeps the turn after `finish_turn`.
    pub extra_turn: Vec<CardCode>,
    /// Codes a quarantined player may not initiate.
    pub quarantine_blocked: Vec<CardCode>,
    /// Rounds of restriction applied by a quarantine card.
    pub quarantine_rounds: u8,
}

impl Default for RuleConfig {
    fn default() -> Self {
        Self {
            self_target: vec![CardCode::Whisky, CardCode::WatchYourBack],
            non_adjacent: vec![
                CardCode::RunAway,
                CardCode::Whisky,
                CardCode::WatchYourBack,
            ],
            extra_turn: vec![CardCode::ChangePlaces, CardCode::RunAway],
            quarantine_blocked: vec![
                CardCode::Flamethrower,
                CardCode::ChangePlaces,
                CardCode::RunAway,
            ],
            quarantine_rounds: 2,
        }
    }
}

impl RuleConfig {
    pub fn allows_self_target(&self, code: CardCode) -> bool {
        self.self_target.contains(&code)
    }

    pub fn exempt_from_adjacency(&self, code: CardCode) -> bool {
        self.non_adjacent.contains(&code)
    }

    pub fn grants_extra_turn(&self, code: CardCode) -> bool {
        self.extra_turn.contains(&code)
    }

    pub fn blocked_by_quarantine(&self, code: CardCode) -> bool {
        self.quarantine_blocked.contains(&code)
    }
}
