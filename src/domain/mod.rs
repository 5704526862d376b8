//! Pure rules engine: no transport, no storage, no clocks beyond the log
//! timestamps. Everything here mutates a [`state::Game`] aggregate in place
//! and reports errors as [`crate::errors::DomainError`].

pub mod cards;
pub mod dealing;
pub mod effects;
pub mod player_view;
pub mod rules;
pub mod seating;
pub mod state;
pub mod turn_flow;
pub mod win;

#[cfg(test)]
pub mod test_support;

pub use cards::{Card, CardCode, CardId, CardKind, CardState};
pub use rules::RuleConfig;
pub use state::{Game, GameId, GamePhase, Player, PlayerId, Role, TablePosition, Turn, TurnPhase};
pub use win::WinOutcome;
