//! Authoritative rules engine for *La Cosa*, a hidden-role social-deduction
//! card game for 4 to 12 players.
//!
//! The crate owns the session state machine, seating topology, card-effect
//! dispatch, legality validation, and win-condition evaluation. Transport,
//! persistence backends, and real-time push are collaborator traits
//! ([`repos::GameRepository`], [`notify::Notifier`]) implemented by the host;
//! an in-memory repository and a tracing notifier ship for tests and
//! single-process embedding.

pub mod domain;
pub mod error;
pub mod errors;
pub mod notify;
pub mod repos;
pub mod services;

#[cfg(test)]
mod test_bootstrap;

pub use domain::{CardCode, CardId, Game, GameId, GamePhase, PlayerId, Role, RuleConfig, TurnPhase, WinOutcome};
pub use error::AppError;
pub use errors::ErrorCode;
pub use notify::{EventEnvelope, Notifier, TracingNotifier};
pub use repos::{GameRepository, InMemoryGameRepository};
pub use services::GameFlowService;
pub use services::game_flow::CreateGameRequest;
