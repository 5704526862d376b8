//! Error codes for the La Cosa rules engine.
//!
//! This module defines all error codes surfaced to callers. Add new codes
//! here; never pass ad-hoc strings as error codes.
//!
//! All error codes are SCREAMING_SNAKE_CASE and map 1:1 to the strings the
//! host renders to users.

use core::fmt;

/// Centralized error codes for the engine's action surface.
///
/// This enum ensures type safety and prevents the use of ad-hoc error codes.
/// Each variant maps to a canonical SCREAMING_SNAKE_CASE string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    // Resource Not Found
    /// Game not found
    GameNotFound,
    /// Player not found
    PlayerNotFound,
    /// Card not found
    CardNotFound,
    /// Turn record missing for a playing game
    TurnNotFound,
    /// General not found error
    NotFound,

    // Action Validation
    /// Game or turn is in the wrong phase for this action
    InvalidPhase,
    /// Acting player does not hold the turn
    NotYourTurn,
    /// Target is dead, non-adjacent, self, or quarantine-blocked
    IllegalTarget,
    /// Hand size forbids this action (must draw first, or hand full)
    HandConstraint,
    /// Card is not in the actor's hand
    CardNotInHand,
    /// Card exists but may not be played
    CardNotPlayable,
    /// General validation error
    ValidationError,

    // Lobby Conflicts
    /// A player with this name already joined
    DuplicateName,
    /// Game reached max_players
    GameFull,
    /// Game already left the Waiting phase
    GameAlreadyStarted,
    /// Generic conflict (fallback for unmatched conflicts)
    Conflict,

    // System Errors
    /// Repository unavailable (only class eligible for caller-side retry)
    StoreUnavailable,
    /// Data corruption detected in a stored aggregate
    DataCorruption,
    /// Internal error
    Internal,
}

impl ErrorCode {
    /// Returns the canonical SCREAMING_SNAKE_CASE string for this error code.
    pub const fn as_str(&self) -> &'static str {
        match self {
            // Resource Not Found
            Self::GameNotFound => "GAME_NOT_FOUND",
            Self::PlayerNotFound => "PLAYER_NOT_FOUND",
            Self::CardNotFound => "CARD_NOT_FOUND",
            Self::TurnNotFound => "TURN_NOT_FOUND",
            Self::NotFound => "NOT_FOUND",

            // Action Validation
            Self::InvalidPhase => "INVALID_PHASE",
            Self::NotYourTurn => "NOT_YOUR_TURN",
            Self::IllegalTarget => "ILLEGAL_TARGET",
            Self::HandConstraint => "HAND_CONSTRAINT",
            Self::CardNotInHand => "CARD_NOT_IN_HAND",
            Self::CardNotPlayable => "CARD_NOT_PLAYABLE",
            Self::ValidationError => "VALIDATION_ERROR",

            // Lobby Conflicts
            Self::DuplicateName => "DUPLICATE_NAME",
            Self::GameFull => "GAME_FULL",
            Self::GameAlreadyStarted => "GAME_ALREADY_STARTED",
            Self::Conflict => "CONFLICT",

            // System Errors
            Self::StoreUnavailable => "STORE_UNAVAILABLE",
            Self::DataCorruption => "DATA_CORRUPTION",
            Self::Internal => "INTERNAL",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
