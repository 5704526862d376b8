//! Domain-level error type used across services and the repository seam.
//!
//! This error type is transport-agnostic. The action surface returns
//! `Result<T, crate::error::AppError>` and converts from `DomainError`
//! using the provided `From<DomainError> for AppError` implementation.

use std::error::Error;
use std::fmt::{Display, Formatter, Result as FmtResult};

/// Validation failure kinds, one per precondition class in the legality layer.
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ValidationKind {
    /// Game or turn is in the wrong phase for the attempted action
    PhaseMismatch,
    /// Actor does not hold the turn
    NotYourTurn,
    /// Target is self, dead, non-adjacent, or blocked by quarantine
    IllegalTarget,
    /// Hand-size gate: must draw first, or hand is full
    HandConstraint,
    /// Card is not in the actor's hand (or not in the deck, for draws)
    CardNotInHand,
    /// Card exists but `playable` is false or it is already played
    CardNotPlayable,
    Other(String),
}

/// Domain-level not found entities
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum NotFoundKind {
    Game,
    Player,
    Card,
    Turn,
    Other(String),
}

/// Domain-level conflict kinds
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ConflictKind {
    DuplicateName,
    GameFull,
    GameAlreadyStarted,
    Other(String),
}

/// Infra error kinds to distinguish operational failures
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum InfraErrorKind {
    StoreUnavailable,
    DataCorruption,
    Other(String),
}

/// Central domain error type
#[derive(Debug, Clone, PartialEq)]
pub enum DomainError {
    /// Input/user validation or business rule violation
    Validation(ValidationKind, String),
    /// Semantic conflict
    Conflict(ConflictKind, String),
    /// Missing resource in domain terms
    NotFound(NotFoundKind, String),
    /// Infrastructure/operational failures
    Infra(InfraErrorKind, String),
}

impl Display for DomainError {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            DomainError::Validation(kind, d) => write!(f, "validation {kind:?}: {d}"),
            DomainError::Conflict(kind, d) => write!(f, "conflict {kind:?}: {d}"),
            DomainError::NotFound(kind, d) => write!(f, "not found {kind:?}: {d}"),
            DomainError::Infra(kind, d) => write!(f, "infra {kind:?}: {d}"),
        }
    }
}

impl Error for DomainError {}

impl DomainError {
    pub fn validation(kind: ValidationKind, detail: impl Into<String>) -> Self {
        Self::Validation(kind, detail.into())
    }
    pub fn validation_other(detail: impl Into<String>) -> Self {
        let detail = detail.into();
        Self::Validation(ValidationKind::Other(detail.clone()), detail)
    }
    pub fn conflict(kind: ConflictKind, detail: impl Into<String>) -> Self {
        Self::Conflict(kind, detail.into())
    }
    pub fn not_found(kind: NotFoundKind, detail: impl Into<String>) -> Self {
        Self::NotFound(kind, detail.into())
    }
    pub fn infra(kind: InfraErrorKind, detail: impl Into<String>) -> Self {
        Self::Infra(kind, detail.into())
    }

    /// True when the failure is operational and the caller may retry the
    /// whole action. Every other variant is a genuine precondition failure.
    pub fn is_retryable(&self) -> bool {
        matches!(self, DomainError::Infra(InfraErrorKind::StoreUnavailable, _))
    }
}
