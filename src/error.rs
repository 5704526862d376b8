//! Caller-facing error type for the action surface.
//!
//! Hosts embedding the engine map `AppError` onto their transport of choice;
//! `code()` yields a stable [`ErrorCode`] and `detail()` a human-renderable
//! message. None of these errors are retried by the engine itself; only
//! `StoreUnavailable` is eligible for caller-side retry.

use thiserror::Error;

use crate::errors::domain::{ConflictKind, DomainError, InfraErrorKind, NotFoundKind};
use crate::errors::ErrorCode;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Validation error: {detail}")]
    Validation { code: ErrorCode, detail: String },
    #[error("Not found: {detail}")]
    NotFound { code: ErrorCode, detail: String },
    #[error("Conflict: {detail}")]
    Conflict { code: ErrorCode, detail: String },
    #[error("Store unavailable: {detail}")]
    StoreUnavailable { detail: String },
    #[error("Internal error: {detail}")]
    Internal { code: ErrorCode, detail: String },
}

impl AppError {
    /// The stable error code for this error.
    pub fn code(&self) -> ErrorCode {
        match self {
            AppError::Validation { code, .. } => *code,
            AppError::NotFound { code, .. } => *code,
            AppError::Conflict { code, .. } => *code,
            AppError::StoreUnavailable { .. } => ErrorCode::StoreUnavailable,
            AppError::Internal { code, .. } => *code,
        }
    }

    /// The human-renderable detail message.
    pub fn detail(&self) -> &str {
        match self {
            AppError::Validation { detail, .. }
            | AppError::NotFound { detail, .. }
            | AppError::Conflict { detail, .. }
            | AppError::StoreUnavailable { detail }
            | AppError::Internal { detail, .. } => detail,
        }
    }

    pub fn invalid(code: ErrorCode, detail: impl Into<String>) -> Self {
        Self::Validation {
            code,
            detail: detail.into(),
        }
    }

    pub fn not_found(code: ErrorCode, detail: impl Into<String>) -> Self {
        Self::NotFound {
            code,
            detail: detail.into(),
        }
    }

    pub fn conflict(code: ErrorCode, detail: impl Into<String>) -> Self {
        Self::Conflict {
            code,
            detail: detail.into(),
        }
    }

    pub fn internal(detail: impl Into<String>) -> Self {
        Self::Internal {
            code: ErrorCode::Internal,
            detail: detail.into(),
        }
    }
}

impl From<DomainError> for AppError {
    fn from(err: DomainError) -> Self {
        use crate::errors::domain::ValidationKind;

        match err {
            DomainError::Validation(kind, detail) => {
                let code = match kind {
                    ValidationKind::PhaseMismatch => ErrorCode::InvalidPhase,
                    ValidationKind::NotYourTurn => ErrorCode::NotYourTurn,
                    ValidationKind::IllegalTarget => ErrorCode::IllegalTarget,
                    ValidationKind::HandConstraint => ErrorCode::HandConstraint,
                    ValidationKind::CardNotInHand => ErrorCode::CardNotInHand,
                    ValidationKind::CardNotPlayable => ErrorCode::CardNotPlayable,
                    _ => ErrorCode::ValidationError,
                };
                AppError::Validation { code, detail }
            }
            DomainError::NotFound(kind, detail) => {
                let code = match kind {
                    NotFoundKind::Game => ErrorCode::GameNotFound,
                    NotFoundKind::Player => ErrorCode::PlayerNotFound,
                    NotFoundKind::Card => ErrorCode::CardNotFound,
                    NotFoundKind::Turn => ErrorCode::TurnNotFound,
                    _ => ErrorCode::NotFound,
                };
                AppError::NotFound { code, detail }
            }
            DomainError::Conflict(kind, detail) => {
                let code = match kind {
                    ConflictKind::DuplicateName => ErrorCode::DuplicateName,
                    ConflictKind::GameFull => ErrorCode::GameFull,
                    ConflictKind::GameAlreadyStarted => ErrorCode::GameAlreadyStarted,
                    _ => ErrorCode::Conflict,
                };
                AppError::Conflict { code, detail }
            }
            DomainError::Infra(kind, detail) => match kind {
                InfraErrorKind::StoreUnavailable => AppError::StoreUnavailable { detail },
                InfraErrorKind::DataCorruption => AppError::Internal {
                    code: ErrorCode::DataCorruption,
                    detail,
                },
                _ => AppError::internal(detail),
            },
        }
    }
}
