//! Caller-facing error surface for the facade operations.
//!
//! Rule violations arrive here as classified `DomainError`s and are mapped
//! to `NotFound`/`Conflict` rejection outcomes with stable codes. Anything
//! else (validation bugs, store failures) collapses into `Internal`, whose
//! public message never carries the underlying detail; the detail stays on
//! the variant for logging.

use thiserror::Error;

use crate::errors::domain::{ConflictKind, DomainError, NotFoundKind};
use crate::errors::ErrorCode;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Not found: {detail}")]
    NotFound { code: ErrorCode, detail: String },
    #[error("Conflict: {detail}")]
    Conflict { code: ErrorCode, detail: String },
    #[error("An unexpected failure occurred")]
    Internal { detail: String },
}

impl AppError {
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
            detail: detail.into(),
        }
    }

    /// Stable code for this error.
    pub fn code(&self) -> ErrorCode {
        match self {
            AppError::NotFound { code, .. } => *code,
            AppError::Conflict { code, .. } => *code,
            AppError::Internal { .. } => ErrorCode::InternalError,
        }
    }

    /// Human-readable reason distinguishing the specific rule. For
    /// `Internal` this is log-only context, not the public message.
    pub fn detail(&self) -> &str {
        match self {
            AppError::NotFound { detail, .. } => detail,
            AppError::Conflict { detail, .. } => detail,
            AppError::Internal { detail } => detail,
        }
    }
}

impl From<DomainError> for AppError {
    fn from(err: DomainError) -> Self {
        match err {
            DomainError::NotFound(kind, detail) => {
                let code = match kind {
                    NotFoundKind::Session => ErrorCode::SessionNotFound,
                    NotFoundKind::Member => ErrorCode::MemberNotFound,
                    _ => ErrorCode::NotFound,
                };
                AppError::NotFound { code, detail }
            }
            DomainError::Conflict(kind, detail) => {
                let code = match kind {
                    ConflictKind::NameTaken => ErrorCode::NameTaken,
                    ConflictKind::PhaseClosed => ErrorCode::PhaseClosed,
                    ConflictKind::WrongPhase => ErrorCode::PhaseMismatch,
                    ConflictKind::SessionFull => ErrorCode::SessionFull,
                    ConflictKind::NotOwner => ErrorCode::NotOwner,
                    ConflictKind::OwnerExcluded => ErrorCode::OwnerExcluded,
                    ConflictKind::NotAMember => ErrorCode::NotAMember,
                    ConflictKind::InsufficientPlayers => ErrorCode::InsufficientPlayers,
                    ConflictKind::StaleVersion => ErrorCode::StaleVersion,
                    _ => ErrorCode::Conflict,
                };
                AppError::Conflict { code, detail }
            }
            DomainError::Validation(detail) => AppError::Internal { detail },
            DomainError::Infra(kind, detail) => AppError::Internal {
                detail: format!("{kind:?}: {detail}"),
            },
        }
    }
}
