//! Error codes for the lobby core API.
//!
//! This module defines all error codes surfaced to callers. Add new codes
//! here; never pass ad-hoc strings as error codes.
//!
//! All error codes are SCREAMING_SNAKE_CASE and map 1:1 to the strings
//! that appear in caller-facing rejection outcomes.

use core::fmt;

/// Centralized error codes for the lobby core API.
///
/// Each variant maps to a canonical SCREAMING_SNAKE_CASE string so the
/// request-handling layer wrapping this crate can expose stable codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    // Resource Not Found
    /// Session not found
    SessionNotFound,
    /// Member not found
    MemberNotFound,
    /// General not found error
    NotFound,

    // Business Logic Conflicts
    /// Session name already taken
    NameTaken,
    /// Signup window is closed
    PhaseClosed,
    /// Operation is illegal in the session's current phase
    PhaseMismatch,
    /// Roster is at capacity
    SessionFull,
    /// Caller does not own the session
    NotOwner,
    /// Owner attempted to join its own session
    OwnerExcluded,
    /// Caller holds no roster slot
    NotAMember,
    /// Roster is below the start threshold
    InsufficientPlayers,
    /// Optimistic lock conflict
    StaleVersion,
    /// Generic conflict (fallback for unmatched conflicts)
    Conflict,

    // System Errors
    /// Internal error
    InternalError,
}

impl ErrorCode {
    /// Returns the canonical SCREAMING_SNAKE_CASE string for this error code.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::SessionNotFound => "SESSION_NOT_FOUND",
            Self::MemberNotFound => "MEMBER_NOT_FOUND",
            Self::NotFound => "NOT_FOUND",
            Self::NameTaken => "NAME_TAKEN",
            Self::PhaseClosed => "PHASE_CLOSED",
            Self::PhaseMismatch => "PHASE_MISMATCH",
            Self::SessionFull => "SESSION_FULL",
            Self::NotOwner => "NOT_OWNER",
            Self::OwnerExcluded => "OWNER_EXCLUDED",
            Self::NotAMember => "NOT_A_MEMBER",
            Self::InsufficientPlayers => "INSUFFICIENT_PLAYERS",
            Self::StaleVersion => "STALE_VERSION",
            Self::Conflict => "CONFLICT",
            Self::InternalError => "INTERNAL_ERROR",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
