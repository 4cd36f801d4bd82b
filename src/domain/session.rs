use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use crate::errors::domain::{ConflictKind, DomainError};

pub type SessionId = i64;
pub type MemberId = i64;

/// Lifecycle phases of a session.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize, Deserialize)]
pub enum Phase {
    /// Session staged by its creator but not yet accepting players.
    Initial,
    /// Signup window is open; the roster may change.
    Signup,
    /// Play has begun; the roster is frozen.
    Active,
    /// Terminal marker. No transition into it is modeled here; finishing
    /// is the gameplay system's concern.
    Finished,
}

/// One admitted slot in a session's roster.
///
/// The session owns the member record outright; `session_id` is a
/// back-reference for lookup and filtering, never for ownership.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Member {
    /// Assigned by the store at admission; zero until first persisted.
    pub id: MemberId,
    pub session_id: SessionId,
    /// Identity holding this membership.
    pub user: String,
    /// Label for this membership; may differ from the user's global name.
    pub display_name: String,
}

/// Why an admission attempt is blocked.
///
/// `admission_block` is the single predicate behind both the `can_admit`
/// query and the admit mutation, so the two can never diverge.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AdmissionBlock {
    /// Signup window is not open.
    PhaseClosed,
    /// The owner is implicitly privileged, never a roster member.
    IsOwner,
    /// Roster is at `max_players`.
    Full,
}

/// A game lobby tracked through signup and into active play.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Session {
    /// Assigned by the store on first save; zero until then.
    pub id: SessionId,
    /// Unique display name, fixed at creation.
    pub name: String,
    /// `min_players <= max_players` is a caller precondition, not
    /// validated here. An unsatisfiable session can be created and will
    /// simply never pass the start threshold.
    pub min_players: u32,
    pub max_players: u32,
    /// Identity of the creating user. Immutable, never in the roster.
    pub owner: String,
    pub phase: Phase,
    /// Insertion order is join order.
    pub roster: Vec<Member>,
    /// Optimistic-concurrency version, bumped by the store on every save.
    pub lock_version: i32,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339")]
    pub updated_at: OffsetDateTime,
}

impl Session {
    /// True while the signup window is open.
    pub fn is_open_for_signup(&self) -> bool {
        self.phase == Phase::Signup
    }

    pub fn is_owned_by(&self, identity: &str) -> bool {
        self.owner == identity
    }

    /// Roster entry for `identity`, if admitted. At most one can exist.
    pub fn member(&self, identity: &str) -> Option<&Member> {
        self.roster.iter().find(|m| m.user == identity)
    }

    pub fn is_full(&self) -> bool {
        self.roster.len() >= self.max_players as usize
    }

    /// The admission predicate shared by `can_admit` and `admit`.
    ///
    /// Returns the first blocking rule, or `None` when `identity` could be
    /// admitted right now. An existing membership is not a block; callers
    /// treat it as idempotent success before consulting this.
    pub fn admission_block(&self, identity: &str) -> Option<AdmissionBlock> {
        if self.phase != Phase::Signup {
            return Some(AdmissionBlock::PhaseClosed);
        }
        if self.is_owned_by(identity) {
            return Some(AdmissionBlock::IsOwner);
        }
        if self.is_full() {
            return Some(AdmissionBlock::Full);
        }
        None
    }

    /// True iff `identity` could join right now.
    pub fn can_admit(&self, identity: &str) -> bool {
        self.member(identity).is_none() && self.admission_block(identity).is_none()
    }

    /// Open the signup window. Administrative transition, not reachable
    /// through the facade operations.
    pub fn open_signup(&mut self) -> Result<(), DomainError> {
        if self.phase != Phase::Initial {
            return Err(DomainError::conflict(
                ConflictKind::WrongPhase,
                format!(
                    "signup can only be opened from Initial (current phase: {:?})",
                    self.phase
                ),
            ));
        }
        self.phase = Phase::Signup;
        Ok(())
    }

    /// Transition Signup -> Active.
    ///
    /// Preconditions, checked in order: caller owns the session, the
    /// signup window is open, the roster meets `min_players`. Any failure
    /// leaves the session untouched.
    pub fn start(&mut self, caller: &str) -> Result<(), DomainError> {
        if !self.is_owned_by(caller) {
            return Err(DomainError::conflict(
                ConflictKind::NotOwner,
                format!("only the owner may start session '{}'", self.name),
            ));
        }
        if self.phase != Phase::Signup {
            return Err(DomainError::conflict(
                ConflictKind::WrongPhase,
                format!(
                    "session can only start from Signup (current phase: {:?})",
                    self.phase
                ),
            ));
        }
        if (self.roster.len() as u32) < self.min_players {
            return Err(DomainError::conflict(
                ConflictKind::InsufficientPlayers,
                format!(
                    "session has {} of {} required players",
                    self.roster.len(),
                    self.min_players
                ),
            ));
        }
        self.phase = Phase::Active;
        Ok(())
    }

    /// Deletion guard: owner-only, and only while signup is open.
    pub fn ensure_deletable_by(&self, caller: &str) -> Result<(), DomainError> {
        if !self.is_owned_by(caller) {
            return Err(DomainError::conflict(
                ConflictKind::NotOwner,
                format!("only the owner may delete session '{}'", self.name),
            ));
        }
        if self.phase != Phase::Signup {
            return Err(DomainError::conflict(
                ConflictKind::WrongPhase,
                format!(
                    "session can only be deleted during Signup (current phase: {:?})",
                    self.phase
                ),
            ));
        }
        Ok(())
    }

    /// Append a fully constructed member to the roster.
    ///
    /// Callers resolve idempotency (existing membership) first; here a
    /// duplicate identity is rejected outright so the uniqueness invariant
    /// cannot be violated by a buggy caller.
    pub fn admit(&mut self, member: Member) -> Result<(), DomainError> {
        if self.member(&member.user).is_some() {
            return Err(DomainError::conflict(
                ConflictKind::Other("ALREADY_MEMBER".into()),
                format!("user '{}' already holds a roster slot", member.user),
            ));
        }
        if let Some(block) = self.admission_block(&member.user) {
            return Err(block.into_conflict(self));
        }
        self.roster.push(member);
        Ok(())
    }

    /// Remove `identity`'s roster entry, destroying it.
    ///
    /// Phase is checked before membership, matching the withdraw protocol.
    /// Returns the removed member for logging.
    pub fn withdraw(&mut self, identity: &str) -> Result<Member, DomainError> {
        if self.phase != Phase::Signup {
            return Err(DomainError::conflict(
                ConflictKind::WrongPhase,
                format!(
                    "roster changes require Signup (current phase: {:?})",
                    self.phase
                ),
            ));
        }
        let idx = self
            .roster
            .iter()
            .position(|m| m.user == identity)
            .ok_or_else(|| {
                DomainError::conflict(
                    ConflictKind::NotAMember,
                    format!("user '{identity}' holds no slot in session '{}'", self.name),
                )
            })?;
        Ok(self.roster.remove(idx))
    }
}

impl AdmissionBlock {
    /// Conflict naming the specific rule that blocked admission.
    pub fn into_conflict(self, session: &Session) -> DomainError {
        match self {
            AdmissionBlock::PhaseClosed => DomainError::conflict(
                ConflictKind::PhaseClosed,
                format!(
                    "session '{}' is not open for signup (phase: {:?})",
                    session.name, session.phase
                ),
            ),
            AdmissionBlock::IsOwner => DomainError::conflict(
                ConflictKind::OwnerExcluded,
                format!("owner '{}' cannot join their own session", session.owner),
            ),
            AdmissionBlock::Full => DomainError::conflict(
                ConflictKind::SessionFull,
                format!(
                    "session '{}' is full ({} players)",
                    session.name, session.max_players
                ),
            ),
        }
    }
}
