//! Persistence gateway for sessions.
//!
//! The store operates on whole `Session` records (roster inline); there
//! are no partial-field updates. Implementations must provide
//! single-record atomicity, a name-uniqueness guarantee on insert, and
//! compare-and-swap on `lock_version` for update/delete. Everything else
//! (rule checks, cascades) lives above the gateway.

pub mod memory;

use async_trait::async_trait;

use crate::domain::{Session, SessionId};
use crate::errors::domain::DomainError;

pub use memory::MemStore;

#[async_trait]
pub trait SessionStore: Send + Sync {
    async fn find_by_id(&self, id: SessionId) -> Result<Option<Session>, DomainError>;

    /// Exact-match lookup on the unique session name.
    async fn find_by_name(&self, name: &str) -> Result<Option<Session>, DomainError>;

    /// All sessions, unordered. Callers filter (open sessions, member
    /// scans); per-session independence means no cross-record consistency
    /// is promised beyond a point-in-time snapshot.
    async fn list_all(&self) -> Result<Vec<Session>, DomainError>;

    /// Upsert.
    ///
    /// Insert when `session.id == 0`: assigns the session id, assigns ids
    /// to any members with id 0, stamps `created_at`/`updated_at`, sets
    /// `lock_version` to 1, and fails with a `NameTaken` conflict if the
    /// name is already indexed (this closes the check-then-insert race).
    ///
    /// Update otherwise: compare-and-swap against the stored record's
    /// `lock_version` (expected = `session.lock_version`), failing with a
    /// `StaleVersion` conflict on mismatch; on success assigns ids to new
    /// members, bumps `lock_version`, and refreshes `updated_at`. The name
    /// is fixed at creation: a record whose name differs from the stored
    /// one is rejected as a validation error, keeping the name index in
    /// step with the records it points at.
    ///
    /// Returns the persisted form.
    async fn save(&self, session: Session) -> Result<Session, DomainError>;

    /// Version-checked delete. Removing an absent id is a no-op; a
    /// present record with a different `lock_version` is a `StaleVersion`
    /// conflict. The inline roster vanishes with the record.
    async fn delete(&self, id: SessionId, expected_version: i32) -> Result<(), DomainError>;
}
