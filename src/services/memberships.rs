//! Membership coordination: the join/leave protocol against one session.
//!
//! Read-modify-write sequences load the session, mutate the in-memory
//! copy through the domain rules, and save with the lock version captured
//! at load. Two concurrent admits therefore cannot both pass the capacity
//! check and commit; the loser gets a stale-version conflict and nothing
//! is persisted for it.

use tracing::{debug, info};

use crate::domain::{Member, SessionId};
use crate::error::AppError;
use crate::repos::sessions as sessions_repo;
use crate::store::SessionStore;

/// Membership domain service.
pub struct MembershipService;

impl MembershipService {
    pub fn new() -> Self {
        Self
    }

    /// Admit `identity` into the session's roster.
    ///
    /// Idempotent: an existing membership is returned unchanged. Otherwise
    /// the admission predicate decides, and a fully constructed member is
    /// appended and persisted in one version-checked save, so no observer
    /// can see a half-linked member.
    pub async fn admit(
        &self,
        store: &dyn SessionStore,
        session_id: SessionId,
        identity: &str,
        display_name: &str,
    ) -> Result<Member, AppError> {
        let mut session = sessions_repo::require_session(store, session_id).await?;

        if let Some(existing) = session.member(identity) {
            debug!(
                session_id,
                identity,
                member_id = existing.id,
                "admit is idempotent; returning existing membership"
            );
            return Ok(existing.clone());
        }

        if let Some(block) = session.admission_block(identity) {
            return Err(block.into_conflict(&session).into());
        }

        session.admit(Member {
            id: 0,
            session_id,
            user: identity.to_string(),
            display_name: display_name.to_string(),
        })?;

        let persisted = sessions_repo::update_session(store, session).await?;
        let member = persisted
            .member(identity)
            .cloned()
            .ok_or_else(|| AppError::internal("admitted member missing from persisted roster"))?;

        info!(
            session_id,
            identity,
            member_id = member.id,
            roster_len = persisted.roster.len(),
            "member admitted"
        );
        Ok(member)
    }

    /// Remove `identity`'s membership, destroying the roster entry.
    pub async fn withdraw(
        &self,
        store: &dyn SessionStore,
        session_id: SessionId,
        identity: &str,
    ) -> Result<(), AppError> {
        let mut session = sessions_repo::require_session(store, session_id).await?;
        let removed = session.withdraw(identity)?;
        let persisted = sessions_repo::update_session(store, session).await?;
        info!(
            session_id,
            identity,
            member_id = removed.id,
            roster_len = persisted.roster.len(),
            "member withdrew"
        );
        Ok(())
    }

    /// Pre-flight check used before exposing a join affordance.
    ///
    /// Shares the admission predicate with `admit`; an already-admitted
    /// identity reports `false` (joining again would be a no-op).
    pub async fn can_admit(
        &self,
        store: &dyn SessionStore,
        session_id: SessionId,
        identity: &str,
    ) -> Result<bool, AppError> {
        let session = sessions_repo::require_session(store, session_id).await?;
        Ok(session.can_admit(identity))
    }

    pub async fn is_owner(
        &self,
        store: &dyn SessionStore,
        session_id: SessionId,
        identity: &str,
    ) -> Result<bool, AppError> {
        let session = sessions_repo::require_session(store, session_id).await?;
        Ok(session.is_owned_by(identity))
    }

    /// Every member across all sessions, in session/join order.
    pub async fn list_all_members(&self, store: &dyn SessionStore) -> Result<Vec<Member>, AppError> {
        let sessions = sessions_repo::list_all(store).await?;
        Ok(sessions.into_iter().flat_map(|s| s.roster).collect())
    }

    /// Members matching a display name, across all sessions.
    pub async fn search_members(
        &self,
        store: &dyn SessionStore,
        display_name: &str,
    ) -> Result<Vec<Member>, AppError> {
        let members = self.list_all_members(store).await?;
        Ok(members
            .into_iter()
            .filter(|m| m.display_name == display_name)
            .collect())
    }

    /// All memberships held by one identity, across sessions.
    pub async fn memberships_for_user(
        &self,
        store: &dyn SessionStore,
        identity: &str,
    ) -> Result<Vec<Member>, AppError> {
        let members = self.list_all_members(store).await?;
        Ok(members.into_iter().filter(|m| m.user == identity).collect())
    }
}

impl Default for MembershipService {
    fn default() -> Self {
        Self::new()
    }
}
