//! Session lifecycle facade: create, query, start, delete.
//!
//! Facade methods are thin: resolve the session, delegate the rule checks
//! to the domain type, persist through the store with optimistic locking,
//! and translate `DomainError` into the caller-facing `AppError`.

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::domain::{Phase, Session, SessionId};
use crate::error::AppError;
use crate::errors::ErrorCode;
use crate::repos::sessions::{self as sessions_repo, SessionCreate};
use crate::store::SessionStore;

/// Roster-stripped view of a session, used by name search so results do
/// not expand into nested member listings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionSummary {
    pub id: SessionId,
    pub name: String,
    pub min_players: u32,
    pub max_players: u32,
    pub owner: String,
    pub phase: Phase,
    pub roster_len: usize,
}

impl From<&Session> for SessionSummary {
    fn from(session: &Session) -> Self {
        Self {
            id: session.id,
            name: session.name.clone(),
            min_players: session.min_players,
            max_players: session.max_players,
            owner: session.owner.clone(),
            phase: session.phase,
            roster_len: session.roster.len(),
        }
    }
}

/// Session domain service.
pub struct SessionService;

impl SessionService {
    pub fn new() -> Self {
        Self
    }

    /// Create a session with an open signup window and an empty roster.
    ///
    /// The name lookup here is a point-in-time check for a clean error;
    /// the store's name index enforces uniqueness atomically, so two
    /// concurrent creates of the same name still yield exactly one winner.
    pub async fn create_session(
        &self,
        store: &dyn SessionStore,
        name: &str,
        min_players: u32,
        max_players: u32,
        owner: &str,
    ) -> Result<Session, AppError> {
        if sessions_repo::find_by_name(store, name).await?.is_some() {
            return Err(AppError::conflict(
                ErrorCode::NameTaken,
                format!("a session named '{name}' already exists"),
            ));
        }

        let dto = SessionCreate::new(name, min_players, max_players, owner);
        let session = sessions_repo::create_session(store, dto).await?;
        info!(
            session_id = session.id,
            name, owner, min_players, max_players, "session created"
        );
        Ok(session)
    }

    pub async fn get_session(
        &self,
        store: &dyn SessionStore,
        id: SessionId,
    ) -> Result<Session, AppError> {
        Ok(sessions_repo::require_session(store, id).await?)
    }

    /// Sessions currently open for signup.
    pub async fn list_open_sessions(
        &self,
        store: &dyn SessionStore,
    ) -> Result<Vec<Session>, AppError> {
        Ok(sessions_repo::list_open(store).await?)
    }

    /// Exact-match name search, roster stripped from the results.
    pub async fn search_sessions_by_name(
        &self,
        store: &dyn SessionStore,
        name: &str,
    ) -> Result<Vec<SessionSummary>, AppError> {
        let found = sessions_repo::find_by_name(store, name).await?;
        Ok(found.iter().map(SessionSummary::from).collect())
    }

    /// Transition a session from Signup to Active.
    ///
    /// Owner-only; requires the roster to meet `min_players`. Persisted
    /// with the lock version captured at load, so a concurrent roster
    /// change surfaces as a stale-version conflict instead of starting an
    /// inconsistent session.
    pub async fn start_session(
        &self,
        store: &dyn SessionStore,
        id: SessionId,
        caller: &str,
    ) -> Result<(), AppError> {
        let mut session = sessions_repo::require_session(store, id).await?;
        session.start(caller)?;
        let session = sessions_repo::update_session(store, session).await?;
        info!(session_id = session.id, caller, "session started");
        Ok(())
    }

    /// Destroy a session and, with it, every current member.
    ///
    /// Owner-only and Signup-only. The roster lives inline in the record,
    /// so removing the record destroys the members rather than orphaning
    /// them.
    pub async fn delete_session(
        &self,
        store: &dyn SessionStore,
        id: SessionId,
        caller: &str,
    ) -> Result<(), AppError> {
        let session = sessions_repo::require_session(store, id).await?;
        session.ensure_deletable_by(caller)?;
        let members_destroyed = session.roster.len();
        sessions_repo::delete_session(store, id, session.lock_version).await?;
        info!(
            session_id = id,
            caller, members_destroyed, "session deleted"
        );
        debug!(session_id = id, "roster destroyed with session record");
        Ok(())
    }
}

impl Default for SessionService {
    fn default() -> Self {
        Self::new()
    }
}
