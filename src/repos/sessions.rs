//! Session repository functions for the service layer.

use time::OffsetDateTime;

use crate::domain::{Phase, Session, SessionId};
use crate::errors::domain::{DomainError, NotFoundKind};
use crate::store::SessionStore;

/// Creation payload for a session record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionCreate {
    pub name: String,
    pub min_players: u32,
    pub max_players: u32,
    pub owner: String,
    pub phase: Phase,
}

impl SessionCreate {
    /// Payload for a session whose signup window opens immediately.
    pub fn new(
        name: impl Into<String>,
        min_players: u32,
        max_players: u32,
        owner: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            min_players,
            max_players,
            owner: owner.into(),
            phase: Phase::Signup,
        }
    }

    /// Payload for a staged session; signup opens administratively later.
    pub fn staged(mut self) -> Self {
        self.phase = Phase::Initial;
        self
    }
}

pub async fn find_by_id(
    store: &dyn SessionStore,
    id: SessionId,
) -> Result<Option<Session>, DomainError> {
    store.find_by_id(id).await
}

pub async fn find_by_name(
    store: &dyn SessionStore,
    name: &str,
) -> Result<Option<Session>, DomainError> {
    store.find_by_name(name).await
}

/// Find session by id or return an error if not found.
///
/// Convenience helper that converts `None` into a DomainError,
/// eliminating the repetitive `ok_or_else` pattern when a session must
/// exist.
pub async fn require_session(
    store: &dyn SessionStore,
    id: SessionId,
) -> Result<Session, DomainError> {
    find_by_id(store, id).await?.ok_or_else(|| {
        DomainError::not_found(NotFoundKind::Session, format!("session {id} not found"))
    })
}

pub async fn create_session(
    store: &dyn SessionStore,
    dto: SessionCreate,
) -> Result<Session, DomainError> {
    let now = OffsetDateTime::now_utc();
    let session = Session {
        id: 0,
        name: dto.name,
        min_players: dto.min_players,
        max_players: dto.max_players,
        owner: dto.owner,
        phase: dto.phase,
        roster: Vec::new(),
        lock_version: 0,
        created_at: now,
        updated_at: now,
    };
    store.save(session).await
}

/// Persist a mutated session with optimistic locking.
///
/// `session.lock_version` must still carry the value it was loaded with;
/// if anyone else committed in between, the store rejects the save with a
/// stale-version conflict and nothing is persisted.
pub async fn update_session(
    store: &dyn SessionStore,
    session: Session,
) -> Result<Session, DomainError> {
    store.save(session).await
}

/// Delete session with optimistic locking.
pub async fn delete_session(
    store: &dyn SessionStore,
    id: SessionId,
    expected_version: i32,
) -> Result<(), DomainError> {
    store.delete(id, expected_version).await
}

/// Sessions whose signup window is open.
pub async fn list_open(store: &dyn SessionStore) -> Result<Vec<Session>, DomainError> {
    let mut sessions: Vec<Session> = store
        .list_all()
        .await?
        .into_iter()
        .filter(Session::is_open_for_signup)
        .collect();
    sessions.sort_by_key(|s| s.id);
    Ok(sessions)
}

pub async fn list_all(store: &dyn SessionStore) -> Result<Vec<Session>, DomainError> {
    let mut sessions = store.list_all().await?;
    sessions.sort_by_key(|s| s.id);
    Ok(sessions)
}
