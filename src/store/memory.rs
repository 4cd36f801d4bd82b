//! Process-local session store.
//!
//! A single mutex guards the id map and the name index together, so the
//! uniqueness check and the insert are one atomic step. Lock scopes never
//! cross an await point.

use std::collections::HashMap;

use async_trait::async_trait;
use parking_lot::Mutex;
use time::OffsetDateTime;

use crate::domain::{Session, SessionId};
use crate::errors::domain::{ConflictKind, DomainError};
use crate::store::SessionStore;

#[derive(Default)]
struct StoreInner {
    sessions: HashMap<SessionId, Session>,
    /// name -> session id; insertions and deletions mirror `sessions`.
    names: HashMap<String, SessionId>,
    next_session_id: i64,
    next_member_id: i64,
}

/// In-memory `SessionStore` implementation.
#[derive(Default)]
pub struct MemStore {
    inner: Mutex<StoreInner>,
}

impl MemStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl StoreInner {
    fn assign_member_ids(&mut self, session: &mut Session) {
        for member in &mut session.roster {
            if member.id == 0 {
                self.next_member_id += 1;
                member.id = self.next_member_id;
            }
            member.session_id = session.id;
        }
    }
}

#[async_trait]
impl SessionStore for MemStore {
    async fn find_by_id(&self, id: SessionId) -> Result<Option<Session>, DomainError> {
        Ok(self.inner.lock().sessions.get(&id).cloned())
    }

    async fn find_by_name(&self, name: &str) -> Result<Option<Session>, DomainError> {
        let inner = self.inner.lock();
        Ok(inner
            .names
            .get(name)
            .and_then(|id| inner.sessions.get(id))
            .cloned())
    }

    async fn list_all(&self) -> Result<Vec<Session>, DomainError> {
        Ok(self.inner.lock().sessions.values().cloned().collect())
    }

    async fn save(&self, mut session: Session) -> Result<Session, DomainError> {
        let mut inner = self.inner.lock();
        let now = OffsetDateTime::now_utc();

        if session.id == 0 {
            if inner.names.contains_key(&session.name) {
                return Err(DomainError::conflict(
                    ConflictKind::NameTaken,
                    format!("a session named '{}' already exists", session.name),
                ));
            }
            inner.next_session_id += 1;
            session.id = inner.next_session_id;
            session.lock_version = 1;
            session.created_at = now;
            session.updated_at = now;
            inner.assign_member_ids(&mut session);
            inner.names.insert(session.name.clone(), session.id);
            inner.sessions.insert(session.id, session.clone());
            return Ok(session);
        }

        let (stored_version, stored_name) = match inner.sessions.get(&session.id) {
            Some(stored) => (stored.lock_version, stored.name.clone()),
            None => {
                return Err(DomainError::not_found(
                    crate::errors::domain::NotFoundKind::Session,
                    format!("session {} is not persisted", session.id),
                ))
            }
        };
        // Names are fixed at creation and carry the uniqueness index; a
        // record arriving with a different name is caller misuse, not an
        // update.
        if stored_name != session.name {
            return Err(DomainError::validation(format!(
                "session {} name is immutable (stored '{}', got '{}')",
                session.id, stored_name, session.name
            )));
        }
        if stored_version != session.lock_version {
            return Err(DomainError::conflict(
                ConflictKind::StaleVersion,
                format!(
                    "session {} lock version mismatch: expected {}, stored {}",
                    session.id, session.lock_version, stored_version
                ),
            ));
        }

        session.lock_version += 1;
        session.updated_at = now;
        inner.assign_member_ids(&mut session);
        inner.sessions.insert(session.id, session.clone());
        Ok(session)
    }

    async fn delete(&self, id: SessionId, expected_version: i32) -> Result<(), DomainError> {
        let mut inner = self.inner.lock();
        let Some(stored) = inner.sessions.get(&id) else {
            // Absent id: deletion is idempotent at the store level.
            return Ok(());
        };
        if stored.lock_version != expected_version {
            return Err(DomainError::conflict(
                ConflictKind::StaleVersion,
                format!(
                    "session {id} lock version mismatch: expected {expected_version}, stored {}",
                    stored.lock_version
                ),
            ));
        }
        let name = stored.name.clone();
        inner.sessions.remove(&id);
        inner.names.remove(&name);
        Ok(())
    }
}
