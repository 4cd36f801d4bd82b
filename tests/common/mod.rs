#![allow(dead_code)] // Not every test file uses every helper.

use lobby_core::{AppState, Session, SessionService, SessionStore};

pub fn test_state() -> AppState {
    lobby_core::logging::init();
    AppState::in_memory()
}

pub fn store(state: &AppState) -> &dyn SessionStore {
    state.store.as_ref()
}

/// Create a signup-phase session owned by `owner`.
pub async fn create_session(
    state: &AppState,
    name: &str,
    min_players: u32,
    max_players: u32,
    owner: &str,
) -> Session {
    SessionService::new()
        .create_session(store(state), name, min_players, max_players, owner)
        .await
        .expect("create test session")
}
