use std::sync::Arc;

use crate::store::{MemStore, SessionStore};

/// Application state containing shared resources
#[derive(Clone)]
pub struct AppState {
    /// Session store shared by all services
    pub store: Arc<dyn SessionStore>,
}

impl AppState {
    /// Create a new AppState over the given store
    pub fn new(store: Arc<dyn SessionStore>) -> Self {
        Self { store }
    }

    /// Create an AppState backed by a fresh in-memory store (tests,
    /// embedding without durable persistence)
    pub fn in_memory() -> Self {
        Self::new(Arc::new(MemStore::new()))
    }
}
