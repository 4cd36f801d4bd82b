#![deny(clippy::wildcard_imports)]
#![cfg_attr(test, allow(clippy::wildcard_imports))]

pub mod domain;
pub mod error;
pub mod errors;
pub mod logging;
pub mod repos;
pub mod services;
pub mod state;
pub mod store;

// Re-exports for public API
pub use domain::{AdmissionBlock, Member, MemberId, Phase, Session, SessionId};
pub use error::AppError;
pub use errors::ErrorCode;
pub use services::memberships::MembershipService;
pub use services::sessions::{SessionService, SessionSummary};
pub use state::AppState;
pub use store::{MemStore, SessionStore};

// Auto-initialize logging for unit tests
#[cfg(test)]
#[ctor::ctor]
fn init_test_logging() {
    logging::init();
}
