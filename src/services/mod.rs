//! Service layer: session lifecycle facade and membership coordination.

pub mod memberships;
pub mod sessions;

pub use memberships::MembershipService;
pub use sessions::{SessionService, SessionSummary};
