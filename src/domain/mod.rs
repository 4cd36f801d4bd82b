//! Domain layer: pure session lifecycle types and the membership rules.

pub mod session;

#[cfg(test)]
mod tests_props_session;
#[cfg(test)]
mod tests_session;

pub use session::{AdmissionBlock, Member, MemberId, Phase, Session, SessionId};
