//! Error types for the protocol layer.
//!
//! These are raised by the validation helpers on requests, search
//! conditions and page requests, before anything touches a store.

/// A request that is well-formed JSON but breaks a protocol rule.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ProtocolError {
    /// The page request asks for an empty or oversized page.
    #[error("invalid page request: {0}")]
    InvalidPage(String),

    /// The search condition is self-contradictory (e.g. min > max).
    #[error("invalid search condition: {0}")]
    InvalidCondition(String),

    /// A required field is blank or out of range.
    #[error("invalid request: {0}")]
    InvalidRequest(String),
}
