//! Error types for the store layer.

use boardsignal_protocol::{RoomId, UserId};

/// Errors raised by a [`Store`](crate::Store) or one of its transactions.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// A write was attempted through a read-only transaction.
    #[error("transaction is read-only")]
    ReadOnly,

    /// The referenced room has no record.
    #[error("room {0} not found in store")]
    RoomNotFound(RoomId),

    /// A participant row for this (user, room) pair already exists.
    #[error("participant {0} already exists in room {1}")]
    DuplicateParticipant(UserId, RoomId),

    /// No participant row exists for this (user, room) pair.
    #[error("participant {0} not found in room {1}")]
    ParticipantNotFound(UserId, RoomId),

    /// The backing store failed for a reason of its own.
    #[error("store backend failure: {0}")]
    Backend(String),
}

/// Errors raised by an [`ImageStore`](crate::ImageStore).
#[derive(Debug, thiserror::Error)]
pub enum ImageError {
    /// The upload was refused (empty, wrong type, too large).
    #[error("image rejected: {0}")]
    Rejected(String),

    /// The image backend could not be reached.
    #[error("image store unavailable: {0}")]
    Unavailable(String),
}
