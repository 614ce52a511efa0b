//! Error types for the room layer.

use boardsignal_protocol::{ProtocolError, RoomId, UserId};
use boardsignal_store::{ImageError, StoreError};

/// Coarse category of a [`RoomError`], for callers that map failures
/// onto status codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    NotFound,
    Forbidden,
    Conflict,
    CapacityExceeded,
    Validation,
    Internal,
}

/// Errors that can occur during room operations.
#[derive(Debug, thiserror::Error)]
pub enum RoomError {
    /// The room does not exist.
    #[error("room {0} not found")]
    NotFound(RoomId),

    /// The user has no participant row in this room.
    #[error("user {0} is not a participant of room {1}")]
    ParticipantNotFound(UserId, RoomId),

    /// A leader-only action was attempted by someone else.
    #[error("user {0} is not the leader of room {1}")]
    Forbidden(UserId, RoomId),

    /// The user already participates in this room.
    #[error("user {0} already participates in room {1}")]
    AlreadyParticipating(UserId, RoomId),

    /// The room is fixed, so its participants are locked in.
    #[error("room {0} is fixed; participants are locked in")]
    RoomFixed(RoomId),

    /// Unfix was requested on a room that is not fixed.
    #[error("room {0} is not fixed")]
    NotFixed(RoomId),

    /// The room has no free participant slot.
    #[error("room {0} is full")]
    CapacityExceeded(RoomId),

    /// The request, page or search condition is malformed.
    #[error("validation failed: {0}")]
    Validation(String),

    /// The image collaborator failed.
    #[error(transparent)]
    Image(#[from] ImageError),

    /// The store failed.
    #[error(transparent)]
    Store(#[from] StoreError),
}

impl RoomError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::NotFound(_) | Self::ParticipantNotFound(..) => ErrorKind::NotFound,
            Self::Forbidden(..) => ErrorKind::Forbidden,
            Self::AlreadyParticipating(..) | Self::RoomFixed(_) | Self::NotFixed(_) => {
                ErrorKind::Conflict
            }
            Self::CapacityExceeded(_) => ErrorKind::CapacityExceeded,
            Self::Validation(_) | Self::Image(ImageError::Rejected(_)) => ErrorKind::Validation,
            Self::Image(_) | Self::Store(_) => ErrorKind::Internal,
        }
    }
}

impl From<ProtocolError> for RoomError {
    fn from(err: ProtocolError) -> Self {
        Self::Validation(err.to_string())
    }
}
