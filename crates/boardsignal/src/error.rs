//! Unified error type for BoardSignal.

use boardsignal_protocol::ProtocolError;
use boardsignal_room::{ErrorKind, RoomError};
use boardsignal_store::{ImageError, StoreError};

/// Top-level error wrapping every crate-specific error.
///
/// Callers of the `boardsignal` crate handle this one type; the `#[from]`
/// variants let `?` convert sub-crate errors.
#[derive(Debug, thiserror::Error)]
pub enum BoardSignalError {
    /// A request that failed validation before reaching the engine.
    #[error(transparent)]
    Protocol(#[from] ProtocolError),

    /// A storage failure outside of a room operation.
    #[error(transparent)]
    Store(#[from] StoreError),

    /// An image upload failure outside of a room operation.
    #[error(transparent)]
    Image(#[from] ImageError),

    /// A room operation failed.
    #[error(transparent)]
    Room(#[from] RoomError),

    /// The configuration document could not be parsed.
    #[error("invalid configuration: {0}")]
    Config(#[from] serde_json::Error),

    /// The tracing subscriber could not be installed.
    #[error("telemetry: {0}")]
    Telemetry(String),
}

impl BoardSignalError {
    /// Coarse classification, for mapping onto a transport status.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Room(err) => err.kind(),
            Self::Protocol(_) | Self::Config(_) => ErrorKind::Validation,
            Self::Store(StoreError::RoomNotFound(_) | StoreError::ParticipantNotFound(..)) => {
                ErrorKind::NotFound
            }
            Self::Store(StoreError::DuplicateParticipant(..)) => ErrorKind::Conflict,
            Self::Image(ImageError::Rejected(_)) => ErrorKind::Validation,
            Self::Store(_) | Self::Image(_) | Self::Telemetry(_) => ErrorKind::Internal,
        }
    }
}
