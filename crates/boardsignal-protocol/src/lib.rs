//! Shared vocabulary for BoardSignal.
//!
//! This crate defines the types every other layer speaks:
//!
//! - **Types** ([`UserId`], [`RoomId`], [`RoomStatus`], [`PageRequest`],
//!   [`RoomPage`]): identities, status and paging.
//! - **DTOs** ([`CreateRoomRequest`], [`RoomInfoResponse`], ...): what the
//!   room engine accepts and returns.
//! - **Search** ([`RoomSearchCondition`]): the listing filter.
//! - **Errors** ([`ProtocolError`]): request validation failures.
//!
//! ```text
//! Protocol (types) → Store (records, collaborators) → Room (engine)
//! ```

mod dto;
mod error;
mod search;
mod types;

pub use dto::{
    CreateRoomRequest, CreateRoomResponse, EndGameUsersResponse, ExitRoomResponse,
    FixRoomRequest, FixRoomResponse, ImageUpload, ParticipantResponse,
    ParticipantRoomResponse, RoomInfoResponse, RoomSummary,
};
pub use error::ProtocolError;
pub use search::RoomSearchCondition;
pub use types::{
    DaySlot, MEETING_TIME_FORMAT, PageRequest, RoomId, RoomPage, RoomStatus, TimeSlot, UserId,
    format_meeting_time,
};
