//! Requests the room engine accepts and the responses it returns.
//!
//! These are plain data. The engine builds the responses; the transport
//! layer (not part of this workspace) decides how they are encoded.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::{DaySlot, ProtocolError, RoomId, RoomStatus, TimeSlot, UserId};

// ---------------------------------------------------------------------------
// Requests
// ---------------------------------------------------------------------------

/// Raw image bytes uploaded alongside a new room.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageUpload {
    pub file_name: String,
    pub content_type: Option<String>,
    pub bytes: Vec<u8>,
}

/// Everything needed to open a new meetup room.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateRoomRequest {
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub subway_station: String,
    pub place_name: String,
    pub day_slot: DaySlot,
    pub time_slot: TimeSlot,
    /// Maximum participants, the creator included.
    pub capacity: u32,
    #[serde(default)]
    pub image: Option<ImageUpload>,
}

impl CreateRoomRequest {
    pub fn validate(&self) -> Result<(), ProtocolError> {
        require_text("title", &self.title)?;
        require_text("subway_station", &self.subway_station)?;
        require_text("place_name", &self.place_name)?;
        if self.capacity == 0 {
            return Err(ProtocolError::InvalidRequest(
                "capacity must be at least 1".into(),
            ));
        }
        Ok(())
    }
}

/// The leader's commitment to an exact meeting time and place.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FixRoomRequest {
    pub meeting_time: NaiveDateTime,
    pub station: String,
    pub meeting_place: String,
}

impl FixRoomRequest {
    pub fn validate(&self) -> Result<(), ProtocolError> {
        require_text("station", &self.station)?;
        require_text("meeting_place", &self.meeting_place)
    }
}

fn require_text(field: &str, value: &str) -> Result<(), ProtocolError> {
    if value.trim().is_empty() {
        return Err(ProtocolError::InvalidRequest(format!(
            "{field} must not be blank"
        )));
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Responses
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateRoomResponse {
    pub room_id: RoomId,
    pub title: String,
    pub image_url: Option<String>,
    pub status: RoomStatus,
}

/// Result of joining a room.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParticipantRoomResponse {
    pub room_id: RoomId,
    pub participant_count: usize,
}

/// Result of leaving a room.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExitRoomResponse {
    pub room_id: RoomId,
    pub participant_count: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FixRoomResponse {
    pub room_id: RoomId,
    /// Formatted as `yyyy-MM-dd HH:mm`.
    pub meeting_time: String,
    pub station: String,
    pub meeting_place: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParticipantResponse {
    pub user_id: UserId,
    pub is_leader: bool,
}

/// Detailed view of one room.
///
/// `time` and `place` are display strings: the descriptive slots and the
/// proposed place while the room is open, the committed meeting time and
/// place once it is fixed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoomInfoResponse {
    pub room_id: RoomId,
    pub title: String,
    pub description: String,
    pub image_url: Option<String>,
    pub status: RoomStatus,
    pub time: String,
    pub place: String,
    pub capacity: u32,
    pub participant_count: usize,
    /// Whether the viewer leads this room. Always `false` for anonymous
    /// and non-member viewers.
    pub is_leader: bool,
    pub participants: Vec<ParticipantResponse>,
}

/// One row of a room listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoomSummary {
    pub room_id: RoomId,
    pub title: String,
    pub subway_station: String,
    pub place_name: String,
    pub day_slot: String,
    pub time_slot: String,
    pub status: RoomStatus,
    pub capacity: u32,
    pub participant_count: usize,
    pub image_url: Option<String>,
    /// Present only for fixed rooms, formatted as `yyyy-MM-dd HH:mm`.
    pub meeting_time: Option<String>,
}

/// Everyone who took part in a room, for post-meetup reviews.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EndGameUsersResponse {
    pub room_id: RoomId,
    pub participants: Vec<ParticipantResponse>,
}
