//! Durable records: rooms, their meeting info, and participants.

use boardsignal_protocol::{DaySlot, RoomId, RoomStatus, TimeSlot, UserId};
use chrono::{NaiveDate, NaiveDateTime};

// ---------------------------------------------------------------------------
// MeetingInfo
// ---------------------------------------------------------------------------

/// The exact time and place a leader committed to.
///
/// Immutable once built. A re-fix replaces it wholesale and an unfix
/// clears it wholesale.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MeetingInfo {
    meeting_time: NaiveDateTime,
    station: String,
    meeting_place: String,
}

impl MeetingInfo {
    pub fn new(
        meeting_time: NaiveDateTime,
        station: impl Into<String>,
        meeting_place: impl Into<String>,
    ) -> Self {
        Self {
            meeting_time,
            station: station.into(),
            meeting_place: meeting_place.into(),
        }
    }

    pub fn meeting_time(&self) -> NaiveDateTime {
        self.meeting_time
    }

    pub fn station(&self) -> &str {
        &self.station
    }

    pub fn meeting_place(&self) -> &str {
        &self.meeting_place
    }
}

// ---------------------------------------------------------------------------
// Room
// ---------------------------------------------------------------------------

/// A room that has not been saved yet and therefore has no id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoomDraft {
    pub title: String,
    pub description: String,
    pub subway_station: String,
    pub place_name: String,
    pub day_slot: DaySlot,
    pub time_slot: TimeSlot,
    pub capacity: u32,
    pub image_url: Option<String>,
    pub created_at: NaiveDateTime,
}

impl RoomDraft {
    /// Turns the draft into an open room under the id the store assigned.
    pub fn into_room(self, id: RoomId) -> Room {
        Room {
            id,
            title: self.title,
            description: self.description,
            subway_station: self.subway_station,
            place_name: self.place_name,
            day_slot: self.day_slot,
            time_slot: self.time_slot,
            capacity: self.capacity,
            image_url: self.image_url,
            status: RoomStatus::Open,
            meeting_info: None,
            created_at: self.created_at,
        }
    }
}

/// A meetup proposal.
///
/// `status` and `meeting_info` are only changed together through
/// [`fix`](Self::fix) and [`unfix`](Self::unfix), so a room is `Fix`
/// exactly when it carries meeting info.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Room {
    id: RoomId,
    title: String,
    description: String,
    subway_station: String,
    place_name: String,
    day_slot: DaySlot,
    time_slot: TimeSlot,
    capacity: u32,
    image_url: Option<String>,
    status: RoomStatus,
    meeting_info: Option<MeetingInfo>,
    created_at: NaiveDateTime,
}

impl Room {
    pub fn id(&self) -> RoomId {
        self.id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn subway_station(&self) -> &str {
        &self.subway_station
    }

    pub fn place_name(&self) -> &str {
        &self.place_name
    }

    pub fn day_slot(&self) -> DaySlot {
        self.day_slot
    }

    pub fn time_slot(&self) -> TimeSlot {
        self.time_slot
    }

    pub fn capacity(&self) -> u32 {
        self.capacity
    }

    pub fn image_url(&self) -> Option<&str> {
        self.image_url.as_deref()
    }

    pub fn status(&self) -> RoomStatus {
        self.status
    }

    pub fn meeting_info(&self) -> Option<&MeetingInfo> {
        self.meeting_info.as_ref()
    }

    pub fn created_at(&self) -> NaiveDateTime {
        self.created_at
    }

    /// Commits the room to `info`. Fixing a fixed room replaces its info.
    pub fn fix(&mut self, info: MeetingInfo) {
        self.status = RoomStatus::Fix;
        self.meeting_info = Some(info);
    }

    /// Reverts the room to open and returns the info it carried, if any.
    pub fn unfix(&mut self) -> Option<MeetingInfo> {
        self.status = RoomStatus::Open;
        self.meeting_info.take()
    }

    /// Returns `true` if the room is fixed and its meeting date lies
    /// strictly before `today`. Time of day is ignored.
    pub fn is_ended(&self, today: NaiveDate) -> bool {
        match (&self.status, &self.meeting_info) {
            (RoomStatus::Fix, Some(info)) => info.meeting_time.date() < today,
            _ => false,
        }
    }
}

// ---------------------------------------------------------------------------
// Participant
// ---------------------------------------------------------------------------

/// Membership of one user in one room.
///
/// Holds both sides by id only. A store keeps at most one row per
/// (room, user) pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Participant {
    pub user_id: UserId,
    pub room_id: RoomId,
    pub is_leader: bool,
}

impl Participant {
    /// The row created for a room's creator.
    pub fn leader(user_id: UserId, room_id: RoomId) -> Self {
        Self {
            user_id,
            room_id,
            is_leader: true,
        }
    }

    /// The row created when someone joins an existing room.
    pub fn member(user_id: UserId, room_id: RoomId) -> Self {
        Self {
            user_id,
            room_id,
            is_leader: false,
        }
    }
}
