//! Core value types shared by every BoardSignal layer.
//!
//! Identity newtypes, the descriptive day/time slots a room is created
//! with, the room status enum, and the page request/response pair used by
//! the listing queries.

use std::fmt;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::ProtocolError;

/// Display pattern for a confirmed meeting time (`yyyy-MM-dd HH:mm`).
pub const MEETING_TIME_FORMAT: &str = "%Y-%m-%d %H:%M";

/// Formats a confirmed meeting time the way room views display it.
pub fn format_meeting_time(time: &NaiveDateTime) -> String {
    time.format(MEETING_TIME_FORMAT).to_string()
}

// ---------------------------------------------------------------------------
// Identity types
// ---------------------------------------------------------------------------

/// A unique identifier for a user.
///
/// Users are owned by the authentication layer; rooms and participants
/// only ever hold this id, never the user record itself.
///
/// `#[serde(transparent)]` keeps it a plain number in JSON.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(pub u64);

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "U-{}", self.0)
    }
}

/// A unique identifier for a meetup room.
///
/// Assigned by the room store the first time a room is saved.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RoomId(pub u64);

impl fmt::Display for RoomId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "R-{}", self.0)
    }
}

// ---------------------------------------------------------------------------
// Slots
// ---------------------------------------------------------------------------

/// Which part of the week a meetup is proposed for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DaySlot {
    Weekday,
    Weekend,
}

impl DaySlot {
    /// Human-readable text shown while the room is still open.
    pub fn description(self) -> &'static str {
        match self {
            Self::Weekday => "Weekday",
            Self::Weekend => "Weekend",
        }
    }
}

/// Which part of the day a meetup is proposed for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TimeSlot {
    Morning,
    Afternoon,
    Evening,
}

impl TimeSlot {
    /// Human-readable text shown while the room is still open.
    pub fn description(self) -> &'static str {
        match self {
            Self::Morning => "Morning",
            Self::Afternoon => "Afternoon",
            Self::Evening => "Evening",
        }
    }
}

// ---------------------------------------------------------------------------
// RoomStatus
// ---------------------------------------------------------------------------

/// The stored lifecycle status of a room.
///
/// ```text
/// Open ──fix──→ Fix ──unfix──→ Open
///                │ ↺ fix (correction)
/// ```
///
/// - **Open**: accepting participants, time and place are only intent.
/// - **Fix**: the leader committed an exact meeting time and place;
///   participants are locked in.
///
/// "Ended" is not a status. It is derived from the meeting time and the
/// current date whenever it is needed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RoomStatus {
    Open,
    Fix,
}

impl RoomStatus {
    /// Returns `true` if members may still join or leave.
    pub fn is_open(self) -> bool {
        matches!(self, Self::Open)
    }

    /// Returns `true` if a meeting time and place are committed.
    pub fn is_fixed(self) -> bool {
        matches!(self, Self::Fix)
    }

    /// Returns `true` if moving to `target` is a legal transition.
    ///
    /// Re-fixing a fixed room is legal (it replaces the meeting info);
    /// unfixing an open room is not.
    pub fn can_transition_to(self, target: Self) -> bool {
        matches!(
            (self, target),
            (Self::Open, Self::Fix) | (Self::Fix, Self::Fix) | (Self::Fix, Self::Open)
        )
    }
}

impl fmt::Display for RoomStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Open => write!(f, "OPEN"),
            Self::Fix => write!(f, "FIX"),
        }
    }
}

// ---------------------------------------------------------------------------
// Pagination
// ---------------------------------------------------------------------------

/// A request for one page of results. `page` is zero-based.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageRequest {
    pub page: u32,
    pub size: u32,
}

impl PageRequest {
    /// Page size used when a caller does not ask for one.
    pub const DEFAULT_SIZE: u32 = 20;

    pub fn new(page: u32, size: u32) -> Self {
        Self { page, size }
    }

    /// The first page with the given size.
    pub fn first(size: u32) -> Self {
        Self { page: 0, size }
    }

    /// Number of items to skip before this page starts.
    pub fn offset(&self) -> usize {
        self.page as usize * self.size as usize
    }

    /// Rejects empty pages and sizes above `max_size`.
    pub fn validate(&self, max_size: u32) -> Result<(), ProtocolError> {
        if self.size == 0 {
            return Err(ProtocolError::InvalidPage("page size must be at least 1".into()));
        }
        if self.size > max_size {
            return Err(ProtocolError::InvalidPage(format!(
                "page size {} exceeds the maximum of {max_size}",
                self.size
            )));
        }
        Ok(())
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self::first(Self::DEFAULT_SIZE)
    }
}

/// A slice of results plus a flag telling whether another page exists.
///
/// There is no total count: the listing queries only know whether they
/// saw more rows than fit in the page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoomPage<T> {
    pub items: Vec<T>,
    pub page: u32,
    pub size: u32,
    pub has_next: bool,
}

impl<T> RoomPage<T> {
    pub fn new(items: Vec<T>, request: PageRequest, has_next: bool) -> Self {
        Self {
            items,
            page: request.page,
            size: request.size,
            has_next,
        }
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;

    #[test]
    fn test_user_id_serializes_as_plain_number() {
        let json = serde_json::to_string(&UserId(42)).unwrap();
        assert_eq!(json, "42");
    }

    #[test]
    fn test_ids_display() {
        assert_eq!(UserId(7).to_string(), "U-7");
        assert_eq!(RoomId(3).to_string(), "R-3");
    }

    #[test]
    fn test_slot_descriptions() {
        assert_eq!(DaySlot::Weekend.description(), "Weekend");
        assert_eq!(TimeSlot::Evening.description(), "Evening");
    }

    #[test]
    fn test_slot_serializes_as_screaming_snake_case() {
        let json = serde_json::to_string(&TimeSlot::Afternoon).unwrap();
        assert_eq!(json, "\"AFTERNOON\"");
        let slot: DaySlot = serde_json::from_str("\"WEEKDAY\"").unwrap();
        assert_eq!(slot, DaySlot::Weekday);
    }

    #[test]
    fn test_room_status_transitions() {
        assert!(RoomStatus::Open.can_transition_to(RoomStatus::Fix));
        assert!(RoomStatus::Fix.can_transition_to(RoomStatus::Fix));
        assert!(RoomStatus::Fix.can_transition_to(RoomStatus::Open));
        assert!(!RoomStatus::Open.can_transition_to(RoomStatus::Open));
    }

    #[test]
    fn test_room_status_display() {
        assert_eq!(RoomStatus::Open.to_string(), "OPEN");
        assert_eq!(RoomStatus::Fix.to_string(), "FIX");
    }

    #[test]
    fn test_format_meeting_time() {
        let time = NaiveDate::from_ymd_opt(2025, 3, 1)
            .unwrap()
            .and_hms_opt(18, 0, 0)
            .unwrap();
        assert_eq!(format_meeting_time(&time), "2025-03-01 18:00");
    }

    #[test]
    fn test_page_request_offset() {
        assert_eq!(PageRequest::new(0, 10).offset(), 0);
        assert_eq!(PageRequest::new(3, 10).offset(), 30);
    }

    #[test]
    fn test_page_request_validate() {
        assert!(PageRequest::first(5).validate(100).is_ok());
        assert!(PageRequest::first(0).validate(100).is_err());
        assert!(PageRequest::first(101).validate(100).is_err());
    }
}
