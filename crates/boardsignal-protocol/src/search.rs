//! Filter for the room search listing.

use serde::{Deserialize, Serialize};

use crate::{DaySlot, ProtocolError, RoomStatus, TimeSlot};

/// Equality and range predicates over room fields.
///
/// Every field is optional; an empty condition matches every room. The
/// condition is never stored, it only travels from the caller to the room
/// store's query.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RoomSearchCondition {
    /// Exact subway station name.
    pub subway_station: Option<String>,
    pub day_slot: Option<DaySlot>,
    pub time_slot: Option<TimeSlot>,
    pub status: Option<RoomStatus>,
    /// Inclusive lower bound on room capacity.
    pub min_capacity: Option<u32>,
    /// Inclusive upper bound on room capacity.
    pub max_capacity: Option<u32>,
    /// Case-insensitive substring of the title or place name.
    pub keyword: Option<String>,
}

impl RoomSearchCondition {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subway_station(mut self, station: impl Into<String>) -> Self {
        self.subway_station = Some(station.into());
        self
    }

    pub fn day_slot(mut self, slot: DaySlot) -> Self {
        self.day_slot = Some(slot);
        self
    }

    pub fn time_slot(mut self, slot: TimeSlot) -> Self {
        self.time_slot = Some(slot);
        self
    }

    pub fn status(mut self, status: RoomStatus) -> Self {
        self.status = Some(status);
        self
    }

    pub fn capacity_between(mut self, min: Option<u32>, max: Option<u32>) -> Self {
        self.min_capacity = min;
        self.max_capacity = max;
        self
    }

    pub fn keyword(mut self, keyword: impl Into<String>) -> Self {
        self.keyword = Some(keyword.into());
        self
    }

    /// Rejects an inverted capacity range and blank text predicates.
    pub fn validate(&self) -> Result<(), ProtocolError> {
        if let (Some(min), Some(max)) = (self.min_capacity, self.max_capacity) {
            if min > max {
                return Err(ProtocolError::InvalidCondition(format!(
                    "min_capacity {min} is greater than max_capacity {max}"
                )));
            }
        }
        if self.subway_station.as_deref().is_some_and(|s| s.trim().is_empty()) {
            return Err(ProtocolError::InvalidCondition(
                "subway_station must not be blank".into(),
            ));
        }
        if self.keyword.as_deref().is_some_and(|s| s.trim().is_empty()) {
            return Err(ProtocolError::InvalidCondition("keyword must not be blank".into()));
        }
        Ok(())
    }

    /// Checks a capacity against the range predicate.
    pub fn capacity_in_range(&self, capacity: u32) -> bool {
        self.min_capacity.is_none_or(|min| capacity >= min)
            && self.max_capacity.is_none_or(|max| capacity <= max)
    }

    /// Checks free text against the keyword predicate.
    pub fn keyword_matches(&self, texts: &[&str]) -> bool {
        match &self.keyword {
            None => true,
            Some(keyword) => {
                let needle = keyword.trim().to_lowercase();
                texts.iter().any(|t| t.to_lowercase().contains(&needle))
            }
        }
    }
}
