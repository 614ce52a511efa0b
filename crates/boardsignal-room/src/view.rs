//! Turning room records into what callers see.

use boardsignal_protocol::{ParticipantResponse, RoomSummary, format_meeting_time};
use boardsignal_store::{Participant, Room};

fn concat(first: &str, second: &str) -> String {
    format!("{first} {second}")
}

/// The `(time, place)` strings shown for a room.
///
/// Open rooms show their proposed slots and place. Fixed rooms show the
/// committed meeting time (`yyyy-MM-dd HH:mm`) and meeting place instead.
pub(crate) fn schedule(room: &Room) -> (String, String) {
    match room.meeting_info() {
        Some(info) if room.status().is_fixed() => (
            format_meeting_time(&info.meeting_time()),
            concat(info.station(), info.meeting_place()),
        ),
        _ => (
            concat(room.day_slot().description(), room.time_slot().description()),
            concat(room.subway_station(), room.place_name()),
        ),
    }
}

pub(crate) fn summary(room: &Room, participant_count: usize) -> RoomSummary {
    RoomSummary {
        room_id: room.id(),
        title: room.title().to_string(),
        subway_station: room.subway_station().to_string(),
        place_name: room.place_name().to_string(),
        day_slot: room.day_slot().description().to_string(),
        time_slot: room.time_slot().description().to_string(),
        status: room.status(),
        capacity: room.capacity(),
        participant_count,
        image_url: room.image_url().map(str::to_string),
        meeting_time: room
            .meeting_info()
            .map(|info| format_meeting_time(&info.meeting_time())),
    }
}

pub(crate) fn participant(p: &Participant) -> ParticipantResponse {
    ParticipantResponse {
        user_id: p.user_id,
        is_leader: p.is_leader,
    }
}
