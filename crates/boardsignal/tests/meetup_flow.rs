//! End-to-end tests through the `boardsignal` facade: build a handle with a
//! controllable clock, run a meetup from creation to review, and share the
//! handle across tasks.

use boardsignal::prelude::*;
use chrono::{NaiveDate, NaiveDateTime};
use futures_util::future::join_all;

fn at(y: i32, m: u32, d: u32, h: u32, min: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(y, m, d)
        .unwrap()
        .and_hms_opt(h, min, 0)
        .unwrap()
}

fn app(clock: FixedClock) -> BoardSignal<MemoryStore, MemoryImageStore, FixedClock> {
    let config = BoardSignalConfig::from_json_str(
        r#"{"image_base_url": "https://cdn.test/rooms", "room": {"max_page_size": 20}}"#,
    )
    .unwrap();
    BoardSignal::builder().config(config).clock(clock).build()
}

fn room_request(capacity: u32) -> CreateRoomRequest {
    CreateRoomRequest {
        title: "Wingspan afternoon".into(),
        description: "All expansions".into(),
        subway_station: "Seongsu".into(),
        place_name: "Nest Cafe".into(),
        day_slot: DaySlot::Weekday,
        time_slot: TimeSlot::Afternoon,
        capacity,
        image: Some(ImageUpload {
            file_name: "birds.jpg".into(),
            content_type: Some("image/jpeg".into()),
            bytes: vec![0xff, 0xd8, 0xff],
        }),
    }
}

#[tokio::test]
async fn test_meetup_from_creation_to_review() {
    let clock = FixedClock::new(at(2025, 2, 20, 10, 0));
    let app = app(clock.clone());

    let created = app.create_room(UserId(1), room_request(3)).await.unwrap();
    assert_eq!(
        created.image_url.as_deref(),
        Some("https://cdn.test/rooms/1/birds.jpg")
    );
    let room = created.room_id;

    app.participate_room(UserId(2), room).await.unwrap();
    app.participate_room(UserId(3), room).await.unwrap();
    let full = app.participate_room(UserId(4), room).await.unwrap_err();
    assert_eq!(full.kind(), ErrorKind::CapacityExceeded);

    let fixed = app
        .fix_room(
            UserId(1),
            room,
            FixRoomRequest {
                meeting_time: at(2025, 3, 1, 18, 0),
                station: "Seongsu".into(),
                meeting_place: "Nest Cafe 2F".into(),
            },
        )
        .await
        .unwrap();
    assert_eq!(fixed.meeting_time, "2025-03-01 18:00");

    // Not over yet.
    let before = app
        .find_my_end_game(UserId(2), PageRequest::first(5))
        .await
        .unwrap();
    assert!(before.is_empty());

    clock.set(at(2025, 3, 2, 9, 0));
    let after = app
        .find_my_end_game(UserId(2), PageRequest::first(5))
        .await
        .unwrap();
    assert_eq!(after.len(), 1);
    assert_eq!(after.items[0].room_id, room);
    assert_eq!(after.items[0].participant_count, 3);

    let users = app.get_end_game_users(UserId(2), room).await.unwrap();
    assert_eq!(users.participants.len(), 3);
}

async fn lookup(
    app: &BoardSignal<MemoryStore, MemoryImageStore, FixedClock>,
    room_id: RoomId,
) -> Result<RoomInfoResponse, BoardSignalError> {
    Ok(app.find_room_info(None, room_id).await?)
}

#[tokio::test]
async fn test_room_errors_convert_to_top_level_error() {
    let app = app(FixedClock::new(at(2025, 2, 20, 10, 0)));

    let err = lookup(&app, RoomId(404)).await.unwrap_err();
    assert!(matches!(err, BoardSignalError::Room(RoomError::NotFound(_))));
    assert_eq!(err.kind(), ErrorKind::NotFound);
}

#[tokio::test]
async fn test_page_size_limit_comes_from_config() {
    let app = app(FixedClock::new(at(2025, 2, 20, 10, 0)));
    let err = app
        .find_room_by_search(RoomSearchCondition::new(), PageRequest::first(21))
        .await
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Validation);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_cloned_handles_share_rooms() {
    let app = app(FixedClock::new(at(2025, 2, 20, 10, 0)));
    let room = app.create_room(UserId(1), room_request(5)).await.unwrap().room_id;

    let handles = (2..=9).map(|user| {
        let app = app.clone();
        tokio::spawn(async move { app.participate_room(UserId(user), room).await })
    });
    let joined = join_all(handles)
        .await
        .into_iter()
        .filter(|result| matches!(result, Ok(Ok(_))))
        .count();

    assert_eq!(joined, 4);
    let info = app.find_room_info(Some(UserId(1)), room).await.unwrap();
    assert_eq!(info.participant_count, 5);
    assert!(info.is_leader);
}
