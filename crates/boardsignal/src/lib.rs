//! # BoardSignal
//!
//! Board-game meetup rooms. A user opens a room for a game night, others
//! join until it is full, the leader fixes an exact time and place, and
//! once the date has passed the room shows up among everyone's ended
//! meetups for reviews.
//!
//! This crate wires the layers together:
//!
//! ```text
//! boardsignal-protocol → boardsignal-store → boardsignal-room → boardsignal
//! ```
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use boardsignal::prelude::*;
//!
//! # async fn run() -> Result<(), BoardSignalError> {
//! let config = BoardSignalConfig::default();
//! boardsignal::telemetry::init_tracing(&config.log_filter)?;
//!
//! let app = BoardSignal::builder().config(config).build();
//! let created = app
//!     .create_room(
//!         UserId(1),
//!         CreateRoomRequest {
//!             title: "Catan night".into(),
//!             description: String::new(),
//!             subway_station: "Gangnam".into(),
//!             place_name: "Dice Cafe".into(),
//!             day_slot: DaySlot::Weekend,
//!             time_slot: TimeSlot::Evening,
//!             capacity: 4,
//!             image: None,
//!         },
//!     )
//!     .await?;
//! app.participate_room(UserId(2), created.room_id).await?;
//! # Ok(())
//! # }
//! ```

mod config;
mod error;
mod service;
pub mod telemetry;

pub use config::BoardSignalConfig;
pub use error::BoardSignalError;
pub use service::{BoardSignal, BoardSignalBuilder};

pub mod prelude {
    pub use crate::{BoardSignal, BoardSignalBuilder, BoardSignalConfig, BoardSignalError};
    pub use boardsignal_protocol::{
        CreateRoomRequest, CreateRoomResponse, DaySlot, EndGameUsersResponse, ExitRoomResponse,
        FixRoomRequest, FixRoomResponse, ImageUpload, PageRequest, ParticipantResponse,
        ParticipantRoomResponse, ProtocolError, RoomId, RoomInfoResponse, RoomPage,
        RoomSearchCondition, RoomStatus, RoomSummary, TimeSlot, UserId,
    };
    pub use boardsignal_room::{ErrorKind, RoomError, RoomManager, RoomManagerConfig};
    pub use boardsignal_store::{
        Clock, FixedClock, ImageError, ImageStore, MemoryImageStore, MemoryStore, Store,
        StoreError, SystemClock,
    };
}
