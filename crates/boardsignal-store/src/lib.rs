//! Records and collaborator contracts for BoardSignal.
//!
//! The room engine depends on three collaborators, each behind a trait so
//! it can be swapped for a real backend or a test double:
//!
//! - [`Store`]: rooms and participants, accessed through transactions
//!   ([`Transaction`], [`RoomRepository`], [`ParticipantRepository`])
//! - [`ImageStore`]: turns uploaded image bytes into a URL
//! - [`Clock`]: the current date and time
//!
//! In-memory implementations ([`MemoryStore`], [`MemoryImageStore`],
//! [`SystemClock`], [`FixedClock`]) are provided for development and tests.

mod clock;
mod error;
mod image;
mod memory;
mod record;
mod repository;

pub use clock::{Clock, FixedClock, SystemClock};
pub use error::{ImageError, StoreError};
pub use image::{ImageStore, MemoryImageStore};
pub use memory::{MemoryStore, MemoryTx};
pub use record::{MeetingInfo, Participant, Room, RoomDraft};
pub use repository::{ParticipantRepository, RoomRepository, Store, Transaction, TxMode};
