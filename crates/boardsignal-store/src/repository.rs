//! Store contracts: transactions and the repositories they expose.
//!
//! Every engine action opens one transaction, does all of its reads and
//! writes through it, and commits. Nothing written through a transaction
//! is visible to anyone else until [`Transaction::commit`]; dropping a
//! transaction without committing discards its writes.

use boardsignal_protocol::{PageRequest, RoomId, RoomPage, RoomSearchCondition, UserId};

use crate::{Participant, Room, RoomDraft, StoreError};

/// Whether a transaction may write.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TxMode {
    ReadOnly,
    ReadWrite,
}

/// Access to room records.
pub trait RoomRepository {
    /// Inserts a new room and assigns its id.
    fn save_room(&mut self, draft: RoomDraft) -> Result<Room, StoreError>;

    /// Overwrites an existing room record.
    fn update_room(&mut self, room: &Room) -> Result<(), StoreError>;

    fn find_room(&self, room_id: RoomId) -> Result<Option<Room>, StoreError>;

    /// Evaluates `condition` and returns the requested page, newest room
    /// first. `has_next` is `true` when rows remain after this page.
    fn find_rooms(
        &self,
        condition: &RoomSearchCondition,
        page: PageRequest,
    ) -> Result<RoomPage<Room>, StoreError>;

    /// Every fixed room `user_id` participates in, latest meeting first.
    fn find_rooms_fixed_by_user(&self, user_id: UserId) -> Result<Vec<Room>, StoreError>;
}

/// Access to participant records.
pub trait ParticipantRepository {
    /// Inserts a participant row.
    ///
    /// Fails with [`StoreError::DuplicateParticipant`] if the pair already
    /// has a row and [`StoreError::RoomNotFound`] if the room does not exist.
    fn save_participant(&mut self, participant: Participant) -> Result<(), StoreError>;

    fn find_participants_by_room(&self, room_id: RoomId) -> Result<Vec<Participant>, StoreError>;

    fn find_participant(
        &self,
        user_id: UserId,
        room_id: RoomId,
    ) -> Result<Option<Participant>, StoreError>;

    fn delete_participant(&mut self, user_id: UserId, room_id: RoomId) -> Result<(), StoreError>;

    fn count_by_room(&self, room_id: RoomId) -> Result<usize, StoreError>;
}

/// One all-or-nothing unit of work.
pub trait Transaction: RoomRepository + ParticipantRepository + Send {
    fn mode(&self) -> TxMode;

    /// Publishes every write made through this transaction at once.
    fn commit(self) -> Result<(), StoreError>;
}

/// A durable store of rooms and participants.
///
/// # Serialization contract
///
/// Two [`TxMode::ReadWrite`] transactions that touch the same room must
/// not interleave: the second one must observe the first one's committed
/// writes (or block until it finishes). This is what makes the capacity
/// check and the participant insert in a join atomic under concurrent
/// joiners. Read-only transactions may run concurrently with each other.
pub trait Store: Send + Sync + 'static {
    type Tx: Transaction;

    fn begin(
        &self,
        mode: TxMode,
    ) -> impl std::future::Future<Output = Result<Self::Tx, StoreError>> + Send;
}
