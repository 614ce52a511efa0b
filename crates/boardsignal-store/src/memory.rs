//! In-memory [`Store`] implementation.
//!
//! All tables sit behind one `tokio::sync::RwLock`. A read-write
//! transaction holds the write lock for its whole life and edits the
//! tables in place, recording an undo entry for every change. Commit
//! forgets the undo log; dropping the transaction replays it backwards.
//! Writers are therefore fully serialized, which is stronger than the
//! per-room serialization the [`Store`] contract asks for.

use std::collections::BTreeMap;
use std::sync::Arc;

use boardsignal_protocol::{PageRequest, RoomId, RoomPage, RoomSearchCondition, UserId};
use tokio::sync::{OwnedRwLockReadGuard, OwnedRwLockWriteGuard, RwLock};

use crate::{
    Participant, ParticipantRepository, Room, RoomDraft, RoomRepository, Store, StoreError,
    Transaction, TxMode,
};

#[derive(Debug, Default)]
struct Tables {
    last_room_id: u64,
    rooms: BTreeMap<RoomId, Room>,
    /// Keyed by (room, user) so a room's members are a contiguous range.
    participants: BTreeMap<(RoomId, UserId), Participant>,
}

/// The inverse of one write made by an uncommitted transaction.
#[derive(Debug)]
enum Undo {
    RoomInserted { id: RoomId, previous_last_id: u64 },
    RoomReplaced(Room),
    ParticipantInserted(RoomId, UserId),
    ParticipantRemoved(Participant),
}

impl Undo {
    fn revert(self, tables: &mut Tables) {
        match self {
            Undo::RoomInserted {
                id,
                previous_last_id,
            } => {
                tables.rooms.remove(&id);
                tables.last_room_id = previous_last_id;
            }
            Undo::RoomReplaced(room) => {
                tables.rooms.insert(room.id(), room);
            }
            Undo::ParticipantInserted(room_id, user_id) => {
                tables.participants.remove(&(room_id, user_id));
            }
            Undo::ParticipantRemoved(participant) => {
                tables
                    .participants
                    .insert((participant.room_id, participant.user_id), participant);
            }
        }
    }
}

/// A process-local store. Cheap to clone; clones share the same tables.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    tables: Arc<RwLock<Tables>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Store for MemoryStore {
    type Tx = MemoryTx;

    async fn begin(&self, mode: TxMode) -> Result<MemoryTx, StoreError> {
        let state = match mode {
            TxMode::ReadOnly => TxState::Read(Arc::clone(&self.tables).read_owned().await),
            TxMode::ReadWrite => TxState::Write {
                guard: Arc::clone(&self.tables).write_owned().await,
                undo: Vec::new(),
            },
        };
        Ok(MemoryTx { state })
    }
}

enum TxState {
    Read(OwnedRwLockReadGuard<Tables>),
    Write {
        guard: OwnedRwLockWriteGuard<Tables>,
        undo: Vec<Undo>,
    },
}

/// A transaction over a [`MemoryStore`].
pub struct MemoryTx {
    state: TxState,
}

impl MemoryTx {
    fn tables(&self) -> &Tables {
        match &self.state {
            TxState::Read(guard) => &**guard,
            TxState::Write { guard, .. } => &**guard,
        }
    }

    fn writer(&mut self) -> Result<(&mut Tables, &mut Vec<Undo>), StoreError> {
        match &mut self.state {
            TxState::Read(_) => Err(StoreError::ReadOnly),
            TxState::Write { guard, undo } => Ok((&mut **guard, undo)),
        }
    }
}

impl Transaction for MemoryTx {
    fn mode(&self) -> TxMode {
        match self.state {
            TxState::Read(_) => TxMode::ReadOnly,
            TxState::Write { .. } => TxMode::ReadWrite,
        }
    }

    fn commit(mut self) -> Result<(), StoreError> {
        if let TxState::Write { undo, .. } = &mut self.state {
            undo.clear();
            tracing::trace!("transaction committed");
        }
        Ok(())
    }
}

impl Drop for MemoryTx {
    fn drop(&mut self) {
        if let TxState::Write { guard, undo } = &mut self.state {
            if !undo.is_empty() {
                tracing::trace!(writes = undo.len(), "transaction rolled back");
            }
            while let Some(entry) = undo.pop() {
                entry.revert(&mut **guard);
            }
        }
    }
}

fn room_matches(condition: &RoomSearchCondition, room: &Room) -> bool {
    condition
        .subway_station
        .as_deref()
        .is_none_or(|station| room.subway_station() == station)
        && condition.day_slot.is_none_or(|slot| room.day_slot() == slot)
        && condition.time_slot.is_none_or(|slot| room.time_slot() == slot)
        && condition.status.is_none_or(|status| room.status() == status)
        && condition.capacity_in_range(room.capacity())
        && condition.keyword_matches(&[room.title(), room.place_name()])
}

impl RoomRepository for MemoryTx {
    fn save_room(&mut self, draft: RoomDraft) -> Result<Room, StoreError> {
        let (tables, undo) = self.writer()?;
        let previous_last_id = tables.last_room_id;
        tables.last_room_id += 1;
        let room = draft.into_room(RoomId(tables.last_room_id));
        tables.rooms.insert(room.id(), room.clone());
        undo.push(Undo::RoomInserted {
            id: room.id(),
            previous_last_id,
        });
        Ok(room)
    }

    fn update_room(&mut self, room: &Room) -> Result<(), StoreError> {
        let (tables, undo) = self.writer()?;
        let stored = tables
            .rooms
            .get_mut(&room.id())
            .ok_or(StoreError::RoomNotFound(room.id()))?;
        let previous = std::mem::replace(stored, room.clone());
        undo.push(Undo::RoomReplaced(previous));
        Ok(())
    }

    fn find_room(&self, room_id: RoomId) -> Result<Option<Room>, StoreError> {
        Ok(self.tables().rooms.get(&room_id).cloned())
    }

    fn find_rooms(
        &self,
        condition: &RoomSearchCondition,
        page: PageRequest,
    ) -> Result<RoomPage<Room>, StoreError> {
        let size = page.size as usize;
        // One extra row tells us whether a next page exists.
        let mut items: Vec<Room> = self
            .tables()
            .rooms
            .values()
            .rev()
            .filter(|room| room_matches(condition, room))
            .skip(page.offset())
            .take(size + 1)
            .cloned()
            .collect();
        let has_next = items.len() > size;
        items.truncate(size);
        Ok(RoomPage::new(items, page, has_next))
    }

    fn find_rooms_fixed_by_user(&self, user_id: UserId) -> Result<Vec<Room>, StoreError> {
        let tables = self.tables();
        let mut rooms: Vec<Room> = tables
            .participants
            .values()
            .filter(|p| p.user_id == user_id)
            .filter_map(|p| tables.rooms.get(&p.room_id))
            .filter(|room| room.status().is_fixed())
            .cloned()
            .collect();
        rooms.sort_by_key(|room| {
            std::cmp::Reverse((room.meeting_info().map(|info| info.meeting_time()), room.id()))
        });
        Ok(rooms)
    }
}

impl ParticipantRepository for MemoryTx {
    fn save_participant(&mut self, participant: Participant) -> Result<(), StoreError> {
        let (tables, undo) = self.writer()?;
        let Participant {
            user_id, room_id, ..
        } = participant;
        if !tables.rooms.contains_key(&room_id) {
            return Err(StoreError::RoomNotFound(room_id));
        }
        if tables.participants.contains_key(&(room_id, user_id)) {
            return Err(StoreError::DuplicateParticipant(user_id, room_id));
        }
        tables.participants.insert((room_id, user_id), participant);
        undo.push(Undo::ParticipantInserted(room_id, user_id));
        Ok(())
    }

    fn find_participants_by_room(&self, room_id: RoomId) -> Result<Vec<Participant>, StoreError> {
        Ok(self
            .tables()
            .participants
            .range((room_id, UserId(u64::MIN))..=(room_id, UserId(u64::MAX)))
            .map(|(_, p)| *p)
            .collect())
    }

    fn find_participant(
        &self,
        user_id: UserId,
        room_id: RoomId,
    ) -> Result<Option<Participant>, StoreError> {
        Ok(self.tables().participants.get(&(room_id, user_id)).copied())
    }

    fn delete_participant(&mut self, user_id: UserId, room_id: RoomId) -> Result<(), StoreError> {
        let (tables, undo) = self.writer()?;
        let removed = tables
            .participants
            .remove(&(room_id, user_id))
            .ok_or(StoreError::ParticipantNotFound(user_id, room_id))?;
        undo.push(Undo::ParticipantRemoved(removed));
        Ok(())
    }

    fn count_by_room(&self, room_id: RoomId) -> Result<usize, StoreError> {
        Ok(self
            .tables()
            .participants
            .range((room_id, UserId(u64::MIN))..=(room_id, UserId(u64::MAX)))
            .count())
    }
}

#[cfg(test)]
mod tests {
    use boardsignal_protocol::{DaySlot, RoomStatus, TimeSlot};
    use chrono::{NaiveDate, NaiveDateTime};

    use super::*;
    use crate::MeetingInfo;

    fn at(d: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2025, 3, d)
            .unwrap()
            .and_hms_opt(18, 0, 0)
            .unwrap()
    }

    fn draft(title: &str, capacity: u32) -> RoomDraft {
        RoomDraft {
            title: title.into(),
            description: String::new(),
            subway_station: "Gangnam".into(),
            place_name: "Dice Cafe".into(),
            day_slot: DaySlot::Weekend,
            time_slot: TimeSlot::Evening,
            capacity,
            image_url: None,
            created_at: at(1),
        }
    }

    #[tokio::test]
    async fn test_save_room_assigns_increasing_ids() {
        let store = MemoryStore::new();
        let mut tx = store.begin(TxMode::ReadWrite).await.unwrap();
        let a = tx.save_room(draft("a", 4)).unwrap();
        let b = tx.save_room(draft("b", 4)).unwrap();
        tx.commit().unwrap();

        assert_eq!(a.id(), RoomId(1));
        assert_eq!(b.id(), RoomId(2));
    }

    #[tokio::test]
    async fn test_uncommitted_writes_are_discarded() {
        let store = MemoryStore::new();
        {
            let mut tx = store.begin(TxMode::ReadWrite).await.unwrap();
            tx.save_room(draft("a", 4)).unwrap();
            // dropped without commit
        }
        let tx = store.begin(TxMode::ReadOnly).await.unwrap();
        assert!(tx.find_room(RoomId(1)).unwrap().is_none());
    }

    #[tokio::test]
    async fn test_rollback_restores_updated_and_deleted_rows() {
        let store = MemoryStore::new();
        let mut tx = store.begin(TxMode::ReadWrite).await.unwrap();
        let room = tx.save_room(draft("a", 4)).unwrap();
        tx.save_participant(Participant::leader(UserId(1), room.id()))
            .unwrap();
        tx.save_participant(Participant::member(UserId(2), room.id()))
            .unwrap();
        tx.commit().unwrap();

        {
            let mut tx = store.begin(TxMode::ReadWrite).await.unwrap();
            let mut fixed = tx.find_room(room.id()).unwrap().unwrap();
            fixed.fix(MeetingInfo::new(at(2), "Gangnam", "Dice Cafe"));
            tx.update_room(&fixed).unwrap();
            tx.delete_participant(UserId(2), room.id()).unwrap();
            tx.save_participant(Participant::member(UserId(3), room.id()))
                .unwrap();
            tx.save_room(draft("b", 4)).unwrap();
            // dropped without commit
        }

        let mut tx = store.begin(TxMode::ReadWrite).await.unwrap();
        let stored = tx.find_room(room.id()).unwrap().unwrap();
        assert_eq!(stored.status(), RoomStatus::Open);
        assert!(stored.meeting_info().is_none());
        assert!(tx.find_participant(UserId(2), room.id()).unwrap().is_some());
        assert!(tx.find_participant(UserId(3), room.id()).unwrap().is_none());
        assert_eq!(tx.count_by_room(room.id()).unwrap(), 2);
        assert!(tx.find_room(RoomId(2)).unwrap().is_none());
        // The id handed out by the rolled-back save is reused.
        assert_eq!(tx.save_room(draft("c", 4)).unwrap().id(), RoomId(2));
    }

    #[tokio::test]
    async fn test_read_only_transaction_rejects_writes() {
        let store = MemoryStore::new();
        let mut tx = store.begin(TxMode::ReadOnly).await.unwrap();
        assert_eq!(tx.mode(), TxMode::ReadOnly);
        assert!(matches!(
            tx.save_room(draft("a", 4)),
            Err(StoreError::ReadOnly)
        ));
    }

    #[tokio::test]
    async fn test_duplicate_participant_is_rejected() {
        let store = MemoryStore::new();
        let mut tx = store.begin(TxMode::ReadWrite).await.unwrap();
        let room = tx.save_room(draft("a", 4)).unwrap();
        tx.save_participant(Participant::leader(UserId(1), room.id()))
            .unwrap();
        let again = tx.save_participant(Participant::member(UserId(1), room.id()));
        assert!(matches!(
            again,
            Err(StoreError::DuplicateParticipant(UserId(1), _))
        ));
        assert_eq!(tx.count_by_room(room.id()).unwrap(), 1);
    }

    #[tokio::test]
    async fn test_participant_for_missing_room_is_rejected() {
        let store = MemoryStore::new();
        let mut tx = store.begin(TxMode::ReadWrite).await.unwrap();
        let result = tx.save_participant(Participant::member(UserId(1), RoomId(9)));
        assert!(matches!(result, Err(StoreError::RoomNotFound(RoomId(9)))));
    }

    #[tokio::test]
    async fn test_participants_are_scoped_to_their_room() {
        let store = MemoryStore::new();
        let mut tx = store.begin(TxMode::ReadWrite).await.unwrap();
        let a = tx.save_room(draft("a", 4)).unwrap();
        let b = tx.save_room(draft("b", 4)).unwrap();
        tx.save_participant(Participant::leader(UserId(1), a.id()))
            .unwrap();
        tx.save_participant(Participant::member(UserId(2), a.id()))
            .unwrap();
        tx.save_participant(Participant::leader(UserId(3), b.id()))
            .unwrap();

        let in_a = tx.find_participants_by_room(a.id()).unwrap();
        assert_eq!(in_a.len(), 2);
        assert!(in_a.iter().all(|p| p.room_id == a.id()));
        assert_eq!(tx.count_by_room(b.id()).unwrap(), 1);
    }

    #[tokio::test]
    async fn test_delete_missing_participant_fails() {
        let store = MemoryStore::new();
        let mut tx = store.begin(TxMode::ReadWrite).await.unwrap();
        let room = tx.save_room(draft("a", 4)).unwrap();
        let result = tx.delete_participant(UserId(5), room.id());
        assert!(matches!(
            result,
            Err(StoreError::ParticipantNotFound(UserId(5), _))
        ));
    }

    #[tokio::test]
    async fn test_find_rooms_paginates_newest_first() {
        let store = MemoryStore::new();
        let mut tx = store.begin(TxMode::ReadWrite).await.unwrap();
        for i in 0..5 {
            tx.save_room(draft(&format!("room {i}"), 4)).unwrap();
        }

        let cond = RoomSearchCondition::new();
        let first = tx.find_rooms(&cond, PageRequest::new(0, 2)).unwrap();
        assert_eq!(
            first.items.iter().map(Room::id).collect::<Vec<_>>(),
            vec![RoomId(5), RoomId(4)]
        );
        assert!(first.has_next);

        let last = tx.find_rooms(&cond, PageRequest::new(2, 2)).unwrap();
        assert_eq!(last.items.len(), 1);
        assert!(!last.has_next);
    }

    #[tokio::test]
    async fn test_find_rooms_applies_condition() {
        let store = MemoryStore::new();
        let mut tx = store.begin(TxMode::ReadWrite).await.unwrap();
        tx.save_room(draft("Catan", 2)).unwrap();
        tx.save_room(draft("Azul", 6)).unwrap();
        let mut fixed = tx.save_room(draft("Catan big table", 8)).unwrap();
        fixed.fix(MeetingInfo::new(at(2), "Gangnam", "Dice Cafe"));
        tx.update_room(&fixed).unwrap();

        let cond = RoomSearchCondition::new()
            .keyword("catan")
            .status(RoomStatus::Open);
        let page = tx.find_rooms(&cond, PageRequest::first(10)).unwrap();
        assert_eq!(page.items.len(), 1);
        assert_eq!(page.items[0].title(), "Catan");

        let cond = RoomSearchCondition::new().capacity_between(Some(5), None);
        let page = tx.find_rooms(&cond, PageRequest::first(10)).unwrap();
        assert_eq!(page.items.len(), 2);
    }

    #[tokio::test]
    async fn test_find_rooms_fixed_by_user_only_returns_fixed_memberships() {
        let store = MemoryStore::new();
        let mut tx = store.begin(TxMode::ReadWrite).await.unwrap();
        let user = UserId(7);

        let open = tx.save_room(draft("open", 4)).unwrap();
        let mut early = tx.save_room(draft("early", 4)).unwrap();
        let mut late = tx.save_room(draft("late", 4)).unwrap();
        let mut other = tx.save_room(draft("someone else's", 4)).unwrap();
        early.fix(MeetingInfo::new(at(2), "Gangnam", "Dice Cafe"));
        late.fix(MeetingInfo::new(at(9), "Gangnam", "Dice Cafe"));
        other.fix(MeetingInfo::new(at(5), "Gangnam", "Dice Cafe"));
        for room in [&early, &late, &other] {
            tx.update_room(room).unwrap();
        }
        for room in [&open, &early, &late] {
            tx.save_participant(Participant::member(user, room.id()))
                .unwrap();
        }
        tx.save_participant(Participant::leader(UserId(8), other.id()))
            .unwrap();

        let rooms = tx.find_rooms_fixed_by_user(user).unwrap();
        assert_eq!(
            rooms.iter().map(Room::id).collect::<Vec<_>>(),
            vec![late.id(), early.id()]
        );
    }

    #[tokio::test]
    async fn test_writers_are_serialized() {
        let store = MemoryStore::new();
        let tx = store.begin(TxMode::ReadWrite).await.unwrap();

        let contender = store.clone();
        let waiting = tokio::spawn(async move {
            let mut tx = contender.begin(TxMode::ReadWrite).await.unwrap();
            tx.save_room(draft("second", 4)).unwrap()
        });

        tokio::task::yield_now().await;
        assert!(!waiting.is_finished());
        drop(tx);

        let room = waiting.await.unwrap();
        assert_eq!(room.id(), RoomId(1));
    }
}
