//! Room manager: creates rooms, moves users in and out, fixes and unfixes
//! meetups, and answers room queries.
//!
//! Every public method is one store transaction. Mutations run in a
//! read-write transaction and commit at the end; any early return drops
//! the transaction and with it every write made so far. Queries run in a
//! read-only transaction.

use boardsignal_protocol::{
    CreateRoomRequest, CreateRoomResponse, EndGameUsersResponse, ExitRoomResponse, FixRoomRequest,
    FixRoomResponse, PageRequest, ParticipantRoomResponse, RoomId, RoomInfoResponse, RoomPage,
    RoomSearchCondition, RoomStatus, RoomSummary, UserId, format_meeting_time,
};
use boardsignal_store::{
    Clock, ImageStore, MeetingInfo, Participant, ParticipantRepository, Room, RoomDraft,
    RoomRepository, Store, Transaction, TxMode,
};

use crate::end_game::{filter_ended, slice_first_page};
use crate::{RoomError, RoomManagerConfig, view};

/// The room lifecycle engine.
///
/// Generic over its three collaborators so production code can plug in a
/// real database and image backend while tests use the in-memory ones and
/// a [`FixedClock`](boardsignal_store::FixedClock).
pub struct RoomManager<S, I, C> {
    store: S,
    images: I,
    clock: C,
    config: RoomManagerConfig,
}

impl<S, I, C> RoomManager<S, I, C>
where
    S: Store,
    I: ImageStore,
    C: Clock,
{
    pub fn new(store: S, images: I, clock: C, config: RoomManagerConfig) -> Self {
        Self {
            store,
            images,
            clock,
            config,
        }
    }

    pub fn config(&self) -> &RoomManagerConfig {
        &self.config
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }

    // -----------------------------------------------------------------------
    // Creation & membership
    // -----------------------------------------------------------------------

    /// Opens a new room and makes `creator` its leader.
    ///
    /// The image (if any) is uploaded first; the room and the creator's
    /// participant row are then written in one transaction.
    pub async fn create_room(
        &self,
        creator: UserId,
        request: CreateRoomRequest,
    ) -> Result<CreateRoomResponse, RoomError> {
        request.validate()?;
        let CreateRoomRequest {
            title,
            description,
            subway_station,
            place_name,
            day_slot,
            time_slot,
            capacity,
            image,
        } = request;

        let image_url = self.images.store(image).await?;

        let mut tx = self.store.begin(TxMode::ReadWrite).await?;
        let room = tx.save_room(RoomDraft {
            title,
            description,
            subway_station,
            place_name,
            day_slot,
            time_slot,
            capacity,
            image_url,
            created_at: self.clock.now(),
        })?;
        tx.save_participant(Participant::leader(creator, room.id()))?;
        tx.commit()?;

        tracing::info!(room_id = %room.id(), %creator, capacity, "room created");

        Ok(CreateRoomResponse {
            room_id: room.id(),
            title: room.title().to_string(),
            image_url: room.image_url().map(str::to_string),
            status: room.status(),
        })
    }

    /// Adds `user_id` to a room as a regular participant.
    ///
    /// The capacity check and the insert happen inside the same
    /// read-write transaction, so concurrent joiners cannot overbook.
    /// A full room always answers `CapacityExceeded`, fixed or not; a
    /// fixed room with free slots answers `RoomFixed`.
    pub async fn participate_room(
        &self,
        user_id: UserId,
        room_id: RoomId,
    ) -> Result<ParticipantRoomResponse, RoomError> {
        let mut tx = self.store.begin(TxMode::ReadWrite).await?;
        let room = load_room(&tx, room_id)?;

        let count = tx.count_by_room(room_id)?;
        if count >= room.capacity() as usize {
            tracing::debug!(%room_id, %user_id, count, "join rejected, room is full");
            return Err(RoomError::CapacityExceeded(room_id));
        }
        if tx.find_participant(user_id, room_id)?.is_some() {
            return Err(RoomError::AlreadyParticipating(user_id, room_id));
        }
        if !room.status().is_open() {
            return Err(RoomError::RoomFixed(room_id));
        }

        tx.save_participant(Participant::member(user_id, room_id))?;
        tx.commit()?;

        let participant_count = count + 1;
        tracing::info!(%room_id, %user_id, participants = participant_count, "participant joined");

        Ok(ParticipantRoomResponse {
            room_id,
            participant_count,
        })
    }

    /// Removes `user_id` from a room.
    ///
    /// Leadership is not handed over: if the leader leaves, the room has
    /// no leader and nobody can fix or unfix it any more.
    pub async fn exit_room(
        &self,
        user_id: UserId,
        room_id: RoomId,
    ) -> Result<ExitRoomResponse, RoomError> {
        let mut tx = self.store.begin(TxMode::ReadWrite).await?;
        let participant = tx
            .find_participant(user_id, room_id)?
            .ok_or(RoomError::ParticipantNotFound(user_id, room_id))?;

        let room = load_room(&tx, room_id)?;
        if !room.status().is_open() {
            return Err(RoomError::RoomFixed(room_id));
        }

        tx.delete_participant(user_id, room_id)?;
        let participant_count = tx.count_by_room(room_id)?;
        tx.commit()?;

        if participant.is_leader {
            tracing::warn!(%room_id, %user_id, "leader left room, room has no leader");
        }
        tracing::info!(%room_id, %user_id, participants = participant_count, "participant exited");

        Ok(ExitRoomResponse {
            room_id,
            participant_count,
        })
    }

    // -----------------------------------------------------------------------
    // Fix / unfix
    // -----------------------------------------------------------------------

    /// Commits the room to an exact meeting time and place.
    ///
    /// Fixing an already fixed room replaces its meeting info.
    pub async fn fix_room(
        &self,
        user_id: UserId,
        room_id: RoomId,
        request: FixRoomRequest,
    ) -> Result<FixRoomResponse, RoomError> {
        let mut tx = self.store.begin(TxMode::ReadWrite).await?;
        let mut room = load_room(&tx, room_id)?;
        require_leader(&tx, user_id, room_id)?;

        request.validate()?;
        let now = self.clock.now();
        if !self.config.allow_past_meeting_time && request.meeting_time < now {
            return Err(RoomError::Validation(format!(
                "meeting time {} is in the past",
                format_meeting_time(&request.meeting_time)
            )));
        }

        let info = MeetingInfo::new(request.meeting_time, request.station, request.meeting_place);
        let response = FixRoomResponse {
            room_id,
            meeting_time: format_meeting_time(&info.meeting_time()),
            station: info.station().to_string(),
            meeting_place: info.meeting_place().to_string(),
        };

        let refix = room.status().is_fixed();
        room.fix(info);
        tx.update_room(&room)?;
        tx.commit()?;

        tracing::info!(%room_id, %user_id, refix, "room fixed");
        Ok(response)
    }

    /// Reverts a fixed room to open and drops its meeting info.
    pub async fn unfix_room(&self, user_id: UserId, room_id: RoomId) -> Result<(), RoomError> {
        let mut tx = self.store.begin(TxMode::ReadWrite).await?;
        let mut room = load_room(&tx, room_id)?;
        require_leader(&tx, user_id, room_id)?;

        if !room.status().can_transition_to(RoomStatus::Open) {
            return Err(RoomError::NotFixed(room_id));
        }

        room.unfix();
        tx.update_room(&room)?;
        tx.commit()?;

        tracing::info!(%room_id, %user_id, "room unfixed");
        Ok(())
    }

    // -----------------------------------------------------------------------
    // Queries
    // -----------------------------------------------------------------------

    /// Detailed view of a room.
    ///
    /// `viewer` may be `None` (anonymous) or a non-member; both can view,
    /// they just never get `is_leader = true`.
    pub async fn find_room_info(
        &self,
        viewer: Option<UserId>,
        room_id: RoomId,
    ) -> Result<RoomInfoResponse, RoomError> {
        let tx = self.store.begin(TxMode::ReadOnly).await?;
        let room = load_room(&tx, room_id)?;
        let participants: Vec<_> = tx
            .find_participants_by_room(room_id)?
            .iter()
            .map(view::participant)
            .collect();

        let (time, place) = view::schedule(&room);
        let is_leader = viewer
            .and_then(|viewer| participants.iter().find(|p| p.user_id == viewer))
            .is_some_and(|p| p.is_leader);

        Ok(RoomInfoResponse {
            room_id,
            title: room.title().to_string(),
            description: room.description().to_string(),
            image_url: room.image_url().map(str::to_string),
            status: room.status(),
            time,
            place,
            capacity: room.capacity(),
            participant_count: participants.len(),
            is_leader,
            participants,
        })
    }

    /// The user's fixed rooms whose meeting date is before today.
    ///
    /// Fetches all of the user's fixed rooms, filters them in memory and
    /// returns the first `page.size` of them. `has_next` says whether the
    /// filtered list was longer than the page; `page.page` is echoed back
    /// but does not shift the window.
    pub async fn find_my_end_game(
        &self,
        user_id: UserId,
        page: PageRequest,
    ) -> Result<RoomPage<RoomSummary>, RoomError> {
        page.validate(self.config.max_page_size)?;

        let tx = self.store.begin(TxMode::ReadOnly).await?;
        let fixed = tx.find_rooms_fixed_by_user(user_id)?;
        let ended = filter_ended(fixed, self.clock.today());
        let (rooms, has_next) = slice_first_page(ended, page.size);

        let items = summarize(&tx, &rooms)?;
        tracing::debug!(%user_id, found = items.len(), has_next, "end games listed");
        Ok(RoomPage::new(items, page, has_next))
    }

    /// Rooms matching `condition`, paginated by the store.
    pub async fn find_room_by_search(
        &self,
        condition: RoomSearchCondition,
        page: PageRequest,
    ) -> Result<RoomPage<RoomSummary>, RoomError> {
        condition.validate()?;
        page.validate(self.config.max_page_size)?;

        let tx = self.store.begin(TxMode::ReadOnly).await?;
        let found = tx.find_rooms(&condition, page)?;
        let items = summarize(&tx, &found.items)?;
        Ok(RoomPage::new(items, page, found.has_next))
    }

    /// Everyone currently in a room, for the post-meetup review flow.
    pub async fn get_end_game_users(
        &self,
        user_id: UserId,
        room_id: RoomId,
    ) -> Result<EndGameUsersResponse, RoomError> {
        let tx = self.store.begin(TxMode::ReadOnly).await?;
        load_room(&tx, room_id)?;
        let participants = tx
            .find_participants_by_room(room_id)?
            .iter()
            .map(view::participant)
            .collect();

        tracing::debug!(%room_id, %user_id, "end game users listed");
        Ok(EndGameUsersResponse {
            room_id,
            participants,
        })
    }
}

fn load_room<T: Transaction>(tx: &T, room_id: RoomId) -> Result<Room, RoomError> {
    tx.find_room(room_id)?.ok_or(RoomError::NotFound(room_id))
}

fn require_leader<T: Transaction>(
    tx: &T,
    user_id: UserId,
    room_id: RoomId,
) -> Result<(), RoomError> {
    match tx.find_participant(user_id, room_id)? {
        Some(participant) if participant.is_leader => Ok(()),
        _ => {
            tracing::debug!(%room_id, %user_id, "leader-only action rejected");
            Err(RoomError::Forbidden(user_id, room_id))
        }
    }
}

fn summarize<T: Transaction>(tx: &T, rooms: &[Room]) -> Result<Vec<RoomSummary>, RoomError> {
    let mut items = Vec::with_capacity(rooms.len());
    for room in rooms {
        items.push(view::summary(room, tx.count_by_room(room.id())?));
    }
    Ok(items)
}
