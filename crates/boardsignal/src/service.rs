//! `BoardSignal` builder and handle.
//!
//! This is the entry point for embedding the meetup engine. It wires the
//! room manager to a store, an image store and a clock: the in-memory
//! ones and the system clock unless the caller swaps them out.

use std::ops::Deref;
use std::sync::Arc;

use boardsignal_room::RoomManager;
use boardsignal_store::{Clock, ImageStore, MemoryImageStore, MemoryStore, Store, SystemClock};

use crate::BoardSignalConfig;

/// Builder for a [`BoardSignal`] handle.
///
/// # Example
///
/// ```rust
/// use boardsignal::prelude::*;
///
/// let config = BoardSignalConfig::from_json_str(r#"{"room": {"max_page_size": 50}}"#)?;
/// let app = BoardSignal::builder().config(config).build();
/// assert_eq!(app.config().max_page_size, 50);
/// # Ok::<(), BoardSignalError>(())
/// ```
pub struct BoardSignalBuilder<S, I, C> {
    store: S,
    images: I,
    clock: C,
    config: BoardSignalConfig,
}

impl BoardSignalBuilder<MemoryStore, MemoryImageStore, SystemClock> {
    /// Creates a builder with the in-memory collaborators and default
    /// settings.
    pub fn new() -> Self {
        let config = BoardSignalConfig::default();
        Self {
            store: MemoryStore::new(),
            images: MemoryImageStore::new(config.image_base_url.clone()),
            clock: SystemClock,
            config,
        }
    }

    /// Replaces the configuration.
    ///
    /// The in-memory image store is rebuilt so it picks up
    /// `image_base_url`. Call this before [`images`](Self::images) if
    /// both are used.
    pub fn config(mut self, config: BoardSignalConfig) -> Self {
        self.images = MemoryImageStore::new(config.image_base_url.clone());
        self.config = config;
        self
    }
}

impl Default for BoardSignalBuilder<MemoryStore, MemoryImageStore, SystemClock> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S, I, C> BoardSignalBuilder<S, I, C>
where
    S: Store,
    I: ImageStore,
    C: Clock,
{
    /// Uses `store` for rooms and participants.
    pub fn store<S2: Store>(self, store: S2) -> BoardSignalBuilder<S2, I, C> {
        BoardSignalBuilder {
            store,
            images: self.images,
            clock: self.clock,
            config: self.config,
        }
    }

    /// Uses `images` for room images.
    pub fn images<I2: ImageStore>(self, images: I2) -> BoardSignalBuilder<S, I2, C> {
        BoardSignalBuilder {
            store: self.store,
            images,
            clock: self.clock,
            config: self.config,
        }
    }

    /// Uses `clock` as the time source.
    pub fn clock<C2: Clock>(self, clock: C2) -> BoardSignalBuilder<S, I, C2> {
        BoardSignalBuilder {
            store: self.store,
            images: self.images,
            clock,
            config: self.config,
        }
    }

    /// Finishes wiring and returns the handle.
    pub fn build(self) -> BoardSignal<S, I, C> {
        tracing::debug!(
            max_page_size = self.config.room.max_page_size,
            allow_past_meeting_time = self.config.room.allow_past_meeting_time,
            "room engine configured"
        );
        BoardSignal {
            rooms: Arc::new(RoomManager::new(
                self.store,
                self.images,
                self.clock,
                self.config.room,
            )),
        }
    }
}

/// A cheaply clonable handle to the room engine.
///
/// Derefs to [`RoomManager`], so every room operation is called on the
/// handle directly. Clones share the same store.
pub struct BoardSignal<S = MemoryStore, I = MemoryImageStore, C = SystemClock> {
    rooms: Arc<RoomManager<S, I, C>>,
}

impl BoardSignal {
    /// Creates a new builder.
    pub fn builder() -> BoardSignalBuilder<MemoryStore, MemoryImageStore, SystemClock> {
        BoardSignalBuilder::new()
    }
}

impl<S, I, C> BoardSignal<S, I, C> {
    /// The shared engine, for handing to spawned tasks.
    pub fn rooms(&self) -> &Arc<RoomManager<S, I, C>> {
        &self.rooms
    }
}

impl<S, I, C> Clone for BoardSignal<S, I, C> {
    fn clone(&self) -> Self {
        Self {
            rooms: Arc::clone(&self.rooms),
        }
    }
}

impl<S, I, C> Deref for BoardSignal<S, I, C> {
    type Target = RoomManager<S, I, C>;

    fn deref(&self) -> &Self::Target {
        &self.rooms
    }
}
