//! Room lifecycle management for BoardSignal.
//!
//! A room is a proposed board-game meetup. Its creator leads it, other
//! users join until it is full, and the leader may fix it to an exact
//! meeting time and place (and unfix it again).
//!
//! # Key types
//!
//! - [`RoomManager`]: the engine; every action is one store transaction
//! - [`RoomManagerConfig`]: paging limit and the past-meeting-time policy
//! - [`RoomError`] / [`ErrorKind`]: typed failures
//! - [`filter_ended`] / [`slice_first_page`]: the "ended meetups" rule

mod config;
mod end_game;
mod error;
mod manager;
mod view;

pub use config::RoomManagerConfig;
pub use end_game::{filter_ended, slice_first_page};
pub use error::{ErrorKind, RoomError};
pub use manager::RoomManager;
