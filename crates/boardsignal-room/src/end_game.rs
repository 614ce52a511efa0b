//! "My ended meetups" selection.
//!
//! Kept as pure functions over an in-memory list so the slicing rule can
//! be tested without a store. The listing fetches every fixed room of the
//! user, filters, then cuts the first page; `has_next` is computed from the
//! whole filtered list and the requested page number plays no part.

use boardsignal_store::Room;
use chrono::NaiveDate;

/// Keeps the rooms whose meeting date lies strictly before `today`,
/// preserving their order.
pub fn filter_ended(rooms: impl IntoIterator<Item = Room>, today: NaiveDate) -> Vec<Room> {
    rooms
        .into_iter()
        .filter(|room| room.is_ended(today))
        .collect()
}

/// Cuts `items` to `size` and reports whether anything was cut off.
///
/// `has_next` is `items.len() > size`, with no offset involved.
pub fn slice_first_page<T>(mut items: Vec<T>, size: u32) -> (Vec<T>, bool) {
    let size = size as usize;
    let has_next = items.len() > size;
    items.truncate(size);
    (items, has_next)
}
