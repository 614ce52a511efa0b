//! Room engine configuration.

use serde::{Deserialize, Serialize};

/// Settings for a [`RoomManager`](crate::RoomManager).
///
/// Missing keys fall back to [`Default`] when deserialized.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RoomManagerConfig {
    /// Largest page a listing query may ask for.
    pub max_page_size: u32,

    /// Whether a leader may fix a room to a meeting time that has
    /// already passed. When `false`, a time equal to "now" is still
    /// accepted; anything earlier is rejected.
    pub allow_past_meeting_time: bool,
}

impl Default for RoomManagerConfig {
    fn default() -> Self {
        Self {
            max_page_size: 100,
            allow_past_meeting_time: false,
        }
    }
}
