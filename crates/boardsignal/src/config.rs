//! Top-level configuration.

use boardsignal_room::RoomManagerConfig;
use serde::{Deserialize, Serialize};

use crate::BoardSignalError;

/// Everything needed to stand up a [`BoardSignal`](crate::BoardSignal)
/// instance with the default collaborators.
///
/// ```json
/// {
///   "log_filter": "boardsignal=debug,info",
///   "image_base_url": "https://cdn.example.com/rooms",
///   "room": { "max_page_size": 50 }
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BoardSignalConfig {
    /// `EnvFilter` directive used when `RUST_LOG` is not set.
    pub log_filter: String,

    /// Prefix for URLs handed out by the in-memory image store.
    pub image_base_url: String,

    pub room: RoomManagerConfig,
}

impl BoardSignalConfig {
    /// Parses a JSON document. Omitted keys keep their defaults.
    pub fn from_json_str(json: &str) -> Result<Self, BoardSignalError> {
        Ok(serde_json::from_str(json)?)
    }
}

impl Default for BoardSignalConfig {
    fn default() -> Self {
        Self {
            log_filter: "info".to_string(),
            image_base_url: "memory://images".to_string(),
            room: RoomManagerConfig::default(),
        }
    }
}
