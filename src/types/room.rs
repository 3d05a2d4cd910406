use super::RoomId;
use serde::{Deserialize, Serialize};

/// A physical exam room.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Room {
    pub name: RoomId,
    pub capacity: u32,
}
