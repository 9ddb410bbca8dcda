mod error;
mod mutations;
mod queries;
mod rules;

pub use error::EngineError;
pub use queries::RoomInfo;

use std::sync::Arc;

use dashmap::DashMap;
use tokio::sync::RwLock;
use ulid::Ulid;

use crate::catalog::{self, Room};
use crate::model::RoomState;

pub type SharedRoomState = Arc<RwLock<RoomState>>;

/// In-memory reservation engine. One mutual-exclusion domain per room: the
/// overlap check and the insert (and removal) run under that room's write
/// guard, so concurrent callers can never double-book a room. Callers own
/// the instance — construct one per process (or per test) and share it
/// behind an `Arc`.
pub struct Engine {
    rooms: DashMap<Room, SharedRoomState>,
    /// Reverse lookup: reservation id → room, for cancellation.
    reservation_to_room: DashMap<Ulid, Room>,
}

impl Default for Engine {
    fn default() -> Self {
        Self::new()
    }
}

impl Engine {
    /// Build the engine with one empty state per catalog room.
    pub fn new() -> Self {
        let rooms = DashMap::new();
        for room in catalog::ROOMS {
            rooms.insert(room, Arc::new(RwLock::new(RoomState::new(room))));
        }
        Self {
            rooms,
            reservation_to_room: DashMap::new(),
        }
    }

    fn room_state(&self, room: Room) -> SharedRoomState {
        self.rooms
            .get(&room)
            .expect("catalog room present since startup")
            .value()
            .clone()
    }
}
