use crate::catalog::{self, Room};
use crate::model::Reservation;

use super::{Engine, EngineError};

/// One catalog entry as reported by `list_rooms`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoomInfo {
    pub id: &'static str,
    pub name: &'static str,
}

impl Engine {
    /// The fixed catalog, in definition order. Always six entries.
    pub fn list_rooms(&self) -> Vec<RoomInfo> {
        catalog::ROOMS
            .iter()
            .map(|r| RoomInfo {
                id: r.id(),
                name: r.display_name(),
            })
            .collect()
    }

    /// Snapshot of a room's active reservations sorted by start, optionally
    /// filtered to reservations of a single user. Callers get clones — the
    /// store keeps sole ownership of the live set.
    pub async fn list_reservations(
        &self,
        room_id: &str,
        user: Option<&str>,
    ) -> Result<Vec<Reservation>, EngineError> {
        let room = Room::from_id(room_id)
            .ok_or_else(|| EngineError::UnknownRoom(room_id.to_string()))?;
        let rs = self.room_state(room);
        let guard = rs.read().await;
        Ok(guard
            .reservations
            .iter()
            .filter(|r| user.is_none_or(|u| r.user == u))
            .cloned()
            .collect())
    }
}
