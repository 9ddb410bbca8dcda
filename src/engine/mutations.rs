use ulid::Ulid;

use crate::catalog::Room;
use crate::model::{Reservation, Span};
use crate::timeline;

use super::rules::{check_no_overlap, check_window};
use super::{Engine, EngineError};

impl Engine {
    /// Admit a booking request. Rules run in a fixed order and the first
    /// violated rule is the one the caller sees: room, parse, range, past
    /// start, calendar year, overlap. The overlap check and the insert are
    /// one unit under the room's write guard.
    pub async fn create_reservation(
        &self,
        room_id: &str,
        user: &str,
        start_raw: &str,
        end_raw: &str,
    ) -> Result<Reservation, EngineError> {
        let room = Room::from_id(room_id)
            .ok_or_else(|| EngineError::UnknownRoom(room_id.to_string()))?;
        let start = timeline::parse(start_raw)
            .map_err(|e| EngineError::MalformedTime(format!("start: {e}")))?;
        let end = timeline::parse(end_raw)
            .map_err(|e| EngineError::MalformedTime(format!("end: {e}")))?;
        if start >= end {
            return Err(EngineError::InvalidRange);
        }
        let span = Span::new(start, end);
        check_window(&span, timeline::now_ms())?;

        let rs = self.room_state(room);
        let mut guard = rs.write().await;
        check_no_overlap(&guard, &span)?;

        let reservation = Reservation {
            id: Ulid::new(),
            room,
            user: user.to_string(),
            span,
        };
        guard.insert_reservation(reservation.clone());
        self.reservation_to_room.insert(reservation.id, room);
        tracing::debug!(id = %reservation.id, room = room.id(), "reservation created");
        Ok(reservation)
    }

    /// Cancel by id, returning the removed reservation. Not idempotent: a
    /// second cancel of the same id is `NotFound`, as is an id that never
    /// existed. An id that does not even parse as a ULID names nothing and
    /// is `NotFound` too — ids are opaque handles.
    pub async fn cancel_reservation(&self, id_raw: &str) -> Result<Reservation, EngineError> {
        let id = Ulid::from_string(id_raw)
            .map_err(|_| EngineError::NotFound(id_raw.to_string()))?;
        let room = self
            .reservation_to_room
            .get(&id)
            .map(|e| *e.value())
            .ok_or_else(|| EngineError::NotFound(id_raw.to_string()))?;

        let rs = self.room_state(room);
        let mut guard = rs.write().await;
        // A concurrent cancel may have won between the index lookup and the
        // lock acquisition — remove decides, not the index.
        let removed = guard
            .remove_reservation(id)
            .ok_or_else(|| EngineError::NotFound(id_raw.to_string()))?;
        self.reservation_to_room.remove(&id);
        tracing::debug!(id = %id, room = room.id(), "reservation cancelled");
        Ok(removed)
    }
}
