use ulid::Ulid;

use crate::catalog::Room;

/// Unix milliseconds on the UTC timeline — the only time type.
pub type Ms = i64;

/// Half-open interval `[start, end)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Span {
    pub start: Ms,
    pub end: Ms,
}

impl Span {
    pub fn new(start: Ms, end: Ms) -> Self {
        debug_assert!(start < end, "Span start must be before end");
        Self { start, end }
    }

    pub fn duration_ms(&self) -> Ms {
        self.end - self.start
    }

    pub fn overlaps(&self, other: &Span) -> bool {
        self.start < other.end && other.start < self.end
    }
}

/// A confirmed booking. Immutable once admitted; cancellation removes it
/// outright (no soft delete, no update).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reservation {
    pub id: Ulid,
    pub room: Room,
    pub user: String,
    pub span: Span,
}

/// All active reservations of one room, sorted by `span.start`.
#[derive(Debug, Clone)]
pub struct RoomState {
    pub room: Room,
    pub reservations: Vec<Reservation>,
}

impl RoomState {
    pub fn new(room: Room) -> Self {
        Self {
            room,
            reservations: Vec::new(),
        }
    }

    /// Insert maintaining sort order by span.start.
    pub fn insert_reservation(&mut self, reservation: Reservation) {
        let pos = self
            .reservations
            .binary_search_by_key(&reservation.span.start, |r| r.span.start)
            .unwrap_or_else(|e| e);
        self.reservations.insert(pos, reservation);
    }

    /// Remove a reservation by id, returning it if it was present.
    pub fn remove_reservation(&mut self, id: Ulid) -> Option<Reservation> {
        if let Some(pos) = self.reservations.iter().position(|r| r.id == id) {
            Some(self.reservations.remove(pos))
        } else {
            None
        }
    }

    /// Return only reservations whose span overlaps the query window.
    /// Uses binary search to skip reservations starting at or after `query.end`.
    pub fn overlapping(&self, query: &Span) -> impl Iterator<Item = &Reservation> {
        // Everything at index >= right_bound starts at or after query.end → can't overlap.
        let right_bound = self
            .reservations
            .partition_point(|r| r.span.start < query.end);
        self.reservations[..right_bound]
            .iter()
            .filter(move |r| r.span.end > query.start)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn booking(start: Ms, end: Ms) -> Reservation {
        Reservation {
            id: Ulid::new(),
            room: Room::Aurora,
            user: "tester".into(),
            span: Span::new(start, end),
        }
    }

    #[test]
    fn span_overlap() {
        let a = Span::new(100, 200);
        let b = Span::new(150, 250);
        let c = Span::new(200, 300);
        assert!(a.overlaps(&b));
        assert!(!a.overlaps(&c)); // adjacent, not overlapping
    }

    #[test]
    fn span_duration() {
        assert_eq!(Span::new(100, 250).duration_ms(), 150);
    }

    #[test]
    fn reservation_ordering() {
        let mut rs = RoomState::new(Room::Aurora);
        rs.insert_reservation(booking(300, 400));
        rs.insert_reservation(booking(100, 200));
        rs.insert_reservation(booking(200, 300));
        assert_eq!(rs.reservations[0].span.start, 100);
        assert_eq!(rs.reservations[1].span.start, 200);
        assert_eq!(rs.reservations[2].span.start, 300);
    }

    #[test]
    fn remove_returns_reservation() {
        let mut rs = RoomState::new(Room::Sauna);
        let r = booking(100, 200);
        let id = r.id;
        rs.insert_reservation(r);
        let removed = rs.remove_reservation(id).unwrap();
        assert_eq!(removed.id, id);
        assert!(rs.reservations.is_empty());
    }

    #[test]
    fn remove_nonexistent_returns_none() {
        let mut rs = RoomState::new(Room::Sauna);
        rs.insert_reservation(booking(100, 200));
        assert!(rs.remove_reservation(Ulid::new()).is_none());
        assert_eq!(rs.reservations.len(), 1); // original still there
    }

    #[test]
    fn remove_middle_preserves_order() {
        let mut rs = RoomState::new(Room::Taiga);
        let bookings: Vec<Reservation> = (0..3).map(|i| booking(i * 100, i * 100 + 50)).collect();
        let ids: Vec<Ulid> = bookings.iter().map(|r| r.id).collect();
        for r in bookings {
            rs.insert_reservation(r);
        }
        rs.remove_reservation(ids[1]);
        assert_eq!(rs.reservations.len(), 2);
        assert_eq!(rs.reservations[0].id, ids[0]);
        assert_eq!(rs.reservations[1].id, ids[2]);
    }

    #[test]
    fn overlapping_skips_disjoint() {
        let mut rs = RoomState::new(Room::Helmi);
        rs.insert_reservation(booking(100, 200));
        rs.insert_reservation(booking(450, 600));
        rs.insert_reservation(booking(1000, 1100));

        let query = Span::new(500, 800);
        let hits: Vec<_> = rs.overlapping(&query).collect();
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].span, Span::new(450, 600));
    }

    #[test]
    fn overlapping_adjacent_not_included() {
        // A reservation ending exactly at query.start is NOT overlapping (half-open)
        let mut rs = RoomState::new(Room::Sisu);
        rs.insert_reservation(booking(100, 200));
        let hits: Vec<_> = rs.overlapping(&Span::new(200, 300)).collect();
        assert!(hits.is_empty());
    }

    #[test]
    fn overlapping_large_span_covering_query() {
        let mut rs = RoomState::new(Room::Borealis);
        rs.insert_reservation(booking(0, 10_000));
        let hits: Vec<_> = rs.overlapping(&Span::new(500, 600)).collect();
        assert_eq!(hits.len(), 1);
    }

    #[test]
    fn overlapping_empty_room() {
        let rs = RoomState::new(Room::Aurora);
        let hits: Vec<_> = rs.overlapping(&Span::new(0, 1000)).collect();
        assert!(hits.is_empty());
    }

    #[test]
    fn overlapping_single_ms_overlap() {
        let mut rs = RoomState::new(Room::Aurora);
        // [100, 201) overlaps query [200, 300) by exactly 1ms
        rs.insert_reservation(booking(100, 201));
        let hits: Vec<_> = rs.overlapping(&Span::new(200, 300)).collect();
        assert_eq!(hits.len(), 1);
    }
}
