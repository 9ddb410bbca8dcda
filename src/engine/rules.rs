use crate::model::{Ms, RoomState, Span};
use crate::timeline;

use super::EngineError;

/// Lock-free admission checks: no past start, both endpoints inside the
/// current UTC calendar year. `now` is the single per-request clock sample,
/// so both checks agree on what "current" means.
pub(crate) fn check_window(span: &Span, now: Ms) -> Result<(), EngineError> {
    if span.start < now {
        return Err(EngineError::PastStart);
    }
    let year = timeline::year_of(now);
    if timeline::year_of(span.start) != year || timeline::year_of(span.end) != year {
        return Err(EngineError::OutOfYearRange(year));
    }
    Ok(())
}

/// Half-open overlap scan against a room's active reservations. The caller
/// holds the room's write guard; the verdict is only valid while it does.
pub(crate) fn check_no_overlap(rs: &RoomState, span: &Span) -> Result<(), EngineError> {
    match rs.overlapping(span).next() {
        Some(existing) => Err(EngineError::OverlapConflict(existing.id)),
        None => Ok(()),
    }
}
