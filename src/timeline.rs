use chrono::{DateTime, Datelike, SecondsFormat, Utc};

use crate::model::Ms;

/// Parse a timestamp carrying an explicit UTC offset (RFC 3339, e.g.
/// `2026-06-10T10:00:00+02:00`) into UTC milliseconds. Offset-less strings
/// are not valid RFC 3339 and fail here.
pub fn parse(raw: &str) -> Result<Ms, chrono::ParseError> {
    let dt = DateTime::parse_from_rfc3339(raw)?;
    Ok(dt.with_timezone(&Utc).timestamp_millis())
}

/// UTC calendar year containing the instant.
pub fn year_of(t: Ms) -> i32 {
    DateTime::<Utc>::from_timestamp_millis(t)
        .expect("instant within representable range")
        .year()
}

/// Current UTC instant. Sampled once per operation so the past-start check
/// and the calendar-year check read the same clock value.
pub fn now_ms() -> Ms {
    Utc::now().timestamp_millis()
}

/// Render an instant as RFC 3339 UTC (`...Z`) — the only format emitted.
pub fn to_rfc3339(t: Ms) -> String {
    DateTime::<Utc>::from_timestamp_millis(t)
        .expect("instant within representable range")
        .to_rfc3339_opts(SecondsFormat::Millis, true)
}
